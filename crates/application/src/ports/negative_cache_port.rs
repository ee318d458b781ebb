use dns_pin_domain::RecordType;

/// Process-wide store of "no records of this type for this name" facts.
///
/// Implementations must tolerate concurrent readers and writers. Staleness
/// is acceptable; raw DNS stays authoritative on a miss.
pub trait NegativeCachePort: Send + Sync {
    fn is_negative_cached(&self, hostname: &str, record_type: RecordType) -> bool;

    /// Overwrites any existing entry for the same pair.
    fn set_negative_cache(&self, hostname: &str, record_type: RecordType, ttl_secs: u32);
}
