use compact_str::CompactString;
use dns_pin_domain::RecordType;

/// Names are stored lowercase so lookups ignore case.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: CompactString,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        let domain = domain.trim_end_matches('.');
        let domain = if domain.bytes().any(|b| b.is_ascii_uppercase()) {
            CompactString::from(domain.to_ascii_lowercase())
        } else {
            CompactString::from(domain)
        };

        Self {
            domain,
            record_type,
        }
    }
}
