use std::net::IpAddr;

/// Decides whether an address belongs to a range outbound requests must
/// never reach (loopback, private, link-local and similar).
pub trait AddressClassifier: Send + Sync {
    fn is_local_address(&self, address: &IpAddr) -> bool;
}
