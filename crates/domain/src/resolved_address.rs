use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// An address produced by resolution, tagged with the name whose A/AAAA
/// record carried it (the end of any CNAME chain).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedAddress {
    pub address: IpAddr,
    pub hostname: Arc<str>,
}

impl ResolvedAddress {
    pub fn new(address: IpAddr, hostname: impl Into<Arc<str>>) -> Self {
        Self {
            address,
            hostname: hostname.into(),
        }
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.hostname)
    }
}
