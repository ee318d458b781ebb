use super::RecordType;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),

    AAAA(Ipv6Addr),

    /// Alias target, without the trailing root dot.
    CNAME(Arc<str>),

    /// Only the negative-caching TTL of the SOA is kept.
    SOA { minimum_ttl: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Owner name of the record.
    pub name: Arc<str>,

    pub ttl: u32,

    pub data: RecordData,
}

impl DnsRecord {
    pub fn new(name: impl Into<Arc<str>>, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            ttl,
            data,
        }
    }

    pub fn a(name: impl Into<Arc<str>>, address: Ipv4Addr) -> Self {
        Self::new(name, 300, RecordData::A(address))
    }

    pub fn aaaa(name: impl Into<Arc<str>>, address: Ipv6Addr) -> Self {
        Self::new(name, 300, RecordData::AAAA(address))
    }

    pub fn cname(name: impl Into<Arc<str>>, target: impl Into<Arc<str>>) -> Self {
        Self::new(name, 300, RecordData::CNAME(target.into()))
    }

    pub fn soa(name: impl Into<Arc<str>>, minimum_ttl: u32) -> Self {
        Self::new(name, 3600, RecordData::SOA { minimum_ttl })
    }

    pub fn record_type(&self) -> RecordType {
        match self.data {
            RecordData::A(_) => RecordType::A,
            RecordData::AAAA(_) => RecordType::AAAA,
            RecordData::CNAME(_) => RecordType::CNAME,
            RecordData::SOA { .. } => RecordType::SOA,
        }
    }

    pub fn address(&self) -> Option<IpAddr> {
        match self.data {
            RecordData::A(v4) => Some(IpAddr::V4(v4)),
            RecordData::AAAA(v6) => Some(IpAddr::V6(v6)),
            _ => None,
        }
    }

    pub fn cname_target(&self) -> Option<&str> {
        match &self.data {
            RecordData::CNAME(target) => Some(target),
            _ => None,
        }
    }

    pub fn soa_minimum_ttl(&self) -> Option<u32> {
        match self.data {
            RecordData::SOA { minimum_ttl } => Some(minimum_ttl),
            _ => None,
        }
    }
}
