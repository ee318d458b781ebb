use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// One transport resolve override: connections to `host:port` must use
/// exactly `addresses`, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOverride {
    pub host: Arc<str>,
    pub port: u16,
    pub addresses: Vec<IpAddr>,
}

impl ResolveOverride {
    pub fn new(host: impl Into<Arc<str>>, port: u16, addresses: Vec<IpAddr>) -> Self {
        Self {
            host: host.into(),
            port,
            addresses,
        }
    }

    /// `host:port`, the key the transport matches against.
    pub fn host_port(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn matches(&self, host: &str, port: u16) -> bool {
        self.port == port && self.host.eq_ignore_ascii_case(host)
    }
}

/// Renders as `host:port:addr1,addr2`.
impl fmt::Display for ResolveOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:", self.host, self.port)?;
        for (i, address) in self.addresses.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", address)?;
        }
        Ok(())
    }
}

/// Per-request pinning table. Built fresh for every request and never
/// shared between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinMap {
    entries: Vec<ResolveOverride>,
}

impl PinMap {
    /// Pins every port of `host` to the same ordered address list.
    pub fn build(host: &str, ports: &[u16], addresses: &[IpAddr]) -> Self {
        let host: Arc<str> = Arc::from(host);
        let entries = ports
            .iter()
            .map(|&port| ResolveOverride::new(Arc::clone(&host), port, addresses.to_vec()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, host: &str, port: u16) -> Option<&ResolveOverride> {
        self.entries.iter().find(|entry| entry.matches(host, port))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolveOverride> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_overrides(self) -> Vec<ResolveOverride> {
        self.entries
    }
}

impl fmt::Display for PinMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
