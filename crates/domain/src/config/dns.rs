use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// Whether AAAA lookups are issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ipv6Mode {
    /// Probe the host once at startup.
    #[default]
    Auto,
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Nameservers queried in order. A bare IP means port 53.
    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,

    /// Upper bound for a single raw query, per server.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_negative_cache_max_entries")]
    pub negative_cache_max_entries: usize,

    #[serde(default)]
    pub ipv6: Ipv6Mode,
}

impl DnsConfig {
    /// Parses `upstream_servers`, defaulting the port to 53.
    pub fn upstream_addrs(&self) -> Result<Vec<SocketAddr>, String> {
        self.upstream_servers
            .iter()
            .map(|server| parse_upstream(server))
            .collect()
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_servers: default_upstream_servers(),
            query_timeout_ms: default_query_timeout_ms(),
            negative_cache_max_entries: default_negative_cache_max_entries(),
            ipv6: Ipv6Mode::Auto,
        }
    }
}

fn parse_upstream(server: &str) -> Result<SocketAddr, String> {
    let server = server.trim();
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    let bare = server.trim_start_matches('[').trim_end_matches(']');
    bare.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, 53))
        .map_err(|_| format!("Invalid upstream server '{}'", server))
}

fn default_upstream_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_negative_cache_max_entries() -> usize {
    10_000
}
