use std::net::IpAddr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No DNS record found for {0}")]
    NoDnsRecord(String),

    #[error("Host \"{address}\" ({host}:{port}) violates local access rules")]
    LocalAddressViolation {
        address: IpAddr,
        host: String,
        port: u16,
    },

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid request URI: {0}")]
    InvalidUri(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True for the two errors raised by the pinning policy itself.
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            DomainError::NoDnsRecord(_) | DomainError::LocalAddressViolation { .. }
        )
    }
}
