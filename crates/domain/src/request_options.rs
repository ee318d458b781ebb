use super::ResolveOverride;
use std::time::Duration;

/// Options travelling alongside a request through the handler chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Explicit opt-out of DNS pinning for administrative call sites.
    /// Defaults to `false` and is never inferred.
    pub allow_local_address: bool,

    /// Transport-level resolve overrides, one entry per `host:port`.
    pub resolve_overrides: Vec<ResolveOverride>,

    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowing_local_address(mut self) -> Self {
        self.allow_local_address = true;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Later entries win over earlier ones for the same `host:port`.
    pub fn resolve_override_for(&self, host: &str, port: u16) -> Option<&ResolveOverride> {
        self.resolve_overrides
            .iter()
            .rev()
            .find(|entry| entry.matches(host, port))
    }
}
