use dns_pin_application::services::{DnsPinMiddleware, RecursiveResolver};
use dns_pin_domain::{Config, Ipv6Mode};
use dns_pin_infrastructure::dns::{DnsForwarder, NegativeDnsCache};
use dns_pin_infrastructure::system::{ipv6_supported, PrivateRangeClassifier};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub resolver: Arc<RecursiveResolver>,
    pub negative_cache: Arc<NegativeDnsCache>,
    pub middleware: DnsPinMiddleware,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let upstreams = config
            .dns
            .upstream_addrs()
            .map_err(|e| anyhow::anyhow!("Invalid upstream server: {}", e))?;

        let per_server_timeout = Duration::from_millis(config.dns.query_timeout_ms);
        // One full pass over every upstream is allowed before a query counts as empty.
        let query_bound = per_server_timeout * upstreams.len().max(1) as u32;

        let ipv6 = match config.dns.ipv6 {
            Ipv6Mode::Auto => ipv6_supported(),
            Ipv6Mode::Enabled => true,
            Ipv6Mode::Disabled => false,
        };

        info!(
            upstreams = upstreams.len(),
            timeout_ms = config.dns.query_timeout_ms,
            ipv6,
            negative_cache_max_entries = config.dns.negative_cache_max_entries,
            "Initializing DNS services"
        );

        let forwarder = Arc::new(DnsForwarder::new(upstreams, per_server_timeout));
        let negative_cache = Arc::new(NegativeDnsCache::new(
            config.dns.negative_cache_max_entries,
        ));

        let resolver = Arc::new(
            RecursiveResolver::new(forwarder, negative_cache.clone(), ipv6)
                .with_query_timeout(query_bound),
        );

        let middleware =
            DnsPinMiddleware::new(resolver.clone(), Arc::new(PrivateRangeClassifier::new()));

        Ok(Self {
            resolver,
            negative_cache,
            middleware,
        })
    }
}
