use crate::ports::{DnsRecordQuery, NegativeCachePort};
use dns_pin_domain::{DnsRecord, RecordType, ResolvedAddress};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// CNAME chases stop here; deeper branches resolve to nothing.
pub const MAX_RECURSION_DEPTH: u8 = 10;

const RECORD_TYPES_DUAL_STACK: [RecordType; 3] =
    [RecordType::A, RecordType::AAAA, RecordType::CNAME];
const RECORD_TYPES_IPV4_ONLY: [RecordType; 2] = [RecordType::A, RecordType::CNAME];

/// Resolves a hostname to every A/AAAA address reachable from it, following
/// CNAME aliases and consulting the negative cache before each raw query.
pub struct RecursiveResolver {
    query: Arc<dyn DnsRecordQuery>,
    negative_cache: Arc<dyn NegativeCachePort>,
    record_types: &'static [RecordType],
    query_timeout: Option<Duration>,
}

impl RecursiveResolver {
    /// `ipv6_supported` comes from the platform probe; when false no AAAA
    /// query is ever issued.
    pub fn new(
        query: Arc<dyn DnsRecordQuery>,
        negative_cache: Arc<dyn NegativeCachePort>,
        ipv6_supported: bool,
    ) -> Self {
        let record_types: &'static [RecordType] = if ipv6_supported {
            &RECORD_TYPES_DUAL_STACK
        } else {
            &RECORD_TYPES_IPV4_ONLY
        };

        Self {
            query,
            negative_cache,
            record_types,
            query_timeout: None,
        }
    }

    /// Bounds every raw query. A query that times out counts as empty.
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    pub fn queries_aaaa(&self) -> bool {
        self.record_types.contains(&RecordType::AAAA)
    }

    pub async fn resolve(&self, hostname: &str) -> Vec<ResolvedAddress> {
        self.resolve_at_depth(hostname, 0).await
    }

    /// Returns an empty set once `depth` reaches [`MAX_RECURSION_DEPTH`].
    pub fn resolve_at_depth<'a>(
        &'a self,
        hostname: &'a str,
        depth: u8,
    ) -> BoxFuture<'a, Vec<ResolvedAddress>> {
        Box::pin(async move {
            if depth >= MAX_RECURSION_DEPTH {
                debug!(domain = %hostname, depth, "CNAME chain too deep, truncating");
                return Vec::new();
            }

            let negative_ttl = self.negative_ttl(hostname).await;
            let mut addresses = Vec::new();
            let mut can_have_cname = true;

            for &record_type in self.record_types {
                if record_type == RecordType::CNAME && !can_have_cname {
                    continue;
                }

                if self.negative_cache.is_negative_cached(hostname, record_type) {
                    debug!(domain = %hostname, record_type = %record_type, "Negative cache hit");
                    continue;
                }

                let records = self.query_or_empty(hostname, record_type).await;

                if records.is_empty() {
                    if let Some(ttl) = negative_ttl {
                        self.negative_cache
                            .set_negative_cache(hostname, record_type, ttl);
                    }
                    continue;
                }

                for record in &records {
                    if let Some(address) = record.address() {
                        addresses.push(ResolvedAddress::new(address, Arc::clone(&record.name)));
                        can_have_cname = false;
                    } else if let Some(target) = record.cname_target() {
                        if can_have_cname {
                            debug!(domain = %hostname, target = %target, depth, "Following CNAME");
                            let chased = self.resolve_at_depth(target, depth + 1).await;
                            addresses.extend(chased);
                        }
                    }
                }
            }

            debug!(
                domain = %hostname,
                depth,
                addresses = addresses.len(),
                "Resolution finished"
            );

            addresses
        })
    }

    /// Minimum TTL of the SOA at the hostname's registrable parent, if any.
    async fn negative_ttl(&self, hostname: &str) -> Option<u32> {
        let parent = registrable_parent(hostname);
        self.query_or_empty(&parent, RecordType::SOA)
            .await
            .iter()
            .find_map(DnsRecord::soa_minimum_ttl)
    }

    async fn query_or_empty(&self, name: &str, record_type: RecordType) -> Vec<DnsRecord> {
        let query = self.query.query_records(name, record_type);

        let result = match self.query_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, query).await {
                Ok(result) => result,
                Err(_) => {
                    debug!(domain = %name, record_type = %record_type, "DNS query timed out");
                    return Vec::new();
                }
            },
            None => query.await,
        };

        match result {
            Ok(records) => records,
            Err(e) => {
                debug!(
                    domain = %name,
                    record_type = %record_type,
                    error = %e,
                    "DNS query failed, treating as empty"
                );
                Vec::new()
            }
        }
    }
}

/// Last two labels of `hostname`. Not public-suffix aware: `a.b.co.uk`
/// yields `co.uk`.
pub fn registrable_parent(hostname: &str) -> String {
    let trimmed = hostname.trim_end_matches('.');
    let labels: Vec<&str> = trimmed.rsplitn(3, '.').collect();
    match labels.as_slice() {
        [top, second, ..] => format!("{}.{}", second, top),
        _ => trimmed.to_string(),
    }
}
