use async_trait::async_trait;
use dns_pin_domain::{DnsRecord, DomainError, RecordType};

/// Raw single-name, single-type DNS lookup.
///
/// An empty vector means "no records of this type". Errors cover transport
/// failures and timeouts; callers in the resolver treat them as empty.
#[async_trait]
pub trait DnsRecordQuery: Send + Sync {
    async fn query_records(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, DomainError>;
}
