mod address_classifier;
mod dns_record_query;
mod http_handler;
mod negative_cache_port;

pub use address_classifier::AddressClassifier;
pub use dns_record_query::DnsRecordQuery;
pub use http_handler::{build_chain, HttpHandler, HttpMiddleware};
pub use negative_cache_port::NegativeCachePort;

// Re-export for convenience
pub use dns_pin_domain::{DnsRecord, RecordType};
