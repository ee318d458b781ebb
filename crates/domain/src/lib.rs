//! dns-pin Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod http_message;
pub mod pin_map;
pub mod request_options;
pub mod resolved_address;

pub use config::{CliOverrides, Config, ConfigError, DnsConfig, HttpConfig, Ipv6Mode, LoggingConfig};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsRecord, RecordData, RecordType};
pub use errors::DomainError;
pub use http_message::{HttpRequest, HttpResponse};
pub use pin_map::{PinMap, ResolveOverride};
pub use request_options::RequestOptions;
pub use resolved_address::ResolvedAddress;
