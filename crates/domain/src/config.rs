pub mod dns;
pub mod errors;
pub mod http;
pub mod logging;
pub mod root;

pub use dns::{DnsConfig, Ipv6Mode};
pub use errors::ConfigError;
pub use self::http::HttpConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
