pub mod cache;
pub mod forwarding;
pub mod transport;

pub use cache::{CacheKey, NegativeDnsCache};
pub use forwarding::DnsForwarder;
