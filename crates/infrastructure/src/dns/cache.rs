pub mod key;
pub mod negative_cache;

pub use key::CacheKey;
pub use negative_cache::NegativeDnsCache;
