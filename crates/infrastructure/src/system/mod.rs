pub mod address_classifier;
pub mod ipv6_probe;

pub use address_classifier::PrivateRangeClassifier;
pub use ipv6_probe::ipv6_supported;
