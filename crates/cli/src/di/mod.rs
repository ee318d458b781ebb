mod dns;
mod http;

pub use dns::DnsServices;
pub use http::HttpPipeline;
