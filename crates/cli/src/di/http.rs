use super::DnsServices;
use dns_pin_application::ports::{build_chain, HttpHandler, HttpMiddleware};
use dns_pin_domain::Config;
use dns_pin_infrastructure::http::ReqwestTransport;
use std::sync::Arc;

/// Outbound pipeline: DNS pinning in front of the reqwest transport.
pub struct HttpPipeline {
    pub handler: Arc<dyn HttpHandler>,
}

impl HttpPipeline {
    pub fn new(config: &Config, dns: &DnsServices) -> anyhow::Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.http)?);
        let middlewares: Vec<Arc<dyn HttpMiddleware>> = vec![Arc::new(dns.middleware.clone())];

        Ok(Self {
            handler: build_chain(transport, &middlewares),
        })
    }
}
