use crate::ports::{AddressClassifier, HttpHandler, HttpMiddleware};
use crate::services::RecursiveResolver;
use async_trait::async_trait;
use dns_pin_domain::{DomainError, HttpRequest, HttpResponse, PinMap, RequestOptions};
use http::Uri;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Host;

/// Ports pinned for every request, in checking order.
pub const DEFAULT_PORTS: [u16; 2] = [80, 443];

/// Resolves each request's host itself, refuses local destinations and
/// pins the transport to the addresses it checked.
#[derive(Clone)]
pub struct DnsPinMiddleware {
    resolver: Arc<RecursiveResolver>,
    classifier: Arc<dyn AddressClassifier>,
}

impl DnsPinMiddleware {
    pub fn new(resolver: Arc<RecursiveResolver>, classifier: Arc<dyn AddressClassifier>) -> Self {
        Self {
            resolver,
            classifier,
        }
    }

    /// Runs resolution and classification for `uri` and returns the pin
    /// table the transport must honour.
    ///
    /// Fails with [`DomainError::NoDnsRecord`] when nothing resolves and with
    /// [`DomainError::LocalAddressViolation`] on the first local address.
    pub async fn pin(&self, uri: &Uri) -> Result<PinMap, DomainError> {
        let raw_host = uri
            .host()
            .ok_or_else(|| DomainError::InvalidUri(format!("No host in {}", uri)))?;

        let host = Host::parse(raw_host)
            .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", raw_host, e)))?;

        let ports = candidate_ports(uri.port_u16());

        let addresses: Vec<IpAddr> = match &host {
            Host::Domain(name) => self
                .resolver
                .resolve(name)
                .await
                .into_iter()
                .map(|resolved| resolved.address)
                .collect(),
            Host::Ipv4(v4) => vec![IpAddr::V4(*v4)],
            Host::Ipv6(v6) => vec![IpAddr::V6(*v6)],
        };

        if addresses.is_empty() {
            debug!(host = %raw_host, "No addresses resolved");
            return Err(DomainError::NoDnsRecord(raw_host.to_string()));
        }

        for &port in &ports {
            for &address in &addresses {
                if self.classifier.is_local_address(&address) {
                    warn!(
                        host = %raw_host,
                        port,
                        address = %address,
                        "Blocked request to local address"
                    );
                    return Err(DomainError::LocalAddressViolation {
                        address,
                        host: raw_host.to_string(),
                        port,
                    });
                }
            }
        }

        let pin_map = PinMap::build(&host.to_string(), &ports, &addresses);
        debug!(host = %host, entries = pin_map.len(), addresses = addresses.len(), "DNS pinned");

        Ok(pin_map)
    }
}

impl HttpMiddleware for DnsPinMiddleware {
    fn wrap(&self, next: Arc<dyn HttpHandler>) -> Arc<dyn HttpHandler> {
        Arc::new(DnsPinningHandler {
            middleware: self.clone(),
            next,
        })
    }
}

/// {80, 443} plus the explicit port, without duplicates.
pub fn candidate_ports(explicit: Option<u16>) -> Vec<u16> {
    let mut ports = DEFAULT_PORTS.to_vec();
    if let Some(port) = explicit {
        if !ports.contains(&port) {
            ports.push(port);
        }
    }
    ports
}

struct DnsPinningHandler {
    middleware: DnsPinMiddleware,
    next: Arc<dyn HttpHandler>,
}

#[async_trait]
impl HttpHandler for DnsPinningHandler {
    async fn handle(
        &self,
        request: HttpRequest,
        mut options: RequestOptions,
    ) -> Result<HttpResponse, DomainError> {
        if options.allow_local_address {
            debug!(uri = %request.uri(), "Local addresses allowed, skipping DNS pinning");
            return self.next.handle(request, options).await;
        }

        let pin_map = self.middleware.pin(request.uri()).await?;
        options.resolve_overrides.extend(pin_map.into_overrides());

        self.next.handle(request, options).await
    }
}
