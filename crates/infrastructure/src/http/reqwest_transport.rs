//! Terminal HTTP handler backed by `reqwest`.
//!
//! When the request options carry a resolve override for the request's
//! `host:port`, the connection goes to exactly those addresses and the
//! system resolver is never consulted for that host. Redirects and proxies
//! are disabled since either would reach a host nobody checked.

use async_trait::async_trait;
use bytes::Bytes;
use dns_pin_application::ports::HttpHandler;
use dns_pin_domain::{
    DomainError, HttpConfig, HttpRequest, HttpResponse, RequestOptions, ResolveOverride,
};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
    user_agent: String,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, DomainError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let user_agent = config.user_agent.clone();
        let client = Self::client_builder(timeout, &user_agent)
            .build()
            .map_err(|e| DomainError::HttpError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout,
            user_agent,
        })
    }

    fn client_builder(timeout: Duration, user_agent: &str) -> reqwest::ClientBuilder {
        reqwest::Client::builder()
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .timeout(timeout)
            .user_agent(user_agent)
    }

    /// Pinned client for a single request. Not pooled: the override only
    /// holds for this request.
    fn pinned_client(&self, pin: &ResolveOverride) -> Result<reqwest::Client, DomainError> {
        let addrs = pinned_socket_addrs(pin);
        Self::client_builder(self.timeout, &self.user_agent)
            .resolve_to_addrs(&pin.host, &addrs)
            .build()
            .map_err(|e| DomainError::HttpError(format!("Failed to build pinned client: {}", e)))
    }

    async fn into_http_response(response: reqwest::Response) -> Result<HttpResponse, DomainError> {
        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body: Bytes = response.bytes().await.map_err(map_reqwest_error)?;

        let mut http_response = http::Response::new(body);
        *http_response.status_mut() = status;
        *http_response.version_mut() = version;
        *http_response.headers_mut() = headers;
        Ok(http_response)
    }
}

#[async_trait]
impl HttpHandler for ReqwestTransport {
    async fn handle(
        &self,
        request: HttpRequest,
        options: RequestOptions,
    ) -> Result<HttpResponse, DomainError> {
        let mut request = reqwest::Request::try_from(request)
            .map_err(|e| DomainError::InvalidUri(e.to_string()))?;

        if let Some(timeout) = options.timeout {
            *request.timeout_mut() = Some(timeout);
        }

        let (host, port) = effective_host_port(request.url())?;

        let response = match options.resolve_override_for(&host, port) {
            Some(pin) => {
                debug!(host = %host, port, addresses = pin.addresses.len(), "Sending pinned request");
                self.pinned_client(pin)?.execute(request).await
            }
            None => {
                debug!(host = %host, port, "Sending unpinned request");
                self.client.execute(request).await
            }
        }
        .map_err(map_reqwest_error)?;

        Self::into_http_response(response).await
    }
}

fn effective_host_port(url: &reqwest::Url) -> Result<(String, u16), DomainError> {
    let host = url
        .host_str()
        .ok_or_else(|| DomainError::InvalidUri(format!("No host in {}", url)))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| DomainError::InvalidUri(format!("No port for scheme of {}", url)))?;
    Ok((host.to_string(), port))
}

fn pinned_socket_addrs(pin: &ResolveOverride) -> Vec<SocketAddr> {
    pin.addresses
        .iter()
        .map(|&address| SocketAddr::new(address, pin.port))
        .collect()
}

fn map_reqwest_error(e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::TransportTimeout {
            server: e
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        }
    } else {
        DomainError::HttpError(e.to_string())
    }
}
