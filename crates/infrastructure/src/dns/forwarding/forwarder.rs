use super::message_builder::MessageBuilder;
use super::response_parser::{DnsResponse, ResponseParser};
use crate::dns::transport::{tcp::TcpTransport, udp::UdpTransport, DnsTransport};
use async_trait::async_trait;
use dns_pin_application::ports::DnsRecordQuery;
use dns_pin_domain::{DnsQuery, DnsRecord, DomainError, RecordType};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends single-question queries to a fixed list of upstream recursive
/// servers, trying them in order.
pub struct DnsForwarder {
    servers: Vec<SocketAddr>,
    timeout: Duration,
}

impl DnsForwarder {
    pub fn new(servers: Vec<SocketAddr>, timeout: Duration) -> Self {
        Self { servers, timeout }
    }

    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }

    /// Queries one server over UDP, retrying over TCP when the answer is
    /// truncated.
    pub async fn query(
        &self,
        server: SocketAddr,
        domain: &str,
        record_type: &RecordType,
    ) -> Result<DnsResponse, DomainError> {
        let (id, request) = MessageBuilder::build_query(domain, record_type)?;

        let response = self
            .exchange(&UdpTransport::new(server), id, &request)
            .await?;

        if response.truncated {
            debug!(server = %server, domain = %domain, "Truncated UDP answer, retrying over TCP");
            return self
                .exchange(&TcpTransport::new(server), id, &request)
                .await;
        }

        Ok(response)
    }

    async fn exchange(
        &self,
        transport: &dyn DnsTransport,
        id: u16,
        request: &[u8],
    ) -> Result<DnsResponse, DomainError> {
        let raw = transport.send(request, self.timeout).await?;
        let response = ResponseParser::parse(&raw.bytes)?;

        if response.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} response from {} has ID {}, expected {}",
                raw.protocol_used,
                transport.server_addr(),
                response.id,
                id
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl DnsRecordQuery for DnsForwarder {
    async fn query_records(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, DomainError> {
        let query = DnsQuery::new(name, record_type);
        let mut last_error = None;

        for &server in &self.servers {
            match self.query(server, name, &record_type).await {
                Ok(response) if response.is_server_error() => {
                    let status = ResponseParser::rcode_to_status(response.rcode);
                    debug!(server = %server, query = %query, status, "Upstream refused to answer");
                    last_error = Some(DomainError::InvalidDnsResponse(format!(
                        "{} from {} for {}",
                        status, server, query
                    )));
                }
                Ok(response) => {
                    if response.is_nxdomain() {
                        debug!(query = %query, "NXDOMAIN");
                    }
                    return Ok(response.records_of(record_type));
                }
                Err(e) => {
                    warn!(server = %server, query = %query, error = %e, "Upstream query failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DomainError::ConfigError("No upstream DNS servers configured".to_string())
        }))
    }
}
