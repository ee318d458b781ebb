use super::record_type_map::RecordTypeMapper;
use dns_pin_domain::{DnsRecord, DomainError, RecordData, RecordType};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{Name, RData, Record};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Answer records the resolver understands, in wire order.
    pub records: Vec<DnsRecord>,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    /// Another upstream may still answer.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }

    /// Answers of exactly `record_type`. A query for A returns only A
    /// records even when the upstream also sent the CNAME chain.
    pub fn records_of(&self, record_type: RecordType) -> Vec<DnsRecord> {
        self.records
            .iter()
            .filter(|record| record.record_type() == record_type)
            .cloned()
            .collect()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let records: Vec<DnsRecord> = message
            .answers()
            .iter()
            .filter_map(Self::convert_record)
            .collect();

        debug!(
            rcode = ?rcode,
            records = records.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode,
            truncated,
            records,
        })
    }

    fn convert_record(record: &Record) -> Option<DnsRecord> {
        RecordTypeMapper::from_hickory(record.record_type())?;

        let data = match record.data() {
            RData::A(a) => RecordData::A(a.0),
            RData::AAAA(aaaa) => RecordData::AAAA(aaaa.0),
            RData::CNAME(canonical) => RecordData::CNAME(Arc::from(Self::name_to_string(canonical))),
            RData::SOA(soa) => RecordData::SOA {
                minimum_ttl: soa.minimum(),
            },
            _ => return None,
        };

        Some(DnsRecord::new(
            Self::name_to_string(record.name()),
            record.ttl(),
            data,
        ))
    }

    /// Lowercase, without the trailing root dot.
    fn name_to_string(name: &Name) -> String {
        name.to_utf8()
            .trim_end_matches('.')
            .to_ascii_lowercase()
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
