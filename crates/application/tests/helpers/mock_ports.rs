#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use dns_pin_application::ports::{
    AddressClassifier, DnsRecordQuery, HttpHandler, NegativeCachePort,
};
use dns_pin_domain::{
    DnsRecord, DomainError, HttpRequest, HttpResponse, RecordType, RequestOptions,
};
use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

type QueryKey = (String, RecordType);

/// Authoritative answers keyed by `(name, type)`. Unknown keys answer with
/// no records. Every query is logged in order.
#[derive(Clone, Default)]
pub struct MockDnsRecordQuery {
    records: Arc<RwLock<HashMap<QueryKey, Vec<DnsRecord>>>>,
    failures: Arc<RwLock<HashSet<QueryKey>>>,
    calls: Arc<Mutex<Vec<QueryKey>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockDnsRecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&self, query_type: RecordType, record: DnsRecord) {
        let key = (record.name.to_string(), query_type);
        self.records
            .write()
            .unwrap()
            .entry(key)
            .or_default()
            .push(record);
    }

    pub fn add_a(&self, name: &str, address: &str) {
        let v4: Ipv4Addr = address.parse().unwrap();
        self.add_record(RecordType::A, DnsRecord::a(name, v4));
    }

    pub fn add_aaaa(&self, name: &str, address: &str) {
        let v6: Ipv6Addr = address.parse().unwrap();
        self.add_record(RecordType::AAAA, DnsRecord::aaaa(name, v6));
    }

    pub fn add_cname(&self, name: &str, target: &str) {
        self.add_record(RecordType::CNAME, DnsRecord::cname(name, target));
    }

    pub fn add_soa(&self, zone: &str, minimum_ttl: u32) {
        self.add_record(RecordType::SOA, DnsRecord::soa(zone, minimum_ttl));
    }

    /// Answers `(name, type)` with exactly `records`, whatever their types.
    pub fn set_answer(&self, name: &str, query_type: RecordType, records: Vec<DnsRecord>) {
        self.records
            .write()
            .unwrap()
            .insert((name.to_string(), query_type), records);
    }

    pub fn fail(&self, name: &str, query_type: RecordType) {
        self.failures
            .write()
            .unwrap()
            .insert((name.to_string(), query_type));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<QueryKey> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str, query_type: RecordType) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, t)| n == name && *t == query_type)
            .count()
    }

    /// Address and CNAME queries only; SOA lookups are excluded.
    pub fn lookup_calls(&self) -> Vec<QueryKey> {
        self.calls()
            .into_iter()
            .filter(|(_, t)| *t != RecordType::SOA)
            .collect()
    }
}

#[async_trait]
impl DnsRecordQuery for MockDnsRecordQuery {
    async fn query_records(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), record_type));

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let key = (name.to_string(), record_type);
        if self.failures.read().unwrap().contains(&key) {
            return Err(DomainError::TransportTimeout {
                server: "mock".to_string(),
            });
        }

        Ok(self
            .records
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}

/// Negative cache that never expires and remembers every TTL written.
#[derive(Clone, Default)]
pub struct MockNegativeCache {
    entries: Arc<Mutex<HashMap<QueryKey, u32>>>,
}

impl MockNegativeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl_for(&self, name: &str, record_type: RecordType) -> Option<u32> {
        self.entries
            .lock()
            .unwrap()
            .get(&(name.to_string(), record_type))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl NegativeCachePort for MockNegativeCache {
    fn is_negative_cached(&self, name: &str, record_type: RecordType) -> bool {
        self.entries
            .lock()
            .unwrap()
            .contains_key(&(name.to_string(), record_type))
    }

    fn set_negative_cache(&self, name: &str, record_type: RecordType, ttl_secs: u32) {
        self.entries
            .lock()
            .unwrap()
            .insert((name.to_string(), record_type), ttl_secs);
    }
}

/// Treats loopback, RFC 1918 and IPv6 unique-local addresses as local.
pub struct MockAddressClassifier;

impl AddressClassifier for MockAddressClassifier {
    fn is_local_address(&self, address: &IpAddr) -> bool {
        match address {
            IpAddr::V4(v4) => v4.is_loopback() || v4.is_private() || v4.is_unspecified(),
            IpAddr::V6(v6) => v6.is_loopback() || (v6.segments()[0] & 0xfe00) == 0xfc00,
        }
    }
}

/// Terminal handler that records what reached it and answers 200.
#[derive(Clone, Default)]
pub struct RecordingHandler {
    seen: Arc<Mutex<Vec<(String, RequestOptions)>>>,
    failure: Arc<RwLock<Option<DomainError>>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_with(error: DomainError) -> Self {
        let handler = Self::default();
        *handler.failure.write().unwrap() = Some(error);
        handler
    }

    pub fn seen(&self) -> Vec<(String, RequestOptions)> {
        self.seen.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last_options(&self) -> RequestOptions {
        self.seen
            .lock()
            .unwrap()
            .last()
            .map(|(_, options)| options.clone())
            .expect("handler was never called")
    }
}

#[async_trait]
impl HttpHandler for RecordingHandler {
    async fn handle(
        &self,
        request: HttpRequest,
        options: RequestOptions,
    ) -> Result<HttpResponse, DomainError> {
        self.seen
            .lock()
            .unwrap()
            .push((request.uri().to_string(), options));

        if let Some(err) = self.failure.read().unwrap().clone() {
            return Err(err);
        }

        Ok(http::Response::builder()
            .status(200)
            .body(Bytes::from_static(b"ok"))
            .unwrap())
    }
}

pub fn get(uri: &str) -> HttpRequest {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Bytes::new())
        .unwrap()
}
