#![allow(dead_code)]
use std::collections::{HashMap, HashSet};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

pub const TYPE_A: u16 = 1;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_AAAA: u16 = 28;

const RCODE_NOERROR: u8 = 0;
const RCODE_SERVFAIL: u8 = 2;
const RCODE_NXDOMAIN: u8 = 3;

#[derive(Debug, Clone)]
pub enum MockAnswer {
    A(&'static str, Ipv4Addr),
    Aaaa(&'static str, Ipv6Addr),
    Cname(&'static str, &'static str),
    Soa(&'static str, u32),
}

impl MockAnswer {
    fn encode(&self, out: &mut Vec<u8>) {
        let (name, rtype, rdata) = match self {
            MockAnswer::A(name, ip) => (*name, TYPE_A, ip.octets().to_vec()),
            MockAnswer::Aaaa(name, ip) => (*name, TYPE_AAAA, ip.octets().to_vec()),
            MockAnswer::Cname(name, target) => (*name, TYPE_CNAME, encode_name(target)),
            MockAnswer::Soa(zone, minimum) => {
                let mut rdata = encode_name(&format!("ns1.{}", zone));
                rdata.extend(encode_name(&format!("hostmaster.{}", zone)));
                for value in [1u32, 3600, 900, 604_800, *minimum] {
                    rdata.extend_from_slice(&value.to_be_bytes());
                }
                (*zone, TYPE_SOA, rdata)
            }
        };

        out.extend(encode_name(name));
        out.extend_from_slice(&rtype.to_be_bytes());
        out.extend_from_slice(&[0x00, 0x01]);
        out.extend_from_slice(&60u32.to_be_bytes());
        out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        out.extend(rdata);
    }
}

/// Canned answers keyed by `(name, qtype)`. Anything missing answers
/// NOERROR with no records.
#[derive(Debug, Clone, Default)]
pub struct MockZone {
    answers: HashMap<(String, u16), Vec<MockAnswer>>,
    rcodes: HashMap<String, u8>,
    truncate_over_udp: HashSet<String>,
}

impl MockZone {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, name: &str, qtype: u16, answer: MockAnswer) -> Self {
        self.answers
            .entry((name.to_string(), qtype))
            .or_default()
            .push(answer);
        self
    }

    pub fn a(self, name: &'static str, ip: &str) -> Self {
        self.push(name, TYPE_A, MockAnswer::A(name, ip.parse().unwrap()))
    }

    pub fn aaaa(self, name: &'static str, ip: &str) -> Self {
        self.push(name, TYPE_AAAA, MockAnswer::Aaaa(name, ip.parse().unwrap()))
    }

    pub fn cname(self, name: &'static str, target: &'static str) -> Self {
        self.push(name, TYPE_CNAME, MockAnswer::Cname(name, target))
    }

    pub fn soa(self, zone: &'static str, minimum: u32) -> Self {
        self.push(zone, TYPE_SOA, MockAnswer::Soa(zone, minimum))
    }

    /// Answers for `(name, qtype)` exactly as given, in order.
    pub fn raw(mut self, name: &str, qtype: u16, answers: Vec<MockAnswer>) -> Self {
        self.answers.insert((name.to_string(), qtype), answers);
        self
    }

    pub fn nxdomain(mut self, name: &str) -> Self {
        self.rcodes.insert(name.to_string(), RCODE_NXDOMAIN);
        self
    }

    pub fn servfail(mut self, name: &str) -> Self {
        self.rcodes.insert(name.to_string(), RCODE_SERVFAIL);
        self
    }

    /// UDP answers for `name` come back empty with TC set; TCP answers in full.
    pub fn truncated(mut self, name: &str) -> Self {
        self.truncate_over_udp.insert(name.to_string());
        self
    }

    fn respond(&self, query: &[u8], over_udp: bool) -> Option<Vec<u8>> {
        let (name, qtype, question_end) = parse_question(query)?;

        let rcode = self.rcodes.get(&name).copied().unwrap_or(RCODE_NOERROR);
        let truncate = over_udp && self.truncate_over_udp.contains(&name);
        let answers: &[MockAnswer] = if truncate || rcode != RCODE_NOERROR {
            &[]
        } else {
            self.answers
                .get(&(name, qtype))
                .map(Vec::as_slice)
                .unwrap_or(&[])
        };

        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&query[0..2]);
        response.push(0x81 | if truncate { 0x02 } else { 0x00 });
        response.push(0x80 | rcode);
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        response.extend_from_slice(&query[12..question_end]);
        for answer in answers {
            answer.encode(&mut response);
        }
        Some(response)
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Returns the lowercase question name, its qtype and the offset just past
/// the question section.
fn parse_question(query: &[u8]) -> Option<(String, u16, usize)> {
    if query.len() < 12 {
        return None;
    }
    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).to_ascii_lowercase());
        pos += len;
    }
    let qtype = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
    Some((labels.join("."), qtype, pos + 4))
}

/// UDP and TCP DNS server on 127.0.0.1 answering from a [`MockZone`].
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(zone: MockZone) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let zone = Arc::new(zone);
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = Arc::clone(&queries);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = zone.respond(&buf[..len], true) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let zone = Arc::clone(&zone);
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                if let Some(response) = zone.respond(&query, false) {
                                    let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                                    let _ = stream.write_all(&response).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
