#![allow(dead_code)]

use async_trait::async_trait;
use filter_dns_application::ports::{QueryEvent, QueryEventSink};
use filter_dns_domain::{DnsQuestion, DomainError, ForwarderEndpoint};
use filter_dns_infrastructure::dns::transport::tcp::{
    read_with_length_prefix, send_with_length_prefix,
};
use filter_dns_infrastructure::dns::UpstreamExchange;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

pub fn a_record(name: &str, ip: Ipv4Addr) -> Record {
    Record::from_rdata(Name::from_ascii(name).unwrap(), 60, RData::A(A(ip)))
}

/// How a [`MockDnsServer`] answers each query.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// NOERROR with one A record per address for the queried name, plus any
    /// `extra` records as given.
    Answer {
        addresses: Vec<Ipv4Addr>,
        extra: Vec<Record>,
    },
    /// NOERROR with no answers and the TC bit set.
    Truncated,
    NxDomain,
    ServFail,
    /// A response whose id does not match the query.
    WrongId,
}

impl MockReply {
    pub fn addresses(addresses: &[Ipv4Addr]) -> Self {
        Self::Answer {
            addresses: addresses.to_vec(),
            extra: Vec::new(),
        }
    }

    fn build(&self, query_bytes: &[u8]) -> Option<Vec<u8>> {
        let query = Message::from_vec(query_bytes).ok()?;
        let mut reply = Message::new();
        reply
            .set_id(query.id())
            .set_message_type(MessageType::Response)
            .set_op_code(query.op_code())
            .set_recursion_desired(query.recursion_desired())
            .set_recursion_available(true)
            .add_queries(query.queries().to_vec());

        match self {
            MockReply::Answer { addresses, extra } => {
                if let Some(q) = query.queries().first() {
                    for ip in addresses {
                        reply.add_answer(Record::from_rdata(q.name().clone(), 60, RData::A(A(*ip))));
                    }
                }
                reply.add_answers(extra.clone());
            }
            MockReply::Truncated => {
                reply.set_truncated(true);
            }
            MockReply::NxDomain => {
                reply.set_response_code(ResponseCode::NXDomain);
            }
            MockReply::ServFail => {
                reply.set_response_code(ResponseCode::ServFail);
            }
            MockReply::WrongId => {
                reply.set_id(query.id().wrapping_add(1));
            }
        }

        reply.to_vec().ok()
    }
}

/// Loopback upstream answering over UDP and, optionally, TCP on the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_hits: Arc<AtomicUsize>,
    tcp_hits: Arc<AtomicUsize>,
    shutdown: Vec<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn udp(reply: MockReply) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let mut server = Self::empty(addr);
        server.serve_udp(socket, reply);
        server
    }

    pub async fn tcp(reply: MockReply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let mut server = Self::empty(addr);
        server.serve_tcp(listener, reply);
        server
    }

    /// UDP and TCP on the same port with separate behaviours.
    pub async fn udp_and_tcp(udp_reply: MockReply, tcp_reply: MockReply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let socket = UdpSocket::bind(addr).await.unwrap();
        let mut server = Self::empty(addr);
        server.serve_udp(socket, udp_reply);
        server.serve_tcp(listener, tcp_reply);
        server
    }

    fn empty(addr: SocketAddr) -> Self {
        Self {
            addr,
            udp_hits: Arc::new(AtomicUsize::new(0)),
            tcp_hits: Arc::new(AtomicUsize::new(0)),
            shutdown: Vec::new(),
        }
    }

    fn serve_udp(&mut self, socket: UdpSocket, reply: MockReply) {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let hits = Arc::clone(&self.udp_hits);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            hits.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = reply.build(&buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });
        self.shutdown.push(shutdown_tx);
    }

    fn serve_tcp(&mut self, listener: TcpListener, reply: MockReply) {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let hits = Arc::clone(&self.tcp_hits);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = listener.accept() => {
                        let Ok((mut stream, _)) = result else { continue };
                        hits.fetch_add(1, Ordering::SeqCst);
                        let reply = reply.clone();
                        tokio::spawn(async move {
                            if let Ok(query) = read_with_length_prefix(&mut stream).await {
                                if let Some(response) = reply.build(&query) {
                                    let _ = send_with_length_prefix(&mut stream, &response).await;
                                }
                            }
                        });
                    }
                }
            }
        });
        self.shutdown.push(shutdown_tx);
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_hits(&self) -> usize {
        self.udp_hits.load(Ordering::SeqCst)
    }

    pub fn tcp_hits(&self) -> usize {
        self.tcp_hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        for tx in self.shutdown.drain(..) {
            let _ = tx.send(());
        }
    }
}

/// Scripted per-endpoint exchange results; records the order endpoints were tried.
#[derive(Default)]
pub struct MockExchange {
    results: Mutex<HashMap<String, Result<Vec<Record>, DomainError>>>,
    attempts: Mutex<Vec<String>>,
}

impl MockExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(&self, endpoint: &ForwarderEndpoint, records: Vec<Record>) {
        self.results
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Ok(records));
    }

    pub fn fail(&self, endpoint: &ForwarderEndpoint, error: DomainError) {
        self.results
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Err(error));
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamExchange for MockExchange {
    async fn exchange(
        &self,
        endpoint: &ForwarderEndpoint,
        _question: &DnsQuestion,
    ) -> Result<Vec<Record>, DomainError> {
        let key = endpoint.to_string();
        self.attempts.lock().unwrap().push(key.clone());
        self.results
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(DomainError::transport(key, "no scripted result")))
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    events: Mutex<Vec<QueryEvent>>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<QueryEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn upstream_failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                QueryEvent::UpstreamFailed { server, .. } => Some(server),
                _ => None,
            })
            .collect()
    }
}

impl QueryEventSink for RecordingEvents {
    fn record(&self, event: QueryEvent) {
        self.events.lock().unwrap().push(event);
    }
}
