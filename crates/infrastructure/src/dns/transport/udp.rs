//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). If the response has the TC
//! (truncated) bit set, the caller should retry via TCP.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use filter_dns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn ephemeral_bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr.to_string();

        let socket = UdpSocket::bind(self.ephemeral_bind_addr())
            .await
            .map_err(|e| DomainError::transport(&server, format!("bind failed: {}", e)))?;

        // Only datagrams from the server reach recv() after connect().
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| DomainError::transport(&server, e))?;

        let exchange = async {
            let bytes_sent = socket
                .send(message_bytes)
                .await
                .map_err(|e| DomainError::transport(&server, e))?;

            debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

            let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
            let bytes_received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| DomainError::transport(&server, e))?;
            recv_buf.truncate(bytes_received);
            Ok::<_, DomainError>(recv_buf)
        };

        let bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.clone(),
            })??;

        if bytes.len() == MAX_UDP_RESPONSE_SIZE {
            warn!(server = %self.server_addr, "UDP response may have been cut at buffer size");
        }

        debug!(
            server = %self.server_addr,
            bytes_received = bytes.len(),
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_udp_transport_creation() {
        let addr: SocketAddr = "8.8.8.8:53".parse().unwrap();
        let transport = UdpTransport::new(addr);
        assert_eq!(transport.server_addr, addr);
        assert!(transport.ephemeral_bind_addr().is_ipv4());
    }

    #[test]
    fn test_udp_transport_ipv6() {
        let addr: SocketAddr = "[2001:4860:4860::8888]:53".parse().unwrap();
        let transport = UdpTransport::new(addr);
        assert!(transport.ephemeral_bind_addr().is_ipv6());
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let transport = UdpTransport::new(silent.local_addr().unwrap());

        let err = transport
            .send(&[0u8; 12], Duration::from_millis(100))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::TransportTimeout { .. }));
    }

    #[tokio::test]
    async fn test_echo_server_round_trip() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (len, peer) = server.recv_from(&mut buf).await.unwrap();
            server.send_to(&buf[..len], peer).await.unwrap();
        });

        let response = UdpTransport::new(addr)
            .send(b"hello", Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(response.bytes, b"hello");
        assert_eq!(response.protocol_used, "UDP");
    }
}
