//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Every message is preceded by its length as a big-endian u16.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use filter_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr.to_string();

        let exchange = async {
            let mut stream = TcpStream::connect(self.server_addr)
                .await
                .map_err(|e| DomainError::transport(&server, format!("connect failed: {}", e)))?;
            stream
                .set_nodelay(true)
                .map_err(|e| DomainError::transport(&server, e))?;

            send_with_length_prefix(&mut stream, message_bytes)
                .await
                .map_err(|e| DomainError::transport(&server, e))?;

            debug!(
                server = %self.server_addr,
                message_len = message_bytes.len(),
                "TCP query sent"
            );

            read_with_length_prefix(&mut stream)
                .await
                .map_err(|e| DomainError::transport(&server, e))
        };

        let bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.clone(),
            })??;

        debug!(
            server = %self.server_addr,
            response_len = bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
        })
    }
}

pub async fn send_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> std::io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("DNS message too large: {} bytes", message_bytes.len()),
        )
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub async fn read_with_length_prefix<S>(stream: &mut S) -> std::io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let message_len = u16::from_be_bytes(len_buf) as usize;

    let mut message = vec![0u8; message_len];
    stream.read_exact(&mut message).await?;
    Ok(message)
}
