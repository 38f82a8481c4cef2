use anyhow::Context;
use filter_dns_infrastructure::dns::DnsServerHandler;
use hickory_server::ServerFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tracing::{debug, info, warn};

const MAX_UDP_MESSAGE_SIZE: usize = 4096;
const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Serves DNS over UDP and TCP on `bind_addr` until either listener fails.
pub async fn start_dns_server(
    bind_addr: String,
    handler: Arc<DnsServerHandler>,
) -> anyhow::Result<()> {
    let socket_addr = resolve_bind_addr(&bind_addr).await?;

    let udp_socket = UdpSocket::bind(socket_addr)
        .await
        .with_context(|| format!("Failed to bind UDP socket on {}", socket_addr))?;
    let tcp_listener = TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {}", socket_addr))?;

    info!(bind_address = %socket_addr, "DNS server ready");

    tokio::try_join!(
        run_udp(Arc::new(udp_socket), Arc::clone(&handler)),
        run_tcp(tcp_listener, handler),
    )?;
    Ok(())
}

async fn resolve_bind_addr(bind_addr: &str) -> anyhow::Result<SocketAddr> {
    if let Ok(addr) = bind_addr.parse() {
        return Ok(addr);
    }
    tokio::net::lookup_host(bind_addr)
        .await
        .with_context(|| format!("Failed to resolve bind address {}", bind_addr))?
        .next()
        .with_context(|| format!("No address found for {}", bind_addr))
}

async fn run_udp(socket: Arc<UdpSocket>, handler: Arc<DnsServerHandler>) -> anyhow::Result<()> {
    let mut recv_buf = [0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let (len, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "UDP recv error");
                continue;
            }
        };

        let request = recv_buf[..len].to_vec();
        let socket = Arc::clone(&socket);
        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            if let Some(reply) = handler.handle_bytes(&request).await {
                if let Err(e) = socket.send_to(&reply, from).await {
                    debug!(client = %from, error = %e, "Failed to send UDP reply");
                }
            }
        });
    }
}

async fn run_tcp(listener: TcpListener, handler: Arc<DnsServerHandler>) -> anyhow::Result<()> {
    let mut server = ServerFuture::new((*handler).clone());
    server.register_listener(listener, TCP_IDLE_TIMEOUT);
    server
        .block_until_done()
        .await
        .context("TCP DNS server failed")
}
