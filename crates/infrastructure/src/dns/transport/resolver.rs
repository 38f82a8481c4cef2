use filter_dns_domain::{DomainError, ForwarderEndpoint};
use std::net::SocketAddr;
use std::time::Duration;

/// Socket address for a forwarder. IP literals are used directly; hostnames
/// are looked up through the system resolver and the first address wins.
pub async fn resolve_endpoint(
    endpoint: &ForwarderEndpoint,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    if let Some(ip) = endpoint.ip() {
        return Ok(SocketAddr::new(ip, endpoint.port()));
    }

    let target = endpoint.authority();

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: target.clone(),
        })?
        .map_err(|e| DomainError::UpstreamResolution {
            host: endpoint.address().to_string(),
            reason: e.to_string(),
        })?;

    addrs.next().ok_or_else(|| DomainError::UpstreamResolution {
        host: endpoint.address().to_string(),
        reason: "no addresses found".to_string(),
    })
}
