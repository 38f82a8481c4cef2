use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::resolver::resolve_endpoint;
use crate::dns::transport::{create_transport, Transport};
use async_trait::async_trait;
use filter_dns_domain::{DnsQuestion, DomainError, ForwarderEndpoint, ForwarderProtocol};
use hickory_proto::rr::Record;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// One query/response round trip with a single forwarder.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(
        &self,
        endpoint: &ForwarderEndpoint,
        question: &DnsQuestion,
    ) -> Result<Vec<Record>, DomainError>;
}

/// Sends real DNS messages over the endpoint's protocol.
///
/// Any well-formed reply succeeds, whatever its response code. A truncated
/// UDP reply is retried once over TCP within the same time budget.
pub struct WireExchange {
    timeout: Duration,
}

impl WireExchange {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_millis(timeout_ms: u64) -> Self {
        Self::new(Duration::from_millis(timeout_ms))
    }
}

fn remaining(deadline: Instant, server: &str) -> Result<Duration, DomainError> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        return Err(DomainError::TransportTimeout {
            server: server.to_string(),
        });
    }
    Ok(left)
}

#[async_trait]
impl UpstreamExchange for WireExchange {
    async fn exchange(
        &self,
        endpoint: &ForwarderEndpoint,
        question: &DnsQuestion,
    ) -> Result<Vec<Record>, DomainError> {
        let deadline = Instant::now() + self.timeout;
        let server = endpoint.to_string();

        let (id, query_bytes) = MessageBuilder::build_query(question)?;
        let addr = resolve_endpoint(endpoint, self.timeout).await?;

        let transport = create_transport(endpoint.protocol(), addr);
        let reply = transport
            .send(&query_bytes, remaining(deadline, &server)?)
            .await?;
        let mut protocol_used = reply.protocol_used;
        let mut response = ResponseParser::parse(&reply.bytes, id, &server)?;

        if response.truncated && matches!(transport, Transport::Udp(_)) {
            debug!(
                server = %server,
                protocol = transport.protocol_name(),
                domain = %question.name,
                "Truncated reply, retrying over TCP"
            );
            let tcp = create_transport(ForwarderProtocol::Tcp, addr);
            let reply = tcp
                .send(&query_bytes, remaining(deadline, &server)?)
                .await?;
            protocol_used = reply.protocol_used;
            response = ResponseParser::parse(&reply.bytes, id, &server)?;
        }

        if response.is_server_error() {
            debug!(
                server = %server,
                domain = %question.name,
                status = ResponseParser::rcode_to_status(response.rcode),
                "Upstream returned an error code"
            );
        }

        debug!(
            server = %server,
            protocol = protocol_used,
            domain = %question.name,
            nxdomain = response.is_nxdomain(),
            answers = response.answers.len(),
            "Upstream exchange complete"
        );

        Ok(response.answers)
    }
}
