use super::exchange::UpstreamExchange;
use async_trait::async_trait;
use filter_dns_application::ports::{DnsResolver, QueryEvent, QueryEventSink};
use filter_dns_domain::{DnsQuestion, DomainError, ForwarderEndpoint};
use hickory_proto::rr::Record;
use std::sync::Arc;
use tracing::debug;

/// Tries forwarders strictly in configured order until one answers.
pub struct ForwarderPool {
    endpoints: Vec<ForwarderEndpoint>,
    exchange: Arc<dyn UpstreamExchange>,
    events: Arc<dyn QueryEventSink>,
}

impl ForwarderPool {
    pub fn new(
        endpoints: Vec<ForwarderEndpoint>,
        exchange: Arc<dyn UpstreamExchange>,
        events: Arc<dyn QueryEventSink>,
    ) -> Result<Self, DomainError> {
        if endpoints.is_empty() {
            return Err(DomainError::NoForwarders);
        }
        Ok(Self {
            endpoints,
            exchange,
            events,
        })
    }

    pub fn endpoints(&self) -> &[ForwarderEndpoint] {
        &self.endpoints
    }
}

#[async_trait]
impl DnsResolver for ForwarderPool {
    /// The first successful exchange wins, even with zero records. When every
    /// forwarder fails the last one's error is returned.
    async fn resolve(&self, question: &DnsQuestion) -> Result<Vec<Record>, DomainError> {
        let mut last_error = None;

        for (position, endpoint) in self.endpoints.iter().enumerate() {
            match self.exchange.exchange(endpoint, question).await {
                Ok(answers) => {
                    debug!(server = %endpoint, position, domain = %question.name, "Forwarder responded");
                    return Ok(answers);
                }
                Err(error) => {
                    self.events.record(QueryEvent::UpstreamFailed {
                        question: question.clone(),
                        server: endpoint.to_string(),
                        error: error.clone(),
                    });
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or(DomainError::NoForwarders))
    }
}
