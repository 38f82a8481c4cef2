use filter_dns_application::ports::{QueryEvent, QueryEventSink};
use tracing::{debug, error, warn};

/// Reports query events as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingQueryEvents;

impl TracingQueryEvents {
    pub fn new() -> Self {
        Self
    }
}

impl QueryEventSink for TracingQueryEvents {
    fn record(&self, event: QueryEvent) {
        match event {
            QueryEvent::Blocked { question, rule } => {
                debug!(domain = %question.name, question = %question, rule = %rule, "Question blocked");
            }
            QueryEvent::Forwarded {
                question,
                received,
                kept,
            } => {
                debug!(question = %question, received, kept, "Question forwarded");
            }
            QueryEvent::UpstreamFailed {
                question,
                server,
                error,
            } => {
                warn!(server = %server, domain = %question.name, error = %error, "Forwarder failed");
            }
            QueryEvent::QueryFailed { id, error } if error.is_transport_error() => {
                warn!(id, error = %error, "Query could not be resolved upstream");
            }
            QueryEvent::QueryFailed { id, error } => {
                error!(id, error = %error, "Query failed");
            }
        }
    }
}
