use filter_dns_domain::{DnsQuestion, DomainError};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum QueryEvent {
    /// A question matched a filter rule and was not forwarded.
    Blocked {
        question: DnsQuestion,
        rule: Arc<str>,
    },

    /// A question was answered upstream. `kept` counts the records left after
    /// dropping those whose name differs from the question's.
    Forwarded {
        question: DnsQuestion,
        received: usize,
        kept: usize,
    },

    /// One forwarder failed; the next one will be tried.
    UpstreamFailed {
        question: DnsQuestion,
        server: String,
        error: DomainError,
    },

    /// The whole query failed and is answered with no records.
    QueryFailed { id: u16, error: DomainError },
}

/// Write-only diagnostics sink handed to the components that report events.
pub trait QueryEventSink: Send + Sync {
    fn record(&self, event: QueryEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopQueryEvents;

impl QueryEventSink for NoopQueryEvents {
    fn record(&self, _event: QueryEvent) {}
}
