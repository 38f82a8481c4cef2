mod dns_resolver;
mod query_events;

pub use dns_resolver::DnsResolver;
pub use query_events::{NoopQueryEvents, QueryEvent, QueryEventSink};
