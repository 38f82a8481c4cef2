use filter_dns_application::ports::QueryEventSink;
use filter_dns_application::use_cases::HandleDnsQueryUseCase;
use filter_dns_domain::Config;
use filter_dns_infrastructure::dns::{
    DnsServerHandler, ForwarderPool, TracingQueryEvents, WireExchange,
};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!(
            forwarders = config.dns.forwarders.len(),
            filters = config.filters.len(),
            query_timeout_ms = config.dns.query_timeout,
            "Initializing DNS services"
        );

        let events: Arc<dyn QueryEventSink> = Arc::new(TracingQueryEvents::new());

        let pool = ForwarderPool::new(
            config.dns.forwarders.clone(),
            Arc::new(WireExchange::from_millis(config.dns.query_timeout)),
            Arc::clone(&events),
        )?;

        let use_case = HandleDnsQueryUseCase::new(
            Arc::new(config.filters.clone()),
            Arc::new(pool),
            Arc::clone(&events),
        );

        Ok(Self {
            handler: Arc::new(DnsServerHandler::new(Arc::new(use_case), events)),
        })
    }
}
