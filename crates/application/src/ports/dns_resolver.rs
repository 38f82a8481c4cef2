use async_trait::async_trait;
use filter_dns_domain::{DnsQuestion, DomainError};
use hickory_proto::rr::Record;

/// Resolves a single question against upstream servers.
///
/// An `Ok` with no records is a successful resolution (NXDOMAIN, NODATA),
/// not a failure.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, question: &DnsQuestion) -> Result<Vec<Record>, DomainError>;
}
