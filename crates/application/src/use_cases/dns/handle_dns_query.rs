use crate::ports::{DnsResolver, QueryEvent, QueryEventSink};
use filter_dns_domain::{DnsQuestion, DomainError, FilterSet};
use hickory_proto::rr::Record;
use std::sync::Arc;
use tracing::debug;

/// Filters each question of a query and forwards the rest.
pub struct HandleDnsQueryUseCase {
    filters: Arc<FilterSet>,
    resolver: Arc<dyn DnsResolver>,
    events: Arc<dyn QueryEventSink>,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        filters: Arc<FilterSet>,
        resolver: Arc<dyn DnsResolver>,
        events: Arc<dyn QueryEventSink>,
    ) -> Self {
        Self {
            filters,
            resolver,
            events,
        }
    }

    /// Answers for every non-blocked question, in question order.
    ///
    /// The first resolution error aborts the call and discards answers
    /// gathered for earlier questions.
    pub async fn execute(&self, questions: &[DnsQuestion]) -> Result<Vec<Record>, DomainError> {
        if questions.is_empty() {
            debug!("Query carries no questions");
        }

        let mut answers = Vec::new();

        for question in questions {
            if let Some(rule) = self.filters.find_match(&question.name, question.query_type) {
                self.events.record(QueryEvent::Blocked {
                    question: question.clone(),
                    rule: Arc::from(rule.to_string()),
                });
                continue;
            }

            let records = self.resolver.resolve(question).await?;
            let received = records.len();

            let before = answers.len();
            answers.extend(
                records
                    .into_iter()
                    .filter(|record| record.name().to_ascii() == *question.name),
            );

            self.events.record(QueryEvent::Forwarded {
                question: question.clone(),
                received,
                kept: answers.len() - before,
            });
        }

        Ok(answers)
    }
}
