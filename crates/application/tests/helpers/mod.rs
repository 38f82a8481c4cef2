#![allow(dead_code)]

use async_trait::async_trait;
use filter_dns_application::ports::{DnsResolver, QueryEvent, QueryEventSink};
use filter_dns_domain::{DnsQuestion, DomainError};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn a_record(name: &str, ip: Ipv4Addr) -> Record {
    Record::from_rdata(Name::from_ascii(name).unwrap(), 300, RData::A(A(ip)))
}

/// Answers by question name; unknown names resolve to no records.
#[derive(Default)]
pub struct MockDnsResolver {
    responses: Mutex<HashMap<String, Result<Vec<Record>, DomainError>>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<DnsQuestion>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, name: &str, records: Vec<Record>) {
        self.responses
            .lock()
            .unwrap()
            .insert(name.to_string(), Ok(records));
    }

    pub fn set_error(&self, name: &str, error: DomainError) {
        self.responses
            .lock()
            .unwrap()
            .insert(name.to_string(), Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<DnsQuestion> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, question: &DnsQuestion) -> Result<Vec<Record>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(question.clone());
        self.responses
            .lock()
            .unwrap()
            .get(&*question.name)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    events: Mutex<Vec<QueryEvent>>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<QueryEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl QueryEventSink for RecordingEvents {
    fn record(&self, event: QueryEvent) {
        self.events.lock().unwrap().push(event);
    }
}
