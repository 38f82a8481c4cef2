use super::RecordType;
use std::fmt;
use std::sync::Arc;

/// One `(name, type)` question of an inbound query.
///
/// `name` is kept in its fully-qualified wire form (`"example.com."`), which is
/// what filter rules and answer-name comparison operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: Arc<str>,
    pub query_type: u16,
}

impl DnsQuestion {
    pub fn new(name: impl Into<Arc<str>>, query_type: u16) -> Self {
        Self {
            name: name.into(),
            query_type,
        }
    }

    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.query_type)
    }
}

impl fmt::Display for DnsQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record_type() {
            Some(rt) => write!(f, "{} {}", self.name, rt),
            None => write!(f, "{} TYPE{}", self.name, self.query_type),
        }
    }
}
