//! Filter DNS Domain Layer
pub mod config;
pub mod dns_question;
pub mod errors;
pub mod filter;
pub mod forwarder;
pub mod record_type;

pub use config::{CliOverrides, Config, ConfigError, DnsConfig};
pub use dns_question::DnsQuestion;
pub use errors::DomainError;
pub use filter::{FilterRule, FilterSet, FilterType, MatchMode};
pub use forwarder::{default_forwarders, ForwarderEndpoint, ForwarderProtocol};
pub use record_type::RecordType;
