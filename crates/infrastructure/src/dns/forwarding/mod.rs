pub mod exchange;
pub mod message_builder;
pub mod pool;
pub mod response_parser;

pub use exchange::{UpstreamExchange, WireExchange};
pub use message_builder::MessageBuilder;
pub use pool::ForwarderPool;
pub use response_parser::{DnsResponse, ResponseParser};
