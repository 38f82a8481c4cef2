pub mod events;
pub mod forwarding;
pub mod server;
pub mod transport;

pub use events::TracingQueryEvents;
pub use forwarding::{ForwarderPool, UpstreamExchange, WireExchange};
pub use server::DnsServerHandler;
