pub mod dns;
pub mod errors;
pub mod file;
pub mod filters;
pub mod logging;
pub mod root;
pub mod server;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use file::{ConfigFile, ConfigFormat, FilterEntry, ForwarderEntry};
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
