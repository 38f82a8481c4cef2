#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("{protocol} is an invalid protocol. Protocol for host: {host} must be either udp or tcp")]
    InvalidProtocol { protocol: String, host: String },

    #[error("{filter_type} is an invalid filter type for host: {host}")]
    InvalidFilterType { filter_type: String, host: String },

    #[error(
        "{matching} is an invalid matching type. Filter matching for host: {host} must be either \"contains\" or \"exact\""
    )]
    InvalidMatching { matching: String, host: String },

    #[error("Filter for host: {host} requires matching, which must be either \"contains\" or \"exact\"")]
    MissingMatching { host: String },
}
