use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Failed to encode DNS message: {0}")]
    MessageEncoding(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Failed to resolve upstream host {host}: {reason}")]
    UpstreamResolution { host: String, reason: String },

    #[error("No forwarding servers configured")]
    NoForwarders,
}

impl DomainError {
    pub fn transport(server: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            server: server.into(),
            reason: reason.to_string(),
        }
    }

    /// Errors raised while talking to an upstream, as opposed to errors in
    /// the query itself.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::TransportTimeout { .. }
                | Self::Transport { .. }
                | Self::UpstreamResolution { .. }
                | Self::InvalidDnsResponse(_)
        )
    }
}
