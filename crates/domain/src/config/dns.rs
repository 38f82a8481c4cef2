use super::errors::ConfigError;
use super::file::ForwarderEntry;
use crate::forwarder::{default_forwarders, ForwarderEndpoint, ForwarderProtocol};
use crate::forwarder::DEFAULT_FORWARDER_PORT;

/// Shortest forwarder host accepted (`8.8.8.8`).
const MIN_FORWARDER_HOST_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsConfig {
    /// Tried in this order for every question. Never empty.
    pub forwarders: Vec<ForwarderEndpoint>,

    /// Per-exchange timeout in milliseconds.
    pub query_timeout: u64,
}

impl DnsConfig {
    pub(crate) fn from_entries(
        entries: Option<Vec<ForwarderEntry>>,
        query_timeout: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let forwarders = match entries {
            Some(entries) => parse_forwarders(entries)?,
            None => default_forwarders(),
        };
        Ok(Self {
            forwarders,
            query_timeout: query_timeout.unwrap_or_else(default_query_timeout),
        })
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            forwarders: default_forwarders(),
            query_timeout: default_query_timeout(),
        }
    }
}

fn default_query_timeout() -> u64 {
    2000
}

/// Unusable entries are skipped; an unknown protocol is fatal. Falls back to
/// the built-in list when nothing survives.
fn parse_forwarders(entries: Vec<ForwarderEntry>) -> Result<Vec<ForwarderEndpoint>, ConfigError> {
    let mut forwarders = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(host) = entry.host else {
            continue;
        };
        if host.len() < MIN_FORWARDER_HOST_LEN {
            continue;
        }

        let port = match entry.port {
            None => DEFAULT_FORWARDER_PORT,
            Some(port) => match u16::try_from(port) {
                Ok(port) if port != 0 => port,
                _ => continue,
            },
        };

        let protocol = match entry.protocol {
            None => ForwarderProtocol::Udp,
            Some(protocol) => match protocol.parse::<ForwarderProtocol>() {
                Ok(parsed) => parsed,
                Err(_) => return Err(ConfigError::InvalidProtocol { protocol, host }),
            },
        };

        forwarders.push(ForwarderEndpoint::new(host, port, protocol));
    }

    if forwarders.is_empty() {
        return Ok(default_forwarders());
    }
    Ok(forwarders)
}
