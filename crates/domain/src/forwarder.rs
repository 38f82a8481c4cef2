use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_FORWARDER_PORT: u16 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForwarderProtocol {
    #[default]
    Udp,
    Tcp,
}

impl ForwarderProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
        }
    }
}

impl FromStr for ForwarderProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "udp" => Ok(Self::Udp),
            "tcp" => Ok(Self::Tcp),
            _ => Err(format!("Unknown protocol: {}", s)),
        }
    }
}

impl fmt::Display for ForwarderProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An upstream resolver queries are forwarded to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForwarderEndpoint {
    address: Arc<str>,
    port: u16,
    protocol: ForwarderProtocol,
}

impl ForwarderEndpoint {
    pub fn new(address: impl Into<Arc<str>>, port: u16, protocol: ForwarderProtocol) -> Self {
        Self {
            address: address.into(),
            port,
            protocol,
        }
    }

    pub fn udp(address: impl Into<Arc<str>>) -> Self {
        Self::new(address, DEFAULT_FORWARDER_PORT, ForwarderProtocol::Udp)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn protocol(&self) -> ForwarderProtocol {
        self.protocol
    }

    /// The address as an IP literal; `None` for hostnames that still need
    /// resolving.
    pub fn ip(&self) -> Option<IpAddr> {
        self.address.parse().ok()
    }

    /// `host:port`, bracketing IPv6 literals.
    pub fn authority(&self) -> String {
        match self.ip() {
            Some(IpAddr::V6(v6)) => format!("[{}]:{}", v6, self.port),
            _ => format!("{}:{}", self.address, self.port),
        }
    }
}

impl fmt::Display for ForwarderEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol, self.authority())
    }
}

/// Used whenever the configuration yields no usable forwarder.
pub fn default_forwarders() -> Vec<ForwarderEndpoint> {
    [
        // Hurricane Electric
        "74.82.42.42",
        // OpenNIC
        "107.150.40.234",
        "162.211.64.20",
        "50.116.23.211",
        "50.116.40.226",
        // FreeDNS
        "37.235.1.174",
        "37.235.1.177",
        // Google
        "8.8.8.8",
        "8.8.4.4",
    ]
    .into_iter()
    .map(ForwarderEndpoint::udp)
    .collect()
}
