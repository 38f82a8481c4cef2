use std::path::{Path, PathBuf};

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::file::{ConfigFile, ConfigFormat};
use super::filters::parse_filters;
use super::logging::LoggingConfig;
use super::server::{default_host, default_port, ServerConfig};
use crate::filter::FilterSet;

/// Files tried, in order, when no path is given on the command line.
const SEARCH_PATHS: [&str; 3] = [
    "filter-dns.toml",
    "filter-dns.json",
    "/etc/filter-dns/config.toml",
];

/// Main configuration structure for Filter DNS
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Listener address
    pub server: ServerConfig,

    /// Forwarders and upstream timeout
    pub dns: DnsConfig,

    /// Block rules, in evaluation order
    pub filters: FilterSet,

    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. filter-dns.toml, then filter-dns.json, in the current directory
    /// 3. /etc/filter-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file; `.json` selects JSON, anything else TOML.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        let file = ConfigFile::parse(&contents, ConfigFormat::from_path(Path::new(path)))?;
        Self::from_config_file(file)
    }

    pub fn from_config_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let server = ServerConfig {
            host: file.host.unwrap_or_else(default_host),
            port: file.port.unwrap_or_else(default_port),
        };
        let dns = DnsConfig::from_entries(file.forwarders, file.query_timeout)?;
        let filters = parse_filters(file.filters)?;
        let logging = LoggingConfig::from_entries(file.log_level, file.logfile);

        Ok(Self {
            server,
            dns,
            filters,
            logging,
        })
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(logfile) = overrides.logfile {
            self.logging.file = if logfile.is_empty() {
                None
            } else {
                Some(PathBuf::from(logfile))
            };
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.host.is_empty() {
            return Err(ConfigError::Validation(
                "Listen host cannot be empty".to_string(),
            ));
        }

        if self.dns.forwarders.is_empty() {
            return Err(ConfigError::Validation(
                "No forwarders configured".to_string(),
            ));
        }

        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        SEARCH_PATHS
            .iter()
            .find(|candidate| Path::new(candidate).exists())
            .map(|found| found.to_string())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    /// An empty string selects stdout.
    pub logfile: Option<String>,
}
