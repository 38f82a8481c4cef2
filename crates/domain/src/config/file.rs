//! On-disk configuration schema.
//!
//! Every key is optional here; defaulting and validation happen when the
//! file is turned into a [`Config`](super::Config).

use serde::Deserialize;
use std::path::Path;

use super::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub host: Option<String>,

    pub port: Option<u16>,

    pub forwarders: Option<Vec<ForwarderEntry>>,

    pub filters: Option<Vec<FilterEntry>>,

    pub logfile: Option<String>,

    pub log_level: Option<String>,

    /// Per-exchange upstream timeout in milliseconds.
    pub query_timeout: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForwarderEntry {
    pub host: Option<String>,

    pub port: Option<i64>,

    pub protocol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterEntry {
    pub host: Option<String>,

    #[serde(rename = "type")]
    pub filter_type: Option<String>,

    pub matching: Option<String>,
}

impl ConfigFile {
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => {
                toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            ConfigFormat::Json => {
                serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
        }
    }
}
