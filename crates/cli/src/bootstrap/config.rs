use anyhow::Context;
use filter_dns_domain::{CliOverrides, Config};

/// Loads and validates the configuration. Any error here is fatal.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("Failed to load configuration")?;
    config
        .validate()
        .context("Invalid configuration")?;
    Ok(config)
}

/// Where the configuration came from, for the startup log line.
pub fn config_source(explicit: Option<&str>) -> String {
    match explicit {
        Some(path) => path.to_string(),
        None => Config::get_config_path().unwrap_or_else(|| "built-in defaults".to_string()),
    }
}
