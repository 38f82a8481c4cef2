use anyhow::Context;
use clap::Parser;
use filter_dns_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser, Debug)]
#[command(name = "filter-dns")]
#[command(version)]
#[command(about = "Filter DNS - DNS forwarder that silently drops blocked names")]
struct Cli {
    /// Configuration file path (.toml or .json)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// PID file path
    #[arg(long, value_name = "FILE", default_value = "filter-dns.pid")]
    pid: String,

    /// Listen host
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log file; an empty value logs to stdout
    #[arg(long, value_name = "FILE")]
    logfile: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
            logfile: self.logfile.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config.logging)?;

    info!(
        config = %bootstrap::config_source(cli.config.as_deref()),
        "Starting Filter DNS v{}",
        env!("CARGO_PKG_VERSION")
    );

    let pid_file = bootstrap::PidFile::create(&cli.pid)
        .with_context(|| format!("Failed to write PID file {}", cli.pid))?;
    info!(path = %pid_file.path().display(), "PID file written");

    let services = di::DnsServices::new(&config)?;

    tokio::select! {
        result = server::start_dns_server(config.server.bind_address(), services.handler) => {
            if let Err(e) = result {
                error!(error = %e, "DNS server error");
                return Err(e);
            }
        }
        result = server::shutdown_signal() => {
            result.context("Failed to listen for shutdown signals")?;
            info!("Shutdown signal received");
        }
    }

    drop(pid_file);
    info!("Server shutdown complete");
    Ok(())
}
