use clap::Parser;
use emdns_domain::CliOverrides;
use std::sync::Arc;
use tracing::{error, info};

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "emdns")]
#[command(version = "0.1.0")]
#[command(about = "emdns - Small authoritative DNS responder for embedded targets")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Master (zone) file to load
    #[arg(short = 'z', long, value_name = "FILE")]
    zone: Option<String>,

    /// Origin in effect before the first $ORIGIN
    #[arg(long)]
    origin: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Load the zone, report, and exit without serving
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        zone_file: cli.zone.clone(),
        origin: cli.origin.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting emdns v{}", env!("CARGO_PKG_VERSION"));

    let loaded = bootstrap::load_zone(&config.zone)?;

    if cli.check {
        return loaded.check_result();
    }

    // Populated once; shared read-only from here on.
    let zone = Arc::new(loaded.zone);

    let dns_addr = config.server.socket_addr();
    tokio::select! {
        result = server::start_dns_server(dns_addr, zone, config.server.max_response_size) => {
            if let Err(e) = result {
                error!(error = %e, "DNS server error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
