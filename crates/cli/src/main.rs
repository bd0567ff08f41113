use clap::Parser;
use nicprobe_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod report;
mod runner;

#[derive(Parser)]
#[command(name = "nicprobe")]
#[command(version)]
#[command(about = "nicprobe - Wait for DHCP-assigned addresses on VM network interfaces")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// VM identifier (repeat to resolve several VMs concurrently)
    #[arg(long = "vm", value_name = "ID", required = true)]
    vms: Vec<String>,

    /// NIC index to resolve (repeatable)
    #[arg(
        long = "nic",
        value_name = "INDEX",
        required = true,
        allow_negative_numbers = true
    )]
    nics: Vec<i64>,

    /// Maximum seconds to wait for all addresses
    #[arg(long, value_name = "SECS")]
    max_wait: Option<u64>,

    /// Seconds between polls
    #[arg(long, value_name = "SECS")]
    poll_interval: Option<u64>,

    /// Fall back to gateway DHCP lease tables
    #[arg(long)]
    lease_fallback: bool,

    /// Inventory snapshot path
    #[arg(long, value_name = "FILE")]
    inventory: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        max_wait_secs: cli.max_wait,
        poll_interval_secs: cli.poll_interval,
        use_lease_fallback: cli.lease_fallback,
        inventory_path: cli.inventory.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    info!("Starting nicprobe v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    let use_case = di::build_resolver(&config, shutdown.clone());

    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, returning partial results");
            interrupt.cancel();
        }
    });

    let reports = runner::resolve_all(&use_case, &cli.vms, &cli.nics, &config.resolution).await;

    for report in &reports {
        println!("{}", serde_json::to_string(report)?);
    }

    let failed = reports.iter().filter(|r| r.is_failure()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} VMs failed", failed, reports.len());
    }

    Ok(())
}
