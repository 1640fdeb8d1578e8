//! per-host-motd
//!
//! Standalone driver for the per-virtual-host MOTD service. It loads the
//! same `config.json` a proxy would and lets operators validate it, preview
//! the ping a given host would receive, or keep it hot-reloaded.
//!
//! ```text
//!   config.json ──▶ ConfigLoader ──▶ MotdRegistry ◀── PingResponder ◀── ping
//!        ▲                              ▲
//!        │                              │ replace()
//!   watcher / SIGHUP / reloadmotds ─────┘
//! ```

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use per_host_motd::config::ConfigWatcher;
use per_host_motd::lifecycle::{run_reload_loop, signals};
use per_host_motd::observability::{logging, metrics};
use per_host_motd::{MotdService, PingResponse, ReloadOutcome};

#[derive(Parser)]
#[command(name = "per-host-motd")]
#[command(about = "Per-virtual-host server list MOTDs", long_about = None)]
struct Cli {
    /// Directory holding config.json and icon files
    #[arg(short, long, default_value = "plugins/perservermotd")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the configuration once and list configured hosts
    Check,
    /// Print the ping response a virtual host would receive
    Preview {
        /// Virtual host the client connected with
        #[arg(long)]
        host: String,
        /// JSON file with the base ping response
        #[arg(long)]
        base: Option<PathBuf>,
    },
    /// Keep the configuration loaded, reloading on change or SIGHUP
    Watch {
        /// Serve Prometheus metrics on this address
        #[arg(long)]
        metrics_address: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(logging::DEFAULT_FILTER);
    let cli = Cli::parse();

    tracing::debug!(data_dir = %cli.data_dir.display(), "per-host-motd v{} starting", env!("CARGO_PKG_VERSION"));
    let service = Arc::new(MotdService::new(cli.data_dir));

    match cli.command {
        Commands::Check => check(&service),
        Commands::Preview { host, base } => preview(&service, &host, base),
        Commands::Watch { metrics_address } => watch(service, metrics_address).await,
    }
}

fn check(service: &MotdService) -> Result<(), Box<dyn std::error::Error>> {
    match service.reload() {
        ReloadOutcome::Failed(e) => Err(e.into()),
        ReloadOutcome::Defaulted => {
            println!("{} created, no hosts configured", service.config_path().display());
            Ok(())
        }
        ReloadOutcome::Loaded { hosts } => {
            let snapshot = service.registry().snapshot();
            let mut names: Vec<_> = snapshot.keys().collect();
            names.sort();
            println!("{} host(s) configured in {}", hosts, service.config_path().display());
            for name in names {
                let record = &snapshot[name];
                let favicon = match &record.favicon_path {
                    Some(path) if path.exists() => path.display().to_string(),
                    Some(path) => format!("{} (missing)", path.display()),
                    None => "-".to_string(),
                };
                println!(
                    "  {}  description={}  favicon={}",
                    name,
                    record.description.as_deref().unwrap_or("-"),
                    favicon
                );
            }
            Ok(())
        }
    }
}

fn preview(
    service: &MotdService,
    host: &str,
    base: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let ReloadOutcome::Failed(e) = service.reload() {
        return Err(e.into());
    }

    let base = match base {
        Some(path) => serde_json::from_str::<PingResponse>(&std::fs::read_to_string(path)?)?,
        None => PingResponse::default(),
    };

    let ping = service.on_ping(Some(host), base);
    println!("{}", serde_json::to_string_pretty(&ping)?);
    Ok(())
}

async fn watch(
    service: Arc<MotdService>,
    metrics_address: Option<SocketAddr>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(addr) = metrics_address {
        metrics::init_metrics(addr);
    }

    let svc = service.clone();
    tokio::task::spawn_blocking(move || svc.reload()).await?;

    let (watcher, changes) = ConfigWatcher::new(service.config_path());
    let _watcher = watcher.run()?;
    let hangups = signals::hangups()?;

    run_reload_loop(service, changes, hangups, signals::shutdown_signal()).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
