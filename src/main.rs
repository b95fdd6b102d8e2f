//! Player stat server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Consumer open(<ID>.xml | @COMMAND)
//!     ─────────────────────────────▶ http adapter ──▶ command interpreter
//!                                                        │
//!                                        pending list ◀──┤
//!                                                        ▼
//!                                                    stat cache ──▶ circuit breaker
//!                                                        │
//!                                                        ▼
//!                                                 random proxy pool ──▶ stat proxies
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use stat_server::clock::SystemClock;
use stat_server::config::load_or_default;
use stat_server::http::{shutdown_signal, HttpServer};
use stat_server::load_balancer::RandomSelector;
use stat_server::observability::{logging, metrics};
use stat_server::{CommandInterpreter, RemoteFetcher, StatCache};

#[derive(Parser)]
#[command(name = "stat-server")]
#[command(about = "Serves player battle statistics as pseudo-files", long_about = None)]
struct Args {
    /// Mount id, overrides `settings.mount_id`
    mount: Option<String>,

    #[arg(short, long, default_value = "stat-server.toml")]
    config: PathBuf,

    /// Listen address, overrides `listener.bind_address`
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (mut config, config_error) = load_or_default(&args.config);
    if let Some(mount) = args.mount {
        config.settings.mount_id = mount;
    }
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(config.settings.log_level);
    tracing::info!("stat-server v{} starting", env!("CARGO_PKG_VERSION"));

    if let Some(e) = config_error {
        tracing::warn!(path = %args.config.display(), error = %e, "Using default configuration");
    }

    tracing::info!(
        mount_id = %config.settings.mount_id,
        timeout_ms = config.settings.timeout_ms,
        fetch_mode = config.upstream.fetch_mode.as_str(),
        pool_size = config.upstream.pool_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let fetcher = RemoteFetcher::new(
        &config.upstream,
        config.settings.timeout(),
        Box::new(RandomSelector::from_entropy()),
    )?;
    let cache = StatCache::from_config(fetcher, &config, SystemClock::shared());
    let interpreter = Arc::new(CommandInterpreter::new(cache));

    tracing::info!(
        "Now you can link the game's stat directory to drive {0}: using \
         mklink /D c:\\games\\World_of_Tanks\\res\\gui\\flash\\stat {0}:\\",
        config.settings.mount_id
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(interpreter, &config.listener);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
