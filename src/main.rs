//! fs-dispatch: HTTP inspection front for a filesystem dispatcher.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 FS-DISPATCH                  │
//!                        │                                              │
//!     Client Request     │  ┌─────────┐    ┌────────────┐               │
//!     ───────────────────┼─▶│  http   │───▶│ RequestPath│               │
//!                        │  │ server  │    │   parse    │               │
//!                        │  └─────────┘    └─────┬──────┘               │
//!                        │                       ▼                      │
//!                        │               ┌──────────────┐   rebuild     │
//!                        │               │SharedDispatch│◀───── watcher │
//!                        │               │  (arc-swap)  │◀───── SIGHUP  │
//!                        │               └──────┬───────┘               │
//!                        │                      ▼                       │
//!     Client Response    │  ┌─────────┐   ┌──────────────┐              │
//!     ◀──────────────────┼──│response │◀──│ TreeDispatch │◀── www root  │
//!                        │  │  JSON   │   │   matcher    │              │
//!                        │  └─────────┘   └──────────────┘              │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use fs_dispatch::config::{load_config, validate_config, AppConfig, ConfigError};
use fs_dispatch::http::HttpServer;
use fs_dispatch::lifecycle::{signals, start_dispatching, Shutdown};
use fs_dispatch::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "fs-dispatch", version)]
#[command(about = "Serve dispatch results for a www root over HTTP", long_about = None)]
struct Args {
    /// Configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// www root, overriding the configuration.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Bind address, overriding the configuration.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(root) = args.root {
        config.dispatch.www_root = root;
    }
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("fs-dispatch v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        www_root = %config.dispatch.www_root.display(),
        bind_address = %config.listener.bind_address,
        collision_policy = ?config.dispatch.collision_policy,
        changes_reload = config.dispatch.changes_reload,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let dispatching = start_dispatching(&config)?;
    let dispatcher = dispatching.dispatcher.clone();

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_shutdown_handler(shutdown.clone());
    signals::spawn_reload_handler(dispatcher.clone(), &shutdown);

    let server = HttpServer::new(config, dispatcher);
    server.run(listener, shutdown.subscribe()).await?;

    drop(dispatching);
    tracing::info!("Shutdown complete");
    Ok(())
}
