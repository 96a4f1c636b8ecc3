//! fkig-dash - Fukuoka IG Insights dashboard
//!
//! Loads the posts table once, refines languages, and serves read-only
//! aggregate views and per-language posting recommendations over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use fkig_common::config::{CompiledDefaults, ConfigLoad, DataPathResolver};
use fkig_common::posts::load_cached;
use fkig_dash::{build_router, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};

/// Command-line arguments for fkig-dash
#[derive(Parser, Debug)]
#[command(name = "fkig-dash")]
#[command(about = "Instagram insights dashboard for inbound Fukuoka tourism")]
#[command(version)]
struct Args {
    /// Posts CSV (overrides FKIG_DATA and the config file)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "FKIG_PORT")]
    port: Option<u16>,

    /// Config file (overrides FKIG_CONFIG and the platform config location)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let defaults = CompiledDefaults::default();

    // Read before tracing so log_level can seed the filter
    let config_load = ConfigLoad::locate(args.config.clone());
    let config = config_load.config.clone();

    let default_filter = format!(
        "fkig_dash={level},fkig_common={level},tower_http={level}",
        level = config.log_level.as_deref().unwrap_or(&defaults.log_level)
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    info!(
        "Starting Fukuoka IG Insights (fkig-dash) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    config_load.report();

    let data_path = DataPathResolver::new(args.data.clone(), config.clone()).resolve();
    info!("Posts table: {}", data_path.display());

    let dataset = match load_cached(&data_path) {
        Ok(dataset) => {
            info!("✓ Loaded {} posts", dataset.len());
            dataset
        }
        Err(e) => {
            error!("Failed to load posts table: {}", e);
            return Err(e).with_context(|| format!("loading {}", data_path.display()));
        }
    };

    let state = AppState::new(dataset);
    let app = build_router(state);

    let port = args.port.or(config.port).unwrap_or(defaults.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("fkig-dash listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("fkig-dash stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C - stopping dashboard");
        },
        _ = terminate => {
            info!("SIGTERM - stopping dashboard");
        },
    }
}
