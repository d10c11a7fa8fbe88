//! Social Directory - person-to-handle lookups across messaging networks
//!
//! One binary, one role per process: the gateway, either network backend,
//! or the readiness check that waits for all three.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use social_directory::config::{Config, Endpoint};
use social_directory::server::{serve, BackendService, GatewayRouter, Service};
use social_directory::store::DataStore;
use social_directory::tasks::wait_for_all;

/// Command-line interface for the directory services
#[derive(Debug, Parser)]
#[command(name = "social_directory")]
#[command(about = "Gateway and per-network backends for social handle lookups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    role: Role,
}

/// Which process to run
#[derive(Debug, Subcommand)]
enum Role {
    /// Run the gateway on HTTP_HOST:HTTP_PORT
    Gateway,
    /// Run the Instagram backend on INSTAGRAM_HOST:INSTAGRAM_PORT
    Instagram,
    /// Run the WhatsApp backend on WHATSAPP_HOST:WHATSAPP_PORT
    Whatsapp,
    /// Wait until every service answers its liveness request
    Readiness,
}

/// Main entry point.
///
/// # Startup Sequence
/// 1. Load `.env` if present, then configuration from the environment
/// 2. Initialize tracing subscriber for logging
/// 3. Load the record file (fatal on any malformed line)
/// 4. Bind and run the selected service until Ctrl+C or SIGTERM
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_directory=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    match cli.role {
        Role::Gateway => {
            let store = load_store(&config)?;
            let gateway = GatewayRouter::new(
                "HttpServer",
                Arc::new(store),
                config.instagram.clone(),
                config.whatsapp.clone(),
            );
            info!(
                "Linked InstagramServer at {} and WhatsAppServer at {}",
                config.instagram, config.whatsapp
            );
            run(gateway, &config.gateway).await
        }
        Role::Instagram => {
            let store = load_store(&config)?;
            run(
                BackendService::for_network("InstagramServer", "instagram", store),
                &config.instagram,
            )
            .await
        }
        Role::Whatsapp => {
            let store = load_store(&config)?;
            run(
                BackendService::for_network("WhatsAppServer", "whatsapp", store),
                &config.whatsapp,
            )
            .await
        }
        Role::Readiness => {
            wait_for_all(&config).await;
            Ok(())
        }
    }
}

fn load_store(config: &Config) -> Result<DataStore> {
    let store = DataStore::load(&config.data_path)
        .with_context(|| format!("Failed to load records from {}", config.data_path))?;
    info!(
        "Loaded {} records from {} across networks: {}",
        store.len(),
        config.data_path,
        store.networks().collect::<Vec<_>>().join(", ")
    );
    Ok(store)
}

/// Binds `endpoint` and serves until a shutdown signal arrives.
async fn run<S: Service>(service: S, endpoint: &Endpoint) -> Result<()> {
    info!("Starting {} on {}", service.name(), endpoint);
    let listener = TcpListener::bind(endpoint.address())
        .await
        .with_context(|| format!("Failed to bind {}", endpoint))?;

    tokio::select! {
        result = serve(listener, Arc::new(service)) => {
            result.context("Accept loop failed")?;
        }
        _ = shutdown_signal() => {}
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
