use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{app, AppState};
use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::database::{DatabaseManager, MongoCourseRepository};

#[derive(Debug, Parser)]
#[command(name = "course-content-api")]
#[command(about = "Course content service - courses, modules, lessons and resources over MongoDB")]
#[command(version)]
pub struct ServerArgs {
    #[arg(long, short, default_value = DEFAULT_CONFIG_PATH, help = "Path to the YAML config file")]
    pub config: PathBuf,

    #[arg(long, help = "Override the listen port")]
    pub port: Option<u16>,
}

/// Load config, connect the store, serve until SIGINT/SIGTERM, then drain
/// and close the store client.
pub async fn run(args: ServerArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    info!(
        "Config loaded (server port={}, mongo.uri={}, mongo.db={})",
        config.server.port, config.mongo.uri, config.mongo.database
    );

    let database = DatabaseManager::connect(&config.mongo)
        .await
        .context("failed to connect to MongoDB")?;
    let repository = Arc::new(MongoCourseRepository::new(database.courses()));
    let state = AppState::new(repository, config.server.request_timeout());

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Course content API listening on http://{}", bind_addr);

    serve(listener, app(state), config.server.shutdown_timeout()).await?;

    database.shutdown().await;
    info!("Server exiting");
    Ok(())
}

/// Serve until a shutdown signal arrives, then give in-flight requests at
/// most `drain` to finish.
async fn serve(listener: tokio::net::TcpListener, router: axum::Router, drain: Duration) -> anyhow::Result<()> {
    let (signalled_tx, mut signalled_rx) = watch::channel(false);

    let server = async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                info!("Shutting down server...");
                let _ = signalled_tx.send(true);
            })
            .await
    };

    let drain_window = async move {
        if signalled_rx.changed().await.is_ok() {
            tokio::time::sleep(drain).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result.context("server error")?,
        _ = drain_window => warn!("In-flight requests did not finish within {:?}; forcing shutdown", drain),
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
