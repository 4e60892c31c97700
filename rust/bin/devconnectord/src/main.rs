//! `devconnectord`, the DevConnector API server.
//!
//! Usage:
//!   devconnectord -c <name-or-path> [--listen <addr>]
//!   devconnectord --ephemeral [--listen <addr>]
//!
//! A bare name resolves to `/etc/devconnector/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use devconnector_auth::AuthConfig;
use devconnector_kv::{KVStore, MemoryStore, RedbStore};
use devconnectord::config::{self, ServerConfig};
use devconnectord::{bootstrap, build_app};

/// DevConnector server.
#[derive(Parser, Debug)]
#[command(name = "devconnectord", about = "DevConnector API server")]
struct Cli {
    /// Config name or path to config file.
    #[arg(short = 'c', long = "config", required_unless_present = "ephemeral")]
    config: Option<String>,

    /// Listen address (overrides `[server] listen`).
    #[arg(long = "listen")]
    listen: Option<String>,

    /// Keep all data in memory. Nothing survives a restart.
    #[arg(long = "ephemeral")]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut server_config = match &cli.config {
        Some(name) => {
            let path = ServerConfig::resolve_path(name);
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(&path)?
        }
        None => ServerConfig::default(),
    };
    server_config.apply_env();
    if cli.config.is_none() && server_config.jwt.secret.is_empty() {
        warn!("no JWT secret configured, using the development secret");
        server_config.jwt.secret = AuthConfig::default().jwt_secret;
    }

    bootstrap::verify_config(&server_config, cli.ephemeral)?;

    let svc_config = server_config.service_config(cli.listen.as_deref());

    let kv: Arc<dyn KVStore> = if cli.ephemeral {
        warn!("ephemeral mode: data is kept in memory only");
        Arc::new(MemoryStore::new())
    } else {
        if let Some(dir) = &svc_config.data_dir {
            std::fs::create_dir_all(dir)?;
        }
        let db_path = svc_config.resolve_db_path();
        info!("Opening database at {}", db_path.display());
        Arc::new(
            RedbStore::open(&db_path)
                .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
        )
    };

    let app = build_app(kv, config::auth_config(&svc_config));

    let listener = tokio::net::TcpListener::bind(&svc_config.listen).await?;
    info!("devconnectord listening on {}", svc_config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("devconnectord stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {}", e);
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
    info!("shutdown signal received");
}
