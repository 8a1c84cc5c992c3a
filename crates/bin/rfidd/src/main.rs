//! # rfidd — RFID ingestion daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and refuse to start without an API key
//! - Initialize logging
//! - Create the `SQLite` database file and run migrations
//! - Construct the record repository, service and axum router
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::error::Error;

use tokio::net::TcpSocket;
use tracing_subscriber::EnvFilter;

use rfid_api_adapter_http_axum::router::{self, Limits};
use rfid_api_adapter_http_axum::state::AppState;
use rfid_api_adapter_storage_sqlite_sqlx::SqliteRecordRepository;
use rfid_api_app::services::record_service::RecordService;

use crate::config::Config;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(threads) = config.server.worker_threads {
        builder.worker_threads(threads);
    }
    let runtime = builder.enable_all().build()?;

    runtime.block_on(run(config))
}

async fn run(config: Config) -> Result<(), Box<dyn Error>> {
    // Database
    let db = rfid_api_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_owned(),
        busy_timeout: config.busy_timeout(),
    }
    .build()
    .await?;

    // Services
    let record_service = RecordService::new(SqliteRecordRepository::new(db));

    // HTTP
    let state = AppState::new(record_service, config.api_key()?);
    let app = router::build_with_limits(
        state,
        Limits {
            max_body_bytes: config.max_body_bytes(),
            request_timeout: config.request_timeout(),
        },
    );

    let addr = config.socket_addr()?;
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    let listener = socket.listen(config.server.backlog)?;

    tracing::info!(
        addr = %config.bind_addr(),
        backlog = config.server.backlog,
        "rfidd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("rfidd stopped");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
