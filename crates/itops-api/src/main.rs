//! itops-api server entry point.
//!
//! Reads configuration from the environment, seeds the in-memory store and
//! serves until Ctrl-C or SIGTERM. All data is lost on restart.

use std::net::SocketAddr;
use std::sync::Arc;

use itops_api::state::{AppConfig, AppState, LogFormat};
use itops_state::{default_users, IssueTracker, MemoryStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    let store = if config.seed_demo {
        MemoryStore::with_demo_data()
    } else {
        MemoryStore::new(default_users())
    };
    let tracker = IssueTracker::new(Arc::new(store));
    tracing::info!(
        seed_demo = config.seed_demo,
        metrics = config.metrics,
        next_issue_id = %tracker.next_issue_id(),
        "issue store ready"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::with_config(tracker, config)?;
    let app = itops_api::app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("itops-api listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("itops-api stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
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
                tracing::error!("failed to listen for SIGTERM: {e}");
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
    tracing::info!("shutdown signal received");
}
