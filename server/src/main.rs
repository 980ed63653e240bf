//! To-do list server.
//!
//! This binary:
//! - Loads configuration from the environment (and `.env`)
//! - Opens the configured item store
//! - Serves the item API, `/health` and Prometheus `/metrics`
//! - Shuts down gracefully on Ctrl+C or SIGTERM
//!
//! # Usage
//!
//! ```bash
//! # In-memory store
//! cargo run --bin todo-list-server
//!
//! # PostgreSQL store
//! STORE_BACKEND=postgres DATABASE_URL=postgres://localhost/todo_list \
//!     cargo run --bin todo-list-server
//! ```

use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use todo_list_server::{BootstrapError, Config, StoreHandle, app};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), BootstrapError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.server.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting to-do list server...");
    info!(
        backend = ?config.store.backend,
        address = %config.server.bind_address(),
        "Configuration loaded"
    );

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| BootstrapError::Metrics(e.to_string()))?;

    let store = StoreHandle::open(&config.store).await?;

    let router = app(&store).route(
        "/metrics",
        get(move || {
            let prometheus = prometheus.clone();
            async move { prometheus.render() }
        }),
    );

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    info!(address = %listener.local_addr()?, "✓ Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
