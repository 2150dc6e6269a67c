//! Rental Functions - Server Binary
//!
//! Starts the HTTP server exposing the rental extension's server functions.
//!
//! # Usage
//!
//! ```bash
//! # Run with a token from the environment
//! PRIVATE_APP_ACCESS_TOKEN=pat-... cargo run --bin rental-functions
//!
//! # Override host, port and CRM location
//! API_HOST=127.0.0.1 API_PORT=3000 API_CRM_BASE_URL=http://localhost:9000 cargo run --bin rental-functions
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_CRM_BASE_URL` - CRM API base URL (default: https://api.hubapi.com)
//! * `API_CRM_ACCESS_TOKEN` - CRM private app token; falls back to `PRIVATE_APP_ACCESS_TOKEN`
//! * `API_CRM_TIMEOUT_SECS` - CRM request timeout (default: 30)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_rental::CrmPort;
use infra_crm::{CrmClient, CrmRestAdapter};
use interface_api::{config::ApiConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        crm_base_url = %config.crm_base_url,
        "Starting rental functions server"
    );

    let client = CrmClient::new(config.crm_client_config())
        .context("CRM client could not be created; set API_CRM_ACCESS_TOKEN or PRIVATE_APP_ACCESS_TOKEN")?;
    let crm: Arc<dyn CrmPort> = Arc::new(CrmRestAdapter::new(client));

    let app = create_router(crm);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
