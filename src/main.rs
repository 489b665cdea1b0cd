//! # Form Sheets Backend
//!
//! Entry point: sets up logging, loads configuration, builds the shared
//! state, and serves the HTTP API until Ctrl-C or SIGTERM.

use form_sheets_backend::config::Config;
use form_sheets_backend::router;
use form_sheets_backend::state::AppState;
// Structured logging setup
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// 1. Sets up logging (`RUST_LOG` overrides the default filter)
/// 2. Loads configuration from environment variables
/// 3. Loads the Google credential and builds the spreadsheet client
/// 4. Configures routes and middleware
/// 5. Serves until a shutdown signal arrives
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,form_sheets_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    // A missing or broken credential does not stop startup; writes are
    // refused until the service is restarted with a valid key.
    let app_state = AppState::new(config.clone());
    tracing::info!(
        sheets_ready = app_state.sheets.is_configured(),
        "Application state initialized"
    );

    let app = router(app_state);

    let bind_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Server running on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
