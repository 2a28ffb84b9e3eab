use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mwres_api::config::{LogFormat, ServerConfig};
use mwres_api::router::build_app_router;
use mwres_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mwres_api=debug,mwres_store=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    tracing::info!(
        base_dir = %config.layout.base_dir.display(),
        data_dir = %config.layout.data_dir.display(),
        image_dir = %config.layout.image_dir.display(),
        activity_dir = %config.layout.activity_dir.display(),
        "Data layout",
    );

    // --- Type inference rules ---
    let type_rules = config
        .load_type_rules()
        .unwrap_or_else(|e| panic!("Failed to load type inference rules: {e}"));

    // --- Input trees ---
    let health = mwres_store::health_check(&config.layout).await;
    if !health.is_healthy() {
        tracing::warn!(
            data_dir_present = health.data_dir_present,
            image_dir_present = health.image_dir_present,
            "Catalog directories missing, serving degraded results",
        );
    }

    // --- App state + router ---
    let state = AppState::new(config.clone(), type_rules);
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
