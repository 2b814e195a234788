//! Roster server - user CRUD service over MongoDB.
//!
//! # Architecture
//!
//! - Axum web framework, one handler per CRUD flow
//! - A store gateway trait owning all access to the user collection
//! - MongoDB as the document store; every operation runs under a deadline
//!
//! Request logging and panic recovery are provided here as middleware; the
//! handlers themselves only translate HTTP to gateway calls.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_server::config::ServerConfig;
use roster_server::state::AppState;
use roster_server::{db, routes};

#[tokio::main]
async fn main() {
    // Load .env if present, then configuration from the environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roster_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // An unreachable store is fatal; there is no retry at startup
    let store = db::connect(&config)
        .await
        .expect("Failed to connect to MongoDB");

    let state = AppState::new(Arc::new(store));

    let app = routes::app(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new());

    let addr = config.socket_addr();
    tracing::info!("roster listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
