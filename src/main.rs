//! This project is split in 2 main modules:
//!
//! - [checkout] (storefront facing API surface)
//! - [gateway] (PayPal REST API integration)
#![doc = include_str!("../README.md")]

use std::net::{Ipv4Addr, SocketAddrV4};

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

/// Checkout endpoints called by the storefront
///
/// Every failure is turned into a fixed error message here, processor replies are relayed as-is.
mod checkout;
mod config;
/// Payment processor integration
///
/// This module defines the types and methods to communicate with the processor. In this case it is PayPal
mod gateway;
mod state;

async fn greeting() -> &'static str {
    "Hello World!"
}

/// Checkout routes plus the greeting, with unmatched paths served from `static_dir`.
fn app(state: state::AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(greeting))
        .merge(checkout::api::router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .init();

    match dotenvy::dotenv() {
        Ok(p) => tracing::info!(path = %p.display(), "Loaded environment variables from .env file"),
        Err(e) => tracing::warn!("Failed to load environment variables from .env: {e}"),
    };
    let config = config::Config::from_env()?;
    if config.client_id.is_none() || config.client_secret.is_none() {
        tracing::warn!("PayPal credentials are not configured, checkout calls will fail");
    }
    let port = config.port;
    let static_dir = config.static_dir.clone();
    let app = app(state::AppState::new(config), &static_dir);

    let listener = tokio::net::TcpListener::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    tracing::info!("Serving on port {port}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
