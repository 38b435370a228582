mod clock;
mod config;
mod handlers;
mod metrics;
mod models;
mod rate_limit;
mod state;
mod word;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use clap::Parser;

use crate::config::Args;
use crate::handlers::{
    health_handler, metrics_handler, not_found_handler, stats_handler, word_handler,
};
use crate::rate_limit::{RateLimiter, sweep_task};
use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let limiter = Arc::new(RateLimiter::new(
        config.min_interval,
        config.max_age,
        config.sweep_interval,
    ));
    let state = Arc::new(AppState {
        selector: config.selector,
        limiter: Arc::clone(&limiter),
    });

    // background expiry, stopped when the server shuts down
    let sweeper = tokio::spawn(sweep_task(
        limiter,
        Duration::from_secs(config.sweep_interval),
    ));

    let app = Router::new()
        .route("/", get(word_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/metrics", get(metrics_handler))
        .fallback(not_found_handler)
        .with_state(Arc::clone(&state));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(
        port = config.port,
        pool_size = state.selector.pool_size(),
        window_secs = state.selector.window_secs(),
        min_interval = config.min_interval,
        "secret word api listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("server error");

    sweeper.abort();
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
