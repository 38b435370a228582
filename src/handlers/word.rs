use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::clock::unix_now;
use crate::metrics::{ACTIVE_CLIENTS, RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{DebugInfo, IntervalInfo, RateLimitedResponse, ServerInfo, WordResponse};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct WordQuery {
    debug: Option<String>,
}

// Rate-limit key: forwarding header first, then the peer address.
// The header is trivially spoofable, kept for parity with proxied
// deployments where the peer is always the proxy itself.
fn client_id(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }
    match peer {
        Some(addr) => addr.ip().to_string(),
        None => "unknown".to_string(),
    }
}

fn debug_requested(query: &WordQuery) -> bool {
    matches!(
        query.debug.as_deref().map(str::to_ascii_lowercase).as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}

pub async fn word_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WordQuery>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    let now = unix_now();
    let client = client_id(&headers, Some(addr));

    if !state.limiter.try_admit(&client, now) {
        RATE_LIMITED_TOTAL.inc();
        tracing::warn!(client = %client, "rate limit exceeded");

        let retry_after = state.limiter.retry_after();
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, retry_after.to_string())],
            Json(RateLimitedResponse {
                success: false,
                error: "Too many requests",
                retry_after,
            }),
        )
            .into_response();
    }
    ACTIVE_CLIENTS.set(state.limiter.len() as f64);

    let selection = state.selector.select(now);
    tracing::info!(word = %selection.word, client = %client, "secret word served");

    let debug = debug_requested(&query).then(|| DebugInfo {
        client_ip: client,
        word_index: selection.word_index,
        interval_seconds: state.selector.window_secs(),
        rate_limit_cache_size: state.limiter.len(),
    });

    let response = WordResponse {
        success: true,
        secret_word: selection.word,
        timestamp: now,
        interval_info: IntervalInfo {
            interval_index: selection.interval_index,
            next_change_in_seconds: selection.remaining_secs,
            next_change_time: chrono::DateTime::from_timestamp(selection.next_change_at as i64, 0)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default(),
        },
        server_info: ServerInfo {
            server_time: chrono::Utc::now().to_rfc3339(),
            word_pool_size: state.selector.pool_size(),
        },
        debug,
    };

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    Json(response).into_response()
}
