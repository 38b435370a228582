use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::clock::unix_now;
use crate::models::StatsResponse;
use crate::state::AppState;

// Diagnostics endpoint; not rate limited
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let selection = state.selector.select(unix_now());

    Json(StatsResponse {
        current_word: selection.word,
        word_pool_size: state.selector.pool_size(),
        interval_minutes: state.selector.window_secs() / 60,
        next_change_in: selection.remaining_secs,
        total_intervals_passed: selection.interval_index,
        rate_limit_seconds: state.limiter.retry_after(),
        active_ips: state.limiter.len(),
    })
}
