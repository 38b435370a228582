use axum::Json;
use axum::response::IntoResponse;

use crate::clock::unix_now;

pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": unix_now(),
        "server_time": chrono::Utc::now().to_rfc3339()
    }))
}
