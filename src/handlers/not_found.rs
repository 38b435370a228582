use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "error": "Endpoint not found",
            "available_endpoints": [
                "/ - Get secret word",
                "/health - Health check",
                "/stats - Statistics",
                "/metrics - Prometheus metrics",
                "/?debug=1 - Debug mode"
            ]
        })),
    )
}
