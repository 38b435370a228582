use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter = register_counter!(
        "secret_word_requests_total",
        "Total number of word requests"
    )
    .unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "secret_word_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref SWEPT_TOTAL: Counter = register_counter!(
        "secret_word_swept_entries_total",
        "Rate limit entries removed by sweeps"
    )
    .unwrap();
    pub static ref ACTIVE_CLIENTS: Gauge = register_gauge!(
        "secret_word_active_clients",
        "Current number of tracked rate limit entries"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "secret_word_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
}
