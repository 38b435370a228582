use serde::Serialize;

// Success envelope for GET /
#[derive(Serialize)]
pub struct WordResponse {
    pub success: bool,
    pub secret_word: String,
    pub timestamp: u64,
    pub interval_info: IntervalInfo,
    pub server_info: ServerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

#[derive(Serialize)]
pub struct IntervalInfo {
    pub interval_index: u64,
    pub next_change_in_seconds: u64,
    pub next_change_time: String,
}

#[derive(Serialize)]
pub struct ServerInfo {
    pub server_time: String,
    pub word_pool_size: usize,
}

// Extra block appended with ?debug=1
#[derive(Serialize)]
pub struct DebugInfo {
    pub client_ip: String,
    pub word_index: usize,
    pub interval_seconds: u64,
    pub rate_limit_cache_size: usize,
}

// 429 body; retry_after mirrors the Retry-After header
#[derive(Serialize)]
pub struct RateLimitedResponse {
    pub success: bool,
    pub error: &'static str,
    pub retry_after: u64,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub current_word: String,
    pub word_pool_size: usize,
    pub interval_minutes: u64,
    pub next_change_in: u64,
    pub total_intervals_passed: u64,
    pub rate_limit_seconds: u64,
    pub active_ips: usize,
}
