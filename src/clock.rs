use std::time::{SystemTime, UNIX_EPOCH};

// Seconds since the unix epoch - the one clock both the word selector
// and the rate limiter read from
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
