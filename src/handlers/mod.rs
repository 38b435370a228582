mod health;
mod metrics;
mod not_found;
mod stats;
mod word;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use not_found::not_found_handler;
pub use stats::stats_handler;
pub use word::word_handler;
