use std::sync::Arc;

use crate::rate_limit::RateLimiter;
use crate::word::WordSelector;

// App's shared state. The selector is immutable; the limiter owns the
// only mutable table and is shared with the background sweep task.
pub struct AppState {
    pub selector: WordSelector,
    pub limiter: Arc<RateLimiter>,
}
