use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::interval;

use crate::clock::unix_now;
use crate::metrics::{ACTIVE_CLIENTS, SWEPT_TOTAL};

// Per-client minimum-interval rate limiter. The table maps a client id
// to the timestamp of its last admitted request; DashMap gives us an
// atomic check-and-update per key without serializing unrelated clients.
pub struct RateLimiter {
    table: DashMap<String, u64>,
    min_interval: u64,
    max_age: u64,
    sweep_interval: u64,
    last_sweep: AtomicU64,
}

impl RateLimiter {
    pub fn new(min_interval: u64, max_age: u64, sweep_interval: u64) -> Self {
        Self {
            table: DashMap::new(),
            min_interval,
            max_age,
            sweep_interval,
            last_sweep: AtomicU64::new(0),
        }
    }

    // Admit if this is the client's first request or enough time has
    // passed since the last admitted one. A rejected request does NOT
    // refresh last_seen, so a client hammering the endpoint cannot
    // extend its own throttle window.
    pub fn try_admit(&self, client_id: &str, now: u64) -> bool {
        let admitted = match self.table.entry(client_id.to_string()) {
            Entry::Occupied(mut entry) => {
                if now.saturating_sub(*entry.get()) >= self.min_interval {
                    entry.insert(now);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        };

        // entry guard dropped above; safe to walk the table now
        self.maybe_sweep(now);
        admitted
    }

    // Inline expiry on the request path, throttled so admission stays
    // O(1) amortized. The CAS makes sure only one caller per interval
    // pays for the walk.
    fn maybe_sweep(&self, now: u64) {
        let last = self.last_sweep.load(Ordering::Relaxed);
        if now.saturating_sub(last) < self.sweep_interval {
            return;
        }
        if self
            .last_sweep
            .compare_exchange(last, now, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            let removed = self.sweep(now);
            if removed > 0 {
                tracing::debug!(removed, "inline sweep dropped stale clients");
            }
        }
    }

    // Drop every entry older than max_age, return how many went
    pub fn sweep(&self, now: u64) -> usize {
        let before = self.table.len();
        self.table
            .retain(|_, last_seen| now.saturating_sub(*last_seen) <= self.max_age);
        before.saturating_sub(self.table.len())
    }

    // Advisory delay handed back with a rejection
    pub fn retry_after(&self) -> u64 {
        self.min_interval
    }

    // Diagnostics only, never part of the admission decision
    pub fn len(&self) -> usize {
        self.table.len()
    }
}

// Background expiry - keeps memory bounded even when no requests come
// in to trigger the inline sweep. Each tick logs and carries on no
// matter what it found.
pub async fn sweep_task(limiter: Arc<RateLimiter>, period: Duration) {
    let mut ticker = interval(period);
    tracing::info!(period_secs = period.as_secs(), "sweep task started");

    loop {
        ticker.tick().await;
        let removed = limiter.sweep(unix_now());
        SWEPT_TOTAL.inc_by(removed as f64);
        ACTIVE_CLIENTS.set(limiter.len() as f64);
        if removed > 0 {
            tracing::info!(removed, remaining = limiter.len(), "swept stale rate limit entries");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> RateLimiter {
        // min interval 2s, entries stale after 3600s
        RateLimiter::new(2, 3600, 3600)
    }

    #[test]
    fn first_request_is_admitted() {
        assert!(limiter().try_admit("1.2.3.4", 100));
    }

    #[test]
    fn spacing_is_enforced() {
        let rl = limiter();
        assert!(rl.try_admit("1.2.3.4", 100));
        assert!(!rl.try_admit("1.2.3.4", 101));
        assert_eq!(rl.retry_after(), 2);
        assert!(rl.try_admit("1.2.3.4", 102));
    }

    #[test]
    fn rejection_does_not_refresh_last_seen() {
        let rl = limiter();
        assert!(rl.try_admit("1.2.3.4", 100));
        // if the rejection at 101 reset the window, 102 would fail too
        assert!(!rl.try_admit("1.2.3.4", 101));
        assert!(rl.try_admit("1.2.3.4", 102));
    }

    #[test]
    fn distinct_clients_do_not_interfere() {
        let rl = limiter();
        assert!(rl.try_admit("1.2.3.4", 100));
        assert!(rl.try_admit("5.6.7.8", 100));
        assert!(!rl.try_admit("1.2.3.4", 101));
        assert!(!rl.try_admit("5.6.7.8", 101));
        assert_eq!(rl.len(), 2);
    }

    #[test]
    fn sweep_removes_only_stale_entries() {
        let rl = limiter();
        assert!(rl.try_admit("old", 100));
        assert!(rl.try_admit("fresh", 3000));

        // at t=4000 "old" is 3900s stale, "fresh" only 1000s
        let removed = rl.sweep(4000);
        assert_eq!(removed, 1);
        assert_eq!(rl.len(), 1);

        // "fresh" kept its timestamp: still throttled right after it
        assert!(!rl.try_admit("fresh", 3001));
        // "old" is back to unknown, admitted immediately
        assert!(rl.try_admit("old", 4000));
    }

    #[test]
    fn sweep_on_empty_table_is_a_noop() {
        assert_eq!(limiter().sweep(10_000), 0);
    }

    #[test]
    fn inline_sweep_reclaims_on_the_request_path() {
        // stale after 10s, inline sweep at most every 5s
        let rl = RateLimiter::new(2, 10, 5);
        assert!(rl.try_admit("a", 100));
        assert_eq!(rl.len(), 1);

        // by t=200 "a" is long stale; admitting "b" triggers the sweep
        assert!(rl.try_admit("b", 200));
        assert_eq!(rl.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_distinct_clients_all_admitted() {
        let rl = Arc::new(limiter());
        let mut handles = Vec::new();
        for i in 0..32 {
            let rl = Arc::clone(&rl);
            handles.push(tokio::spawn(async move {
                rl.try_admit(&format!("10.0.0.{i}"), 1000)
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(rl.len(), 32);
    }
}
