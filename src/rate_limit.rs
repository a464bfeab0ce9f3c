use dashmap::DashMap;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_LIMIT: u32 = 30;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

// Source of "now" for the request layer. The limiter itself only sees instants.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    // retry_after = how long until the oldest entry leaves the window
    Rejected { retry_after: Duration },
}

impl Decision {
    #[cfg(test)]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }
}

/// Sliding-window limiter keyed by credential.
///
/// Each key holds the instants of its accepted requests that are still inside the
/// trailing window. Expired instants are pruned only when that key is checked again.
/// The map is sharded, so the read/prune/decide/append sequence for one key never
/// blocks callers working on keys in other shards.
pub struct RateLimiter {
    hits: DashMap<String, VecDeque<Instant>>,
    limit: u32,
    window: Duration,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_WINDOW)
    }
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            hits: DashMap::new(),
            limit,
            window,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    // Decide for one request at `now` and record it if accepted.
    // A rejected attempt is not recorded, so it never eats into later quota.
    pub fn check_and_record(&self, credential: &str, now: Instant) -> Decision {
        // nothing can ever be accepted, so don't create an entry that would stay empty
        if self.limit == 0 {
            return Decision::Rejected { retry_after: self.window };
        }

        // entry() holds the shard write lock until `entry` is dropped
        let mut entry = self.hits.entry(credential.to_string()).or_default();

        // keep t only while now - t < window (anything at or before the cutoff is gone)
        while let Some(&oldest) = entry.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                entry.pop_front();
            } else {
                break;
            }
        }

        if entry.len() >= self.limit as usize {
            let retry_after = entry
                .front()
                .map(|oldest| self.window.saturating_sub(now.saturating_duration_since(*oldest)))
                .unwrap_or(self.window);
            return Decision::Rejected { retry_after };
        }

        entry.push_back(now);
        Decision::Accepted
    }

    // Number of instants currently held for a key (expired ones included until pruned)
    #[cfg(test)]
    pub fn recorded(&self, credential: &str) -> usize {
        self.hits.get(credential).map(|e| e.len()).unwrap_or(0)
    }

    // Keys are never evicted: every distinct credential ever checked keeps an entry
    // (at most `limit` instants) until the process restarts.
    pub fn tracked_credentials(&self) -> usize {
        self.hits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn quota_ceiling_at_same_instant() {
        let limiter = RateLimiter::default();
        let now = Instant::now();
        for i in 0..DEFAULT_LIMIT {
            assert!(limiter.check_and_record("k1", now).is_accepted(), "call {} rejected", i + 1);
        }
        assert!(!limiter.check_and_record("k1", now).is_accepted());
    }

    #[test]
    fn unseen_credential_is_accepted() {
        let limiter = RateLimiter::new(1, DEFAULT_WINDOW);
        assert_eq!(limiter.check_and_record("fresh", Instant::now()), Decision::Accepted);
    }

    #[test]
    fn zero_limit_rejects_everything() {
        let limiter = RateLimiter::new(0, DEFAULT_WINDOW);
        let decision = limiter.check_and_record("k", Instant::now());
        assert_eq!(decision, Decision::Rejected { retry_after: DEFAULT_WINDOW });
        assert_eq!(limiter.tracked_credentials(), 0);
    }

    #[test]
    fn stored_instants_stay_bounded_by_limit() {
        let limiter = RateLimiter::new(5, DEFAULT_WINDOW);
        let t0 = Instant::now();
        for i in 0..500 {
            limiter.check_and_record("busy", t0 + secs(i as f64 * 0.5));
            assert!(limiter.recorded("busy") <= 5);
        }
    }

    #[test]
    fn window_slides_past_earliest_entry() {
        let limiter = RateLimiter::default();
        let t0 = Instant::now();
        for i in 0..DEFAULT_LIMIT {
            assert!(limiter.check_and_record("k1", t0 + secs(i as f64)).is_accepted());
        }
        assert!(!limiter.check_and_record("k1", t0 + secs(59.0)).is_accepted());
        // t0 entry has aged out
        assert!(limiter.check_and_record("k1", t0 + DEFAULT_WINDOW + secs(0.001)).is_accepted());
    }

    #[test]
    fn entry_exactly_at_cutoff_is_expired() {
        let limiter = RateLimiter::new(1, DEFAULT_WINDOW);
        let t0 = Instant::now();
        assert!(limiter.check_and_record("k", t0).is_accepted());
        assert!(!limiter.check_and_record("k", t0 + secs(59.999)).is_accepted());
        assert!(limiter.check_and_record("k", t0 + DEFAULT_WINDOW).is_accepted());
    }

    #[test]
    fn rejection_does_not_consume_quota() {
        let limiter = RateLimiter::new(3, DEFAULT_WINDOW);
        let now = Instant::now();
        for _ in 0..3 {
            limiter.check_and_record("k", now);
        }
        for _ in 0..100 {
            assert!(!limiter.check_and_record("k", now).is_accepted());
        }
        assert_eq!(limiter.recorded("k"), 3);
    }

    #[test]
    fn credentials_are_isolated() {
        let limiter = RateLimiter::new(2, DEFAULT_WINDOW);
        let now = Instant::now();
        limiter.check_and_record("a", now);
        limiter.check_and_record("a", now);
        assert!(!limiter.check_and_record("a", now).is_accepted());
        assert!(limiter.check_and_record("b", now).is_accepted());
        assert_eq!(limiter.tracked_credentials(), 2);
    }

    #[test]
    fn retry_after_points_at_oldest_entry() {
        let limiter = RateLimiter::new(2, DEFAULT_WINDOW);
        let t0 = Instant::now();
        limiter.check_and_record("k", t0);
        limiter.check_and_record("k", t0 + secs(10.0));
        let decision = limiter.check_and_record("k", t0 + secs(15.0));
        assert_eq!(decision, Decision::Rejected { retry_after: secs(45.0) });
    }

    #[test]
    fn concrete_scenario() {
        let limiter = RateLimiter::new(30, Duration::from_secs(60));
        let t0 = Instant::now();
        for i in 0..30 {
            assert!(limiter.check_and_record("k1", t0 + secs(i as f64)).is_accepted());
        }
        assert!(!limiter.check_and_record("k1", t0 + secs(29.5)).is_accepted());
        assert!(limiter.check_and_record("k1", t0 + secs(61.0)).is_accepted());
    }

    #[test]
    fn concurrent_callers_never_exceed_limit() {
        let limiter = Arc::new(RateLimiter::new(30, DEFAULT_WINDOW));
        let now = Instant::now();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || {
                    (0..20)
                        .filter(|_| limiter.check_and_record("shared", now).is_accepted())
                        .count()
                })
            })
            .collect();

        let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(accepted, 30);
        assert_eq!(limiter.recorded("shared"), 30);
    }

    #[test]
    fn independent_instances_do_not_share_state() {
        let a = RateLimiter::new(1, DEFAULT_WINDOW);
        let b = RateLimiter::new(1, DEFAULT_WINDOW);
        let now = Instant::now();
        assert!(a.check_and_record("k", now).is_accepted());
        assert!(b.check_and_record("k", now).is_accepted());
    }
}
