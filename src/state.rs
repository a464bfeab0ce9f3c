use std::sync::Arc;
use crate::rate_limit::{Clock, RateLimiter, SystemClock};
use crate::store::Store;
// app's shared state

pub struct AppState {
    pub store: Store,
    pub rate_limiter: RateLimiter,
    pub clock: Arc<dyn Clock>, // injectable so tests can move time by hand
}

impl AppState {
    pub fn new(rate_limiter: RateLimiter) -> Self {
        Self::with_clock(rate_limiter, Arc::new(SystemClock))
    }

    pub fn with_clock(rate_limiter: RateLimiter, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Store::new(),
            rate_limiter,
            clock,
        }
    }
}
