use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Riot personal keys allow 20 requests per second.
pub const REQUESTS_PER_SECOND: u32 = 20;
pub const MAX_RETRIES: u32 = 3;

/// Process-wide pacing for every call made toward the provider.
pub struct ApiRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    requests_made: AtomicU64,
}

impl ApiRateLimiter {
    pub fn new(per_second: u32) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(per_second.max(1)).unwrap_or(NonZeroU32::MIN));
        ApiRateLimiter {
            limiter: RateLimiter::direct(quota),
            requests_made: AtomicU64::new(0),
        }
    }

    /// Waits until a request slot is available and records the request.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
        self.requests_made.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_made(&self) -> u64 {
        self.requests_made.load(Ordering::Relaxed)
    }
}

impl Default for ApiRateLimiter {
    fn default() -> Self {
        Self::new(REQUESTS_PER_SECOND)
    }
}

/// Linear back-off after a 429: 2s, 4s, 6s.
pub fn retry_delay(retry_count: u32) -> Duration {
    Duration::from_millis(2000 * (retry_count as u64 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_linearly() {
        assert_eq!(retry_delay(0), Duration::from_secs(2));
        assert_eq!(retry_delay(2), Duration::from_secs(6));
    }

    #[tokio::test]
    async fn counts_acquired_slots() {
        let limiter = ApiRateLimiter::new(100);
        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(limiter.requests_made(), 2);
    }
}
