//! Minimum-interval rate limiting for outbound requests.

use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::trace;

/// Default rate limit: 10 requests per second (SEC requirement)
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Enforces a minimum wall-clock interval between successive requests.
///
/// The limiter owns the timestamp of the last request. Construct one per
/// run and hand it to the client that issues the requests.
#[derive(Debug)]
pub struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    /// Creates a limiter that has not seen any request yet.
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    /// The configured minimum interval.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Blocks until the minimum interval has passed since the last request,
    /// then records the current time as the last request.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                trace!(?remaining, "Rate limiting request");
                sleep(remaining).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
