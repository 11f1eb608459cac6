use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Courtesy gate awaited before every outbound request.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Wait until the next request may be issued
    async fn acquire(&self);
}

/// Sleep a fixed interval before every request, regardless of history.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn acquire(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Space requests at least `interval` apart. The first request is not delayed.
#[derive(Debug)]
pub struct MinInterval {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl MinInterval {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RateLimiter for MinInterval {
    async fn acquire(&self) {
        // Held across the sleep so concurrent callers queue up behind each other.
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            tokio::time::sleep_until(previous + self.interval).await;
        }
        *last = Some(Instant::now());
    }
}

/// No delay at all. Used by tests and for endpoints without a published limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl RateLimiter for NoDelay {
    async fn acquire(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps_every_time() {
        let limiter = FixedDelay::new(Duration::from_millis(100));
        let start = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_min_interval_spaces_requests() {
        let limiter = MinInterval::new(Duration::from_millis(100));
        let start = Instant::now();

        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(100));

        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_min_interval_skips_wait_after_idle() {
        let limiter = MinInterval::new(Duration::from_millis(100));
        limiter.acquire().await;

        tokio::time::sleep(Duration::from_millis(500)).await;
        let before = Instant::now();
        limiter.acquire().await;

        assert!(before.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test]
    async fn test_no_delay_returns_immediately() {
        let start = Instant::now();
        NoDelay.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
