//! Token-bucket rate limiting for anonymous endpoints.
//!
//! Buckets are kept in memory per caller key and refill continuously, so a
//! "3 per hour" policy admits a burst of 3 and then one request every 20
//! minutes.

use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::Mutex;

/// Bucket sizing for one endpoint policy.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Maximum burst size (and steady-state ceiling)
    pub capacity: f64,
    /// Tokens restored per second
    pub refill_per_sec: f64,
}

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Per-key token buckets behind one policy.
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl RateLimiter {
    /// Creates a limiter with the given policy.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Takes one token for `key`, reporting whether the request may proceed.
    pub async fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut lock = self.buckets.lock().await;
        let bucket = lock.entry(key.to_string()).or_insert_with(|| Bucket {
            tokens: self.config.capacity,
            last_refill: now,
        });
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.last_refill = now;
        bucket.tokens =
            (bucket.tokens + elapsed * self.config.refill_per_sec).min(self.config.capacity);
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(capacity: f64, refill_per_sec: f64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            capacity,
            refill_per_sec,
        })
    }

    #[tokio::test]
    async fn test_burst_up_to_capacity_then_denied() {
        let limiter = limiter(3.0, 0.0);
        for _ in 0..3 {
            assert!(limiter.allow("1.2.3.4").await);
        }
        assert!(!limiter.allow("1.2.3.4").await);
        assert!(!limiter.allow("1.2.3.4").await);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = limiter(1.0, 0.0);
        assert!(limiter.allow("1.2.3.4").await);
        assert!(!limiter.allow("1.2.3.4").await);
        assert!(limiter.allow("5.6.7.8").await);
    }

    #[tokio::test]
    async fn test_tokens_refill_over_time() {
        let limiter = limiter(1.0, 1000.0);
        assert!(limiter.allow("1.2.3.4").await);
        assert!(!limiter.allow("1.2.3.4").await);
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(limiter.allow("1.2.3.4").await);
    }

    #[tokio::test]
    async fn test_refill_never_exceeds_capacity() {
        let limiter = limiter(2.0, 1000.0);
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(limiter.allow("k").await);
        assert!(limiter.allow("k").await);
        assert!(!limiter.allow("k").await);
    }
}
