use std::{collections::VecDeque, time::Duration};

use tokio::time::{Instant, sleep_until};

/// Sliding-window rate limiter for outbound Deezer requests.
///
/// Keeps the instants of past admissions and guarantees that no more than
/// `max_requests` admissions fall into any trailing window of `period`.
///
/// The limiter is owned by the Deezer client wrapper; all calls run on one
/// task, so no lock is needed.
pub struct RateLimiter {
    max_requests: usize,
    period: Duration,
    admitted: VecDeque<Instant>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per trailing `period`.
    ///
    /// Rejects `max_requests == 0`, which would block every caller forever.
    pub fn new(max_requests: usize, period: Duration) -> Result<Self, String> {
        if max_requests == 0 {
            return Err("rate limiter must allow at least one request per window".to_string());
        }

        Ok(Self {
            max_requests,
            period,
            admitted: VecDeque::new(),
        })
    }

    /// Waits until one more request fits into the trailing window, then
    /// records it.
    ///
    /// While the window is full, the oldest admission either has expired and
    /// is evicted, or the task sleeps until it does and re-checks.
    pub async fn admit(&mut self) {
        while self.admitted.len() >= self.max_requests {
            let Some(&oldest) = self.admitted.front() else {
                break;
            };

            if oldest.elapsed() >= self.period {
                self.admitted.pop_front();
            } else {
                sleep_until(oldest + self.period).await;
            }
        }

        self.admitted.push_back(Instant::now());
    }
}
