//! Request pacing
//!
//! This module handles:
//! - A minimum-interval gate every request passes through
//! - Jittered pauses at row, page and category boundaries

use crate::config::{DelayRange, ThrottleConfig};
use rand::Rng;
use std::time::{Duration, Instant};

/// Paces requests sent to the target site
///
/// The throttle is owned by the fetcher, so every request goes through the
/// gate. The pause helpers are used by the listing walker and the
/// coordinator between units of work.
#[derive(Debug, Clone)]
pub struct Throttle {
    /// Minimum time between two requests
    min_interval: Duration,

    /// When the last request was let through
    last_request: Option<Instant>,

    page_delay: DelayRange,
    category_delay: DelayRange,
    row_delay: Option<DelayRange>,
}

impl Throttle {
    /// Creates a throttle from configuration
    pub fn new(config: &ThrottleConfig) -> Self {
        Self {
            min_interval: Duration::from_millis(config.min_request_interval_ms),
            last_request: None,
            page_delay: config.page_delay_ms,
            category_delay: config.category_delay_ms,
            row_delay: config.row_delay_ms,
        }
    }

    /// A throttle that never waits
    pub fn disabled() -> Self {
        Self::new(&ThrottleConfig::disabled())
    }

    /// Time left before the gate opens, or `None` if a request may go now
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request?;
        let elapsed = now.duration_since(last);
        if elapsed >= self.min_interval {
            None
        } else {
            Some(self.min_interval - elapsed)
        }
    }

    /// Records that a request was sent
    pub fn record_request(&mut self, now: Instant) {
        self.last_request = Some(now);
    }

    /// Waits until a request may be sent, then records it
    pub async fn acquire(&mut self) {
        if let Some(wait) = self.time_until_next_request(Instant::now()) {
            tracing::trace!("Throttle gate closed, waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
        self.record_request(Instant::now());
    }

    /// Pause after a listing page
    pub async fn page_pause(&self) {
        pause(&self.page_delay).await;
    }

    /// Pause between two categories
    pub async fn category_pause(&self) {
        pause(&self.category_delay).await;
    }

    /// Pause after an extracted row, if configured
    pub async fn row_pause(&self) {
        if let Some(range) = &self.row_delay {
            pause(range).await;
        }
    }
}

/// Draws a pause duration uniformly from the range
pub fn sample_delay(range: &DelayRange) -> Duration {
    if range.max <= range.min {
        return Duration::from_millis(range.min);
    }
    let millis = rand::thread_rng().gen_range(range.min..=range.max);
    Duration::from_millis(millis)
}

async fn pause(range: &DelayRange) {
    let delay = sample_delay(range);
    if !delay.is_zero() {
        tracing::trace!("Pausing for {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gated(min_interval_ms: u64) -> Throttle {
        Throttle::new(&ThrottleConfig {
            min_request_interval_ms: min_interval_ms,
            ..ThrottleConfig::disabled()
        })
    }

    #[test]
    fn test_sample_delay_within_range() {
        let range = DelayRange::new(100, 300);
        for _ in 0..200 {
            let delay = sample_delay(&range);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(300));
        }
    }

    #[test]
    fn test_sample_delay_degenerate_range() {
        assert_eq!(sample_delay(&DelayRange::none()), Duration::ZERO);
        assert_eq!(
            sample_delay(&DelayRange::new(250, 250)),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_gate_open_before_first_request() {
        let throttle = gated(1000);
        assert_eq!(throttle.time_until_next_request(Instant::now()), None);
    }

    #[test]
    fn test_gate_closed_right_after_request() {
        let mut throttle = gated(1000);
        let now = Instant::now();
        throttle.record_request(now);

        let wait = throttle.time_until_next_request(now).unwrap();
        assert_eq!(wait, Duration::from_millis(1000));

        let later = now + Duration::from_millis(1500);
        assert_eq!(throttle.time_until_next_request(later), None);
    }

    #[test]
    fn test_disabled_gate_never_waits() {
        let mut throttle = Throttle::disabled();
        let now = Instant::now();
        throttle.record_request(now);
        assert_eq!(throttle.time_until_next_request(now), None);
    }

    #[tokio::test]
    async fn test_acquire_enforces_interval() {
        let mut throttle = gated(50);
        let start = Instant::now();
        throttle.acquire().await;
        throttle.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
