//! Pacing of reconnection attempts.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces jittered, doubling delays between reconnection attempts.
///
/// Each failed attempt doubles the window up to the cap; a successful
/// write resets it to the base.
pub struct ReconnectDelay {
    base: Duration,
    cap: Duration,
    current: Duration,
    rng: StdRng,
}

impl ReconnectDelay {
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            base,
            cap,
            current: base,
            rng: StdRng::from_entropy(),
        }
    }

    /// Next delay to sleep before retrying, drawn from the upper half of
    /// the current window.
    pub fn next_delay(&mut self) -> Duration {
        let window_ms = self.current.as_millis().min(u128::from(u64::MAX)) as u64;
        let delay_ms = if window_ms <= 1 {
            window_ms
        } else {
            self.rng.gen_range(window_ms / 2..=window_ms)
        };
        self.current = self.current.saturating_mul(2).min(self.cap);
        Duration::from_millis(delay_ms)
    }

    /// Reset the window after a successful write.
    pub fn reset(&mut self) {
        self.current = self.base;
    }
}
