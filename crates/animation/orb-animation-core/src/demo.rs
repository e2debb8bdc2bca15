//! Local activity generator for running the orb without a host signal.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seconds between new activity targets.
pub const DEMO_INTERVAL: f64 = 0.8;
const SPEAKING_PROBABILITY: f64 = 0.6;

/// Alternates between "speaking" bursts and quiet stretches.
#[derive(Debug, Clone)]
pub struct DemoActivityDriver<R = ChaCha8Rng> {
    rng: R,
    last_change: Option<f64>,
}

impl DemoActivityDriver<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> DemoActivityDriver<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            last_change: None,
        }
    }

    /// New activity target when the interval has elapsed (or on the first poll).
    pub fn poll(&mut self, now: f64) -> Option<f64> {
        if let Some(last) = self.last_change {
            if now - last < DEMO_INTERVAL {
                return None;
            }
        }
        self.last_change = Some(now);
        let value = if self.rng.random_bool(SPEAKING_PROBABILITY) {
            0.4 + self.rng.random::<f64>() * 0.6
        } else {
            self.rng.random::<f64>() * 0.15
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polls_on_interval() {
        let mut d = DemoActivityDriver::seeded(5);
        assert!(d.poll(0.0).is_some());
        assert!(d.poll(0.5).is_none());
        assert!(d.poll(0.8).is_some());
        assert!(d.poll(1.0).is_none());
    }

    #[test]
    fn values_fall_in_speaking_or_quiet_bands() {
        let mut d = DemoActivityDriver::seeded(17);
        let mut speaking = 0;
        for i in 0..500 {
            let v = d.poll(f64::from(i)).unwrap();
            assert!((0.0..1.0).contains(&v));
            assert!(v < 0.15 || v >= 0.4, "value {v} between bands");
            if v >= 0.4 {
                speaking += 1;
            }
        }
        assert!((200..400).contains(&speaking), "speaking {speaking}");
    }
}
