//! Activity smoothing and the parameters derived from it.
//!
//! The host writes a target activity in [0, 1] (e.g. "is speaking") at any
//! rate and from any thread; the frame sampler eases toward it once per frame.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::StaticParams;
use crate::easing::{approach_factor, clamp01};

/// Rotation speed of the glow layers. Rotations are keyed off cumulative
/// elapsed time, so this must never change with activity.
pub const ROTATION_SPEED: f64 = 18.0;

/// Lock-free cell holding the latest activity target as `f64` bits.
#[derive(Debug, Default)]
pub struct ActivityTarget(AtomicU64);

impl ActivityTarget {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(clamp01(value).to_bits()))
    }

    /// Clamp to [0, 1] and publish. NaN is stored as 0.
    #[inline]
    pub fn store(&self, value: f64) {
        self.0.store(clamp01(value).to_bits(), Ordering::Release);
    }

    #[inline]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }
}

/// Smooths the shared target into a per-frame `current` value.
#[derive(Debug)]
pub struct ActivityAnimator {
    target: Arc<ActivityTarget>,
    current: f64,
    last_sample_time: Option<f64>,
    smoothing_rate: f64,
}

impl ActivityAnimator {
    pub fn new(smoothing_rate: f64) -> Self {
        Self::with_target(Arc::new(ActivityTarget::default()), smoothing_rate)
    }

    pub fn with_target(target: Arc<ActivityTarget>, smoothing_rate: f64) -> Self {
        Self {
            target,
            current: 0.0,
            last_sample_time: None,
            smoothing_rate,
        }
    }

    /// Shared handle for writers on other threads.
    pub fn target_cell(&self) -> Arc<ActivityTarget> {
        Arc::clone(&self.target)
    }

    #[inline]
    pub fn set_target(&self, value: f64) {
        self.target.store(value);
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target.load()
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Advance the smoothed value to `now`. The first call only seeds the clock.
    pub fn sample(&mut self, now: f64) -> f64 {
        let dt = match self.last_sample_time.replace(now) {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        let factor = approach_factor(dt, self.smoothing_rate);
        self.current = clamp01(self.current + (self.target() - self.current) * factor);
        self.current
    }

    /// Derived parameters for the current value.
    #[inline]
    pub fn params(&self) -> ActivityParams {
        ActivityParams::from_activity(self.current)
    }
}

/// Animation parameters derived from activity; recomputed each frame, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityParams {
    pub rotation_speed: f64,
    /// Breathing cycles per second.
    pub breathing_speed: f64,
    pub breathing_intensity: f64,
    pub glow_intensity: f64,
}

impl ActivityParams {
    pub fn from_activity(activity: f64) -> Self {
        let a = clamp01(activity);
        Self {
            rotation_speed: ROTATION_SPEED,
            breathing_speed: 0.03 + a * 0.25,
            // breathing only kicks in above 0.2
            breathing_intensity: (a - 0.2).max(0.0) * 1.25,
            glow_intensity: 0.08 + a * 1.8,
        }
    }

    pub fn from_static(params: &StaticParams) -> Self {
        Self {
            rotation_speed: params.speed,
            breathing_speed: params.breathing_speed,
            breathing_intensity: params.breathing_intensity,
            glow_intensity: params.core_glow_intensity,
        }
    }
}
