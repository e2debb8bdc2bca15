//! Punchy breathing scale driven by a cumulative phase accumulator.
//!
//! The phase integrates `dt * speed * 2π` instead of using `now * speed`, so
//! the speed may change between samples without a discontinuity.

use std::f64::consts::TAU;

use crate::config::BreathingConfig;
use crate::easing::clamp01;

/// Fast attack on the positive half-wave, slower release on the negative one.
#[inline]
pub fn punchy_wave(phase: f64) -> f64 {
    let wave = phase.sin();
    if wave >= 0.0 {
        wave.powf(0.6)
    } else {
        -wave.abs().powf(1.4)
    }
}

#[derive(Debug, Clone)]
pub struct BreathingScaleComputer {
    cfg: BreathingConfig,
    phase: f64,
    last_sample_time: Option<f64>,
}

impl Default for BreathingScaleComputer {
    fn default() -> Self {
        Self::new(BreathingConfig::default())
    }
}

impl BreathingScaleComputer {
    pub fn new(cfg: BreathingConfig) -> Self {
        Self {
            cfg,
            phase: 0.0,
            last_sample_time: None,
        }
    }

    /// Accumulated phase in radians.
    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Scale at `now` for the given speed (cycles/s) and intensity.
    ///
    /// Zero intensity returns exactly 1 and leaves the phase frozen.
    pub fn sample(&mut self, now: f64, speed: f64, intensity: f64) -> f64 {
        let dt = match self.last_sample_time.replace(now) {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        let intensity = clamp01(intensity);
        if intensity == 0.0 {
            return 1.0;
        }
        let speed = speed.max(self.cfg.min_speed);
        self.phase = (self.phase + dt * speed * TAU) % TAU;
        1.0 + intensity * self.cfg.amplitude * punchy_wave(self.phase)
    }
}
