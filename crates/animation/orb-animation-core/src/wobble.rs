//! Slowly drifting per-vertex radial offsets for the organic blob outline.
//!
//! Targets are regenerated every `regen_interval` seconds (or immediately
//! when all targets are zero); offsets chase the targets each frame. Targets
//! and offsets both stay within `base_amplitude * phase_intensity *
//! user_intensity`, so a lower intensity bounds the outline on the same frame.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::WobbleConfig;
use crate::easing::{approach_factor, clamp01};

#[derive(Debug, Clone)]
pub struct WobbleGenerator<R = ChaCha8Rng> {
    cfg: WobbleConfig,
    offsets: Vec<f64>,
    targets: Vec<f64>,
    last_target_regen: Option<f64>,
    last_interp: Option<f64>,
    rng: R,
}

impl WobbleGenerator<ChaCha8Rng> {
    /// Deterministic generator for a given seed.
    pub fn seeded(point_count: usize, cfg: WobbleConfig, seed: u64) -> Self {
        Self::with_rng(point_count, cfg, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Generator seeded from the thread-local OS-backed RNG.
    pub fn from_entropy(point_count: usize, cfg: WobbleConfig) -> Self {
        Self::with_rng(point_count, cfg, ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> WobbleGenerator<R> {
    pub fn with_rng(point_count: usize, cfg: WobbleConfig, rng: R) -> Self {
        Self {
            cfg,
            offsets: vec![0.0; point_count],
            targets: vec![0.0; point_count],
            last_target_regen: None,
            last_interp: None,
            rng,
        }
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.offsets.len()
    }

    /// Resize to `point_count` vertices. A change resets all offsets and targets to zero.
    pub fn set_point_count(&mut self, point_count: usize) {
        if point_count == self.offsets.len() {
            return;
        }
        log::debug!(
            "wobble point count {} -> {point_count}",
            self.offsets.len()
        );
        self.offsets = vec![0.0; point_count];
        self.targets = vec![0.0; point_count];
    }

    #[inline]
    pub fn config(&self) -> &WobbleConfig {
        &self.cfg
    }

    /// Largest magnitude any offset or target may take for these intensities.
    pub fn max_offset(&self, phase_intensity: f64, user_intensity: f64) -> f64 {
        self.cfg.base_amplitude.max(0.0) * clamp01(phase_intensity) * clamp01(user_intensity)
    }

    #[inline]
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    #[inline]
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Advance to `now`: regenerate targets when due, then ease offsets toward them.
    pub fn update(&mut self, now: f64, phase_intensity: f64, user_intensity: f64) -> &[f64] {
        let max_offset = self.max_offset(phase_intensity, user_intensity);

        let due = match self.last_target_regen {
            None => true,
            Some(last) => now - last > self.cfg.regen_interval,
        };
        if due || self.targets.iter().all(|t| *t == 0.0) {
            self.last_target_regen = Some(now);
            self.regenerate_targets(max_offset);
        } else {
            for t in &mut self.targets {
                *t = t.clamp(-max_offset, max_offset);
            }
        }

        let dt = match self.last_interp.replace(now) {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        let factor = approach_factor(dt, self.cfg.interp_speed);
        for (offset, target) in self.offsets.iter_mut().zip(&self.targets) {
            let eased = *offset + (target - *offset) * factor;
            *offset = eased.clamp(-max_offset, max_offset);
        }
        &self.offsets
    }

    fn regenerate_targets(&mut self, max_offset: f64) {
        let k = self.targets.len();
        for (i, target) in self.targets.iter_mut().enumerate() {
            let point_phase = TAU * i as f64 / k as f64;
            let wave1 = (2.0 * point_phase + self.rng.random::<f64>()).sin() * 0.6;
            let wave2 = (3.0 * point_phase + self.rng.random::<f64>()).cos() * 0.4;
            let base = self.rng.random_range(-max_offset..=max_offset);
            *target = base * (1.0 + wave1 + wave2) * 0.5;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> WobbleConfig {
        WobbleConfig::default()
    }

    #[test]
    fn cold_start_generates_targets() {
        let mut w = WobbleGenerator::seeded(8, cfg(), 7);
        w.update(0.0, 1.0, 1.0);
        assert!(w.targets().iter().any(|t| *t != 0.0));
        // first frame only seeds the interpolation clock
        assert!(w.offsets().iter().all(|o| *o == 0.0));
    }

    #[test]
    fn offsets_move_toward_targets() {
        let mut w = WobbleGenerator::seeded(6, cfg(), 3);
        w.update(0.0, 1.0, 1.0);
        let targets = w.targets().to_vec();
        w.update(0.1, 1.0, 1.0);
        for (o, t) in w.offsets().iter().zip(&targets) {
            assert!((o - t * 0.18).abs() < 1e-12);
        }
    }

    #[test]
    fn point_count_change_resets() {
        let mut w = WobbleGenerator::seeded(8, cfg(), 1);
        w.update(0.0, 1.0, 1.0);
        w.update(0.5, 1.0, 1.0);
        w.set_point_count(5);
        assert_eq!(w.offsets(), &[0.0; 5]);
        assert_eq!(w.targets(), &[0.0; 5]);
    }

    #[test]
    fn same_seed_same_targets() {
        let mut a = WobbleGenerator::seeded(8, cfg(), 42);
        let mut b = WobbleGenerator::seeded(8, cfg(), 42);
        a.update(0.0, 1.0, 1.0);
        b.update(0.0, 1.0, 1.0);
        assert_eq!(a.targets(), b.targets());
    }

    #[test]
    fn zero_intensity_keeps_blob_round() {
        let mut w = WobbleGenerator::seeded(8, cfg(), 9);
        for i in 0..50 {
            w.update(f64::from(i) * 0.1, 1.0, 0.0);
        }
        assert!(w.offsets().iter().all(|o| *o == 0.0));
    }

    #[test]
    fn intensity_drop_bounds_offsets_on_the_same_frame() {
        let mut w = WobbleGenerator::seeded(8, cfg(), 5);
        for i in 0..120 {
            w.update(f64::from(i) / 60.0, 1.0, 1.0);
        }
        for i in 120..130 {
            w.update(f64::from(i) / 60.0, 0.3, 1.0);
            let bound = w.max_offset(0.3, 1.0);
            for o in w.offsets() {
                assert!(o.abs() <= bound, "offset {o} beyond {bound}");
            }
        }
    }

    #[test]
    fn lowering_intensity_clamps_targets() {
        let mut w = WobbleGenerator::seeded(8, cfg(), 11);
        w.update(0.0, 1.0, 1.0);
        w.update(0.1, 0.3, 1.0);
        let bound = w.max_offset(0.3, 1.0);
        assert!(w.targets().iter().all(|t| t.abs() <= bound));
    }
}
