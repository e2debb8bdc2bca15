//! Core configuration for orb-animation-core.

use serde::{Deserialize, Serialize};

/// Which visual the context is driving; selects wobble tuning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualVariant {
    BreathingExercise,
    Orb,
}

/// Per-instance tuning. Every field has a default so partial JSON is accepted.
/// Keys are camelCase, like the rest of the host-facing JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Blob vertex count (K).
    pub point_count: usize,
    /// User wobble intensity in [0, 1], multiplied with the phase intensity.
    pub wobble_intensity: f64,
    pub wobble: WobbleConfig,
    pub activity: ActivityConfig,
    pub breathing: BreathingConfig,
    /// Seed for wobble and demo randomness. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    /// Generate activity locally instead of waiting for host writes.
    pub demo_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            point_count: 8,
            wobble_intensity: 1.0,
            wobble: WobbleConfig::default(),
            activity: ActivityConfig::default(),
            breathing: BreathingConfig::default(),
            rng_seed: None,
            demo_mode: false,
        }
    }
}

impl Config {
    pub fn for_variant(variant: VisualVariant) -> Self {
        Self {
            wobble: WobbleConfig::for_variant(variant),
            ..Self::default()
        }
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Builder-style seed override, handy for deterministic tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WobbleConfig {
    /// Maximum radial offset at full phase and user intensity.
    pub base_amplitude: f64,
    /// Seconds between target regenerations.
    pub regen_interval: f64,
    /// Per-second approach rate of offsets toward targets.
    pub interp_speed: f64,
}

impl Default for WobbleConfig {
    fn default() -> Self {
        Self::for_variant(VisualVariant::BreathingExercise)
    }
}

impl WobbleConfig {
    pub fn for_variant(variant: VisualVariant) -> Self {
        match variant {
            VisualVariant::BreathingExercise => Self {
                base_amplitude: 0.18,
                regen_interval: 1.8,
                interp_speed: 1.8,
            },
            VisualVariant::Orb => Self {
                base_amplitude: 0.08,
                regen_interval: 0.8,
                interp_speed: 4.0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityConfig {
    /// Per-second convergence rate of current activity toward the target.
    pub smoothing_rate: f64,
    pub source: ActivitySource,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            smoothing_rate: 6.0,
            source: ActivitySource::Shared,
        }
    }
}

/// Where the orb's dynamic parameters come from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivitySource {
    /// Derived every frame from the smoothed external activity signal.
    Shared,
    /// Fixed values supplied by the host.
    Static(StaticParams),
}

/// Host-supplied parameters used when activity is not shared.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticParams {
    pub speed: f64,
    pub breathing_intensity: f64,
    pub breathing_speed: f64,
    pub core_glow_intensity: f64,
}

impl Default for StaticParams {
    fn default() -> Self {
        Self {
            speed: 60.0,
            breathing_intensity: 0.0,
            breathing_speed: 0.25,
            core_glow_intensity: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BreathingConfig {
    /// Peak scale deviation at full intensity.
    pub amplitude: f64,
    /// Floor on breathing speed (cycles per second).
    pub min_speed: f64,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.17,
            min_speed: 0.01,
        }
    }
}
