//! Breathing pattern model and the host wire format.
//!
//! Hosts send patterns as JSON:
//!
//! ```json
//! { "phases": [ { "phase": "inhale", "duration": 4000, "targetScale": 1.35, "label": "Breathe In" } ],
//!   "cycles": 4 }
//! ```
//!
//! - `duration` is in milliseconds on the wire and stored in seconds.
//! - `cycles` omitted (or null) means the exercise repeats forever.
//! - `kind` and `durationMs` are accepted as aliases of `phase` and `duration`.

use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// One labeled segment kind of a breathing exercise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseKind {
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
    Idle,
}

impl PhaseKind {
    pub const ALL: [PhaseKind; 5] = [
        PhaseKind::Inhale,
        PhaseKind::HoldIn,
        PhaseKind::Exhale,
        PhaseKind::HoldOut,
        PhaseKind::Idle,
    ];

    /// Wire name of this kind.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inhale => "inhale",
            Self::HoldIn => "holdIn",
            Self::Exhale => "exhale",
            Self::HoldOut => "holdOut",
            Self::Idle => "idle",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Blob wobble intensity while this phase is active.
    #[inline]
    pub fn wobble_intensity(&self) -> f64 {
        match self {
            Self::Inhale | Self::Exhale => 1.0,
            Self::HoldIn | Self::HoldOut => 0.3,
            Self::Idle => 0.5,
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one phase. Durations are in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseDescriptor {
    pub kind: PhaseKind,
    pub duration: f64,
    pub target_scale: f64,
    pub label: String,
}

impl PhaseDescriptor {
    pub fn new(kind: PhaseKind, duration: f64, target_scale: f64, label: impl Into<String>) -> Self {
        Self {
            kind,
            duration,
            target_scale,
            label: label.into(),
        }
    }

    /// Check duration and scale; `index` is only used for error reporting.
    pub fn validate(&self, index: usize) -> Result<(), PatternError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(PatternError::InvalidDuration {
                index,
                duration: self.duration,
            });
        }
        if !(self.target_scale.is_finite() && self.target_scale > 0.0) {
            return Err(PatternError::InvalidTargetScale {
                index,
                target_scale: self.target_scale,
            });
        }
        Ok(())
    }
}

/// How many full traversals of the phase list make up an exercise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleLimit {
    Finite(u32),
    Infinite,
}

impl CycleLimit {
    /// Host convention: a missing cycle count means "repeat forever".
    pub fn from_wire(cycles: Option<i64>) -> Result<Self, PatternError> {
        match cycles {
            None => Ok(Self::Infinite),
            Some(n) if n > 0 => u32::try_from(n)
                .map(Self::Finite)
                .map_err(|_| PatternError::InvalidCycles { cycles: n }),
            Some(n) => Err(PatternError::InvalidCycles { cycles: n }),
        }
    }

    #[inline]
    pub fn is_reached(&self, completed_cycles: u32) -> bool {
        match self {
            Self::Finite(n) => completed_cycles >= *n,
            Self::Infinite => false,
        }
    }

    pub fn as_option(&self) -> Option<u32> {
        match self {
            Self::Finite(n) => Some(*n),
            Self::Infinite => None,
        }
    }
}

/// A validated, non-empty sequence of phases plus its cycle limit.
#[derive(Clone, Debug, PartialEq)]
pub struct BreathingPattern {
    phases: Vec<PhaseDescriptor>,
    cycles: CycleLimit,
}

impl BreathingPattern {
    pub fn new(phases: Vec<PhaseDescriptor>, cycles: CycleLimit) -> Result<Self, PatternError> {
        if phases.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        for (index, phase) in phases.iter().enumerate() {
            phase.validate(index)?;
        }
        if let CycleLimit::Finite(0) = cycles {
            return Err(PatternError::InvalidCycles { cycles: 0 });
        }
        Ok(Self { phases, cycles })
    }

    /// Build from phases known to be valid (built-in presets).
    pub(crate) fn from_trusted(phases: Vec<PhaseDescriptor>, cycles: CycleLimit) -> Self {
        debug_assert!(Self::new(phases.clone(), cycles).is_ok());
        Self { phases, cycles }
    }

    #[inline]
    pub fn phases(&self) -> &[PhaseDescriptor] {
        &self.phases
    }

    #[inline]
    pub fn cycles(&self) -> CycleLimit {
        self.cycles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false for a constructed pattern; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Seconds for one traversal of the phase list.
    pub fn cycle_duration(&self) -> f64 {
        self.phases.iter().map(|p| p.duration).sum()
    }

    /// Nominal exercise length in seconds; `None` for infinite patterns.
    pub fn total_duration(&self) -> Option<f64> {
        self.cycles
            .as_option()
            .map(|n| self.cycle_duration() * f64::from(n))
    }

    /// Wire representation (durations back in milliseconds).
    pub fn to_spec(&self) -> PatternSpec {
        PatternSpec {
            phases: self
                .phases
                .iter()
                .map(|p| PhaseSpec {
                    phase: p.kind.as_str().to_string(),
                    duration: p.duration * 1000.0,
                    target_scale: p.target_scale,
                    label: p.label.clone(),
                })
                .collect(),
            cycles: self.cycles.as_option().map(i64::from),
        }
    }
}

/// Host-facing pattern shape, prior to validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub phases: Vec<PhaseSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycles: Option<i64>,
}

/// Host-facing phase shape; `duration` is in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSpec {
    #[serde(alias = "kind")]
    pub phase: String,
    #[serde(alias = "durationMs")]
    pub duration: f64,
    pub target_scale: f64,
    #[serde(default)]
    pub label: String,
}

impl PatternSpec {
    /// Validate and convert into a [`BreathingPattern`].
    pub fn to_pattern(&self) -> Result<BreathingPattern, PatternError> {
        let mut phases = Vec::with_capacity(self.phases.len());
        for (index, raw) in self.phases.iter().enumerate() {
            let kind = PhaseKind::parse(&raw.phase).ok_or_else(|| PatternError::UnknownPhaseKind {
                index,
                kind: raw.phase.clone(),
            })?;
            phases.push(PhaseDescriptor {
                kind,
                duration: raw.duration / 1000.0,
                target_scale: raw.target_scale,
                label: raw.label.clone(),
            });
        }
        let cycles = CycleLimit::from_wire(self.cycles)?;
        BreathingPattern::new(phases, cycles).map_err(|err| match err {
            // report the wire value, not the converted one
            PatternError::InvalidDuration { index, .. } => PatternError::InvalidDuration {
                index,
                duration: self.phases[index].duration,
            },
            other => other,
        })
    }
}

impl TryFrom<&PatternSpec> for BreathingPattern {
    type Error = PatternError;

    fn try_from(spec: &PatternSpec) -> Result<Self, Self::Error> {
        spec.to_pattern()
    }
}

/// Parse and validate a host pattern JSON string.
pub fn parse_pattern_json(s: &str) -> Result<BreathingPattern, PatternError> {
    let spec: PatternSpec = serde_json::from_str(s)?;
    spec.to_pattern()
}

/// Same as [`parse_pattern_json`] for an already-decoded JSON value.
pub fn pattern_from_json_value(value: serde_json::Value) -> Result<BreathingPattern, PatternError> {
    let spec: PatternSpec = serde_json::from_value(value)?;
    spec.to_pattern()
}
