//! Error types for pattern validation and the command path.

/// Reasons a breathing pattern is rejected by `start`.
///
/// A rejected pattern never mutates the session and never emits an event.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PatternError {
    /// The pattern contains no phases.
    #[error("pattern has no phases")]
    EmptyPattern,

    /// The phase kind string is not one of the known kinds.
    #[error("phase {index}: unknown phase kind '{kind}'")]
    UnknownPhaseKind { index: usize, kind: String },

    /// Duration is zero, negative or not finite.
    #[error("phase {index}: duration must be positive and finite, got {duration}")]
    InvalidDuration { index: usize, duration: f64 },

    /// Target scale is zero, negative or not finite.
    #[error("phase {index}: target scale must be positive and finite, got {target_scale}")]
    InvalidTargetScale { index: usize, target_scale: f64 },

    /// Cycle count was supplied but is not a positive integer.
    #[error("cycle count must be positive, got {cycles}")]
    InvalidCycles { cycles: i64 },

    /// The pattern JSON could not be decoded.
    #[error("malformed pattern: {reason}")]
    Malformed { reason: String },
}

impl PatternError {
    /// Index of the offending phase, when the error is tied to one.
    pub fn phase_index(&self) -> Option<usize> {
        match self {
            Self::UnknownPhaseKind { index, .. }
            | Self::InvalidDuration { index, .. }
            | Self::InvalidTargetScale { index, .. } => Some(*index),
            Self::EmptyPattern | Self::InvalidCycles { .. } | Self::Malformed { .. } => None,
        }
    }
}

impl From<serde_json::Error> for PatternError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed {
            reason: err.to_string(),
        }
    }
}

/// Errors surfaced by [`crate::ContextHandle`] commands.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The owning `AnimationContext` has been dropped.
    #[error("animation context is no longer running")]
    Disconnected,
}
