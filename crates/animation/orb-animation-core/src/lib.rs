//! Orb Animation Core (renderer-agnostic)
//!
//! Procedural animation for breathing-exercise and voice-activity orb visuals:
//! a breathing session state machine, activity smoothing, a punchy breathing
//! scale, per-vertex wobble and the cubic-Bézier blob outline built from it.
//!
//! Everything is driven by one monotonic timestamp per frame through
//! [`AnimationContext::update`]; hosts send commands through a
//! [`ContextHandle`] and read [`Outputs`] back. Nothing here renders.

pub mod activity;
pub mod breathing;
pub mod config;
pub mod context;
pub mod demo;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod inputs;
pub mod outputs;
pub mod pattern;
pub mod presets;
pub mod session;
pub mod wobble;

// Re-exports for hosts and renderers
pub use activity::{ActivityAnimator, ActivityParams, ActivityTarget, ROTATION_SPEED};
pub use breathing::{punchy_wave, BreathingScaleComputer};
pub use config::{
    ActivityConfig, ActivitySource, BreathingConfig, Config, StaticParams, VisualVariant,
    WobbleConfig,
};
pub use context::{AnimationContext, ContextHandle};
pub use demo::DemoActivityDriver;
pub use error::{CommandError, PatternError};
pub use geometry::{
    build_blob_path, inner_blob_path, tangent_coefficient, BlobPath, CubicSegment, Point,
};
pub use inputs::{Command, PendingCommands};
pub use outputs::{EventSink, Frame, Outputs, SessionEvent};
pub use pattern::{
    parse_pattern_json, pattern_from_json_value, BreathingPattern, CycleLimit, PatternSpec,
    PhaseDescriptor, PhaseKind, PhaseSpec,
};
pub use presets::Preset;
pub use session::{PhaseSample, PhaseStateMachine, SessionState};
pub use wobble::WobbleGenerator;
