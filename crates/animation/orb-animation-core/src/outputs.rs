//! Output contracts from the animation core.
//!
//! A [`Frame`] carries the numeric parameters for one render frame; session
//! transitions are reported separately as [`SessionEvent`]s. Renderers read
//! the frame, hosts forward the events.

use serde::{Deserialize, Serialize};

use crate::pattern::PhaseKind;

/// Discrete signals emitted by the phase machine, once per transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum SessionEvent {
    #[serde(rename_all = "camelCase")]
    PhaseChanged {
        phase_kind: PhaseKind,
        label: String,
        phase_index: usize,
        cycle_index: u32,
    },
    #[serde(rename_all = "camelCase")]
    ExerciseCompleted {
        total_cycles: u32,
        total_duration_seconds: f64,
    },
}

/// Receiver of session events. The core writes into a sink and never calls
/// back into rendering code.
pub trait EventSink {
    fn emit(&mut self, event: SessionEvent);
}

impl EventSink for Vec<SessionEvent> {
    #[inline]
    fn emit(&mut self, event: SessionEvent) {
        self.push(event);
    }
}

/// Per-frame parameters consumed by the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Phase scale while a session is active, otherwise the activity breathing scale.
    pub scale: f64,
    pub ring_progress: f64,
    pub label: String,
    pub is_active: bool,
    pub vertex_offsets: Vec<f64>,
    pub glow_intensity: f64,
    pub rotation_speed: f64,
    pub breathing_scale: f64,
    pub activity: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            scale: 1.0,
            ring_progress: 0.0,
            label: String::new(),
            is_active: false,
            vertex_offsets: Vec::new(),
            glow_intensity: 0.0,
            rotation_speed: 0.0,
            breathing_scale: 1.0,
            activity: 0.0,
        }
    }
}

/// Radius of the outer blob for a view whose shorter half-side is `half_extent`.
pub const BLOB_RADIUS_FRACTION: f64 = 0.7;

impl Frame {
    /// Outer blob base radius for the current scale.
    #[inline]
    pub fn blob_radius(&self, half_extent: f64) -> f64 {
        self.scale * BLOB_RADIUS_FRACTION * half_extent
    }
}

/// Outputs returned by `AnimationContext::update()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    pub frame: Frame,
    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// True when this frame carries no events.
    #[inline]
    pub fn is_quiet(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_camel_case_fields() {
        let ev = SessionEvent::ExerciseCompleted {
            total_cycles: 4,
            total_duration_seconds: 16.0,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["exerciseCompleted"]["totalCycles"], 4);

        let ev = SessionEvent::PhaseChanged {
            phase_kind: PhaseKind::HoldOut,
            label: "Hold".into(),
            phase_index: 3,
            cycle_index: 1,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["phaseChanged"]["phaseKind"], "holdOut");
    }

    #[test]
    fn vec_is_an_event_sink() {
        let mut sink: Vec<SessionEvent> = Vec::new();
        sink.emit(SessionEvent::ExerciseCompleted {
            total_cycles: 1,
            total_duration_seconds: 1.0,
        });
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn blob_radius_follows_scale() {
        let frame = Frame {
            scale: 1.2,
            ..Frame::default()
        };
        assert!((frame.blob_radius(100.0) - 84.0).abs() < 1e-9);
    }
}
