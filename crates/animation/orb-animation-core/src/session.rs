//! Breathing session state machine.
//!
//! Drives a pattern through its phases and cycles against an external
//! monotonic clock (seconds). Pause and resume shift the stored timestamps
//! rather than freezing a clock, so elapsed-time math never special-cases a
//! pause.
//!
//! Per-phase outputs, with `p` the phase progress:
//!
//! | phase   | scale                                   | ring progress         |
//! |---------|-----------------------------------------|-----------------------|
//! | inhale  | lerp(start, target, easeOutCubic(p))    | easeOutCubic(p)       |
//! | exhale  | lerp(start, target, easeOutCubic(p))    | 1 - easeOutCubic(p)   |
//! | holdIn  | target                                  | 1                     |
//! | holdOut | target                                  | 0                     |
//! | idle    | target                                  | 0                     |

use serde::{Deserialize, Serialize};

use crate::easing::{clamp01, ease_out_cubic, lerp};
use crate::error::PatternError;
use crate::outputs::{EventSink, SessionEvent};
use crate::pattern::{BreathingPattern, CycleLimit, PhaseDescriptor, PhaseKind};

/// Lifecycle of a breathing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Stopped,
    Running,
    Paused,
    /// Terminal until the next `start`.
    Complete,
}

impl SessionState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Complete => "complete",
        }
    }

    /// Running or paused: the renderer shows the session.
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

/// Scale and ring progress for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSample<'a> {
    pub scale: f64,
    pub ring_progress: f64,
    pub label: &'a str,
    pub is_active: bool,
}

const DEFAULT_WOBBLE_INTENSITY: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct PhaseStateMachine {
    pattern: Option<BreathingPattern>,
    state: SessionState,
    phase_index: usize,
    cycle: u32,
    phase_start_time: f64,
    session_start_time: f64,
    pause_time: Option<f64>,
    current_scale: f64,
    start_scale: f64,
    target_scale: f64,
    phase_progress: f64,
    ring_progress: f64,
    wobble_intensity: f64,
}

impl Default for PhaseStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseStateMachine {
    pub fn new() -> Self {
        Self {
            pattern: None,
            state: SessionState::Stopped,
            phase_index: 0,
            cycle: 0,
            phase_start_time: 0.0,
            session_start_time: 0.0,
            pause_time: None,
            current_scale: 1.0,
            start_scale: 1.0,
            target_scale: 1.0,
            phase_progress: 0.0,
            ring_progress: 0.0,
            wobble_intensity: DEFAULT_WOBBLE_INTENSITY,
        }
    }

    /// Validate `phases` and begin a new session at `now`.
    ///
    /// On error the machine is left untouched.
    pub fn start(
        &mut self,
        phases: Vec<PhaseDescriptor>,
        cycles: CycleLimit,
        now: f64,
    ) -> Result<(), PatternError> {
        let pattern = BreathingPattern::new(phases, cycles).inspect_err(|err| {
            log::warn!("rejected breathing pattern: {err}");
        })?;
        self.start_pattern(pattern, now);
        Ok(())
    }

    /// Begin a new session with an already validated pattern.
    pub fn start_pattern(&mut self, pattern: BreathingPattern, now: f64) {
        self.reset();
        let first = &pattern.phases()[0];
        self.target_scale = first.target_scale;
        self.wobble_intensity = first.kind.wobble_intensity();
        log::info!(
            "breathing session started: {} phases, cycles {:?}",
            pattern.len(),
            pattern.cycles()
        );
        self.pattern = Some(pattern);
        self.phase_start_time = now;
        self.session_start_time = now;
        self.state = SessionState::Running;
        self.refresh_outputs();
    }

    /// Running → Paused. Returns whether the transition happened.
    pub fn pause(&mut self, now: f64) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.pause_time = Some(now);
        self.state = SessionState::Paused;
        log::debug!("breathing session paused at {now:.3}");
        true
    }

    /// Paused → Running, shifting the phase and session clocks by the pause length.
    pub fn resume(&mut self, now: f64) -> bool {
        let pause_time = match (self.state, self.pause_time) {
            (SessionState::Paused, Some(t)) => t,
            _ => return false,
        };
        let paused_for = (now - pause_time).max(0.0);
        self.phase_start_time += paused_for;
        self.session_start_time += paused_for;
        self.pause_time = None;
        self.state = SessionState::Running;
        log::debug!("breathing session resumed after {paused_for:.3}s");
        true
    }

    /// Return to `Stopped` from any state. No event is emitted.
    pub fn stop(&mut self) {
        if self.state != SessionState::Stopped {
            log::debug!("breathing session stopped ({})", self.state.name());
        }
        self.reset();
    }

    /// Zero all counters and forget the pattern.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Step the session to `now`. Only has an effect while running.
    ///
    /// At most one phase transition happens per call: the new phase starts at
    /// `now` and every validated duration is positive.
    pub fn advance(&mut self, now: f64, sink: &mut impl EventSink) {
        if self.state != SessionState::Running {
            return;
        }
        let (duration, len) = match &self.pattern {
            Some(p) => (p.phases()[self.phase_index].duration, p.len()),
            None => return,
        };

        let elapsed = (now - self.phase_start_time).max(0.0);
        self.phase_progress = clamp01(elapsed / duration);
        self.refresh_outputs();

        if elapsed < duration {
            return;
        }

        self.phase_index = (self.phase_index + 1) % len;
        if self.phase_index == 0 {
            self.cycle += 1;
            if self.cycles().is_reached(self.cycle) {
                self.complete(now, sink);
                return;
            }
        }
        self.begin_phase(now, sink);
    }

    fn complete(&mut self, now: f64, sink: &mut impl EventSink) {
        self.phase_progress = 1.0;
        self.state = SessionState::Complete;
        let total = (now - self.session_start_time).max(0.0);
        log::info!(
            "breathing session complete: {} cycles in {total:.3}s",
            self.cycle
        );
        sink.emit(SessionEvent::ExerciseCompleted {
            total_cycles: self.cycle,
            total_duration_seconds: total,
        });
    }

    fn begin_phase(&mut self, now: f64, sink: &mut impl EventSink) {
        let Some(phase) = self
            .pattern
            .as_ref()
            .and_then(|p| p.phases().get(self.phase_index))
        else {
            return;
        };
        let (kind, target, label) = (phase.kind, phase.target_scale, phase.label.clone());

        self.phase_start_time = now;
        self.start_scale = self.current_scale;
        self.target_scale = target;
        self.phase_progress = 0.0;
        self.wobble_intensity = kind.wobble_intensity();
        self.refresh_outputs();

        log::debug!(
            "phase {} -> {kind} ({label}), cycle {}",
            self.phase_index,
            self.cycle
        );
        sink.emit(SessionEvent::PhaseChanged {
            phase_kind: kind,
            label,
            phase_index: self.phase_index,
            cycle_index: self.cycle,
        });
    }

    /// Recompute scale and ring progress from the current phase and progress.
    fn refresh_outputs(&mut self) {
        let Some(kind) = self.current_phase().map(|p| p.kind) else {
            return;
        };
        let p = self.phase_progress;
        let (scale, ring) = match kind {
            PhaseKind::Inhale => {
                let eased = ease_out_cubic(p);
                (lerp(self.start_scale, self.target_scale, eased), eased)
            }
            PhaseKind::Exhale => {
                let eased = ease_out_cubic(p);
                (lerp(self.start_scale, self.target_scale, eased), 1.0 - eased)
            }
            PhaseKind::HoldIn => (self.target_scale, 1.0),
            PhaseKind::HoldOut | PhaseKind::Idle => (self.target_scale, 0.0),
        };
        self.current_scale = scale;
        self.ring_progress = clamp01(ring);
    }

    /// Values the renderer should draw this frame.
    pub fn sample(&self) -> PhaseSample<'_> {
        if self.state.is_active() {
            PhaseSample {
                scale: self.current_scale,
                ring_progress: self.ring_progress,
                label: self.label(),
                is_active: true,
            }
        } else {
            PhaseSample {
                scale: 1.0,
                ring_progress: 0.0,
                label: "",
                is_active: false,
            }
        }
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// Completed full traversals of the phase list.
    #[inline]
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    #[inline]
    pub fn phase_progress(&self) -> f64 {
        self.phase_progress
    }

    #[inline]
    pub fn current_scale(&self) -> f64 {
        self.current_scale
    }

    #[inline]
    pub fn start_scale(&self) -> f64 {
        self.start_scale
    }

    #[inline]
    pub fn target_scale(&self) -> f64 {
        self.target_scale
    }

    #[inline]
    pub fn ring_progress(&self) -> f64 {
        self.ring_progress
    }

    #[inline]
    pub fn wobble_intensity(&self) -> f64 {
        self.wobble_intensity
    }

    #[inline]
    pub fn pause_time(&self) -> Option<f64> {
        self.pause_time
    }

    #[inline]
    pub fn pattern(&self) -> Option<&BreathingPattern> {
        self.pattern.as_ref()
    }

    pub fn cycles(&self) -> CycleLimit {
        self.pattern
            .as_ref()
            .map_or(CycleLimit::Infinite, BreathingPattern::cycles)
    }

    pub fn current_phase(&self) -> Option<&PhaseDescriptor> {
        self.pattern
            .as_ref()
            .and_then(|p| p.phases().get(self.phase_index))
    }

    /// Label of the current phase; empty when stopped.
    pub fn label(&self) -> &str {
        self.current_phase().map_or("", |p| p.label.as_str())
    }

    /// Number of phases in the active pattern; zero when stopped.
    pub fn phase_count(&self) -> usize {
        self.pattern.as_ref().map_or(0, BreathingPattern::len)
    }
}
