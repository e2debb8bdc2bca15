//! AnimationContext: owns every animator for one visual instance and samples
//! them once per frame.
//!
//! Hosts talk to a running context through a [`ContextHandle`], which can be
//! cloned and moved to other threads. Activity writes go straight to an atomic
//! cell; every other command is merged into a [`PendingCommands`] slot and
//! applied at the start of the next [`AnimationContext::update`], stamped with
//! that frame's time. The frame path only swaps the slot out under its lock.
//!
//! Frame order:
//! 1. take the pending commands (a stop or start sent before the frame always lands)
//! 2. demo driver (if enabled) → activity target
//! 3. activity smoothing → derived parameters
//! 4. breathing scale
//! 5. phase machine (events appended to `Outputs::events`)
//! 6. wobble offsets
//! 7. fill `Outputs::frame`

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::activity::{ActivityAnimator, ActivityParams, ActivityTarget};
use crate::breathing::BreathingScaleComputer;
use crate::config::{ActivitySource, Config};
use crate::demo::DemoActivityDriver;
use crate::easing::clamp01;
use crate::error::CommandError;
use crate::geometry::{build_blob_path, inner_blob_path, BlobPath, Point};
use crate::inputs::{Command, PendingCommands};
use crate::outputs::Outputs;
use crate::pattern::{BreathingPattern, CycleLimit, PatternSpec, PhaseDescriptor};
use crate::session::PhaseStateMachine;
use crate::wobble::WobbleGenerator;

/// Cloneable, thread-safe command path into an [`AnimationContext`].
#[derive(Clone, Debug)]
pub struct ContextHandle {
    pending: Weak<Mutex<PendingCommands>>,
    activity: Arc<ActivityTarget>,
}

impl ContextHandle {
    /// Validate and queue a new session. Invalid patterns are rejected here,
    /// before anything reaches the frame sampler.
    pub fn start(&self, phases: Vec<PhaseDescriptor>, cycles: CycleLimit) -> Result<(), CommandError> {
        let pattern = BreathingPattern::new(phases, cycles).inspect_err(|err| {
            log::warn!("rejected breathing pattern: {err}");
        })?;
        self.start_pattern(pattern)
    }

    /// Queue a session from the host wire format (durations in milliseconds).
    pub fn start_spec(&self, spec: &PatternSpec) -> Result<(), CommandError> {
        let pattern = spec.to_pattern().inspect_err(|err| {
            log::warn!("rejected breathing pattern: {err}");
        })?;
        self.start_pattern(pattern)
    }

    pub fn start_pattern(&self, pattern: BreathingPattern) -> Result<(), CommandError> {
        self.send(Command::Start(pattern))
    }

    pub fn pause(&self) -> Result<(), CommandError> {
        self.send(Command::Pause)
    }

    pub fn resume(&self) -> Result<(), CommandError> {
        self.send(Command::Resume)
    }

    /// Stop without a completion event. Safe in any state.
    pub fn stop(&self) -> Result<(), CommandError> {
        self.send(Command::Stop)
    }

    pub fn set_point_count(&self, point_count: usize) -> Result<(), CommandError> {
        self.send(Command::SetPointCount(point_count))
    }

    pub fn set_wobble_intensity(&self, intensity: f64) -> Result<(), CommandError> {
        self.send(Command::SetWobbleIntensity(intensity))
    }

    /// Publish a new activity target. Clamped to [0, 1]; NaN counts as 0.
    /// Visible to the next frame; never queued.
    #[inline]
    pub fn set_activity_target(&self, value: f64) {
        self.activity.store(value);
    }

    fn send(&self, cmd: Command) -> Result<(), CommandError> {
        let Some(pending) = self.pending.upgrade() else {
            log::trace!("dropping {} command: context is gone", cmd.name());
            return Err(CommandError::Disconnected);
        };
        pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(cmd);
        Ok(())
    }
}

#[derive(Debug)]
pub struct AnimationContext {
    cfg: Config,
    machine: PhaseStateMachine,
    activity: ActivityAnimator,
    breathing: BreathingScaleComputer,
    wobble: WobbleGenerator,
    demo: Option<DemoActivityDriver>,
    wobble_intensity: f64,
    pending: Arc<Mutex<PendingCommands>>,
    handle: ContextHandle,
    outputs: Outputs,
}

impl Default for AnimationContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AnimationContext {
    pub fn new(cfg: Config) -> Self {
        let pending = Arc::new(Mutex::new(PendingCommands::default()));
        let activity = ActivityAnimator::new(cfg.activity.smoothing_rate);
        let handle = ContextHandle {
            pending: Arc::downgrade(&pending),
            activity: activity.target_cell(),
        };

        let (wobble, demo) = match cfg.rng_seed {
            Some(seed) => (
                WobbleGenerator::seeded(cfg.point_count, cfg.wobble, seed),
                cfg.demo_mode
                    .then(|| DemoActivityDriver::seeded(seed.wrapping_add(1))),
            ),
            None => (
                WobbleGenerator::from_entropy(cfg.point_count, cfg.wobble),
                cfg.demo_mode.then(DemoActivityDriver::from_entropy),
            ),
        };

        Self {
            machine: PhaseStateMachine::new(),
            activity,
            breathing: BreathingScaleComputer::new(cfg.breathing),
            wobble,
            demo,
            wobble_intensity: clamp01(cfg.wobble_intensity),
            pending,
            handle,
            outputs: Outputs::default(),
            cfg,
        }
    }

    /// A new handle for the command path.
    pub fn handle(&self) -> ContextHandle {
        self.handle.clone()
    }

    /// Sample every animator at `now` (monotonic seconds) and return this frame's outputs.
    pub fn update(&mut self, now: f64) -> &Outputs {
        self.outputs.clear_events();

        // 1) pending commands
        self.drain_commands(now);

        // 2) demo activity
        if let Some(value) = self.demo.as_mut().and_then(|d| d.poll(now)) {
            self.activity.set_target(value);
        }

        // 3) activity
        let activity = self.activity.sample(now);
        let params = match &self.cfg.activity.source {
            ActivitySource::Shared => self.activity.params(),
            ActivitySource::Static(p) => ActivityParams::from_static(p),
        };

        // 4) breathing
        let breathing_scale =
            self.breathing
                .sample(now, params.breathing_speed, params.breathing_intensity);

        // 5) session
        self.machine.advance(now, &mut self.outputs.events);

        // 6) wobble
        let phase_intensity = if self.machine.state().is_active() {
            self.machine.wobble_intensity()
        } else {
            1.0
        };
        self.wobble.update(now, phase_intensity, self.wobble_intensity);

        // 7) frame
        let sample = self.machine.sample();
        let frame = &mut self.outputs.frame;
        frame.scale = if sample.is_active {
            sample.scale
        } else {
            breathing_scale
        };
        frame.ring_progress = sample.ring_progress;
        frame.label.clear();
        frame.label.push_str(sample.label);
        frame.is_active = sample.is_active;
        frame.vertex_offsets.clear();
        frame.vertex_offsets.extend_from_slice(self.wobble.offsets());
        frame.glow_intensity = params.glow_intensity;
        frame.rotation_speed = params.rotation_speed;
        frame.breathing_scale = breathing_scale;
        frame.activity = activity;

        &self.outputs
    }

    fn drain_commands(&mut self, now: f64) {
        let pending = std::mem::take(
            &mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for cmd in pending.into_commands() {
            self.apply(cmd, now);
        }
    }

    fn apply(&mut self, cmd: Command, now: f64) {
        match cmd {
            Command::Start(pattern) => self.machine.start_pattern(pattern, now),
            Command::Pause => {
                if !self.machine.pause(now) {
                    log::trace!("pause ignored while {}", self.machine.state().name());
                }
            }
            Command::Resume => {
                if !self.machine.resume(now) {
                    log::trace!("resume ignored while {}", self.machine.state().name());
                }
            }
            Command::Stop => self.machine.stop(),
            Command::SetPointCount(k) => {
                self.cfg.point_count = k;
                self.wobble.set_point_count(k);
            }
            Command::SetWobbleIntensity(v) => self.wobble_intensity = clamp01(v),
        }
    }

    /// Outer blob outline for the last frame, in a view whose shorter half-side is `half_extent`.
    pub fn blob_path(&self, center: Point, half_extent: f64) -> BlobPath {
        let frame = &self.outputs.frame;
        build_blob_path(center, frame.blob_radius(half_extent), &frame.vertex_offsets)
    }

    /// Inner blob outline for the last frame.
    pub fn inner_blob_path(&self, center: Point, half_extent: f64) -> BlobPath {
        let frame = &self.outputs.frame;
        inner_blob_path(center, frame.blob_radius(half_extent), &frame.vertex_offsets)
    }

    #[inline]
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    #[inline]
    pub fn machine(&self) -> &PhaseStateMachine {
        &self.machine
    }

    #[inline]
    pub fn activity(&self) -> &ActivityAnimator {
        &self.activity
    }

    #[inline]
    pub fn wobble(&self) -> &WobbleGenerator {
        &self.wobble
    }

    #[inline]
    pub fn wobble_intensity(&self) -> f64 {
        self.wobble_intensity
    }
}
