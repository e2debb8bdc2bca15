//! Commands sent through a [`ContextHandle`](crate::ContextHandle) and applied
//! by the frame sampler at the next frame's timestamp.
//!
//! Commands between two frames all take effect at the same instant, so they
//! are merged as they arrive: the newest start or stop replaces everything
//! queued before it, the newest pause or resume after that wins, and the
//! scalar settings keep their latest value. Memory stays constant however
//! fast commands arrive.

use crate::pattern::BreathingPattern;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Begin a session with a validated pattern, replacing any current one.
    Start(BreathingPattern),
    Pause,
    Resume,
    Stop,
    /// Blob vertex count; values below 3 produce no geometry.
    SetPointCount(usize),
    /// User wobble intensity, clamped to [0, 1] when applied.
    SetWobbleIntensity(f64),
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start(_) => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
            Self::SetPointCount(_) => "set_point_count",
            Self::SetWobbleIntensity(_) => "set_wobble_intensity",
        }
    }
}

/// Commands received since the last frame, merged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingCommands {
    /// Latest `Start` or `Stop`.
    lifecycle: Option<Command>,
    /// Latest `Pause` or `Resume` received after `lifecycle`.
    transport: Option<Command>,
    point_count: Option<usize>,
    wobble_intensity: Option<f64>,
}

impl PendingCommands {
    pub fn push(&mut self, cmd: Command) {
        match cmd {
            Command::Start(_) | Command::Stop => {
                self.lifecycle = Some(cmd);
                self.transport = None;
            }
            Command::Pause | Command::Resume => self.transport = Some(cmd),
            Command::SetPointCount(k) => self.point_count = Some(k),
            Command::SetWobbleIntensity(v) => self.wobble_intensity = Some(v),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lifecycle.is_none()
            && self.transport.is_none()
            && self.point_count.is_none()
            && self.wobble_intensity.is_none()
    }

    /// Commands in application order: lifecycle, transport, then settings.
    pub fn into_commands(self) -> impl Iterator<Item = Command> {
        self.lifecycle
            .into_iter()
            .chain(self.transport)
            .chain(self.point_count.map(Command::SetPointCount))
            .chain(self.wobble_intensity.map(Command::SetWobbleIntensity))
    }
}
