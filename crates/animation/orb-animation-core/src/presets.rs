//! Built-in breathing patterns.

use serde::{Deserialize, Serialize};

use crate::pattern::{BreathingPattern, CycleLimit, PhaseDescriptor, PhaseKind};

const EXPANDED: f64 = 1.35;
const CONTRACTED: f64 = 0.75;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    /// 4-7-8 breathing.
    Relaxing,
    /// Four equal 4 s sides.
    Box,
    Energizing,
    Calming,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Relaxing,
        Preset::Box,
        Preset::Energizing,
        Preset::Calming,
    ];

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Relaxing => "relaxing",
            Self::Box => "box",
            Self::Energizing => "energizing",
            Self::Calming => "calming",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == s)
    }

    pub fn pattern(&self) -> BreathingPattern {
        let inhale = |secs| PhaseDescriptor::new(PhaseKind::Inhale, secs, EXPANDED, "Breathe In");
        let exhale =
            |secs| PhaseDescriptor::new(PhaseKind::Exhale, secs, CONTRACTED, "Breathe Out");
        let (phases, cycles) = match self {
            Self::Relaxing => (
                vec![
                    inhale(4.0),
                    PhaseDescriptor::new(PhaseKind::HoldIn, 7.0, EXPANDED, "Hold"),
                    exhale(8.0),
                ],
                4,
            ),
            Self::Box => (
                vec![
                    inhale(4.0),
                    PhaseDescriptor::new(PhaseKind::HoldIn, 4.0, EXPANDED, "Hold"),
                    exhale(4.0),
                    PhaseDescriptor::new(PhaseKind::HoldOut, 4.0, CONTRACTED, "Hold"),
                ],
                4,
            ),
            Self::Energizing => (vec![inhale(2.0), exhale(2.0)], 10),
            Self::Calming => (vec![inhale(4.0), exhale(6.0)], 6),
        };
        BreathingPattern::from_trusted(phases, CycleLimit::Finite(cycles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_valid() {
        for preset in Preset::ALL {
            let pattern = preset.pattern();
            assert!(BreathingPattern::new(pattern.phases().to_vec(), pattern.cycles()).is_ok());
            assert_eq!(Preset::parse(preset.name()), Some(preset));
        }
    }

    #[test]
    fn box_preset_shape() {
        let pattern = Preset::Box.pattern();
        assert_eq!(pattern.len(), 4);
        assert_eq!(pattern.cycle_duration(), 16.0);
        assert_eq!(pattern.total_duration(), Some(64.0));
        assert_eq!(pattern.phases()[3].kind, PhaseKind::HoldOut);
    }

    #[test]
    fn relaxing_is_four_seven_eight() {
        let durations: Vec<f64> = Preset::Relaxing
            .pattern()
            .phases()
            .iter()
            .map(|p| p.duration)
            .collect();
        assert_eq!(durations, vec![4.0, 7.0, 8.0]);
    }
}
