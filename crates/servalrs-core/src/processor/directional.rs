// Servalrs Processors - Directional Digitizer
// Turns a two-axis hat or stick into four direction keys

use smallvec::{smallvec, SmallVec};

use super::Claim;
use crate::input::{EventKind, RawEvent};
use crate::output::{OutputCode, OutputEvent, OutputSink, SinkError};
use crate::Key;

/// Resting value of an analog stick axis
pub const STICK_CENTER: i32 = 128;

/// Half-width of the stick dead zone around the center
pub const STICK_DEAD_ZONE: i32 = 20;

/// Value domain of the owned axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDomain {
    /// Hat-style axes reporting -1, 0 or 1
    Signed,
    /// Analog axes reporting 0..=255 around `center`.
    ///
    /// Values strictly outside `center ± dead_zone` select a direction;
    /// the boundaries themselves count as centered. The same pair of
    /// thresholds is used in both directions.
    Magnitude { center: i32, dead_zone: i32 },
}

impl AxisDomain {
    /// Serval analog stick: centered on 128 with a dead zone of 20
    pub const STICK: AxisDomain = AxisDomain::Magnitude {
        center: STICK_CENTER,
        dead_zone: STICK_DEAD_ZONE,
    };

    fn classify(self, value: i32) -> Direction {
        match self {
            AxisDomain::Signed => match value {
                -1 => Direction::Negative,
                1 => Direction::Positive,
                _ => Direction::Centered,
            },
            AxisDomain::Magnitude { center, dead_zone } => {
                if value < center.saturating_sub(dead_zone) {
                    Direction::Negative
                } else if value > center.saturating_add(dead_zone) {
                    Direction::Positive
                } else {
                    Direction::Centered
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Negative,
    Positive,
    Centered,
}

/// One axis and its pair of opposite keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBinding {
    pub code: u16,
    /// Key for the low end (left / up)
    pub negative: Key,
    /// Key for the high end (right / down)
    pub positive: Key,
}

impl AxisBinding {
    pub fn new(code: u16, negative: Key, positive: Key) -> Self {
        Self {
            code,
            negative,
            positive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionalConfig {
    pub horizontal: AxisBinding,
    pub vertical: AxisBinding,
    pub domain: AxisDomain,
}

impl DirectionalConfig {
    /// Horizontal axis to LEFT/RIGHT, vertical axis to UP/DOWN
    pub fn arrows(horizontal: u16, vertical: u16, domain: AxisDomain) -> Self {
        Self {
            horizontal: AxisBinding::new(horizontal, Key::LEFT, Key::RIGHT),
            vertical: AxisBinding::new(vertical, Key::UP, Key::DOWN),
            domain,
        }
    }
}

/// Digitizes two absolute axes into direction key presses.
///
/// Each event only touches the axis it arrived on. Negative presses the
/// negative key, positive presses the positive key, centered releases
/// both (negative first). Every owned event ends with a sync, centered
/// included, and nothing is remembered between events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionalProcessor {
    config: DirectionalConfig,
}

impl DirectionalProcessor {
    pub fn new(config: DirectionalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DirectionalConfig {
        &self.config
    }

    fn binding_for(&self, code: u16) -> Option<&AxisBinding> {
        if code == self.config.horizontal.code {
            Some(&self.config.horizontal)
        } else if code == self.config.vertical.code {
            Some(&self.config.vertical)
        } else {
            None
        }
    }

    pub fn process<S: OutputSink + ?Sized>(
        &self,
        event: &RawEvent,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        if event.kind != EventKind::AbsoluteAxis {
            return Ok(());
        }
        let Some(binding) = self.binding_for(event.code) else {
            return Ok(());
        };

        match self.config.domain.classify(event.value) {
            Direction::Negative => sink.write(OutputEvent::press(binding.negative))?,
            Direction::Positive => sink.write(OutputEvent::press(binding.positive))?,
            Direction::Centered => {
                sink.write(OutputEvent::release(binding.negative))?;
                sink.write(OutputEvent::release(binding.positive))?;
            }
        }
        sink.sync()
    }

    pub fn claims(&self) -> SmallVec<[Claim; 2]> {
        smallvec![
            Claim::new(EventKind::AbsoluteAxis, self.config.horizontal.code),
            Claim::new(EventKind::AbsoluteAxis, self.config.vertical.code),
        ]
    }

    pub fn outputs(&self) -> SmallVec<[OutputCode; 4]> {
        let h = &self.config.horizontal;
        let v = &self.config.vertical;
        smallvec![
            OutputCode::Key(h.negative),
            OutputCode::Key(h.positive),
            OutputCode::Key(v.negative),
            OutputCode::Key(v.positive),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::codes::{ABS_HAT0X, ABS_HAT0Y, ABS_X, ABS_Y};
    use crate::output::{RecordingSink, SinkOp};

    fn stick() -> DirectionalProcessor {
        DirectionalProcessor::new(DirectionalConfig::arrows(ABS_X, ABS_Y, AxisDomain::STICK))
    }

    fn hat() -> DirectionalProcessor {
        DirectionalProcessor::new(DirectionalConfig::arrows(
            ABS_HAT0X,
            ABS_HAT0Y,
            AxisDomain::Signed,
        ))
    }

    fn run(processor: &DirectionalProcessor, code: u16, value: i32) -> Vec<SinkOp> {
        let mut sink = RecordingSink::new();
        processor
            .process(&RawEvent::absolute(code, value), &mut sink)
            .unwrap();
        sink.take()
    }

    fn press(key: Key) -> Vec<SinkOp> {
        vec![SinkOp::Write(OutputEvent::press(key)), SinkOp::Sync]
    }

    fn release_both(negative: Key, positive: Key) -> Vec<SinkOp> {
        vec![
            SinkOp::Write(OutputEvent::release(negative)),
            SinkOp::Write(OutputEvent::release(positive)),
            SinkOp::Sync,
        ]
    }

    #[test]
    fn test_stick_horizontal() {
        let p = stick();
        assert_eq!(run(&p, ABS_X, 107), press(Key::LEFT));
        assert_eq!(run(&p, ABS_X, 149), press(Key::RIGHT));
        assert_eq!(run(&p, ABS_X, 128), release_both(Key::LEFT, Key::RIGHT));
        assert_eq!(run(&p, ABS_X, 0), press(Key::LEFT));
        assert_eq!(run(&p, ABS_X, 255), press(Key::RIGHT));
    }

    #[test]
    fn test_stick_dead_zone_boundaries_are_centered() {
        let p = stick();
        assert_eq!(run(&p, ABS_X, 108), release_both(Key::LEFT, Key::RIGHT));
        assert_eq!(run(&p, ABS_X, 148), release_both(Key::LEFT, Key::RIGHT));
        assert_eq!(run(&p, ABS_Y, 108), release_both(Key::UP, Key::DOWN));
        assert_eq!(run(&p, ABS_Y, 148), release_both(Key::UP, Key::DOWN));
    }

    #[test]
    fn test_stick_vertical() {
        let p = stick();
        assert_eq!(run(&p, ABS_Y, 107), press(Key::UP));
        assert_eq!(run(&p, ABS_Y, 149), press(Key::DOWN));
        assert_eq!(run(&p, ABS_Y, 128), release_both(Key::UP, Key::DOWN));
    }

    #[test]
    fn test_hat() {
        let p = hat();
        assert_eq!(run(&p, ABS_HAT0X, -1), press(Key::LEFT));
        assert_eq!(run(&p, ABS_HAT0X, 1), press(Key::RIGHT));
        assert_eq!(run(&p, ABS_HAT0X, 0), release_both(Key::LEFT, Key::RIGHT));
        assert_eq!(run(&p, ABS_HAT0Y, -1), press(Key::UP));
        assert_eq!(run(&p, ABS_HAT0Y, 1), press(Key::DOWN));
        assert_eq!(run(&p, ABS_HAT0Y, 0), release_both(Key::UP, Key::DOWN));
    }

    #[test]
    fn test_extreme_domain_does_not_overflow() {
        let p = DirectionalProcessor::new(DirectionalConfig::arrows(
            ABS_X,
            ABS_Y,
            AxisDomain::Magnitude {
                center: i32::MIN,
                dead_zone: i32::MAX,
            },
        ));
        // Thresholds clamp to i32::MIN and -1
        assert_eq!(run(&p, ABS_X, 128), press(Key::RIGHT));
        assert_eq!(run(&p, ABS_X, i32::MIN), release_both(Key::LEFT, Key::RIGHT));
    }

    #[test]
    fn test_hat_out_of_range_releases() {
        assert_eq!(run(&hat(), ABS_HAT0X, 5), release_both(Key::LEFT, Key::RIGHT));
    }

    #[test]
    fn test_centered_repeats_keep_syncing() {
        let p = stick();
        let mut sink = RecordingSink::new();
        for _ in 0..3 {
            p.process(&RawEvent::absolute(ABS_X, 128), &mut sink).unwrap();
        }
        assert_eq!(sink.sync_count(), 3);
        assert_eq!(sink.writes().count(), 6);
    }

    #[test]
    fn test_unowned_events_ignored() {
        let p = stick();
        let mut sink = RecordingSink::new();
        p.process(&RawEvent::absolute(ABS_HAT0X, -1), &mut sink).unwrap();
        p.process(&RawEvent::key(ABS_X, 0), &mut sink).unwrap();
        p.process(&RawEvent::relative(ABS_X, 0), &mut sink).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_claims_and_outputs() {
        let p = hat();
        assert_eq!(
            p.claims().as_slice(),
            &[
                Claim::new(EventKind::AbsoluteAxis, ABS_HAT0X),
                Claim::new(EventKind::AbsoluteAxis, ABS_HAT0Y),
            ]
        );
        assert_eq!(p.outputs().len(), 4);
    }
}
