// Servalrs Processors - Relative Motion
// Second analog stick driven as a mouse

use std::cmp::Ordering;

use smallvec::{smallvec, SmallVec};

use super::directional::STICK_CENTER;
use super::Claim;
use crate::input::{EventKind, RawEvent};
use crate::output::{OutputCode, OutputEvent, OutputSink, SinkError, REL_X, REL_Y};

/// Pointer step per off-center sample
pub const MOTION_STEP: i32 = 3;

/// Absolute stick axis and the relative axis it moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionAxis {
    pub code: u16,
    pub axis: u16,
}

impl MotionAxis {
    pub fn new(code: u16, axis: u16) -> Self {
        Self { code, axis }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionConfig {
    pub horizontal: MotionAxis,
    pub vertical: MotionAxis,
    pub center: i32,
    pub step: i32,
}

impl MotionConfig {
    /// Horizontal stick axis to REL_X, vertical to REL_Y
    pub fn pointer(horizontal: u16, vertical: u16) -> Self {
        Self {
            horizontal: MotionAxis::new(horizontal, REL_X),
            vertical: MotionAxis::new(vertical, REL_Y),
            center: STICK_CENTER,
            step: MOTION_STEP,
        }
    }
}

/// Emits a fixed-size relative step for every off-center sample.
///
/// Below center moves by `-step`, above center by `+step`. There is no
/// scaling with distance from center. A sample exactly at center writes
/// nothing and does not sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionProcessor {
    config: MotionConfig,
}

impl MotionProcessor {
    pub fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    fn axis_for(&self, code: u16) -> Option<u16> {
        if code == self.config.horizontal.code {
            Some(self.config.horizontal.axis)
        } else if code == self.config.vertical.code {
            Some(self.config.vertical.axis)
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
        let Some(axis) = self.axis_for(event.code) else {
            return Ok(());
        };

        let delta = match event.value.cmp(&self.config.center) {
            Ordering::Less => -self.config.step,
            Ordering::Greater => self.config.step,
            Ordering::Equal => return Ok(()),
        };

        sink.write(OutputEvent::relative(axis, delta))?;
        sink.sync()
    }

    pub fn claims(&self) -> SmallVec<[Claim; 2]> {
        smallvec![
            Claim::new(EventKind::AbsoluteAxis, self.config.horizontal.code),
            Claim::new(EventKind::AbsoluteAxis, self.config.vertical.code),
        ]
    }

    pub fn outputs(&self) -> SmallVec<[OutputCode; 4]> {
        smallvec![
            OutputCode::Relative(self.config.horizontal.axis),
            OutputCode::Relative(self.config.vertical.axis),
        ]
    }
}
