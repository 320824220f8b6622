// Servalrs Processors
// Stateless translators from raw controller events to key/mouse output

mod button;
mod directional;
mod motion;
mod trigger;

use std::fmt;

use smallvec::SmallVec;

pub use button::{ButtonConfig, ButtonProcessor};
pub use directional::{
    AxisBinding, AxisDomain, DirectionalConfig, DirectionalProcessor, STICK_CENTER,
    STICK_DEAD_ZONE,
};
pub use motion::{MotionAxis, MotionConfig, MotionProcessor, MOTION_STEP};
pub use trigger::{TriggerConfig, TriggerProcessor, TRIGGER_THRESHOLD};

use crate::input::{EventKind, RawEvent};
use crate::output::{OutputCode, OutputSink, SinkError};

/// A (kind, code) pair of raw input a processor owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Claim {
    pub kind: EventKind,
    pub code: u16,
}

impl Claim {
    pub fn new(kind: EventKind, code: u16) -> Self {
        Self { kind, code }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.code)
    }
}

/// The closed set of processor variants.
///
/// Every variant decides on its own whether it owns an event; unowned
/// events are a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Processor {
    Button(ButtonProcessor),
    Directional(DirectionalProcessor),
    Motion(MotionProcessor),
    Trigger(TriggerProcessor),
}

impl Processor {
    /// Offer one raw event; writes and syncs on `sink` if owned
    pub fn process<S: OutputSink + ?Sized>(
        &self,
        event: &RawEvent,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        match self {
            Processor::Button(p) => p.process(event, sink),
            Processor::Directional(p) => p.process(event, sink),
            Processor::Motion(p) => p.process(event, sink),
            Processor::Trigger(p) => p.process(event, sink),
        }
    }

    /// Raw inputs this processor reacts to
    pub fn claims(&self) -> SmallVec<[Claim; 2]> {
        match self {
            Processor::Button(p) => p.claims(),
            Processor::Directional(p) => p.claims(),
            Processor::Motion(p) => p.claims(),
            Processor::Trigger(p) => p.claims(),
        }
    }

    /// Every output code this processor may write
    pub fn outputs(&self) -> SmallVec<[OutputCode; 4]> {
        match self {
            Processor::Button(p) => p.outputs(),
            Processor::Directional(p) => p.outputs(),
            Processor::Motion(p) => p.outputs(),
            Processor::Trigger(p) => p.outputs(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Processor::Button(_) => "button",
            Processor::Directional(_) => "directional",
            Processor::Motion(_) => "motion",
            Processor::Trigger(_) => "trigger",
        }
    }
}

impl From<ButtonProcessor> for Processor {
    fn from(p: ButtonProcessor) -> Self {
        Processor::Button(p)
    }
}

impl From<DirectionalProcessor> for Processor {
    fn from(p: DirectionalProcessor) -> Self {
        Processor::Directional(p)
    }
}

impl From<MotionProcessor> for Processor {
    fn from(p: MotionProcessor) -> Self {
        Processor::Motion(p)
    }
}

impl From<TriggerProcessor> for Processor {
    fn from(p: TriggerProcessor) -> Self {
        Processor::Trigger(p)
    }
}
