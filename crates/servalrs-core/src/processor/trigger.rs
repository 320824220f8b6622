// Servalrs Processors - Analog Trigger
// Pressure-sensitive trigger read as a single key

use smallvec::{smallvec, SmallVec};

use super::Claim;
use crate::input::{EventKind, RawEvent};
use crate::output::{OutputCode, OutputEvent, OutputSink, SinkError};
use crate::Key;

/// Default threshold, measured from the released position (0)
pub const TRIGGER_THRESHOLD: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerConfig {
    pub input: u16,
    pub output: Key,
    pub threshold: i32,
}

impl TriggerConfig {
    pub fn new(input: u16, output: Key) -> Self {
        Self {
            input,
            output,
            threshold: TRIGGER_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Presses the key while the trigger is pulled past the threshold.
///
/// Every owned sample produces exactly one write and one sync: press when
/// `value > threshold`, release otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerProcessor {
    config: TriggerConfig,
}

impl TriggerProcessor {
    pub fn new(config: TriggerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    pub fn process<S: OutputSink + ?Sized>(
        &self,
        event: &RawEvent,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        if event.kind != EventKind::AbsoluteAxis || event.code != self.config.input {
            return Ok(());
        }

        if event.value > self.config.threshold {
            sink.write(OutputEvent::press(self.config.output))?;
        } else {
            sink.write(OutputEvent::release(self.config.output))?;
        }
        sink.sync()
    }

    pub fn claims(&self) -> SmallVec<[Claim; 2]> {
        smallvec![Claim::new(EventKind::AbsoluteAxis, self.config.input)]
    }

    pub fn outputs(&self) -> SmallVec<[OutputCode; 4]> {
        smallvec![OutputCode::Key(self.config.output)]
    }
}
