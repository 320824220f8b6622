// Servalrs Processors - Digital Button
// Edge-triggered 1:1 mapping from a pad button to a key

use smallvec::{smallvec, SmallVec};

use super::Claim;
use crate::input::{EventKind, RawEvent};
use crate::output::{OutputCode, OutputEvent, OutputSink, SinkError};
use crate::Key;

/// Input button code and the key it drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub input: u16,
    pub output: Key,
}

impl ButtonConfig {
    pub fn new(input: u16, output: Key) -> Self {
        Self { input, output }
    }
}

/// Maps one EV_KEY code to one output key.
///
/// Value 1 presses, value 0 releases, anything else (autorepeat 2) is
/// ignored without a sync. No previous state is kept, so repeated edges
/// are re-emitted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonProcessor {
    config: ButtonConfig,
}

impl ButtonProcessor {
    pub fn new(config: ButtonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn process<S: OutputSink + ?Sized>(
        &self,
        event: &RawEvent,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        if event.kind != EventKind::Key || event.code != self.config.input {
            return Ok(());
        }

        let output = match event.value {
            1 => OutputEvent::press(self.config.output),
            0 => OutputEvent::release(self.config.output),
            _ => return Ok(()),
        };

        sink.write(output)?;
        sink.sync()
    }

    pub fn claims(&self) -> SmallVec<[Claim; 2]> {
        smallvec![Claim::new(EventKind::Key, self.config.input)]
    }

    pub fn outputs(&self) -> SmallVec<[OutputCode; 4]> {
        smallvec![OutputCode::Key(self.config.output)]
    }
}
