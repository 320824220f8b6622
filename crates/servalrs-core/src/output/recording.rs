// Servalrs Output Layer - Recording Sink
// In-memory sink that keeps every write and sync in order

use super::capabilities::Capabilities;
use super::event::OutputEvent;
use super::sink::{OutputSink, SinkError};

/// One operation observed by a `RecordingSink`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkOp {
    Write(OutputEvent),
    Sync,
}

/// Output sink that records operations instead of emitting them.
///
/// With capabilities set it rejects undeclared codes the same way the
/// uinput device does.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    ops: Vec<SinkOp>,
    capabilities: Option<Capabilities>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            ops: Vec::new(),
            capabilities: Some(capabilities),
        }
    }

    /// All recorded operations, oldest first
    pub fn ops(&self) -> &[SinkOp] {
        &self.ops
    }

    /// Take the recorded operations, leaving the sink empty
    pub fn take(&mut self) -> Vec<SinkOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Recorded writes without the sync markers
    pub fn writes(&self) -> impl Iterator<Item = OutputEvent> + '_ {
        self.ops.iter().filter_map(|op| match op {
            SinkOp::Write(event) => Some(*event),
            SinkOp::Sync => None,
        })
    }

    pub fn sync_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == SinkOp::Sync).count()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl OutputSink for RecordingSink {
    fn write(&mut self, event: OutputEvent) -> Result<(), SinkError> {
        if let Some(caps) = &self.capabilities {
            if !caps.permits(&event) {
                return Err(SinkError::Undeclared(event));
            }
        }
        self.ops.push(SinkOp::Write(event));
        Ok(())
    }

    fn sync(&mut self) -> Result<(), SinkError> {
        self.ops.push(SinkOp::Sync);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputCode;
    use crate::Key;

    #[test]
    fn test_records_in_order() {
        let mut sink = RecordingSink::new();
        sink.write(OutputEvent::press(Key::A)).unwrap();
        sink.sync().unwrap();
        sink.write(OutputEvent::release(Key::A)).unwrap();
        sink.sync().unwrap();

        assert_eq!(
            sink.ops(),
            &[
                SinkOp::Write(OutputEvent::press(Key::A)),
                SinkOp::Sync,
                SinkOp::Write(OutputEvent::release(Key::A)),
                SinkOp::Sync,
            ]
        );
        assert_eq!(sink.sync_count(), 2);
        assert_eq!(sink.writes().count(), 2);
    }

    #[test]
    fn test_take_empties_sink() {
        let mut sink = RecordingSink::new();
        sink.sync().unwrap();
        assert_eq!(sink.take(), vec![SinkOp::Sync]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_undeclared_write_rejected() {
        let caps: Capabilities = [OutputCode::Key(Key::A)].into_iter().collect();
        let mut sink = RecordingSink::with_capabilities(caps);

        assert!(sink.write(OutputEvent::press(Key::A)).is_ok());
        let err = sink.write(OutputEvent::press(Key::B)).unwrap_err();
        assert!(matches!(err, SinkError::Undeclared(e) if e == OutputEvent::press(Key::B)));
        assert_eq!(sink.ops().len(), 1);
    }
}
