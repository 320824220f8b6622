// Servalrs Output Layer - Output Sink
// Buffered writes plus an explicit flush

use super::event::OutputEvent;

/// Error types for output operations
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to create virtual device: {0}")]
    DeviceCreation(String),

    #[error("'{0}' was not declared in the virtual device capabilities")]
    Undeclared(OutputEvent),

    #[error("Failed to write event: {0}")]
    Write(#[from] std::io::Error),
}

/// Destination for synthesized events.
///
/// `write` buffers one event; `sync` makes everything buffered visible
/// downstream at once. Processors always follow their writes with exactly
/// one `sync`.
pub trait OutputSink {
    fn write(&mut self, event: OutputEvent) -> Result<(), SinkError>;

    fn sync(&mut self) -> Result<(), SinkError>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn write(&mut self, event: OutputEvent) -> Result<(), SinkError> {
        (**self).write(event)
    }

    fn sync(&mut self) -> Result<(), SinkError> {
        (**self).sync()
    }
}
