// Servalrs Input Layer - Event Sources
// Blocking pull interface for raw events

use std::collections::VecDeque;

use super::event::RawEvent;

/// Result type for event source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while reading raw events
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that yields raw events one at a time.
///
/// `next_event` blocks until an event is available. `Ok(None)` means the
/// source is exhausted (disconnected, closed, or asked to stop) and the
/// pipeline should end.
pub trait EventSource {
    fn next_event(&mut self) -> SourceResult<Option<RawEvent>>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> SourceResult<Option<RawEvent>> {
        (**self).next_event()
    }
}

/// Source that replays a fixed list of events, then ends.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    events: VecDeque<RawEvent>,
}

impl ReplaySource {
    pub fn new(events: impl IntoIterator<Item = RawEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Number of events not yet pulled
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ReplaySource {
    fn next_event(&mut self) -> SourceResult<Option<RawEvent>> {
        Ok(self.events.pop_front())
    }
}
