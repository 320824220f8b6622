// Servalrs Event Loop
// Pulls raw events from a source and drives the dispatcher

use log::{debug, info};

use crate::dispatch::Dispatcher;
use crate::input::{EventSource, SourceError};
use crate::output::{OutputSink, SinkError};

/// Result type for event loop operations
pub type EventLoopResult<T> = Result<T, EventLoopError>;

/// Errors that stop the event loop
#[derive(Debug, thiserror::Error)]
pub enum EventLoopError {
    #[error("Event source error: {0}")]
    Source(#[from] SourceError),

    #[error("Output error: {0}")]
    Sink(#[from] SinkError),
}

/// Single-threaded pipeline runner.
///
/// Each raw event is fully processed by every processor before the next
/// one is pulled. The loop ends when the source runs dry; the sink is
/// left as it is for its owner to tear down.
#[derive(Debug)]
pub struct EventLoop {
    dispatcher: Dispatcher,
    events_processed: u64,
}

impl EventLoop {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            events_processed: 0,
        }
    }

    /// Run until `source` is exhausted or an error occurs.
    ///
    /// Returns the number of events handled during this call.
    pub fn run<Src, S>(&mut self, source: &mut Src, sink: &mut S) -> EventLoopResult<u64>
    where
        Src: EventSource + ?Sized,
        S: OutputSink + ?Sized,
    {
        info!(
            "Event loop started with {} processor(s)",
            self.dispatcher.len()
        );

        let mut handled = 0;
        while let Some(event) = source.next_event()? {
            self.dispatcher.dispatch(&event, sink)?;
            handled += 1;
        }
        self.events_processed += handled;

        debug!("Event source ended after {} event(s)", handled);
        Ok(handled)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Total events handled across all `run` calls
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::codes::{ABS_HAT0X, BTN_A};
    use crate::input::{RawEvent, ReplaySource, SourceResult};
    use crate::output::{Capabilities, OutputEvent, RecordingSink, SinkOp};
    use crate::Key;

    fn default_loop() -> EventLoop {
        EventLoop::new(Config::default().dispatcher().unwrap())
    }

    #[test]
    fn test_run_until_exhausted() {
        let mut event_loop = default_loop();
        let mut source = ReplaySource::new([
            RawEvent::key(BTN_A, 1),
            RawEvent::from_raw(0, 0, 0),
            RawEvent::key(BTN_A, 0),
        ]);
        let mut sink = RecordingSink::new();

        assert_eq!(event_loop.run(&mut source, &mut sink).unwrap(), 3);
        assert_eq!(source.remaining(), 0);
        assert_eq!(
            sink.ops(),
            &[
                SinkOp::Write(OutputEvent::press(Key::A)),
                SinkOp::Sync,
                SinkOp::Write(OutputEvent::release(Key::A)),
                SinkOp::Sync,
            ]
        );
    }

    #[test]
    fn test_events_processed_accumulates() {
        let mut event_loop = default_loop();
        let mut sink = RecordingSink::new();

        event_loop
            .run(&mut ReplaySource::new([RawEvent::absolute(ABS_HAT0X, 1)]), &mut sink)
            .unwrap();
        event_loop
            .run(&mut ReplaySource::new([RawEvent::absolute(ABS_HAT0X, 0)]), &mut sink)
            .unwrap();
        assert_eq!(event_loop.events_processed(), 2);
    }

    #[test]
    fn test_sink_error_stops_loop() {
        let mut event_loop = default_loop();
        let mut source = ReplaySource::new([RawEvent::key(BTN_A, 1), RawEvent::key(BTN_A, 0)]);
        let mut sink = RecordingSink::with_capabilities(Capabilities::new());

        let result = event_loop.run(&mut source, &mut sink);
        assert!(matches!(result, Err(EventLoopError::Sink(SinkError::Undeclared(_)))));
        assert_eq!(source.remaining(), 1);
    }

    struct FailingSource;

    impl EventSource for FailingSource {
        fn next_event(&mut self) -> SourceResult<Option<RawEvent>> {
            Err(SourceError::Io(std::io::Error::other("unplugged")))
        }
    }

    #[test]
    fn test_source_error_stops_loop() {
        let mut event_loop = default_loop();
        let mut sink = RecordingSink::new();
        let result = event_loop.run(&mut FailingSource, &mut sink);
        assert!(matches!(result, Err(EventLoopError::Source(_))));
        assert!(sink.is_empty());
    }
}
