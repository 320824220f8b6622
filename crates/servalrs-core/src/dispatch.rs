// Servalrs Dispatcher
// Offers every raw event to every registered processor, in order

use std::collections::HashMap;

use log::{debug, trace};

use crate::input::RawEvent;
use crate::output::{Capabilities, OutputSink, SinkError};
use crate::processor::{Claim, Processor};

/// Errors raised while assembling the processor list
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{claim} is already owned by {owner} processor #{index}")]
    OverlappingClaim {
        claim: Claim,
        owner: &'static str,
        index: usize,
    },
}

/// Ordered list of processors.
///
/// Registration rejects a processor that claims a (kind, code) pair
/// another processor already owns, so each raw input has at most one
/// owner. Output keys may be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    processors: Vec<Processor>,
    owners: HashMap<Claim, usize>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a processor after all previously registered ones
    pub fn register(&mut self, processor: impl Into<Processor>) -> Result<(), DispatchError> {
        let processor = processor.into();
        let claims = processor.claims();

        for claim in &claims {
            if let Some(&index) = self.owners.get(claim) {
                return Err(DispatchError::OverlappingClaim {
                    claim: *claim,
                    owner: self.processors[index].label(),
                    index,
                });
            }
        }

        // Duplicate claims inside one processor are fine
        let index = self.processors.len();
        for claim in claims {
            self.owners.insert(claim, index);
        }
        debug!(
            "Registered {} processor #{} ({} output code(s))",
            processor.label(),
            index,
            processor.outputs().len()
        );
        self.processors.push(processor);
        Ok(())
    }

    /// Builder-style `register`
    pub fn with(mut self, processor: impl Into<Processor>) -> Result<Self, DispatchError> {
        self.register(processor)?;
        Ok(self)
    }

    /// Offer `event` to every processor in registration order.
    ///
    /// There is no short-circuit: every processor sees the event whether
    /// or not an earlier one acted on it. The first sink error aborts.
    pub fn dispatch<S: OutputSink + ?Sized>(
        &self,
        event: &RawEvent,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        trace!("dispatch {}", event);
        for processor in &self.processors {
            processor.process(event, sink)?;
        }
        Ok(())
    }

    /// Union of every registered processor's output codes
    pub fn capabilities(&self) -> Capabilities {
        self.processors
            .iter()
            .flat_map(|p| p.outputs())
            .collect()
    }

    /// Processor that owns `claim`, if any
    pub fn owner_of(&self, claim: &Claim) -> Option<&Processor> {
        self.owners.get(claim).map(|&index| &self.processors[index])
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}
