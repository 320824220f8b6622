// Servalrs Pure Rust uinput Output Layer
// Virtual keyboard/mouse device creation and event emission

use evdev::uinput::VirtualDeviceBuilder;
use evdev::{AttributeSet, EventType, InputEvent, RelativeAxisType};
use log::debug;
use smallvec::SmallVec;

use super::capabilities::Capabilities;
use super::event::{OutputDomain, OutputEvent};
use super::sink::{OutputSink, SinkError};

/// Virtual uinput device the synthesized events go to.
///
/// Writes are buffered until `sync`, which emits them together followed
/// by a SYN_REPORT.
pub struct VirtualDevice {
    device: evdev::uinput::VirtualDevice,
    capabilities: Capabilities,
    pending: SmallVec<[InputEvent; 4]>,
}

impl VirtualDevice {
    /// Name used when the config does not set one
    pub const DEFAULT_NAME: &'static str = crate::config::layout::VIRTUAL_DEVICE_NAME;

    /// Create a virtual device declaring exactly `capabilities`
    pub fn new(name: &str, capabilities: &Capabilities) -> Result<Self, SinkError> {
        let creation = |e: std::io::Error| SinkError::DeviceCreation(e.to_string());

        let mut builder = VirtualDeviceBuilder::new().map_err(creation)?.name(name);

        if capabilities.has_keys() {
            let mut keys = AttributeSet::<evdev::Key>::new();
            for key in capabilities.keys() {
                keys.insert(evdev::Key::new(key.code()));
            }
            builder = builder.with_keys(&keys).map_err(creation)?;
        }

        if capabilities.has_relative_axes() {
            let mut axes = AttributeSet::<RelativeAxisType>::new();
            for axis in capabilities.relative_axes() {
                axes.insert(RelativeAxisType(axis));
            }
            builder = builder.with_relative_axes(&axes).map_err(creation)?;
        }

        let device = builder.build().map_err(creation)?;
        debug!("Created virtual device '{}' with {}", name, capabilities);

        Ok(Self {
            device,
            capabilities: capabilities.clone(),
            pending: SmallVec::new(),
        })
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn to_input_event(event: &OutputEvent) -> InputEvent {
        let event_type = match event.domain {
            OutputDomain::Key => EventType::KEY,
            OutputDomain::Relative => EventType::RELATIVE,
        };
        InputEvent::new(event_type, event.code, event.value)
    }
}

impl OutputSink for VirtualDevice {
    fn write(&mut self, event: OutputEvent) -> Result<(), SinkError> {
        // The kernel drops undeclared codes silently, so refuse them here
        if !self.capabilities.permits(&event) {
            return Err(SinkError::Undeclared(event));
        }
        self.pending.push(Self::to_input_event(&event));
        Ok(())
    }

    fn sync(&mut self) -> Result<(), SinkError> {
        // emit() appends the SYN_REPORT itself
        let result = self.device.emit(&self.pending);
        self.pending.clear();
        result.map_err(SinkError::Write)
    }
}
