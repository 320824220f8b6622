// Servalrs Output Layer
// Output events, device capabilities and the sinks that receive them

mod capabilities;
mod event;
mod recording;
mod sink;

#[cfg(feature = "evdev-io")]
mod uinput;

pub use capabilities::Capabilities;
pub use event::{relative_axis_name, OutputCode, OutputDomain, OutputEvent, REL_X, REL_Y};
pub use recording::{RecordingSink, SinkOp};
pub use sink::{OutputSink, SinkError};

#[cfg(feature = "evdev-io")]
pub use uinput::VirtualDevice;
