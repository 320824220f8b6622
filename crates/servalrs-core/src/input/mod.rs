// Servalrs Input Layer
// Raw events, controller codes and the sources that produce them

pub mod codes;
mod event;
mod filter;
mod source;

#[cfg(feature = "evdev-io")]
mod device;

pub use event::{EventKind, RawEvent, EV_ABS, EV_KEY, EV_REL};
pub use filter::{is_virtual_device, matches_device};
pub use source::{EventSource, ReplaySource, SourceError, SourceResult};

#[cfg(feature = "evdev-io")]
pub use device::{DeviceInfo, EvdevSource};
