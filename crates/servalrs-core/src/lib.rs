// Servalrs Core Library
// Game controller to keyboard/mouse translation pipeline

pub mod config;
pub mod dispatch;
pub mod event;
pub mod input;
pub mod key;
pub mod output;
pub mod processor;

pub use config::{Config, ConfigError, DeviceConfig};
pub use dispatch::{DispatchError, Dispatcher};
pub use event::{EventLoop, EventLoopError, EventLoopResult};
pub use input::{EventKind, EventSource, RawEvent, ReplaySource, SourceError, SourceResult};
pub use key::Key;
pub use output::{
    Capabilities, OutputCode, OutputDomain, OutputEvent, OutputSink, RecordingSink, SinkError,
    SinkOp,
};
pub use processor::{
    AxisBinding, AxisDomain, ButtonConfig, ButtonProcessor, Claim, DirectionalConfig,
    DirectionalProcessor, MotionAxis, MotionConfig, MotionProcessor, Processor, TriggerConfig,
    TriggerProcessor,
};

#[cfg(feature = "evdev-io")]
pub use input::{DeviceInfo, EvdevSource};
#[cfg(feature = "evdev-io")]
pub use output::VirtualDevice;
