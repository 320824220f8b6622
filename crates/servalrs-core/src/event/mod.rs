// Servalrs Event Handling
// The loop that connects a raw event source to the output sink

pub mod r#loop;

pub use r#loop::{EventLoop, EventLoopError, EventLoopResult};
