// Servalrs Config
// TOML configuration and the built-in controller layout

pub mod layout;
pub mod parser;

pub use parser::{Config, ConfigError, DeviceConfig};
