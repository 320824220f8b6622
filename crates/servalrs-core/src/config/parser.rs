// Servalrs Config Parser - TOML with Serde
// Startup configuration: device selection and the controller layout

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use super::layout;
use crate::dispatch::{DispatchError, Dispatcher};
use crate::processor::{
    AxisDomain, ButtonConfig, ButtonProcessor, DirectionalConfig, DirectionalProcessor,
    MotionConfig, MotionProcessor, TriggerConfig, TriggerProcessor,
};
use crate::Key;

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Root TOML table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    #[serde(default)]
    pub device: Option<DeviceToml>,

    /// Replaces the default button list when present
    #[serde(default)]
    pub button: Option<Vec<ButtonToml>>,

    #[serde(default)]
    pub dpad: Option<HatToml>,

    #[serde(default)]
    pub left_stick: Option<StickToml>,

    #[serde(default)]
    pub right_stick: Option<PointerToml>,

    /// Replaces the default trigger list when present
    #[serde(default)]
    pub trigger: Option<Vec<TriggerToml>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceToml {
    /// Exact evdev name (or /dev/input path) of the controller
    pub name: Option<String>,
    /// Name of the uinput device we create
    pub virtual_name: Option<String>,
    /// Grab the controller exclusively
    pub grab: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonToml {
    pub input: u16,
    pub output: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HatToml {
    pub horizontal: Option<u16>,
    pub vertical: Option<u16>,
    pub left: Option<String>,
    pub right: Option<String>,
    pub up: Option<String>,
    pub down: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StickToml {
    pub horizontal: Option<u16>,
    pub vertical: Option<u16>,
    pub left: Option<String>,
    pub right: Option<String>,
    pub up: Option<String>,
    pub down: Option<String>,
    pub center: Option<i32>,
    pub dead_zone: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointerToml {
    pub horizontal: Option<u16>,
    pub vertical: Option<u16>,
    pub center: Option<i32>,
    pub step: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerToml {
    pub input: u16,
    pub output: String,
    pub threshold: Option<i32>,
}

/// Which controller to read and what to call the virtual device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub name: String,
    pub virtual_name: String,
    pub grab: bool,
}

/// Resolved configuration.
///
/// `Config::default()` is the built-in Razer Serval layout; a config file
/// only needs to mention what it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub device: DeviceConfig,
    pub dpad: DirectionalConfig,
    pub left_stick: DirectionalConfig,
    pub buttons: Vec<ButtonConfig>,
    pub triggers: Vec<TriggerConfig>,
    pub right_stick: MotionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: DeviceConfig {
                name: layout::DEVICE_NAME.to_string(),
                virtual_name: layout::VIRTUAL_DEVICE_NAME.to_string(),
                grab: false,
            },
            dpad: layout::dpad(),
            left_stick: layout::left_stick(),
            buttons: layout::buttons(),
            triggers: layout::triggers(),
            right_stick: layout::right_stick(),
        }
    }
}

impl Config {
    /// Parse a TOML configuration file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        debug!("Loading config from {}", path.as_ref().display());
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

        toml_config.to_config()
    }

    /// Get the default config path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("servalrs").join("config.toml"))
    }

    /// Load from default location (~/.config/servalrs/config.toml)
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_toml_path(path);
            }
        }
        // Built-in layout if the file doesn't exist
        Ok(Self::default())
    }

    /// Build the processor pipeline.
    ///
    /// Registration order is d-pad, left stick, buttons, triggers, right
    /// stick.
    pub fn dispatcher(&self) -> Result<Dispatcher, DispatchError> {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(DirectionalProcessor::new(self.dpad))?;
        dispatcher.register(DirectionalProcessor::new(self.left_stick))?;
        for button in &self.buttons {
            dispatcher.register(ButtonProcessor::new(*button))?;
        }
        for trigger in &self.triggers {
            dispatcher.register(TriggerProcessor::new(*trigger))?;
        }
        dispatcher.register(MotionProcessor::new(self.right_stick))?;
        Ok(dispatcher)
    }
}

impl ConfigToml {
    /// Convert parsed TOML to internal Config structure
    fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        if let Some(device) = &self.device {
            if let Some(name) = &device.name {
                config.device.name = name.clone();
            }
            if let Some(virtual_name) = &device.virtual_name {
                config.device.virtual_name = virtual_name.clone();
            }
            if let Some(grab) = device.grab {
                config.device.grab = grab;
            }
        }

        if let Some(buttons) = &self.button {
            config.buttons = buttons
                .iter()
                .map(|b| -> Result<ButtonConfig, ConfigError> {
                    Ok(ButtonConfig::new(b.input, parse_key(&b.output)?))
                })
                .collect::<Result<_, _>>()?;
        }

        if let Some(hat) = &self.dpad {
            let dpad = &mut config.dpad;
            apply_axes(dpad, hat.horizontal, hat.vertical);
            apply_arrow_keys(dpad, &hat.left, &hat.right, &hat.up, &hat.down)?;
        }

        if let Some(stick) = &self.left_stick {
            let left = &mut config.left_stick;
            apply_axes(left, stick.horizontal, stick.vertical);
            apply_arrow_keys(left, &stick.left, &stick.right, &stick.up, &stick.down)?;
            if let AxisDomain::Magnitude { center, dead_zone } = &mut left.domain {
                if let Some(value) = stick.center {
                    *center = check_center("left_stick", value)?;
                }
                if let Some(value) = stick.dead_zone {
                    if value < 0 {
                        return Err(ConfigError::InvalidValue(format!(
                            "left_stick.dead_zone must not be negative, got {}",
                            value
                        )));
                    }
                    *dead_zone = value;
                }
            }
        }

        if let Some(pointer) = &self.right_stick {
            let right = &mut config.right_stick;
            if let Some(code) = pointer.horizontal {
                right.horizontal.code = code;
            }
            if let Some(code) = pointer.vertical {
                right.vertical.code = code;
            }
            if let Some(center) = pointer.center {
                right.center = check_center("right_stick", center)?;
            }
            if let Some(step) = pointer.step {
                if step <= 0 {
                    return Err(ConfigError::InvalidValue(format!(
                        "right_stick.step must be positive, got {}",
                        step
                    )));
                }
                right.step = step;
            }
        }

        if let Some(triggers) = &self.trigger {
            config.triggers = triggers
                .iter()
                .map(|t| -> Result<TriggerConfig, ConfigError> {
                    let trigger = TriggerConfig::new(t.input, parse_key(&t.output)?);
                    Ok(match t.threshold {
                        Some(threshold) => trigger.with_threshold(threshold),
                        None => trigger,
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        Ok(config)
    }
}

fn apply_axes(config: &mut DirectionalConfig, horizontal: Option<u16>, vertical: Option<u16>) {
    if let Some(code) = horizontal {
        config.horizontal.code = code;
    }
    if let Some(code) = vertical {
        config.vertical.code = code;
    }
}

fn apply_arrow_keys(
    config: &mut DirectionalConfig,
    left: &Option<String>,
    right: &Option<String>,
    up: &Option<String>,
    down: &Option<String>,
) -> Result<(), ConfigError> {
    let slots = [
        (left, &mut config.horizontal.negative),
        (right, &mut config.horizontal.positive),
        (up, &mut config.vertical.negative),
        (down, &mut config.vertical.positive),
    ];
    for (name, slot) in slots {
        if let Some(name) = name {
            *slot = parse_key(name)?;
        }
    }
    Ok(())
}

/// Stick axes report 0..=255
fn check_center(section: &str, value: i32) -> Result<i32, ConfigError> {
    if !(0..=255).contains(&value) {
        return Err(ConfigError::InvalidValue(format!(
            "{}.center must be within 0..=255, got {}",
            section, value
        )));
    }
    Ok(value)
}

fn parse_key(name: &str) -> Result<Key, ConfigError> {
    let trimmed = name.trim();
    crate::key::key_from_name(trimmed).ok_or_else(|| ConfigError::InvalidKey(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::codes::{ABS_GAS, ABS_HAT0X, ABS_X, BTN_A, BTN_TL};

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("a").unwrap(), Key::A);
        assert_eq!(parse_key(" KEY_LEFT ").unwrap(), Key::LEFT);
        assert!(matches!(parse_key("notakey"), Err(ConfigError::InvalidKey(k)) if k == "notakey"));
    }

    #[test]
    fn test_empty_toml_is_default_layout() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_device_section() {
        let config = Config::from_toml(
            r#"
            [device]
            name = "/dev/input/event9"
            grab = true
            "#,
        )
        .unwrap();
        assert_eq!(config.device.name, "/dev/input/event9");
        assert_eq!(config.device.virtual_name, layout::VIRTUAL_DEVICE_NAME);
        assert!(config.device.grab);
    }

    #[test]
    fn test_buttons_replace_defaults() {
        let config = Config::from_toml(
            r#"
            [[button]]
            input = 304
            output = "space"

            [[button]]
            input = 310
            output = "BTN_LEFT"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.buttons,
            vec![
                ButtonConfig::new(BTN_A, Key::from(57)),
                ButtonConfig::new(BTN_TL, Key::from(272)),
            ]
        );
    }

    #[test]
    fn test_partial_stick_override() {
        let config = Config::from_toml(
            r#"
            [left_stick]
            dead_zone = 40
            left = "a"
            right = "d"
            "#,
        )
        .unwrap();
        let stick = config.left_stick;
        assert_eq!(stick.horizontal.code, ABS_X);
        assert_eq!(stick.horizontal.negative, Key::A);
        assert_eq!(stick.horizontal.positive, Key::from(32));
        assert_eq!(stick.vertical.negative, Key::UP);
        assert_eq!(
            stick.domain,
            AxisDomain::Magnitude {
                center: 128,
                dead_zone: 40
            }
        );
    }

    #[test]
    fn test_dpad_rejects_dead_zone() {
        let result = Config::from_toml(
            r#"
            [dpad]
            dead_zone = 5
            "#,
        );
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_trigger_threshold() {
        let config = Config::from_toml(
            r#"
            [[trigger]]
            input = 9
            output = "left_shift"
            threshold = 64
            "#,
        )
        .unwrap();
        assert_eq!(
            config.triggers,
            vec![TriggerConfig::new(ABS_GAS, Key::from(42)).with_threshold(64)]
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_toml("[right_stick]\nstep = 0"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            Config::from_toml("[left_stick]\ndead_zone = -1"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            Config::from_toml("[left_stick]\ncenter = -2147483648\ndead_zone = 1"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            Config::from_toml("[right_stick]\ncenter = 256"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            Config::from_toml("[[button]]\ninput = 304\noutput = \"nope\""),
            Err(ConfigError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            Config::from_toml("[device]\nspeed = 3"),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_overlapping_layout_fails_to_build() {
        let config = Config::from_toml(
            r#"
            [left_stick]
            horizontal = 16
            "#,
        )
        .unwrap();
        assert_eq!(config.left_stick.horizontal.code, ABS_HAT0X);
        assert!(config.dispatcher().is_err());
    }

    #[test]
    fn test_default_dispatcher_order() {
        let dispatcher = Config::default().dispatcher().unwrap();
        let labels: Vec<_> = dispatcher.processors().iter().map(|p| p.label()).collect();
        assert_eq!(
            labels,
            vec![
                "directional",
                "directional",
                "button",
                "button",
                "button",
                "button",
                "button",
                "button",
                "trigger",
                "trigger",
                "motion",
            ]
        );
    }

    #[test]
    fn test_from_toml_path_missing_file() {
        let result = Config::from_toml_path("/nonexistent/servalrs/config.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("servalrs/config.toml"));
        }
    }

    #[test]
    fn test_button_default_a() {
        assert_eq!(Config::default().buttons[0], ButtonConfig::new(BTN_A, Key::A));
    }
}
