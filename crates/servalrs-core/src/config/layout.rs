// Servalrs Config - Built-in Layout
// Razer Serval mapping used when no config file overrides it

use crate::input::codes::{
    ABS_BRAKE, ABS_GAS, ABS_HAT0X, ABS_HAT0Y, ABS_RZ, ABS_X, ABS_Y, ABS_Z, BTN_A, BTN_B, BTN_TL,
    BTN_TR, BTN_X, BTN_Y, SERVAL_DEVICE_NAME,
};
use crate::processor::{AxisDomain, ButtonConfig, DirectionalConfig, MotionConfig, TriggerConfig};
use crate::Key;

pub const DEVICE_NAME: &str = SERVAL_DEVICE_NAME;
pub const VIRTUAL_DEVICE_NAME: &str = "razer-serval-virtual-device";

/// D-pad hat to arrow keys
pub fn dpad() -> DirectionalConfig {
    DirectionalConfig::arrows(ABS_HAT0X, ABS_HAT0Y, AxisDomain::Signed)
}

/// Left stick to arrow keys
pub fn left_stick() -> DirectionalConfig {
    DirectionalConfig::arrows(ABS_X, ABS_Y, AxisDomain::STICK)
}

/// Face and shoulder buttons to their letters
pub fn buttons() -> Vec<ButtonConfig> {
    vec![
        ButtonConfig::new(BTN_A, Key::A),
        ButtonConfig::new(BTN_B, Key::B),
        ButtonConfig::new(BTN_X, Key::X),
        ButtonConfig::new(BTN_Y, Key::Y),
        ButtonConfig::new(BTN_TL, Key::L),
        ButtonConfig::new(BTN_TR, Key::R),
    ]
}

/// LT to K, RT to E
pub fn triggers() -> Vec<TriggerConfig> {
    vec![
        TriggerConfig::new(ABS_GAS, Key::K),
        TriggerConfig::new(ABS_BRAKE, Key::E),
    ]
}

/// Right stick to pointer motion
pub fn right_stick() -> MotionConfig {
    MotionConfig::pointer(ABS_Z, ABS_RZ)
}
