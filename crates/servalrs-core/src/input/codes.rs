// Servalrs Input Layer - Controller Codes
// Raw button and axis codes reported by the Razer Serval

// Face buttons (EV_KEY)
pub const BTN_A: u16 = 0x130;
pub const BTN_B: u16 = 0x131;
pub const BTN_X: u16 = 0x133;
pub const BTN_Y: u16 = 0x134;

// Shoulder buttons (EV_KEY)
pub const BTN_TL: u16 = 0x136;
pub const BTN_TR: u16 = 0x137;

// Left stick, 0..=255 centered on 128 (EV_ABS)
pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;

// Right stick, 0..=255 centered on 128 (EV_ABS)
pub const ABS_Z: u16 = 0x02;
pub const ABS_RZ: u16 = 0x05;

// Analog triggers, 0..=255 measured from released (EV_ABS)
pub const ABS_GAS: u16 = 0x09;
pub const ABS_BRAKE: u16 = 0x0a;

// D-pad hat, -1/0/1 (EV_ABS)
pub const ABS_HAT0X: u16 = 0x10;
pub const ABS_HAT0Y: u16 = 0x11;

/// Exact device name the controller reports to evdev
pub const SERVAL_DEVICE_NAME: &str = "Razer Razer Serval";
