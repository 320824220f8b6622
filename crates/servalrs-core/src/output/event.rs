// Servalrs Output Layer - Output Events
// What processors write to the virtual device

use std::fmt;

use crate::Key;

/// REL_X relative axis code
pub const REL_X: u16 = 0x00;
/// REL_Y relative axis code
pub const REL_Y: u16 = 0x01;

/// Event domain on the virtual device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputDomain {
    /// Key press (1) / release (0)
    Key,
    /// Signed relative motion delta
    Relative,
}

/// A single (domain, code, value) write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputEvent {
    pub domain: OutputDomain,
    pub code: u16,
    pub value: i32,
}

impl OutputEvent {
    pub fn press(key: Key) -> Self {
        Self {
            domain: OutputDomain::Key,
            code: key.code(),
            value: 1,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            domain: OutputDomain::Key,
            code: key.code(),
            value: 0,
        }
    }

    pub fn relative(axis: u16, delta: i32) -> Self {
        Self {
            domain: OutputDomain::Relative,
            code: axis,
            value: delta,
        }
    }

    /// The capability this write needs declared on the device
    pub fn output_code(&self) -> OutputCode {
        match self.domain {
            OutputDomain::Key => OutputCode::Key(Key::from(self.code)),
            OutputDomain::Relative => OutputCode::Relative(self.code),
        }
    }
}

impl fmt::Display for OutputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.domain {
            OutputDomain::Key => {
                let state = if self.value == 0 { "release" } else { "press" };
                write!(f, "{} {}", state, Key::from(self.code))
            }
            OutputDomain::Relative => {
                write!(f, "rel {} {:+}", relative_axis_name(self.code), self.value)
            }
        }
    }
}

/// Something a processor may emit, as declared in device capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputCode {
    Key(Key),
    Relative(u16),
}

impl fmt::Display for OutputCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputCode::Key(key) => write!(f, "{}", key),
            OutputCode::Relative(axis) => write!(f, "{}", relative_axis_name(*axis)),
        }
    }
}

pub fn relative_axis_name(axis: u16) -> &'static str {
    match axis {
        REL_X => "REL_X",
        REL_Y => "REL_Y",
        _ => "REL_UNKNOWN",
    }
}
