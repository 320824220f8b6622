// Servalrs Key Type
// Output key codes from Linux input-event-codes.h

use std::fmt;
use std::str::FromStr;

/// Represents a single key code written to the virtual device.
///
/// This is a newtype wrapper around u16 for type safety.
/// The numeric values match Linux input-event-codes.h definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Key(pub u16);

impl Key {
    pub const A: Key = Key(30);
    pub const B: Key = Key(48);
    pub const E: Key = Key(18);
    pub const K: Key = Key(37);
    pub const L: Key = Key(38);
    pub const R: Key = Key(19);
    pub const X: Key = Key(45);
    pub const Y: Key = Key(21);
    pub const UP: Key = Key(103);
    pub const LEFT: Key = Key(105);
    pub const RIGHT: Key = Key(106);
    pub const DOWN: Key = Key(108);

    /// Get the raw numeric code value
    pub fn code(self) -> u16 {
        self.0
    }

    /// Get the name of this key
    pub fn name(self) -> &'static str {
        key_name(self.0)
    }
}

impl From<u16> for Key {
    fn from(code: u16) -> Self {
        Key(code)
    }
}

impl From<Key> for u16 {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        key_from_name(s).ok_or_else(|| format!("Unknown key: {}", s))
    }
}

// Names accepted in config files. BTN_* entries allow mapping a pad
// button onto a mouse button.
const KEY_TABLE: &[(&str, u16)] = &[
    ("ESC", 1),
    ("1", 2),
    ("2", 3),
    ("3", 4),
    ("4", 5),
    ("5", 6),
    ("6", 7),
    ("7", 8),
    ("8", 9),
    ("9", 10),
    ("0", 11),
    ("MINUS", 12),
    ("EQUAL", 13),
    ("BACKSPACE", 14),
    ("TAB", 15),
    ("Q", 16),
    ("W", 17),
    ("E", 18),
    ("R", 19),
    ("T", 20),
    ("Y", 21),
    ("U", 22),
    ("I", 23),
    ("O", 24),
    ("P", 25),
    ("LEFT_BRACE", 26),
    ("RIGHT_BRACE", 27),
    ("ENTER", 28),
    ("LEFT_CTRL", 29),
    ("A", 30),
    ("S", 31),
    ("D", 32),
    ("F", 33),
    ("G", 34),
    ("H", 35),
    ("J", 36),
    ("K", 37),
    ("L", 38),
    ("SEMICOLON", 39),
    ("APOSTROPHE", 40),
    ("GRAVE", 41),
    ("LEFT_SHIFT", 42),
    ("BACKSLASH", 43),
    ("Z", 44),
    ("X", 45),
    ("C", 46),
    ("V", 47),
    ("B", 48),
    ("N", 49),
    ("M", 50),
    ("COMMA", 51),
    ("DOT", 52),
    ("SLASH", 53),
    ("RIGHT_SHIFT", 54),
    ("LEFT_ALT", 56),
    ("SPACE", 57),
    ("CAPSLOCK", 58),
    ("F1", 59),
    ("F2", 60),
    ("F3", 61),
    ("F4", 62),
    ("F5", 63),
    ("F6", 64),
    ("F7", 65),
    ("F8", 66),
    ("F9", 67),
    ("F10", 68),
    ("F11", 87),
    ("F12", 88),
    ("RIGHT_CTRL", 97),
    ("RIGHT_ALT", 100),
    ("HOME", 102),
    ("UP", 103),
    ("PAGE_UP", 104),
    ("LEFT", 105),
    ("RIGHT", 106),
    ("END", 107),
    ("DOWN", 108),
    ("PAGE_DOWN", 109),
    ("INSERT", 110),
    ("DELETE", 111),
    ("LEFT_META", 125),
    ("RIGHT_META", 126),
    ("BTN_LEFT", 272),
    ("BTN_RIGHT", 273),
    ("BTN_MIDDLE", 274),
];

/// Display name for a key code
pub fn key_name(code: u16) -> &'static str {
    KEY_TABLE
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
        .unwrap_or("UNKNOWN")
}

/// Look up a key by name.
///
/// Matching is case-insensitive and accepts the evdev `KEY_` prefix,
/// so `"a"`, `"A"` and `"KEY_A"` all resolve to the same key.
pub fn key_from_name(name: &str) -> Option<Key> {
    let name_upper = name.trim().to_ascii_uppercase();
    let lookup = |n: &str| {
        KEY_TABLE
            .iter()
            .find(|(entry, _)| *entry == n)
            .map(|(_, code)| Key::from(*code))
    };

    lookup(&name_upper).or_else(|| name_upper.strip_prefix("KEY_").and_then(lookup))
}
