// Servalrs Input Layer - Raw Events
// One telemetry sample from the physical controller

use std::fmt;

/// EV_KEY event type code from input-event-codes.h
pub const EV_KEY: u16 = 0x01;
/// EV_REL event type code
pub const EV_REL: u16 = 0x02;
/// EV_ABS event type code
pub const EV_ABS: u16 = 0x03;

/// Event type of a raw sample.
///
/// Only the first three kinds are ever owned by a processor; everything
/// else (EV_SYN, EV_MSC, ...) is carried as `Other` and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Key,
    AbsoluteAxis,
    RelativeAxis,
    Other(u16),
}

impl EventKind {
    /// Classify an evdev event type code
    pub fn from_type(event_type: u16) -> Self {
        match event_type {
            EV_KEY => EventKind::Key,
            EV_ABS => EventKind::AbsoluteAxis,
            EV_REL => EventKind::RelativeAxis,
            other => EventKind::Other(other),
        }
    }

    /// Convert back to the evdev event type code
    pub fn type_code(self) -> u16 {
        match self {
            EventKind::Key => EV_KEY,
            EventKind::AbsoluteAxis => EV_ABS,
            EventKind::RelativeAxis => EV_REL,
            EventKind::Other(code) => code,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Key => write!(f, "key"),
            EventKind::AbsoluteAxis => write!(f, "abs"),
            EventKind::RelativeAxis => write!(f, "rel"),
            EventKind::Other(code) => write!(f, "type {}", code),
        }
    }
}

/// A raw input event: kind, code and integer payload.
///
/// `value` is 0/1 for button edges, -1/0/1 for the hat, and 0..=255 for
/// analog sticks and triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub kind: EventKind,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub fn new(kind: EventKind, code: u16, value: i32) -> Self {
        Self { kind, code, value }
    }

    /// Build from the evdev (type, code, value) triple
    pub fn from_raw(event_type: u16, code: u16, value: i32) -> Self {
        Self::new(EventKind::from_type(event_type), code, value)
    }

    pub fn key(code: u16, value: i32) -> Self {
        Self::new(EventKind::Key, code, value)
    }

    pub fn absolute(code: u16, value: i32) -> Self {
        Self::new(EventKind::AbsoluteAxis, code, value)
    }

    pub fn relative(code: u16, value: i32) -> Self {
        Self::new(EventKind::RelativeAxis, code, value)
    }
}

impl fmt::Display for RawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {}", self.kind, self.code, self.value)
    }
}

#[cfg(feature = "evdev-io")]
impl From<evdev::InputEvent> for RawEvent {
    fn from(event: evdev::InputEvent) -> Self {
        Self::from_raw(event.event_type().0, event.code(), event.value())
    }
}
