// Servalrs Output Layer - Device Capabilities
// The set of codes the virtual device must declare before any write

use std::collections::BTreeSet;
use std::fmt;

use super::event::{relative_axis_name, OutputCode, OutputDomain, OutputEvent};
use crate::Key;

/// Keys and relative axes declared on the virtual device.
///
/// Built from the registered processors, so every code a processor can
/// write is declared by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    keys: BTreeSet<Key>,
    relative_axes: BTreeSet<u16>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: OutputCode) {
        match code {
            OutputCode::Key(key) => {
                self.keys.insert(key);
            }
            OutputCode::Relative(axis) => {
                self.relative_axes.insert(axis);
            }
        }
    }

    pub fn contains(&self, code: OutputCode) -> bool {
        match code {
            OutputCode::Key(key) => self.keys.contains(&key),
            OutputCode::Relative(axis) => self.relative_axes.contains(&axis),
        }
    }

    /// Check whether the device would accept this write
    pub fn permits(&self, event: &OutputEvent) -> bool {
        match event.domain {
            OutputDomain::Key => self.keys.contains(&Key::from(event.code)),
            OutputDomain::Relative => self.relative_axes.contains(&event.code),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().copied()
    }

    pub fn relative_axes(&self) -> impl Iterator<Item = u16> + '_ {
        self.relative_axes.iter().copied()
    }

    pub fn has_keys(&self) -> bool {
        !self.keys.is_empty()
    }

    pub fn has_relative_axes(&self) -> bool {
        !self.relative_axes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len() + self.relative_axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<OutputCode> for Capabilities {
    fn from_iter<I: IntoIterator<Item = OutputCode>>(iter: I) -> Self {
        let mut caps = Self::new();
        caps.extend(iter);
        caps
    }
}

impl Extend<OutputCode> for Capabilities {
    fn extend<I: IntoIterator<Item = OutputCode>>(&mut self, iter: I) {
        for code in iter {
            self.insert(code);
        }
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.keys.iter().map(|k| k.name()).collect();
        let axes: Vec<&str> = self
            .relative_axes
            .iter()
            .map(|a| relative_axis_name(*a))
            .collect();
        write!(f, "keys [{}], rel [{}]", keys.join(", "), axes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::REL_X;

    #[test]
    fn test_insert_and_permits() {
        let caps: Capabilities = [OutputCode::Key(Key::A), OutputCode::Relative(REL_X)]
            .into_iter()
            .collect();

        assert!(caps.permits(&OutputEvent::press(Key::A)));
        assert!(caps.permits(&OutputEvent::release(Key::A)));
        assert!(caps.permits(&OutputEvent::relative(REL_X, -3)));
        assert!(!caps.permits(&OutputEvent::press(Key::B)));
        assert!(!caps.permits(&OutputEvent::relative(1, 3)));
    }

    #[test]
    fn test_duplicates_collapse() {
        let caps: Capabilities = [
            OutputCode::Key(Key::LEFT),
            OutputCode::Key(Key::LEFT),
            OutputCode::Key(Key::RIGHT),
        ]
        .into_iter()
        .collect();
        assert_eq!(caps.len(), 2);
        assert!(caps.has_keys());
        assert!(!caps.has_relative_axes());
    }

    #[test]
    fn test_empty() {
        let caps = Capabilities::new();
        assert!(caps.is_empty());
        assert!(!caps.contains(OutputCode::Key(Key::A)));
    }

    #[test]
    fn test_display_sorted_by_code() {
        let caps: Capabilities = [
            OutputCode::Key(Key::B),
            OutputCode::Key(Key::A),
            OutputCode::Relative(REL_X),
        ]
        .into_iter()
        .collect();
        assert_eq!(caps.to_string(), "keys [A, B], rel [REL_X]");
    }
}
