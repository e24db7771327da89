//! State values for line state machines.
//!
//! A `State` pairs a name with the `Pattern` that recognizes it. States are
//! created by `LineStateMachine::define_state` and remember which machine
//! created them, so a state from one machine is never mistaken for a state
//! of another one with the same name.

use super::pattern::Pattern;
use regex::Captures;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of one machine instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(Uuid);

impl MachineId {
    /// Generate a fresh, random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MachineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named state recognized by a pattern.
///
/// States are immutable: name, pattern and owner are fixed at creation.
/// Cloning is cheap.
///
/// # Example
///
/// ```rust
/// use linestate::LineStateMachine;
///
/// let mut machine = LineStateMachine::new();
/// let header = machine.define_state("HEADER", "^#").unwrap();
///
/// assert_eq!(header.name(), "HEADER");
/// assert!(header.is_state("# title"));
/// assert!(!header.is_state("plain text"));
/// assert_eq!(header.owner(), machine.id());
/// ```
#[derive(Clone)]
pub struct State {
    name: Arc<str>,
    pattern: Pattern,
    owner: MachineId,
}

impl State {
    pub(crate) fn new(name: &str, pattern: Pattern, owner: MachineId) -> Self {
        Self {
            name: Arc::from(name),
            pattern,
            owner,
        }
    }

    /// The same state, owned by another machine.
    pub(crate) fn with_owner(&self, owner: MachineId) -> Self {
        Self {
            name: Arc::clone(&self.name),
            pattern: self.pattern.clone(),
            owner,
        }
    }

    /// The state's name, unique within its machine.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Identity of the machine that defined this state.
    pub fn owner(&self) -> MachineId {
        self.owner
    }

    /// Check if `line` is recognized by this state.
    pub fn is_state(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// Capture groups of this state's pattern against `line`.
    pub fn captures<'l>(&self, line: &'l str) -> Option<Captures<'l>> {
        self.pattern.captures(line)
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for State {}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name())
            .field("pattern", &self.pattern.source())
            .finish()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<State \"{}\">", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(name: &str, pattern: &str, owner: MachineId) -> State {
        State::new(name, Pattern::new(pattern).unwrap(), owner)
    }

    #[test]
    fn accessors_return_definition() {
        let owner = MachineId::new();
        let s = state("HEADER", "^#", owner);

        assert_eq!(s.name(), "HEADER");
        assert_eq!(s.pattern().source(), "^#");
        assert_eq!(s.owner(), owner);
    }

    #[test]
    fn is_state_uses_pattern() {
        let s = state("BODY", "^[^#]", MachineId::new());

        assert!(s.is_state("line one"));
        assert!(!s.is_state("# title"));
    }

    #[test]
    fn equality_requires_same_owner() {
        let owner = MachineId::new();
        let a = state("A", "a", owner);
        let same = state("A", "a", owner);
        let other_machine = state("A", "a", MachineId::new());

        assert_eq!(a, same);
        assert_ne!(a, other_machine);
    }

    #[test]
    fn captures_use_the_pattern() {
        let s = state("LEVEL", r"\[(\w+)\]", MachineId::new());

        let caps = s.captures("[WARN] low disk").unwrap();
        assert_eq!(&caps[1], "WARN");
        assert!(s.captures("text [WARN]").is_none());
    }

    #[test]
    fn reowned_state_is_distinct() {
        let s = state("A", "a", MachineId::new());
        let moved = s.with_owner(MachineId::new());

        assert_ne!(moved, s);
        assert_eq!(moved.name(), "A");
        assert_eq!(moved.pattern(), s.pattern());
    }

    #[test]
    fn clone_is_equal() {
        let s = state("A", "a", MachineId::new());
        assert_eq!(s.clone(), s);
    }

    #[test]
    fn display_names_the_state() {
        let s = state("HEADER", "^#", MachineId::new());
        assert_eq!(s.to_string(), "<State \"HEADER\">");
    }

    #[test]
    fn machine_ids_are_unique() {
        assert_ne!(MachineId::new(), MachineId::new());
    }

    #[test]
    fn machine_id_serializes_as_uuid() {
        let id = MachineId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));

        let back: MachineId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
