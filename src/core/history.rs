//! Traversal history tracking.
//!
//! When enabled on a machine, every accepted line appends a
//! `StateTransition` to the machine's `StateHistory`, giving the exact path
//! through the grammar that an input produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single accepted line.
///
/// # Example
///
/// ```rust
/// use linestate::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: None,
///     to: "HEADER".to_string(),
///     line: 1,
///     timestamp: Utc::now(),
/// };
/// assert!(transition.is_initial());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state left, `None` when leaving the pseudo-start
    pub from: Option<String>,
    /// The state entered
    pub to: String,
    /// 1-based ordinal of the accepted line since the last reset
    pub line: usize,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl StateTransition {
    /// Whether this transition left the pseudo-start.
    pub fn is_initial(&self) -> bool {
        self.from.is_none()
    }
}

/// Ordered history of accepted lines.
///
/// # Example
///
/// ```rust
/// use linestate::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: None,
///     to: "HEADER".to_string(),
///     line: 1,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Some("HEADER".to_string()),
///     to: "BODY".to_string(),
///     line: 2,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["HEADER", "BODY"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn record(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// The pseudo-start never appears. If the first recorded transition
    /// left a named state (a history resumed mid-stream), that state comes
    /// first.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(from) = self.transitions.first().and_then(|t| t.from.as_deref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.transitions.clear();
    }
}
