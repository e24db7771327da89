//! Problems found by static checks.

use thiserror::Error;

/// A well-formedness problem in a machine's grammar.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LintIssue {
    #[error("no initial state defined; every advance will fail")]
    NoInitialState,

    #[error("state '{name}' cannot be reached from the start")]
    UnreachableState { name: String },

    #[error("transition {from} -> {to} is defined more than once")]
    DuplicateTransition { from: String, to: String },

    #[error("successors '{first}' and '{second}' of {from} share the same pattern")]
    IdenticalPatterns {
        from: String,
        first: String,
        second: String,
    },
}

/// How seriously to treat an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The grammar works, but has dead weight
    Warning,
    /// Some input is guaranteed to fail
    Error,
}

impl LintIssue {
    pub fn severity(&self) -> Severity {
        match self {
            LintIssue::NoInitialState | LintIssue::IdenticalPatterns { .. } => Severity::Error,
            LintIssue::UnreachableState { .. } | LintIssue::DuplicateTransition { .. } => {
                Severity::Warning
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guaranteed_failures_are_errors() {
        assert_eq!(LintIssue::NoInitialState.severity(), Severity::Error);
        let identical = LintIssue::IdenticalPatterns {
            from: "A".to_string(),
            first: "B".to_string(),
            second: "C".to_string(),
        };
        assert_eq!(identical.severity(), Severity::Error);
    }

    #[test]
    fn dead_weight_is_a_warning() {
        let unreachable = LintIssue::UnreachableState {
            name: "A".to_string(),
        };
        assert_eq!(unreachable.severity(), Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn messages_name_the_states() {
        let issue = LintIssue::DuplicateTransition {
            from: "A".to_string(),
            to: "B".to_string(),
        };
        assert_eq!(issue.to_string(), "transition A -> B is defined more than once");
    }
}
