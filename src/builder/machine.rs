//! Builder for constructing line state machines.

use crate::core::State;
use crate::engine::{DefinitionError, LineStateMachine};

/// Builder for constructing line state machines with a fluent API.
///
/// States and transitions are referenced by name and resolved in `build`,
/// so transitions may be listed before the states they mention. All states
/// are defined first, then transitions in the order given.
///
/// # Example
///
/// ```rust
/// use linestate::builder::LineStateMachineBuilder;
///
/// let mut machine = LineStateMachineBuilder::new()
///     .state("HEADER", "^#")
///     .state("BODY", "^[^#]")
///     .initial("HEADER")
///     .transition("HEADER", "BODY")
///     .transition("BODY", "BODY")
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.advance_all(["# title", "a", "b"]).unwrap(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineStateMachineBuilder {
    states: Vec<(String, String)>,
    transitions: Vec<(Option<String>, String)>,
    record_history: bool,
}

impl LineStateMachineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state recognized by `pattern`.
    pub fn state(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.states.push((name.into(), pattern.into()));
        self
    }

    /// Allow `to` as the first state of the stream.
    pub fn initial(mut self, to: impl Into<String>) -> Self {
        self.transitions.push((None, to.into()));
        self
    }

    /// Allow `to` to follow `from`.
    pub fn transition(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.transitions.push((Some(from.into()), to.into()));
        self
    }

    /// Add several transitions at once; `None` sources mean the pseudo-start.
    pub fn transitions<I, F, T>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (Option<F>, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        self.transitions.extend(
            transitions
                .into_iter()
                .map(|(from, to)| (from.map(Into::into), to.into())),
        );
        self
    }

    /// Record every accepted line in the machine's history.
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Build the machine, failing on the first invalid definition.
    pub fn build(self) -> Result<LineStateMachine, DefinitionError> {
        let mut machine = LineStateMachine::new();
        machine.set_record_history(self.record_history);

        for (name, pattern) in &self.states {
            machine.define_state(name, pattern)?;
        }

        for (from, to) in &self.transitions {
            let dest = lookup(&machine, to)?;
            let source = from.as_deref().map(|name| lookup(&machine, name)).transpose()?;
            machine.define_transition(source.as_ref(), &dest)?;
        }

        Ok(machine)
    }
}

fn lookup(machine: &LineStateMachine, name: &str) -> Result<State, DefinitionError> {
    machine
        .state(name)
        .cloned()
        .ok_or_else(|| DefinitionError::UnknownState {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CurrentState, StepResult};

    #[test]
    fn empty_builder_builds_empty_machine() {
        let machine = LineStateMachineBuilder::new().build().unwrap();

        assert_eq!(machine.states().count(), 0);
        assert_eq!(machine.current_state(), CurrentState::NotStarted);
    }

    #[test]
    fn fluent_api_builds_machine() {
        let mut machine = LineStateMachineBuilder::new()
            .state("HEADER", "^#")
            .state("BODY", "^[^#]")
            .initial("HEADER")
            .transition("HEADER", "BODY")
            .build()
            .unwrap();

        let header = machine.state("HEADER").cloned().unwrap();
        assert_eq!(machine.successors(None).unwrap(), vec![&header]);
        assert!(matches!(machine.advance("# t"), Ok(StepResult::Transitioned(_))));
        assert!(matches!(machine.advance("body"), Ok(StepResult::Transitioned(_))));
        assert_eq!(machine.advance("more"), Ok(StepResult::Terminal));
    }

    #[test]
    fn transitions_may_precede_states() {
        let machine = LineStateMachineBuilder::new()
            .initial("A")
            .state("A", "a")
            .build();

        assert!(machine.is_ok());
    }

    #[test]
    fn unknown_transition_target_fails() {
        let result = LineStateMachineBuilder::new()
            .state("A", "a")
            .transition("A", "B")
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownState {
                name: "B".to_string()
            }
        );
    }

    #[test]
    fn unknown_transition_source_fails() {
        let result = LineStateMachineBuilder::new()
            .state("A", "a")
            .transition("Z", "A")
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownState {
                name: "Z".to_string()
            }
        );
    }

    #[test]
    fn duplicate_state_fails() {
        let result = LineStateMachineBuilder::new()
            .state("A", "a")
            .state("A", "b")
            .build();

        assert!(matches!(result, Err(DefinitionError::DuplicateState { .. })));
    }

    #[test]
    fn invalid_pattern_fails() {
        let result = LineStateMachineBuilder::new().state("A", "(").build();

        assert!(matches!(result, Err(DefinitionError::InvalidPattern { .. })));
    }

    #[test]
    fn add_multiple_transitions() {
        let machine = LineStateMachineBuilder::new()
            .state("A", "a")
            .state("B", "b")
            .transitions(vec![(None, "A"), (Some("A"), "B"), (Some("B"), "A")])
            .build()
            .unwrap();

        assert_eq!(machine.graph().edges().count(), 3);
    }

    #[test]
    fn record_history_is_applied() {
        let machine = LineStateMachineBuilder::new()
            .record_history(true)
            .build()
            .unwrap();

        assert!(machine.history().is_some());
    }
}
