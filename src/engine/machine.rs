//! Line state machine that classifies a stream of lines.

use crate::core::{MachineId, Pattern, State, StateHistory, StateTransition};
use crate::engine::error::{DefinitionError, LookupError, MachineError, ParseError};
use crate::engine::graph::{Node, TransitionGraph};
use crate::engine::selection::Selection;
use chrono::Utc;
use std::collections::HashMap;

/// Label used for the pseudo-start in messages.
pub const NOT_STARTED: &str = "<not started>";

/// Result of feeding one line to the machine.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    /// The line was recognized and the machine entered this state
    Transitioned(State),

    /// The current state has no successors; the line was not consumed
    Terminal,
}

impl StepResult {
    pub fn state(&self) -> Option<&State> {
        match self {
            StepResult::Transitioned(state) => Some(state),
            StepResult::Terminal => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StepResult::Terminal)
    }
}

/// Where the machine's cursor is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurrentState<'a> {
    /// No line has been accepted since construction or the last reset
    NotStarted,
    Active(&'a State),
}

impl<'a> CurrentState<'a> {
    pub fn state(self) -> Option<&'a State> {
        match self {
            CurrentState::NotStarted => None,
            CurrentState::Active(state) => Some(state),
        }
    }

    pub fn name(self) -> Option<&'a str> {
        self.state().map(State::name)
    }

    pub fn is_started(self) -> bool {
        matches!(self, CurrentState::Active(_))
    }
}

/// Finite-state machine whose transitions are chosen by matching lines.
///
/// Definitions are append-only: states and transitions can be added at any
/// time but never removed. `reset` rewinds progress without touching them.
///
/// # Example
///
/// ```rust
/// use linestate::{LineStateMachine, StepResult};
///
/// let mut machine = LineStateMachine::new();
/// let header = machine.define_state("HEADER", "^#").unwrap();
/// let body = machine.define_state("BODY", "^[^#]").unwrap();
/// machine.define_transition(None, &header).unwrap();
/// machine.define_transition(Some(&header), &body).unwrap();
///
/// assert_eq!(machine.advance("# title").unwrap(), StepResult::Transitioned(header.clone()));
/// assert_eq!(machine.advance("line one").unwrap(), StepResult::Transitioned(body.clone()));
/// assert_eq!(machine.advance("line two").unwrap(), StepResult::Terminal);
///
/// assert_eq!(machine.state_count(&header).unwrap(), 1);
/// assert_eq!(machine.state_count(&body).unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct LineStateMachine {
    pub(crate) id: MachineId,
    pub(crate) states: Vec<State>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) graph: TransitionGraph,
    pub(crate) counters: Vec<usize>,
    pub(crate) cursor: Node,
    pub(crate) accepted: usize,
    pub(crate) history: Option<StateHistory>,
}

impl LineStateMachine {
    /// Create an empty machine with only the pseudo-start defined.
    pub fn new() -> Self {
        Self {
            id: MachineId::new(),
            states: Vec::new(),
            index: HashMap::new(),
            graph: TransitionGraph::new(),
            counters: Vec::new(),
            cursor: Node::Start,
            accepted: 0,
            history: None,
        }
    }

    /// Create an empty machine that records every accepted line.
    pub fn with_history() -> Self {
        let mut machine = Self::new();
        machine.set_record_history(true);
        machine
    }

    /// Turn history recording on or off. Turning it off drops the history.
    pub fn set_record_history(&mut self, enabled: bool) {
        match (enabled, self.history.is_some()) {
            (true, false) => self.history = Some(StateHistory::new()),
            (false, true) => self.history = None,
            _ => {}
        }
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    /// Define a new state recognized by `pattern`.
    ///
    /// Fails if the name is empty or already defined, or if the pattern is
    /// not a valid regular expression. Nothing is registered on failure.
    pub fn define_state(&mut self, name: &str, pattern: &str) -> Result<State, DefinitionError> {
        if name.is_empty() {
            return Err(DefinitionError::EmptyName);
        }
        if self.index.contains_key(name) {
            return Err(DefinitionError::DuplicateState {
                name: name.to_string(),
            });
        }
        let pattern = Pattern::new(pattern).map_err(|e| DefinitionError::InvalidPattern {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let state = State::new(name, pattern, self.id);
        let index = self.graph.add_node();
        self.states.push(state.clone());
        self.index.insert(name.to_string(), index);
        self.counters.push(0);

        log::debug!("defined state {} ({})", name, state.pattern());
        Ok(state)
    }

    /// Allow `dest` to follow `source`, or to be the first state when
    /// `source` is `None`.
    ///
    /// Both states must come from this machine. Defining the same pair
    /// twice is allowed and has no effect on selection.
    pub fn define_transition(
        &mut self,
        source: Option<&State>,
        dest: &State,
    ) -> Result<(), DefinitionError> {
        let from = match source {
            None => Node::Start,
            Some(state) => Node::State(self.owned_index(state).ok_or_else(|| {
                DefinitionError::UnknownSource {
                    name: state.name().to_string(),
                }
            })?),
        };
        let to = self
            .owned_index(dest)
            .ok_or_else(|| DefinitionError::UnknownDestination {
                name: dest.name().to_string(),
            })?;

        self.graph.add_edge(from, to);
        log::debug!("defined transition {} -> {}", self.node_label(from), dest.name());
        Ok(())
    }

    /// Shorthand for `define_transition(None, dest)`.
    pub fn define_initial(&mut self, dest: &State) -> Result<(), DefinitionError> {
        self.define_transition(None, dest)
    }

    /// Feed one line to the machine.
    ///
    /// Exactly one successor of the current state must recognize the line.
    /// When the current state has no successors the stream is finished and
    /// `StepResult::Terminal` is returned without consuming anything. On
    /// error the machine is left unchanged.
    pub fn advance(&mut self, line: &str) -> Result<StepResult, MachineError> {
        if self.graph.successors(Node::Start).is_empty() {
            return Err(DefinitionError::NoInitialState.into());
        }

        let candidates = self.graph.successors(self.cursor);
        if candidates.is_empty() {
            log::trace!("{} is terminal, ignoring {:?}", self.node_label(self.cursor), line);
            return Ok(StepResult::Terminal);
        }

        let states = &self.states;
        match Selection::select(candidates, |index| states[index].is_state(line)) {
            Selection::One(next) => Ok(StepResult::Transitioned(self.enter(next))),
            Selection::None => Err(ParseError::NoMatch {
                state: self.node_label(self.cursor),
                line: line.to_string(),
            }
            .into()),
            Selection::Many(found) => Err(ParseError::Ambiguous {
                state: self.node_label(self.cursor),
                candidates: found
                    .iter()
                    .map(|&index| self.states[index].name().to_string())
                    .collect(),
                line: line.to_string(),
            }
            .into()),
        }
    }

    /// Feed lines until the input or the grammar runs out.
    ///
    /// Returns how many lines produced a transition. Stops early at the
    /// first `Terminal` result. On error, lines before the failing one stay
    /// consumed and the error carries the failing line's 1-based position.
    pub fn advance_all<I, L>(&mut self, lines: I) -> Result<usize, MachineError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut transitions = 0;
        for (offset, line) in lines.into_iter().enumerate() {
            match self.advance(line.as_ref()) {
                Ok(StepResult::Transitioned(_)) => transitions += 1,
                Ok(StepResult::Terminal) => break,
                Err(err) => {
                    return Err(MachineError::AtLine {
                        line: offset + 1,
                        source: Box::new(err),
                    })
                }
            }
        }
        Ok(transitions)
    }

    /// How many times `state` has been entered since the last reset.
    pub fn state_count(&self, state: &State) -> Result<usize, LookupError> {
        self.owned_index(state)
            .map(|index| self.counters[index])
            .ok_or_else(|| LookupError::ForeignState {
                name: state.name().to_string(),
            })
    }

    pub fn current_state(&self) -> CurrentState<'_> {
        match self.cursor {
            Node::Start => CurrentState::NotStarted,
            Node::State(index) => CurrentState::Active(&self.states[index]),
        }
    }

    /// Rewind to the pseudo-start and zero all counters.
    ///
    /// States and transitions are kept.
    pub fn reset(&mut self) {
        self.cursor = Node::Start;
        self.counters.iter_mut().for_each(|count| *count = 0);
        self.accepted = 0;
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
        log::debug!("machine {} reset", self.id);
    }

    /// Whether the current state has no successors.
    pub fn is_terminal(&self) -> bool {
        self.graph.successors(self.cursor).is_empty()
    }

    /// Look up a state by name.
    pub fn state(&self, name: &str) -> Option<&State> {
        self.index.get(name).map(|&index| &self.states[index])
    }

    /// All states in definition order.
    pub fn states(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    /// Successors of `source` (the pseudo-start when `None`).
    pub fn successors(&self, source: Option<&State>) -> Result<Vec<&State>, LookupError> {
        let node = match source {
            None => Node::Start,
            Some(state) => {
                Node::State(
                    self.owned_index(state)
                        .ok_or_else(|| LookupError::ForeignState {
                            name: state.name().to_string(),
                        })?,
                )
            }
        };
        Ok(self
            .graph
            .successors(node)
            .iter()
            .map(|&index| &self.states[index])
            .collect())
    }

    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    /// Lines accepted since the last reset.
    pub fn accepted_lines(&self) -> usize {
        self.accepted
    }

    /// Traversal counters in definition order.
    pub fn counts(&self) -> impl Iterator<Item = (&State, usize)> + '_ {
        self.states.iter().zip(self.counters.iter().copied())
    }

    /// Recorded history, when recording is enabled.
    pub fn history(&self) -> Option<&StateHistory> {
        self.history.as_ref()
    }

    /// Display label of a node: the state name or `NOT_STARTED`.
    pub fn node_label(&self, node: Node) -> String {
        match node {
            Node::Start => NOT_STARTED.to_string(),
            Node::State(index) => self.states[index].name().to_string(),
        }
    }

    fn owned_index(&self, state: &State) -> Option<usize> {
        if state.owner() != self.id {
            return None;
        }
        self.index.get(state.name()).copied()
    }

    fn enter(&mut self, next: usize) -> State {
        let from = self.cursor;
        self.cursor = Node::State(next);
        self.counters[next] += 1;
        self.accepted += 1;

        let entered = self.states[next].clone();
        log::trace!(
            "line {}: {} -> {}",
            self.accepted,
            self.node_label(from),
            entered.name()
        );

        if self.history.is_some() {
            let transition = StateTransition {
                from: match from {
                    Node::Start => None,
                    Node::State(index) => Some(self.states[index].name().to_string()),
                },
                to: entered.name().to_string(),
                line: self.accepted,
                timestamp: Utc::now(),
            };
            if let Some(history) = self.history.as_mut() {
                history.record(transition);
            }
        }

        entered
    }
}

/// A clone is a new machine: it gets a fresh identity and its own copies
/// of the states, so states of the original are foreign to it.
impl Clone for LineStateMachine {
    fn clone(&self) -> Self {
        let id = MachineId::new();
        Self {
            id,
            states: self.states.iter().map(|state| state.with_owner(id)).collect(),
            index: self.index.clone(),
            graph: self.graph.clone(),
            counters: self.counters.clone(),
            cursor: self.cursor,
            accepted: self.accepted,
            history: self.history.clone(),
        }
    }
}

impl Default for LineStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
