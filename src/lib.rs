//! Linestate: a regex-driven line state machine
//!
//! Linestate classifies a stream of text lines (typically structured log
//! output) into a sequence of named states. Each state is recognized by a
//! regular expression; the allowed order of states is a transition graph.
//! At every line exactly one successor of the current state must match, so
//! a grammar that is ambiguous for some input fails loudly on that input
//! instead of silently picking a candidate.
//!
//! # Core Concepts
//!
//! - **State**: a name plus a prefix-anchored pattern
//! - **Pseudo-start**: the position before the first line, source of all
//!   initial transitions
//! - **Determinism contract**: zero matches or several matches are both
//!   parse errors
//! - **Terminal state**: a state with no successors ends the stream
//! - **Traversal counter**: how many times each state was entered since the
//!   last reset
//!
//! # Example
//!
//! ```rust
//! use linestate::{CurrentState, LineStateMachine, StepResult};
//!
//! let mut machine = LineStateMachine::new();
//! let header = machine.define_state("HEADER", "^#").unwrap();
//! let body = machine.define_state("BODY", "^[^#]").unwrap();
//! machine.define_transition(None, &header).unwrap();
//! machine.define_transition(Some(&header), &body).unwrap();
//! machine.define_transition(Some(&body), &body).unwrap();
//!
//! for line in ["# title", "line one", "line two"] {
//!     machine.advance(line).unwrap();
//! }
//! assert_eq!(machine.state_count(&header).unwrap(), 1);
//! assert_eq!(machine.state_count(&body).unwrap(), 2);
//!
//! machine.reset();
//! assert_eq!(machine.current_state(), CurrentState::NotStarted);
//! assert!(machine.advance("no header here").is_err());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod credentials;
pub mod engine;
pub mod lint;
pub mod record;

// Re-export commonly used types
pub use builder::{LineStateMachineBuilder, MachineDefinition};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{Pattern, State, StateHistory, StateTransition};
pub use engine::{
    CurrentState, DefinitionError, LineStateMachine, LookupError, MachineError, ParseError,
    StepResult,
};
