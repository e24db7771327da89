//! The line state machine engine.
//!
//! # Key Concepts
//!
//! - **Graph**: adjacency lists from the pseudo-start and every state to
//!   their allowed successors
//! - **Selection**: each line must be recognized by exactly one successor of
//!   the current state, otherwise the step fails
//! - **Terminal**: a state without successors ends the stream
//!
//! Pattern overlap between successors is not analysed when transitions are
//! defined. Ambiguity surfaces only when a line actually matches more than
//! one successor, as a `ParseError::Ambiguous`.

mod error;
mod graph;
mod machine;
mod selection;

pub use error::{DefinitionError, LookupError, MachineError, ParseError};
pub use graph::{Node, TransitionGraph};
pub use machine::{CurrentState, LineStateMachine, StepResult, NOT_STARTED};
pub use selection::Selection;
