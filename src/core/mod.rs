//! Core value types for line state machines.
//!
//! This module contains the immutable building blocks:
//! - `Pattern`: prefix-anchored regular expressions
//! - `State`: a named pattern owned by one machine
//! - `StateHistory`: the recorded path through a parse
//!
//! Nothing here mutates shared state; the engine owns all mutation.

mod history;
mod pattern;
mod state;

pub use history::{StateHistory, StateTransition};
pub use pattern::Pattern;
pub use state::{MachineId, State};
