//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder, a declarative macro and a
//! serializable definition format, all resolving states by name.

pub mod definition;
pub mod machine;
pub mod macros;

pub use definition::{MachineDefinition, StateDefinition, TransitionDefinition};
pub use machine::LineStateMachineBuilder;

use crate::engine::{DefinitionError, LineStateMachine};

/// Build a machine that walks states in a fixed sequence.
///
/// Each `(name, pattern)` pair follows the previous one; the first is the
/// initial state and the last is terminal.
///
/// # Example
///
/// ```
/// use linestate::builder::sequence;
///
/// let mut machine = sequence([("START", "BEGIN"), ("END", "END")]).unwrap();
/// assert_eq!(machine.advance_all(["BEGIN", "END", "ignored"]).unwrap(), 2);
/// ```
pub fn sequence<I, N, P>(states: I) -> Result<LineStateMachine, DefinitionError>
where
    I: IntoIterator<Item = (N, P)>,
    N: Into<String>,
    P: Into<String>,
{
    let mut builder = LineStateMachineBuilder::new();
    let mut previous: Option<String> = None;

    for (name, pattern) in states {
        let name = name.into();
        builder = builder.state(name.clone(), pattern);
        builder = match previous.take() {
            None => builder.initial(name.clone()),
            Some(from) => builder.transition(from, name.clone()),
        };
        previous = Some(name);
    }

    builder.build()
}

/// Build a machine with one state recognizing a block header followed by
/// a repeating body state.
///
/// # Example
///
/// ```
/// use linestate::builder::header_with_body;
///
/// let mut machine = header_with_body(("HEADER", "^#"), ("BODY", "^[^#]")).unwrap();
/// assert_eq!(machine.advance_all(["# t", "a", "b"]).unwrap(), 3);
/// ```
pub fn header_with_body(
    header: (&str, &str),
    body: (&str, &str),
) -> Result<LineStateMachine, DefinitionError> {
    LineStateMachineBuilder::new()
        .state(header.0, header.1)
        .state(body.0, body.1)
        .initial(header.0)
        .transition(header.0, body.0)
        .transition(body.0, body.0)
        .build()
}
