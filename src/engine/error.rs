//! Errors raised by line state machines.

use thiserror::Error;

/// Structural misuse of the definition API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("state name must not be empty")]
    EmptyName,

    #[error("already defined state '{name}'")]
    DuplicateState { name: String },

    #[error("invalid pattern for state '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("transition source '{name}' is not a state of this machine")]
    UnknownSource { name: String },

    #[error("transition destination '{name}' is not a state of this machine")]
    UnknownDestination { name: String },

    #[error("no state named '{name}' is defined")]
    UnknownState { name: String },

    #[error("no initial state defined yet")]
    NoInitialState,

    #[error("invalid machine definition: {0}")]
    Config(String),
}

/// Input that does not fit the defined grammar at the current position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no state found for line {line:?} after {state}")]
    NoMatch { state: String, line: String },

    #[error("too many states found for line {line:?} after {state}: {candidates:?}")]
    Ambiguous {
        state: String,
        candidates: Vec<String>,
        line: String,
    },
}

/// Queries made with a state that belongs to a different machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("state '{name}' does not belong to this machine")]
    ForeignState { name: String },
}

/// Any error a machine reports while consuming input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// An error from one line of a batch, with its 1-based position.
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        source: Box<MachineError>,
    },
}

impl MachineError {
    /// The underlying error, with any line position stripped.
    pub fn root(&self) -> &MachineError {
        match self {
            MachineError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self.root(), MachineError::Parse(_))
    }

    pub fn is_definition(&self) -> bool {
        matches!(self.root(), MachineError::Definition(_))
    }

    /// Batch position of the failing line, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            MachineError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}
