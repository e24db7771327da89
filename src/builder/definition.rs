//! Serializable machine definitions.
//!
//! Machines can be described in JSON:
//!
//! ```json
//! {
//!   "states": [
//!     {"name": "HEADER", "pattern": "^#"},
//!     {"name": "BODY", "pattern": "^[^#]"}
//!   ],
//!   "transitions": [
//!     {"to": "HEADER"},
//!     {"from": "HEADER", "to": "BODY"},
//!     {"from": "BODY", "to": "BODY"}
//!   ],
//!   "record_history": false
//! }
//! ```
//!
//! A transition without `from` (or with `"from": null`) starts the stream.

use crate::builder::machine::LineStateMachineBuilder;
use crate::engine::{DefinitionError, LineStateMachine, Node};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One state of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDefinition {
    pub name: String,
    pub pattern: String,
}

/// One transition of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    /// Source state, `None` for the pseudo-start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
}

/// Raw machine definition as stored or transmitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDefinition {
    pub states: Vec<StateDefinition>,

    #[serde(default)]
    pub transitions: Vec<TransitionDefinition>,

    #[serde(default)]
    pub record_history: bool,
}

impl MachineDefinition {
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(json).map_err(|e| DefinitionError::Config(e.to_string()))
    }

    /// Read a JSON definition from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| DefinitionError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, DefinitionError> {
        serde_json::to_string_pretty(self).map_err(|e| DefinitionError::Config(e.to_string()))
    }

    /// A builder preloaded with this definition.
    pub fn builder(&self) -> LineStateMachineBuilder {
        let builder = self
            .states
            .iter()
            .fold(LineStateMachineBuilder::new(), |builder, state| {
                builder.state(state.name.as_str(), state.pattern.as_str())
            });

        builder
            .transitions(
                self.transitions
                    .iter()
                    .map(|t| (t.from.as_deref(), t.to.as_str())),
            )
            .record_history(self.record_history)
    }

    pub fn build(&self) -> Result<LineStateMachine, DefinitionError> {
        self.builder().build()
    }
}

impl LineStateMachine {
    /// Describe this machine's states and transitions.
    ///
    /// Building the returned definition yields a machine with the same
    /// grammar (but a new identity and fresh progress).
    pub fn definition(&self) -> MachineDefinition {
        MachineDefinition {
            states: self
                .states()
                .map(|state| StateDefinition {
                    name: state.name().to_string(),
                    pattern: state.pattern().source().to_string(),
                })
                .collect(),
            transitions: self
                .graph()
                .edges()
                .map(|(from, to)| TransitionDefinition {
                    from: match from {
                        Node::Start => None,
                        Node::State(_) => Some(self.node_label(from)),
                    },
                    to: self.node_label(Node::State(to)),
                })
                .collect(),
            record_history: self.history().is_some(),
        }
    }
}
