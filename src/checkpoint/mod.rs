//! Checkpoint and resume for long parses.
//!
//! A checkpoint captures a machine's progress (cursor, counters, accepted
//! lines and history) but not its grammar. Restoring it onto any machine
//! that defines the same state names resumes the parse where it stopped,
//! for example after a process restart while tailing a log.

use crate::core::StateHistory;
use crate::engine::{LineStateMachine, Node};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// State names in definition order
    pub states: Vec<String>,

    /// Traversal counters, parallel to `states`
    pub counters: Vec<usize>,

    /// Current state, `None` when not started
    pub cursor: Option<String>,

    /// Lines accepted since the last reset
    pub accepted_lines: usize,

    /// Recorded history, when the machine was recording
    pub history: Option<StateHistory>,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl LineStateMachine {
    /// Snapshot the current progress.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            states: self.states.iter().map(|s| s.name().to_string()).collect(),
            counters: self.counters.clone(),
            cursor: match self.cursor {
                Node::Start => None,
                Node::State(index) => Some(self.states[index].name().to_string()),
            },
            accepted_lines: self.accepted,
            history: self.history.clone(),
        }
    }

    /// Resume from a checkpoint.
    ///
    /// Every state named in the checkpoint must be defined on this machine;
    /// states the checkpoint does not mention start at zero. History is only
    /// restored when this machine records history. On error the machine is
    /// unchanged.
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if checkpoint.counters.len() != checkpoint.states.len() {
            return Err(CheckpointError::ValidationFailed(format!(
                "{} counters for {} states",
                checkpoint.counters.len(),
                checkpoint.states.len()
            )));
        }

        let mut counters = vec![0; self.states.len()];
        for (name, &count) in checkpoint.states.iter().zip(&checkpoint.counters) {
            counters[self.restorable_index(name)?] = count;
        }

        let cursor = match checkpoint.cursor.as_deref() {
            None => Node::Start,
            Some(name) => Node::State(self.restorable_index(name)?),
        };

        self.counters = counters;
        self.cursor = cursor;
        self.accepted = checkpoint.accepted_lines;
        if self.history.is_some() {
            self.history = Some(checkpoint.history.clone().unwrap_or_default());
        }

        log::debug!(
            "machine {} restored from checkpoint {} at {}",
            self.id,
            checkpoint.id,
            self.node_label(cursor)
        );
        Ok(())
    }

    fn restorable_index(&self, name: &str) -> Result<usize, CheckpointError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| CheckpointError::UnknownState {
                name: name.to_string(),
            })
    }
}
