//! Append-only evolution history.
//!
//! Every approved transition appends one new `CapabilityState`. Entries
//! are never removed or edited after being written.

use super::state::CapabilityState;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ordered, append-only record of committed capability states.
///
/// The history is seeded with the initial state at construction, so the
/// latest entry always reflects the current committed state of the
/// owning engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionHistory {
    states: Vec<CapabilityState>,
}

impl EvolutionHistory {
    /// Create a history seeded with the initial state.
    pub fn new(initial: CapabilityState) -> Self {
        Self {
            states: vec![initial],
        }
    }

    /// Append a newly committed state.
    pub fn record(&mut self, state: CapabilityState) {
        self.states.push(state);
    }

    /// All recorded states, oldest first.
    pub fn states(&self) -> &[CapabilityState] {
        &self.states
    }

    /// The most recently committed state.
    pub fn latest(&self) -> Option<&CapabilityState> {
        self.states.last()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Wall-clock span from the first to the last recorded state.
    pub fn duration(&self) -> Option<Duration> {
        match (self.states.first(), self.states.last()) {
            (Some(first), Some(last)) => last
                .timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok(),
            _ => None,
        }
    }
}
