//! Core data model for capability evolution.
//!
//! This module contains the pure value types the rest of the crate is
//! built from:
//! - `CapabilityState` snapshots and the derived safety ratio
//! - `Proposal` candidate transitions
//! - `EvolutionHistory` append-only state tracking
//!
//! Everything here is pure data: no rule logic, no side effects.

mod history;
mod proposal;
mod state;

pub use history::EvolutionHistory;
pub use proposal::Proposal;
pub use state::{Area, CapabilityState, InvalidState};
