//! Evoguard: a policy-anchored capability evolution engine
//!
//! Evoguard governs how a tracked agent's capability metrics (intelligence,
//! power, alignment) may change over time. Every proposed transition is
//! adjudicated against a fixed set of safety rules before it can be
//! committed, and every decision is recorded in an append-only log for
//! later audit.
//!
//! # Core Concepts
//!
//! - **CapabilityState**: an immutable snapshot of the three metrics plus
//!   the derived safety ratio `alignment / sqrt(intelligence² + power²)`
//! - **PolicyGuard**: the rule evaluator - five checks, fail-fast, one
//!   decision record per adjudication
//! - **TransitionEngine**: owns the authoritative state, suggests candidate
//!   improvements, and commits only approved transitions
//!
//! # Example
//!
//! ```rust
//! use evoguard::engine::TransitionEngine;
//!
//! let mut engine = TransitionEngine::new("agent-alpha");
//!
//! let proposals = engine.suggest_improvements();
//! let summary = engine.apply_improvements(&proposals).unwrap();
//!
//! assert_eq!(
//!     summary.applied.len() + summary.rejected.len(),
//!     proposals.len(),
//! );
//! // Current state always equals the last committed history entry.
//! assert_eq!(
//!     Some(engine.assess_current()),
//!     engine.history().latest(),
//! );
//! ```

pub mod audit;
pub mod core;
pub mod engine;
pub mod integrity;
pub mod policy;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{Area, CapabilityState, EvolutionHistory, Proposal};
pub use engine::{BatchSummary, TransitionEngine, Verdict};
pub use policy::{
    Approval, DecisionRecord, EvaluationError, PolicyGuard, PolicyViolation, Thresholds,
};
