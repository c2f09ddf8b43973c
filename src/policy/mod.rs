//! Policy adjudication for capability transitions.
//!
//! The `PolicyGuard` runs five checks in a fixed order and fails fast on
//! the first violated rule: a rejected proposal carries exactly one
//! violation, never a combination. Every adjudication - approval or
//! violation - appends exactly one record to the guard's decision log,
//! and the log is never consulted to change future decisions.

mod decision;
mod guard;
mod principles;
mod thresholds;
mod violation;

pub use decision::{DecisionLog, DecisionRecord, Outcome, ReviewStatus};
pub use guard::{Approval, PolicyGuard, MIN_JUSTIFICATION_CHARS};
pub use principles::{principles, Principle};
pub use thresholds::{ThresholdName, Thresholds};
pub use violation::{EvaluationError, PolicyViolation};
