//! Append-only decision log.
//!
//! Every adjudication appends exactly one record. Records are never
//! removed or edited, and the log is never queried to change future
//! behavior - no rate-limiting, no escalation based on history.

use super::thresholds::ThresholdName;
use crate::core::CapabilityState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse classification of a log entry, for counting and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Approved,
    Violation,
    ThresholdProposal,
}

/// Review status of a threshold-change proposal.
///
/// Threshold proposals are a request surface for a governing process
/// external to the core; nothing in this crate ever advances them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    PendingReview,
}

/// One entry in the decision log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome")]
pub enum DecisionRecord {
    #[serde(rename = "APPROVED")]
    Approved {
        timestamp: DateTime<Utc>,
        current: CapabilityState,
        proposed: CapabilityState,
        justification: String,
        safety_ratio: f64,
    },

    #[serde(rename = "VIOLATION")]
    Violation {
        timestamp: DateTime<Utc>,
        current: CapabilityState,
        proposed: CapabilityState,
        justification: String,
        violation: String,
    },

    #[serde(rename = "THRESHOLD_PROPOSAL")]
    ThresholdProposal {
        timestamp: DateTime<Utc>,
        threshold: ThresholdName,
        current_value: f64,
        proposed_value: f64,
        justification: String,
        status: ReviewStatus,
    },
}

impl DecisionRecord {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Approved { timestamp, .. }
            | Self::Violation { timestamp, .. }
            | Self::ThresholdProposal { timestamp, .. } => *timestamp,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Approved { .. } => Outcome::Approved,
            Self::Violation { .. } => Outcome::Violation,
            Self::ThresholdProposal { .. } => Outcome::ThresholdProposal,
        }
    }

    pub fn justification(&self) -> &str {
        match self {
            Self::Approved { justification, .. }
            | Self::Violation { justification, .. }
            | Self::ThresholdProposal { justification, .. } => justification,
        }
    }
}

/// Chronological, append-only log of decision records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionLog {
    records: Vec<DecisionRecord>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning a reference to the stored entry.
    pub fn append(&mut self, record: DecisionRecord) -> &DecisionRecord {
        self.records.push(record);
        // Just pushed, so the log is non-empty.
        &self.records[self.records.len() - 1]
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count entries with the given outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome() == outcome)
            .count()
    }

    /// The most recent `n` records, oldest of those first.
    pub fn recent(&self, n: usize) -> &[DecisionRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }
}
