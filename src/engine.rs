//! The transition engine: owns the authoritative state and commits only
//! approved transitions.
//!
//! The engine is single-threaded and synchronous. Evaluating a proposal
//! and committing it are two steps; a host exposing the engine to
//! concurrent callers must serialize the whole assess-evaluate-commit
//! sequence externally, or interleaved batches can lose updates.

use crate::core::{Area, CapabilityState, EvolutionHistory, InvalidState, Proposal};
use crate::policy::{EvaluationError, PolicyGuard};
use crate::snapshot::EngineSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Suggestion heuristics compare the current safety ratio against these
// engine-local constants. They are deliberately distinct from the guard's
// threshold set, matching long-standing behavior; do not unify them.
const SUGGEST_ALIGNMENT_BELOW: f64 = 1.5;
const SUGGEST_INTELLIGENCE_AT: f64 = 2.0;
const SUGGEST_POWER_AT: f64 = 3.0;

/// Outcome of evaluating one proposal: the justification text on
/// approval, the violation description on rejection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub approved: bool,
    pub reason: String,
}

/// What the engine did with an evaluated proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineAction {
    Applied,
    Rejected,
}

/// One entry in the engine's own action log (distinct from the guard's
/// decision log).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub timestamp: DateTime<Utc>,
    pub action: EngineAction,
    pub proposal: Proposal,
    pub reason: String,
}

/// An improvement the engine committed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedImprovement {
    pub area: Area,
    pub delta: f64,
    pub description: String,
}

/// An improvement the guard turned down.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RejectedImprovement {
    pub description: String,
    pub reason: String,
}

/// Summary of one `apply_improvements` batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub applied: Vec<AppliedImprovement>,
    pub rejected: Vec<RejectedImprovement>,
    pub timestamp: DateTime<Utc>,
}

/// Orchestrates capability evolution under the policy guard.
///
/// The engine owns the single authoritative `CapabilityState`. It derives
/// candidate proposals from the current safety posture, submits each to
/// the guard, and commits a new immutable state to history only on
/// approval. The current state always equals the last history entry.
pub struct TransitionEngine {
    agent_id: String,
    created_at: DateTime<Utc>,
    guard: PolicyGuard,
    current: CapabilityState,
    history: EvolutionHistory,
    actions: Vec<ActionRecord>,
}

impl TransitionEngine {
    /// Create an engine at the honest-self-report baseline
    /// (intelligence 1.0, power 1.0, alignment 10.0).
    pub fn new(agent_id: impl Into<String>) -> Self {
        let initial = CapabilityState::baseline();
        Self {
            agent_id: agent_id.into(),
            created_at: Utc::now(),
            guard: PolicyGuard::new(),
            current: initial.clone(),
            history: EvolutionHistory::new(initial),
            actions: Vec::new(),
        }
    }

    /// Create an engine from an explicit, validated initial state.
    pub fn with_state(
        agent_id: impl Into<String>,
        initial: CapabilityState,
    ) -> Result<Self, InvalidState> {
        initial.validate()?;
        Ok(Self {
            agent_id: agent_id.into(),
            created_at: Utc::now(),
            guard: PolicyGuard::new(),
            current: initial.clone(),
            history: EvolutionHistory::new(initial),
            actions: Vec::new(),
        })
    }

    /// The current committed state, unchanged.
    pub fn assess_current(&self) -> &CapabilityState {
        &self.current
    }

    /// Derive candidate proposals from the current safety posture.
    ///
    /// The three rules are independent and non-exclusive, so zero to
    /// three proposals may come back. Callers process them in emission
    /// order, but each is independently evaluable.
    pub fn suggest_improvements(&self) -> Vec<Proposal> {
        let mut proposals = Vec::new();
        let ratio = self.current.safety_ratio();

        if ratio < SUGGEST_ALIGNMENT_BELOW {
            proposals.push(
                Proposal::new(
                    Area::Alignment,
                    1.0,
                    "Reinforce guiding principles and self-reflection",
                    "Safety ratio is below the recommended threshold for growth",
                )
                .risk("None - alignment is never a risk")
                .mitigation("N/A"),
            );
        }

        if ratio >= SUGGEST_INTELLIGENCE_AT {
            proposals.push(
                Proposal::new(
                    Area::Intelligence,
                    0.5,
                    "Expand reasoning and comprehension capacity",
                    "Alignment is strong enough to support measured growth",
                )
                .risk("Capability growth without proportional alignment growth")
                .mitigation("Re-check the safety ratio after the change"),
            );
        }

        if ratio >= SUGGEST_POWER_AT {
            proposals.push(
                Proposal::new(
                    Area::Power,
                    0.3,
                    "Increase execution and acting capacity",
                    "Exceptional alignment permits a small power increase",
                )
                .risk("Power without alignment is the dominant existential risk")
                .mitigation("Keep alignment at least three times power"),
            );
        }

        proposals
    }

    /// Evaluate one proposal against the current committed state.
    ///
    /// Builds the hypothetical next state, submits it to the guard, and
    /// reports the verdict. Nothing is committed here; within one batch
    /// of standalone `evaluate` calls every proposal sees the same
    /// unmodified baseline.
    pub fn evaluate(&mut self, proposal: &Proposal) -> Result<Verdict, EvaluationError> {
        let hypothetical = self.current.applying(proposal.area, proposal.delta);
        match self
            .guard
            .evaluate(&self.current, &hypothetical, &proposal.justification)
        {
            Ok(_) => Ok(Verdict {
                approved: true,
                reason: proposal.justification.clone(),
            }),
            Err(EvaluationError::Violation(violation)) => Ok(Verdict {
                approved: false,
                reason: violation.to_string(),
            }),
            Err(err @ EvaluationError::InvalidState(_)) => Err(err),
        }
    }

    /// Evaluate and commit proposals in order, sequentially.
    ///
    /// Each proposal is evaluated against the committed state as of its
    /// own iteration: an earlier approval in the batch changes the
    /// baseline for later proposals. Approval commits a new immutable
    /// state to history; rejection leaves state untouched. The batch as a
    /// whole is not atomic - stopping mid-batch leaves a fully consistent
    /// state reflecting exactly the proposals processed so far.
    pub fn apply_improvements(
        &mut self,
        proposals: &[Proposal],
    ) -> Result<BatchSummary, EvaluationError> {
        let mut applied = Vec::new();
        let mut rejected = Vec::new();

        for proposal in proposals {
            let verdict = self.evaluate(proposal)?;

            if verdict.approved {
                let next = self.current.applying(proposal.area, proposal.delta);
                self.history.record(next.clone());
                self.current = next;
                applied.push(AppliedImprovement {
                    area: proposal.area,
                    delta: proposal.delta,
                    description: proposal.description.clone(),
                });
                self.actions.push(ActionRecord {
                    timestamp: Utc::now(),
                    action: EngineAction::Applied,
                    proposal: proposal.clone(),
                    reason: verdict.reason,
                });
            } else {
                rejected.push(RejectedImprovement {
                    description: proposal.description.clone(),
                    reason: verdict.reason.clone(),
                });
                self.actions.push(ActionRecord {
                    timestamp: Utc::now(),
                    action: EngineAction::Rejected,
                    proposal: proposal.clone(),
                    reason: verdict.reason,
                });
            }
        }

        Ok(BatchSummary {
            applied,
            rejected,
            timestamp: Utc::now(),
        })
    }

    /// Wholesale serializable snapshot of the engine for persistence.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(self)
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn guard(&self) -> &PolicyGuard {
        &self.guard
    }

    /// Mutable guard access, e.g. for filing threshold-change proposals.
    pub fn guard_mut(&mut self) -> &mut PolicyGuard {
        &mut self.guard
    }

    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    /// The engine's own action log, distinct from the guard's decision log.
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
}
