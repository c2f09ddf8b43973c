//! The policy guard: fail-fast adjudication of proposed transitions.

use super::decision::{DecisionLog, DecisionRecord, ReviewStatus};
use super::principles::{principles, Principle};
use super::thresholds::{ThresholdName, Thresholds};
use super::violation::{EvaluationError, PolicyViolation};
use crate::core::{Area, CapabilityState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum trimmed justification length for rule 5.
pub const MIN_JUSTIFICATION_CHARS: usize = 10;

/// Successful adjudication, carrying the proposed state's safety ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub safety_ratio: f64,
}

/// Deterministic rule evaluator for capability transitions.
///
/// The guard runs five checks in a fixed order and stops at the first
/// violated rule:
///
/// 1. proposed safety ratio >= minimum threshold
/// 2. alignment never decreases
/// 3. intelligence/power growth per step within the cap (decreases exempt)
/// 4. alignment never below the absolute floor
/// 5. trimmed justification at least ten characters
///
/// Every adjudication - approval or violation - appends exactly one
/// record to the guard's decision log.
///
/// # Example
///
/// ```rust
/// use evoguard::core::CapabilityState;
/// use evoguard::policy::PolicyGuard;
///
/// let mut guard = PolicyGuard::new();
/// let current = CapabilityState::new(2.0, 2.0, 5.0);
/// let proposed = CapabilityState::new(2.5, 2.0, 5.5);
///
/// let approval = guard
///     .evaluate(&current, &proposed, "Measured growth with ethical reinforcement")
///     .unwrap();
/// assert!(approval.safety_ratio >= 1.0);
/// assert_eq!(guard.log().len(), 1);
/// ```
#[derive(Debug)]
pub struct PolicyGuard {
    thresholds: Thresholds,
    log: DecisionLog,
    created_at: DateTime<Utc>,
}

impl Default for PolicyGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyGuard {
    /// Create a guard with the default threshold set.
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::default())
    }

    /// Create a guard with explicit thresholds.
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            log: DecisionLog::new(),
            created_at: Utc::now(),
        }
    }

    /// Adjudicate a proposed transition.
    ///
    /// Rejection is final for this exact proposal: there is no retry
    /// policy here, and a revised proposal is an entirely new evaluation.
    /// A malformed state is a programming error and yields
    /// `EvaluationError::InvalidState` without touching the log.
    pub fn evaluate(
        &mut self,
        current: &CapabilityState,
        proposed: &CapabilityState,
        justification: &str,
    ) -> Result<Approval, EvaluationError> {
        current.validate()?;
        proposed.validate()?;

        if let Err(violation) = self.check_rules(current, proposed, justification) {
            self.log.append(DecisionRecord::Violation {
                timestamp: Utc::now(),
                current: current.clone(),
                proposed: proposed.clone(),
                justification: justification.to_string(),
                violation: violation.to_string(),
            });
            return Err(violation.into());
        }

        let safety_ratio = proposed.safety_ratio();
        self.log.append(DecisionRecord::Approved {
            timestamp: Utc::now(),
            current: current.clone(),
            proposed: proposed.clone(),
            justification: justification.to_string(),
            safety_ratio,
        });
        Ok(Approval { safety_ratio })
    }

    /// Run the five rules in order, returning the first violation.
    fn check_rules(
        &self,
        current: &CapabilityState,
        proposed: &CapabilityState,
        justification: &str,
    ) -> Result<(), PolicyViolation> {
        let ratio = proposed.safety_ratio();
        if ratio < self.thresholds.minimum_safety_ratio {
            return Err(PolicyViolation::InsufficientSafetyMargin {
                ratio,
                minimum: self.thresholds.minimum_safety_ratio,
            });
        }

        if proposed.alignment < current.alignment {
            return Err(PolicyViolation::AlignmentRegression {
                current: current.alignment,
                proposed: proposed.alignment,
            });
        }

        // Only growth is capped; decreases always pass this rule.
        let max = self.thresholds.max_single_step_growth;
        let delta_intelligence = proposed.intelligence - current.intelligence;
        if delta_intelligence > max {
            return Err(PolicyViolation::ExcessiveGrowthRate {
                area: Area::Intelligence,
                delta: delta_intelligence,
                max,
            });
        }
        let delta_power = proposed.power - current.power;
        if delta_power > max {
            return Err(PolicyViolation::ExcessiveGrowthRate {
                area: Area::Power,
                delta: delta_power,
                max,
            });
        }

        if proposed.alignment < self.thresholds.alignment_floor {
            return Err(PolicyViolation::BelowAlignmentFloor {
                alignment: proposed.alignment,
                floor: self.thresholds.alignment_floor,
            });
        }

        let length = justification.trim().chars().count();
        if length < MIN_JUSTIFICATION_CHARS {
            return Err(PolicyViolation::InsufficientJustification {
                length,
                required: MIN_JUSTIFICATION_CHARS,
            });
        }

        Ok(())
    }

    /// Record a threshold-change proposal for external review.
    ///
    /// The live threshold is not touched: this is a request surface for a
    /// governing process outside the core, and the record stays
    /// `pending_review` forever as far as this crate is concerned.
    pub fn propose_threshold_change(
        &mut self,
        name: ThresholdName,
        new_value: f64,
        justification: &str,
    ) -> &DecisionRecord {
        self.log.append(DecisionRecord::ThresholdProposal {
            timestamp: Utc::now(),
            threshold: name,
            current_value: self.thresholds.get(name),
            proposed_value: new_value,
            justification: justification.to_string(),
            status: ReviewStatus::PendingReview,
        })
    }

    /// The fixed principle set (read-only reference data).
    pub fn principles(&self) -> &'static [Principle] {
        principles()
    }

    /// The live thresholds, read at decision time.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The append-only decision log.
    pub fn log(&self) -> &DecisionLog {
        &self.log
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Outcome;

    const GOOD_REASON: &str = "Measured growth with proportional ethical reinforcement";

    #[test]
    fn reference_transition_is_approved() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(2.0, 2.0, 5.0);
        let proposed = CapabilityState::new(2.5, 2.0, 5.5);

        let approval = guard
            .evaluate(
                &current,
                &proposed,
                "Incrementar capacidad de razonamiento con refuerzo ético proporcional",
            )
            .unwrap();

        // 5.5 / sqrt(2.5^2 + 2.0^2)
        let expected = 5.5 / 10.25_f64.sqrt();
        assert!((approval.safety_ratio - expected).abs() < 1e-9);
        assert_eq!(guard.log().count(Outcome::Approved), 1);
    }

    #[test]
    fn low_safety_ratio_is_rejected_first() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(4.0, 4.0, 5.0);
        // Ratio 5.0 / sqrt(32) = 0.88; also trips nothing else.
        let proposed = CapabilityState::new(4.0, 4.0, 5.0);

        let err = guard.evaluate(&current, &proposed, GOOD_REASON).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Violation(PolicyViolation::InsufficientSafetyMargin { .. })
        ));
    }

    #[test]
    fn alignment_regression_is_rejected_regardless_of_other_metrics() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(1.0, 1.0, 5.0);
        let proposed = CapabilityState::new(1.0, 1.0, 4.9);

        let err = guard.evaluate(&current, &proposed, GOOD_REASON).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Violation(PolicyViolation::AlignmentRegression { .. })
        ));
    }

    #[test]
    fn growth_cap_boundary_is_inclusive() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(2.0, 2.0, 5.0);

        // Exactly +0.5 passes the growth check.
        let at_cap = CapabilityState::new(2.5, 2.0, 5.0);
        assert!(guard.evaluate(&current, &at_cap, GOOD_REASON).is_ok());

        // +0.51 exceeds it.
        let over_cap = CapabilityState::new(2.51, 2.0, 5.0);
        let err = guard.evaluate(&current, &over_cap, GOOD_REASON).unwrap_err();
        match err {
            EvaluationError::Violation(PolicyViolation::ExcessiveGrowthRate { area, .. }) => {
                assert_eq!(area, Area::Intelligence);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn power_growth_violation_names_power() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(2.0, 2.0, 6.0);
        let proposed = CapabilityState::new(2.0, 2.6, 6.0);

        let err = guard.evaluate(&current, &proposed, GOOD_REASON).unwrap_err();
        match err {
            EvaluationError::Violation(PolicyViolation::ExcessiveGrowthRate { area, .. }) => {
                assert_eq!(area, Area::Power);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decreases_are_exempt_from_the_growth_cap() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(3.0, 3.0, 6.0);
        let proposed = CapabilityState::new(1.0, 3.0, 6.0);

        assert!(guard.evaluate(&current, &proposed, GOOD_REASON).is_ok());
    }

    #[test]
    fn alignment_floor_is_enforced() {
        let mut guard = PolicyGuard::new();
        // Ratio is infinite, so only the floor can bind here.
        let current = CapabilityState::new(0.0, 0.0, 0.5);
        let proposed = CapabilityState::new(0.0, 0.0, 0.9);

        let err = guard.evaluate(&current, &proposed, GOOD_REASON).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Violation(PolicyViolation::BelowAlignmentFloor { .. })
        ));
    }

    #[test]
    fn justification_boundary_is_ten_trimmed_characters() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(1.0, 1.0, 5.0);
        let proposed = CapabilityState::new(1.5, 1.0, 5.0);

        // Ten characters passes.
        assert!(guard.evaluate(&current, &proposed, "abcdefghij").is_ok());

        // Nine characters after trimming fails.
        let err = guard
            .evaluate(&current, &proposed, "  abcdefghi  ")
            .unwrap_err();
        match err {
            EvaluationError::Violation(PolicyViolation::InsufficientJustification {
                length, ..
            }) => assert_eq!(length, 9),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_capability_states_pass_the_ratio_rule() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(0.0, 0.0, 5.0);
        let proposed = CapabilityState::new(0.0, 0.0, 5.0);

        let approval = guard.evaluate(&current, &proposed, GOOD_REASON).unwrap();
        assert_eq!(approval.safety_ratio, f64::INFINITY);
    }

    #[test]
    fn every_adjudication_appends_exactly_one_record() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(1.0, 1.0, 5.0);

        let _ = guard.evaluate(&current, &CapabilityState::new(1.2, 1.0, 5.0), GOOD_REASON);
        assert_eq!(guard.log().len(), 1);

        // A rejection also appends one record, even though several rules
        // would have failed.
        let bad = CapabilityState::new(5.0, 5.0, 0.5);
        let _ = guard.evaluate(&current, &bad, "short");
        assert_eq!(guard.log().len(), 2);
        assert_eq!(guard.log().count(Outcome::Violation), 1);
    }

    #[test]
    fn fail_fast_reports_the_first_rule_only() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(1.0, 1.0, 5.0);
        // Violates ratio, regression, growth caps, floor, and has a short
        // justification; only the ratio rule must be reported.
        let bad = CapabilityState::new(5.0, 5.0, 0.5);

        let err = guard.evaluate(&current, &bad, "nope").unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Violation(PolicyViolation::InsufficientSafetyMargin { .. })
        ));
    }

    #[test]
    fn invalid_state_is_fatal_and_unlogged() {
        let mut guard = PolicyGuard::new();
        let current = CapabilityState::new(f64::NAN, 1.0, 5.0);
        let proposed = CapabilityState::new(1.0, 1.0, 5.0);

        let err = guard.evaluate(&current, &proposed, GOOD_REASON).unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidState(_)));
        assert!(guard.log().is_empty());
    }

    #[test]
    fn threshold_proposals_never_alter_live_thresholds() {
        let mut guard = PolicyGuard::new();
        guard.propose_threshold_change(
            ThresholdName::MaxSingleStepGrowth,
            1.0,
            "Faster iteration during supervised trials",
        );

        assert_eq!(guard.thresholds().max_single_step_growth, 0.5);
        assert_eq!(guard.log().count(Outcome::ThresholdProposal), 1);

        // A +0.6 step must still be rejected under the original cap.
        let current = CapabilityState::new(2.0, 2.0, 6.0);
        let proposed = CapabilityState::new(2.6, 2.0, 6.0);
        let err = guard.evaluate(&current, &proposed, GOOD_REASON).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Violation(PolicyViolation::ExcessiveGrowthRate { .. })
        ));
    }

    #[test]
    fn threshold_proposal_records_old_and_new_value() {
        let mut guard = PolicyGuard::new();
        let record = guard
            .propose_threshold_change(
                ThresholdName::AlignmentFloor,
                2.0,
                "Raise the moral floor after incident review",
            )
            .clone();

        match record {
            DecisionRecord::ThresholdProposal {
                threshold,
                current_value,
                proposed_value,
                status,
                ..
            } => {
                assert_eq!(threshold, ThresholdName::AlignmentFloor);
                assert_eq!(current_value, 1.0);
                assert_eq!(proposed_value, 2.0);
                assert_eq!(status, ReviewStatus::PendingReview);
            }
            other => panic!("unexpected record: {other:?}"),
        }
    }

    #[test]
    fn principles_are_exposed_as_reference_data() {
        let guard = PolicyGuard::new();
        assert_eq!(guard.principles().len(), 3);
    }
}
