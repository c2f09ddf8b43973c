//! Policy violations and evaluation errors.

use crate::core::{Area, InvalidState};
use thiserror::Error;

/// A safety rule a proposed transition violated.
///
/// Exactly one violation is reported per rejected proposal: evaluation
/// stops at the first failed rule.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PolicyViolation {
    #[error(
        "safety ratio too low: {ratio:.2} < {minimum:.2}; \
         alignment cannot sustain the combined intelligence and power"
    )]
    InsufficientSafetyMargin { ratio: f64, minimum: f64 },

    #[error("alignment may never decrease: {current:.2} -> {proposed:.2}")]
    AlignmentRegression { current: f64, proposed: f64 },

    #[error("{area} growing too fast: +{delta:.2} exceeds the per-step cap of {max:.2}")]
    ExcessiveGrowthRate { area: Area, delta: f64, max: f64 },

    #[error("alignment below the absolute floor: {alignment:.2} < {floor:.2}")]
    BelowAlignmentFloor { alignment: f64, floor: f64 },

    #[error("justification too short: {length} characters after trimming, {required} required")]
    InsufficientJustification { length: usize, required: usize },
}

/// Why an evaluation call did not produce an approval.
///
/// A `Violation` is an expected, recoverable outcome: the caller simply
/// does not commit the transition. `InvalidState` is a programming error
/// (malformed metrics) and is fatal to that call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvaluationError {
    #[error(transparent)]
    Violation(#[from] PolicyViolation),

    #[error(transparent)]
    InvalidState(#[from] InvalidState),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_messages_name_the_rule() {
        let v = PolicyViolation::InsufficientSafetyMargin {
            ratio: 0.87,
            minimum: 1.0,
        };
        assert!(v.to_string().contains("0.87 < 1.00"));

        let v = PolicyViolation::ExcessiveGrowthRate {
            area: Area::Power,
            delta: 0.6,
            max: 0.5,
        };
        assert!(v.to_string().contains("power"));
        assert!(v.to_string().contains("+0.60"));
    }

    #[test]
    fn invalid_state_converts_into_evaluation_error() {
        let invalid = InvalidState {
            reason: "power is negative (-1)".to_string(),
        };
        let err: EvaluationError = invalid.into();
        assert!(matches!(err, EvaluationError::InvalidState(_)));
    }
}
