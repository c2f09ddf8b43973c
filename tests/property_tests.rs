//! Property-based tests for the validation core.
//!
//! These tests use proptest to verify the safety invariants hold across
//! many randomly generated states and proposals.

use evoguard::core::{Area, CapabilityState, Proposal};
use evoguard::engine::TransitionEngine;
use evoguard::policy::{EvaluationError, PolicyGuard, PolicyViolation};
use evoguard::snapshot::EngineSnapshot;
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_state()(
        intelligence in 0.0..10.0f64,
        power in 0.0..10.0f64,
        alignment in 0.0..10.0f64,
    ) -> CapabilityState {
        CapabilityState::new(intelligence, power, alignment)
    }
}

prop_compose! {
    fn arbitrary_area()(variant in 0..3u8) -> Area {
        match variant {
            0 => Area::Intelligence,
            1 => Area::Power,
            _ => Area::Alignment,
        }
    }
}

prop_compose! {
    // Non-negative deltas keep hypothetical states structurally valid, so
    // batches exercise the approve/reject split rather than InvalidState.
    fn arbitrary_proposal()(
        area in arbitrary_area(),
        delta in 0.0..2.0f64,
        justification in "[a-z ]{0,40}",
    ) -> Proposal {
        Proposal::new(area, delta, "Generated improvement", justification)
    }
}

proptest! {
    #[test]
    fn safety_ratio_is_never_negative(state in arbitrary_state()) {
        let ratio = state.safety_ratio();
        prop_assert!(ratio >= 0.0 || ratio.is_infinite());
    }

    #[test]
    fn zero_capability_means_infinite_ratio(alignment in 0.0..10.0f64) {
        let state = CapabilityState::new(0.0, 0.0, alignment);
        prop_assert_eq!(state.safety_ratio(), f64::INFINITY);
    }

    #[test]
    fn evaluation_is_deterministic(
        current in arbitrary_state(),
        proposed in arbitrary_state(),
        justification in "[a-z ]{0,40}",
    ) {
        let mut guard_a = PolicyGuard::new();
        let mut guard_b = PolicyGuard::new();

        let result_a = guard_a.evaluate(&current, &proposed, &justification);
        let result_b = guard_b.evaluate(&current, &proposed, &justification);

        prop_assert_eq!(result_a, result_b);
    }

    #[test]
    fn every_adjudication_logs_exactly_once(
        current in arbitrary_state(),
        proposed in arbitrary_state(),
        justification in "[a-z ]{0,40}",
    ) {
        let mut guard = PolicyGuard::new();
        let _ = guard.evaluate(&current, &proposed, &justification);
        prop_assert_eq!(guard.log().len(), 1);
    }

    #[test]
    fn approval_implies_every_invariant(
        current in arbitrary_state(),
        proposed in arbitrary_state(),
        justification in "[a-z]{10,40}",
    ) {
        let mut guard = PolicyGuard::new();
        let thresholds = guard.thresholds().clone();

        if let Ok(approval) = guard.evaluate(&current, &proposed, &justification) {
            prop_assert!(approval.safety_ratio >= thresholds.minimum_safety_ratio);
            prop_assert!(proposed.alignment >= current.alignment);
            prop_assert!(proposed.alignment >= thresholds.alignment_floor);
            prop_assert!(
                proposed.intelligence - current.intelligence
                    <= thresholds.max_single_step_growth
            );
            prop_assert!(proposed.power - current.power <= thresholds.max_single_step_growth);
        }
    }

    #[test]
    fn rejection_reports_exactly_one_violation(
        current in arbitrary_state(),
        proposed in arbitrary_state(),
        justification in "[a-z ]{0,40}",
    ) {
        let mut guard = PolicyGuard::new();
        if let Err(err) = guard.evaluate(&current, &proposed, &justification) {
            // Inputs are generated finite and non-negative, so the only
            // possible failure is a single policy violation.
            prop_assert!(matches!(err, EvaluationError::Violation(_)));
        }
    }

    #[test]
    fn short_justifications_never_pass(
        base in arbitrary_state(),
        justification in "[a-z]{0,9}",
    ) {
        // A no-op transition that trips no other rule: comfortable ratio,
        // alignment unchanged and well above the floor.
        let current = CapabilityState::new(base.intelligence.min(2.0), base.power.min(2.0), 9.0);
        let mut guard = PolicyGuard::new();

        let err = guard.evaluate(&current, &current, &justification).unwrap_err();
        prop_assert!(
            matches!(
                err,
                EvaluationError::Violation(PolicyViolation::InsufficientJustification { .. })
            ),
            "expected InsufficientJustification, got {:?}",
            err
        );
    }

    #[test]
    fn batches_never_shrink_history(
        proposals in prop::collection::vec(arbitrary_proposal(), 0..8),
    ) {
        let mut engine = TransitionEngine::new("prop-agent");
        let before = engine.history().len();

        let summary = engine.apply_improvements(&proposals).unwrap();

        prop_assert!(engine.history().len() >= before);
        prop_assert_eq!(
            engine.history().len(),
            before + summary.applied.len()
        );
        prop_assert_eq!(
            summary.applied.len() + summary.rejected.len(),
            proposals.len()
        );
    }

    #[test]
    fn current_tracks_the_last_history_entry(
        proposals in prop::collection::vec(arbitrary_proposal(), 0..8),
    ) {
        let mut engine = TransitionEngine::new("prop-agent");
        engine.apply_improvements(&proposals).unwrap();

        prop_assert_eq!(Some(engine.assess_current()), engine.history().latest());
    }

    #[test]
    fn snapshots_roundtrip_through_json(
        proposals in prop::collection::vec(arbitrary_proposal(), 0..5),
    ) {
        let mut engine = TransitionEngine::new("prop-agent");
        engine.apply_improvements(&proposals).unwrap();

        let snapshot = engine.snapshot();
        let json = snapshot.to_json().unwrap();
        let back = EngineSnapshot::from_json(&json).unwrap();

        prop_assert_eq!(snapshot, back);
    }
}
