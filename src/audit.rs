//! Read-only audit projection.
//!
//! An `AuditReport` is derived on demand from the guard's decision log
//! and the engine's history. Building or rendering one never changes
//! engine state.

use crate::core::CapabilityState;
use crate::engine::TransitionEngine;
use crate::policy::{DecisionRecord, Outcome, Principle, Thresholds};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// How many log entries the report tail includes.
const RECENT_DECISIONS: usize = 10;

/// Coarse classification of the current safety posture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyPosture {
    /// Ratio at or above 1.5: room to grow
    Healthy,
    /// Ratio in [1.0, 1.5): at the limit
    Marginal,
    /// Ratio below 1.0: capability outrunning alignment
    Critical,
}

impl SafetyPosture {
    pub fn classify(safety_ratio: f64) -> Self {
        if safety_ratio >= 1.5 {
            Self::Healthy
        } else if safety_ratio >= 1.0 {
            Self::Marginal
        } else {
            Self::Critical
        }
    }
}

impl fmt::Display for SafetyPosture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Healthy => "healthy",
            Self::Marginal => "marginal",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// One evolution history entry with its derived ratio.
#[derive(Clone, Debug, Serialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub intelligence: f64,
    pub power: f64,
    pub alignment: f64,
    pub safety_ratio: f64,
}

impl From<&CapabilityState> for HistoryPoint {
    fn from(state: &CapabilityState) -> Self {
        Self {
            timestamp: state.timestamp,
            intelligence: state.intelligence,
            power: state.power,
            alignment: state.alignment,
            safety_ratio: state.safety_ratio(),
        }
    }
}

/// Point-in-time summary of an engine and its guard's decision log.
#[derive(Clone, Debug, Serialize)]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub agent_id: String,
    pub engine_created_at: DateTime<Utc>,
    pub current: CapabilityState,
    pub posture: SafetyPosture,
    pub thresholds: Thresholds,
    pub principles: Vec<Principle>,
    pub approvals: usize,
    pub violations: usize,
    pub threshold_proposals: usize,
    pub history: Vec<HistoryPoint>,
    pub recent_decisions: Vec<DecisionRecord>,
}

impl AuditReport {
    /// Project the engine's current state and logs into a report.
    pub fn from_engine(engine: &TransitionEngine) -> Self {
        let log = engine.guard().log();
        let current = engine.assess_current().clone();
        let posture = SafetyPosture::classify(current.safety_ratio());

        Self {
            generated_at: Utc::now(),
            agent_id: engine.agent_id().to_string(),
            engine_created_at: engine.created_at(),
            posture,
            thresholds: engine.guard().thresholds().clone(),
            principles: engine.guard().principles().to_vec(),
            approvals: log.count(Outcome::Approved),
            violations: log.count(Outcome::Violation),
            threshold_proposals: log.count(Outcome::ThresholdProposal),
            history: engine.history().states().iter().map(Into::into).collect(),
            recent_decisions: log.recent(RECENT_DECISIONS).to_vec(),
            current,
        }
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AUDIT REPORT: {}", self.agent_id)?;
        writeln!(f, "engine created: {}", self.engine_created_at)?;
        writeln!(f, "generated:      {}", self.generated_at)?;
        writeln!(f)?;
        writeln!(
            f,
            "current state: I={:.2} P={:.2} A={:.2} (ratio {:.2}, {})",
            self.current.intelligence,
            self.current.power,
            self.current.alignment,
            self.current.safety_ratio(),
            self.posture,
        )?;
        writeln!(
            f,
            "decisions: {} approved, {} violations, {} threshold proposals",
            self.approvals, self.violations, self.threshold_proposals,
        )?;

        writeln!(f)?;
        writeln!(f, "principles:")?;
        for principle in &self.principles {
            writeln!(f, "  {}: {}", principle.name, principle.description)?;
        }

        writeln!(f)?;
        writeln!(f, "thresholds:")?;
        writeln!(
            f,
            "  minimum_safety_ratio: {:.2}",
            self.thresholds.minimum_safety_ratio
        )?;
        writeln!(
            f,
            "  recommended_safety_ratio: {:.2}",
            self.thresholds.recommended_safety_ratio
        )?;
        writeln!(
            f,
            "  optimal_safety_ratio: {:.2}",
            self.thresholds.optimal_safety_ratio
        )?;
        writeln!(
            f,
            "  max_single_step_growth: {:.2}",
            self.thresholds.max_single_step_growth
        )?;
        writeln!(f, "  alignment_floor: {:.2}", self.thresholds.alignment_floor)?;

        writeln!(f)?;
        writeln!(f, "evolution history:")?;
        for (i, point) in self.history.iter().enumerate() {
            writeln!(
                f,
                "  {i}: I={:.1} P={:.1} A={:.1} (ratio {:.2})",
                point.intelligence, point.power, point.alignment, point.safety_ratio,
            )?;
        }

        writeln!(f)?;
        writeln!(f, "recent decisions:")?;
        for record in &self.recent_decisions {
            writeln!(
                f,
                "  {} {:?}: {}",
                record.timestamp(),
                record.outcome(),
                record.justification(),
            )?;
        }

        Ok(())
    }
}
