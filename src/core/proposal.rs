//! Candidate transitions awaiting adjudication.

use super::state::Area;
use serde::{Deserialize, Serialize};

/// A candidate single-metric transition.
///
/// Risks and mitigations are opaque descriptive text: they document the
/// proposer's thinking but carry no enforced schema and are never
/// validated.
///
/// # Example
///
/// ```rust
/// use evoguard::core::{Area, Proposal};
///
/// let proposal = Proposal::new(
///     Area::Intelligence,
///     0.5,
///     "Expand reasoning capacity",
///     "Alignment is strong enough to support measured growth",
/// )
/// .risk("Capability growth without proportional alignment growth")
/// .mitigation("Re-check the safety ratio after the change");
///
/// assert_eq!(proposal.risks.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Which metric the proposal changes
    pub area: Area,
    /// What the improvement is, concretely
    pub description: String,
    /// Magnitude of the change (may be fractional or negative)
    pub delta: f64,
    /// Why the change is warranted
    pub justification: String,
    /// Identified risks (informational only)
    pub risks: Vec<String>,
    /// How those risks are mitigated (informational only)
    pub mitigations: Vec<String>,
}

impl Proposal {
    pub fn new(
        area: Area,
        delta: f64,
        description: impl Into<String>,
        justification: impl Into<String>,
    ) -> Self {
        Self {
            area,
            description: description.into(),
            delta,
            justification: justification.into(),
            risks: Vec::new(),
            mitigations: Vec::new(),
        }
    }

    /// Attach an identified risk.
    pub fn risk(mut self, risk: impl Into<String>) -> Self {
        self.risks.push(risk.into());
        self
    }

    /// Attach a mitigation for an identified risk.
    pub fn mitigation(mut self, mitigation: impl Into<String>) -> Self {
        self.mitigations.push(mitigation.into());
        self
    }
}
