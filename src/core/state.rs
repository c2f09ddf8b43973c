//! Capability state snapshots and the derived safety ratio.
//!
//! A `CapabilityState` is an immutable value: applying a delta produces a
//! new state, never an in-place mutation of a recorded one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The capability dimension a proposal targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Intelligence,
    Power,
    Alignment,
}

impl Area {
    /// Get the area's name for display/logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intelligence => "intelligence",
            Self::Power => "power",
            Self::Alignment => "alignment",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A capability state failed structural validation.
///
/// This is a programming error on the caller's side (metrics must be
/// finite and non-negative), not a policy outcome.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid capability state: {reason}")]
pub struct InvalidState {
    pub reason: String,
}

/// Snapshot of an agent's self-reported capability metrics.
///
/// Each metric is conventionally in `[0.0, 10.0]`. The values are
/// self-reported; honesty cannot be verified here. The derived safety
/// ratio is `alignment / sqrt(intelligence² + power²)`, and is positive
/// infinity when intelligence and power are both zero (no capability is
/// infinitely safe).
///
/// # Example
///
/// ```rust
/// use evoguard::core::CapabilityState;
///
/// let state = CapabilityState::new(2.0, 2.0, 5.0);
/// let ratio = state.safety_ratio();
/// assert!((ratio - 5.0 / 8.0_f64.sqrt()).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapabilityState {
    /// Comprehension capacity
    pub intelligence: f64,
    /// Execution capacity
    pub power: f64,
    /// Adherence to governing principles
    pub alignment: f64,
    /// When this snapshot was recorded
    pub timestamp: DateTime<Utc>,
}

impl CapabilityState {
    /// Create a state stamped with the current time.
    pub fn new(intelligence: f64, power: f64, alignment: f64) -> Self {
        Self {
            intelligence,
            power,
            alignment,
            timestamp: Utc::now(),
        }
    }

    /// The honest-self-report baseline every engine starts from:
    /// low capability, high alignment.
    pub fn baseline() -> Self {
        Self::new(1.0, 1.0, 10.0)
    }

    /// Compute the safety ratio `alignment / sqrt(intelligence² + power²)`.
    ///
    /// Returns `f64::INFINITY` when intelligence and power are both zero.
    pub fn safety_ratio(&self) -> f64 {
        let combined = self.intelligence.hypot(self.power);
        if combined == 0.0 {
            f64::INFINITY
        } else {
            self.alignment / combined
        }
    }

    /// Check the state is structurally sound: every metric finite and
    /// non-negative. The conventional 10.0 ceiling is not enforced.
    pub fn validate(&self) -> Result<(), InvalidState> {
        for (name, value) in [
            (Area::Intelligence, self.intelligence),
            (Area::Power, self.power),
            (Area::Alignment, self.alignment),
        ] {
            if !value.is_finite() {
                return Err(InvalidState {
                    reason: format!("{name} is not a finite number"),
                });
            }
            if value < 0.0 {
                return Err(InvalidState {
                    reason: format!("{name} is negative ({value})"),
                });
            }
        }
        Ok(())
    }

    /// Produce a new state with `delta` applied to the named area,
    /// stamped with the current time. The original is left untouched.
    pub fn applying(&self, area: Area, delta: f64) -> Self {
        let mut next = self.clone();
        match area {
            Area::Intelligence => next.intelligence += delta,
            Area::Power => next.power += delta,
            Area::Alignment => next.alignment += delta,
        }
        next.timestamp = Utc::now();
        next
    }
}
