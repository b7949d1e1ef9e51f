// SEMGATE - Semantic admission gate
// Copyright (c) 2026 Semgate Contributors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Collaborator capability interfaces
//!
//! Opaque external capabilities the core calls and must tolerate failures
//! from: a policy/consistency validator and a behavioral drift detector.
//! Both are injected as compile-time interfaces at process startup; the
//! wrappers here convert every failure to the fail-safe worst case and never
//! crash the caller.

use crate::error::CollaboratorError;

/// Default drift score above which drift is considered detected
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 2.5;

/// Policy/consistency validation capability
pub trait PolicyValidator: Send + Sync {
    /// Validate a text payload against the policy
    fn validate(&self, text: &str) -> Result<bool, CollaboratorError>;
}

/// Behavioral drift detection capability
pub trait DriftDetector: Send + Sync {
    /// Score how far a text payload has drifted
    fn score(&self, text: &str) -> Result<f64, CollaboratorError>;
}

/// Outcome of a policy validation
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyVerdict {
    /// Whether the payload passed validation
    pub passed: bool,
    /// Why it did not pass (empty when passed)
    pub reasons: Vec<String>,
}

/// Outcome of a drift detection
#[derive(Debug, Clone, PartialEq)]
pub struct DriftVerdict {
    /// Whether drift was detected
    pub drift_detected: bool,
    /// Measured drift score (+∞ when the detector failed)
    pub score: f64,
    /// Threshold the score was compared against
    pub threshold: f64,
}

/// Validate a payload, tolerating any collaborator failure
///
/// A failed or unreachable validator is "not passed" with the error captured
/// in the reasons list.
pub fn check_policy(validator: &dyn PolicyValidator, text: &str) -> PolicyVerdict {
    match validator.validate(text) {
        Ok(true) => PolicyVerdict {
            passed: true,
            reasons: Vec::new(),
        },
        Ok(false) => PolicyVerdict {
            passed: false,
            reasons: vec!["policy validation failed (no specific reasons available)".to_string()],
        },
        Err(err) => PolicyVerdict {
            passed: false,
            reasons: vec![format!("policy validation error: {}", err)],
        },
    }
}

/// Detect drift, tolerating any collaborator failure
///
/// A failed or unreachable detector is maximal drift: detected, score +∞.
pub fn check_drift(detector: &dyn DriftDetector, text: &str, threshold: f64) -> DriftVerdict {
    match detector.score(text) {
        Ok(score) => DriftVerdict {
            drift_detected: score > threshold,
            score,
            threshold,
        },
        Err(_) => DriftVerdict {
            drift_detected: true,
            score: f64::INFINITY,
            threshold,
        },
    }
}
