// SEMGATE - Semantic admission gate
// Copyright (c) 2026 Semgate Contributors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Circuit breaker: the block/allow decision
//!
//! Wraps an [`EntropyEngine`] with a fail-closed admission decision at the
//! external boundary. Inability to measure is never treated as safe: any
//! failure of the underlying evaluation blocks the payload with +∞ entropy.

use crate::engine::{EntropyEngine, EntropyProvider, InterfaceBoundary};
use crate::THRESHOLD_ASSET;

/// Decision produced by [`CircuitBreaker::evaluate`]
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitBreakerDecision {
    /// Whether the payload is blocked
    pub blocked: bool,
    /// Short reason for the decision
    pub reason: String,
    /// Measured entropy (+∞ when the evaluation failed)
    pub entropy: f64,
    /// Threshold the entropy was compared against
    pub threshold: f64,
    /// Human-readable description of the decision
    pub message: String,
    /// Which estimator produced the entropy (None when the evaluation failed)
    pub provider: Option<EntropyProvider>,
}

impl CircuitBreakerDecision {
    /// Whether the payload may proceed downstream
    pub fn is_allowed(&self) -> bool {
        !self.blocked
    }
}

/// Fail-closed admission breaker
///
/// Trips when entropy reaches the asset threshold (2.76), and on every
/// evaluation failure.
#[derive(Debug)]
pub struct CircuitBreaker {
    engine: EntropyEngine,
    threshold: f64,
}

impl CircuitBreaker {
    /// Wrap an engine with the contract threshold
    pub fn new(engine: EntropyEngine) -> Self {
        Self {
            engine,
            threshold: THRESHOLD_ASSET,
        }
    }

    /// Access the wrapped engine
    pub fn engine(&self) -> &EntropyEngine {
        &self.engine
    }

    /// The threshold the breaker trips at
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluate a payload at the external boundary
    ///
    /// Never fails: gate rejections and engine errors become blocked
    /// decisions with +∞ entropy.
    pub fn evaluate(&self, payload: &[u8]) -> CircuitBreakerDecision {
        match self
            .engine
            .compute(payload, None, InterfaceBoundary::External)
        {
            Ok(result) => {
                if result.entropy >= self.threshold {
                    CircuitBreakerDecision {
                        blocked: true,
                        reason: "entropy exceeds asset threshold".to_string(),
                        entropy: result.entropy,
                        threshold: self.threshold,
                        message: format!(
                            "circuit breaker triggered: entropy {:.4} >= {}",
                            result.entropy, self.threshold
                        ),
                        provider: Some(result.provider),
                    }
                } else {
                    CircuitBreakerDecision {
                        blocked: false,
                        reason: "entropy within safe range".to_string(),
                        entropy: result.entropy,
                        threshold: self.threshold,
                        message: format!(
                            "circuit breaker not triggered: entropy {:.4} < {}",
                            result.entropy, self.threshold
                        ),
                        provider: Some(result.provider),
                    }
                }
            }
            Err(err) => CircuitBreakerDecision {
                blocked: true,
                reason: format!("entropy calculation failed: {}", err),
                entropy: f64::INFINITY,
                threshold: self.threshold,
                message: format!("circuit breaker triggered (fail-safe): {}", err),
                provider: None,
            },
        }
    }
}
