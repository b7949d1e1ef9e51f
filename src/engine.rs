// SEMGATE - Semantic admission gate
// Copyright (c) 2026 Semgate Contributors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Entropy engine: gate, provider fallback, classification
//!
//! Orchestrates one evaluation end to end: encoding gate first, then the
//! embedding provider with an unconditional fallback to the compression
//! estimator, then safety classification. The fallback is the availability
//! guarantee: an entropy value and safety band can always be produced
//! without network access.
//!
//! The gate contract has two externally visible failure shapes for the same
//! detection, selected by the trust boundary of the call: a resubmittable
//! rejection at the external boundary, a fatal lockdown with a fresh
//! incident identifier at the internal boundary.

use std::sync::Arc;

use uuid::Uuid;

use crate::classifier::SafetyBand;
use crate::error::{EngineError, ProviderError, Result};
use crate::estimator::{self, CompressionEstimate};
use crate::gate::{EncodingGate, GateConfig, GateReason};
use crate::metrics::{epoch_seconds, GateMetrics};
use crate::provider::{entropy_from_density, semantic_density, EmbeddingProvider};

/// Which estimator produced an [`EntropyResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntropyProvider {
    /// Primary path: external embedding capability
    Embedding,
    /// Compression estimator, reached because the provider failed
    CompressionFallback,
    /// Compression estimator, requested explicitly (testing / offline)
    CompressionForced,
}

impl EntropyProvider {
    /// Stable tag for reports and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embedding => "embedding",
            Self::CompressionFallback => "compression_fallback",
            Self::CompressionForced => "compression_forced",
        }
    }
}

impl std::fmt::Display for EntropyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trust boundary an evaluation is performed from
///
/// Identical gate detection, different failure contract: the external
/// boundary gets a structured, resubmittable rejection; the internal
/// boundary gets a fatal lockdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceBoundary {
    /// Untrusted caller; gate failures are recoverable rejections
    External,
    /// Cross-system internal caller; gate failures are lockdowns
    Internal,
}

/// Explicit provider selection for an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedProvider {
    /// Use the primary embedding path (the default behaviour; the fallback
    /// guarantee still applies)
    Embedding,
    /// Skip the provider and use the compression estimator directly
    Compression,
}

/// Result of one entropy evaluation
///
/// A result produced via the compression path carries a
/// [`CompressionEstimate`]; one produced via the embedding path carries the
/// vector and its semantic density. Never both.
#[derive(Debug, Clone, PartialEq)]
pub struct EntropyResult {
    /// Measured entropy (may be +∞)
    pub entropy: f64,
    /// Safety band for the measured entropy
    pub band: SafetyBand,
    /// Which estimator produced the value
    pub provider: EntropyProvider,
    /// Embedding vector (embedding path only)
    pub embedding: Option<Vec<f32>>,
    /// L2 norm of the embedding vector (embedding path only)
    pub semantic_density: Option<f64>,
    /// Compression estimate (compression path only)
    pub compression: Option<CompressionEstimate>,
    /// Whether the gate refused the payload (always false on the success
    /// path; kept for report completeness)
    pub encoding_unmeasurable: bool,
    /// Gate reason when unmeasurable
    pub encoding_reason: Option<GateReason>,
}

/// Content-free digest of a payload, for log correlation
///
/// Fixed-width hex over xxh64; carries no information about the content
/// beyond its identity.
pub fn payload_digest(payload: &[u8]) -> String {
    format!("{:016x}", xxhash_rust::xxh64::xxh64(payload, 0))
}

/// Entropy evaluation engine
///
/// Capabilities are injected at construction (no runtime module loading, no
/// ambient globals). Stateless per evaluation; the only shared mutable state
/// is the optional attached [`GateMetrics`], which never affects outcomes.
pub struct EntropyEngine {
    gate: EncodingGate,
    provider: Option<Box<dyn EmbeddingProvider>>,
    metrics: Option<Arc<GateMetrics>>,
}

impl EntropyEngine {
    /// Create an engine with an embedding provider
    pub fn new(provider: Box<dyn EmbeddingProvider>) -> Self {
        Self {
            gate: EncodingGate::new(),
            provider: Some(provider),
            metrics: None,
        }
    }

    /// Create an engine with no embedding provider
    ///
    /// Every evaluation takes the compression path (provider =
    /// CompressionFallback unless forced).
    pub fn offline() -> Self {
        Self {
            gate: EncodingGate::new(),
            provider: None,
            metrics: None,
        }
    }

    /// Replace the gate configuration
    pub fn with_gate_config(mut self, config: GateConfig) -> Self {
        self.gate = EncodingGate::with_config(config);
        self
    }

    /// Attach a metrics collector
    ///
    /// The engine records inputs, unmeasurable verdicts, and lockdown
    /// incidents; bookkeeping only.
    pub fn with_metrics(mut self, metrics: Arc<GateMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Access the gate
    pub fn gate(&self) -> &EncodingGate {
        &self.gate
    }

    /// Evaluate a payload
    ///
    /// Steps, in order: empty-input check, encoding gate, provider selection,
    /// primary embedding attempt with unconditional compression fallback,
    /// safety classification.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EmptyInput`] for an empty payload
    /// - [`EngineError::GateRejected`] when the gate refuses the payload and
    ///   `boundary` is [`InterfaceBoundary::External`]
    /// - [`EngineError::Lockdown`] when the gate refuses the payload and
    ///   `boundary` is [`InterfaceBoundary::Internal`]
    ///
    /// Provider failures are never an error: any failed embedding attempt
    /// falls back to the compression estimator.
    pub fn compute(
        &self,
        payload: &[u8],
        force: Option<ForcedProvider>,
        boundary: InterfaceBoundary,
    ) -> Result<EntropyResult> {
        if payload.is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let verdict = self.gate.classify(payload);
        if let Some(metrics) = &self.metrics {
            metrics.record_input(!verdict.measurable);
        }

        if !verdict.measurable {
            return Err(match boundary {
                InterfaceBoundary::External => EngineError::GateRejected {
                    reason: verdict.reason,
                },
                InterfaceBoundary::Internal => {
                    let incident_id = format!("INC-{}", Uuid::new_v4());
                    if let Some(metrics) = &self.metrics {
                        metrics.record_lockdown(incident_id.clone(), epoch_seconds());
                    }
                    #[cfg(feature = "logging")]
                    log::warn!(
                        "failsafe lockdown: {} (incident {}, payload {})",
                        verdict.reason,
                        incident_id,
                        payload_digest(payload)
                    );
                    EngineError::Lockdown {
                        reason: verdict.reason,
                        incident_id,
                    }
                }
            });
        }

        // The gate has already verified UTF-8
        let text = match std::str::from_utf8(payload) {
            Ok(text) => text,
            Err(_) => {
                return Err(EngineError::GateRejected {
                    reason: GateReason::Utf8DecodeFailure,
                })
            }
        };

        if force == Some(ForcedProvider::Compression) {
            return Ok(compression_result(text, EntropyProvider::CompressionForced));
        }

        match self.embedding_attempt(text) {
            Ok(result) => Ok(result),
            Err(_err) => {
                #[cfg(feature = "logging")]
                log::warn!(
                    "embedding provider failed ({}); falling back to compression estimator (payload {})",
                    _err,
                    payload_digest(payload)
                );
                Ok(compression_result(
                    text,
                    EntropyProvider::CompressionFallback,
                ))
            }
        }
    }

    /// One attempt against the primary provider; no retries
    fn embedding_attempt(&self, text: &str) -> std::result::Result<EntropyResult, ProviderError> {
        let provider = self.provider.as_deref().ok_or(ProviderError::Unavailable)?;
        let embedding = provider.embed(text)?;

        if embedding.is_empty() {
            return Err(ProviderError::Malformed {
                reason: "empty embedding vector".to_string(),
            });
        }
        if embedding.iter().any(|x| !x.is_finite()) {
            return Err(ProviderError::Malformed {
                reason: "non-finite embedding component".to_string(),
            });
        }

        let density = semantic_density(&embedding);
        let entropy = entropy_from_density(density);

        Ok(EntropyResult {
            entropy,
            band: SafetyBand::from_entropy(entropy),
            provider: EntropyProvider::Embedding,
            embedding: Some(embedding),
            semantic_density: Some(density),
            compression: None,
            encoding_unmeasurable: false,
            encoding_reason: None,
        })
    }
}

impl std::fmt::Debug for EntropyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntropyEngine")
            .field("gate", &self.gate)
            .field("has_provider", &self.provider.is_some())
            .field("has_metrics", &self.metrics.is_some())
            .finish()
    }
}

fn compression_result(text: &str, provider: EntropyProvider) -> EntropyResult {
    let (entropy, estimate) = estimator::estimate(text);
    EntropyResult {
        entropy,
        band: SafetyBand::from_entropy(entropy),
        provider,
        embedding: None,
        semantic_density: None,
        compression: Some(estimate),
        encoding_unmeasurable: false,
        encoding_reason: None,
    }
}
