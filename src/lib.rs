//! # SEMGATE - Semantic admission gate
//!
//! An entropy-based safety gate deciding whether a text payload may be
//! admitted into a downstream semantic-processing pipeline.
//!
//! ## Key Features
//!
//! - **Encoding gate**: ordered multi-criterion measurability detection
//! - **Provider fallback**: embedding-based entropy with a deterministic
//!   offline compression estimator behind it
//! - **Fail-closed breaker**: inability to measure is never treated as safe
//! - **Two trust boundaries**: identical detection, different failure shapes
//!   (resubmittable rejection vs. fatal lockdown)
//!
//! ## Quick Start
//!
//! ```rust
//! use semgate::{EntropyEngine, ForcedProvider, InterfaceBoundary, SafetyBand};
//!
//! // Offline evaluation via the compression estimator
//! let engine = EntropyEngine::offline();
//! let result = engine
//!     .compute(
//!         b"Hello, world!",
//!         Some(ForcedProvider::Compression),
//!         InterfaceBoundary::External,
//!     )
//!     .unwrap();
//!
//! assert_eq!(result.band, SafetyBand::Noise);
//! assert!(result.entropy.is_finite());
//! ```
//!
//! With an embedding provider, the primary path measures semantic density;
//! any provider failure falls back to the compression estimator without
//! surfacing an error:
//!
//! ```rust
//! use semgate::{CircuitBreaker, EntropyEngine, FixedEmbedding};
//!
//! let engine = EntropyEngine::new(Box::new(FixedEmbedding::unit()));
//! let breaker = CircuitBreaker::new(engine);
//!
//! let decision = breaker.evaluate(b"a perfectly ordinary sentence");
//! assert!(decision.is_allowed());
//! ```
//!
//! ## Modules
//!
//! - [`gate`]: pre-entropy measurability detection
//! - [`estimator`]: offline compression-based entropy estimation
//! - [`provider`]: embedding capability interface and density math
//! - [`engine`]: evaluation orchestration and provider fallback
//! - [`classifier`]: entropy to safety band mapping
//! - [`breaker`]: fail-closed block/allow decision
//! - [`response`]: fixed rejection and lockdown payload shapes
//! - [`collaborator`]: policy validator and drift detector interfaces
//! - [`metrics`]: counters, incident log, health checks

// Modules
pub mod breaker;
pub mod classifier;
pub mod collaborator;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod gate;
pub mod metrics;
pub mod provider;
pub mod response;

// Re-exports for convenient access
pub use breaker::{CircuitBreaker, CircuitBreakerDecision};
pub use classifier::SafetyBand;
pub use collaborator::{
    check_drift, check_policy, DriftDetector, DriftVerdict, PolicyValidator, PolicyVerdict,
    DEFAULT_DRIFT_THRESHOLD,
};
pub use engine::{
    payload_digest, EntropyEngine, EntropyProvider, EntropyResult, ForcedProvider,
    InterfaceBoundary,
};
pub use error::{CollaboratorError, EngineError, ProviderError, Result};
pub use estimator::{estimate, CompressionEstimate};
pub use gate::{EncodingGate, EncodingVerdict, GateConfig, GateReason};
pub use metrics::{GateMetrics, HealthReport, HealthStatus, IncidentRecord};
pub use provider::{
    entropy_from_density, semantic_density, EmbeddingConfig, EmbeddingProvider, FixedEmbedding,
};
pub use response::{LockdownResponse, RejectionResponse};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Entropy calibration factor k, fixed for cross-system threshold
/// compatibility
pub const ENTROPY_FACTOR: f64 = 0.18;

/// S★: the irreversible semantic drift point
pub const S_STAR: f64 = 2.76;

/// Entropy at or above this requires monitoring (and trips the breaker)
pub const THRESHOLD_ASSET: f64 = S_STAR;

/// Entropy at or above this requires interception
pub const THRESHOLD_CRITICAL: f64 = 4.14;

/// Entropy at or above this is a complete block with mandatory human review
pub const THRESHOLD_FAILSAFE_LOCKDOWN: f64 = 5.0;
