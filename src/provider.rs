// SEMGATE - Semantic admission gate
// Copyright (c) 2026 Semgate Contributors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Embedding provider capability interface
//!
//! The embedding model is an opaque external capability: this module defines
//! the seam the engine calls through, the explicit configuration handed to a
//! provider implementation at process startup, and the density math shared by
//! every implementation. The transport itself (HTTP client, auth, transport
//! retries) lives outside the core.

use std::time::Duration;

use crate::error::ProviderError;
use crate::ENTROPY_FACTOR;

/// External embedding capability
///
/// Implementations may fail, time out, or return malformed data; the engine
/// treats any such outcome as one recoverable failure and falls back to the
/// compression estimator. One attempt per evaluation, no retries, so the
/// worst case is bounded by the implementation's own timeout.
pub trait EmbeddingProvider: Send + Sync {
    /// Request an embedding vector for a text payload
    fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}

/// Explicit provider configuration
///
/// Passed to a provider implementation at construction; scoped to the
/// process, never read from ambient environment state.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider API base URL
    pub base_url: String,
    /// Credential presented to the provider
    pub api_key: String,
    /// Embedding model identifier
    pub model: String,
    /// Deadline for a single embed call
    pub timeout: Duration,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "text-embedding-3-small".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl EmbeddingConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the credential
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-call deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Semantic density of an embedding vector: its L2 norm
///
/// Used as a proxy for how ordered a payload's meaning is.
pub fn semantic_density(embedding: &[f32]) -> f64 {
    embedding
        .iter()
        .map(|&x| {
            let x = f64::from(x);
            x * x
        })
        .sum::<f64>()
        .sqrt()
}

/// Map a semantic density to the entropy scale
///
/// Higher density means more order and lower entropy; `density <= 0` is
/// defined as +∞ so the classifier fails closed.
pub fn entropy_from_density(density: f64) -> f64 {
    if density <= 0.0 {
        return f64::INFINITY;
    }
    -density.ln() / ENTROPY_FACTOR
}

/// Provider returning a fixed vector
///
/// In-memory implementation of [`EmbeddingProvider`] for tests and offline
/// calibration, analogous to a memory-backed logger: no transport, always
/// succeeds.
///
/// ```rust
/// use semgate::provider::{semantic_density, FixedEmbedding};
/// use semgate::EmbeddingProvider;
///
/// let provider = FixedEmbedding::new(vec![0.6, 0.8]);
/// let vector = provider.embed("any payload").unwrap();
/// assert!((semantic_density(&vector) - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct FixedEmbedding {
    vector: Vec<f32>,
}

impl FixedEmbedding {
    /// Create a provider that always returns `vector`
    pub fn new(vector: Vec<f32>) -> Self {
        Self { vector }
    }

    /// Provider returning a unit vector (density 1.0, entropy 0.0)
    pub fn unit() -> Self {
        Self::new(vec![1.0])
    }
}

impl EmbeddingProvider for FixedEmbedding {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, ProviderError> {
        Ok(self.vector.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_density_is_l2_norm() {
        assert_relative_eq!(semantic_density(&[3.0, 4.0]), 5.0, epsilon = 1e-12);
        assert_relative_eq!(semantic_density(&[1.0]), 1.0, epsilon = 1e-12);
        assert_eq!(semantic_density(&[]), 0.0);
    }

    #[test]
    fn test_unit_density_maps_to_zero_entropy() {
        assert_relative_eq!(entropy_from_density(1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_low_density_maps_to_high_entropy() {
        // Density 0.6 is well below a typical embedding norm
        let entropy = entropy_from_density(0.6);
        assert_relative_eq!(entropy, -0.6_f64.ln() / 0.18, epsilon = 1e-12);
        assert!(entropy > 2.76);
    }

    #[test]
    fn test_zero_density_fails_closed() {
        assert!(entropy_from_density(0.0).is_infinite());
        assert!(entropy_from_density(-0.5).is_infinite());
    }

    #[test]
    fn test_fixed_provider_roundtrip() {
        let provider = FixedEmbedding::new(vec![0.5, 0.5]);
        assert_eq!(provider.embed("x").unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_config_builders() {
        let config = EmbeddingConfig::new()
            .with_base_url("https://embeddings.internal/v1")
            .with_api_key("k")
            .with_model("text-embedding-3-large")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.base_url, "https://embeddings.internal/v1");
        assert_eq!(config.model, "text-embedding-3-large");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_config_defaults() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.model, "text-embedding-3-small");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
