//! Error types for SEMGATE
//!
//! This module defines all error types used throughout the library.
//!
//! Two rules govern propagation:
//!
//! - Only [`EngineError`] is ever visible to callers, and its shape depends
//!   on the trust boundary the call was made from.
//! - [`ProviderError`] and [`CollaboratorError`] are always recovered
//!   internally (compression fallback, fail-safe verdicts) and never cross
//!   a public API.

use crate::gate::GateReason;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures surfaced by [`EntropyEngine::compute`](crate::EntropyEngine::compute)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Input was empty; there is nothing to admit
    #[error("text cannot be empty")]
    EmptyInput,

    /// The encoding gate refused the payload at the external boundary.
    ///
    /// Recoverable: the caller is expected to surface a rejection payload
    /// and may resubmit normalized input.
    #[error("encoding unmeasurable: {reason}")]
    GateRejected {
        /// Why the payload was refused
        reason: GateReason,
    },

    /// The encoding gate refused the payload at the internal boundary.
    ///
    /// Fatal for the call. A lockdown payload must be produced and the
    /// incident reviewed within the 72h deadline; there is no resubmission
    /// path.
    #[error("encoding unmeasurable (lockdown): {reason}, incident {incident_id}")]
    Lockdown {
        /// Why the payload was refused
        reason: GateReason,
        /// Freshly generated incident identifier (`INC-<uuid>`)
        incident_id: String,
    },
}

impl EngineError {
    /// Gate reason attached to this error, if it originated at the gate
    pub fn gate_reason(&self) -> Option<GateReason> {
        match self {
            Self::GateRejected { reason } | Self::Lockdown { reason, .. } => Some(*reason),
            Self::EmptyInput => None,
        }
    }

    /// True for failures that allow resubmission of normalized input
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Lockdown { .. })
    }
}

/// Failures of the embedding provider
///
/// Every variant triggers the compression fallback. None of them is ever
/// surfaced to a caller; availability of an entropy value is guaranteed
/// without network access.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Transport-level failure reaching the provider
    #[error("provider network error: {reason}")]
    Network { reason: String },

    /// The provider rejected the configured credential
    #[error("provider authentication failed: {reason}")]
    Auth { reason: String },

    /// The request exceeded its deadline
    #[error("provider timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The provider answered, but not with a usable vector
    #[error("provider returned malformed data: {reason}")]
    Malformed { reason: String },

    /// No provider was configured (offline deployment)
    #[error("no embedding provider configured")]
    Unavailable,
}

/// Failures of an out-of-process collaborator (policy validator, drift detector)
///
/// Converted to fail-safe verdicts by the wrappers in
/// [`collaborator`](crate::collaborator); never propagated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    /// The collaborator could not be reached
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator ran but reported an internal failure
    #[error("collaborator failed: {0}")]
    Failed(String),
}
