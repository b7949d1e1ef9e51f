//! Fixed external payload shapes
//!
//! Two non-overlapping wire payloads, one per trust boundary. Both use
//! neutral technical language and never echo the offending content, its
//! language, or specific characters; reason codes are translated to their
//! wire strings exactly here, at the interface boundary.

use serde::Serialize;

use crate::gate::GateReason;

/// Review deadline attached to every lockdown payload
pub const REVIEW_DEADLINE: &str = "72h";

/// Rejection payload for the external boundary
///
/// Always phrased as a remediable condition: the caller may normalize the
/// input and resubmit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectionResponse {
    /// Wire reason code
    pub error: String,
    /// Neutral description of the condition
    pub message: String,
    /// What the caller can do about it
    pub remediation: String,
    /// Appeal channel
    pub appeal: String,
    /// Documentation link
    pub documentation: String,
}

impl RejectionResponse {
    /// Build the rejection payload for a reason code
    pub fn new(reason: GateReason) -> Self {
        Self {
            error: reason.as_str().to_string(),
            message: "The input contains encoding patterns that cannot be processed by the \
                      admission gate."
                .to_string(),
            remediation: "Please ensure input conforms to RFC 3629 UTF-8 and Unicode \
                          Normalization Form C."
                .to_string(),
            appeal: "If you believe this is an error, please contact support with the incident ID."
                .to_string(),
            documentation: "https://semgate.dev/docs/encoding-gate".to_string(),
        }
    }
}

/// Lockdown payload for the internal boundary
///
/// Fatal: triggers immediate notification, an incident ticket, and a human
/// review deadline. No resubmission path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LockdownResponse {
    /// Always "FAILSAFE_LOCKDOWN"
    pub status: String,
    /// Wire reason code
    pub reason: String,
    /// Incident identifier generated by the engine
    pub incident_id: String,
    /// Timestamp supplied by the caller
    pub timestamp: String,
    /// Notification dispatch flag
    pub notification_sent: bool,
    /// Ticket creation flag
    pub ticket_created: bool,
    /// Always [`REVIEW_DEADLINE`]
    pub review_deadline: String,
}

impl LockdownResponse {
    /// Build the lockdown payload for a reason code and incident
    pub fn new(
        reason: GateReason,
        incident_id: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            status: "FAILSAFE_LOCKDOWN".to_string(),
            reason: reason.as_str().to_string(),
            incident_id: incident_id.into(),
            timestamp: timestamp.into(),
            notification_sent: true,
            ticket_created: true,
            review_deadline: REVIEW_DEADLINE.to_string(),
        }
    }

    /// Build the lockdown payload stamped with the current time (RFC 3339 UTC)
    #[cfg(feature = "timestamps")]
    pub fn now(reason: GateReason, incident_id: impl Into<String>) -> Self {
        Self::new(reason, incident_id, chrono::Utc::now().to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_carries_wire_reason() {
        let response = RejectionResponse::new(GateReason::NormalizationAmbiguity);
        assert_eq!(response.error, "NORMALIZATION_AMBIGUITY");
        assert!(response.remediation.contains("RFC 3629"));
    }

    #[test]
    fn test_rejection_json_field_names() {
        let response = RejectionResponse::new(GateReason::Utf8DecodeFailure);
        let json = serde_json::to_value(&response).unwrap();
        for field in ["error", "message", "remediation", "appeal", "documentation"] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(json["error"], "UTF8_DECODE_FAILURE");
    }

    #[test]
    fn test_rejection_never_echoes_content() {
        // The payload shape is fixed; nothing from the input can appear
        let a = RejectionResponse::new(GateReason::RandomNoiseSignature);
        let b = RejectionResponse::new(GateReason::RandomNoiseSignature);
        assert_eq!(a, b);
    }

    #[test]
    fn test_lockdown_shape() {
        let response =
            LockdownResponse::new(GateReason::EmojiDensityExceeded, "INC-123", "1700000000");
        assert_eq!(response.status, "FAILSAFE_LOCKDOWN");
        assert_eq!(response.reason, "EMOJI_DENSITY_EXCEEDED");
        assert_eq!(response.incident_id, "INC-123");
        assert_eq!(response.timestamp, "1700000000");
        assert!(response.notification_sent);
        assert!(response.ticket_created);
        assert_eq!(response.review_deadline, "72h");
    }

    #[test]
    fn test_lockdown_json_field_names() {
        let response = LockdownResponse::new(GateReason::EntropyOutOfBounds, "INC-1", "0");
        let json = serde_json::to_value(&response).unwrap();
        for field in [
            "status",
            "reason",
            "incident_id",
            "timestamp",
            "notification_sent",
            "ticket_created",
            "review_deadline",
        ] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(json["review_deadline"], "72h");
    }

    #[cfg(feature = "timestamps")]
    #[test]
    fn test_lockdown_now_stamps_rfc3339() {
        let response = LockdownResponse::now(GateReason::EntropyOutOfBounds, "INC-2");
        // RFC 3339 timestamps always carry a date separator
        assert!(response.timestamp.contains('-'));
        assert!(response.timestamp.contains('T'));
    }
}
