//! Gate health metrics
//!
//! The one piece of process-wide mutable state: additive counters and an
//! append-only incident log, created once at startup and read for the
//! process lifetime. Pure bookkeeping; nothing here affects classification
//! outcomes. Counters use relaxed atomics, so health-check reads are
//! eventually consistent with concurrent recording.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Health threshold for the false-positive rate (<1%)
pub const FALSE_POSITIVE_THRESHOLD: f64 = 0.01;

/// One recorded lockdown event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentRecord {
    /// Incident identifier (`INC-<uuid>`)
    pub incident_id: String,
    /// Timestamp supplied at recording time
    pub timestamp: String,
}

/// Aggregate health status derived from the metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All health thresholds hold
    Healthy,
    /// A health threshold is breached; the gate keeps operating
    Degraded,
}

impl HealthStatus {
    /// Whether all thresholds hold
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// Snapshot produced by [`GateMetrics::health`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    /// Derived status
    pub status: HealthStatus,
    /// Observed false-positive rate
    pub false_positive_rate: f64,
    /// Always [`FALSE_POSITIVE_THRESHOLD`]
    pub false_positive_threshold: f64,
    /// Whether the false-positive rate is under the threshold
    pub false_positive_ok: bool,
    /// Observed unmeasurable rate
    pub unmeasurable_rate: f64,
    /// Total inputs seen
    pub total_inputs: u64,
    /// Inputs the gate refused
    pub unmeasurable_count: u64,
    /// Lockdown events recorded
    pub lockdown_count: u64,
}

/// Process-wide gate metrics
///
/// All methods take `&self`; concurrent callers need no external
/// coordination. Counters are monotonically non-decreasing and there is no
/// reset in the public lifecycle.
#[derive(Debug, Default)]
pub struct GateMetrics {
    total_inputs: AtomicU64,
    unmeasurable: AtomicU64,
    false_positives: AtomicU64,
    incidents: Mutex<Vec<IncidentRecord>>,
}

impl GateMetrics {
    /// Create an empty metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one evaluated input
    pub fn record_input(&self, unmeasurable: bool) {
        self.total_inputs.fetch_add(1, Ordering::Relaxed);
        if unmeasurable {
            self.unmeasurable.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record an operator-confirmed false positive
    pub fn record_false_positive(&self) {
        self.false_positives.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lockdown event
    pub fn record_lockdown(&self, incident_id: impl Into<String>, timestamp: impl Into<String>) {
        let record = IncidentRecord {
            incident_id: incident_id.into(),
            timestamp: timestamp.into(),
        };
        self.incidents.lock().unwrap().push(record);
    }

    /// Total inputs seen
    pub fn total_inputs(&self) -> u64 {
        self.total_inputs.load(Ordering::Relaxed)
    }

    /// Inputs the gate refused
    pub fn unmeasurable_count(&self) -> u64 {
        self.unmeasurable.load(Ordering::Relaxed)
    }

    /// Operator-confirmed false positives
    pub fn false_positive_count(&self) -> u64 {
        self.false_positives.load(Ordering::Relaxed)
    }

    /// Lockdown events recorded so far
    pub fn lockdown_count(&self) -> u64 {
        self.incidents.lock().unwrap().len() as u64
    }

    /// Copy of the incident log
    pub fn incidents(&self) -> Vec<IncidentRecord> {
        self.incidents.lock().unwrap().clone()
    }

    /// Observed false-positive rate (0.0 with no inputs)
    pub fn false_positive_rate(&self) -> f64 {
        let total = self.total_inputs();
        if total == 0 {
            return 0.0;
        }
        self.false_positive_count() as f64 / total as f64
    }

    /// Observed unmeasurable rate (0.0 with no inputs)
    pub fn unmeasurable_rate(&self) -> f64 {
        let total = self.total_inputs();
        if total == 0 {
            return 0.0;
        }
        self.unmeasurable_count() as f64 / total as f64
    }

    /// Produce a health snapshot
    pub fn health(&self) -> HealthReport {
        let false_positive_rate = self.false_positive_rate();
        let false_positive_ok = false_positive_rate < FALSE_POSITIVE_THRESHOLD;
        HealthReport {
            status: if false_positive_ok {
                HealthStatus::Healthy
            } else {
                HealthStatus::Degraded
            },
            false_positive_rate,
            false_positive_threshold: FALSE_POSITIVE_THRESHOLD,
            false_positive_ok,
            unmeasurable_rate: self.unmeasurable_rate(),
            total_inputs: self.total_inputs(),
            unmeasurable_count: self.unmeasurable_count(),
            lockdown_count: self.lockdown_count(),
        }
    }
}

/// Seconds since the Unix epoch, as a string timestamp
pub(crate) fn epoch_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .to_string()
}
