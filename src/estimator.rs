//! Offline entropy estimation via lossless compression
//!
//! Fallback provider for the entropy engine: deterministic, offline, fast,
//! no external calls. The estimate is a statistical proxy derived from the
//! deflate compression ratio, not a semantic density, and is calibrated to
//! the same thresholds through the shared entropy factor.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::ENTROPY_FACTOR;

/// Fixed caveat attached to every compression-based estimate
pub const ESTIMATE_NOTE: &str = "Statistical entropy proxy (not semantic density)";

/// Result of a compression-based entropy estimate
///
/// All fields derive deterministically from one byte payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionEstimate {
    /// Payload size before compression
    pub original_size: usize,
    /// Payload size after compression
    pub compressed_size: usize,
    /// `compressed_size / original_size` (1.0 for empty input)
    pub ratio: f64,
    /// `-ln(ratio) / ENTROPY_FACTOR`
    pub entropy_estimate: f64,
    /// Always [`ESTIMATE_NOTE`]
    pub note: &'static str,
}

/// Deflate-compressed length of a payload
pub fn compressed_len(payload: &[u8]) -> usize {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    // Writes into a Vec cannot fail
    if encoder.write_all(payload).is_err() {
        return payload.len();
    }
    match encoder.finish() {
        Ok(out) => out.len(),
        Err(_) => payload.len(),
    }
}

/// Compression ratio of a payload: compressed / original, 1.0 for empty input
pub fn compression_ratio(payload: &[u8]) -> f64 {
    if payload.is_empty() {
        return 1.0;
    }
    compressed_len(payload) as f64 / payload.len() as f64
}

/// Map a compression ratio to the entropy scale
///
/// Not reachable with `ratio <= 0` for non-empty input under a real
/// compressor; defined as +∞ there so the classifier fails closed.
pub fn entropy_from_ratio(ratio: f64) -> f64 {
    if ratio <= 0.0 {
        return f64::INFINITY;
    }
    -ratio.ln() / ENTROPY_FACTOR
}

/// Estimate entropy for a text payload
///
/// Pure function: two calls on identical bytes return bit-identical results.
pub fn estimate(text: &str) -> (f64, CompressionEstimate) {
    let payload = text.as_bytes();
    let original_size = payload.len();
    let compressed_size = if original_size == 0 {
        0
    } else {
        compressed_len(payload)
    };
    let ratio = if original_size == 0 {
        1.0
    } else {
        compressed_size as f64 / original_size as f64
    };
    let entropy_estimate = entropy_from_ratio(ratio);

    let result = CompressionEstimate {
        original_size,
        compressed_size,
        ratio,
        entropy_estimate,
        note: ESTIMATE_NOTE,
    };
    (entropy_estimate, result)
}
