// SEMGATE - Semantic admission gate
// Copyright (c) 2026 Semgate Contributors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Encoding gate: pre-entropy measurability detection
//!
//! This module decides whether an entropy value can be meaningfully computed
//! for a byte payload at all. Detection criteria run in a fixed order,
//! short-circuiting on the first match:
//!
//! 1. strict UTF-8 decoding
//! 2. normalization ambiguity (NFC ≠ NFKC with a high non-printable fraction)
//! 3. emoji density (only when the emoji classifier capability is present)
//! 4. random noise signature (runs of code points with no assigned name)
//! 5. compression ratio bounds (long payloads only)
//!
//! The gate is pure and stateless: identical bytes always produce an
//! identical verdict, and no entropy is ever computed for a payload whose
//! verdict is not measurable.

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

use crate::estimator;

/// Reason code attached to an [`EncodingVerdict`]
///
/// The wire representation (exact strings, cross-system contract) is produced
/// by [`GateReason::as_str`] and `Display`; everything inside the crate works
/// with the closed variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateReason {
    /// Payload is measurable
    Ok,
    /// Bytes are not valid UTF-8
    Utf8DecodeFailure,
    /// NFC and NFKC disagree and too much of the text is non-printable
    NormalizationAmbiguity,
    /// More than the allowed fraction of code points carry the emoji property
    EmojiDensityExceeded,
    /// A run of consecutive code points with no assigned character name
    RandomNoiseSignature,
    /// Compression ratio outside the calibrated band for text
    EntropyOutOfBounds,
}

impl GateReason {
    /// Wire-stable string for this reason code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Utf8DecodeFailure => "UTF8_DECODE_FAILURE",
            Self::NormalizationAmbiguity => "NORMALIZATION_AMBIGUITY",
            Self::EmojiDensityExceeded => "EMOJI_DENSITY_EXCEEDED",
            Self::RandomNoiseSignature => "RANDOM_NOISE_SIGNATURE",
            Self::EntropyOutOfBounds => "ENTROPY_OUT_OF_BOUNDS",
        }
    }
}

impl std::fmt::Display for GateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict produced by [`EncodingGate::classify`]
///
/// Immutable and produced fresh per call; `measurable` is true exactly when
/// `reason` is [`GateReason::Ok`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingVerdict {
    /// Whether an entropy value may be computed for the payload
    pub measurable: bool,
    /// Reason code (OK when measurable)
    pub reason: GateReason,
}

impl EncodingVerdict {
    /// Verdict for a measurable payload
    pub fn measurable() -> Self {
        Self {
            measurable: true,
            reason: GateReason::Ok,
        }
    }

    /// Verdict for an unmeasurable payload
    pub fn unmeasurable(reason: GateReason) -> Self {
        Self {
            measurable: false,
            reason,
        }
    }

    /// Whether the payload may proceed to entropy computation
    pub fn is_measurable(&self) -> bool {
        self.measurable
    }
}

/// Configuration for the encoding gate
///
/// Defaults are the calibrated contract values; changing them breaks
/// cross-system threshold compatibility.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Run the emoji density check (requires the `emoji` feature; when the
    /// capability is absent the check is skipped and the detection surface
    /// is reduced, not failed)
    pub emoji_detection: bool,
    /// Emoji fraction above which the payload is unmeasurable (default: 0.30)
    pub emoji_density_limit: f64,
    /// Non-printable fraction above which normalization ambiguity applies
    /// (default: 0.10)
    pub non_printable_limit: f64,
    /// Length of a run of unnamed code points that counts as noise
    /// (default: 3)
    pub noise_run_limit: usize,
    /// Minimum raw byte length before the compression bound check applies,
    /// keeping header overhead out of the ratio (default: 100)
    pub bounds_min_len: usize,
    /// Lower compression ratio bound (default: 0.05)
    pub ratio_floor: f64,
    /// Upper compression ratio bound (default: 1.2)
    pub ratio_ceiling: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            emoji_detection: cfg!(feature = "emoji"),
            emoji_density_limit: 0.30,
            non_printable_limit: 0.10,
            noise_run_limit: 3,
            bounds_min_len: 100,
            ratio_floor: 0.05,
            ratio_ceiling: 1.2,
        }
    }
}

/// Pre-entropy gate for byte payloads
///
/// O(n) in payload length, no side effects, target <10ms per 100KB.
#[derive(Debug, Clone, Default)]
pub struct EncodingGate {
    config: GateConfig,
}

impl EncodingGate {
    /// Create a gate with the default (contract) configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gate with custom configuration
    pub fn with_config(config: GateConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Classify a byte payload
    ///
    /// Checks run in contract order and short-circuit on the first match.
    /// Empty payloads are trivially measurable (entropy is defined as 0
    /// downstream).
    pub fn classify(&self, payload: &[u8]) -> EncodingVerdict {
        // (a) strict UTF-8 decoding
        let text = match std::str::from_utf8(payload) {
            Ok(text) => text,
            Err(_) => return EncodingVerdict::unmeasurable(GateReason::Utf8DecodeFailure),
        };

        if text.is_empty() {
            return EncodingVerdict::measurable();
        }

        let char_count = text.chars().count();

        // (b) normalization ambiguity
        if !text.nfc().eq(text.nfkc()) {
            let non_printable = text.chars().filter(|&c| is_non_printable(c)).count();
            if non_printable as f64 / char_count as f64 > self.config.non_printable_limit {
                return EncodingVerdict::unmeasurable(GateReason::NormalizationAmbiguity);
            }
        }

        // (c) emoji density, only when the classifier capability is present
        #[cfg(feature = "emoji")]
        if self.config.emoji_detection {
            let emoji = text
                .chars()
                .filter(|&c| unic_emoji_char::is_emoji(c))
                .count();
            if emoji as f64 / char_count as f64 > self.config.emoji_density_limit {
                return EncodingVerdict::unmeasurable(GateReason::EmojiDensityExceeded);
            }
        }

        // (d) random noise signature: a named code point resets the run
        let mut run = 0usize;
        for c in text.chars() {
            if has_assigned_name(c) {
                run = 0;
            } else {
                run += 1;
                if run >= self.config.noise_run_limit {
                    return EncodingVerdict::unmeasurable(GateReason::RandomNoiseSignature);
                }
            }
        }

        // (e) compression ratio bounds, long payloads only
        if payload.len() >= self.config.bounds_min_len {
            let ratio = estimator::compression_ratio(payload);
            if ratio < self.config.ratio_floor || ratio > self.config.ratio_ceiling {
                return EncodingVerdict::unmeasurable(GateReason::EntropyOutOfBounds);
            }
        }

        EncodingVerdict::measurable()
    }
}

/// Non-printable in the `str.isprintable` sense: control, format, separator
/// (except U+0020), surrogate, private use, unassigned
fn is_non_printable(c: char) -> bool {
    if c == ' ' {
        return false;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}

/// Whether a code point carries an assigned Unicode character name
///
/// ASCII graphic characters and space always do; the lookup table is only
/// consulted for everything else.
fn has_assigned_name(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_graphic() || c == ' ';
    }
    unicode_names2::name(c).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(payload: &[u8]) -> EncodingVerdict {
        EncodingGate::new().classify(payload)
    }

    #[test]
    fn test_normal_ascii_measurable() {
        let verdict = classify(b"Hello, world!");
        assert!(verdict.is_measurable());
        assert_eq!(verdict.reason, GateReason::Ok);
    }

    #[test]
    fn test_normal_utf8_measurable() {
        // "Chinese" in Chinese
        let verdict = classify("\u{4e2d}\u{6587}".as_bytes());
        assert!(verdict.is_measurable());
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let verdict = classify(&[0xFF, 0xFE]);
        assert!(!verdict.is_measurable());
        assert_eq!(verdict.reason, GateReason::Utf8DecodeFailure);
    }

    #[test]
    fn test_empty_payload_measurable() {
        let verdict = classify(b"");
        assert!(verdict.is_measurable());
        assert_eq!(verdict.reason, GateReason::Ok);
    }

    #[test]
    fn test_zero_width_characters_pass() {
        // NFC == NFKC for zero-width joiners, and they all carry names
        let verdict = classify("Hello\u{200B}\u{200C}\u{200D}World".as_bytes());
        assert!(verdict.is_measurable());
    }

    #[test]
    fn test_normalization_ambiguity() {
        // The fi ligature makes NFC != NFKC; the zero-width spaces push the
        // non-printable fraction over the limit
        let payload = "\u{FB01}\u{200B}\u{200B}";
        let verdict = classify(payload.as_bytes());
        assert!(!verdict.is_measurable());
        assert_eq!(verdict.reason, GateReason::NormalizationAmbiguity);
    }

    #[test]
    fn test_ligature_alone_passes() {
        // NFC != NFKC but nothing is non-printable
        let verdict = classify("office \u{FB01}le".as_bytes());
        assert!(verdict.is_measurable());
    }

    #[cfg(feature = "emoji")]
    #[test]
    fn test_emoji_density_exceeded() {
        let payload = "\u{1F525}\u{1F480}\u{1F6AB}\u{26A0}\u{274C}\u{1F6D1}\u{1F512}\u{1F513}";
        let verdict = classify(payload.as_bytes());
        assert!(!verdict.is_measurable());
        assert_eq!(verdict.reason, GateReason::EmojiDensityExceeded);
    }

    #[cfg(feature = "emoji")]
    #[test]
    fn test_diluted_emoji_passes() {
        let verdict = classify("we shipped it \u{1F525} and nothing broke".as_bytes());
        assert!(verdict.is_measurable());
    }

    #[cfg(feature = "emoji")]
    #[test]
    fn test_emoji_capability_flag_disables_check() {
        let gate = EncodingGate::with_config(GateConfig {
            emoji_detection: false,
            ..Default::default()
        });
        let payload = "\u{1F525}\u{1F480}\u{1F6AB}\u{26A0}\u{274C}\u{1F6D1}\u{1F512}\u{1F513}";
        // Emoji all carry names and the payload is short, so nothing else fires
        assert!(gate.classify(payload.as_bytes()).is_measurable());
    }

    #[test]
    fn test_two_unassigned_code_points_pass() {
        // Ten code points, longest unnamed run is two
        let verdict = classify("ab\u{0378}\u{0378}cdefgh".as_bytes());
        assert!(verdict.is_measurable());
    }

    #[test]
    fn test_three_unassigned_code_points_trigger_noise() {
        // Ten code points, unnamed run of three
        let verdict = classify("ab\u{0378}\u{0378}\u{0378}cdefg".as_bytes());
        assert!(!verdict.is_measurable());
        assert_eq!(verdict.reason, GateReason::RandomNoiseSignature);
    }

    #[test]
    fn test_named_code_point_resets_noise_run() {
        // Runs of two, broken by named characters, never reach the limit
        let verdict = classify("\u{0378}\u{0378}a\u{0378}\u{0378}b\u{0378}\u{0378}".as_bytes());
        assert!(verdict.is_measurable());
    }

    #[test]
    fn test_repeated_character_out_of_bounds() {
        let payload = vec![b'a'; 1000];
        let verdict = classify(&payload);
        assert!(!verdict.is_measurable());
        assert_eq!(verdict.reason, GateReason::EntropyOutOfBounds);
    }

    #[test]
    fn test_short_repeated_payload_skips_bounds() {
        // Below the 100-byte floor the ratio check does not apply
        let payload = vec![b'a'; 99];
        assert!(classify(&payload).is_measurable());
    }

    #[test]
    fn test_long_natural_text_within_bounds() {
        let payload = "The quick brown fox jumps over the lazy dog. \
                       Pack my box with five dozen liquor jugs. \
                       Sphinx of black quartz, judge my vow.";
        assert!(payload.len() >= 100);
        assert!(classify(payload.as_bytes()).is_measurable());
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let payloads: [&[u8]; 4] = [
            b"Hello, world!",
            &[0xFF, 0xFE],
            b"",
            "ab\u{0378}\u{0378}\u{0378}cd".as_bytes(),
        ];
        let gate = EncodingGate::new();
        for payload in payloads {
            assert_eq!(gate.classify(payload), gate.classify(payload));
        }
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(GateReason::Ok.as_str(), "OK");
        assert_eq!(GateReason::Utf8DecodeFailure.as_str(), "UTF8_DECODE_FAILURE");
        assert_eq!(
            GateReason::NormalizationAmbiguity.as_str(),
            "NORMALIZATION_AMBIGUITY"
        );
        assert_eq!(
            GateReason::EmojiDensityExceeded.as_str(),
            "EMOJI_DENSITY_EXCEEDED"
        );
        assert_eq!(
            GateReason::RandomNoiseSignature.as_str(),
            "RANDOM_NOISE_SIGNATURE"
        );
        assert_eq!(
            GateReason::EntropyOutOfBounds.as_str(),
            "ENTROPY_OUT_OF_BOUNDS"
        );
    }

    #[test]
    fn test_display_matches_wire_string() {
        assert_eq!(
            GateReason::RandomNoiseSignature.to_string(),
            "RANDOM_NOISE_SIGNATURE"
        );
    }
}
