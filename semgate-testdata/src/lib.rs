// SEMGATE Testdata - Payload corpus generator
// Copyright (c) 2026 Semgate Contributors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # SEMGATE Testdata
//!
//! Deterministic payload generators for the SEMGATE test suite and
//! benchmarks. Every generator is reproducible: seeded randomness only, no
//! ambient state.
//!
//! ## Quick Start
//!
//! ```rust
//! use semgate_testdata::{ascii_sentence, printable_noise, repeated};
//!
//! // 100KB of natural-looking ASCII text
//! let big = ascii_sentence(100 * 1024);
//! assert!(big.len() >= 100 * 1024);
//!
//! // Seeded noise is reproducible
//! assert_eq!(printable_noise(42, 64), printable_noise(42, 64));
//!
//! // Degenerate payloads
//! let flat = repeated(b'a', 1000);
//! assert_eq!(flat.len(), 1000);
//! ```

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Word pool for natural-looking ASCII text
const WORDS: &[&str] = &[
    "sensor", "reading", "within", "nominal", "range", "the", "payload", "was", "accepted",
    "after", "review", "and", "queued", "for", "downstream", "processing", "without", "delay",
    "metrics", "remained", "stable", "throughout", "observation", "window",
];

/// Natural-looking ASCII text of at least `min_len` bytes
///
/// Deterministic: the same length always produces the same text.
pub fn ascii_sentence(min_len: usize) -> String {
    let mut out = String::with_capacity(min_len + 16);
    let mut i = 0usize;
    while out.len() < min_len {
        if !out.is_empty() {
            out.push(if i % 12 == 0 { '.' } else { ' ' });
            if i % 12 == 0 {
                out.push(' ');
            }
        }
        out.push_str(WORDS[i % WORDS.len()]);
        i += 1;
    }
    out
}

/// Payload of one repeated byte
pub fn repeated(byte: u8, len: usize) -> Vec<u8> {
    vec![byte; len]
}

/// Bytes that are not valid UTF-8
pub fn invalid_utf8() -> Vec<u8> {
    vec![0xFF, 0xFE]
}

/// Seeded random alphanumeric text
///
/// Incompressible relative to natural language, but valid UTF-8 and fully
/// named code points.
pub fn printable_noise(seed: u64, len: usize) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
}

/// Text with a run of `len` unassigned code points between ASCII anchors
pub fn unassigned_run(len: usize) -> String {
    let mut out = String::from("ab");
    for _ in 0..len {
        out.push('\u{0378}');
    }
    out.push_str("cd");
    out
}

/// Text sandwiching zero-width characters between ASCII words
///
/// Low non-printable ratio; expected measurable.
pub fn zero_width_sandwich() -> String {
    "Hello\u{200B}\u{200C}\u{200D}World".to_string()
}

/// Emoji-dense text (above the 30% density limit)
pub fn emoji_burst(len: usize) -> String {
    const EMOJI: &[char] = &[
        '\u{1F525}', '\u{1F480}', '\u{1F6AB}', '\u{274C}', '\u{1F6D1}', '\u{1F512}', '\u{1F513}',
    ];
    (0..len).map(|i| EMOJI[i % EMOJI.len()]).collect()
}

/// Named payloads expected to be measurable
pub fn measurable_corpus() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("ascii_greeting", b"Hello, world!".to_vec()),
        ("ascii_sentence", ascii_sentence(200).into_bytes()),
        ("cjk_text", "\u{4e2d}\u{6587}".as_bytes().to_vec()),
        ("keyboard_mash", b"asdfghjkl qwertyuiop zxcvbnm".to_vec()),
        ("zero_width", zero_width_sandwich().into_bytes()),
        ("printable_noise", printable_noise(7, 200).into_bytes()),
        ("short_repeat", repeated(b'x', 50)),
        ("two_unassigned", unassigned_run(2).into_bytes()),
    ]
}

/// Named payloads expected to be unmeasurable (independent of optional
/// capabilities)
pub fn unmeasurable_corpus() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("invalid_utf8", invalid_utf8()),
        ("flat_repeat", repeated(b'a', 1000)),
        ("three_unassigned", unassigned_run(3).into_bytes()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_sentence_length_and_determinism() {
        let a = ascii_sentence(500);
        let b = ascii_sentence(500);
        assert!(a.len() >= 500);
        assert_eq!(a, b);
        assert!(a.is_ascii());
    }

    #[test]
    fn test_printable_noise_seeded() {
        assert_eq!(printable_noise(1, 100), printable_noise(1, 100));
        assert_ne!(printable_noise(1, 100), printable_noise(2, 100));
        assert!(printable_noise(1, 100).chars().all(|c| c.is_alphanumeric()));
    }

    #[test]
    fn test_unassigned_run_shape() {
        let text = unassigned_run(3);
        assert_eq!(text.chars().filter(|&c| c == '\u{0378}').count(), 3);
        assert!(text.starts_with("ab"));
        assert!(text.ends_with("cd"));
    }

    #[test]
    fn test_invalid_utf8_is_invalid() {
        assert!(std::str::from_utf8(&invalid_utf8()).is_err());
    }

    #[test]
    fn test_emoji_burst_density() {
        let burst = emoji_burst(10);
        assert_eq!(burst.chars().count(), 10);
    }

    #[test]
    fn test_corpora_are_nonempty() {
        assert!(!measurable_corpus().is_empty());
        assert!(!unmeasurable_corpus().is_empty());
    }
}
