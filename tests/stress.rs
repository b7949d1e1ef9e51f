//! Stress tests for SEMGATE
//!
//! Run with: cargo test --release stress -- --ignored

use std::time::Instant;

use semgate::{CircuitBreaker, EncodingGate, EntropyEngine};

#[test]
#[ignore] // Run manually with --ignored
fn stress_gate_throughput() {
    // 100KB of valid, fully named ASCII; target is <10ms per 100KB
    let payload = semgate_testdata::printable_noise(3, 100 * 1024).into_bytes();
    let gate = EncodingGate::new();

    let iterations = 50;
    let start = Instant::now();
    for _ in 0..iterations {
        let verdict = gate.classify(&payload);
        assert!(verdict.is_measurable());
    }
    let elapsed = start.elapsed();
    let per_call = elapsed / iterations;

    println!("Classified {} x 100KB in {:?}", iterations, elapsed);
    println!("Per call: {:?}", per_call);

    assert!(
        per_call.as_millis() < 10,
        "Gate should classify 100KB in <10ms, took {:?}",
        per_call
    );
}

#[test]
#[ignore]
fn stress_breaker_pipeline() {
    let breaker = CircuitBreaker::new(EntropyEngine::offline());

    let payloads: Vec<Vec<u8>> = (0..64)
        .map(|i| semgate_testdata::printable_noise(i, 256).into_bytes())
        .collect();

    let iterations = 10_000;
    let start = Instant::now();
    for i in 0..iterations {
        let decision = breaker.evaluate(&payloads[i % payloads.len()]);
        assert!(decision.entropy.is_finite() || decision.blocked);
    }
    let elapsed = start.elapsed();
    let rate = iterations as f64 / elapsed.as_secs_f64();

    println!("Evaluated {} payloads in {:?}", iterations, elapsed);
    println!("Rate: {:.0} evaluations/second", rate);

    assert!(
        rate > 1_000.0,
        "Should evaluate at least 1k payloads/s, got {:.0}",
        rate
    );
}

#[test]
#[ignore]
fn stress_gate_verdicts_stable_across_corpus() {
    let gate = EncodingGate::new();
    let mut corpus = semgate_testdata::measurable_corpus();
    corpus.extend(semgate_testdata::unmeasurable_corpus());

    for (name, payload) in corpus {
        let first = gate.classify(&payload);
        for _ in 0..1000 {
            assert_eq!(gate.classify(&payload), first, "verdict drifted for {}", name);
        }
    }
}
