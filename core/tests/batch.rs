//! Batch aggregator tests.
//!
//! Tests cover: index sequence, win tallies, boundary counts,
//! progress reporting, and large-N convergence to 2/3 vs 1/3.

mod common;

use common::{init_logging, ScriptedRng};
use montyhall_core::{
    batch::PROGRESS_STEPS, run_batch, run_batch_with_progress, BatchResult, SimError, SimRng,
};

#[test]
fn indices_are_contiguous_from_one() {
    for n in [1u64, 2, 3, 17, 1000] {
        let mut rng = SimRng::new(n);
        let batch = run_batch(n, &mut rng).expect("batch");
        assert_eq!(batch.trials, n);
        assert_eq!(batch.results.len() as u64, n);
        for (expected, t) in (1..).zip(&batch.results) {
            assert_eq!(t.trial, expected, "batch of {n}");
        }
    }
}

#[test]
fn win_counts_match_flags() {
    let mut rng = SimRng::new(0xFEED);
    let batch = run_batch(5_000, &mut rng).expect("batch");

    let switch = batch.results.iter().filter(|t| t.switch_win).count() as u64;
    let stay = batch.results.iter().filter(|t| t.stay_win).count() as u64;
    assert_eq!(batch.switch_wins, switch);
    assert_eq!(batch.stay_wins, stay);
    // One of the two strategies wins every classic trial.
    assert_eq!(switch + stay, batch.trials);
}

#[test]
fn single_trial_batch() {
    let mut rng = ScriptedRng::new(&[2, 0, 0]);
    let batch = run_batch(1, &mut rng).expect("batch of one");

    assert_eq!(batch.trials, 1);
    assert_eq!(batch.results.len(), 1);
    let t = &batch.results[0];
    assert_eq!(t.trial, 1);
    t.validate().expect("well-formed trial");
    assert_eq!(batch.switch_wins, 1);
    assert_eq!(batch.stay_wins, 0);
}

#[test]
fn zero_trials_is_invalid_input() {
    let mut rng = ScriptedRng::new(&[]);
    let err = run_batch(0, &mut rng).unwrap_err();
    assert!(matches!(err, SimError::InvalidInput { trial_count: 0 }), "got {err}");
    assert_eq!(rng.consumed(), 0, "rejected batch must not draw");
}

#[test]
fn progress_is_bounded_and_finishes() {
    init_logging();
    let mut rng = SimRng::new(3);
    let mut calls = Vec::new();
    let batch = run_batch_with_progress(1_005, &mut rng, |done, total| calls.push((done, total)))
        .expect("batch");

    assert_eq!(batch.trials, 1_005);
    assert!(
        calls.len() as u64 <= PROGRESS_STEPS + 1,
        "too many progress callbacks: {}",
        calls.len()
    );
    assert_eq!(calls.last(), Some(&(1_005, 1_005)));
    assert!(calls.windows(2).all(|w| w[0].0 < w[1].0), "progress went backwards");
}

#[test]
fn progress_bound_holds_for_uneven_counts() {
    for n in [11u64, 19, 25, 55, 99, 1_001] {
        let mut rng = SimRng::new(n);
        let mut calls = Vec::new();
        run_batch_with_progress(n, &mut rng, |done, total| calls.push((done, total)))
            .expect("batch");

        assert!(
            calls.len() as u64 <= PROGRESS_STEPS + 1,
            "n={n} gave {} callbacks",
            calls.len()
        );
        assert_eq!(calls.last(), Some(&(n, n)), "n={n} missing final callback");
    }
}

#[test]
fn progress_for_tiny_batch() {
    let mut rng = SimRng::new(4);
    let mut calls = Vec::new();
    run_batch_with_progress(3, &mut rng, |done, total| calls.push((done, total))).expect("batch");
    assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);
}

/// Statistical, not exact: 100k trials land near 2/3 and 1/3.
#[test]
fn large_batch_converges() {
    init_logging();
    let mut rng = SimRng::new(0xDEAD_BEEF_CAFE_1234);
    let batch = run_batch(100_000, &mut rng).expect("batch");

    let switch = batch.switch_rate();
    let stay = batch.stay_rate();
    assert!((0.64..=0.69).contains(&switch), "switch rate {switch:.4}");
    assert!((0.31..=0.36).contains(&stay), "stay rate {stay:.4}");

    let s = batch.summary();
    assert_eq!(s.total_trials, 100_000);
    assert!((s.switch_pct + s.stay_pct - 100.0).abs() < 0.02);
}

#[test]
fn from_trials_recounts_and_checks_order() {
    let mut rng = SimRng::new(11);
    let batch = run_batch(250, &mut rng).expect("batch");

    let rebuilt = BatchResult::from_trials(batch.results.clone()).expect("rebuild");
    assert_eq!(rebuilt, batch);

    let mut shuffled = batch.results.clone();
    shuffled.swap(0, 1);
    let err = BatchResult::from_trials(shuffled).unwrap_err();
    assert!(matches!(err, SimError::InvariantViolation { .. }), "got {err}");
}

#[test]
fn from_trials_rejects_empty_list() {
    let err = BatchResult::from_trials(Vec::new()).unwrap_err();
    assert!(matches!(err, SimError::InvalidInput { trial_count: 0 }), "got {err}");
}

#[test]
fn summary_rounds_to_two_decimals() {
    let mut rng = ScriptedRng::new(&[0, 1, 0, 0, 0, 0, 0, 2, 0]);
    // trial 1: car=1 player=2 -> switch wins
    // trial 2: car=1 player=1 -> stay wins
    // trial 3: car=1 player=3 -> switch wins
    let batch = run_batch(3, &mut rng).expect("batch");
    let s = batch.summary();
    assert_eq!((s.switch_wins, s.stay_wins), (2, 1));
    assert_eq!(s.switch_pct, 66.67);
    assert_eq!(s.stay_pct, 33.33);
}
