//! # Branch Predictor Tests
//!
//! Saturation properties of the two-bit counters and the accounting the
//! pipeline performs when branches resolve.

use archlab_core::config::PipelineConfig;
use archlab_core::pipeline::BranchPredictor;
use archlab_core::Pipeline;
use proptest::prelude::*;

use crate::common::asm;

#[test]
fn three_taken_updates_flip_any_start_state() {
    // Drive the counter to its strongest not-taken state first.
    let mut predictor = BranchPredictor::new();
    for _ in 0..4 {
        predictor.update(0x40, false, 0);
    }
    for _ in 0..3 {
        predictor.update(0x40, true, 0x80);
    }
    assert!(predictor.predict(0x40));
}

proptest! {
    /// After three or more consecutive taken outcomes the prediction is
    /// taken, whatever history preceded them.
    #[test]
    fn saturation_dominates_history(
        history in prop::collection::vec(any::<bool>(), 0..16),
        extra in 0usize..4,
    ) {
        let mut predictor = BranchPredictor::new();
        for taken in history {
            predictor.update(0x40, taken, 0x80);
        }
        for _ in 0..3 + extra {
            predictor.update(0x40, true, 0x80);
        }
        prop_assert!(predictor.predict(0x40));
    }

    /// Accuracy counters balance: correct predictions never exceed total
    /// branches, and totals match the number of updates.
    #[test]
    fn counters_balance(outcomes in prop::collection::vec(any::<bool>(), 1..32)) {
        let mut predictor = BranchPredictor::new();
        for &taken in &outcomes {
            predictor.update(0x10, taken, 0x40);
        }
        let stats = predictor.stats();
        prop_assert_eq!(stats.total_branches, outcomes.len() as u64);
        prop_assert!(stats.correct_predictions <= stats.total_branches);
    }
}

#[test]
fn resolved_branches_train_the_pipeline_predictor() {
    let mut pipeline = Pipeline::new(PipelineConfig::default());
    // beq r0, r0 is always equal, so the outcome is taken.
    pipeline
        .load_program(&[asm::addi(1, 0, 1), asm::beq(0, 0, 4)])
        .unwrap();
    pipeline.run(0).unwrap();

    let stats = pipeline.predictor_stats();
    assert_eq!(stats.total_branches, 1);
    // The fresh counter predicted not-taken, so the first branch missed.
    assert_eq!(stats.correct_predictions, 0);
}

#[test]
fn reset_clears_training() {
    let mut predictor = BranchPredictor::new();
    for _ in 0..4 {
        predictor.update(0x40, true, 0x80);
    }
    predictor.reset();
    assert!(!predictor.predict(0x40));
    assert_eq!(predictor.stats().total_branches, 0);
}
