//! Two-bit saturating branch predictor with a small branch-target buffer.
//!
//! Each branch hashes into a 256-entry table of two-bit counters by its word
//! address. Counters start weakly-not-taken and move one step per outcome,
//! so a single misprediction in a loop of taken branches does not flip the
//! prediction. The 64-entry direct-mapped BTB caches the target of the most
//! recent taken branch per slot.

use crate::common::constants::{BTB_SIZE, PREDICTOR_TABLE_SIZE};

/// State of one two-bit saturating counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CounterState {
    /// Confidently not taken.
    StrongNotTaken,
    /// Leaning not taken; the initial state.
    #[default]
    WeakNotTaken,
    /// Leaning taken.
    WeakTaken,
    /// Confidently taken.
    StrongTaken,
}

impl CounterState {
    const fn predicts_taken(self) -> bool {
        matches!(self, Self::WeakTaken | Self::StrongTaken)
    }

    const fn train(self, taken: bool) -> Self {
        match (self, taken) {
            (Self::StrongNotTaken, true) | (Self::WeakTaken, false) => Self::WeakNotTaken,
            (Self::WeakNotTaken, true) | (Self::StrongTaken, false) => Self::WeakTaken,
            (Self::WeakTaken | Self::StrongTaken, true) => Self::StrongTaken,
            (Self::StrongNotTaken | Self::WeakNotTaken, false) => Self::StrongNotTaken,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct BtbEntry {
    valid: bool,
    pc: u32,
    target: u32,
}

/// Prediction accuracy counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictorStats {
    /// Branches the predictor has been trained on.
    pub total_branches: u64,
    /// Branches whose predicted direction matched the outcome.
    pub correct_predictions: u64,
    /// Target-buffer lookups that found a matching entry.
    pub btb_hits: u64,
    /// Target-buffer lookups that missed.
    pub btb_misses: u64,
}

impl PredictorStats {
    /// Fraction of correctly predicted branches, in percent.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total_branches == 0 {
            0.0
        } else {
            self.correct_predictions as f64 / self.total_branches as f64 * 100.0
        }
    }
}

/// Dynamic branch predictor: direction table plus target buffer.
#[derive(Debug, Clone)]
pub struct BranchPredictor {
    table: Vec<CounterState>,
    btb: Vec<BtbEntry>,
    stats: PredictorStats,
}

impl Default for BranchPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchPredictor {
    /// Creates a predictor with every counter weakly-not-taken and an
    /// empty target buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: vec![CounterState::default(); PREDICTOR_TABLE_SIZE],
            btb: vec![BtbEntry::default(); BTB_SIZE],
            stats: PredictorStats::default(),
        }
    }

    const fn table_index(pc: u32) -> usize {
        (pc >> 2) as usize % PREDICTOR_TABLE_SIZE
    }

    const fn btb_index(pc: u32) -> usize {
        (pc >> 2) as usize % BTB_SIZE
    }

    /// Predicted direction for the branch at `pc`. Read-only.
    #[must_use]
    pub fn predict(&self, pc: u32) -> bool {
        self.table[Self::table_index(pc)].predicts_taken()
    }

    /// Looks up the cached target for the branch at `pc`, counting the
    /// lookup as a BTB hit or miss.
    pub fn target(&mut self, pc: u32) -> Option<u32> {
        let entry = self.btb[Self::btb_index(pc)];
        if entry.valid && entry.pc == pc {
            self.stats.btb_hits += 1;
            Some(entry.target)
        } else {
            self.stats.btb_misses += 1;
            None
        }
    }

    /// Trains the predictor with a resolved branch.
    ///
    /// The prediction is scored against the outcome before the counter
    /// moves, then the counter saturates one step toward the outcome. A
    /// taken branch also installs its target in the BTB.
    pub fn update(&mut self, pc: u32, taken: bool, target: u32) {
        let index = Self::table_index(pc);
        let predicted = self.table[index].predicts_taken();

        self.stats.total_branches += 1;
        if predicted == taken {
            self.stats.correct_predictions += 1;
        }

        self.table[index] = self.table[index].train(taken);

        if taken {
            self.btb[Self::btb_index(pc)] = BtbEntry {
                valid: true,
                pc,
                target,
            };
        }
    }

    /// Accuracy and BTB counters.
    #[must_use]
    pub const fn stats(&self) -> &PredictorStats {
        &self.stats
    }

    /// Clears all counters, the direction table and the target buffer.
    pub fn reset(&mut self) {
        self.table.fill(CounterState::default());
        self.btb.fill(BtbEntry::default());
        self.stats = PredictorStats::default();
    }
}
