//! # Mass Break Statistics

use super::block_breaker::BatchTally;

/// Running totals of the mass breaks handled in a session.
///
/// Shared between the handler, which counts operations, and the batch tasks,
/// which record their tallies when they run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MassBreakStats {
    /// Breaks that dispatched at least one batch.
    pub operations: usize,
    /// Blocks destroyed across all batches.
    pub broken: usize,
    /// Blocks that could not be destroyed across all batches.
    pub failed: usize,
    /// Tally of every batch that ran, in run order.
    pub batches: Vec<BatchTally>,
}

impl MassBreakStats {
    /// Adds the tally of a batch that ran.
    pub fn record_batch(&mut self, tally: BatchTally) {
        self.broken += tally.broken;
        self.failed += tally.failed;
        self.batches.push(tally);
    }
}
