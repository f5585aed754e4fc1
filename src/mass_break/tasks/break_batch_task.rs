//! # Break Batch Task
//!
//! This module defines the `BreakBatchTask`, which destroys one batch of a mass
//! break on the tick it is scheduled for.

use cgmath::Point3;
use log::debug;

use crate::{
    core::StResource,
    mass_break::{block_breaker::break_block_batch, stats::MassBreakStats},
    scheduler::Task,
    world::DimensionHandle,
};

/// A task that destroys one batch of blocks.
///
/// The task owns its coordinates and shares the world and the statistics with
/// the session. It runs once; processing it again does nothing.
pub struct BreakBatchTask {
    /// The world the blocks are in
    dimension: DimensionHandle,
    /// Blocks to destroy, in scan order
    blocks: Vec<Point3<i32>>,
    /// Type the blocks had when they were scanned
    block_type: String,
    /// Where the items drop
    drop_location: Point3<f32>,
    /// Position of this batch within its mass break
    batch_index: usize,
    stats: StResource<MassBreakStats>,
}

impl BreakBatchTask {
    /// Creates a new batch task.
    ///
    /// # Arguments
    /// * `dimension` - Shared handle to the world
    /// * `blocks` - Coordinates of this batch
    /// * `block_type` - Expected block type
    /// * `drop_location` - Item drop point
    /// * `batch_index` - Index of the batch, for logging
    /// * `stats` - Where the batch tally is recorded
    pub fn new(
        dimension: DimensionHandle,
        blocks: Vec<Point3<i32>>,
        block_type: String,
        drop_location: Point3<f32>,
        batch_index: usize,
        stats: StResource<MassBreakStats>,
    ) -> Self {
        BreakBatchTask {
            dimension,
            blocks,
            block_type,
            drop_location,
            batch_index,
            stats,
        }
    }

    /// Number of blocks still to destroy.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` once the batch ran or if it had no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Task for BreakBatchTask {
    /// Destroys the batch and records its tally.
    fn process(&mut self) {
        let blocks = std::mem::take(&mut self.blocks);
        if blocks.is_empty() {
            return;
        }

        let tally = {
            let mut dimension = self.dimension.get_mut();
            break_block_batch(&mut *dimension, &blocks, &self.block_type, self.drop_location)
        };

        debug!(
            "Batch {} of {}: {} broken, {} failed",
            self.batch_index, self.block_type, tally.broken, tally.failed
        );
        self.stats.get_mut().record_batch(tally);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mass_break::block_breaker::BatchTally,
        world::{Dimension, World},
    };

    #[test]
    fn runs_once_and_records_its_tally() {
        let world = StResource::new(World::new());
        let blocks: Vec<Point3<i32>> = (65..68).map(|y| Point3::new(1, y, 1)).collect();
        for &pos in &blocks {
            world.get_mut().place_block(pos, "minecraft:oak_log").unwrap();
        }
        let stats = StResource::new(MassBreakStats::default());

        let mut task = BreakBatchTask::new(
            world.as_dimension(),
            blocks.clone(),
            "minecraft:oak_log".to_owned(),
            Point3::new(1.5, 64.5, 1.5),
            0,
            stats.clone(),
        );
        assert_eq!(task.len(), 3);

        task.process();
        task.process();

        assert!(task.is_empty());
        assert_eq!(stats.get().batches, vec![BatchTally { broken: 3, failed: 0 }]);
        assert!(world.get().get_block(blocks[0]).unwrap().unwrap().is_air());
    }
}
