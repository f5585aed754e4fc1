//! # Block Breaker
//!
//! Destroys one block, or a batch of blocks, found earlier by the scanner.
//!
//! Batches run ticks after the scan, so the world may have changed in between:
//! another player may have broken or replaced a block, or another mass break may
//! have reached it first. Every block is therefore re-read right before it is
//! destroyed, and skipped when it no longer matches.
//!
//! ## Destroying a block
//! 1. Re-read the block; it must still have the expected type.
//! 2. Drop one item of that type at the drop location.
//! 3. If the item cannot be created, fall back to `setblock <pos> air destroy`,
//!    which lets the host break the block with its own drop rules.
//! 4. Otherwise set the block to air.
//! 5. Either way, outline the former block with particles.
//!
//! Particles are cosmetic: failures are logged and never affect the outcome.

use cgmath::Point3;
use log::{trace, warn};
use thiserror::Error;

use crate::{
    error::WorldError,
    world::{
        block::{Block, ItemStack},
        coordinates::to_key,
        Dimension,
    },
};

/// Particle used to outline destroyed blocks.
pub const BREAK_PARTICLE: &str = "minecraft:destroy_block";

/// How a block was destroyed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BreakMethod {
    /// Item dropped, block set to air.
    Direct,
    /// Item could not be created; the block was destroyed with a command.
    CommandFallback,
}

/// Why a block was not destroyed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BreakFailure {
    /// The block changed since it was scanned, or is gone.
    #[error("Block type mismatch or not found")]
    TypeMismatch,
    /// The block could not be read.
    #[error("Failed to read block: {0}")]
    Read(WorldError),
    /// The block was read but could not be cleared.
    #[error("Failed to clear block: {0}")]
    Write(WorldError),
}

/// Outcome of destroying one block.
pub type BreakOutcome = Result<BreakMethod, BreakFailure>;

/// Counts of a batch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchTally {
    /// Blocks destroyed.
    pub broken: usize,
    /// Blocks skipped or that could not be destroyed.
    pub failed: usize,
}

impl BatchTally {
    /// Blocks the batch attempted.
    pub fn total(&self) -> usize {
        self.broken + self.failed
    }
}

/// The 8 corners and 12 edge midpoints of the unit cube at `pos`.
pub fn block_frame_points(pos: Point3<i32>) -> Vec<Point3<f32>> {
    let (x, y, z) = (pos.x as f32, pos.y as f32, pos.z as f32);
    let mut points = Vec::with_capacity(20);

    for dy in [0.0, 1.0] {
        for dz in [0.0, 1.0] {
            for dx in [0.0, 1.0] {
                points.push(Point3::new(x + dx, y + dy, z + dz));
            }
        }
    }

    for a in [0.0, 1.0] {
        for b in [0.0, 1.0] {
            points.push(Point3::new(x + 0.5, y + a, z + b));
            points.push(Point3::new(x + a, y + 0.5, z + b));
            points.push(Point3::new(x + a, y + b, z + 0.5));
        }
    }

    points
}

/// Outlines the block at `pos` with break particles.
///
/// # Returns
/// The number of particles spawned.
pub fn spawn_block_frame_particles(dimension: &mut dyn Dimension, pos: Point3<i32>) -> usize {
    let mut spawned = 0;
    for point in block_frame_points(pos) {
        match dimension.spawn_particle(BREAK_PARTICLE, point) {
            Ok(()) => spawned += 1,
            Err(err) => warn!("Failed to spawn particle: {}", err),
        }
    }
    spawned
}

/// Destroys one block and drops its item at `drop_location`.
///
/// # Arguments
/// * `dimension` - World the block is in
/// * `pos` - Block to destroy
/// * `expected_type` - Type the block had when it was scanned
/// * `drop_location` - Where the item appears
pub fn break_block(
    dimension: &mut dyn Dimension,
    pos: Point3<i32>,
    expected_type: &str,
    drop_location: Point3<f32>,
) -> BreakOutcome {
    let block = dimension.get_block(pos).map_err(BreakFailure::Read)?;
    if !block.is_some_and(|block| block.is_type(expected_type)) {
        return Err(BreakFailure::TypeMismatch);
    }

    if let Err(err) = dimension.spawn_item(ItemStack::new(expected_type, 1), drop_location) {
        trace!("Item drop for {} failed ({}), using setblock", to_key(pos), err);
        dimension
            .run_command(&format!("setblock {} {} {} air destroy", pos.x, pos.y, pos.z))
            .map_err(BreakFailure::Write)?;
        spawn_block_frame_particles(dimension, pos);
        return Ok(BreakMethod::CommandFallback);
    }

    dimension.set_block(pos, Block::air()).map_err(BreakFailure::Write)?;
    spawn_block_frame_particles(dimension, pos);
    Ok(BreakMethod::Direct)
}

/// Destroys every block of a batch, in order.
///
/// A failing block is logged and counted; it never stops the rest of the batch.
pub fn break_block_batch(
    dimension: &mut dyn Dimension,
    blocks: &[Point3<i32>],
    block_type: &str,
    drop_location: Point3<f32>,
) -> BatchTally {
    let mut tally = BatchTally::default();

    for &pos in blocks {
        match break_block(dimension, pos, block_type, drop_location) {
            Ok(_) => tally.broken += 1,
            Err(err) => {
                tally.failed += 1;
                warn!("Failed to break block at ({}): {}", to_key(pos), err);
            }
        }
    }

    tally
}
