//! # Errors
//!
//! Error types for the add-on and its in-memory host. Per-coordinate destruction
//! failures live next to the executor in
//! [`block_breaker`](crate::mass_break::block_breaker), since they are outcomes
//! rather than errors of the whole operation.

use thiserror::Error;

use crate::world::coordinates::SpatialKey;

/// Failures reported by a [`Dimension`](crate::world::Dimension) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The chunk holding the coordinate is not loaded, so nothing can be read or written.
    #[error("Chunk containing ({0}) is not loaded")]
    ChunkNotLoaded(SpatialKey),
    /// The coordinate is outside the build height.
    #[error("Position ({0}) is outside the world height")]
    OutOfBounds(SpatialKey),
    /// The block type has no item form, so no item stack can be created for it.
    #[error("Cannot create an item stack of {0}")]
    NoItemForm(String),
    /// The command text could not be understood.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    /// The command was understood but its arguments were not.
    #[error("Invalid command syntax: {0}")]
    InvalidCommand(String),
    /// The chunk at these chunk coordinates has no palette index left for a new block type.
    #[error("Block palette of chunk ({0}) is full")]
    PaletteFull(SpatialKey),
}

/// Errors raised by the tick scheduler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Repeating tasks need to wait at least one tick between runs.
    #[error("Repeating task period must be greater than 0")]
    ZeroPeriod,
    /// The due tick of a task does not fit the tick counter.
    #[error("Task delay overflows the tick counter")]
    DelayOverflow,
}

/// Top-level error type of the mass-break pipeline and its session.
#[derive(Debug, Error)]
pub enum MassBreakError {
    /// Batch partitioning was asked for batches of no blocks.
    #[error("Batch size must be greater than 0")]
    InvalidBatchSize,
    /// The configured delay between batches is too long.
    #[error("Batch delay must be at most {max} ticks, got {0}", max = crate::config::MAX_BATCH_DELAY_TICKS)]
    InvalidBatchDelay(u64),
    /// A distance limit of 0 would still reach the direct neighbors of the broken block.
    #[error("Maximum distance must be at least 1")]
    InvalidMaxDistance,
    /// An event referenced a player that never spawned or already left.
    #[error("Player {0} is not registered")]
    PlayerNotRegistered(String),
    /// The host world refused an operation.
    #[error("World error: {0}")]
    World(#[from] WorldError),
    /// The scheduler refused a task.
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for [`MassBreakConfig`](crate::config::MassBreakConfig).
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}
