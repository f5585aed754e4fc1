//! # World Module
//!
//! The narrow block interface the mass-break pipeline talks to, and an in-memory
//! world that implements it.
//!
//! ## Architecture
//!
//! * **Dimension**: the trait the scanner and the destruction executor are written
//!   against. It covers block reads and writes, item drops, raw commands and
//!   particles, and nothing else.
//! * **World**: a sparse, chunked implementation used by the session, the demo
//!   binary and the tests.
//! * **Coordinates**: spatial keys and neighborhood helpers.
//! * **Forest**: seeded tree planting for the demo.
//!
//! ## Sharing
//!
//! A world is shared between the event that discovers blocks and the batch tasks
//! that destroy them on later ticks. Both hold a [`DimensionHandle`], a type-erased
//! [`StResource`] pointing at the same world the session owns.

pub mod block;
pub mod chunk;
pub mod coordinates;
pub mod forest;
pub mod voxel_world;

use std::{rc::Rc, sync::RwLock};

use cgmath::Point3;

use crate::{core::StResource, error::WorldError};
use block::{Block, ItemStack};

pub use voxel_world::World;

/// The host world as seen by the mass-break pipeline.
///
/// Every method may fail. Callers decide which failures are fatal: the scanner
/// skips unreadable blocks, the executor classifies failures per block, and
/// particle failures are only logged.
pub trait Dimension {
    /// Reads the block at `pos`.
    ///
    /// # Returns
    /// - `Ok(Some(block))` for a loaded position, air included
    /// - `Ok(None)` when nothing can exist there, e.g. outside the build height
    /// - `Err(_)` when the position cannot be read right now
    fn get_block(&self, pos: Point3<i32>) -> Result<Option<Block>, WorldError>;

    /// Replaces the block at `pos`.
    fn set_block(&mut self, pos: Point3<i32>, block: Block) -> Result<(), WorldError>;

    /// Drops an item stack into the world at `location`.
    fn spawn_item(&mut self, item: ItemStack, location: Point3<f32>) -> Result<(), WorldError>;

    /// Runs a raw host command such as `setblock 1 64 2 air destroy`.
    fn run_command(&mut self, command: &str) -> Result<(), WorldError>;

    /// Spawns a cosmetic particle effect at `location`.
    fn spawn_particle(&mut self, effect: &str, location: Point3<f32>) -> Result<(), WorldError>;
}

/// Shared, type-erased handle to a dimension.
pub type DimensionHandle = StResource<dyn Dimension>;

impl<D: Dimension + 'static> StResource<D> {
    /// Returns a type-erased handle to the same dimension.
    pub fn as_dimension(&self) -> DimensionHandle {
        let shared: Rc<RwLock<dyn Dimension>> = self.resource.clone();
        StResource::from_shared(shared)
    }
}
