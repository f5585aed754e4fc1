//! # Voxel World Module
//!
//! This module provides the `World` struct, an in-memory [`Dimension`] made of
//! sparse 16³ chunks.
//!
//! Only chunks that have been loaded exist. Reading or writing a block in a chunk
//! that is not loaded fails with [`WorldError::ChunkNotLoaded`], which is how the
//! scanner's read-failure path and the executor's write-failure path are exercised.
//!
//! Side effects that a real host would render (item drops, particles, commands)
//! are recorded so they can be inspected afterwards.

use std::collections::{HashMap, HashSet};

use cgmath::Point3;
use log::{debug, trace};

use super::{
    block::{namespaced, Block, ItemStack},
    chunk::Chunk,
    coordinates::{block_containing, to_key},
    Dimension,
};
use crate::error::WorldError;

/// Lowest buildable Y coordinate.
pub const MIN_Y: i32 = -64;
/// Highest buildable Y coordinate.
pub const MAX_Y: i32 = 319;

/// An item stack lying in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct DroppedItem {
    /// The dropped stack.
    pub item: ItemStack,
    /// Where it lies.
    pub location: Point3<f32>,
}

/// A particle effect that was spawned.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleEffect {
    /// Particle effect id.
    pub effect: String,
    /// Where it was spawned.
    pub location: Point3<f32>,
}

/// Placement mode of the `setblock` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SetBlockMode {
    Replace,
    Destroy,
    Keep,
}

/// Represents a voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use mass_break::world::{Dimension, World};
///
/// let mut world = World::new();
/// world.place_block(Point3::new(0, 64, 0), "minecraft:oak_log").unwrap();
///
/// let block = world.get_block(Point3::new(0, 64, 0)).unwrap().unwrap();
/// assert_eq!(block.type_id, "minecraft:oak_log");
/// ```
#[derive(Debug, Default)]
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    pub chunks: HashMap<Point3<i32>, Chunk>,
    /// Block types that cannot exist as items.
    without_item_form: HashSet<String>,
    dropped_items: Vec<DroppedItem>,
    particles: Vec<ParticleEffect>,
    commands: Vec<String>,
}

impl World {
    /// Creates a new, empty world with no chunks loaded.
    pub fn new() -> Self {
        World::default()
    }

    /// Loads an empty chunk at the given chunk coordinates if none is loaded there.
    pub fn load_chunk_at(&mut self, position: Point3<i32>) {
        self.chunks
            .entry(position)
            .or_insert_with(|| Chunk::empty(position));
    }

    /// Unloads the chunk at the given chunk coordinates, dropping its contents.
    ///
    /// # Returns
    /// The chunk that was unloaded, if there was one.
    pub fn unload_chunk_at(&mut self, position: Point3<i32>) -> Option<Chunk> {
        self.chunks.remove(&position)
    }

    /// Retrieves the chunk at the specified chunk coordinates.
    pub fn get_chunk_at(&self, position: Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Returns `true` if the chunk containing block `pos` is loaded.
    pub fn is_loaded(&self, pos: Point3<i32>) -> bool {
        self.chunks.contains_key(&Chunk::chunk_position_of(pos))
    }

    /// Places a block, loading its chunk first if needed.
    ///
    /// This is the world-building entry point; it never records side effects.
    pub fn place_block(&mut self, pos: Point3<i32>, type_id: &str) -> Result<(), WorldError> {
        Self::check_height(pos)?;
        self.load_chunk_at(Chunk::chunk_position_of(pos));
        self.set_block(pos, Block::new(type_id))
    }

    /// Fills the box spanned by two corners (inclusive) with one block type.
    pub fn fill(&mut self, from: Point3<i32>, to: Point3<i32>, type_id: &str) -> Result<usize, WorldError> {
        let mut placed = 0;
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            for z in from.z.min(to.z)..=from.z.max(to.z) {
                for x in from.x.min(to.x)..=from.x.max(to.x) {
                    self.place_block(Point3::new(x, y, z), type_id)?;
                    placed += 1;
                }
            }
        }
        Ok(placed)
    }

    /// Marks a block type as having no item form; dropping it as an item fails.
    pub fn mark_without_item_form(&mut self, type_id: &str) {
        self.without_item_form.insert(type_id.to_owned());
    }

    /// Counts loaded blocks of a type across every chunk.
    pub fn count_blocks(&self, type_id: &str) -> usize {
        self.chunks.values().map(|chunk| chunk.count_of(type_id)).sum()
    }

    /// Items dropped so far, in drop order.
    pub fn dropped_items(&self) -> &[DroppedItem] {
        &self.dropped_items
    }

    /// Particles spawned so far, in spawn order.
    pub fn particles(&self) -> &[ParticleEffect] {
        &self.particles
    }

    /// Commands that were run, successful or not.
    pub fn executed_commands(&self) -> &[String] {
        &self.commands
    }

    fn check_height(pos: Point3<i32>) -> Result<(), WorldError> {
        if (MIN_Y..=MAX_Y).contains(&pos.y) {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds(to_key(pos)))
        }
    }

    fn loaded_chunk_mut(&mut self, pos: Point3<i32>) -> Result<&mut Chunk, WorldError> {
        self.chunks
            .get_mut(&Chunk::chunk_position_of(pos))
            .ok_or(WorldError::ChunkNotLoaded(to_key(pos)))
    }

    fn set_block_command(&mut self, command: &str) -> Result<(), WorldError> {
        let args: Vec<&str> = command.split_whitespace().skip(1).collect();
        if !(4..=5).contains(&args.len()) {
            return Err(WorldError::InvalidCommand(command.to_owned()));
        }

        let coordinate = |arg: &str| {
            arg.parse::<i32>()
                .map_err(|_| WorldError::InvalidCommand(command.to_owned()))
        };
        let pos = Point3::new(coordinate(args[0])?, coordinate(args[1])?, coordinate(args[2])?);
        let block = Block::new(namespaced(args[3]));
        let mode = match args.get(4).copied() {
            None | Some("replace") => SetBlockMode::Replace,
            Some("destroy") => SetBlockMode::Destroy,
            Some("keep") => SetBlockMode::Keep,
            Some(_) => return Err(WorldError::InvalidCommand(command.to_owned())),
        };

        Self::check_height(pos)?;
        let previous = self.loaded_chunk_mut(pos)?.get_block_at(pos);
        match mode {
            SetBlockMode::Keep if !previous.is_air() => return Ok(()),
            SetBlockMode::Destroy if !previous.is_air() => {
                // Blocks without an item form break without a drop.
                if !self.without_item_form.contains(&previous.type_id) {
                    self.dropped_items.push(DroppedItem {
                        item: ItemStack::new(previous.type_id.as_str(), 1),
                        location: Point3::new(pos.x as f32 + 0.5, pos.y as f32 + 0.5, pos.z as f32 + 0.5),
                    });
                }
            }
            _ => {}
        }

        self.set_block(pos, block)
    }
}

impl Dimension for World {
    fn get_block(&self, pos: Point3<i32>) -> Result<Option<Block>, WorldError> {
        if Self::check_height(pos).is_err() {
            return Ok(None);
        }
        self.chunks
            .get(&Chunk::chunk_position_of(pos))
            .map(|chunk| Some(chunk.get_block_at(pos)))
            .ok_or(WorldError::ChunkNotLoaded(to_key(pos)))
    }

    fn set_block(&mut self, pos: Point3<i32>, block: Block) -> Result<(), WorldError> {
        Self::check_height(pos)?;
        trace!("set {} to {}", to_key(pos), block);
        self.loaded_chunk_mut(pos)?.set_block_at(pos, &block)
    }

    fn spawn_item(&mut self, item: ItemStack, location: Point3<f32>) -> Result<(), WorldError> {
        if self.without_item_form.contains(&item.type_id) {
            return Err(WorldError::NoItemForm(item.type_id));
        }
        let block = block_containing(location);
        if !self.is_loaded(block) {
            return Err(WorldError::ChunkNotLoaded(to_key(block)));
        }
        self.dropped_items.push(DroppedItem { item, location });
        Ok(())
    }

    fn run_command(&mut self, command: &str) -> Result<(), WorldError> {
        debug!("Running command: {}", command);
        self.commands.push(command.to_owned());
        match command.split_whitespace().next() {
            Some("setblock") => self.set_block_command(command),
            _ => Err(WorldError::UnknownCommand(command.to_owned())),
        }
    }

    fn spawn_particle(&mut self, effect: &str, location: Point3<f32>) -> Result<(), WorldError> {
        let block = block_containing(location);
        if !self.is_loaded(block) {
            return Err(WorldError::ChunkNotLoaded(to_key(block)));
        }
        self.particles.push(ParticleEffect {
            effect: effect.to_owned(),
            location,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::block::AIR;

    const OAK: &str = "minecraft:oak_log";

    #[test]
    fn unloaded_chunks_fail_to_read() {
        let world = World::new();
        assert_eq!(
            world.get_block(Point3::new(1, 64, 1)),
            Err(WorldError::ChunkNotLoaded(to_key(Point3::new(1, 64, 1))))
        );
    }

    #[test]
    fn outside_build_height_reads_as_absent() {
        let mut world = World::new();
        world.load_chunk_at(Point3::new(0, 20, 0));
        assert_eq!(world.get_block(Point3::new(0, MAX_Y + 1, 0)), Ok(None));
        assert!(world.place_block(Point3::new(0, MIN_Y - 1, 0), OAK).is_err());
    }

    #[test]
    fn fill_places_every_block_in_the_box() {
        let mut world = World::new();
        let placed = world.fill(Point3::new(0, 64, 0), Point3::new(2, 65, -1), OAK).unwrap();
        assert_eq!(placed, 12);
        assert_eq!(world.count_blocks(OAK), 12);
    }

    #[test]
    fn setblock_destroy_drops_the_old_block() {
        let mut world = World::new();
        world.place_block(Point3::new(4, 70, 4), OAK).unwrap();

        world.run_command("setblock 4 70 4 air destroy").unwrap();

        assert_eq!(world.get_block(Point3::new(4, 70, 4)).unwrap(), Some(Block::new(AIR)));
        assert_eq!(world.dropped_items().len(), 1);
        assert_eq!(world.dropped_items()[0].item, ItemStack::new(OAK, 1));
    }

    #[test]
    fn setblock_keep_leaves_existing_blocks() {
        let mut world = World::new();
        world.place_block(Point3::new(4, 70, 4), OAK).unwrap();

        world.run_command("setblock 4 70 4 stone keep").unwrap();

        assert_eq!(world.get_block(Point3::new(4, 70, 4)).unwrap(), Some(Block::new(OAK)));
    }

    #[test]
    fn malformed_commands_are_rejected() {
        let mut world = World::new();
        world.load_chunk_at(Point3::new(0, 4, 0));
        assert!(matches!(world.run_command("kill @e"), Err(WorldError::UnknownCommand(_))));
        assert!(matches!(world.run_command("setblock 1 a 2 air"), Err(WorldError::InvalidCommand(_))));
        assert!(matches!(world.run_command("setblock 1 64 2 air shatter"), Err(WorldError::InvalidCommand(_))));
        assert_eq!(world.executed_commands().len(), 3);
    }

    #[test]
    fn items_without_form_cannot_be_spawned() {
        let mut world = World::new();
        world.load_chunk_at(Point3::new(0, 4, 0));
        world.mark_without_item_form("minecraft:fire");

        let result = world.spawn_item(ItemStack::new("minecraft:fire", 1), Point3::new(1.0, 65.0, 1.0));
        assert_eq!(result, Err(WorldError::NoItemForm("minecraft:fire".to_owned())));
        assert!(world.dropped_items().is_empty());
    }
}
