//! # Chunk Module
//!
//! This module provides the `Chunk` struct, a 16x16x16 cube of blocks stored as
//! palette indices.
//!
//! ## Memory Layout
//!
//! Each chunk keeps a palette of the block types it contains and one `u16` index
//! per block. Index `0` is always air, so an empty chunk is a palette of one entry
//! plus a zeroed index buffer. A hash map from type to index backs the palette.
//!
//! Entries are never removed when their last block is overwritten. Once the
//! palette has used up every `u16` index it is compacted: entries no block refers
//! to are dropped and the blocks are renumbered. A chunk holds far fewer blocks
//! than there are indices, so compaction always frees room.
//!
//! Blocks are stored in row-major order: x, then z, then y.

use std::collections::HashMap;

use cgmath::Point3;
use log::debug;

use super::{
    block::{Block, AIR},
    coordinates::to_key,
};
use crate::error::WorldError;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single horizontal plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Represents a 16x16x16 collection of blocks in the world.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,
    /// Block types present in this chunk. Entry `0` is air.
    palette: Vec<String>,
    /// Reverse of `palette`.
    lookup: HashMap<String, u16>,
    /// One palette index per block.
    blocks: Vec<u16>,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    pub fn empty(position: Point3<i32>) -> Self {
        Chunk {
            position,
            palette: vec![AIR.to_owned()],
            lookup: HashMap::from([(AIR.to_owned(), 0)]),
            blocks: vec![0; CHUNK_SIZE as usize],
        }
    }

    /// Returns the chunk coordinates of the chunk containing a block.
    pub fn chunk_position_of(pos: Point3<i32>) -> Point3<i32> {
        Point3::new(
            pos.x.div_euclid(CHUNK_DIMENSION),
            pos.y.div_euclid(CHUNK_DIMENSION),
            pos.z.div_euclid(CHUNK_DIMENSION),
        )
    }

    fn local_index(pos: Point3<i32>) -> usize {
        let x = pos.x.rem_euclid(CHUNK_DIMENSION);
        let y = pos.y.rem_euclid(CHUNK_DIMENSION);
        let z = pos.z.rem_euclid(CHUNK_DIMENSION);
        (x + CHUNK_DIMENSION * z + CHUNK_PLANE_SIZE * y) as usize
    }

    /// Gets the block at the given world coordinates.
    ///
    /// The coordinates are reduced modulo the chunk size, so callers must make
    /// sure the block actually belongs to this chunk.
    pub fn get_block_at(&self, pos: Point3<i32>) -> Block {
        let index = self.blocks[Self::local_index(pos)];
        Block::new(self.palette[index as usize].as_str())
    }

    /// Replaces the block at the given world coordinates.
    ///
    /// # Errors
    /// `WorldError::PaletteFull` if the block type cannot be given a palette index.
    pub fn set_block_at(&mut self, pos: Point3<i32>, block: &Block) -> Result<(), WorldError> {
        let index = self.palette_index(&block.type_id)?;
        self.blocks[Self::local_index(pos)] = index;
        Ok(())
    }

    /// Counts the blocks of a type in this chunk.
    pub fn count_of(&self, type_id: &str) -> usize {
        match self.lookup.get(type_id) {
            Some(&index) => self.blocks.iter().filter(|&&b| b == index).count(),
            None => 0,
        }
    }

    /// Number of palette entries, unused ones included.
    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }

    /// Returns `true` if every block in the chunk is air.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|&b| b == 0)
    }

    fn palette_index(&mut self, type_id: &str) -> Result<u16, WorldError> {
        if let Some(&index) = self.lookup.get(type_id) {
            return Ok(index);
        }
        if self.palette.len() > usize::from(u16::MAX) {
            self.compact_palette()?;
        }
        self.push_palette_entry(type_id.to_owned())
    }

    fn push_palette_entry(&mut self, type_id: String) -> Result<u16, WorldError> {
        let index = u16::try_from(self.palette.len()).map_err(|_| WorldError::PaletteFull(to_key(self.position)))?;
        self.lookup.insert(type_id.clone(), index);
        self.palette.push(type_id);
        Ok(index)
    }

    /// Drops the palette entries no block refers to and renumbers the blocks.
    /// Air stays at index 0.
    fn compact_palette(&mut self) -> Result<(), WorldError> {
        let mut in_use = vec![false; self.palette.len()];
        in_use[0] = true;
        for &index in &self.blocks {
            in_use[usize::from(index)] = true;
        }

        let old_palette = std::mem::take(&mut self.palette);
        let before = old_palette.len();
        self.lookup.clear();

        let mut remap = vec![0u16; before];
        for (old, type_id) in old_palette.into_iter().enumerate() {
            if in_use[old] {
                remap[old] = self.push_palette_entry(type_id)?;
            }
        }
        for index in &mut self.blocks {
            *index = remap[usize::from(*index)];
        }

        debug!(
            "Compacted palette of chunk ({}) from {} to {} entries",
            to_key(self.position),
            before,
            self.palette.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_coordinates_map_to_the_lower_chunk() {
        assert_eq!(Chunk::chunk_position_of(Point3::new(-1, 0, 15)), Point3::new(-1, 0, 0));
        assert_eq!(Chunk::chunk_position_of(Point3::new(16, -17, 0)), Point3::new(1, -2, 0));
    }

    #[test]
    fn set_and_get_round_through_the_palette() {
        let mut chunk = Chunk::empty(Point3::new(0, 4, 0));
        let pos = Point3::new(3, 70, 9);
        assert!(chunk.get_block_at(pos).is_air());

        chunk.set_block_at(pos, &Block::new("minecraft:oak_log")).unwrap();
        chunk.set_block_at(Point3::new(3, 71, 9), &Block::new("minecraft:oak_log")).unwrap();

        assert_eq!(chunk.get_block_at(pos), Block::new("minecraft:oak_log"));
        assert_eq!(chunk.count_of("minecraft:oak_log"), 2);
        assert!(!chunk.is_empty());

        chunk.set_block_at(pos, &Block::air()).unwrap();
        assert_eq!(chunk.count_of("minecraft:oak_log"), 1);
    }

    #[test]
    fn palette_is_compacted_instead_of_wrapping() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        let churned = Point3::new(1, 1, 1);
        chunk.set_block_at(Point3::new(0, 0, 0), &Block::new("minecraft:oak_log")).unwrap();
        chunk.set_block_at(Point3::new(15, 15, 15), &Block::new("minecraft:stone")).unwrap();

        for n in 0..70_000 {
            chunk.set_block_at(churned, &Block::new(format!("test:type_{}", n))).unwrap();
            assert!(chunk.palette_len() <= usize::from(u16::MAX) + 1);
        }

        assert_eq!(chunk.get_block_at(churned), Block::new("test:type_69999"));
        assert_eq!(chunk.get_block_at(Point3::new(0, 0, 0)), Block::new("minecraft:oak_log"));
        assert_eq!(chunk.get_block_at(Point3::new(15, 15, 15)), Block::new("minecraft:stone"));
        assert!(chunk.get_block_at(Point3::new(2, 2, 2)).is_air());
        assert_eq!(chunk.count_of("minecraft:oak_log"), 1);
        assert_eq!(chunk.count_of("test:type_0"), 0);
        assert_eq!(chunk.count_of(AIR), CHUNK_SIZE as usize - 3);
    }
}
