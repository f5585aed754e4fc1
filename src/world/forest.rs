//! # Forest Generation
//!
//! Plants seeded, randomized trees into a [`World`] for the demo and for tests
//! that want something bigger than a hand-placed trunk.
//!
//! Each tree is a straight trunk of one log type with a leaf crown around its top.
//! Trees are placed on a grid so their trunks never touch, which keeps one mass
//! break from spreading into the next tree.

use cgmath::Point3;
use log::debug;

use super::{block::AIR, World};
use crate::error::WorldError;

/// Block the ground layer is made of.
pub const GROUND: &str = "minecraft:grass";
/// Block tree crowns are made of.
pub const LEAVES: &str = "minecraft:oak_leaves";

/// Log types trees are made of.
pub const TRUNK_TYPES: [&str; 4] = [
    "minecraft:oak_log",
    "minecraft:birch_log",
    "minecraft:spruce_log",
    "minecraft:jungle_log",
];

const MIN_TRUNK_HEIGHT: i32 = 4;
const MAX_TRUNK_HEIGHT: i32 = 9;
/// Distance between two tree slots; larger than a crown is wide.
const TREE_SPACING: i32 = 6;

/// A planted tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    /// The lowest log, the one a player breaks.
    pub base: Point3<i32>,
    /// Log type of the trunk.
    pub trunk_type: &'static str,
    /// Number of logs in the trunk.
    pub height: i32,
}

/// Plants trees with a seeded random number generator.
pub struct ForestGenerator {
    rng: fastrand::Rng,
}

impl ForestGenerator {
    /// Creates a generator. The same seed always plants the same forest.
    pub fn new(seed: u64) -> Self {
        ForestGenerator {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Lays a ground layer and plants up to `count` trees on it.
    ///
    /// # Arguments
    /// * `world` - The world to plant into
    /// * `ground` - Corner of the ground layer with the smallest x and z
    /// * `size` - Width of the square ground layer
    /// * `count` - Maximum number of trees; fewer are planted if they do not fit
    ///
    /// # Returns
    /// The planted trees.
    pub fn plant(
        &mut self,
        world: &mut World,
        ground: Point3<i32>,
        size: i32,
        count: usize,
    ) -> Result<Vec<Tree>, WorldError> {
        world.fill(ground, Point3::new(ground.x + size - 1, ground.y, ground.z + size - 1), GROUND)?;
        world.fill(
            Point3::new(ground.x, ground.y + 1, ground.z),
            Point3::new(ground.x + size - 1, ground.y + MAX_TRUNK_HEIGHT + 2, ground.z + size - 1),
            AIR,
        )?;

        let slots_per_row = (size - 2) / TREE_SPACING;
        let mut slots: Vec<(i32, i32)> = (0..slots_per_row)
            .flat_map(|row| (0..slots_per_row).map(move |column| (row, column)))
            .collect();
        self.rng.shuffle(&mut slots);

        let mut trees = Vec::new();
        for (row, column) in slots.into_iter().take(count) {
            let base = Point3::new(
                ground.x + 2 + column * TREE_SPACING + self.rng.i32(0..2),
                ground.y + 1,
                ground.z + 2 + row * TREE_SPACING + self.rng.i32(0..2),
            );
            let tree = Tree {
                base,
                trunk_type: TRUNK_TYPES[self.rng.usize(..TRUNK_TYPES.len())],
                height: self.rng.i32(MIN_TRUNK_HEIGHT..=MAX_TRUNK_HEIGHT),
            };
            Self::grow(world, &tree)?;
            trees.push(tree);
        }

        debug!("Planted {} trees", trees.len());
        Ok(trees)
    }

    fn grow(world: &mut World, tree: &Tree) -> Result<(), WorldError> {
        let top = tree.base.y + tree.height - 1;
        for dx in -1..=1 {
            for dz in -1..=1 {
                for y in top - 1..=top + 1 {
                    world.place_block(Point3::new(tree.base.x + dx, y, tree.base.z + dz), LEAVES)?;
                }
            }
        }
        for y in tree.base.y..=top {
            world.place_block(Point3::new(tree.base.x, y, tree.base.z), tree.trunk_type)?;
        }
        Ok(())
    }
}
