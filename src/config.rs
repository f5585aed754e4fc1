//! # Configuration
//!
//! Compile-time defaults of the mass-break feature and the `MassBreakConfig`
//! struct that carries them into the handler.
//!
//! The defaults are what the add-on ships with. The demo binary can override them
//! from a JSON file; any field left out of the file keeps its default:
//!
//! ```json
//! { "max_blocks": 128, "require_sneak": false }
//! ```

use std::{collections::HashSet, fs, path::Path};

use log::info;
use serde::Deserialize;

use crate::error::MassBreakError;

/// Maximum number of blocks a single break may take down, the broken block excluded.
pub const MAX_BLOCKS: usize = 64;
/// Whether the player must be sneaking for a break to spread.
pub const REQUIRE_SNEAK: bool = true;
/// Number of blocks destroyed per scheduled batch.
pub const BATCH_SIZE: usize = 16;
/// Ticks between two consecutive batches.
pub const BATCH_DELAY_TICKS: u64 = 1;
/// Longest accepted delay between two batches, one minute at 20 ticks per second.
pub const MAX_BATCH_DELAY_TICKS: u64 = 1200;

/// Block types whose breaking can spread to connected blocks of the same type.
///
/// Logs, wood, stems and hyphae of every tree species, stripped or not.
pub static ALLOWED_BLOCK_TYPES: phf::Set<&'static str> = phf::phf_set! {
    // logs
    "minecraft:oak_log",
    "minecraft:spruce_log",
    "minecraft:birch_log",
    "minecraft:jungle_log",
    "minecraft:acacia_log",
    "minecraft:dark_oak_log",
    "minecraft:mangrove_log",
    "minecraft:cherry_log",
    "minecraft:crimson_stem",
    "minecraft:warped_stem",
    // wood
    "minecraft:oak_wood",
    "minecraft:spruce_wood",
    "minecraft:birch_wood",
    "minecraft:jungle_wood",
    "minecraft:acacia_wood",
    "minecraft:dark_oak_wood",
    "minecraft:mangrove_wood",
    "minecraft:cherry_wood",
    "minecraft:crimson_hyphae",
    "minecraft:warped_hyphae",
    // stripped logs
    "minecraft:stripped_oak_log",
    "minecraft:stripped_spruce_log",
    "minecraft:stripped_birch_log",
    "minecraft:stripped_jungle_log",
    "minecraft:stripped_acacia_log",
    "minecraft:stripped_dark_oak_log",
    "minecraft:stripped_mangrove_log",
    "minecraft:stripped_cherry_log",
    "minecraft:stripped_crimson_stem",
    "minecraft:stripped_warped_stem",
    // stripped wood
    "minecraft:stripped_oak_wood",
    "minecraft:stripped_spruce_wood",
    "minecraft:stripped_birch_wood",
    "minecraft:stripped_jungle_wood",
    "minecraft:stripped_acacia_wood",
    "minecraft:stripped_dark_oak_wood",
    "minecraft:stripped_mangrove_wood",
    "minecraft:stripped_cherry_wood",
    "minecraft:stripped_crimson_hyphae",
    "minecraft:stripped_warped_hyphae",
};

/// Settings of the mass-break feature.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MassBreakConfig {
    /// Maximum number of blocks found per break.
    pub max_blocks: usize,
    /// Whether the player must be sneaking.
    pub require_sneak: bool,
    /// Blocks per batch; must be greater than 0.
    pub batch_size: usize,
    /// Ticks between batches; at most [`MAX_BATCH_DELAY_TICKS`] when loaded from JSON.
    pub batch_delay_ticks: u64,
    /// Optional per-axis limit on how far from the broken block the scan may reach.
    ///
    /// The limit fences the blocks reached from the six direct neighbors of the
    /// broken block. The neighbors themselves are always examined, so the smallest
    /// meaningful value is 1 and `Some(0)` is rejected when loading.
    pub max_distance: Option<u32>,
    /// Block types that trigger a mass break.
    pub allowed_block_types: HashSet<String>,
}

impl Default for MassBreakConfig {
    fn default() -> Self {
        MassBreakConfig {
            max_blocks: MAX_BLOCKS,
            require_sneak: REQUIRE_SNEAK,
            batch_size: BATCH_SIZE,
            batch_delay_ticks: BATCH_DELAY_TICKS,
            max_distance: None,
            allowed_block_types: ALLOWED_BLOCK_TYPES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl MassBreakConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    /// Malformed JSON, a batch size of 0, a batch delay above
    /// [`MAX_BATCH_DELAY_TICKS`] or a maximum distance of 0.
    pub fn from_json(json: &str) -> Result<Self, MassBreakError> {
        let config: MassBreakConfig = serde_json::from_str(json)?;
        if config.batch_size == 0 {
            return Err(MassBreakError::InvalidBatchSize);
        }
        if config.batch_delay_ticks > MAX_BATCH_DELAY_TICKS {
            return Err(MassBreakError::InvalidBatchDelay(config.batch_delay_ticks));
        }
        if config.max_distance == Some(0) {
            return Err(MassBreakError::InvalidMaxDistance);
        }
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MassBreakError> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        info!("Loaded mass break configuration from {}", path.display());
        Ok(config)
    }

    /// Returns `true` if breaking a block of this type may spread.
    pub fn is_allowed(&self, type_id: &str) -> bool {
        self.allowed_block_types.contains(type_id)
    }

    /// Replaces the allow-list.
    pub fn with_allowed_block_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_block_types = types.into_iter().map(Into::into).collect();
        self
    }
}
