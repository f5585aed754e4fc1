//! # Block Module
//!
//! Block and item values exchanged with the host world. Block types are
//! namespaced identifiers such as `minecraft:oak_log`; the add-on never needs to
//! know the full set of types, only to compare them.

use std::fmt;

/// Identifier of the empty block.
pub const AIR: &str = "minecraft:air";

/// Represents a single block as read from the world.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// The namespaced type identifier of this block.
    pub type_id: String,
}

impl Block {
    /// Creates a new block of the specified type.
    ///
    /// # Arguments
    /// * `type_id` - The namespaced identifier, e.g. `minecraft:birch_log`
    pub fn new(type_id: impl Into<String>) -> Self {
        Block {
            type_id: type_id.into(),
        }
    }

    /// An air block.
    pub fn air() -> Self {
        Block::new(AIR)
    }

    /// Returns `true` if this block is air.
    pub fn is_air(&self) -> bool {
        self.type_id == AIR
    }

    /// Returns `true` if this block has the given type identifier.
    pub fn is_type(&self, type_id: &str) -> bool {
        self.type_id == type_id
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_id)
    }
}

/// A stack of items, as dropped into the world when a block is broken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    /// Namespaced type of the items.
    pub type_id: String,
    /// Number of items in the stack.
    pub amount: u8,
}

impl ItemStack {
    /// Creates an item stack of `amount` items of the given type.
    pub fn new(type_id: impl Into<String>, amount: u8) -> Self {
        ItemStack {
            type_id: type_id.into(),
            amount,
        }
    }
}

/// Accepts the short form used in commands (`air`, `oak_log`) as well as the
/// namespaced one, and returns the namespaced identifier.
pub fn namespaced(type_id: &str) -> String {
    if type_id.contains(':') {
        type_id.to_owned()
    } else {
        format!("minecraft:{type_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_is_recognised() {
        assert!(Block::air().is_air());
        assert!(!Block::new("minecraft:oak_log").is_air());
    }

    #[test]
    fn short_names_get_the_default_namespace() {
        assert_eq!(namespaced("air"), AIR);
        assert_eq!(namespaced("custom:maple_log"), "custom:maple_log");
    }
}
