//! # Entity Module
//!
//! Players as the host exposes them, the add-on's wrapper around them and the
//! registry that tracks wrappers for the players currently online.

pub mod player;
pub mod registry;

pub use player::{GameMode, KeystonePlayer, Player};
pub use registry::PlayerRegistry;
