#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Mass Break
//!
//! Breaks a whole connected group of blocks when a player breaks one of them:
//! a sneaking survival player chops one log and the rest of the tree follows.
//!
//! The work is split in two. The block-break event scans for connected blocks of
//! the same type synchronously. The destruction itself is spread over several
//! game ticks in fixed-size batches, so no single tick does too much.
//!
//! ## Key Modules
//!
//! * `mass_break` - The pipeline: validation, scanning, batching, dispatch and destruction
//! * `world` - The `Dimension` trait the pipeline works against and an in-memory world
//! * `scheduler` - Tick-driven task scheduling
//! * `event` / `entity` - Player events, listeners and the player registry
//! * `session` - A host stand-in tying world, players, events and ticks together
//! * `config` - Tunables and the allow-list of block types
//! * `core` - Shared-ownership primitives
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use mass_break::{config::MassBreakConfig, session::Session, world::World};
//!
//! let mut world = World::new();
//! for y in 64..70 {
//!     world.place_block(Point3::new(0, y, 0), "minecraft:oak_log").unwrap();
//! }
//!
//! let mut session = Session::new(world, MassBreakConfig::default());
//! session.spawn_player("p1", "Alex", Point3::new(1.5, 64.0, 0.5)).unwrap();
//! session.set_sneaking("p1", true).unwrap();
//! session.break_block("p1", Point3::new(0, 64, 0)).unwrap();
//! session.run_until_idle(20);
//!
//! assert_eq!(session.world().get().count_blocks("minecraft:oak_log"), 0);
//! ```

use log::info;

pub mod config;
pub mod core;
pub mod entity;
pub mod error;
pub mod event;
pub mod mass_break;
pub mod scheduler;
pub mod session;
pub mod world;

/// Initializes logging to stdout, filtered by `RUST_LOG`.
///
/// Calling it again after a logger is installed has no effect.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    if log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok()
    {
        info!("Logger initialized");
    }
}
