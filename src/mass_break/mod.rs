//! # Mass Break Module
//!
//! Breaking one block of a connected group breaks the whole group.
//!
//! ## Pipeline
//!
//! * **Validators**: decide whether a break qualifies (game mode, stance)
//! * **Block Scanner**: bounded breadth-first search for connected blocks of the same type
//! * **Batch Processor**: splits the result into fixed-size batches
//! * **Dispatcher**: schedules one task per batch, staggered in ticks
//! * **Block Breaker**: re-validates and destroys each block, dropping it as an item
//!
//! [`MassBreakHandler`] ties the stages together and listens for block breaks.
//! [`MassBreakStats`] accumulates what the batch tasks did.

pub mod batch_processor;
pub mod block_breaker;
pub mod block_scanner;
pub mod dispatcher;
pub mod handler;
pub mod stats;
pub mod tasks;
pub mod validators;

pub use block_breaker::{BatchTally, BreakMethod, BreakOutcome};
pub use handler::{MassBreakHandler, PipelineOutcome};
pub use stats::MassBreakStats;
