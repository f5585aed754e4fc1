//! # Mass Break Tasks
//!
//! Tasks the mass-break handler schedules on the tick scheduler.

pub mod break_batch_task;

pub use break_batch_task::BreakBatchTask;
