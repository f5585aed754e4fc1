//! # Task System Core Trait
//!
//! A `Task` is a unit of work handed to the [`TickScheduler`](super::TickScheduler)
//! to run on a later tick.
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TickScheduler::after()` or `TickScheduler::run_interval()`
//! 2. The scheduler keeps it until its due tick is reached
//! 3. `process()` is called from `TickScheduler::tick()`, on the same thread that scheduled it
//! 4. One-shot tasks are dropped afterwards; repeating tasks are rescheduled one period later
//!
//! Tasks own the data they need. Anything shared with the rest of the session,
//! such as the world, is held through a [`StResource`](crate::core::StResource).

/// A unit of work that runs on a future tick.
///
/// Closures implement `Task` directly, so short jobs can be scheduled without a
/// dedicated type:
///
/// ```
/// use mass_break::scheduler::TickScheduler;
///
/// let mut scheduler = TickScheduler::new();
/// scheduler.after(2, || log::info!("two ticks later"));
/// assert_eq!(scheduler.pending(), 1);
/// ```
pub trait Task {
    /// Runs the task.
    ///
    /// Repeating tasks are called once per period, so implementations must leave
    /// themselves in a state where they can run again.
    fn process(&mut self);
}

impl<F: FnMut()> Task for F {
    fn process(&mut self) {
        self()
    }
}
