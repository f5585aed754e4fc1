//! # Tick Scheduler
//!
//! This module provides a cooperative, single-threaded scheduler counted in host
//! ticks. It is the host's "run this callback after N ticks" facility: the
//! mass-break handler uses it to spread batches of block destruction over
//! consecutive ticks instead of doing all of it in the tick that received the event.
//!
//! ## Architecture Overview
//!
//! - `TickScheduler`: owns the clock and every pending task
//! - `Task`: a unit of work, implemented for any `FnMut()`
//! - `TaskId`: handle returned when scheduling, used for cancellation
//!
//! ## Task Lifecycle
//! 1. Tasks are scheduled with `after()` (once) or `run_interval()` (repeating)
//! 2. Every call to `tick()` runs the tasks due at the current tick, then advances the clock
//! 3. Tasks due on the same tick run in the order they were scheduled
//! 4. Repeating tasks are put back one period later until cancelled
//!
//! ## Ordering Guarantees
//! A task scheduled with a smaller delay always runs on an earlier or the same
//! tick as a task scheduled with a larger delay at the same time. Tasks never
//! run during the call that schedules them, even with a delay of zero.
//!
//! ## Example Usage
//! ```rust
//! use mass_break::scheduler::TickScheduler;
//! use std::{cell::RefCell, rc::Rc};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let mut scheduler = TickScheduler::new();
//!
//! for batch in 0..3u64 {
//!     let log = log.clone();
//!     scheduler.after(batch, move || log.borrow_mut().push(batch));
//! }
//!
//! scheduler.tick();
//! assert_eq!(*log.borrow(), vec![0]);
//! scheduler.run_ticks(2);
//! assert_eq!(*log.borrow(), vec![0, 1, 2]);
//! ```

pub mod task;

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};

use crate::error::SchedulerError;
pub use task::Task;

/// Handle to a scheduled task.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// A pending task and its repetition period.
struct ScheduledTask {
    id: TaskId,
    task: Box<dyn Task>,
    period: Option<u64>,
}

/// Runs tasks after a number of ticks.
///
/// Pending tasks are keyed by `(due tick, sequence number)`. The sequence number
/// grows with every insertion, which keeps same-tick tasks in scheduling order and
/// puts a rescheduled repeating task behind the tasks already waiting on its new tick.
#[derive(Default)]
pub struct TickScheduler {
    current_tick: u64,
    next_sequence: u64,
    next_id: u64,
    queued_tasks: BTreeMap<(u64, u64), ScheduledTask>,
}

impl TickScheduler {
    /// Creates a scheduler whose clock starts at tick 0.
    pub fn new() -> Self {
        TickScheduler::default()
    }

    /// The tick that the next call to `tick()` will process.
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queued_tasks.len()
    }

    /// Returns `true` when no task is waiting.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty()
    }

    /// Delays of all pending tasks relative to the current tick, in run order.
    pub fn due_ticks(&self) -> Vec<u64> {
        self.queued_tasks
            .keys()
            .map(|(due, _)| due - self.current_tick)
            .collect()
    }

    /// The tick a task scheduled `delay` ticks from now would be due on.
    ///
    /// # Errors
    /// `SchedulerError::DelayOverflow` if that tick does not fit the counter.
    pub fn due_tick(&self, delay: u64) -> Result<u64, SchedulerError> {
        self.current_tick
            .checked_add(delay)
            .ok_or(SchedulerError::DelayOverflow)
    }

    /// Schedules `task` to run once, `delay` ticks from now.
    ///
    /// A delay of zero runs the task on the next call to `tick()`. A delay past
    /// the end of the tick counter is clamped to the last tick; use
    /// [`try_after`](Self::try_after) to have it rejected instead.
    ///
    /// # Returns
    /// The id of the scheduled task, usable with `cancel()`.
    pub fn after(&mut self, delay: u64, task: impl Task + 'static) -> TaskId {
        let due = self.current_tick.saturating_add(delay);
        self.schedule_at(due, Box::new(task), None)
    }

    /// Schedules `task` to run once, `delay` ticks from now.
    ///
    /// # Errors
    /// `SchedulerError::DelayOverflow` if the due tick does not fit the counter.
    /// Nothing is scheduled in that case.
    pub fn try_after(&mut self, delay: u64, task: impl Task + 'static) -> Result<TaskId, SchedulerError> {
        let due = self.due_tick(delay)?;
        Ok(self.schedule_at(due, Box::new(task), None))
    }

    /// Schedules `task` to run `delay` ticks from now and then every `period` ticks.
    ///
    /// The id is allocated before anything runs, so it can be cancelled right away,
    /// including before its first run.
    ///
    /// # Errors
    /// `SchedulerError::ZeroPeriod` if `period` is 0, `SchedulerError::DelayOverflow`
    /// if the first run is past the end of the tick counter.
    pub fn run_interval(
        &mut self,
        task: impl Task + 'static,
        period: u64,
        delay: u64,
    ) -> Result<TaskId, SchedulerError> {
        if period == 0 {
            return Err(SchedulerError::ZeroPeriod);
        }
        let due = self.due_tick(delay)?;
        Ok(self.schedule_at(due, Box::new(task), Some(period)))
    }

    /// Cancels a pending task.
    ///
    /// # Returns
    /// `true` if the task was pending and is now removed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let key = self
            .queued_tasks
            .iter()
            .find(|(_, scheduled)| scheduled.id == id)
            .map(|(key, _)| *key);

        match key {
            Some(key) => {
                self.queued_tasks.remove(&key);
                debug!("Cancelled {}", id);
                true
            }
            None => false,
        }
    }

    /// Runs every task due at the current tick, then advances the clock by one.
    ///
    /// # Returns
    /// The number of tasks that ran.
    pub fn tick(&mut self) -> usize {
        let mut processed = 0;

        while let Some(entry) = self.queued_tasks.first_entry() {
            if entry.key().0 > self.current_tick {
                break;
            }
            let mut scheduled = entry.remove();
            trace!("Running {} at tick {}", scheduled.id, self.current_tick);
            scheduled.task.process();
            processed += 1;

            if let Some(period) = scheduled.period {
                self.enqueue(self.current_tick.saturating_add(period), scheduled);
            }
        }

        self.current_tick += 1;
        processed
    }

    /// Calls `tick()` `ticks` times.
    ///
    /// # Returns
    /// The number of tasks that ran.
    pub fn run_ticks(&mut self, ticks: u64) -> usize {
        (0..ticks).map(|_| self.tick()).sum()
    }

    fn schedule_at(&mut self, due: u64, task: Box<dyn Task>, period: Option<u64>) -> TaskId {
        let id = self.allocate_id();
        self.enqueue(due, ScheduledTask { id, task, period });
        id
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    fn enqueue(&mut self, due: u64, scheduled: ScheduledTask) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queued_tasks.insert((due, sequence), scheduled);
    }
}
