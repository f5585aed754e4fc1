//! # Batch Dispatcher

use log::trace;

use crate::{
    error::SchedulerError,
    scheduler::{Task, TaskId, TickScheduler},
};

/// Schedules one task per batch, batch `i` running `i * delay_ticks` ticks from now.
///
/// All batches are scheduled up front; none waits for the previous one to finish.
/// Their relative order comes from the scheduler running smaller delays first.
///
/// # Arguments
/// * `scheduler` - Where the tasks are queued
/// * `batches` - Batches in execution order
/// * `delay_ticks` - Ticks between consecutive batches
/// * `make_task` - Builds the task of a batch from its index and contents
///
/// # Returns
/// Ids of the scheduled tasks, in batch order.
///
/// # Errors
/// `SchedulerError::DelayOverflow` if the last batch would be due past the end of
/// the tick counter. The delays are checked before anything is scheduled, so
/// either every batch is queued or none is.
pub fn dispatch_batches<T, F, K>(
    scheduler: &mut TickScheduler,
    batches: Vec<Vec<T>>,
    delay_ticks: u64,
    mut make_task: F,
) -> Result<Vec<TaskId>, SchedulerError>
where
    F: FnMut(usize, Vec<T>) -> K,
    K: Task + 'static,
{
    let last_delay = batch_delay(batches.len().saturating_sub(1), delay_ticks)?;
    scheduler.due_tick(last_delay)?;

    batches
        .into_iter()
        .enumerate()
        .map(|(index, batch)| {
            let delay = batch_delay(index, delay_ticks)?;
            trace!("Scheduling batch {} ({} blocks) in {} ticks", index, batch.len(), delay);
            scheduler.try_after(delay, make_task(index, batch))
        })
        .collect()
}

fn batch_delay(index: usize, delay_ticks: u64) -> Result<u64, SchedulerError> {
    (index as u64)
        .checked_mul(delay_ticks)
        .ok_or(SchedulerError::DelayOverflow)
}
