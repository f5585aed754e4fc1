//! # Mass Break Handler
//!
//! The event entry point. On every block break it walks the pipeline:
//!
//! ```text
//! Idle -> Validating -> Scanning -> Dispatching -> Idle
//!             |             |
//!             +-> Idle      +-> Idle (nothing connected)
//! ```
//!
//! Validation checks the player's game mode and stance and the broken block's
//! type. Scanning runs synchronously inside the event. Dispatching hands one task
//! per batch to the scheduler and returns without waiting for them.
//!
//! Nothing escapes the handler: errors are logged, and so are panics.

use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, info, trace};

use super::{
    batch_processor::{calculate_drop_location, create_batches, DROP_Y_OFFSET},
    block_scanner::scan_connected_blocks,
    dispatcher::dispatch_batches,
    stats::MassBreakStats,
    tasks::BreakBatchTask,
    validators::should_process_mass_break,
};
use crate::{
    config::MassBreakConfig,
    core::StResource,
    entity::KeystonePlayer,
    error::MassBreakError,
    event::{EventContext, PlayerBreakBlockAfterEvent, PlayerEventListener},
    scheduler::TickScheduler,
    world::coordinates::to_key,
};

/// Where a block break ended up in the pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The player or the block type does not qualify.
    Rejected,
    /// No connected block of the same type was found.
    NothingConnected,
    /// Batches were scheduled.
    Dispatched {
        /// Connected blocks found, the broken block excluded.
        blocks: usize,
        /// Tasks handed to the scheduler.
        batches: usize,
    },
}

/// Spreads qualifying block breaks to the connected blocks of the same type.
pub struct MassBreakHandler {
    config: MassBreakConfig,
    stats: StResource<MassBreakStats>,
}

impl MassBreakHandler {
    /// Creates a handler with empty statistics.
    pub fn new(config: MassBreakConfig) -> Self {
        MassBreakHandler {
            config,
            stats: StResource::new(MassBreakStats::default()),
        }
    }

    /// The configuration the handler runs with.
    pub fn config(&self) -> &MassBreakConfig {
        &self.config
    }

    /// Handle to the statistics, updated as batches run.
    pub fn stats(&self) -> StResource<MassBreakStats> {
        self.stats.clone()
    }

    /// Runs the pipeline for one block break.
    ///
    /// # Errors
    /// Only configuration mistakes surface here, such as a batch size of 0 or a
    /// batch delay that runs past the end of the tick counter. Nothing is
    /// scheduled when an error is returned. World failures are handled per block.
    pub fn handle(
        &self,
        event: &PlayerBreakBlockAfterEvent,
        player: &KeystonePlayer,
        scheduler: &mut TickScheduler,
    ) -> Result<PipelineOutcome, MassBreakError> {
        let (game_mode, is_sneaking) = (player.game_mode(), player.is_sneaking());
        trace!("Break by {}: sneaking={} mode={}", player.name(), is_sneaking, game_mode);

        if !should_process_mass_break(game_mode, is_sneaking, self.config.require_sneak) {
            return Ok(PipelineOutcome::Rejected);
        }
        if !self.config.is_allowed(&event.broken_block_type) {
            trace!("{} is not eligible for mass break", event.broken_block_type);
            return Ok(PipelineOutcome::Rejected);
        }

        let blocks = {
            let dimension = event.dimension.get();
            scan_connected_blocks(
                event.block_location,
                &event.broken_block_type,
                &*dimension,
                self.config.max_blocks,
                self.config.max_distance,
            )
        };
        if blocks.is_empty() {
            return Ok(PipelineOutcome::NothingConnected);
        }

        let drop_location = calculate_drop_location(player.location(), DROP_Y_OFFSET);
        let batches = create_batches(&blocks, self.config.batch_size)?;
        let batch_count = batches.len();

        dispatch_batches(scheduler, batches, self.config.batch_delay_ticks, |index, batch| {
            BreakBatchTask::new(
                event.dimension.clone(),
                batch,
                event.broken_block_type.clone(),
                drop_location,
                index,
                self.stats.clone(),
            )
        })?;
        self.stats.get_mut().operations += 1;

        info!(
            "{} started a mass break of {} {} at ({}) in {} batches",
            player.name(),
            blocks.len(),
            event.broken_block_type,
            to_key(event.block_location),
            batch_count
        );
        Ok(PipelineOutcome::Dispatched {
            blocks: blocks.len(),
            batches: batch_count,
        })
    }
}

impl PlayerEventListener for MassBreakHandler {
    fn name(&self) -> &str {
        "mass_break"
    }

    fn on_break_block_after(
        &mut self,
        event: &PlayerBreakBlockAfterEvent,
        player: &KeystonePlayer,
        ctx: &mut EventContext<'_>,
    ) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.handle(event, player, ctx.scheduler)));

        match result {
            Ok(Ok(outcome)) => debug!("Mass break at ({}): {:?}", to_key(event.block_location), outcome),
            Ok(Err(err)) => error!("Unexpected error in mass break handler: {}", err),
            Err(_) => error!("Mass break handler panicked at ({})", to_key(event.block_location)),
        }
    }
}
