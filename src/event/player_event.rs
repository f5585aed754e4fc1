//! # Player Events
//!
//! Events the host raises for players, and the listener trait add-on features
//! implement to react to them. Every listener method has an empty default body;
//! a feature overrides the events it cares about and ignores the rest.

use cgmath::Point3;

use crate::{
    entity::{GameMode, KeystonePlayer},
    scheduler::TickScheduler,
    world::{block::Block, DimensionHandle},
};

/// A player entered the world.
#[derive(Clone, Debug)]
pub struct PlayerSpawnAfterEvent {
    /// Id of the player the event is about.
    pub player_id: String,
    /// `true` on the first spawn after joining, `false` on respawns.
    pub initial_spawn: bool,
}

/// A player left. The wrapper is already gone when this fires.
#[derive(Clone, Debug)]
pub struct PlayerLeaveAfterEvent {
    /// Id of the player the event is about.
    pub player_id: String,
}

/// A player broke a block. The block at `block_location` is already air.
#[derive(Clone, Debug)]
pub struct PlayerBreakBlockAfterEvent {
    /// Id of the player the event is about.
    pub player_id: String,
    /// Where the block was broken.
    pub block_location: Point3<i32>,
    /// Type the block had before it was broken.
    pub broken_block_type: String,
    /// Dimension the block was broken in.
    pub dimension: DimensionHandle,
}

/// A player placed a block.
#[derive(Clone, Debug)]
pub struct PlayerPlaceBlockAfterEvent {
    /// Id of the player the event is about.
    pub player_id: String,
    /// Where the block was placed.
    pub block_location: Point3<i32>,
    /// The placed block.
    pub block: Block,
    /// Dimension the block was placed in.
    pub dimension: DimensionHandle,
}

/// A player's game mode changed.
#[derive(Clone, Debug)]
pub struct PlayerGameModeChangeAfterEvent {
    /// Id of the player the event is about.
    pub player_id: String,
    /// Mode before the change.
    pub from: GameMode,
    /// Mode after the change.
    pub to: GameMode,
}

/// Host services available to listeners while an event is being handled.
pub struct EventContext<'a> {
    /// Schedules work on later ticks.
    pub scheduler: &'a mut TickScheduler,
}

/// Reacts to player events.
///
/// Listeners run on the host's event thread, inside the tick that raised the
/// event. Anything expensive belongs in a task scheduled through the context.
#[allow(unused_variables)]
pub trait PlayerEventListener {
    /// Name used in log lines.
    fn name(&self) -> &str {
        "listener"
    }

    /// Called after a player spawned or respawned.
    fn on_spawn_after(&mut self, event: &PlayerSpawnAfterEvent, player: &KeystonePlayer, ctx: &mut EventContext<'_>) {}

    /// Called after a player left.
    fn on_leave_after(&mut self, event: &PlayerLeaveAfterEvent, ctx: &mut EventContext<'_>) {}

    /// Called after a player broke a block. The block is already air.
    fn on_break_block_after(
        &mut self,
        event: &PlayerBreakBlockAfterEvent,
        player: &KeystonePlayer,
        ctx: &mut EventContext<'_>,
    ) {
    }

    /// Called after a player placed a block.
    fn on_place_block_after(
        &mut self,
        event: &PlayerPlaceBlockAfterEvent,
        player: &KeystonePlayer,
        ctx: &mut EventContext<'_>,
    ) {
    }

    /// Called after a player switched game mode.
    fn on_game_mode_change_after(
        &mut self,
        event: &PlayerGameModeChangeAfterEvent,
        player: &KeystonePlayer,
        ctx: &mut EventContext<'_>,
    ) {
    }
}
