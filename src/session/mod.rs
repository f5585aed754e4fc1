//! # Session
//!
//! Plays the part of the game host around one world.
//!
//! A session owns the world, the tick scheduler, the player registry and the
//! event listeners. Player actions go through it: it applies the action to the
//! world the way the host would and then raises the matching after-event. The
//! mass-break handler is registered when the session is created.
//!
//! ```text
//! action -> world change -> event -> listeners -> scheduled tasks -> tick()
//! ```

use cgmath::Point3;
use log::{debug, info, trace};

use crate::{
    config::MassBreakConfig,
    core::StResource,
    entity::{GameMode, Player, PlayerRegistry},
    error::MassBreakError,
    event::{
        EventContext, EventManager, PlayerBreakBlockAfterEvent, PlayerEventListener, PlayerGameModeChangeAfterEvent,
        PlayerLeaveAfterEvent, PlayerPlaceBlockAfterEvent, PlayerSpawnAfterEvent,
    },
    mass_break::{MassBreakHandler, MassBreakStats},
    scheduler::TickScheduler,
    world::{block::Block, coordinates::to_key, Dimension, World},
};

/// A game host around one world, with the mass-break handler installed.
///
/// Actions are applied synchronously. Scheduled work only runs from
/// [`tick`](Self::tick) and [`run_until_idle`](Self::run_until_idle).
pub struct Session {
    world: StResource<World>,
    scheduler: TickScheduler,
    registry: PlayerRegistry,
    events: EventManager,
    stats: StResource<MassBreakStats>,
}

impl Session {
    /// Starts a session on `world` with the mass-break handler registered.
    pub fn new(world: World, config: MassBreakConfig) -> Self {
        let handler = MassBreakHandler::new(config);
        let stats = handler.stats();

        let mut events = EventManager::new();
        events.register(handler);

        Session {
            world: StResource::new(world),
            scheduler: TickScheduler::new(),
            registry: PlayerRegistry::new(),
            events,
            stats,
        }
    }

    /// Registers an additional listener after the mass-break handler.
    pub fn register_listener(&mut self, listener: impl PlayerEventListener + 'static) {
        self.events.register(listener);
    }

    /// The world the session plays in.
    pub fn world(&self) -> &StResource<World> {
        &self.world
    }

    /// The tick scheduler.
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Mutable access to the tick scheduler, for scheduling work of your own.
    pub fn scheduler_mut(&mut self) -> &mut TickScheduler {
        &mut self.scheduler
    }

    /// Players currently online.
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Snapshot of the mass-break statistics.
    pub fn stats(&self) -> MassBreakStats {
        self.stats.get().clone()
    }

    /// Spawns a player, or respawns one already online.
    ///
    /// # Returns
    /// `true` on the player's initial spawn.
    pub fn spawn_player(&mut self, id: &str, name: &str, location: Point3<f32>) -> Result<bool, MassBreakError> {
        let initial_spawn = self.registry.get(id).is_err();
        if initial_spawn {
            self.registry.get_or_create(&StResource::new(Player::new(id, name, location)));
        }
        let player = self.registry.get_mut(id)?;
        player.set_location(location);
        player.set_last_location(location);
        info!("{} {} at {:?}", name, if initial_spawn { "joined" } else { "respawned" }, location);

        let event = PlayerSpawnAfterEvent {
            player_id: id.to_owned(),
            initial_spawn,
        };
        let mut ctx = EventContext {
            scheduler: &mut self.scheduler,
        };
        self.events.dispatch_spawn(&event, player, &mut ctx);
        Ok(initial_spawn)
    }

    /// Removes a player from the session.
    ///
    /// # Errors
    /// `MassBreakError::PlayerNotRegistered` if the player is not online.
    pub fn leave_player(&mut self, player_id: &str) -> Result<(), MassBreakError> {
        let player = self
            .registry
            .remove(player_id)
            .ok_or_else(|| MassBreakError::PlayerNotRegistered(player_id.to_owned()))?;
        info!("{} left", player.name());

        let event = PlayerLeaveAfterEvent {
            player_id: player_id.to_owned(),
        };
        let mut ctx = EventContext {
            scheduler: &mut self.scheduler,
        };
        self.events.dispatch_leave(&event, &mut ctx);
        Ok(())
    }

    /// Makes a player start or stop sneaking.
    pub fn set_sneaking(&mut self, player_id: &str, is_sneaking: bool) -> Result<(), MassBreakError> {
        self.registry.get(player_id)?.set_sneaking(is_sneaking);
        Ok(())
    }

    /// Moves a player.
    pub fn move_player(&mut self, player_id: &str, location: Point3<f32>) -> Result<(), MassBreakError> {
        self.registry.get(player_id)?.set_location(location);
        Ok(())
    }

    /// Switches a player's game mode, raising an event when it actually changes.
    pub fn set_game_mode(&mut self, player_id: &str, game_mode: GameMode) -> Result<(), MassBreakError> {
        let player = self.registry.get(player_id)?;
        let from = player.game_mode();
        if from == game_mode {
            return Ok(());
        }
        player.set_game_mode(game_mode);

        let event = PlayerGameModeChangeAfterEvent {
            player_id: player_id.to_owned(),
            from,
            to: game_mode,
        };
        let mut ctx = EventContext {
            scheduler: &mut self.scheduler,
        };
        self.events.dispatch_game_mode_change(&event, player, &mut ctx);
        Ok(())
    }

    /// Breaks the block at `pos` the way the host does when a player mines it.
    ///
    /// The block is replaced by air before the event is raised, so listeners see
    /// the world after the break.
    ///
    /// # Returns
    /// The broken block, or `None` when there was nothing to break.
    ///
    /// # Errors
    /// Unknown players and world failures.
    pub fn break_block(&mut self, player_id: &str, pos: Point3<i32>) -> Result<Option<Block>, MassBreakError> {
        let player = self.registry.get(player_id)?;

        let broken = {
            let mut world = self.world.get_mut();
            match world.get_block(pos)? {
                Some(block) if !block.is_air() => {
                    world.set_block(pos, Block::air())?;
                    block
                }
                _ => {
                    trace!("Nothing to break at ({})", to_key(pos));
                    return Ok(None);
                }
            }
        };
        debug!("{} broke {} at ({})", player.name(), broken, to_key(pos));

        let event = PlayerBreakBlockAfterEvent {
            player_id: player_id.to_owned(),
            block_location: pos,
            broken_block_type: broken.type_id.clone(),
            dimension: self.world.as_dimension(),
        };
        let mut ctx = EventContext {
            scheduler: &mut self.scheduler,
        };
        self.events.dispatch_break_block(&event, player, &mut ctx);
        Ok(Some(broken))
    }

    /// Places a block for a player, loading the chunk if needed.
    pub fn place_block(&mut self, player_id: &str, pos: Point3<i32>, type_id: &str) -> Result<(), MassBreakError> {
        let player = self.registry.get(player_id)?;
        self.world.get_mut().place_block(pos, type_id)?;

        let event = PlayerPlaceBlockAfterEvent {
            player_id: player_id.to_owned(),
            block_location: pos,
            block: Block::new(type_id),
            dimension: self.world.as_dimension(),
        };
        let mut ctx = EventContext {
            scheduler: &mut self.scheduler,
        };
        self.events.dispatch_place_block(&event, player, &mut ctx);
        Ok(())
    }

    /// Advances the game by one tick.
    ///
    /// # Returns
    /// The number of tasks that ran.
    pub fn tick(&mut self) -> usize {
        self.scheduler.tick()
    }

    /// Ticks until no task is pending, or `max_ticks` ticks have passed.
    ///
    /// Repeating tasks keep the scheduler busy, so the limit always applies.
    ///
    /// # Returns
    /// The number of ticks that passed.
    pub fn run_until_idle(&mut self, max_ticks: u64) -> u64 {
        let mut ticks = 0;
        while ticks < max_ticks && !self.scheduler.is_idle() {
            self.scheduler.tick();
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entity::KeystonePlayer, world::block::AIR};
    use std::{cell::RefCell, rc::Rc};

    const OAK: &str = "minecraft:oak_log";

    fn session() -> Session {
        let mut world = World::new();
        world.fill(Point3::new(0, 60, 0), Point3::new(15, 70, 15), AIR).unwrap();
        let mut session = Session::new(world, MassBreakConfig::default());
        session.spawn_player("p1", "Alex", Point3::new(8.0, 64.0, 8.0)).unwrap();
        session
    }

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl PlayerEventListener for Recorder {
        fn on_spawn_after(&mut self, event: &PlayerSpawnAfterEvent, _player: &KeystonePlayer, _ctx: &mut EventContext<'_>) {
            self.events.borrow_mut().push(format!("spawn {} {}", event.player_id, event.initial_spawn));
        }

        fn on_leave_after(&mut self, event: &PlayerLeaveAfterEvent, _ctx: &mut EventContext<'_>) {
            self.events.borrow_mut().push(format!("leave {}", event.player_id));
        }

        fn on_game_mode_change_after(
            &mut self,
            event: &PlayerGameModeChangeAfterEvent,
            _player: &KeystonePlayer,
            _ctx: &mut EventContext<'_>,
        ) {
            self.events.borrow_mut().push(format!("mode {} -> {}", event.from, event.to));
        }
    }

    #[test]
    fn player_lifecycle_raises_events() {
        let mut session = session();
        let events = Rc::new(RefCell::new(Vec::new()));
        session.register_listener(Recorder { events: events.clone() });

        assert!(session.spawn_player("p2", "Steve", Point3::new(1.0, 64.0, 1.0)).unwrap());
        assert!(!session.spawn_player("p2", "Steve", Point3::new(2.0, 64.0, 2.0)).unwrap());
        session.set_game_mode("p2", GameMode::Creative).unwrap();
        session.set_game_mode("p2", GameMode::Creative).unwrap();
        session.leave_player("p2").unwrap();

        assert_eq!(
            *events.borrow(),
            vec!["spawn p2 true", "spawn p2 false", "mode survival -> creative", "leave p2"]
        );
        assert_eq!(session.registry().len(), 1);
    }

    #[test]
    fn respawn_moves_the_existing_player() {
        let mut session = session();
        session.spawn_player("p1", "Alex", Point3::new(3.0, 65.0, 3.0)).unwrap();

        let player = session.registry().get("p1").unwrap();
        assert_eq!(player.location(), Point3::new(3.0, 65.0, 3.0));
        assert_eq!(player.last_location(), Point3::new(3.0, 65.0, 3.0));
    }

    #[test]
    fn unknown_players_are_reported() {
        let mut session = session();

        assert!(matches!(
            session.break_block("ghost", Point3::new(1, 64, 1)),
            Err(MassBreakError::PlayerNotRegistered(id)) if id == "ghost"
        ));
        assert!(session.leave_player("ghost").is_err());
        assert!(session.set_sneaking("ghost", true).is_err());
    }

    #[test]
    fn breaking_air_does_nothing() {
        let mut session = session();

        assert_eq!(session.break_block("p1", Point3::new(1, 64, 1)).unwrap(), None);
        assert!(session.scheduler().is_idle());
    }

    #[test]
    fn breaking_clears_the_block_before_listeners_run() {
        let mut session = session();
        session.place_block("p1", Point3::new(4, 64, 4), OAK).unwrap();
        session.place_block("p1", Point3::new(4, 65, 4), OAK).unwrap();
        session.set_sneaking("p1", true).unwrap();

        let broken = session.break_block("p1", Point3::new(4, 64, 4)).unwrap();

        assert_eq!(broken, Some(Block::new(OAK)));
        assert_eq!(session.world().get().count_blocks(OAK), 1);
        assert_eq!(session.scheduler().pending(), 1);

        assert_eq!(session.run_until_idle(10), 1);
        assert_eq!(session.world().get().count_blocks(OAK), 0);
        assert_eq!(session.stats().broken, 1);
    }

    #[test]
    fn run_until_idle_stops_at_the_limit() {
        let mut session = session();
        session.scheduler_mut().run_interval(|| {}, 1, 0).unwrap();

        assert_eq!(session.run_until_idle(5), 5);
        assert_eq!(session.scheduler().current_tick(), 5);
    }
}
