//! # Event Module
//!
//! The host side of player events: listeners are registered with an
//! `EventManager`, and the session asks the manager to dispatch each event to
//! every listener in registration order.

pub mod player_event;

use log::debug;

use crate::entity::KeystonePlayer;
pub use player_event::{
    EventContext, PlayerBreakBlockAfterEvent, PlayerEventListener, PlayerGameModeChangeAfterEvent,
    PlayerLeaveAfterEvent, PlayerPlaceBlockAfterEvent, PlayerSpawnAfterEvent,
};

/// Holds the registered listeners and fans events out to them.
#[derive(Default)]
pub struct EventManager {
    listeners: Vec<Box<dyn PlayerEventListener>>,
}

impl EventManager {
    /// Creates a manager without listeners.
    pub fn new() -> Self {
        EventManager::default()
    }

    /// Registers a listener. Listeners are called in registration order.
    pub fn register(&mut self, listener: impl PlayerEventListener + 'static) {
        debug!("Registered {}", listener.name());
        self.listeners.push(Box::new(listener));
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Raises a spawn event.
    pub fn dispatch_spawn(&mut self, event: &PlayerSpawnAfterEvent, player: &KeystonePlayer, ctx: &mut EventContext<'_>) {
        for listener in &mut self.listeners {
            listener.on_spawn_after(event, player, ctx);
        }
    }

    /// Raises a leave event. The player is already unregistered.
    pub fn dispatch_leave(&mut self, event: &PlayerLeaveAfterEvent, ctx: &mut EventContext<'_>) {
        for listener in &mut self.listeners {
            listener.on_leave_after(event, ctx);
        }
    }

    /// Raises a block-break event.
    pub fn dispatch_break_block(
        &mut self,
        event: &PlayerBreakBlockAfterEvent,
        player: &KeystonePlayer,
        ctx: &mut EventContext<'_>,
    ) {
        for listener in &mut self.listeners {
            listener.on_break_block_after(event, player, ctx);
        }
    }

    /// Raises a block-place event.
    pub fn dispatch_place_block(
        &mut self,
        event: &PlayerPlaceBlockAfterEvent,
        player: &KeystonePlayer,
        ctx: &mut EventContext<'_>,
    ) {
        for listener in &mut self.listeners {
            listener.on_place_block_after(event, player, ctx);
        }
    }

    /// Raises a game-mode change event.
    pub fn dispatch_game_mode_change(
        &mut self,
        event: &PlayerGameModeChangeAfterEvent,
        player: &KeystonePlayer,
        ctx: &mut EventContext<'_>,
    ) {
        for listener in &mut self.listeners {
            listener.on_game_mode_change_after(event, player, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::StResource, entity::Player, scheduler::TickScheduler};
    use cgmath::Point3;
    use std::{cell::RefCell, rc::Rc};

    struct Counting {
        spawns: Rc<RefCell<u32>>,
    }

    impl PlayerEventListener for Counting {
        fn on_spawn_after(&mut self, _event: &PlayerSpawnAfterEvent, _player: &KeystonePlayer, ctx: &mut EventContext<'_>) {
            *self.spawns.borrow_mut() += 1;
            ctx.scheduler.after(0, || {});
        }
    }

    #[test]
    fn listeners_only_see_events_they_override() {
        let spawns = Rc::new(RefCell::new(0));
        let mut events = EventManager::new();
        events.register(Counting { spawns: spawns.clone() });
        events.register(Counting { spawns: spawns.clone() });

        let player = KeystonePlayer::new(StResource::new(Player::new("p", "P", Point3::new(0.0, 0.0, 0.0))));
        let mut scheduler = TickScheduler::new();
        let mut ctx = EventContext { scheduler: &mut scheduler };

        events.dispatch_spawn(
            &PlayerSpawnAfterEvent { player_id: "p".into(), initial_spawn: true },
            &player,
            &mut ctx,
        );
        events.dispatch_leave(&PlayerLeaveAfterEvent { player_id: "p".into() }, &mut ctx);

        assert_eq!(*spawns.borrow(), 2);
        assert_eq!(scheduler.pending(), 2);
    }
}
