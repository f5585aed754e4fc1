//! # Player Registry
//!
//! Tracks the add-on's player wrappers by player id.

use std::collections::HashMap;

use log::debug;

use super::player::{KeystonePlayer, Player};
use crate::{core::StResource, error::MassBreakError};

/// Wrappers of the players currently online, keyed by player id.
///
/// The registry is owned by the [`Session`](crate::session::Session): created
/// when the session starts, filled on spawn, emptied on leave and dropped with
/// the session. Code that needs to look players up receives it by reference.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<String, KeystonePlayer>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        PlayerRegistry::default()
    }

    /// Returns the wrapper of a host player, creating it on first sight.
    pub fn get_or_create(&mut self, player: &StResource<Player>) -> &mut KeystonePlayer {
        let id = player.get().id.clone();
        self.players.entry(id).or_insert_with_key(|id| {
            debug!("Registering player {}", id);
            KeystonePlayer::new(player.clone())
        })
    }

    /// Looks a player up by id.
    ///
    /// # Errors
    /// `MassBreakError::PlayerNotRegistered` if the player never spawned or already left.
    pub fn get(&self, player_id: &str) -> Result<&KeystonePlayer, MassBreakError> {
        self.players
            .get(player_id)
            .ok_or_else(|| MassBreakError::PlayerNotRegistered(player_id.to_owned()))
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, player_id: &str) -> Result<&mut KeystonePlayer, MassBreakError> {
        self.players
            .get_mut(player_id)
            .ok_or_else(|| MassBreakError::PlayerNotRegistered(player_id.to_owned()))
    }

    /// Forgets a player.
    pub fn remove(&mut self, player_id: &str) -> Option<KeystonePlayer> {
        debug!("Unregistering player {}", player_id);
        self.players.remove(player_id)
    }

    /// Number of registered players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if no player is registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn host(id: &str) -> StResource<Player> {
        StResource::new(Player::new(id, id.to_uppercase(), Point3::new(0.0, 64.0, 0.0)))
    }

    #[test]
    fn get_or_create_reuses_the_wrapper() {
        let mut registry = PlayerRegistry::new();
        let alex = host("alex");

        registry.get_or_create(&alex).set_last_location(Point3::new(1.0, 2.0, 3.0));
        let again = registry.get_or_create(&alex);

        assert_eq!(again.last_location(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removed_players_are_no_longer_found() {
        let mut registry = PlayerRegistry::new();
        registry.get_or_create(&host("alex"));
        registry.get_or_create(&host("steve"));

        assert!(registry.remove("alex").is_some());
        assert!(matches!(
            registry.get("alex"),
            Err(MassBreakError::PlayerNotRegistered(id)) if id == "alex"
        ));
        assert_eq!(registry.get("steve").unwrap().name(), "STEVE");
    }
}
