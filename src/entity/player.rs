//! # Player Module
//!
//! `Player` is the host's view of a connected player. `KeystonePlayer` wraps it
//! and adds the fields the add-on tracks on its own. Shared fields are read and
//! written through the host object, so the wrapper never holds a stale copy.

use std::fmt;

use cgmath::Point3;
use log::info;

use crate::core::StResource;

/// Game modes a player can be in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Takes damage, breaks blocks with tools. The only mode mass break applies to.
    #[default]
    Survival,
    /// Breaks blocks instantly and drops nothing.
    Creative,
    /// Cannot break most blocks.
    Adventure,
    /// Cannot interact with the world.
    Spectator,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameMode::Survival => "survival",
            GameMode::Creative => "creative",
            GameMode::Adventure => "adventure",
            GameMode::Spectator => "spectator",
        };
        f.write_str(name)
    }
}

/// A player as owned by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Unique, stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Feet position.
    pub location: Point3<f32>,
    /// Current game mode.
    pub game_mode: GameMode,
    /// Whether the player is crouching.
    pub is_sneaking: bool,
}

impl Player {
    /// Creates a standing survival player at `location`.
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Point3<f32>) -> Self {
        Player {
            id: id.into(),
            name: name.into(),
            location,
            game_mode: GameMode::Survival,
            is_sneaking: false,
        }
    }
}

/// The add-on's wrapper around a host [`Player`].
///
/// The host object is held through a shared handle, so changes the host makes
/// (moving, sneaking, switching game mode) are visible through the wrapper
/// immediately.
#[derive(Clone, Debug)]
pub struct KeystonePlayer {
    origin: StResource<Player>,
    last_location: Point3<f32>,
}

impl KeystonePlayer {
    /// Wraps a host player, remembering where it was when wrapped.
    pub fn new(origin: StResource<Player>) -> Self {
        let last_location = origin.get().location;
        KeystonePlayer {
            origin,
            last_location,
        }
    }

    /// The wrapped host object.
    pub fn origin(&self) -> &StResource<Player> {
        &self.origin
    }

    /// Unique id of the host player.
    pub fn id(&self) -> String {
        self.origin.get().id.clone()
    }

    /// Display name.
    pub fn name(&self) -> String {
        self.origin.get().name.clone()
    }

    /// Where the host player currently stands.
    pub fn location(&self) -> Point3<f32> {
        self.origin.get().location
    }

    /// Moves the host player.
    pub fn set_location(&self, location: Point3<f32>) {
        self.origin.get_mut().location = location;
    }

    /// Current game mode.
    pub fn game_mode(&self) -> GameMode {
        self.origin.get().game_mode
    }

    /// Switches the game mode without raising an event.
    pub fn set_game_mode(&self, game_mode: GameMode) {
        self.origin.get_mut().game_mode = game_mode;
    }

    /// Returns `true` while the player is sneaking.
    pub fn is_sneaking(&self) -> bool {
        self.origin.get().is_sneaking
    }

    /// Starts or stops sneaking.
    pub fn set_sneaking(&self, is_sneaking: bool) {
        self.origin.get_mut().is_sneaking = is_sneaking;
    }

    /// Location recorded by the add-on, not by the host.
    pub fn last_location(&self) -> Point3<f32> {
        self.last_location
    }

    /// Records a location of the player.
    pub fn set_last_location(&mut self, location: Point3<f32>) {
        self.last_location = location;
    }

    /// Sends a chat message to the player.
    ///
    /// There is no chat in the in-memory host, so the message goes to the log.
    pub fn send_message(&self, message: &str) {
        info!("[to {}] {}", self.name(), message);
    }
}
