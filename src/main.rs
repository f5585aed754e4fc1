//! # Mass Break Demo
//!
//! Plants a seeded forest, spawns a player and fells a few trees with mass break,
//! logging what happens tick by tick.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```
//!
//! The optional argument is a JSON file overriding any of the `MassBreakConfig` fields.

use cgmath::Point3;
use log::info;

use mass_break::{
    config::MassBreakConfig,
    entity::KeystonePlayer,
    error::MassBreakError,
    event::{EventContext, PlayerEventListener, PlayerSpawnAfterEvent},
    session::Session,
    world::{
        forest::{ForestGenerator, TRUNK_TYPES},
        World,
    },
};

const SEED: u64 = 0x5EED;
const PLAYER_ID: &str = "demo-player";
const STATUS_PERIOD_TICKS: u64 = 5;
const MAX_TICKS: u64 = 200;

struct WelcomeListener;

impl PlayerEventListener for WelcomeListener {
    fn name(&self) -> &str {
        "welcome"
    }

    fn on_spawn_after(&mut self, event: &PlayerSpawnAfterEvent, player: &KeystonePlayer, _ctx: &mut EventContext<'_>) {
        if event.initial_spawn {
            player.send_message("Sneak while breaking a log to fell the whole tree.");
        }
    }
}

fn main() -> Result<(), MassBreakError> {
    mass_break::init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => MassBreakConfig::load(path)?,
        None => MassBreakConfig::default(),
    };
    info!("Using {:?}", config);

    let mut world = World::new();
    let trees = ForestGenerator::new(SEED).plant(&mut world, Point3::new(0, 63, 0), 32, 4)?;

    let mut session = Session::new(world, config);
    session.register_listener(WelcomeListener);
    session.spawn_player(PLAYER_ID, "Alex", Point3::new(0.5, 64.0, 0.5))?;

    let status_world = session.world().clone();
    let status = session.scheduler_mut().run_interval(
        move || {
            let world = status_world.get();
            let logs: usize = TRUNK_TYPES.iter().map(|log| world.count_blocks(log)).sum();
            info!("{} logs standing, {} items on the ground", logs, world.dropped_items().len());
        },
        STATUS_PERIOD_TICKS,
        0,
    )?;

    for (index, tree) in trees.iter().enumerate() {
        // Every other tree is broken standing up and only loses its lowest log.
        session.set_sneaking(PLAYER_ID, index % 2 == 0)?;
        session.move_player(PLAYER_ID, Point3::new(tree.base.x as f32 + 1.5, tree.base.y as f32, tree.base.z as f32 + 0.5))?;
        session.break_block(PLAYER_ID, tree.base)?;
    }

    let mut ticks = 0;
    while session.scheduler().pending() > 1 && ticks < MAX_TICKS {
        session.tick();
        ticks += 1;
    }
    session.scheduler_mut().cancel(status);

    let stats = session.stats();
    info!(
        "Done after {} ticks: {} mass breaks, {} blocks broken, {} failed, {} batches",
        ticks,
        stats.operations,
        stats.broken,
        stats.failed,
        stats.batches.len()
    );
    session.leave_player(PLAYER_ID)
}
