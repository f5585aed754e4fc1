use cgmath::Point3;
use test_case::test_case;

use mass_break::{
    config::MassBreakConfig,
    entity::GameMode,
    mass_break::BatchTally,
    session::Session,
    world::{
        block::AIR,
        forest::{ForestGenerator, LEAVES},
        World,
    },
};

const PLAYER: &str = "p1";
const OAK: &str = "minecraft:oak_log";
const BIRCH: &str = "minecraft:birch_log";

fn clearing() -> World {
    let mut world = World::new();
    world.fill(Point3::new(-16, 60, -16), Point3::new(31, 100, 31), AIR).unwrap();
    world
}

fn session_with(world: World, config: MassBreakConfig) -> Session {
    let mut session = Session::new(world, config);
    session.spawn_player(PLAYER, "Alex", Point3::new(0.5, 64.0, 0.5)).unwrap();
    session.set_sneaking(PLAYER, true).unwrap();
    session
}

fn column(world: &mut World, x: i32, z: i32, ys: std::ops::Range<i32>, type_id: &str) {
    for y in ys {
        world.place_block(Point3::new(x, y, z), type_id).unwrap();
    }
}

#[test]
fn sneaking_survival_player_fells_a_tree() {
    let mut world = clearing();
    column(&mut world, 10, 20, 64..70, OAK);
    let mut session = session_with(world, MassBreakConfig::default());

    session.break_block(PLAYER, Point3::new(10, 64, 20)).unwrap();
    session.run_until_idle(10);

    let world = session.world().get();
    assert_eq!(world.count_blocks(OAK), 0);
    assert_eq!(world.dropped_items().len(), 5);
    assert!(world
        .dropped_items()
        .iter()
        .all(|drop| drop.location == Point3::new(0.5, 64.5, 0.5) && drop.item.amount == 1));
}

#[test_case(GameMode::Creative ; "creative")]
#[test_case(GameMode::Spectator ; "spectator")]
#[test_case(GameMode::Adventure ; "adventure")]
fn only_survival_players_trigger_mass_break(game_mode: GameMode) {
    let mut world = clearing();
    column(&mut world, 10, 20, 64..70, OAK);
    let mut session = session_with(world, MassBreakConfig::default());
    session.set_game_mode(PLAYER, game_mode).unwrap();

    session.break_block(PLAYER, Point3::new(10, 64, 20)).unwrap();
    session.run_until_idle(10);

    assert_eq!(session.world().get().count_blocks(OAK), 5);
    assert_eq!(session.stats().operations, 0);
}

#[test_case(true, 5 ; "sneak required")]
#[test_case(false, 0 ; "sneak optional")]
fn standing_players_need_sneak_only_when_required(require_sneak: bool, remaining: usize) {
    let mut world = clearing();
    column(&mut world, 10, 20, 64..70, OAK);
    let config = MassBreakConfig {
        require_sneak,
        ..MassBreakConfig::default()
    };
    let mut session = session_with(world, config);
    session.set_sneaking(PLAYER, false).unwrap();

    session.break_block(PLAYER, Point3::new(10, 64, 20)).unwrap();
    session.run_until_idle(10);

    assert_eq!(session.world().get().count_blocks(OAK), remaining);
}

#[test]
fn large_groups_are_capped_and_split_over_ticks() {
    let mut world = clearing();
    world.fill(Point3::new(0, 64, 0), Point3::new(9, 72, 9), OAK).unwrap();
    let mut session = session_with(world, MassBreakConfig::default());

    session.break_block(PLAYER, Point3::new(0, 64, 0)).unwrap();
    assert_eq!(session.scheduler().due_ticks(), vec![0, 1, 2, 3]);

    session.tick();
    assert_eq!(session.world().get().count_blocks(OAK), 899 - 16);

    session.run_until_idle(10);
    let stats = session.stats();
    assert_eq!(stats.broken, 64);
    assert_eq!(stats.batches, vec![BatchTally { broken: 16, failed: 0 }; 4]);
    assert_eq!(session.world().get().count_blocks(OAK), 899 - 64);
}

#[test]
fn different_log_types_are_not_followed() {
    let mut world = clearing();
    column(&mut world, 10, 20, 64..68, OAK);
    column(&mut world, 10, 20, 68..72, BIRCH);
    let mut session = session_with(world, MassBreakConfig::default());

    session.break_block(PLAYER, Point3::new(10, 64, 20)).unwrap();
    session.run_until_idle(10);

    let world = session.world().get();
    assert_eq!(world.count_blocks(OAK), 0);
    assert_eq!(world.count_blocks(BIRCH), 4);
}

#[test]
fn blocks_removed_before_their_batch_are_tallied_as_failures() {
    let mut world = clearing();
    column(&mut world, 10, 20, 64..84, OAK);
    let mut session = session_with(world, MassBreakConfig::default());

    session.break_block(PLAYER, Point3::new(10, 64, 20)).unwrap();
    session.tick();
    session.place_block(PLAYER, Point3::new(10, 82, 20), "minecraft:stone").unwrap();
    session.run_until_idle(10);

    assert_eq!(
        session.stats().batches,
        vec![BatchTally { broken: 16, failed: 0 }, BatchTally { broken: 2, failed: 1 }]
    );
}

#[test]
fn overlapping_mass_breaks_do_not_double_count() {
    let mut world = clearing();
    column(&mut world, 10, 20, 64..74, OAK);
    let mut session = session_with(world, MassBreakConfig::default());

    session.break_block(PLAYER, Point3::new(10, 64, 20)).unwrap();
    session.break_block(PLAYER, Point3::new(10, 73, 20)).unwrap();
    session.run_until_idle(10);

    let stats = session.stats();
    assert_eq!(stats.operations, 2);
    assert_eq!(stats.broken, 8);
    assert_eq!(stats.failed, 9);
    assert_eq!(session.world().get().count_blocks(OAK), 0);
}

#[test]
fn config_file_limits_are_applied() {
    let config = MassBreakConfig::from_json(r#"{ "max_blocks": 3, "batch_size": 2, "batch_delay_ticks": 5 }"#).unwrap();
    let mut world = clearing();
    column(&mut world, 10, 20, 64..74, OAK);
    let mut session = session_with(world, config);

    session.break_block(PLAYER, Point3::new(10, 64, 20)).unwrap();
    assert_eq!(session.scheduler().due_ticks(), vec![0, 5]);

    session.run_until_idle(20);
    assert_eq!(session.world().get().count_blocks(OAK), 6);
}

#[test]
fn leaves_survive_a_felled_forest() {
    let mut world = World::new();
    let trees = ForestGenerator::new(42)
        .plant(&mut world, Point3::new(0, 63, 0), 32, 3)
        .unwrap();
    let leaves = world.count_blocks(LEAVES);
    let mut session = session_with(world, MassBreakConfig::default());

    for tree in &trees {
        session.break_block(PLAYER, tree.base).unwrap();
    }
    session.run_until_idle(20);

    let world = session.world().get();
    for tree in &trees {
        assert_eq!(world.count_blocks(tree.trunk_type), 0);
    }
    assert_eq!(world.count_blocks(LEAVES), leaves);
}
