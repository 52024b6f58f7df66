//! Items, chests and teleports driven through the full tick.

use rstest::{fixture, rstest};
use test_utils::{keys, reference_config, run, AsciiMap, MemoryMapSource};
use tilehop::game::{GameState, Session, TickOutcome};
use tilehop::input::InputSnapshot;
use tilehop::presentation::SpriteRef;
use tilehop::tile::{ChestState, ItemKind, ItemPhase, Tile, TileKind};

fn game(rows: &[&str]) -> GameState {
    let map = AsciiMap::new(rows).to_map();
    GameState::from_map(reference_config(), "test", &map)
}

fn count_items(game: &GameState, kind: ItemKind, phase: ItemPhase) -> usize {
    game.level()
        .tiles()
        .iter()
        .filter_map(Tile::item)
        .filter(|item| item.kind == kind && item.phase == phase)
        .count()
}

fn chest_state(game: &GameState) -> Option<ChestState> {
    game.level().tiles().iter().find_map(|tile| match tile.kind {
        TileKind::Chest(state) => Some(state),
        _ => None,
    })
}

#[fixture]
fn treasure_room() -> GameState {
    game(&[".Pgc..", "######"])
}

#[rstest]
fn walking_into_a_gem_picks_it_up(mut treasure_room: GameState) {
    run(&mut treasure_room, &keys(&["right"]), 6);
    assert_eq!(treasure_room.trail().len(), 1);
    assert_eq!(count_items(&treasure_room, ItemKind::Gem, ItemPhase::PickedUp), 1);
    assert_eq!(treasure_room.inventory().kinds(), &[ItemKind::Gem]);
}

#[rstest]
fn picked_up_gems_trail_behind_the_player(mut treasure_room: GameState) {
    run(&mut treasure_room, &keys(&["right"]), 6);
    let gem_center = |game: &GameState| {
        game.trail()
            .first()
            .and_then(|id| game.level().tile(*id))
            .map(Tile::center)
            .expect("trailing gem")
    };
    let body_center = |game: &GameState| game.body().expect("alive").rect().center();
    let before = gem_center(&treasure_room).distance(body_center(&treasure_room));
    run(&mut treasure_room, &InputSnapshot::default(), 20);
    let after = gem_center(&treasure_room).distance(body_center(&treasure_room));
    assert!(after < before);
}

#[rstest]
fn chest_trades_a_gem_for_coins(mut treasure_room: GameState) {
    run(&mut treasure_room, &keys(&["right"]), 14);
    assert_eq!(treasure_room.trail().len(), 1);
    let bounds = treasure_room.level().bounds();

    treasure_room.tick(&keys(&["use"]));

    assert_eq!(chest_state(&treasure_room), Some(ChestState::Opened));
    assert_eq!(count_items(&treasure_room, ItemKind::Gem, ItemPhase::Collected), 1);
    let coins = treasure_room
        .level()
        .tiles()
        .iter()
        .filter_map(Tile::item)
        .filter(|item| item.kind == ItemKind::Coin)
        .count();
    assert_eq!(coins, treasure_room.tuning().chest_coins);
    assert_eq!(treasure_room.level().bounds(), bounds, "spilled coins do not move the level edge");
    let drawn_gems = treasure_room
        .frame()
        .count_matching(|sprite| *sprite == SpriteRef::Item { kind: ItemKind::Gem });
    assert_eq!(drawn_gems, 0, "collected gems are not drawn");
}

#[test]
fn chest_stays_closed_without_an_item() {
    let mut room = game(&[".Pc...", "######"]);
    room.tick(&keys(&["use"]));
    assert_eq!(chest_state(&room), Some(ChestState::Closed));
}

#[test]
fn holding_use_does_not_repeat_the_action() {
    let mut room = game(&[".Pgc..", "######"]);
    run(&mut room, &keys(&["right"]), 14);
    let held = keys(&["use"]);
    room.tick(&held);
    let after_first = room.level().len();
    run(&mut room, &held, 5);
    assert_eq!(room.level().len(), after_first);
}

#[test]
fn only_one_teleport_arms_at_a_time() {
    let map = AsciiMap::new(&["TPT...", "######"]).teleport_to("cave").to_map();
    let mut room = GameState::from_map(reference_config(), "hall", &map);
    assert_eq!(room.tick(&keys(&["use"])), TickOutcome::Continue);

    let armed = room
        .frame()
        .count_matching(|sprite| *sprite == SpriteRef::Teleport { armed: true });
    assert_eq!(armed, 1);
    assert!(room.transit().is_some());
}

#[test]
fn finished_fade_travels_with_the_inventory() {
    let hall = AsciiMap::new(&[".PgT..", "######"]).teleport_to("cave").to_map();
    let cave = AsciiMap::new(&["...P..", "######"]).to_map();
    let source = MemoryMapSource::new().with("hall", hall).with("cave", cave);
    let mut session = Session::start(reference_config(), Box::new(source), "hall")
        .expect("hall should load");

    for _ in 0..14 {
        session.step(&keys(&["right"])).expect("step");
    }
    assert_eq!(session.state().trail().len(), 1);

    let fade_ticks = session.state().tuning().fade_ticks;
    let mut outcome = session.step(&keys(&["use"])).expect("arm");
    let mut ticks = 1;
    while outcome == TickOutcome::Continue && ticks < fade_ticks + 5 {
        outcome = session.step(&InputSnapshot::default()).expect("fade");
        ticks += 1;
    }

    assert_eq!(
        outcome,
        TickOutcome::Travel {
            destination: "cave".to_owned()
        }
    );
    assert_eq!(ticks, fade_ticks);
    let state = session.state();
    assert_eq!(state.level().name(), "cave");
    assert_eq!(state.inventory().kinds(), &[ItemKind::Gem]);
    assert!(state.transit().is_none());
}
