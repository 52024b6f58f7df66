//! Behaviour-driven tests using rust-rspec.
//!
//! These tests check that a body standing on solid ground stays put and that
//! a body walking off a ledge falls under gravity.

use test_utils::{keys, reference_config, run, AsciiMap};
use tilehop::body::Body;
use tilehop::game::GameState;
use tilehop::input::InputSnapshot;
use tilehop::prelude::Vec2;

#[derive(Debug, Clone, Default)]
struct Platform {
    game: Option<GameState>,
    start: Vec2,
}

impl Platform {
    fn setup(&mut self, rows: &[&str]) {
        let map = AsciiMap::new(rows).to_map();
        let mut game = GameState::from_map(reference_config(), "platform", &map);
        // Let the body settle onto the floor below its spawn cell.
        run(&mut game, &InputSnapshot::default(), 1);
        self.start = game.body().expect("body spawned").position();
        self.game = Some(game);
    }

    fn game(&mut self) -> &mut GameState {
        self.game.as_mut().expect("platform not set up")
    }

    fn body(&self) -> &Body {
        self.game
            .as_ref()
            .and_then(GameState::body)
            .expect("body alive")
    }
}

#[test]
fn resting_body_stays_put() {
    rspec::run(&rspec::given(
        "a body standing on a flat floor",
        Platform::default(),
        |ctx| {
            ctx.before_each(|platform| platform.setup(&["..P..", "#####"]));
            ctx.when("ten idle ticks pass", |ctx| {
                ctx.before_each(|platform| {
                    run(platform.game(), &InputSnapshot::default(), 10);
                });
                ctx.then("the body has not moved", |platform| {
                    assert_eq!(platform.body().position(), platform.start);
                });
                ctx.then("the body is grounded with no vertical speed", |platform| {
                    let body = platform.body();
                    assert!(body.on_ground);
                    assert!(body.velocity.y.abs() < f32::EPSILON);
                });
            });
        },
    ));
}

#[test]
fn walking_off_a_ledge_falls() {
    rspec::run(&rspec::given(
        "a body standing at the edge of a ledge",
        Platform::default(),
        |ctx| {
            ctx.before_each(|platform| platform.setup(&["P....", "#...."]));
            ctx.when("the body walks right for thirty ticks", |ctx| {
                ctx.before_each(|platform| {
                    run(platform.game(), &keys(&["right"]), 30);
                });
                ctx.then("it is airborne below its start", |platform| {
                    let start = platform.start;
                    let body = platform.body();
                    assert!(!body.on_ground);
                    assert!(body.position().y > start.y);
                    assert!(body.position().x > start.x);
                });
            });
        },
    ));
}
