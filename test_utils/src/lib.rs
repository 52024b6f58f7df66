//! Utility helpers for tests.
//!
//! - [`ascii`] draws small levels as text and turns them into map data.
//! - [`MemoryMapSource`] serves maps from memory.
//! - [`keys`], [`run`] and [`config_for_height`] drive a [`GameState`].

pub mod ascii;

use hashbrown::HashMap;
use tilehop::config::{GameConfig, ScreenSize};
use tilehop::game::{GameState, TickOutcome};
use tilehop::input::InputSnapshot;
use tilehop::map::{MapData, MapError, MapSource};

pub use ascii::AsciiMap;

/// Map source backed by an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct MemoryMapSource {
    maps: HashMap<String, MapData>,
}

impl MemoryMapSource {
    /// An empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the map called `name`.
    pub fn with(mut self, name: &str, map: MapData) -> Self {
        self.maps.insert(name.to_owned(), map);
        self
    }
}

impl MapSource for MemoryMapSource {
    fn load_map(&self, name: &str) -> Result<MapData, MapError> {
        self.maps.get(name).cloned().ok_or_else(|| MapError::NotFound {
            name: name.to_owned(),
            path: name.into(),
        })
    }
}

/// Builds an input snapshot from key names.
///
/// Recognised names: `left`, `right`, `jump`, `sprint`, `crouch`, `use`,
/// `debug`, `restart`, `quit`.
///
/// # Panics
/// Panics on an unknown key name.
///
/// # Examples
/// ```
/// let input = test_utils::keys(&["right", "jump"]);
/// assert!(input.right && input.jump && !input.left);
/// ```
pub fn keys(names: &[&str]) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    for name in names {
        match *name {
            "left" => input.left = true,
            "right" => input.right = true,
            "jump" => input.jump = true,
            "sprint" => input.sprint = true,
            "crouch" => input.crouch = true,
            "use" => input.use_action = true,
            "debug" => input.debug = true,
            "restart" => input.restart = true,
            "quit" => input.quit = true,
            other => panic!("unknown key name `{other}`"),
        }
    }
    input
}

/// Ticks `game` `count` times with the same input, collecting outcomes.
pub fn run(game: &mut GameState, input: &InputSnapshot, count: usize) -> Vec<TickOutcome> {
    (0..count).map(|_| game.tick(input)).collect()
}

/// Default configuration for a screen `height` pixels tall (16:9).
pub fn config_for_height(height: f32) -> GameConfig {
    GameConfig {
        screen: ScreenSize::new(height * 16.0 / 9.0, height),
        ..GameConfig::default()
    }
}

/// Default configuration at the reference height, where one cell is 96 px
/// and the body is 80 px square.
pub fn reference_config() -> GameConfig {
    config_for_height(tilehop::constants::REFERENCE_SCREEN_HEIGHT)
}
