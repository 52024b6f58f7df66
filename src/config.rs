//! Runtime configuration and display-scaled physics tuning.
//!
//! [`GameConfig`] is what a player or test edits: screen size, camera borders,
//! seed and a few gameplay switches. [`PhysicsTuning`] is derived from it once
//! at start-up by multiplying the reference constants with the display
//! adaptation factor, so perceived speed is the same on every resolution.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    CHEST_COINS, FADE_TICKS, GRAVITY, ITEM_LEASH_CELLS, JUMP_VELOCITY, MAX_FALL_SPEED,
    PLAYER_SCALE, PLAYER_SPRITE_SIZE, REFERENCE_SCREEN_HEIGHT, SPRINT_SPEED, TILE_SCALE,
    USE_RADIUS_CELLS, WALK_SPEED,
};

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file was not valid configuration JSON.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Path that was requested.
        path: String,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Display size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl ScreenSize {
    /// Creates a screen size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size as a vector.
    #[must_use]
    pub const fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Ratio of this display's height to the reference height.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilehop::config::ScreenSize;
    ///
    /// assert_eq!(ScreenSize::new(2048.0, 1152.0).adaptation_factor(), 1.0);
    /// assert_eq!(ScreenSize::new(1280.0, 576.0).adaptation_factor(), 0.5);
    /// ```
    #[must_use]
    pub fn adaptation_factor(&self) -> f32 {
        self.height / REFERENCE_SCREEN_HEIGHT
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Dead-zone insets as fractions of the screen size, one per side.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraBorders {
    /// Left inset as a fraction of screen width.
    pub left: f32,
    /// Right inset as a fraction of screen width.
    pub right: f32,
    /// Top inset as a fraction of screen height.
    pub top: f32,
    /// Bottom inset as a fraction of screen height.
    pub bottom: f32,
}

impl Default for CameraBorders {
    fn default() -> Self {
        Self {
            left: 0.25,
            right: 0.25,
            top: 0.2,
            bottom: 0.3,
        }
    }
}

/// How the camera dead zone follows the tracked body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeadZoneMode {
    /// Each edge only ever moves outward to contain the body; the zone widens
    /// toward every extreme visited since the last level load.
    #[default]
    Expand,
    /// The zone keeps its size and is pushed along by the body.
    Slide,
}

/// User-facing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Display size the simulation is scaled for.
    pub screen: ScreenSize,
    /// Camera dead-zone insets.
    pub camera_borders: CameraBorders,
    /// Camera dead-zone behaviour.
    pub dead_zone: DeadZoneMode,
    /// Extra screen-space offset applied to every drawable, used to centre a
    /// logical surface inside a larger window.
    pub centering_offset: [f32; 2],
    /// Seed for item easing rates and coin scatter.
    pub seed: u64,
    /// Keep trailing items when restarting a level.
    pub keep_inventory_on_restart: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenSize::default(),
            camera_borders: CameraBorders::default(),
            dead_zone: DeadZoneMode::default(),
            centering_offset: [0.0, 0.0],
            seed: 0x5eed,
            keep_inventory_on_restart: true,
        }
    }
}

impl GameConfig {
    /// Reads configuration from a JSON file; absent fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable or not valid JSON.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the parser error when `text` is not valid configuration JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Physics constants scaled for this configuration's screen.
    #[must_use]
    pub fn tuning(&self) -> PhysicsTuning {
        PhysicsTuning::for_scale(self.screen.adaptation_factor())
    }

    /// Centering offset as a vector.
    #[must_use]
    pub const fn centering(&self) -> Vec2 {
        Vec2::new(self.centering_offset[0], self.centering_offset[1])
    }
}

/// Physics and gameplay constants after display adaptation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsTuning {
    /// Display adaptation factor the values were scaled by.
    pub scale: f32,
    /// Downward acceleration per tick.
    pub gravity: f32,
    /// Jump impulse magnitude.
    pub jump_velocity: f32,
    /// Walking speed.
    pub walk_speed: f32,
    /// Sprinting speed.
    pub sprint_speed: f32,
    /// Cap below which gravity keeps accumulating.
    pub max_fall_speed: f32,
    /// Player body size.
    pub body_size: Vec2,
    /// Edge length of one level grid cell.
    pub cell_size: f32,
    /// Distance past which a trailing item lets go.
    pub item_leash: f32,
    /// Extra reach of chest and teleport use tests.
    pub use_radius: f32,
    /// Coins an opened chest spills.
    pub chest_coins: usize,
    /// Ticks a teleport fade lasts.
    pub fade_ticks: u32,
}

impl PhysicsTuning {
    /// Scales the reference constants by `scale`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilehop::config::PhysicsTuning;
    ///
    /// let tuning = PhysicsTuning::for_scale(2.0);
    /// assert_eq!(tuning.jump_velocity, 40.0);
    /// assert_eq!(tuning.body_size.y, 160.0);
    /// assert_eq!(tuning.cell_size, 192.0);
    /// ```
    #[must_use]
    pub fn for_scale(scale: f32) -> Self {
        let body_edge = PLAYER_SPRITE_SIZE * PLAYER_SCALE * scale;
        let cell_size = body_edge * TILE_SCALE / PLAYER_SCALE;
        Self {
            scale,
            gravity: GRAVITY * scale,
            jump_velocity: JUMP_VELOCITY * scale,
            walk_speed: WALK_SPEED * scale,
            sprint_speed: SPRINT_SPEED * scale,
            max_fall_speed: MAX_FALL_SPEED * scale,
            body_size: Vec2::splat(body_edge),
            cell_size,
            item_leash: ITEM_LEASH_CELLS * cell_size,
            use_radius: USE_RADIUS_CELLS * cell_size,
            chest_coins: CHEST_COINS,
            fade_ticks: FADE_TICKS,
        }
    }
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self::for_scale(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "dead_zone": "slide" }"#)
            .unwrap_or_else(|err| panic!("config should parse: {err}"));
        assert_eq!(config.seed, 7);
        assert_eq!(config.dead_zone, DeadZoneMode::Slide);
        assert_eq!(config.screen, ScreenSize::default());
        assert!(config.keep_inventory_on_restart);
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(GameConfig::from_json("{ seed: }").is_err());
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = GameConfig::from_path(Path::new("/definitely/not/here.json"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[rstest]
    #[case::reference(1152.0, 1.0)]
    #[case::full_hd(1080.0, 0.9375)]
    #[case::double(2304.0, 2.0)]
    fn tuning_scales_with_screen_height(#[case] height: f32, #[case] expected: f32) {
        let config = GameConfig {
            screen: ScreenSize::new(1920.0, height),
            ..GameConfig::default()
        };
        let tuning = config.tuning();
        assert_relative_eq!(tuning.scale, expected);
        assert_relative_eq!(tuning.gravity, GRAVITY * expected);
        assert_relative_eq!(tuning.walk_speed, WALK_SPEED * expected);
        assert_relative_eq!(tuning.sprint_speed, SPRINT_SPEED * expected);
        assert_relative_eq!(tuning.max_fall_speed, MAX_FALL_SPEED * expected);
    }

    #[test]
    fn cell_is_six_fifths_of_the_body() {
        let tuning = PhysicsTuning::default();
        assert_relative_eq!(tuning.body_size.y, 80.0);
        assert_relative_eq!(tuning.cell_size, 96.0);
    }
}
