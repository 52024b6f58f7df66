//! Reference tuning values for the platformer.
//!
//! Every speed and acceleration below is expressed in pixels per tick at the
//! reference display height. [`crate::config::PhysicsTuning`] multiplies them
//! by the display adaptation factor before the simulation sees them.

/// Display height the reference values were tuned against.
pub const REFERENCE_SCREEN_HEIGHT: f32 = 1152.0;
/// Downward acceleration added every tick.
pub const GRAVITY: f32 = 1.0;
/// Upward velocity applied by a jump impulse.
pub const JUMP_VELOCITY: f32 = 20.0;
/// Horizontal speed while walking.
pub const WALK_SPEED: f32 = 5.0;
/// Horizontal speed while sprinting.
pub const SPRINT_SPEED: f32 = 7.0;
/// Gravity stops accumulating once the vertical velocity reaches this value.
pub const MAX_FALL_SPEED: f32 = 20.0;

/// Edge length of the authored player sprite.
pub const PLAYER_SPRITE_SIZE: f32 = 16.0;
/// Upscale applied to the player sprite.
pub const PLAYER_SCALE: f32 = 5.0;
/// Upscale applied to tile sprites; a grid cell is `TILE_SCALE / PLAYER_SCALE`
/// times the player's height.
pub const TILE_SCALE: f32 = 6.0;

/// Distance, in cells, past which a trailing item lets go.
pub const ITEM_LEASH_CELLS: f32 = 8.0;
/// Lower bound of the per-item easing rate.
pub const ITEM_EASE_MIN: f32 = 0.05;
/// Upper bound (exclusive) of the per-item easing rate.
pub const ITEM_EASE_MAX: f32 = 0.2;
/// Extra reach, in cells, of a chest or teleport use test.
pub const USE_RADIUS_CELLS: f32 = 0.5;
/// Coins spilled by an opened chest.
pub const CHEST_COINS: usize = 5;
/// Ticks a teleport fade-out lasts.
pub const FADE_TICKS: u32 = 30;
/// Ticks each walk animation frame is held.
pub const ANIMATION_TICKS_PER_FRAME: u32 = 6;
/// Frames in the walk cycle.
pub const WALK_FRAMES: u32 = 4;
