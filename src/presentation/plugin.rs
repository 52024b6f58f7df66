//! Bevy front-end: keyboard in, coloured rectangles out.
//!
//! The plugin owns no game rules. A `FixedUpdate` system samples the
//! keyboard into an [`InputSnapshot`] and steps the [`Session`] resource at
//! 60 Hz; an `Update` system redraws the latest [`Frame`](super::Frame)
//! with flat-coloured sprites, centring the configured logical screen on
//! the camera.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use log::error;

use super::SpriteRef;
use crate::game::{Session, TickOutcome};
use crate::input::InputSnapshot;
use crate::numeric::{u32_to_f32, usize_to_f32};
use crate::tile::ItemKind;

/// Fixed simulation rate.
pub const TICKS_PER_SECOND: f64 = 60.0;

/// Marker for sprites spawned from the current frame.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
struct DrawnSprite;

/// Marker for the presentation camera.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
struct TilehopCamera;

/// Reads the held state of every bound key.
///
/// Arrows or WASD move, space jumps, shift sprints, `E` uses, `F1` toggles
/// the debug overlay, `R` restarts and escape quits.
#[must_use]
pub fn keyboard_snapshot(keys: &ButtonInput<KeyCode>) -> InputSnapshot {
    let any = |codes: &[KeyCode]| codes.iter().any(|code| keys.pressed(*code));
    InputSnapshot {
        left: any(&[KeyCode::ArrowLeft, KeyCode::KeyA]),
        right: any(&[KeyCode::ArrowRight, KeyCode::KeyD]),
        jump: any(&[KeyCode::Space, KeyCode::ArrowUp, KeyCode::KeyW]),
        sprint: any(&[KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        crouch: any(&[KeyCode::ArrowDown, KeyCode::KeyS]),
        use_action: any(&[KeyCode::KeyE, KeyCode::Enter]),
        debug: any(&[KeyCode::F1]),
        restart: any(&[KeyCode::KeyR]),
        quit: any(&[KeyCode::Escape]),
    }
}

/// Plugin wiring a [`Session`] resource into a bevy app.
///
/// The host inserts the [`Session`] before adding the plugin; the plugin
/// spawns a `Camera2d`, steps the session at [`TICKS_PER_SECOND`] and
/// redraws every frame. Closing the primary window ends the app, which is
/// also how quitting and fatal map errors are handled.
///
/// ```ignore
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .insert_resource(session)
///     .add_plugins(PresentationPlugin)
///     .run();
/// ```
#[derive(Debug)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND));
        app.add_systems(Startup, camera_setup);
        app.add_systems(FixedUpdate, step_session);
        app.add_systems(Update, draw_frame);
    }
}

fn camera_setup(mut commands: Commands, cameras: Query<&Camera2d>) {
    if cameras.is_empty() {
        commands.spawn((Camera2d, TilehopCamera, Name::new("TilehopCamera")));
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn step_session(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    let input = keyboard_snapshot(&keyboard);
    let close = match session.step(&input) {
        Ok(TickOutcome::Quit) => true,
        Ok(_) => false,
        Err(err) => {
            error!("cannot continue: {err}");
            true
        }
    };
    if close {
        for window in &windows {
            commands.entity(window).despawn();
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn draw_frame(
    mut commands: Commands,
    session: Res<Session>,
    drawn: Query<Entity, With<DrawnSprite>>,
) {
    for entity in &drawn {
        commands.entity(entity).despawn();
    }
    let state = session.state();
    let half = state.config().screen.as_vec2() / 2.0;
    let frame = state.frame();

    for (depth, command) in frame.commands.iter().enumerate() {
        let center = command.position + command.size / 2.0;
        commands.spawn((
            DrawnSprite,
            Sprite::from_color(sprite_color(command.sprite), command.size),
            Transform::from_xyz(
                center.x - half.x,
                half.y - center.y,
                usize_to_f32(depth) * 0.001,
            ),
        ));
    }
    if frame.fade > 0.0 {
        commands.spawn((
            DrawnSprite,
            Sprite::from_color(Color::srgba(0.0, 0.0, 0.0, frame.fade), half * 2.0),
            Transform::from_xyz(0.0, 0.0, 100.0),
        ));
    }
}

fn sprite_color(sprite: SpriteRef) -> Color {
    match sprite {
        SpriteRef::Tile { gid } => {
            let shade = 0.25 + 0.05 * u32_to_f32(gid % 8);
            Color::srgb(shade, shade, shade + 0.05)
        }
        SpriteRef::Item {
            kind: ItemKind::Gem,
        } => Color::srgb(0.3, 0.8, 0.9),
        SpriteRef::Item {
            kind: ItemKind::Coin,
        } => Color::srgb(0.95, 0.8, 0.2),
        SpriteRef::Chest { opened: false } => Color::srgb(0.55, 0.35, 0.15),
        SpriteRef::Chest { opened: true } => Color::srgb(0.35, 0.22, 0.1),
        SpriteRef::Teleport { armed: false } => Color::srgb(0.5, 0.3, 0.8),
        SpriteRef::Teleport { armed: true } => Color::srgb(0.8, 0.5, 1.0),
        SpriteRef::Player { facing_left, frame } => {
            let step = 0.05 * u32_to_f32(frame);
            let red = if facing_left { 0.85 } else { 0.9 };
            Color::srgb(red, 0.3 + step, 0.3)
        }
        SpriteRef::Hitbox => Color::srgba(1.0, 0.0, 0.0, 0.35),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_and_left_keys_map_to_directions() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyD);
        keys.press(KeyCode::Space);
        let snapshot = keyboard_snapshot(&keys);
        assert!(snapshot.right);
        assert!(snapshot.jump);
        assert!(!snapshot.left);
        assert!(!snapshot.quit);
    }

    #[test]
    fn escape_requests_quit() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Escape);
        assert!(keyboard_snapshot(&keys).quit);
    }
}
