//! Kinematic player body.
//!
//! A [`Body`] owns position, size and velocity and advances its velocity once
//! per tick from the input snapshot. Displacement and contact handling live in
//! [`crate::collision`]; the body never moves itself.

use glam::Vec2;

use crate::config::PhysicsTuning;
use crate::constants::{ANIMATION_TICKS_PER_FRAME, WALK_FRAMES};
use crate::geometry::Aabb;
use crate::input::InputSnapshot;
use crate::mask::Mask;

/// Player-controlled rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    rect: Aabb,
    /// Velocity in pixels per tick; `y` grows downwards.
    pub velocity: Vec2,
    /// Set only by a downward contact resolved this tick.
    pub on_ground: bool,
    /// A jump impulse was applied and the body has not landed since.
    pub jumping: bool,
    /// Last horizontal input pointed left.
    pub facing_left: bool,
    mask: Mask,
    animation: WalkAnimation,
}

impl Body {
    /// Creates a body at rest with its top-left corner at `position`.
    #[must_use]
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            rect: Aabb::new(position, size),
            velocity: Vec2::ZERO,
            on_ground: false,
            jumping: false,
            facing_left: false,
            mask: Mask::full_for(size),
            animation: WalkAnimation::default(),
        }
    }

    /// Replaces the fully opaque default mask.
    #[must_use]
    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = mask;
        self
    }

    /// Current rectangle.
    #[must_use]
    pub const fn rect(&self) -> Aabb {
        self.rect
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.rect.min
    }

    /// Fixed size.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.rect.size
    }

    /// Collision mask.
    #[must_use]
    pub const fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Current walk-cycle frame.
    #[must_use]
    pub const fn animation_frame(&self) -> u32 {
        self.animation.frame
    }

    pub(crate) fn rect_mut(&mut self) -> &mut Aabb {
        &mut self.rect
    }

    /// Advances velocity for one tick.
    ///
    /// The grounded flag from the previous tick decides whether vertical
    /// velocity restarts from zero and whether a jump may fire; the flag is
    /// then cleared until collision resolution re-asserts it. When both
    /// directions are held, right wins.
    pub fn integrate(&mut self, input: &InputSnapshot, tuning: &PhysicsTuning) {
        let was_grounded = self.on_ground;
        self.on_ground = false;

        let speed = if input.sprint {
            tuning.sprint_speed
        } else {
            tuning.walk_speed
        };
        self.velocity.x = 0.0;
        if input.left {
            self.velocity.x = -speed;
            self.facing_left = true;
        }
        if input.right {
            self.velocity.x = speed;
            self.facing_left = false;
        }

        if was_grounded {
            self.velocity.y = 0.0;
        }
        if self.velocity.y < tuning.max_fall_speed {
            self.velocity.y += tuning.gravity;
        }

        if input.jump && was_grounded && !self.jumping {
            self.velocity.y = -tuning.jump_velocity;
            self.jumping = true;
        }
    }

    /// Steps the walk cycle; idle or airborne bodies show frame zero.
    pub fn animate(&mut self) {
        let walking = self.on_ground && self.velocity.x != 0.0;
        self.animation.step(walking);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WalkAnimation {
    frame: u32,
    ticks: u32,
}

impl WalkAnimation {
    fn step(&mut self, walking: bool) {
        if !walking {
            *self = Self::default();
            return;
        }
        self.ticks += 1;
        if self.ticks >= ANIMATION_TICKS_PER_FRAME {
            self.ticks = 0;
            self.frame = (self.frame + 1) % WALK_FRAMES;
        }
    }
}
