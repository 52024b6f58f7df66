//! Box-scroll camera.
//!
//! The camera keeps a dead-zone rectangle in world space. It starts as the
//! screen inset by the configured borders and is adjusted every tick so the
//! tracked body stays inside it. The world-to-screen offset is derived from
//! the zone's top-left corner and never stored separately.

use glam::Vec2;

use crate::config::{CameraBorders, DeadZoneMode, ScreenSize};
use crate::geometry::Aabb;

/// Dead-zone camera following one body.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    inset: Aabb,
    zone: Aabb,
    mode: DeadZoneMode,
    centering: Vec2,
}

impl Camera {
    /// Creates a camera whose dead zone is the screen inset by `borders`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use tilehop::camera::Camera;
    /// use tilehop::config::{CameraBorders, DeadZoneMode, ScreenSize};
    ///
    /// let camera = Camera::new(
    ///     ScreenSize::new(1000.0, 500.0),
    ///     CameraBorders { left: 0.1, right: 0.2, top: 0.1, bottom: 0.3 },
    ///     DeadZoneMode::Expand,
    ///     Vec2::ZERO,
    /// );
    /// assert_eq!(camera.zone().left(), 100.0);
    /// assert_eq!(camera.zone().right(), 800.0);
    /// assert_eq!(camera.zone().bottom(), 350.0);
    /// assert_eq!(camera.offset(), Vec2::ZERO);
    /// ```
    #[must_use]
    pub fn new(
        screen: ScreenSize,
        borders: CameraBorders,
        mode: DeadZoneMode,
        centering: Vec2,
    ) -> Self {
        let left = screen.width * borders.left;
        let top = screen.height * borders.top;
        let width = screen.width - left - screen.width * borders.right;
        let height = screen.height - top - screen.height * borders.bottom;
        let inset = Aabb::from_xywh(left, top, width, height);
        Self {
            inset,
            zone: inset,
            mode,
            centering,
        }
    }

    /// Current dead zone in world space.
    #[must_use]
    pub const fn zone(&self) -> Aabb {
        self.zone
    }

    /// Dead zone the camera started with.
    #[must_use]
    pub const fn inset(&self) -> Aabb {
        self.inset
    }

    /// Dead-zone behaviour.
    #[must_use]
    pub const fn mode(&self) -> DeadZoneMode {
        self.mode
    }

    /// Adjusts the dead zone so it contains `target`.
    ///
    /// In [`DeadZoneMode::Expand`] each edge independently moves outward to
    /// the target's edge and never moves back. In [`DeadZoneMode::Slide`] the
    /// zone keeps its size and is pushed along instead.
    pub fn update(&mut self, target: &Aabb) {
        match self.mode {
            DeadZoneMode::Expand => self.expand_to(target),
            DeadZoneMode::Slide => self.slide_to(target),
        }
    }

    fn expand_to(&mut self, target: &Aabb) {
        let mut min = self.zone.min;
        let mut max = self.zone.max();
        if target.left() < min.x {
            min.x = target.left();
        }
        if target.right() > max.x {
            max.x = target.right();
        }
        if target.top() < min.y {
            min.y = target.top();
        }
        if target.bottom() > max.y {
            max.y = target.bottom();
        }
        self.zone = Aabb::new(min, max - min);
    }

    fn slide_to(&mut self, target: &Aabb) {
        if target.left() < self.zone.left() {
            self.zone.set_left(target.left());
        }
        if target.right() > self.zone.right() {
            self.zone.set_right(target.right());
        }
        if target.top() < self.zone.top() {
            self.zone.set_top(target.top());
        }
        if target.bottom() > self.zone.bottom() {
            self.zone.set_bottom(target.bottom());
        }
    }

    /// Restores the initial dead zone.
    pub fn reset(&mut self) {
        self.zone = self.inset;
    }

    /// World-to-screen offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.zone.min - self.inset.min
    }

    /// Screen position of a world point.
    #[must_use]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset() + self.centering
    }
}
