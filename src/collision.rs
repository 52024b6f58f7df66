//! Axis-separated collision resolution against a static tile grid.
//!
//! Each tick the body's displacement is applied one axis at a time, X first
//! and Y second. After moving along an axis, every solid rectangle that
//! overlaps the moved body is pushed back against, choosing the side purely
//! from the sign of the velocity on that axis. The order matters: at a corner
//! the X pass sees the pre-fall position, so a diagonal approach lands on top
//! of a block instead of being stopped by its side.
//!
//! There is no swept test. A body travelling further than a tile's thickness
//! in one tick can pass straight through it.

use glam::Vec2;
use log::trace;

use crate::body::Body;
use crate::geometry::Aabb;
use crate::mask::Mask;
use crate::numeric::floor_to_i32;

/// Axis being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical; positive is downwards.
    Y,
}

/// Applies the body's velocity along `axis`, then pushes it out of every
/// overlapping solid rectangle.
///
/// Candidates are gathered against the moved rectangle and corrected in
/// iteration order; when several overlap, the last correction wins. Any
/// contact zeroes the velocity on that axis, and a downward contact grounds
/// the body. Returns the number of contacts.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use tilehop::body::Body;
/// use tilehop::collision::{resolve_axis, Axis};
/// use tilehop::geometry::Aabb;
///
/// let floor = Aabb::from_xywh(0.0, 100.0, 96.0, 96.0);
/// let mut body = Body::new(Vec2::new(0.0, 15.0), Vec2::splat(80.0));
/// body.velocity.y = 10.0;
///
/// assert_eq!(resolve_axis(&mut body, [&floor], Axis::Y), 1);
/// assert_eq!(body.rect().bottom(), 100.0);
/// assert_eq!(body.velocity.y, 0.0);
/// assert!(body.on_ground);
/// ```
pub fn resolve_axis<'a, I>(body: &mut Body, solids: I, axis: Axis) -> usize
where
    I: IntoIterator<Item = &'a Aabb>,
{
    let velocity = match axis {
        Axis::X => body.velocity.x,
        Axis::Y => body.velocity.y,
    };
    let displacement = match axis {
        Axis::X => Vec2::new(velocity, 0.0),
        Axis::Y => Vec2::new(0.0, velocity),
    };
    let moved = body.rect().translated(displacement);
    *body.rect_mut() = moved;

    let mut contacts = 0;
    for tile in solids.into_iter().filter(|tile| moved.intersects(tile)) {
        contacts += 1;
        let rect = body.rect_mut();
        match axis {
            Axis::X if velocity > 0.0 => {
                rect.set_right(tile.left());
                body.velocity.x = 0.0;
            }
            Axis::X if velocity < 0.0 => {
                rect.set_left(tile.right());
                body.velocity.x = 0.0;
            }
            Axis::Y if velocity > 0.0 => {
                rect.set_bottom(tile.top());
                body.velocity.y = 0.0;
                body.on_ground = true;
                body.jumping = false;
            }
            Axis::Y if velocity < 0.0 => {
                rect.set_top(tile.bottom());
                body.velocity.y = 0.0;
            }
            // A stationary body overlapping a tile is left where it is.
            Axis::X | Axis::Y => {}
        }
    }

    if contacts > 0 {
        trace!("{axis:?} pass resolved {contacts} contact(s) at {:?}", body.position());
    }
    contacts
}

/// Whether any opaque pixel of the body touches an opaque pixel of a hazard.
///
/// Mask offsets are taken from the floored difference of the top-left
/// corners, so hazards are judged on whole pixels.
pub fn touches_hazard<'a, I>(body: &Body, hazards: I) -> bool
where
    I: IntoIterator<Item = (&'a Aabb, &'a Mask)>,
{
    let origin = body.position();
    hazards.into_iter().any(|(rect, mask)| {
        let delta = rect.min - origin;
        let offset = glam::IVec2::new(floor_to_i32(delta.x), floor_to_i32(delta.y));
        body.mask().overlaps(mask, offset)
    })
}

/// Whether the body has fallen more than `margin` below `bounds`.
#[must_use]
pub fn fell_out_of(body: &Body, bounds: &Aabb, margin: f32) -> bool {
    body.rect().top() > bounds.bottom() + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const SIZE: f32 = 80.0;

    fn body_at(x: f32, y: f32, velocity: Vec2) -> Body {
        let mut body = Body::new(Vec2::new(x, y), Vec2::splat(SIZE));
        body.velocity = velocity;
        body
    }

    fn block() -> Aabb {
        Aabb::from_xywh(200.0, 200.0, 96.0, 96.0)
    }

    #[rstest]
    #[case::from_left(body_at(115.0, 210.0, Vec2::new(10.0, 0.0)), 200.0 - SIZE)]
    #[case::from_right(body_at(300.0, 210.0, Vec2::new(-10.0, 0.0)), 296.0)]
    fn horizontal_contact_snaps_to_the_near_edge(#[case] mut body: Body, #[case] expected_x: f32) {
        let tile = block();
        assert_eq!(resolve_axis(&mut body, [&tile], Axis::X), 1);
        assert_relative_eq!(body.position().x, expected_x);
        assert_relative_eq!(body.velocity.x, 0.0);
        assert!(!body.on_ground);
    }

    #[test]
    fn rising_contact_stops_at_the_ceiling() {
        let tile = block();
        let mut body = body_at(210.0, 300.0, Vec2::new(0.0, -10.0));
        body.jumping = true;
        resolve_axis(&mut body, [&tile], Axis::Y);
        assert_relative_eq!(body.rect().top(), 296.0);
        assert_relative_eq!(body.velocity.y, 0.0);
        assert!(!body.on_ground);
        assert!(body.jumping, "a ceiling bump is not a landing");
    }

    #[test]
    fn landing_clears_the_jump() {
        let tile = block();
        let mut body = body_at(210.0, 115.0, Vec2::new(0.0, 10.0));
        body.jumping = true;
        resolve_axis(&mut body, [&tile], Axis::Y);
        assert!(body.on_ground);
        assert!(!body.jumping);
    }

    #[test]
    fn miss_applies_the_full_displacement() {
        let tile = block();
        let mut body = body_at(0.0, 0.0, Vec2::new(7.0, 3.0));
        assert_eq!(resolve_axis(&mut body, [&tile], Axis::X), 0);
        assert_eq!(resolve_axis(&mut body, [&tile], Axis::Y), 0);
        assert_eq!(body.position(), Vec2::new(7.0, 3.0));
        assert_eq!(body.velocity, Vec2::new(7.0, 3.0));
    }

    #[test]
    fn last_overlapping_tile_wins() {
        // Two floor tiles at different heights; both overlap after the fall.
        let high = Aabb::from_xywh(0.0, 95.0, 96.0, 96.0);
        let low = Aabb::from_xywh(40.0, 98.0, 96.0, 96.0);
        let mut body = body_at(20.0, 10.0, Vec2::new(0.0, 20.0));
        assert_eq!(resolve_axis(&mut body, [&high, &low], Axis::Y), 2);
        assert_relative_eq!(body.rect().bottom(), 98.0);
    }

    #[test]
    fn stationary_overlap_is_left_alone() {
        let tile = block();
        let mut body = body_at(210.0, 210.0, Vec2::ZERO);
        assert_eq!(resolve_axis(&mut body, [&tile], Axis::X), 1);
        assert_eq!(body.position(), Vec2::new(210.0, 210.0));
    }

    #[test]
    fn hazard_test_uses_pixels() {
        let spike_rect = Aabb::from_xywh(100.0, 100.0, 4.0, 4.0);
        let spike_mask = Mask::from_rows(&["...#", "....", "....", "...."]);
        let near = Body::new(Vec2::new(98.5, 98.0), Vec2::splat(4.0));
        // Body spans pixels 98..102 horizontally; the opaque pixel is at 103.
        assert!(!touches_hazard(&near, [(&spike_rect, &spike_mask)]));
        let touching = Body::new(Vec2::new(100.0, 97.0), Vec2::splat(4.0));
        assert!(touches_hazard(&touching, [(&spike_rect, &spike_mask)]));
    }

    #[test]
    fn falling_below_bounds_is_detected() {
        let bounds = Aabb::from_xywh(0.0, 0.0, 960.0, 480.0);
        let body = body_at(0.0, 600.0, Vec2::ZERO);
        assert!(fell_out_of(&body, &bounds, 96.0));
        assert!(!fell_out_of(&body, &bounds, 200.0));
    }
}
