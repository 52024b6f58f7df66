//! Per-pixel collision masks.
//!
//! Hazards and item pickups use a transparency-aware overlap test rather than
//! the rectangle test used for solid tiles. A [`Mask`] is a row-major bitmap
//! where `true` marks an opaque pixel.

use glam::{IVec2, Vec2};

use crate::numeric::extent_to_usize;

/// Row-major opacity bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Mask {
    /// A fully opaque mask.
    #[must_use]
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width * height],
        }
    }

    /// A fully opaque mask covering `size` pixels, rounded to whole pixels.
    #[must_use]
    pub fn full_for(size: Vec2) -> Self {
        Self::full(extent_to_usize(size.x), extent_to_usize(size.y))
    }

    /// Parses authored rows where `#`, `x` or `X` mark opaque pixels.
    ///
    /// The width is that of the longest row; shorter rows are padded with
    /// transparent pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilehop::mask::Mask;
    ///
    /// let spikes = Mask::from_rows(&["..#..", ".###.", "#####"]);
    /// assert_eq!(spikes.width(), 5);
    /// assert_eq!(spikes.opaque_count(), 9);
    /// ```
    #[must_use]
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let height = rows.len();
        let mut bits = vec![false; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.as_ref().chars().enumerate() {
                if matches!(ch, '#' | 'x' | 'X') {
                    if let Some(bit) = bits.get_mut(y * width + x) {
                        *bit = true;
                    }
                }
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of opaque pixels.
    #[must_use]
    pub fn opaque_count(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    /// Opacity at `(x, y)`; out-of-range coordinates are transparent.
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> bool {
        let (Ok(ux), Ok(uy)) = (usize::try_from(x), usize::try_from(y)) else {
            return false;
        };
        if ux >= self.width || uy >= self.height {
            return false;
        }
        self.bits.get(uy * self.width + ux).copied().unwrap_or(false)
    }

    /// Nearest-neighbour rescale to `width` × `height`.
    #[must_use]
    pub fn scaled(&self, width: usize, height: usize) -> Self {
        if self.width == 0 || self.height == 0 {
            return Self {
                width,
                height,
                bits: vec![false; width * height],
            };
        }
        let mut bits = Vec::with_capacity(width * height);
        for y in 0..height {
            let src_y = y * self.height / height.max(1);
            for x in 0..width {
                let src_x = x * self.width / width.max(1);
                bits.push(
                    self.bits
                        .get(src_y * self.width + src_x)
                        .copied()
                        .unwrap_or(false),
                );
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Whether any opaque pixel of `other`, placed at `offset` relative to
    /// this mask's top-left corner, lands on an opaque pixel of this mask.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::IVec2;
    /// use tilehop::mask::Mask;
    ///
    /// let body = Mask::full(4, 4);
    /// let tip = Mask::from_rows(&["...#"]);
    /// assert!(body.overlaps(&tip, IVec2::new(0, 3)));
    /// assert!(!body.overlaps(&tip, IVec2::new(1, 3)));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self, offset: IVec2) -> bool {
        let (ox, oy) = (i64::from(offset.x), i64::from(offset.y));
        let (self_w, self_h) = (to_i64(self.width), to_i64(self.height));
        let (other_w, other_h) = (to_i64(other.width), to_i64(other.height));

        let x_start = ox.max(0);
        let x_end = (ox + other_w).min(self_w);
        let y_start = oy.max(0);
        let y_end = (oy + other_h).min(self_h);
        if x_start >= x_end || y_start >= y_end {
            return false;
        }

        (y_start..y_end).any(|y| {
            (x_start..x_end).any(|x| self.get(x, y) && other.get(x - ox, y - oy))
        })
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn rows_are_padded_to_the_widest() {
        let mask = Mask::from_rows(&["#", "###"]);
        assert_eq!((mask.width(), mask.height()), (3, 2));
        assert!(mask.get(0, 0));
        assert!(!mask.get(2, 0));
        assert!(mask.get(2, 1));
    }

    #[test]
    fn out_of_range_reads_are_transparent() {
        let mask = Mask::full(2, 2);
        assert!(!mask.get(-1, 0));
        assert!(!mask.get(0, 2));
    }

    #[rstest]
    #[case::inside(IVec2::new(1, 1), true)]
    #[case::edge_adjacent(IVec2::new(4, 0), false)]
    #[case::corner_pixel(IVec2::new(-3, -3), true)]
    #[case::far_away(IVec2::new(-10, 0), false)]
    fn full_masks_overlap_like_rectangles(#[case] offset: IVec2, #[case] expected: bool) {
        let a = Mask::full(4, 4);
        let b = Mask::full(4, 4);
        assert_eq!(a.overlaps(&b, offset), expected);
    }

    #[test]
    fn transparent_pixels_do_not_collide() {
        let spikes = Mask::from_rows(&["#...", "....", "....", "...."]);
        let body = Mask::full(2, 2);
        // Body covers the bottom-right quadrant of the spike tile only.
        assert!(!spikes.overlaps(&body, IVec2::new(2, 2)));
        assert!(spikes.overlaps(&body, IVec2::new(-1, -1)));
    }

    #[test]
    fn scaling_preserves_shape() {
        let mask = Mask::from_rows(&["#.", ".#"]);
        let big = mask.scaled(4, 4);
        assert_eq!(big.opaque_count(), 8);
        assert!(big.get(1, 1));
        assert!(!big.get(2, 1));
        assert!(big.get(3, 3));
    }
}
