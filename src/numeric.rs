//! Numeric conversion helpers used across the project.
//!
//! Pixel masks live on an integer grid while bodies and tiles move in `f32`
//! space. These helpers make the crossing explicit and clamp instead of
//! wrapping when a value falls outside the target domain.

/// Floor the value and clamp it into the `i32` domain.
///
/// Non-finite input maps to `0`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn floor_to_i32(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let floored = f64::from(value).floor();
    let clamped = floored.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

/// Round a non-negative pixel extent to a `usize`, saturating at zero.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Negative and non-finite extents are rejected before casting."
)]
#[must_use]
pub fn extent_to_usize(value: f32) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as usize
}

/// Convert a `usize` pixel count to `f32`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Pixel counts stay far below 2^24."
)]
#[must_use]
pub fn usize_to_f32(value: usize) -> f32 {
    value as f32
}

/// Convert a `u32` grid coordinate to `f32`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Grid coordinates stay far below 2^24."
)]
#[must_use]
pub fn u32_to_f32(value: u32) -> f32 {
    value as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::positive(3.7, 3)]
    #[case::negative(-0.5, -1)]
    #[case::exact(-2.0, -2)]
    #[case::nan(f32::NAN, 0)]
    #[case::huge(1e20, i32::MAX)]
    fn floors_into_i32(#[case] input: f32, #[case] expected: i32) {
        assert_eq!(floor_to_i32(input), expected);
    }

    #[rstest]
    #[case::rounds(95.6, 96)]
    #[case::negative(-3.0, 0)]
    #[case::infinite(f32::INFINITY, 0)]
    fn extents_saturate(#[case] input: f32, #[case] expected: usize) {
        assert_eq!(extent_to_usize(input), expected);
    }
}
