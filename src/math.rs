
//! Simple math utilities.

use std::ops::Mul;


/// Simple two-dimensional vector of any numerical type.
/// Supports only few mathematical operations, as this is mostly used as a data struct.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Vec2<T>(pub T, pub T);

impl<T> Vec2<T> {

    /// The first component of this 2D vector.
    #[inline] pub fn x(self) -> T { self.0 }

    /// The second component of this 2D vector.
    #[inline] pub fn y(self) -> T { self.1 }

    /// The product of the two components, the area of a rectangle with these dimensions.
    #[inline] pub fn area(self) -> T where T: Mul<T, Output = T> { self.0 * self.1 }
}

impl<T> From<(T, T)> for Vec2<T> {
    fn from((x, y): (T, T)) -> Self { Vec2(x, y) }
}


/// Whether to round up or down when dividing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RoundingMode {
    /// Divide and discard the remainder.
    Down,

    /// Divide and round up when there is a remainder.
    Up,
}

impl RoundingMode {

    /// Divide the two positive numbers, rounding according to this mode.
    pub fn divide(self, dividend: usize, divisor: usize) -> usize {
        match self {
            RoundingMode::Up => (dividend + divisor - 1) / divisor, // only works for positive numbers
            RoundingMode::Down => dividend / divisor,
        }
    }
}


/// Integer division rounding towards negative infinity,
/// such that `mod_p(x, y)` is always positive.
pub(crate) fn div_p(x: i32, y: i32) -> i32 {
    if x >= 0 {
        if y >= 0 { x / y }
        else { -(x / -y) }
    }
    else {
        if y >= 0 { -((y - 1 - x) / y) }
        else { (-y - 1 - x) / -y }
    }
}

/// The always-positive remainder of `div_p`.
pub(crate) fn mod_p(x: i32, y: i32) -> i32 {
    x - y * div_p(x, y)
}

/// How many of the coordinates in `[min, max]` are sampled
/// with the given subsampling factor. This is the canonical sample count rule:
/// a coordinate is sampled iff it is divisible by the factor,
/// which matters when `min` is not aligned to the subsampling grid.
pub(crate) fn subsampled_count(sampling: usize, min: i32, max: i32) -> usize {
    let sampling = usize_as_positive_i32(sampling);
    let first = div_p(min, sampling);
    let last = div_p(max, sampling);
    let count = last - first + if first * sampling == min { 1 } else { 0 };

    debug_assert!(count >= 0, "invalid sample range");
    count as usize
}

fn usize_as_positive_i32(value: usize) -> i32 {
    debug_assert!(value > 0 && value <= i32::MAX as usize, "invalid sampling factor");
    value as i32
}
