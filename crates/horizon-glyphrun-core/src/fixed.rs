//! Fixed-point numerics for glyph geometry.
//!
//! Glyph metrics, pen positions and bounding boxes are measured in
//! [`Subpixel`] units (26.6 fixed point, 1/64 of a pixel). Rotation matrices
//! are stored as 16.16 [`Fixed`] values. The two are distinct types so that a
//! subpixel coordinate can never be mistaken for a whole-pixel one: every
//! conversion to pixels goes through an explicit, named rounding method.
//!
//! Subpixel arithmetic saturates at the `i32` range instead of overflowing,
//! so a long string at a very large size clamps rather than wraps.
//!
//! # Example
//!
//! ```
//! use horizon_glyphrun_core::{Matrix, Subpixel, Vector};
//!
//! let pen = Vector::new(Subpixel::from_pixels(10), Subpixel::ZERO);
//! let rotated = pen.transform(&Matrix::rotation_degrees(90.0));
//!
//! assert_eq!(rotated.x.round_pixels(), 0);
//! assert_eq!(rotated.y.round_pixels(), 10);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of subpixel units in one pixel.
pub const SUBPIXELS_PER_PIXEL: i32 = 64;

/// A coordinate or distance in 1/64 pixel units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subpixel(i32);

impl Subpixel {
    /// Zero distance.
    pub const ZERO: Self = Self(0);

    /// Create a value from raw 26.6 units.
    #[inline]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Create a value from a whole number of pixels.
    #[inline]
    pub const fn from_pixels(pixels: i32) -> Self {
        Self(pixels.saturating_mul(SUBPIXELS_PER_PIXEL))
    }

    /// Create a value from fractional pixels, rounding to the nearest unit.
    #[inline]
    pub fn from_f64(pixels: f64) -> Self {
        Self((pixels * f64::from(SUBPIXELS_PER_PIXEL)).round() as i32)
    }

    /// The raw 26.6 value.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whole pixels, rounding toward negative infinity.
    #[inline]
    pub const fn floor_pixels(self) -> i32 {
        self.0.div_euclid(SUBPIXELS_PER_PIXEL)
    }

    /// Whole pixels, rounding toward positive infinity.
    #[inline]
    pub const fn ceil_pixels(self) -> i32 {
        -((-(self.0 as i64)).div_euclid(SUBPIXELS_PER_PIXEL as i64)) as i32
    }

    /// Whole pixels, truncating toward zero.
    #[inline]
    pub const fn trunc_pixels(self) -> i32 {
        self.0 / SUBPIXELS_PER_PIXEL
    }

    /// Whole pixels, rounding half away from zero.
    #[inline]
    pub fn round_pixels(self) -> i32 {
        (f64::from(self.0) / f64::from(SUBPIXELS_PER_PIXEL)).round() as i32
    }

    /// This value as fractional pixels.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / SUBPIXELS_PER_PIXEL as f32
    }

    /// Snap down to the pixel grid.
    #[inline]
    pub const fn floor(self) -> Self {
        Self::from_pixels(self.floor_pixels())
    }

    /// Snap up to the pixel grid.
    #[inline]
    pub const fn ceil(self) -> Self {
        Self::from_pixels(self.ceil_pixels())
    }

    /// Multiply by a 16.16 factor with rounding.
    #[inline]
    pub fn mul_fixed(self, factor: Fixed) -> Self {
        Self(mul_fix(self.0, factor.raw()))
    }
}

impl fmt::Display for Subpixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/64px", self.0)
    }
}

impl Add for Subpixel {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Subpixel {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Subpixel {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Subpixel {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Subpixel {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

/// A 16.16 fixed-point scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    /// 0.0
    pub const ZERO: Self = Self(0);
    /// 1.0
    pub const ONE: Self = Self(0x10000);

    /// Create a value from raw 16.16 units.
    #[inline]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Convert from floating point, truncating toward zero.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self((value * f64::from(0x10000)) as i32)
    }

    /// The raw 16.16 value.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

}

/// `a * b / 0x10000`, rounded to nearest with the sign applied afterwards.
#[inline]
fn mul_fix(a: i32, b: i32) -> i32 {
    let negative = (a < 0) != (b < 0);
    let product = i64::from(a).abs() * i64::from(b).abs();
    let magnitude = ((product + 0x8000) >> 16).min(i64::from(i32::MAX)) as i32;
    if negative { -magnitude } else { magnitude }
}

/// A 2D vector in subpixel units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: Subpixel,
    pub y: Subpixel,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Self = Self {
        x: Subpixel::ZERO,
        y: Subpixel::ZERO,
    };

    #[inline]
    pub const fn new(x: Subpixel, y: Subpixel) -> Self {
        Self { x, y }
    }

    /// Create a vector from raw 26.6 components.
    #[inline]
    pub const fn from_raw(x: i32, y: i32) -> Self {
        Self {
            x: Subpixel::new(x),
            y: Subpixel::new(y),
        }
    }

    /// Apply a 2x2 matrix: `(xx*x + xy*y, yx*x + yy*y)`.
    #[inline]
    pub fn transform(self, matrix: &Matrix) -> Self {
        Self {
            x: self.x.mul_fixed(matrix.xx) + self.y.mul_fixed(matrix.xy),
            y: self.x.mul_fixed(matrix.yx) + self.y.mul_fixed(matrix.yy),
        }
    }
}

impl Add for Vector {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// A 2x2 matrix with 16.16 entries.
///
/// ```text
/// | xx  xy |
/// | yx  yy |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    pub xx: Fixed,
    pub xy: Fixed,
    pub yx: Fixed,
    pub yy: Fixed,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        xx: Fixed::ONE,
        xy: Fixed::ZERO,
        yx: Fixed::ZERO,
        yy: Fixed::ONE,
    };

    /// Counter-clockwise rotation about the origin, `[[cos, -sin], [sin, cos]]`.
    pub fn rotation_degrees(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            xx: Fixed::from_f64(cos),
            xy: Fixed::from_f64(-sin),
            yx: Fixed::from_f64(sin),
            yy: Fixed::from_f64(cos),
        }
    }

    /// Check if this matrix leaves every vector unchanged.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_conversions_positive() {
        let v = Subpixel::new(130);
        assert_eq!(v.floor_pixels(), 2);
        assert_eq!(v.ceil_pixels(), 3);
        assert_eq!(v.trunc_pixels(), 2);
        assert_eq!(v.round_pixels(), 2);
    }

    #[test]
    fn test_pixel_conversions_negative() {
        let v = Subpixel::new(-130);
        assert_eq!(v.floor_pixels(), -3);
        assert_eq!(v.ceil_pixels(), -2);
        assert_eq!(v.trunc_pixels(), -2);
        assert_eq!(v.floor(), Subpixel::from_pixels(-3));
        assert_eq!(v.ceil(), Subpixel::from_pixels(-2));
    }

    #[test]
    fn test_exact_pixels_are_stable() {
        let v = Subpixel::from_pixels(-4);
        assert_eq!(v.floor_pixels(), -4);
        assert_eq!(v.ceil_pixels(), -4);
        assert_eq!(v.trunc_pixels(), -4);
    }

    #[test]
    fn test_mul_fix_rounds_symmetrically() {
        let half = Fixed::new(0x8000);
        assert_eq!(Subpixel::new(3).mul_fixed(half), Subpixel::new(2));
        assert_eq!(Subpixel::new(-3).mul_fixed(half), Subpixel::new(-2));
        assert_eq!(Subpixel::new(640).mul_fixed(Fixed::ONE), Subpixel::new(640));
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        assert!(Matrix::rotation_degrees(0.0).is_identity());
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let m = Matrix::rotation_degrees(90.0);
        let v = Vector::from_raw(640, 0).transform(&m);
        assert!(v.x.raw().abs() <= 1);
        assert_eq!(v.y.raw(), 640);

        let up = Vector::from_raw(0, 640).transform(&m);
        assert_eq!(up.x.raw(), -640);
        assert!(up.y.raw().abs() <= 1);
    }

    #[test]
    fn test_vector_add() {
        let mut pen = Vector::ZERO;
        pen += Vector::from_raw(64, 0);
        pen += Vector::from_raw(32, 0);
        assert_eq!(pen, Vector::from_raw(96, 0));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Subpixel::new(i32::MAX);
        let min = Subpixel::new(i32::MIN);
        assert_eq!(max + Subpixel::new(64), max);
        assert_eq!(min - Subpixel::new(64), min);
        assert_eq!(max - min, max);
        assert_eq!(-min, max);

        let mut pen = Vector::from_raw(i32::MAX - 10, 0);
        pen += Vector::from_raw(640, 0);
        assert_eq!(pen.x, max);
    }

    #[test]
    fn test_pixel_conversions_at_limits() {
        assert_eq!(Subpixel::new(i32::MIN).ceil_pixels(), i32::MIN / 64);
        assert_eq!(Subpixel::new(i32::MAX).ceil_pixels(), i32::MAX / 64 + 1);
        assert_eq!(Subpixel::from_pixels(i32::MAX), Subpixel::new(i32::MAX));
        assert_eq!(
            Subpixel::new(i32::MAX).mul_fixed(Fixed::new(0x20000)),
            Subpixel::new(i32::MAX)
        );
    }
}
