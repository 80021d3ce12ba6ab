//! Two-dimensional Euclidean vector.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// An immutable two-dimensional vector.
///
/// Scalar and vector operands use distinct operations: `v * 2.0` scales,
/// `v * w` multiplies component-wise, and scalar offsets go through
/// [`add_scalar`](Self::add_scalar) / [`sub_scalar`](Self::sub_scalar).
///
/// # Examples
///
/// ```
/// # use force_layout_wasm::geometry::Vector2;
/// let r = Vector2::new(3.0, 4.0);
/// assert_eq!(r.length(), 5.0);
/// assert_eq!(r.unit(), Vector2::new(0.6, 0.8));
/// assert_eq!(Vector2::ZERO.unit(), Vector2::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    x: f64,
    y: f64,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new vector with the specified components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x component.
    #[inline]
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y component.
    #[inline]
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns `true` if both components are exactly zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Euclidean length, without intermediate overflow or underflow.
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Squared Euclidean length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Returns the vector scaled to length 1.
    ///
    /// The zero vector has no direction and maps to itself, so callers never
    /// divide by zero.
    pub fn unit(self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / length, self.y / length)
    }

    /// Component-wise absolute value.
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Raises each component to `power`.
    pub fn powf(self, power: f64) -> Self {
        Self::new(self.x.powf(power), self.y.powf(power))
    }

    /// Multiplies both components by `factor`.
    #[inline]
    pub fn scale_by(self, factor: f64) -> Self {
        self * factor
    }

    /// Adds `value` to both components.
    #[inline]
    pub fn add_scalar(self, value: f64) -> Self {
        Self::new(self.x + value, self.y + value)
    }

    /// Subtracts `value` from both components.
    #[inline]
    pub fn sub_scalar(self, value: f64) -> Self {
        Self::new(self.x - value, self.y - value)
    }
}

impl Add for Vector2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Mul for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn div(self, divisor: f64) -> Self {
        Self::new(self.x / divisor, self.y / divisor)
    }
}

impl Div for Vector2 {
    type Output = Self;

    #[inline]
    fn div(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl From<(f64, f64)> for Vector2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.x.fract() == 0.0 && self.y.fract() == 0.0 {
            // `+ 0.0` turns -0.0 into 0.0
            write!(f, "<{:.0}, {:.0}>", self.x + 0.0, self.y + 0.0)
        } else {
            write!(f, "<{:.6}, {:.6}>", self.x, self.y)
        }
    }
}
