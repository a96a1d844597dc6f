//! 3-D Vectors

use super::common::*;
use crate::math::Float;
use num_traits::Num;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

/// A 3-D vector. Used for translations, rotation axes and eye-space
/// positions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D vector containing `Float` values.
pub type Vector3f = Vector3<Float>;

impl<T: Num + Copy> Vector3<T> {
    /// Creates a new 3-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D zero vector.
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> T {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the cross product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl<T: num_traits::Float> Vector3<T> {
    /// Returns true if any coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the vector's length.
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// The function will panic in debug builds if the vector has zero
    /// length.
    pub fn normalize(&self) -> Self {
        let l = self.length();
        debug_assert!(l > T::zero(), "cannot normalize a zero length vector");
        *self / l
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Vector3<T>> for Vector3<T> {
    type Output = T;

    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    fn dot(&self, other: &Vector3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

/// Implements a component-wise binary operator between two vectors.
macro_rules! componentwise {
    ($tr: ident, $f: ident, $op: tt) => {
        impl<T: Num + Copy> $tr for Vector3<T> {
            type Output = Self;

            fn $f(self, other: Self) -> Self {
                Self::new(self.x $op other.x, self.y $op other.y, self.z $op other.z)
            }
        }
    };
}

componentwise!(Add, add, +);
componentwise!(Sub, sub, -);

impl<T: Num + Copy> Mul<T> for Vector3<T> {
    type Output = Self;

    /// Scale the vector.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self {
        Self::new(self.x * f, self.y * f, self.z * f)
    }
}

impl Mul<Vector3f> for Float {
    type Output = Vector3f;

    /// Scale the vector.
    ///
    /// * `v` - The vector.
    fn mul(self, v: Vector3f) -> Vector3f {
        v * self
    }
}

impl<T: Num + Copy> Div<T> for Vector3<T> {
    type Output = Self;

    /// Scale the vector by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: T) -> Self {
        debug_assert!(!f.is_zero());
        Self::new(self.x / f, self.y / f, self.z / f)
    }
}

impl<T: Num + Copy + Neg<Output = T>> Neg for Vector3<T> {
    type Output = Self;

    /// Flip the vector's direction.
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T> Index<usize> for Vector3<T> {
    type Output = T;

    /// Returns the coordinate along an axis.
    ///
    /// * `axis` - 0, 1 or 2 for x, y and z.
    fn index(&self, axis: usize) -> &T {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis {} for Vector3<T>", axis),
        }
    }
}

impl<T: Copy> From<[T; 3]> for Vector3<T> {
    /// Convert `[x, y, z]` into a vector.
    ///
    /// * `a` - The coordinates.
    fn from([x, y, z]: [T; 3]) -> Self {
        Self { x, y, z }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
