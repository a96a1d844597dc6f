//! Homogeneous 4-D Coordinates

use super::Vector3f;
use crate::math::Float;
use std::ops::{Add, Index, Mul, Sub};

/// A homogeneous coordinate. Positions carry `w = 1` and directions carry
/// `w = 0` so that translations only move positions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector4 {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,

    /// Homogeneous weight.
    pub w: Float,
}

impl Vector4 {
    /// Creates a new homogeneous coordinate.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    /// * `w` - Homogeneous weight.
    pub fn new(x: Float, y: Float, z: Float, w: Float) -> Self {
        Self { x, y, z, w }
    }

    /// Returns the homogeneous coordinate of a position.
    ///
    /// * `p` - The position.
    pub fn point(p: &Vector3f) -> Self {
        Self::new(p.x, p.y, p.z, 1.0)
    }

    /// Returns the homogeneous coordinate of a direction.
    ///
    /// * `v` - The direction.
    pub fn direction(v: &Vector3f) -> Self {
        Self::new(v.x, v.y, v.z, 0.0)
    }

    /// Returns the `x`, `y`, `z` components, dropping the weight.
    pub fn xyz(&self) -> Vector3f {
        Vector3f::new(self.x, self.y, self.z)
    }
}

impl Add for Vector4 {
    type Output = Self;

    /// Adds the given coordinate component-wise.
    ///
    /// * `other` - The coordinate to add.
    fn add(self, other: Self) -> Self::Output {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl Sub for Vector4 {
    type Output = Self;

    /// Subtracts the given coordinate component-wise.
    ///
    /// * `other` - The coordinate to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl Mul<Float> for Vector4 {
    type Output = Self;

    /// Scales all four components.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self::new(self.x * f, self.y * f, self.z * f, self.w * f)
    }
}

impl Index<usize> for Vector4 {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Invalid index for Vector4"),
        }
    }
}
