//! Quaternions

use super::{matrix4x4, Dot, Matrix4x4, Vector3f, Vector4};
use crate::math::{Float, EPSILON, EPSILON_SQUARED, PI};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Below this value of `sin(θ/2)` the rotation axis of a quaternion is
/// considered ill-conditioned and `power()` blends linearly instead.
const POWER_LINEAR_THRESHOLD: Float = 1e-6;

/// A quaternion. Unit quaternions represent rotations; `q` and `-q`
/// represent the same rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quaternion {
    /// The `x`, `y`, `z` components represented as a vector.
    pub v: Vector3f,

    /// The real component `w`.
    pub w: Float,
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        v: Vector3f {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
        w: 1.0,
    };

    /// Create a new quaternion.
    ///
    /// * `v` - The `x`, `y`, `z` components represented as a vector.
    /// * `w` - The real component `w`.
    pub fn new(v: Vector3f, w: Float) -> Self {
        Self { v, w }
    }

    /// Create a new quaternion from components in `w`, `x`, `y`, `z` order.
    ///
    /// * `w` - The real component.
    /// * `x` - First imaginary component.
    /// * `y` - Second imaginary component.
    /// * `z` - Third imaginary component.
    pub fn from_wxyz(w: Float, x: Float, y: Float, z: Float) -> Self {
        Self::new(Vector3f::new(x, y, z), w)
    }

    /// Returns the components in `w`, `x`, `y`, `z` order.
    pub fn to_wxyz(&self) -> [Float; 4] {
        [self.w, self.v.x, self.v.y, self.v.z]
    }

    /// Returns a unit quaternion representing a rotation about an axis.
    ///
    /// * `axis`  - The rotation axis. Need not be normalized.
    /// * `theta` - Angle in degrees.
    pub fn from_axis_angle(axis: &Vector3f, theta: Float) -> Self {
        let half = theta.to_radians() * 0.5;
        Self::new(axis.normalize() * half.sin(), half.cos())
    }

    /// Returns a rotation about the x-axis.
    ///
    /// * `theta` - Angle in degrees.
    pub fn make_x_rotation(theta: Float) -> Self {
        let half = theta * 0.5 * PI / 180.0;
        Self::from_wxyz(half.cos(), half.sin(), 0.0, 0.0)
    }

    /// Returns a rotation about the y-axis.
    ///
    /// * `theta` - Angle in degrees.
    pub fn make_y_rotation(theta: Float) -> Self {
        let half = theta * 0.5 * PI / 180.0;
        Self::from_wxyz(half.cos(), 0.0, half.sin(), 0.0)
    }

    /// Returns a rotation about the z-axis.
    ///
    /// * `theta` - Angle in degrees.
    pub fn make_z_rotation(theta: Float) -> Self {
        let half = theta * 0.5 * PI / 180.0;
        Self::from_wxyz(half.cos(), 0.0, 0.0, half.sin())
    }

    /// Returns the square of the length of the quaternion which is the
    /// inner product with itself.
    pub fn length_squared(&self) -> Float {
        self.dot(self)
    }

    /// Returns the length of the quaternion which is square root of the inner
    /// product with itself.
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    /// Normalizes the quaternion by dividing each component by its length.
    pub fn normalize(&self) -> Self {
        *self / self.length()
    }

    /// Returns `true` if the quaternion has unit length within tolerance.
    pub fn is_unit(&self) -> bool {
        approx_eq!(Float, self.length_squared(), 1.0, epsilon = 1e-6)
    }

    /// Returns the conjugate which negates the imaginary part.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.v, self.w)
    }

    /// Returns the multiplicative inverse; the conjugate divided by the
    /// squared norm. For unit quaternions this equals the conjugate.
    pub fn inverse(&self) -> Self {
        let n = self.length_squared();
        debug_assert!(n > EPSILON_SQUARED, "cannot invert a zero quaternion");
        self.conjugate() / n
    }

    /// Returns the quaternion negated if its real part is negative so that
    /// interpolation from the identity follows the shorter arc.
    pub fn cn(&self) -> Self {
        if self.w < 0.0 {
            -*self
        } else {
            *self
        }
    }

    /// Returns the rotation that is the fraction `t` of this rotation,
    /// i.e. `exp(t * log(q))`.
    ///
    /// Requires a unit quaternion. Near the identity the rotation axis is
    /// ill-conditioned, so the result is a renormalized linear blend from
    /// the identity instead.
    ///
    /// * `t` - The exponent.
    pub fn power(&self, t: Float) -> Self {
        debug_assert!(self.is_unit(), "power() requires a unit quaternion");

        let sin_half = self.v.length();
        if sin_half < POWER_LINEAR_THRESHOLD {
            let one = if self.w < 0.0 {
                -Self::IDENTITY
            } else {
                Self::IDENTITY
            };
            return (one * (1.0 - t) + *self * t).normalize();
        }

        let half = sin_half.atan2(self.w);
        let axis = self.v / sin_half;
        let half_t = half * t;
        Self::new(axis * half_t.sin(), half_t.cos())
    }

    /// Interpolate between this and another quaternion using spherical linear
    /// interpolation along the shorter arc. `t = 0` returns `self` and `t = 1`
    /// returns `q` exactly.
    ///
    /// * `t` - The interpolation parameter.
    /// * `q` - The other quaternion.
    pub fn slerp(&self, t: Float, q: Self) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return q;
        }
        (q * self.inverse()).cn().power(t) * *self
    }

    /// Rotates a vector.
    ///
    /// * `v` - The vector.
    pub fn rotate(&self, v: &Vector3f) -> Vector3f {
        (*self * Self::new(*v, 0.0) * self.inverse()).v
    }

    /// Returns the rotation angle in degrees in [0, 360).
    pub fn angle(&self) -> Float {
        (2.0 * self.v.length().atan2(self.w)).to_degrees()
    }

    /// Returns `true` if both quaternions represent the same rotation within
    /// `epsilon`.
    ///
    /// * `other`   - The other quaternion.
    /// * `epsilon` - Tolerance on the components.
    pub fn same_rotation(&self, other: &Self, epsilon: Float) -> bool {
        let close = |a: &Self, b: &Self| {
            a.to_wxyz()
                .iter()
                .zip(b.to_wxyz().iter())
                .all(|(x, y)| approx_eq!(Float, *x, *y, epsilon = epsilon))
        };
        close(self, other) || close(self, &-*other)
    }
}

impl Default for Quaternion {
    /// Returns the identity quaternion [1, 0, 0, 0].
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Quaternion {
    /// Formats the value in `w`, `x`, `y`, `z` order.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.w, self.v.x, self.v.y, self.v.z)
    }
}

impl From<Quaternion> for Matrix4x4 {
    /// Returns the rotation matrix of a unit quaternion.
    ///
    /// * `q` - The quaternion.
    #[rustfmt::skip]
    fn from(q: Quaternion) -> Matrix4x4 {
        let xx = q.v.x * q.v.x;
        let yy = q.v.y * q.v.y;
        let zz = q.v.z * q.v.z;
        let xy = q.v.x * q.v.y;
        let xz = q.v.x * q.v.z;
        let yz = q.v.y * q.v.z;
        let wx = q.v.x * q.w;
        let wy = q.v.y * q.w;
        let wz = q.v.z * q.w;

        matrix4x4(
            1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz),       2.0 * (xz + wy),       0.0,
            2.0 * (xy + wz),       1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx),       0.0,
            2.0 * (xz - wy),       2.0 * (yz + wx),       1.0 - 2.0 * (xx + yy), 0.0,
            0.0,                   0.0,                   0.0,                   1.0,
        )
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;

    /// Adds the components of the given quaternion.
    ///
    /// * `other` - The quaternion to add.
    fn add(self, other: Self) -> Self::Output {
        Self::Output::new(self.v + other.v, self.w + other.w)
    }
}

impl Sub<Quaternion> for Quaternion {
    type Output = Self;

    /// Subtracts the components of the given quaternion.
    ///
    /// * `other` - The quaternion to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.v - other.v, self.w - other.w)
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;

    /// Returns the Hamilton product. The rotation `self * other` applies
    /// `other` first, then `self`.
    ///
    /// * `other` - The right operand.
    fn mul(self, other: Self) -> Self::Output {
        Self::new(
            other.v * self.w + self.v * other.w + self.v.cross(&other.v),
            self.w * other.w - self.v.dot(&other.v),
        )
    }
}

impl Mul<Vector4> for Quaternion {
    type Output = Vector4;

    /// Rotates the `x`, `y`, `z` part of a homogeneous coordinate and keeps
    /// its weight.
    ///
    /// * `a` - The coordinate.
    fn mul(self, a: Vector4) -> Self::Output {
        let r = self.rotate(&a.xyz());
        Vector4::new(r.x, r.y, r.z, a.w)
    }
}

impl Mul<Float> for Quaternion {
    type Output = Self;

    /// Scales the components of the given quaternion.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self::Output::new(f * self.v, f * self.w)
    }
}

impl Mul<Quaternion> for Float {
    type Output = Quaternion;

    /// Scales the components of the given quaternion.
    ///
    /// * `q` - The quaternion to scale.
    fn mul(self, q: Quaternion) -> Self::Output {
        Self::Output::new(self * q.v, self * q.w)
    }
}

impl Div<Float> for Quaternion {
    type Output = Self;

    /// Scales the components of the given quaternion by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f.abs() > EPSILON_SQUARED);
        Self::Output::new(self.v / f, self.w / f)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    /// Scales the components by -1.
    fn neg(self) -> Self::Output {
        Self::Output::new(-self.v, -self.w)
    }
}

impl Dot<Quaternion> for Quaternion {
    type Output = Float;

    /// Returns the inner product with another quaternion.
    ///
    /// * `other` - The other quaternion.
    fn dot(&self, other: &Quaternion) -> Float {
        self.v.dot(&other.v) + self.w * other.w
    }
}

/// Returns `true` if the rotation part of `q` is within `EPSILON` of the
/// identity.
pub fn is_identity_rotation(q: &Quaternion) -> bool {
    q.same_rotation(&Quaternion::IDENTITY, EPSILON)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
