//! Rigid Body Transformations

use super::{Matrix4x4, Quaternion, Vector3f, Vector4};
use crate::math::Float;
use std::fmt;
use std::ops::Mul;

/// Number of values in the flat `qw qx qy qz tx ty tz` record of a rigid
/// transform.
pub const SEPTUPLE_LEN: usize = 7;

/// A rotation followed by a translation, mapping local coordinates into the
/// parent frame: `p_parent = r * p_local + t`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RigidTransform {
    /// Translation component.
    t: Vector3f,

    /// Rotation component. Must be a unit quaternion.
    r: Quaternion,
}

impl RigidTransform {
    /// The identity transform.
    pub const IDENTITY: RigidTransform = RigidTransform {
        t: Vector3f {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
        r: Quaternion::IDENTITY,
    };

    /// Create a new rigid transform.
    ///
    /// * `t` - Translation.
    /// * `r` - Rotation.
    pub fn new(t: Vector3f, r: Quaternion) -> Self {
        Self { t, r }
    }

    /// Create a pure translation.
    ///
    /// * `t` - Translation.
    pub fn from_translation(t: Vector3f) -> Self {
        Self::new(t, Quaternion::IDENTITY)
    }

    /// Create a pure rotation.
    ///
    /// * `r` - Rotation.
    pub fn from_rotation(r: Quaternion) -> Self {
        Self::new(Vector3f::zero(), r)
    }

    /// Create a rigid transform from a flat `qw qx qy qz tx ty tz` record.
    ///
    /// * `s` - The record.
    pub fn from_septuple(s: &[Float; SEPTUPLE_LEN]) -> Self {
        Self::new(
            Vector3f::new(s[4], s[5], s[6]),
            Quaternion::from_wxyz(s[0], s[1], s[2], s[3]),
        )
    }

    /// Returns the flat `qw qx qy qz tx ty tz` record.
    pub fn to_septuple(&self) -> [Float; SEPTUPLE_LEN] {
        let [qw, qx, qy, qz] = self.r.to_wxyz();
        [qw, qx, qy, qz, self.t.x, self.t.y, self.t.z]
    }

    /// Returns the translation component.
    pub fn translation(&self) -> Vector3f {
        self.t
    }

    /// Returns the rotation component.
    pub fn rotation(&self) -> Quaternion {
        self.r
    }

    /// Replaces the translation component.
    ///
    /// * `t` - Translation.
    pub fn set_translation(&mut self, t: Vector3f) -> &mut Self {
        self.t = t;
        self
    }

    /// Replaces the rotation component.
    ///
    /// * `r` - Rotation.
    pub fn set_rotation(&mut self, r: Quaternion) -> &mut Self {
        self.r = r;
        self
    }

    /// Returns the inverse transform.
    pub fn inverse(&self) -> Self {
        let r_inv = self.r.inverse();
        Self::new(-r_inv.rotate(&self.t), r_inv)
    }

    /// Returns the translation factor with identity rotation.
    pub fn translation_only(&self) -> Self {
        Self::from_translation(self.t)
    }

    /// Returns the rotation factor with zero translation.
    pub fn rotation_only(&self) -> Self {
        Self::from_rotation(self.r)
    }

    /// Transforms a position.
    ///
    /// * `p` - The position.
    pub fn transform_point(&self, p: &Vector3f) -> Vector3f {
        (*self * Vector4::point(p)).xyz()
    }

    /// Transforms a direction; translation does not apply.
    ///
    /// * `v` - The direction.
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        (*self * Vector4::direction(v)).xyz()
    }

    /// Returns `true` if both transforms agree within `epsilon` in every
    /// translation component and represent the same rotation.
    ///
    /// * `other`   - The other transform.
    /// * `epsilon` - Tolerance.
    pub fn approx_eq(&self, other: &Self, epsilon: Float) -> bool {
        (0..3).all(|i| approx_eq!(Float, self.t[i], other.t[i], epsilon = epsilon))
            && self.r.same_rotation(&other.r, epsilon)
    }

    /// Returns `true` if the rotation component has unit length.
    pub fn is_well_formed(&self) -> bool {
        self.r.is_unit() && !self.t.has_nans()
    }
}

impl Default for RigidTransform {
    /// Returns the identity transform.
    fn default() -> Self {
        debug_assert!(Self::IDENTITY.is_well_formed());
        Self::IDENTITY
    }
}

impl Mul<RigidTransform> for RigidTransform {
    type Output = RigidTransform;

    /// Composes two transforms. `a * b` maps `b`'s local frame into `a`'s
    /// parent frame.
    ///
    /// * `b` - The right operand.
    fn mul(self, b: RigidTransform) -> Self::Output {
        Self::new(self.t + self.r.rotate(&b.t), self.r * b.r)
    }
}

impl Mul<Vector4> for RigidTransform {
    type Output = Vector4;

    /// Rotates a homogeneous coordinate, then adds the translation scaled by
    /// its weight.
    ///
    /// * `a` - The coordinate.
    fn mul(self, a: Vector4) -> Self::Output {
        self.r * a + Vector4::direction(&self.t) * a.w
    }
}

impl From<RigidTransform> for Matrix4x4 {
    /// Returns the 4x4 matrix of a rigid transform.
    ///
    /// * `tform` - The transform.
    fn from(tform: RigidTransform) -> Self {
        let mut m = Matrix4x4::from(tform.r);
        for i in 0..3 {
            m.m[i][3] = tform.t[i];
        }
        m
    }
}

impl fmt::Display for RigidTransform {
    /// Formats the value as the flat `qw qx qy qz tx ty tz` record.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_septuple();
        write!(
            f,
            "{} {} {} {} {} {} {}",
            s[0], s[1], s[2], s[3], s[4], s[5], s[6]
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector3;
    use proptest::prelude::*;

    const TOLERANCE: Float = 1e-9;

    #[test]
    fn default_is_identity() {
        let id = RigidTransform::default();
        assert_eq!(id.translation(), Vector3f::zero());
        assert_eq!(id.rotation(), Quaternion::IDENTITY);
        assert!(id.is_well_formed());
    }

    #[test]
    fn translation_applies_to_points_but_not_directions() {
        let t = RigidTransform::from_translation(Vector3f::new(1.0, 2.0, 3.0));
        let v = Vector3f::new(1.0, 1.0, 1.0);
        assert_eq!(t.transform_point(&v), Vector3f::new(2.0, 3.0, 4.0));
        assert_eq!(t.transform_vector(&v), v);
    }

    #[test]
    fn well_formed_needs_unit_rotation() {
        assert!(RigidTransform::IDENTITY.is_well_formed());
        let scaled = RigidTransform::from_rotation(Quaternion::from_wxyz(2.0, 0.0, 0.0, 0.0));
        assert!(!scaled.is_well_formed());
        let nan = RigidTransform::from_translation(Vector3f::new(Float::NAN, 0.0, 0.0));
        assert!(!nan.is_well_formed());
    }

    #[test]
    fn point_is_rotated_then_translated() {
        let t = RigidTransform::new(
            Vector3f::new(0.0, 0.0, 5.0),
            Quaternion::make_z_rotation(90.0),
        );
        let p = t.transform_point(&Vector3f::new(1.0, 0.0, 0.0));
        assert!(approx_eq!(Float, p.x, 0.0, epsilon = TOLERANCE));
        assert!(approx_eq!(Float, p.y, 1.0, epsilon = TOLERANCE));
        assert!(approx_eq!(Float, p.z, 5.0, epsilon = TOLERANCE));
    }

    #[test]
    fn factors_recompose() {
        let t = RigidTransform::new(
            Vector3f::new(1.0, -2.0, 0.5),
            Quaternion::make_y_rotation(30.0),
        );
        assert_eq!(t.translation_only().rotation(), Quaternion::IDENTITY);
        assert_eq!(t.rotation_only().translation(), Vector3f::zero());
        assert!((t.translation_only() * t.rotation_only()).approx_eq(&t, TOLERANCE));
    }

    #[test]
    fn setters_replace_components() {
        let mut t = RigidTransform::default();
        t.set_translation(Vector3f::new(1.0, 2.0, 3.0))
            .set_rotation(Quaternion::make_x_rotation(10.0));
        assert_eq!(t.translation(), Vector3f::new(1.0, 2.0, 3.0));
        assert_eq!(t.rotation(), Quaternion::make_x_rotation(10.0));
    }

    #[test]
    fn matrix_has_translation_column() {
        let t = RigidTransform::new(
            Vector3f::new(1.0, 2.0, 3.0),
            Quaternion::make_x_rotation(45.0),
        );
        let m = Matrix4x4::from(t);
        assert_eq!([m[0][3], m[1][3], m[2][3]], [1.0, 2.0, 3.0]);

        let p = Vector3f::new(0.5, -0.5, 2.0);
        let expected = t.transform_point(&p);
        let actual = (m * Vector4::point(&p)).xyz();
        for i in 0..3 {
            assert!(approx_eq!(Float, actual[i], expected[i], epsilon = TOLERANCE));
        }
    }

    #[test]
    fn septuple_order() {
        let t = RigidTransform::from_septuple(&[1.0, 0.0, 0.0, 0.0, 4.0, 5.0, 6.0]);
        assert_eq!(t.rotation(), Quaternion::IDENTITY);
        assert_eq!(t.translation(), Vector3f::new(4.0, 5.0, 6.0));
        assert_eq!(format!("{}", t), "1 0 0 0 4 5 6");
    }

    crate::prop_unit_quaternion!(unit_quaternion, -1.0..1.0f64, -180.0..180.0f64);
    crate::prop_rigid_transform!(rigid_transform, -10.0..10.0f64, unit_quaternion());

    proptest! {
        #[test]
        fn identity_laws(t in rigid_transform()) {
            let id = RigidTransform::default();
            prop_assert!((t * id).approx_eq(&t, TOLERANCE));
            prop_assert!((id * t).approx_eq(&t, TOLERANCE));
        }

        #[test]
        fn inverse_laws(t in rigid_transform()) {
            let id = RigidTransform::default();
            prop_assert!((t * t.inverse()).approx_eq(&id, TOLERANCE));
            prop_assert!((t.inverse() * t).approx_eq(&id, TOLERANCE));
        }

        #[test]
        fn composition_is_associative(
            a in rigid_transform(), b in rigid_transform(), c in rigid_transform()
        ) {
            prop_assert!(((a * b) * c).approx_eq(&(a * (b * c)), TOLERANCE));
        }

        #[test]
        fn composition_matches_sequential_application(
            a in rigid_transform(), b in rigid_transform(), x in -5.0..5.0f64
        ) {
            let p = Vector3::new(x, 1.0, -x);
            let lhs = (a * b).transform_point(&p);
            let rhs = a.transform_point(&b.transform_point(&p));
            for i in 0..3 {
                prop_assert!(approx_eq!(Float, lhs[i], rhs[i], epsilon = TOLERANCE));
            }
        }

        #[test]
        fn septuple_round_trip(t in rigid_transform()) {
            let s = t.to_septuple();
            prop_assert_eq!(RigidTransform::from_septuple(&s), t);

            // Through the textual form.
            let parsed: Vec<Float> = format!("{}", t)
                .split_whitespace()
                .map(|v| v.parse().unwrap())
                .collect();
            prop_assert_eq!(parsed.len(), SEPTUPLE_LEN);
            let mut s = [0.0; SEPTUPLE_LEN];
            s.copy_from_slice(&parsed);
            prop_assert!(RigidTransform::from_septuple(&s).approx_eq(&t, TOLERANCE));
        }
    }
}
