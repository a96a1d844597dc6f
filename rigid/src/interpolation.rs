//! Interpolation of rigid transforms
//!
//! Translations are interpolated in Euclidean space and rotations along
//! great arcs of the unit quaternion sphere.

use crate::geometry::{Quaternion, RigidTransform, Vector3f};
use crate::math::{abs, lerp as lerp_float, Float, EPSILON};

/// Exponent used to build Bézier control rotations from neighbouring
/// keyframes. The translation counterpart is the `1/6` in
/// `c1 + (c2 - c0) / 6`.
const CONTROL_POINT_WEIGHT: Float = 1.0 / 6.0;

/// Linearly interpolates between two rigid transforms. Translations are
/// blended affinely; rotations are interpolated with SLERP along the shorter
/// arc. `t = 0` returns `a` and `t = 1` returns `b` exactly.
///
/// * `a` - Transform at `t = 0`.
/// * `b` - Transform at `t = 1`.
/// * `t` - Interpolation parameter in [0, 1].
pub fn lerp(a: &RigidTransform, b: &RigidTransform, t: Float) -> RigidTransform {
    if t == 0.0 {
        return *a;
    }
    if t == 1.0 {
        return *b;
    }

    RigidTransform::new(
        lerp_float(t, a.translation(), b.translation()),
        a.rotation().slerp(t, b.rotation()),
    )
}

/// Interpolates between `c1` and `c2` with a Catmull-Rom spline, using `c0`
/// and `c3` to shape the tangents at the two ends.
///
/// The spline is evaluated as the equivalent cubic Bézier curve. For
/// rotations the control points are built with quaternion powers and the
/// curve is evaluated with repeated SLERP (de Casteljau). Values of `t` within
/// `EPSILON` of 0 or 1 return `c1` or `c2` exactly.
///
/// * `c0` - Keyframe before `c1`.
/// * `c1` - Transform at `t = 0`.
/// * `c2` - Transform at `t = 1`.
/// * `c3` - Keyframe after `c2`.
/// * `t`  - Interpolation parameter in [0, 1].
pub fn catmull_rom(
    c0: &RigidTransform,
    c1: &RigidTransform,
    c2: &RigidTransform,
    c3: &RigidTransform,
    t: Float,
) -> RigidTransform {
    if abs(t) < EPSILON {
        return *c1;
    }
    if abs(t - 1.0) < EPSILON {
        return *c2;
    }

    RigidTransform::new(
        catmull_rom_translation(
            c0.translation(),
            c1.translation(),
            c2.translation(),
            c3.translation(),
            t,
        ),
        catmull_rom_rotation(
            c0.rotation(),
            c1.rotation(),
            c2.rotation(),
            c3.rotation(),
            t,
        ),
    )
}

/// Evaluates the Bézier form of a Catmull-Rom segment on translations.
fn catmull_rom_translation(
    c0: Vector3f,
    c1: Vector3f,
    c2: Vector3f,
    c3: Vector3f,
    t: Float,
) -> Vector3f {
    let d = c1 + (c2 - c0) * CONTROL_POINT_WEIGHT;
    let e = c2 + (c1 - c3) * CONTROL_POINT_WEIGHT;

    let s = 1.0 - t;
    c1 * (s * s * s) + d * (3.0 * t * s * s) + e * (3.0 * t * t * s) + c2 * (t * t * t)
}

/// Evaluates the Bézier form of a Catmull-Rom segment on rotations.
fn catmull_rom_rotation(
    c0: Quaternion,
    c1: Quaternion,
    c2: Quaternion,
    c3: Quaternion,
    t: Float,
) -> Quaternion {
    let d = (c2 * c0.inverse()).cn().power(CONTROL_POINT_WEIGHT) * c1;
    let e = (c1 * c3.inverse()).cn().power(CONTROL_POINT_WEIGHT) * c2;

    let p01 = c1.slerp(t, d);
    let p12 = d.slerp(t, e);
    let p23 = e.slerp(t, c2);

    let p012 = p01.slerp(t, p12);
    let p123 = p12.slerp(t, p23);

    p012.slerp(t, p123)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
