//! Frame Algebra

use super::RigidTransform;

/// Returns the frame located at the origin of `o` but oriented like `e`.
///
/// Rotations expressed in this frame turn an object about its own center
/// along the axes of the eye.
///
/// * `o` - Frame supplying the position.
/// * `e` - Frame supplying the orientation.
pub fn mixed_frame(o: &RigidTransform, e: &RigidTransform) -> RigidTransform {
    o.translation_only() * e.rotation_only()
}

/// Applies the motion `m`, expressed in the coordinates of frame `a`, to the
/// pose `o`: `a * m * inv(a) * o`.
///
/// * `a` - Reference frame of the motion.
/// * `m` - Incremental motion.
/// * `o` - Pose to move.
pub fn apply_motion_relative_to(
    a: &RigidTransform,
    m: &RigidTransform,
    o: &RigidTransform,
) -> RigidTransform {
    *a * *m * a.inverse() * *o
}

/// Returns the motion that moves a viewpoint so that the scene appears to
/// move by `m`: translation kept, rotation reversed.
///
/// * `m` - Incremental motion as computed for an object.
pub fn ego_motion(m: &RigidTransform) -> RigidTransform {
    m.translation_only() * m.rotation_only().inverse()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
