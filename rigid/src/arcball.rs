//! Arcball and screen-space helpers
//!
//! Screen coordinates have their origin at the bottom-left pixel with `y`
//! pointing up. Eye coordinates look down the negative z-axis.

use crate::geometry::{Matrix4x4, Quaternion, Vector3f, Vector4};
use crate::math::{max, Float, EPSILON, PI};

/// A point in window coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    /// Horizontal pixel coordinate.
    pub x: Float,

    /// Vertical pixel coordinate, increasing upwards.
    pub y: Float,
}

impl ScreenPoint {
    /// Create a new screen point.
    ///
    /// * `x` - Horizontal pixel coordinate.
    /// * `y` - Vertical pixel coordinate.
    pub fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }
}

/// Returns the height of a screen point above the screen plane when lifted
/// onto a sphere of the given radius. Points outside the sphere's silhouette
/// have height 0.
///
/// * `p`      - The screen point.
/// * `center` - Center of the sphere on screen.
/// * `radius` - Radius of the sphere in pixels.
pub fn arcball_z(p: &ScreenPoint, center: &ScreenPoint, radius: Float) -> Float {
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    max(0.0, radius * radius - dx * dx - dy * dy).sqrt()
}

/// Returns the rotation produced by dragging the mouse from `from` to `to`
/// over an arcball: `(0, v2) * inverse((0, v1))` where `v1` and `v2` are the
/// unit vectors from the sphere center to the lifted points. The rotation is
/// twice the angle between `v1` and `v2`.
///
/// * `center` - Center of the sphere on screen.
/// * `radius` - Radius of the sphere in pixels.
/// * `from`   - Screen point where the drag step started.
/// * `to`     - Screen point where the drag step ended.
pub fn arcball_rotation(
    center: &ScreenPoint,
    radius: Float,
    from: &ScreenPoint,
    to: &ScreenPoint,
) -> Quaternion {
    let lift = |p: &ScreenPoint| {
        Vector3f::new(p.x - center.x, p.y - center.y, arcball_z(p, center, radius))
    };

    let (v1, v2) = (lift(from), lift(to));
    if v1.length_squared() < EPSILON || v2.length_squared() < EPSILON {
        return Quaternion::IDENTITY;
    }

    Quaternion::new(v2.normalize(), 0.0) * Quaternion::new(v1.normalize(), 0.0).inverse()
}

/// Returns the number of eye-space units covered by one pixel at depth `z`.
/// Returns 1 for depths that are not in front of the eye.
///
/// * `z`             - Eye-space depth; must be negative.
/// * `fov_y`         - Vertical field of view in degrees.
/// * `screen_height` - Viewport height in pixels.
pub fn screen_to_eye_scale(z: Float, fov_y: Float, screen_height: u32) -> Float {
    if z > -EPSILON {
        warn!(
            "screen_to_eye_scale() of a point at depth {} near or behind z = 0; using 1",
            z
        );
        return 1.0;
    }
    -(z * (fov_y * PI / 360.0).tan()) * 2.0 / screen_height as Float
}

/// Returns the window coordinates of an eye-space point. Points near or
/// behind the z = 0 plane map to the screen center.
///
/// * `p`             - Eye-space position.
/// * `projection`    - Projection matrix.
/// * `screen_width`  - Viewport width in pixels.
/// * `screen_height` - Viewport height in pixels.
pub fn screen_space_coord(
    p: &Vector3f,
    projection: &Matrix4x4,
    screen_width: u32,
    screen_height: u32,
) -> ScreenPoint {
    let (w, h) = (screen_width as Float, screen_height as Float);
    if p.z > -EPSILON {
        warn!(
            "screen_space_coord() of a point near or behind z = 0; returning screen center"
        );
        return ScreenPoint::new((w - 1.0) / 2.0, (h - 1.0) / 2.0);
    }

    let q = *projection * Vector4::point(p);
    let clip = q.xyz() / q.w;
    ScreenPoint::new(
        clip.x * w / 2.0 + (w - 1.0) / 2.0,
        clip.y * h / 2.0 + (h - 1.0) / 2.0,
    )
}

/// Returns the vertical field of view that keeps the horizontal field of view
/// at least `min_fov` degrees.
///
/// * `min_fov`       - Minimum field of view in degrees.
/// * `screen_width`  - Viewport width in pixels.
/// * `screen_height` - Viewport height in pixels.
pub fn frust_fov_y(min_fov: Float, screen_width: u32, screen_height: u32) -> Float {
    if screen_width >= screen_height {
        return min_fov;
    }
    let rad_per_deg = 0.5 * PI / 180.0;
    let aspect_inv = screen_height as Float / screen_width as Float;
    ((min_fov * rad_per_deg).sin() * aspect_inv).atan2((min_fov * rad_per_deg).cos()) / rad_per_deg
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dot;
    use proptest::prelude::*;

    #[test]
    fn arcball_z_is_radius_at_center_and_zero_outside() {
        let c = ScreenPoint::new(100.0, 100.0);
        assert_eq!(arcball_z(&c, &c, 50.0), 50.0);
        assert_eq!(arcball_z(&ScreenPoint::new(100.0, 200.0), &c, 50.0), 0.0);
        assert!(approx_eq!(
            Float,
            arcball_z(&ScreenPoint::new(130.0, 140.0), &c, 50.0),
            0.0,
            epsilon = 1e-12
        ));
    }

    #[test]
    fn no_drag_is_no_rotation() {
        let c = ScreenPoint::new(320.0, 240.0);
        let p = ScreenPoint::new(330.0, 250.0);
        let q = arcball_rotation(&c, 120.0, &p, &p);
        assert!(q.same_rotation(&Quaternion::IDENTITY, 1e-9));
    }

    #[test]
    fn horizontal_drag_rotates_about_y() {
        let c = ScreenPoint::new(0.0, 0.0);
        let q = arcball_rotation(&c, 100.0, &c, &ScreenPoint::new(10.0, 0.0));
        assert!(q.is_unit());
        assert!(approx_eq!(Float, q.v.x, 0.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, q.v.z, 0.0, epsilon = 1e-12));
        // Dragging right turns the front of the sphere to the right.
        let front = q.rotate(&Vector3f::new(0.0, 0.0, 1.0));
        assert!(front.x > 0.0);
    }

    #[test]
    fn screen_to_eye_scale_grows_with_depth() {
        let near = screen_to_eye_scale(-1.0, 60.0, 480);
        let far = screen_to_eye_scale(-4.0, 60.0, 480);
        assert!(approx_eq!(Float, far, 4.0 * near, epsilon = 1e-12));
        assert!(approx_eq!(
            Float,
            near,
            2.0 * (PI / 6.0).tan() / 480.0,
            epsilon = 1e-12
        ));
        assert_eq!(screen_to_eye_scale(0.5, 60.0, 480), 1.0);
    }

    #[test]
    fn point_on_axis_projects_to_screen_center() {
        let proj = Matrix4x4::projection(60.0, 640.0 / 480.0, -0.1, -50.0);
        let c = screen_space_coord(&Vector3f::new(0.0, 0.0, -4.0), &proj, 640, 480);
        assert!(approx_eq!(Float, c.x, 319.5, epsilon = 1e-9));
        assert!(approx_eq!(Float, c.y, 239.5, epsilon = 1e-9));

        let behind = screen_space_coord(&Vector3f::new(1.0, 1.0, 1.0), &proj, 640, 480);
        assert_eq!(behind, ScreenPoint::new(319.5, 239.5));
    }

    #[test]
    fn point_up_and_right_projects_up_and_right() {
        let proj = Matrix4x4::projection(60.0, 1.0, -0.1, -50.0);
        let c = screen_space_coord(&Vector3f::new(1.0, 1.0, -4.0), &proj, 512, 512);
        assert!(c.x > 255.5);
        assert!(c.y > 255.5);
    }

    #[test]
    fn fov_is_widened_for_portrait_viewports() {
        assert_eq!(frust_fov_y(60.0, 640, 480), 60.0);
        assert!(frust_fov_y(60.0, 480, 640) > 60.0);
        assert!(approx_eq!(
            Float,
            frust_fov_y(60.0, 500, 500),
            60.0,
            epsilon = 1e-12
        ));
    }

    proptest! {
        #[test]
        fn arcball_rotation_is_unit(
            fx in -200.0..200.0f64, fy in -200.0..200.0f64,
            tx in -200.0..200.0f64, ty in -200.0..200.0f64,
        ) {
            let c = ScreenPoint::new(0.0, 0.0);
            let q = arcball_rotation(
                &c, 100.0, &ScreenPoint::new(fx, fy), &ScreenPoint::new(tx, ty),
            );
            prop_assert!(q.is_unit());
        }

        #[test]
        fn arcball_rotation_axis_is_perpendicular_to_lifted_points(
            fx in -50.0..50.0f64, fy in -50.0..50.0f64,
        ) {
            let c = ScreenPoint::new(0.0, 0.0);
            let from = ScreenPoint::new(fx, fy);
            let to = ScreenPoint::new(0.0, 0.0);
            let q = arcball_rotation(&c, 100.0, &from, &to);
            let v = Vector3f::new(fx, fy, arcball_z(&from, &c, 100.0));
            prop_assert!(approx_eq!(Float, q.v.dot(&v), 0.0, epsilon = 1e-6));
        }
    }
}
