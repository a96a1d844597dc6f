//! Mouse Gestures
//!
//! Converts mouse drags into incremental motions expressed in the frame the
//! motion is applied in.

use rigid::arcball::{
    arcball_rotation, frust_fov_y, screen_space_coord, screen_to_eye_scale, ScreenPoint,
};
use rigid::geometry::{Matrix4x4, Quaternion, RigidTransform, Vector3f};
use rigid::math::{min, Float};

/// Default viewport width in pixels.
pub const DEFAULT_WIDTH: u32 = 512;

/// Default viewport height in pixels.
pub const DEFAULT_HEIGHT: u32 = 512;

/// Smallest field of view in degrees in either direction.
pub const MIN_FOV: Float = 60.0;

/// Z value of the near clipping plane.
pub const FRUST_NEAR: Float = -0.1;

/// Z value of the far clipping plane.
pub const FRUST_FAR: Float = -50.0;

/// Arcball radius as a fraction of the smaller viewport side.
pub const ARCBALL_RADIUS_FRACTION: Float = 0.25;

/// Eye-space units per pixel when no arcball is shown.
pub const PLAIN_TRANSLATION_SCALE: Float = 0.01;

/// The window the scene is viewed through.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Create a viewport. Zero sizes are raised to 1 pixel.
    ///
    /// * `width`  - Width in pixels.
    /// * `height` - Height in pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Changes the size of the viewport.
    ///
    /// * `width`  - Width in pixels.
    /// * `height` - Height in pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
        debug!(
            "Viewport is now {}x{}, vertical fov {}",
            self.width,
            self.height,
            self.fov_y()
        );
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the vertical field of view in degrees.
    pub fn fov_y(&self) -> Float {
        frust_fov_y(MIN_FOV, self.width, self.height)
    }

    /// Returns the projection matrix.
    pub fn projection(&self) -> Matrix4x4 {
        Matrix4x4::projection(
            self.fov_y(),
            self.width as Float / self.height as Float,
            FRUST_NEAR,
            FRUST_FAR,
        )
    }

    /// Returns the arcball radius in pixels.
    pub fn arcball_radius(&self) -> Float {
        ARCBALL_RADIUS_FRACTION * min(self.width, self.height) as Float
    }

    /// Returns the on-screen arcball for a sphere centered at an eye-space
    /// position in front of the eye.
    ///
    /// * `center` - Eye-space center of the arcball.
    pub fn arcball(&self, center: &Vector3f) -> Arcball {
        Arcball {
            center: screen_space_coord(center, &self.projection(), self.width, self.height),
            radius: self.arcball_radius(),
            scale: screen_to_eye_scale(center.z, self.fov_y(), self.height),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// An arcball as seen on screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arcball {
    /// Screen position of the center.
    pub center: ScreenPoint,

    /// Radius in pixels.
    pub radius: Float,

    /// Eye-space units per pixel at the depth of the center.
    pub scale: Float,
}

/// What a drag does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragKind {
    /// Left button.
    Rotate,

    /// Right button; moves in the screen plane.
    Translate,

    /// Middle button or left and right together; moves along the view axis.
    Dolly,
}

/// One step of a mouse drag in window coordinates (origin bottom-left).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Drag {
    /// What the drag does.
    pub kind: DragKind,

    /// Mouse position at the previous step.
    pub from: ScreenPoint,

    /// Current mouse position.
    pub to: ScreenPoint,
}

impl Drag {
    /// Create a drag step.
    ///
    /// * `kind` - What the drag does.
    /// * `from` - Mouse position at the previous step.
    /// * `to`   - Current mouse position.
    pub fn new(kind: DragKind, from: ScreenPoint, to: ScreenPoint) -> Self {
        Self { kind, from, to }
    }

    /// Returns the incremental motion of this drag step. With an arcball,
    /// rotations follow the sphere and translations are scaled so that the
    /// arcball center tracks the mouse; without one, each pixel rotates by
    /// one degree and translates by `PLAIN_TRANSLATION_SCALE`.
    ///
    /// * `arcball` - The arcball if one is active.
    pub fn motion(&self, arcball: Option<&Arcball>) -> RigidTransform {
        let dx = self.to.x - self.from.x;
        let dy = self.to.y - self.from.y;
        let scale = arcball.map_or(PLAIN_TRANSLATION_SCALE, |a| a.scale);

        match self.kind {
            DragKind::Rotate => RigidTransform::from_rotation(match arcball {
                Some(a) => arcball_rotation(&a.center, a.radius, &self.from, &self.to),
                None => Quaternion::make_x_rotation(-dy) * Quaternion::make_y_rotation(dx),
            }),
            DragKind::Translate => {
                RigidTransform::from_translation(Vector3f::new(dx, dy, 0.0) * scale)
            }
            DragKind::Dolly => RigidTransform::from_translation(Vector3f::new(0.0, 0.0, -dy) * scale),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
