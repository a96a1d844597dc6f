//! Manipulation
//!
//! Decides in which frame a mouse motion is applied to the selected node and
//! applies it.

use crate::error::{AnimError, Result};
use crate::scene_graph::{NodeId, SceneGraph};
use rigid::geometry::{apply_motion_relative_to, ego_motion, mixed_frame, RigidTransform, Vector3f};
use rigid::math::EPSILON;

/// Frame used when the sky camera moves itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkyFrame {
    /// Rotate about the world origin along the sky camera's axes.
    World,

    /// Move the sky camera in its own frame.
    Sky,
}

impl SkyFrame {
    /// Returns the other frame.
    pub fn toggled(&self) -> Self {
        match self {
            Self::World => Self::Sky,
            Self::Sky => Self::World,
        }
    }
}

/// The camera, the selected node and the sky camera of a scene.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ViewerFrames {
    /// Node the scene is viewed from.
    pub eye: NodeId,

    /// Node being manipulated.
    pub object: NodeId,

    /// The free camera.
    pub sky: NodeId,

    /// Frame for sky camera self-motion.
    pub sky_frame: SkyFrame,
}

impl ViewerFrames {
    /// Returns `true` if the scene is viewed from the sky camera.
    pub fn is_sky_view(&self) -> bool {
        self.eye == self.sky
    }

    /// Returns `true` if the selected node may be moved from the current view.
    /// The sky camera can only be moved from its own view.
    pub fn is_valid_manipulation(&self) -> bool {
        self.object != self.sky || self.is_sky_view()
    }

    /// Returns the world frame of the eye.
    ///
    /// * `scene` - The scene graph.
    pub fn eye_pose(&self, scene: &SceneGraph) -> Result<RigidTransform> {
        scene.path_pose(self.eye, 0)
    }

    /// Returns the world frame the arcball is centered on: the selected node,
    /// or the world origin when the sky camera is selected.
    ///
    /// * `scene` - The scene graph.
    pub fn arcball_frame(&self, scene: &SceneGraph) -> Result<RigidTransform> {
        if self.object != self.sky {
            scene.path_pose(self.object, 0)
        } else {
            Ok(RigidTransform::default())
        }
    }

    /// Returns the eye-space position of the arcball center.
    ///
    /// * `scene` - The scene graph.
    pub fn arcball_center(&self, scene: &SceneGraph) -> Result<Vector3f> {
        let eye = self.eye_pose(scene)?;
        Ok((eye.inverse() * self.arcball_frame(scene)?).translation())
    }

    /// Returns `true` if drags should go through the arcball. The arcball
    /// must be in front of the eye, and either a node other than the eye is
    /// selected or the sky camera orbits the world origin.
    ///
    /// * `scene` - The scene graph.
    pub fn uses_arcball(&self, scene: &SceneGraph) -> Result<bool> {
        if self.arcball_center(scene)?.z > -EPSILON {
            return Ok(false);
        }
        if self.object != self.sky {
            return Ok(self.object != self.eye);
        }
        Ok(self.is_sky_view() && self.sky_frame == SkyFrame::World)
    }

    /// Returns the frame, relative to the parent of the selected node, that
    /// motions are expressed in.
    ///
    /// For a node other than the sky camera this is the node's origin with
    /// the eye's orientation. For the sky camera it is the world origin with
    /// the camera's orientation in world-sky mode and the camera's own frame
    /// in sky-sky mode.
    ///
    /// * `scene` - The scene graph.
    pub fn aux_frame(&self, scene: &SceneGraph) -> Result<RigidTransform> {
        let parent = scene.path_pose(self.object, 1)?.inverse();
        let object = scene.path_pose(self.object, 0)?;
        if self.object != self.sky {
            return Ok(parent * mixed_frame(&object, &self.eye_pose(scene)?));
        }
        Ok(match self.sky_frame {
            SkyFrame::World => parent * object.rotation_only(),
            SkyFrame::Sky => parent * object,
        })
    }

    /// Applies an incremental motion to the selected node and returns its
    /// new pose. When the eye moves itself the rotation is reversed so that
    /// the view turns the way the mouse moves.
    ///
    /// * `scene` - The scene graph.
    /// * `m`     - The incremental motion.
    pub fn apply(&self, scene: &mut SceneGraph, m: &RigidTransform) -> Result<RigidTransform> {
        if !self.is_valid_manipulation() {
            return Err(AnimError::InvalidManipulation(
                "the sky camera can only be moved from the sky view",
            ));
        }

        let pose = scene
            .pose(self.object)
            .ok_or(AnimError::NotATransform(self.object.index()))?;
        let aux = self.aux_frame(scene)?;

        let motion = if self.object != self.sky {
            if self.object != self.eye {
                *m
            } else {
                ego_motion(m)
            }
        } else {
            match self.sky_frame {
                SkyFrame::World => m.inverse(),
                SkyFrame::Sky => ego_motion(m),
            }
        };

        let new_pose = apply_motion_relative_to(&aux, &motion, &pose);
        scene.set_pose(self.object, new_pose)?;
        debug!("Moved node {} to {}", self.object, new_pose);
        Ok(new_pose)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rigid::geometry::{Dot, Quaternion};
    use rigid::math::Float;

    const TOLERANCE: Float = 1e-9;

    struct Fixture {
        scene: SceneGraph,
        sky: NodeId,
        robot: NodeId,
        arm: NodeId,
    }

    fn fixture() -> Fixture {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let sky = scene
            .add_transform(
                root,
                "sky",
                RigidTransform::from_translation(Vector3f::new(0.0, 0.25, 4.0)),
            )
            .unwrap();
        let robot = scene
            .add_transform(
                root,
                "robot",
                RigidTransform::new(Vector3f::new(-2.0, 1.0, 0.0), Quaternion::make_y_rotation(30.0)),
            )
            .unwrap();
        let arm = scene
            .add_transform(
                robot,
                "arm",
                RigidTransform::from_translation(Vector3f::new(0.5, 0.75, 0.0)),
            )
            .unwrap();
        Fixture {
            scene,
            sky,
            robot,
            arm,
        }
    }

    fn frames(f: &Fixture, eye: NodeId, object: NodeId) -> ViewerFrames {
        ViewerFrames {
            eye,
            object,
            sky: f.sky,
            sky_frame: SkyFrame::World,
        }
    }

    fn assert_close(a: Vector3f, b: Vector3f) {
        for i in 0..3 {
            assert!(
                approx_eq!(Float, a[i], b[i], epsilon = TOLERANCE),
                "{:?} != {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn sky_only_moves_from_sky_view() {
        let mut f = fixture();
        let v = frames(&f, f.robot, f.sky);
        assert!(!v.is_valid_manipulation());
        assert!(matches!(
            v.apply(&mut f.scene, &RigidTransform::default()),
            Err(AnimError::InvalidManipulation(_))
        ));
        assert!(frames(&f, f.sky, f.sky).is_valid_manipulation());
        assert!(frames(&f, f.robot, f.arm).is_valid_manipulation());
    }

    #[test]
    fn arcball_selection() {
        let f = fixture();
        assert!(frames(&f, f.sky, f.robot).uses_arcball(&f.scene).unwrap());
        // The eye moving itself never uses the arcball.
        assert!(!frames(&f, f.robot, f.robot).uses_arcball(&f.scene).unwrap());
        // The sky camera orbits the world origin in world-sky mode only.
        let mut v = frames(&f, f.sky, f.sky);
        assert!(v.uses_arcball(&f.scene).unwrap());
        v.sky_frame = SkyFrame::Sky;
        assert!(!v.uses_arcball(&f.scene).unwrap());
    }

    #[test]
    fn arcball_behind_eye_is_not_used() {
        let mut f = fixture();
        f.scene
            .set_pose(
                f.sky,
                RigidTransform::from_translation(Vector3f::new(-2.0, 1.0, -4.0)),
            )
            .unwrap();
        assert!(!frames(&f, f.sky, f.robot).uses_arcball(&f.scene).unwrap());
    }

    #[test]
    fn identity_motion_leaves_pose() {
        let mut f = fixture();
        let before = f.scene.pose(f.arm).unwrap();
        let after = frames(&f, f.sky, f.arm)
            .apply(&mut f.scene, &RigidTransform::default())
            .unwrap();
        assert!(after.approx_eq(&before, TOLERANCE));
    }

    #[test]
    fn rotating_a_nested_node_keeps_its_world_position() {
        let mut f = fixture();
        let before = f.scene.path_pose(f.arm, 0).unwrap().translation();
        let m = RigidTransform::from_rotation(Quaternion::make_x_rotation(25.0));
        frames(&f, f.sky, f.arm).apply(&mut f.scene, &m).unwrap();
        let after = f.scene.path_pose(f.arm, 0).unwrap();
        assert_close(after.translation(), before);
        assert!(!after.rotation().same_rotation(&Quaternion::make_y_rotation(30.0), 1e-6));
    }

    #[test]
    fn translation_is_along_eye_axes() {
        let mut f = fixture();
        let before = f.scene.path_pose(f.arm, 0).unwrap().translation();
        let m = RigidTransform::from_translation(Vector3f::new(1.0, 0.0, 0.0));
        frames(&f, f.sky, f.arm).apply(&mut f.scene, &m).unwrap();
        let after = f.scene.path_pose(f.arm, 0).unwrap().translation();
        // The sky camera is not rotated so eye x is world x.
        assert_close(after, before + Vector3f::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn eye_rotates_opposite_to_objects() {
        let mut f = fixture();
        let m = RigidTransform::from_rotation(Quaternion::make_y_rotation(10.0));
        let axis = Vector3f::new(0.0, 1.0, 0.0);

        let mut object_scene = f.scene.clone();
        let object = frames(&f, f.sky, f.robot)
            .apply(&mut object_scene, &m)
            .unwrap();
        let ego = frames(&f, f.robot, f.robot).apply(&mut f.scene, &m).unwrap();

        let start = Quaternion::make_y_rotation(30.0);
        let object_delta = object.rotation() * start.inverse();
        let ego_delta = ego.rotation() * start.inverse();
        assert!(object_delta.v.dot(&axis) > 0.0);
        assert!(ego_delta.v.dot(&axis) < 0.0);
    }

    #[test]
    fn sky_translation_depends_on_sky_frame() {
        let mut f = fixture();
        let m = RigidTransform::from_translation(Vector3f::new(1.0, 0.0, 0.0));

        let mut world = f.scene.clone();
        frames(&f, f.sky, f.sky).apply(&mut world, &m).unwrap();
        assert_close(
            world.pose(f.sky).unwrap().translation(),
            Vector3f::new(-1.0, 0.25, 4.0),
        );

        let mut v = frames(&f, f.sky, f.sky);
        v.sky_frame = SkyFrame::Sky;
        v.apply(&mut f.scene, &m).unwrap();
        assert_close(
            f.scene.pose(f.sky).unwrap().translation(),
            Vector3f::new(1.0, 0.25, 4.0),
        );
    }

    #[test]
    fn sky_orbits_world_origin() {
        let mut f = fixture();
        let m = RigidTransform::from_rotation(Quaternion::make_y_rotation(90.0));
        frames(&f, f.sky, f.sky).apply(&mut f.scene, &m).unwrap();
        let p = f.scene.pose(f.sky).unwrap().translation();
        // Distance to the y-axis is preserved.
        assert!(approx_eq!(Float, p.x * p.x + p.z * p.z, 16.0, epsilon = TOLERANCE));
        assert!(approx_eq!(Float, p.y, 0.25, epsilon = TOLERANCE));
        assert!(approx_eq!(Float, p.x, -4.0, epsilon = TOLERANCE));
    }

    #[test]
    fn sky_frame_toggles() {
        assert_eq!(SkyFrame::World.toggled(), SkyFrame::Sky);
        assert_eq!(SkyFrame::Sky.toggled(), SkyFrame::World);
    }
}
