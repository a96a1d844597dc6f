//! Keyframes

use crate::error::{AnimError, Result};
use crate::scene_graph::SceneGraph;
use rigid::geometry::RigidTransform;
use std::ops::Index;

/// Number of consecutive keyframes a Catmull-Rom segment needs.
pub const WINDOW_LEN: usize = 4;

/// A snapshot of the poses of all transform nodes of a scene, in the
/// pre-order of `SceneGraph::transform_nodes()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keyframe {
    poses: Vec<RigidTransform>,
}

impl Keyframe {
    /// Create a keyframe from poses.
    ///
    /// * `poses` - One pose per transform node.
    pub fn new(poses: Vec<RigidTransform>) -> Self {
        Self { poses }
    }

    /// Returns a keyframe with `n` identity poses.
    ///
    /// * `n` - Number of transform nodes.
    pub fn identity(n: usize) -> Self {
        Self::new(vec![RigidTransform::default(); n])
    }

    /// Returns the current poses of a scene.
    ///
    /// * `scene` - The scene graph.
    pub fn capture(scene: &SceneGraph) -> Self {
        Self::new(scene.poses())
    }

    /// Overwrites the poses with those of a scene.
    ///
    /// * `scene` - The scene graph.
    pub fn update_from(&mut self, scene: &SceneGraph) -> Result<()> {
        let poses = scene.poses();
        if poses.len() != self.poses.len() {
            return Err(AnimError::NodeCountMismatch {
                expected: poses.len(),
                actual: self.poses.len(),
            });
        }
        self.poses = poses;
        Ok(())
    }

    /// Sets the poses of a scene to this keyframe.
    ///
    /// * `scene` - The scene graph.
    pub fn apply_to(&self, scene: &mut SceneGraph) -> Result<()> {
        scene.set_poses(&self.poses)
    }

    /// Returns the number of poses.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Returns `true` if there are no poses.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Returns the poses.
    pub fn poses(&self) -> &[RigidTransform] {
        &self.poses
    }
}

impl Index<usize> for Keyframe {
    type Output = RigidTransform;

    fn index(&self, i: usize) -> &Self::Output {
        &self.poses[i]
    }
}

/// An ordered list of keyframes with a cursor designating the current one.
/// The cursor is defined if and only if the list is not empty.
#[derive(Clone, Debug, Default)]
pub struct KeyframeList {
    frames: Vec<Keyframe>,
    cursor: Option<usize>,
}

impl KeyframeList {
    /// Returns an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keyframes.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if there are no keyframes.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the index of the current keyframe.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns all keyframes in order.
    pub fn frames(&self) -> &[Keyframe] {
        &self.frames
    }

    /// Returns the current keyframe.
    pub fn current(&self) -> Result<&Keyframe> {
        self.cursor
            .map(|i| &self.frames[i])
            .ok_or(AnimError::NoKeyframes)
    }

    /// Returns the current keyframe for modification.
    pub fn current_mut(&mut self) -> Result<&mut Keyframe> {
        match self.cursor {
            Some(i) => Ok(&mut self.frames[i]),
            None => Err(AnimError::NoKeyframes),
        }
    }

    /// Inserts a keyframe right after the current one and makes it current.
    /// On an empty list it becomes the first keyframe. Returns its index.
    ///
    /// * `frame` - The keyframe.
    pub fn insert_after_current(&mut self, frame: Keyframe) -> usize {
        let i = self.cursor.map_or(0, |c| c + 1);
        self.frames.insert(i, frame);
        self.cursor = Some(i);
        i
    }

    /// Removes the current keyframe. The predecessor becomes current, or the
    /// successor if the first keyframe was removed. Returns the new cursor.
    pub fn delete_current(&mut self) -> Result<Option<usize>> {
        let i = self.cursor.ok_or(AnimError::NoKeyframes)?;
        self.frames.remove(i);
        self.cursor = if self.frames.is_empty() {
            None
        } else if i == 0 {
            Some(0)
        } else {
            Some(i - 1)
        };
        Ok(self.cursor)
    }

    /// Moves the cursor to the next keyframe.
    pub fn advance(&mut self) -> Result<usize> {
        let i = self.cursor.ok_or(AnimError::NoKeyframes)?;
        if i + 1 >= self.frames.len() {
            return Err(AnimError::AtLastKeyframe);
        }
        self.cursor = Some(i + 1);
        Ok(i + 1)
    }

    /// Moves the cursor to the previous keyframe.
    pub fn retreat(&mut self) -> Result<usize> {
        let i = self.cursor.ok_or(AnimError::NoKeyframes)?;
        if i == 0 {
            return Err(AnimError::AtFirstKeyframe);
        }
        self.cursor = Some(i - 1);
        Ok(i - 1)
    }

    /// Moves the cursor to the given keyframe.
    ///
    /// * `i` - Keyframe index.
    pub fn seek(&mut self, i: usize) -> Result<()> {
        if i >= self.frames.len() {
            return Err(AnimError::KeyframeOutOfRange {
                index: i,
                len: self.frames.len(),
            });
        }
        self.cursor = Some(i);
        Ok(())
    }

    /// Removes all keyframes.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.cursor = None;
    }

    /// Replaces all keyframes. The cursor moves to the first keyframe.
    ///
    /// * `frames` - The new keyframes.
    pub fn replace(&mut self, frames: Vec<Keyframe>) {
        self.cursor = if frames.is_empty() { None } else { Some(0) };
        self.frames = frames;
    }

    /// Returns the four consecutive keyframes starting at `i`.
    ///
    /// * `i` - Index of the first keyframe.
    pub fn window(&self, i: usize) -> Result<[&Keyframe; WINDOW_LEN]> {
        if i + WINDOW_LEN > self.frames.len() {
            return Err(AnimError::KeyframeOutOfRange {
                index: i + WINDOW_LEN - 1,
                len: self.frames.len(),
            });
        }
        let f = &self.frames;
        Ok([&f[i], &f[i + 1], &f[i + 2], &f[i + 3]])
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
