//! Viewer
//!
//! Application state of the keyframe animator: the scene, the camera and
//! selection, the keyframe list and playback. Every user command is a method
//! returning `Result`.

use crate::animator::{Animator, Playback, PlaybackOptions};
use crate::demo::DemoScene;
use crate::error::{AnimError, Result};
use crate::gesture::{Drag, Viewport};
use crate::keyframes::{Keyframe, KeyframeList};
use crate::manipulation::{SkyFrame, ViewerFrames};
use crate::parser::{format_keyframes, parse_keyframes};
use crate::scene_graph::{NodeId, NodeKind, SceneGraph};
use rigid::geometry::RigidTransform;

/// Application state.
#[derive(Clone, Debug)]
pub struct Viewer {
    /// The scene and its notable nodes.
    demo: DemoScene,

    /// Eye, selection and sky camera.
    frames: ViewerFrames,

    /// Nodes the scene can be viewed from, in cycling order.
    views: [NodeId; 3],

    /// Index into `views` of the current eye.
    view: usize,

    /// The keyframes.
    keyframes: KeyframeList,

    /// Playback state.
    animator: Animator,

    /// The window.
    pub viewport: Viewport,
}

impl Viewer {
    /// Create a viewer of the demo scene, looking from the sky camera with the
    /// first robot selected.
    ///
    /// * `options` - Playback speed settings.
    pub fn new(options: PlaybackOptions) -> Result<Self> {
        let demo = DemoScene::new()?;
        let views = [demo.robot1, demo.robot2, demo.sky];
        let frames = ViewerFrames {
            eye: demo.sky,
            object: demo.robot1,
            sky: demo.sky,
            sky_frame: SkyFrame::World,
        };
        Ok(Self {
            demo,
            frames,
            views,
            view: 2,
            keyframes: KeyframeList::new(),
            animator: Animator::new(options),
            viewport: Viewport::default(),
        })
    }

    /// Returns the scene graph.
    pub fn scene(&self) -> &SceneGraph {
        &self.demo.graph
    }

    /// Returns the demo scene.
    pub fn demo(&self) -> &DemoScene {
        &self.demo
    }

    /// Returns the eye, selection and sky camera.
    pub fn frames(&self) -> &ViewerFrames {
        &self.frames
    }

    /// Returns the keyframes.
    pub fn keyframes(&self) -> &KeyframeList {
        &self.keyframes
    }

    /// Returns the playback state.
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Returns `true` while an animation is playing.
    pub fn is_playing(&self) -> bool {
        self.animator.is_playing()
    }

    /// Returns the number of transform nodes, i.e. poses per keyframe.
    pub fn node_count(&self) -> usize {
        self.demo.graph.transform_nodes().len()
    }

    /// Sets the scene to the current keyframe and returns its index.
    pub fn copy_keyframe_to_scene(&mut self) -> Result<usize> {
        self.ensure_stopped()?;
        self.show_current_keyframe()
    }

    /// Copies the scene into the current keyframe and returns its index. On
    /// an empty list a new keyframe is created instead.
    pub fn update_keyframe(&mut self) -> Result<usize> {
        self.ensure_stopped()?;
        if self.keyframes.is_empty() {
            return self.new_keyframe();
        }
        self.keyframes.current_mut()?.update_from(&self.demo.graph)?;
        let i = self.cursor()?;
        info!("Copied scene to keyframe {}", i);
        Ok(i)
    }

    /// Inserts a copy of the scene after the current keyframe, makes it
    /// current and returns its index.
    pub fn new_keyframe(&mut self) -> Result<usize> {
        self.ensure_stopped()?;
        let i = self
            .keyframes
            .insert_after_current(Keyframe::capture(&self.demo.graph));
        info!("Created keyframe {} from scene", i);
        Ok(i)
    }

    /// Moves to the next keyframe and shows it.
    pub fn next_keyframe(&mut self) -> Result<usize> {
        self.ensure_stopped()?;
        self.keyframes.advance()?;
        self.show_current_keyframe()
    }

    /// Moves to the previous keyframe and shows it.
    pub fn previous_keyframe(&mut self) -> Result<usize> {
        self.ensure_stopped()?;
        self.keyframes.retreat()?;
        self.show_current_keyframe()
    }

    /// Deletes the current keyframe and shows the new current one, if any.
    pub fn delete_keyframe(&mut self) -> Result<Option<usize>> {
        self.ensure_stopped()?;
        let deleted = self.cursor()?;
        let cursor = self.keyframes.delete_current()?;
        info!("Deleted keyframe {}", deleted);
        if cursor.is_some() {
            self.show_current_keyframe()?;
        }
        Ok(cursor)
    }

    /// Replaces all keyframes with those parsed from text and shows the first
    /// one. Returns the number of keyframes read.
    ///
    /// * `text` - Keyframes in text form.
    pub fn import_keyframes(&mut self, text: &str) -> Result<usize> {
        self.ensure_stopped()?;
        let frames = parse_keyframes(text)?;
        let expected = self.node_count();
        if let Some(bad) = frames.iter().find(|f| f.len() != expected) {
            return Err(AnimError::NodeCountMismatch {
                expected,
                actual: bad.len(),
            });
        }

        let n = frames.len();
        self.keyframes.replace(frames);
        info!("Read {} keyframes", n);
        if n > 0 {
            self.show_current_keyframe()?;
        }
        Ok(n)
    }

    /// Returns all keyframes in text form.
    pub fn export_keyframes(&self) -> Result<String> {
        let text = format_keyframes(self.keyframes.frames(), self.node_count())?;
        info!("Wrote {} keyframes", self.keyframes.len());
        Ok(text)
    }

    /// Starts or stops playback and returns `true` if playing afterwards.
    /// Playback shows the second keyframe right away; stopping leaves the
    /// scene at the second to last keyframe.
    pub fn toggle_playback(&mut self) -> Result<bool> {
        if self.animator.is_playing() {
            self.animator.stop();
            self.rest_at_end()?;
            return Ok(false);
        }

        self.animator.start(self.keyframes.len())?;
        self.advance_playback(0)?;
        Ok(self.animator.is_playing())
    }

    /// Advances the playback clock and updates the scene.
    ///
    /// * `ms` - Milliseconds to advance the clock by.
    pub fn advance_playback(&mut self, ms: u64) -> Result<Playback> {
        let state = self.animator.advance(&self.keyframes, ms)?;
        match state {
            Playback::Frame(ref poses) => self.demo.graph.set_poses(poses)?,
            Playback::Finished(_) => self.rest_at_end()?,
        }
        Ok(state)
    }

    /// Shortens the time between keyframes; returns the new time in ms.
    pub fn faster(&mut self) -> u32 {
        self.animator.options.faster()
    }

    /// Lengthens the time between keyframes; returns the new time in ms.
    pub fn slower(&mut self) -> u32 {
        self.animator.options.slower()
    }

    /// Switches to the next viewpoint and returns it.
    pub fn cycle_view(&mut self) -> NodeId {
        self.view = (self.view + 1) % self.views.len();
        self.frames.eye = self.views[self.view];
        info!(
            "Viewing from {}",
            self.demo.graph.name(self.frames.eye).unwrap_or("?")
        );
        self.frames.eye
    }

    /// Switches the frame the sky camera moves itself in. Only possible when
    /// the sky camera is selected and viewed from.
    pub fn toggle_sky_frame(&mut self) -> Result<SkyFrame> {
        if self.frames.object != self.frames.sky || !self.frames.is_sky_view() {
            return Err(AnimError::InvalidManipulation(
                "the sky frame applies to the sky camera in the sky view",
            ));
        }
        self.frames.sky_frame = self.frames.sky_frame.toggled();
        info!("Sky camera moves w.r.t. {:?} frame", self.frames.sky_frame);
        Ok(self.frames.sky_frame)
    }

    /// Selects the transform node owning a picked node and returns it.
    /// Picking nothing, the world or the ground selects the eye.
    ///
    /// * `picked` - The picked node, if any.
    pub fn select(&mut self, picked: Option<NodeId>) -> Result<NodeId> {
        let mut node = picked;
        while let Some(id) = node {
            if let NodeKind::Transform(_) = self.demo.graph.kind(id)? {
                break;
            }
            node = self.demo.graph.parent(id)?;
        }

        self.frames.object = match node {
            Some(id) if id != self.demo.ground => id,
            _ => self.frames.eye,
        };
        info!(
            "Selected {}",
            self.demo.graph.name(self.frames.object).unwrap_or("?")
        );
        Ok(self.frames.object)
    }

    /// Applies a drag step to the selected node and returns its new pose.
    ///
    /// * `drag` - The drag step.
    pub fn drag(&mut self, drag: &Drag) -> Result<RigidTransform> {
        if !self.frames.is_valid_manipulation() {
            return Err(AnimError::InvalidManipulation(
                "the sky camera can only be moved from the sky view",
            ));
        }
        let graph = &self.demo.graph;
        let arcball = if self.frames.uses_arcball(graph)? {
            Some(self.viewport.arcball(&self.frames.arcball_center(graph)?))
        } else {
            None
        };
        let m = drag.motion(arcball.as_ref());
        self.frames.apply(&mut self.demo.graph, &m)
    }

    fn ensure_stopped(&self) -> Result<()> {
        if self.animator.is_playing() {
            Err(AnimError::Playing)
        } else {
            Ok(())
        }
    }

    fn cursor(&self) -> Result<usize> {
        self.keyframes.cursor().ok_or(AnimError::NoKeyframes)
    }

    fn show_current_keyframe(&mut self) -> Result<usize> {
        self.keyframes.current()?.apply_to(&mut self.demo.graph)?;
        let i = self.cursor()?;
        info!("Showing keyframe {}", i);
        Ok(i)
    }

    fn rest_at_end(&mut self) -> Result<()> {
        let last = self.keyframes.len().saturating_sub(2);
        self.keyframes.seek(last)?;
        self.show_current_keyframe()?;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
