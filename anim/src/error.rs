//! Errors

use thiserror::Error;

/// Errors reported by scene, keyframe and playback commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimError {
    /// The keyframe list is empty.
    #[error("no keyframes defined")]
    NoKeyframes,

    /// The cursor cannot move before the first keyframe.
    #[error("already at the first keyframe")]
    AtFirstKeyframe,

    /// The cursor cannot move past the last keyframe.
    #[error("already at the last keyframe")]
    AtLastKeyframe,

    /// A keyframe index does not exist.
    #[error("keyframe {index} out of range for {len} keyframes")]
    KeyframeOutOfRange { index: usize, len: usize },

    /// Playback needs more keyframes.
    #[error("at least {required} keyframes are needed to play an animation, found {found}")]
    TooFewKeyframes { required: usize, found: usize },

    /// Keyframe editing is locked during playback.
    #[error("command not available while the animation is playing")]
    Playing,

    /// Playback commands need a running animation.
    #[error("no animation is playing")]
    NotPlaying,

    /// A keyframe does not match the scene's transform nodes.
    #[error("keyframe has {actual} poses but the scene has {expected} transform nodes")]
    NodeCountMismatch { expected: usize, actual: usize },

    /// The keyframe text could not be parsed.
    #[error("keyframe parse error: {0}")]
    Parse(String),

    /// The selected node cannot be moved from the current view.
    #[error("invalid manipulation: {0}")]
    InvalidManipulation(&'static str),

    /// A node id does not belong to the scene graph.
    #[error("unknown node {0}")]
    UnknownNode(usize),

    /// No node has the given name.
    #[error("no node named '{0}'")]
    NodeNotFound(String),

    /// Shape nodes are leaves.
    #[error("node {0} cannot have children")]
    LeafNode(usize),

    /// A node has no pose.
    #[error("node {0} is not a transform node")]
    NotATransform(usize),
}

/// A specialized Result type for animation commands.
pub type Result<T> = std::result::Result<T, AnimError>;
