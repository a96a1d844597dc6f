//! Scene Graph
//!
//! Nodes live in an arena owned by `SceneGraph` and are addressed by
//! `NodeId`. Only transform nodes carry a pose; the root and shape nodes are
//! fixed.

use crate::error::{AnimError, Result};
use rigid::geometry::{RigidTransform, Vector3f};
use std::fmt;

/// Handle of a node in a `SceneGraph`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of the node.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece of geometry attached to its parent frame. Rendering is done
/// elsewhere; only the placement is kept here.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Offset of the shape's center in the parent frame.
    pub offset: Vector3f,

    /// Non-uniform scale of the unit geometry.
    pub scale: Vector3f,
}

impl Shape {
    /// Create a new shape.
    ///
    /// * `offset` - Offset of the shape's center in the parent frame.
    /// * `scale`  - Non-uniform scale of the unit geometry.
    pub fn new(offset: Vector3f, scale: Vector3f) -> Self {
        Self { offset, scale }
    }
}

/// The kinds of scene graph nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The world frame.
    Root,

    /// A frame with a pose relative to its parent.
    Transform(RigidTransform),

    /// Geometry; always a leaf.
    Shape(Shape),
}

#[derive(Clone, Debug)]
struct Node {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A tree of frames rooted at the world frame.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// Returns a scene graph containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: String::from("world"),
                kind: NodeKind::Root,
                parent: None,
                children: vec![],
            }],
        }
    }

    /// Returns the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph only has a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Adds a node under `parent` and returns its id.
    ///
    /// * `parent` - Parent node; must not be a shape.
    /// * `name`   - Node name.
    /// * `kind`   - Node kind.
    pub fn add_child(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> Result<NodeId> {
        let node = self.node(parent)?;
        if let NodeKind::Shape(_) = node.kind {
            return Err(AnimError::LeafNode(parent.0));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: String::from(name),
            kind,
            parent: Some(parent),
            children: vec![],
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Adds a transform node.
    ///
    /// * `parent` - Parent node.
    /// * `name`   - Node name.
    /// * `pose`   - Initial pose relative to the parent.
    pub fn add_transform(
        &mut self,
        parent: NodeId,
        name: &str,
        pose: RigidTransform,
    ) -> Result<NodeId> {
        self.add_child(parent, name, NodeKind::Transform(pose))
    }

    /// Adds a shape node.
    ///
    /// * `parent` - Parent node.
    /// * `name`   - Node name.
    /// * `shape`  - The shape.
    pub fn add_shape(&mut self, parent: NodeId, name: &str, shape: Shape) -> Result<NodeId> {
        self.add_child(parent, name, NodeKind::Shape(shape))
    }

    /// Returns the name of a node.
    ///
    /// * `id` - The node.
    pub fn name(&self, id: NodeId) -> Result<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    /// Returns the kind of a node.
    ///
    /// * `id` - The node.
    pub fn kind(&self, id: NodeId) -> Result<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    /// Returns the parent of a node; `None` for the root.
    ///
    /// * `id` - The node.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        self.node(id).map(|n| n.parent)
    }

    /// Returns the children of a node in insertion order.
    ///
    /// * `id` - The node.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        self.node(id).map(|n| n.children.as_slice())
    }

    /// Returns the first node with the given name in insertion order.
    ///
    /// * `name` - Node name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Returns the pose of a transform node relative to its parent, or `None`
    /// if the node has no pose.
    ///
    /// * `id` - The node.
    pub fn pose(&self, id: NodeId) -> Option<RigidTransform> {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Transform(pose)) => Some(*pose),
            _ => None,
        }
    }

    /// Replaces the pose of a transform node.
    ///
    /// * `id`   - The node.
    /// * `pose` - New pose relative to the parent.
    pub fn set_pose(&mut self, id: NodeId, pose: RigidTransform) -> Result<()> {
        debug_assert!(pose.is_well_formed(), "ill-formed pose {}", pose);
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(AnimError::UnknownNode(id.0))?;
        match node.kind {
            NodeKind::Transform(ref mut p) => {
                *p = pose;
                Ok(())
            }
            _ => Err(AnimError::NotATransform(id.0)),
        }
    }

    /// Returns the product of the poses of the transform nodes on the path
    /// from the root to `id`, leaving out the last `skip` of them. With
    /// `skip = 0` this is the world frame of a transform node; with
    /// `skip = 1` it is the frame its pose is expressed in.
    ///
    /// * `id`   - The node.
    /// * `skip` - Number of transform nodes to leave out at the end of the path.
    pub fn path_pose(&self, id: NodeId, skip: usize) -> Result<RigidTransform> {
        let mut path = vec![];
        let mut cur = Some(id);
        while let Some(n) = cur {
            let node = self.node(n)?;
            if let NodeKind::Transform(pose) = node.kind {
                path.push(pose);
            }
            cur = node.parent;
        }

        // `path` runs from `id` up to the root.
        Ok(path
            .iter()
            .skip(skip)
            .rev()
            .fold(RigidTransform::default(), |acc, pose| acc * *pose))
    }

    /// Returns all transform nodes in pre-order. This is the node order of
    /// keyframes.
    pub fn transform_nodes(&self) -> Vec<NodeId> {
        let mut result = vec![];
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if let NodeKind::Transform(_) = node.kind {
                result.push(id);
            }
            stack.extend(node.children.iter().rev());
        }
        result
    }

    /// Returns the poses of all transform nodes in pre-order.
    pub fn poses(&self) -> Vec<RigidTransform> {
        self.transform_nodes()
            .into_iter()
            .filter_map(|id| self.pose(id))
            .collect()
    }

    /// Replaces the poses of all transform nodes in pre-order.
    ///
    /// * `poses` - One pose per transform node.
    pub fn set_poses(&mut self, poses: &[RigidTransform]) -> Result<()> {
        let ids = self.transform_nodes();
        if ids.len() != poses.len() {
            return Err(AnimError::NodeCountMismatch {
                expected: ids.len(),
                actual: poses.len(),
            });
        }
        for (id, pose) in ids.into_iter().zip(poses.iter()) {
            self.set_pose(id, *pose)?;
        }
        Ok(())
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(AnimError::UnknownNode(id.0))
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rigid::geometry::Quaternion;
    use rigid::math::Float;

    const TOLERANCE: Float = 1e-9;

    fn translation(x: Float, y: Float, z: Float) -> RigidTransform {
        RigidTransform::from_translation(Vector3f::new(x, y, z))
    }

    /// world
    /// ├── a (1, 0, 0)
    /// │   ├── shape
    /// │   └── b (0, 2, 0) rotated 90° about z
    /// │       └── c (1, 0, 0)
    /// └── d (0, 0, 5)
    fn sample() -> (SceneGraph, [NodeId; 5]) {
        let mut g = SceneGraph::new();
        let root = g.root();
        let a = g.add_transform(root, "a", translation(1.0, 0.0, 0.0)).unwrap();
        let shape = g
            .add_shape(a, "shape", Shape::new(Vector3f::zero(), Vector3f::new(1.0, 1.0, 1.0)))
            .unwrap();
        let b = g
            .add_transform(
                a,
                "b",
                RigidTransform::new(Vector3f::new(0.0, 2.0, 0.0), Quaternion::make_z_rotation(90.0)),
            )
            .unwrap();
        let c = g.add_transform(b, "c", translation(1.0, 0.0, 0.0)).unwrap();
        let d = g.add_transform(root, "d", translation(0.0, 0.0, 5.0)).unwrap();
        (g, [a, shape, b, c, d])
    }

    #[test]
    fn transform_nodes_are_in_pre_order() {
        let (g, [a, _, b, c, d]) = sample();
        assert_eq!(g.transform_nodes(), vec![a, b, c, d]);
        assert_eq!(g.poses().len(), 4);
    }

    #[test]
    fn structure_queries() {
        let (g, [a, shape, b, _, _]) = sample();
        assert_eq!(g.len(), 6);
        assert_eq!(g.name(b).unwrap(), "b");
        assert_eq!(g.parent(b).unwrap(), Some(a));
        assert_eq!(g.parent(g.root()).unwrap(), None);
        assert_eq!(g.children(a).unwrap(), &[shape, b]);
        assert_eq!(g.find("c").map(|id| id.index()), Some(4));
        assert_eq!(g.find("missing"), None);
    }

    #[test]
    fn only_transforms_have_poses() {
        let (mut g, [a, shape, _, _, _]) = sample();
        assert!(g.pose(a).is_some());
        assert!(g.pose(shape).is_none());
        assert!(g.pose(g.root()).is_none());
        assert_eq!(
            g.set_pose(shape, RigidTransform::default()),
            Err(AnimError::NotATransform(shape.index()))
        );
        assert_eq!(
            g.set_pose(NodeId(99), RigidTransform::default()),
            Err(AnimError::UnknownNode(99))
        );
    }

    #[test]
    fn shapes_cannot_have_children() {
        let (mut g, [_, shape, _, _, _]) = sample();
        assert_eq!(
            g.add_transform(shape, "x", RigidTransform::default()),
            Err(AnimError::LeafNode(shape.index()))
        );
    }

    #[test]
    fn path_pose_accumulates_from_root() {
        let (g, [a, shape, b, c, _]) = sample();

        let world_c = g.path_pose(c, 0).unwrap();
        let p = world_c.translation();
        // c sits 1 unit along b's x-axis, which points along world y.
        assert!(approx_eq!(Float, p.x, 1.0, epsilon = TOLERANCE));
        assert!(approx_eq!(Float, p.y, 3.0, epsilon = TOLERANCE));
        assert!(approx_eq!(Float, p.z, 0.0, epsilon = TOLERANCE));

        assert!(g
            .path_pose(c, 1)
            .unwrap()
            .approx_eq(&g.path_pose(b, 0).unwrap(), TOLERANCE));
        assert!(g
            .path_pose(c, 2)
            .unwrap()
            .approx_eq(&g.pose(a).unwrap(), TOLERANCE));
        assert_eq!(g.path_pose(c, 10).unwrap(), RigidTransform::default());

        // Shapes inherit the frame of their parent.
        assert_eq!(g.path_pose(shape, 0).unwrap(), g.pose(a).unwrap());
    }

    #[test]
    fn set_poses_checks_count() {
        let (mut g, [a, ..]) = sample();
        let mut poses = g.poses();
        poses[0] = translation(7.0, 0.0, 0.0);
        g.set_poses(&poses).unwrap();
        assert_eq!(g.pose(a), Some(translation(7.0, 0.0, 0.0)));

        assert_eq!(
            g.set_poses(&poses[1..]),
            Err(AnimError::NodeCountMismatch {
                expected: 4,
                actual: 3
            })
        );
    }
}
