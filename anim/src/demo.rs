//! Demo Scene
//!
//! A sky camera, the ground, two jointed robots and two lights.

use crate::error::Result;
use crate::scene_graph::{NodeId, SceneGraph, Shape};
use rigid::geometry::{RigidTransform, Vector3f};
use rigid::math::Float;

const ARM_LEN: Float = 0.7;
const ARM_THICK: Float = 0.25;
const TORSO_LEN: Float = 1.5;
const TORSO_THICK: Float = 0.25;
const TORSO_WIDTH: Float = 1.0;
const HEAD_SIZE: Float = 0.25;

/// Y coordinate of the ground plane.
pub const GROUND_Y: Float = -2.0;

/// Half the side length of the ground plane.
pub const GROUND_SIZE: Float = 10.0;

/// Number of joints per robot including the torso.
pub const ROBOT_JOINTS: usize = 10;

/// A joint: parent joint (`None` for the torso) and offset from it.
struct JointDesc {
    name: &'static str,
    parent: Option<usize>,
    offset: [Float; 3],
}

/// A shape hanging off a joint.
struct ShapeDesc {
    joint: usize,
    offset: [Float; 3],
    scale: [Float; 3],
}

#[rustfmt::skip]
const JOINTS: [JointDesc; ROBOT_JOINTS] = [
    JointDesc { name: "torso",           parent: None,    offset: [0.0, 0.0, 0.0] },
    JointDesc { name: "upper right arm", parent: Some(0), offset: [TORSO_WIDTH / 2.0, TORSO_LEN / 2.0, 0.0] },
    JointDesc { name: "lower right arm", parent: Some(1), offset: [ARM_LEN, 0.0, 0.0] },
    JointDesc { name: "upper left arm",  parent: Some(0), offset: [-TORSO_WIDTH / 2.0, TORSO_LEN / 2.0, 0.0] },
    JointDesc { name: "lower left arm",  parent: Some(3), offset: [-ARM_LEN, 0.0, 0.0] },
    JointDesc { name: "upper right leg", parent: Some(0), offset: [TORSO_WIDTH / 2.0 - ARM_THICK / 2.0, -TORSO_LEN / 2.0, 0.0] },
    JointDesc { name: "lower right leg", parent: Some(5), offset: [0.0, -ARM_LEN, 0.0] },
    JointDesc { name: "upper left leg",  parent: Some(0), offset: [-TORSO_WIDTH / 2.0 + ARM_THICK / 2.0, -TORSO_LEN / 2.0, 0.0] },
    JointDesc { name: "lower left leg",  parent: Some(7), offset: [0.0, -ARM_LEN, 0.0] },
    JointDesc { name: "head",            parent: Some(0), offset: [0.0, TORSO_LEN / 2.0, 0.0] },
];

#[rustfmt::skip]
const SHAPES: [ShapeDesc; ROBOT_JOINTS] = [
    ShapeDesc { joint: 0, offset: [0.0, 0.0, 0.0],            scale: [TORSO_WIDTH, TORSO_LEN, TORSO_THICK] },
    ShapeDesc { joint: 1, offset: [ARM_LEN / 2.0, 0.0, 0.0],  scale: [ARM_LEN, ARM_THICK, ARM_THICK] },
    ShapeDesc { joint: 2, offset: [ARM_LEN / 2.0, 0.0, 0.0],  scale: [ARM_LEN, ARM_THICK, ARM_THICK] },
    ShapeDesc { joint: 3, offset: [-ARM_LEN / 2.0, 0.0, 0.0], scale: [ARM_LEN, ARM_THICK, ARM_THICK] },
    ShapeDesc { joint: 4, offset: [-ARM_LEN / 2.0, 0.0, 0.0], scale: [ARM_LEN, ARM_THICK, ARM_THICK] },
    ShapeDesc { joint: 5, offset: [0.0, -ARM_LEN / 2.0, 0.0], scale: [ARM_THICK, ARM_LEN, ARM_THICK] },
    ShapeDesc { joint: 6, offset: [0.0, -ARM_LEN / 2.0, 0.0], scale: [ARM_THICK, ARM_LEN, ARM_THICK] },
    ShapeDesc { joint: 7, offset: [0.0, -ARM_LEN / 2.0, 0.0], scale: [ARM_THICK, ARM_LEN, ARM_THICK] },
    ShapeDesc { joint: 8, offset: [0.0, -ARM_LEN / 2.0, 0.0], scale: [ARM_THICK, ARM_LEN, ARM_THICK] },
    ShapeDesc { joint: 9, offset: [0.0, HEAD_SIZE, 0.0],      scale: [HEAD_SIZE, HEAD_SIZE, HEAD_SIZE] },
];

/// The demo scene and its notable nodes.
#[derive(Clone, Debug)]
pub struct DemoScene {
    /// The scene graph.
    pub graph: SceneGraph,

    /// The free camera.
    pub sky: NodeId,

    /// The ground; it cannot be selected.
    pub ground: NodeId,

    /// Torso of the first robot.
    pub robot1: NodeId,

    /// Torso of the second robot.
    pub robot2: NodeId,

    /// First light.
    pub light1: NodeId,

    /// Second light.
    pub light2: NodeId,
}

impl DemoScene {
    /// Builds the demo scene.
    pub fn new() -> Result<Self> {
        let mut graph = SceneGraph::new();
        let world = graph.root();

        let sky = graph.add_transform(world, "sky", translation(0.0, 0.25, 4.0))?;

        let ground = graph.add_transform(world, "ground", RigidTransform::default())?;
        graph.add_shape(
            ground,
            "ground plane",
            Shape::new(
                Vector3f::new(0.0, GROUND_Y, 0.0),
                Vector3f::new(2.0 * GROUND_SIZE, 0.0, 2.0 * GROUND_SIZE),
            ),
        )?;

        let robot1 = add_robot(&mut graph, world, "robot1", translation(-2.0, 1.0, 0.0))?;
        let robot2 = add_robot(&mut graph, world, "robot2", translation(2.0, 1.0, 0.0))?;

        let light1 = add_light(&mut graph, world, "light1", translation(3.0, 3.0, 5.0))?;
        let light2 = add_light(&mut graph, world, "light2", translation(-3.0, 1.0, -5.0))?;

        Ok(Self {
            graph,
            sky,
            ground,
            robot1,
            robot2,
            light1,
            light2,
        })
    }
}

fn translation(x: Float, y: Float, z: Float) -> RigidTransform {
    RigidTransform::from_translation(Vector3f::new(x, y, z))
}

/// Adds a robot and returns its torso.
fn add_robot(
    graph: &mut SceneGraph,
    parent: NodeId,
    name: &str,
    pose: RigidTransform,
) -> Result<NodeId> {
    let mut joints: Vec<NodeId> = Vec::with_capacity(ROBOT_JOINTS);
    for desc in JOINTS.iter() {
        let id = match desc.parent {
            None => graph.add_transform(parent, name, pose)?,
            Some(p) => {
                let [x, y, z] = desc.offset;
                graph.add_transform(
                    joints[p],
                    &format!("{} {}", name, desc.name),
                    translation(x, y, z),
                )?
            }
        };
        joints.push(id);
    }

    for (i, desc) in SHAPES.iter().enumerate() {
        graph.add_shape(
            joints[desc.joint],
            &format!("{} shape {}", name, i),
            Shape::new(Vector3f::from(desc.offset), Vector3f::from(desc.scale)),
        )?;
    }

    Ok(joints[0])
}

/// Adds a light with a small marker sphere.
fn add_light(
    graph: &mut SceneGraph,
    parent: NodeId,
    name: &str,
    pose: RigidTransform,
) -> Result<NodeId> {
    let light = graph.add_transform(parent, name, pose)?;
    graph.add_shape(
        light,
        &format!("{} marker", name),
        Shape::new(Vector3f::zero(), Vector3f::new(HEAD_SIZE, HEAD_SIZE, HEAD_SIZE)),
    )?;
    Ok(light)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
