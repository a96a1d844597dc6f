#[macro_use]
extern crate log;

mod options;

use anim::animator::{Playback, PlaybackOptions};
use anim::gesture::{Drag, DragKind};
use anim::scene_graph::NodeId;
use anim::viewer::Viewer;
use clap::Parser;
use options::Options;
use rigid::arcball::ScreenPoint;
use rigid::math::Float;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();

    // In case of error report it.
    if let Err(e) = run(&options) {
        error!("{e}");
    }
}

fn run(options: &Options) -> Result<(), String> {
    let mut viewer = Viewer::new(PlaybackOptions::new(
        options.ms_between_keyframes,
        options.frames_per_second,
    ))
    .map_err(|e| e.to_string())?;

    // Resolve which nodes to print before anything moves.
    let nodes: Vec<NodeId> = match &options.node {
        Some(name) => vec![viewer
            .scene()
            .find(name)
            .ok_or(format!("No node named '{name}'."))?],
        None => viewer.scene().transform_nodes(),
    };

    record(&mut viewer, options.keyframes).map_err(|e| e.to_string())?;

    if options.dump {
        print!("{}", viewer.export_keyframes().map_err(|e| e.to_string())?);
    }

    play(&mut viewer, &nodes).map_err(|e| e.to_string())
}

/// Records keyframes by dragging the robots and the sky camera around.
fn record(viewer: &mut Viewer, count: usize) -> anim::Result<()> {
    let (robot1, robot2) = (viewer.demo().robot1, viewer.demo().robot2);
    let name = "robot2 lower right arm";
    let elbow = viewer
        .scene()
        .find(name)
        .ok_or_else(|| anim::AnimError::NodeNotFound(name.to_string()))?;
    let center = ScreenPoint::new(
        viewer.viewport.width() as Float / 2.0,
        viewer.viewport.height() as Float / 2.0,
    );

    for i in 0..count {
        if i > 0 {
            let step = i as Float;

            viewer.select(Some(robot1))?;
            viewer.drag(&drag(DragKind::Rotate, center, 20.0, 5.0 * step))?;

            viewer.select(Some(robot2))?;
            viewer.drag(&drag(DragKind::Translate, center, 0.0, 10.0))?;

            viewer.select(Some(elbow))?;
            viewer.drag(&drag(DragKind::Rotate, center, 0.0, 15.0))?;

            // Orbit the sky camera around the world origin.
            viewer.select(None)?;
            viewer.drag(&drag(DragKind::Rotate, center, -10.0, 0.0))?;
        }
        viewer.new_keyframe()?;
    }
    Ok(())
}

/// Plays the keyframes back and prints the poses of `nodes` at every frame.
fn play(viewer: &mut Viewer, nodes: &[NodeId]) -> anim::Result<()> {
    viewer.toggle_playback()?;
    let interval = viewer.animator().frame_interval_ms() as u64;

    let mut frame = 0;
    print_poses(viewer, frame, nodes)?;
    loop {
        frame += 1;
        match viewer.advance_playback(interval)? {
            Playback::Frame(_) => print_poses(viewer, frame, nodes)?,
            Playback::Finished(i) => {
                info!("Animation ended at keyframe {} after {} frames", i, frame);
                break;
            }
        }
    }
    Ok(())
}

fn print_poses(viewer: &Viewer, frame: usize, nodes: &[NodeId]) -> anim::Result<()> {
    let scene = viewer.scene();
    for &id in nodes {
        let pose = scene
            .pose(id)
            .ok_or(anim::AnimError::NotATransform(id.index()))?;
        println!(
            "{} {} '{}' {}",
            frame,
            viewer.animator().elapsed_ms(),
            scene.name(id)?,
            pose
        );
    }
    Ok(())
}

fn drag(kind: DragKind, from: ScreenPoint, dx: Float, dy: Float) -> Drag {
    Drag::new(kind, from, ScreenPoint::new(from.x + dx, from.y + dy))
}
