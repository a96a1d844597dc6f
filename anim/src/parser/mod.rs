//! Keyframe Text Format
//!
//! A header line with the number of keyframes and the number of transform
//! nodes per keyframe, followed by one `qw qx qy qz tx ty tz` record per
//! node per keyframe. Reading and writing files is left to the caller.

use crate::error::{AnimError, Result};
use crate::keyframes::Keyframe;
use pest::iterators::Pair;
use pest::Parser;
use rigid::geometry::{RigidTransform, SEPTUPLE_LEN};
use rigid::math::{Float, EPSILON_SQUARED};
use std::fmt::Write;

/// The `pest` parser generated from a grammar.
#[derive(Parser)]
#[grammar = "parser/keyframes.pest"]
struct KeyframeParser;

/// Parses keyframes from text. Rotations that are not unit quaternions are
/// normalized.
///
/// * `text` - The keyframe text.
pub fn parse_keyframes(text: &str) -> Result<Vec<Keyframe>> {
    let root = KeyframeParser::parse(Rule::keyframes, text)
        .map_err(|e| AnimError::Parse(e.to_string()))?
        .next()
        .ok_or_else(|| AnimError::Parse(String::from("empty input")))?;

    let mut frame_count = 0;
    let mut nodes = 0;
    let mut poses = vec![];
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::header => (frame_count, nodes) = parse_header(pair)?,
            Rule::septuple => poses.push(parse_septuple(pair)?),
            Rule::EOI => (), // Done
            _ => unreachable!(),
        }
    }

    if nodes == 0 && frame_count > 0 {
        return Err(AnimError::Parse(format!(
            "header announces {} frames without any nodes",
            frame_count
        )));
    }
    let expected = frame_count.checked_mul(nodes).ok_or_else(|| {
        AnimError::Parse(format!(
            "header announces too many records: {} frames of {} nodes",
            frame_count, nodes
        ))
    })?;
    if poses.len() != expected {
        return Err(AnimError::Parse(format!(
            "header announces {} frames of {} nodes ({} records) but {} records were found",
            frame_count,
            nodes,
            expected,
            poses.len()
        )));
    }

    debug!("Parsed {} keyframes of {} nodes", frame_count, nodes);
    if frame_count == 0 {
        return Ok(vec![]);
    }
    Ok(poses
        .chunks(nodes)
        .map(|chunk| Keyframe::new(chunk.to_vec()))
        .collect())
}

/// Formats keyframes as text that `parse_keyframes()` reads back.
///
/// * `frames` - The keyframes.
/// * `nodes`  - Number of transform nodes every keyframe must have.
pub fn format_keyframes(frames: &[Keyframe], nodes: usize) -> Result<String> {
    let mut out = format!("{} {}\n", frames.len(), nodes);
    for frame in frames {
        if frame.len() != nodes {
            return Err(AnimError::NodeCountMismatch {
                expected: nodes,
                actual: frame.len(),
            });
        }
        for pose in frame.poses() {
            // Writing to a `String` cannot fail.
            let _ = writeln!(out, "{}", pose);
        }
    }
    Ok(out)
}

/// Parse the `header` rule.
///
/// * `pair` - The matched `header` rule.
fn parse_header(pair: Pair<Rule>) -> Result<(usize, usize)> {
    let mut ints = pair.into_inner().map(|p| {
        p.as_str()
            .parse::<usize>()
            .map_err(|e| AnimError::Parse(format!("invalid count '{}': {}", p.as_str(), e)))
    });
    match (ints.next(), ints.next()) {
        (Some(frames), Some(nodes)) => Ok((frames?, nodes?)),
        _ => unreachable!(),
    }
}

/// Parse a `septuple` rule into a rigid transform.
///
/// * `pair` - The matched `septuple` rule.
fn parse_septuple(pair: Pair<Rule>) -> Result<RigidTransform> {
    let (line, col) = pair.as_span().start_pos().line_col();
    let mut s = [0.0; SEPTUPLE_LEN];
    for (v, p) in s.iter_mut().zip(pair.into_inner()) {
        *v = p
            .as_str()
            .parse::<Float>()
            .map_err(|e| AnimError::Parse(format!("invalid number '{}': {}", p.as_str(), e)))?;
    }

    let mut pose = RigidTransform::from_septuple(&s);
    let r = pose.rotation();
    if r.length_squared() < EPSILON_SQUARED {
        return Err(AnimError::Parse(format!(
            "zero rotation quaternion at line {}, column {}",
            line, col
        )));
    }
    if !r.is_unit() {
        warn!(
            "Normalizing rotation {} at line {}, column {}",
            r, line, col
        );
        pose.set_rotation(r.normalize());
    }
    Ok(pose)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
