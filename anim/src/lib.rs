//! Keyframe Animation

#[macro_use]
extern crate log;
#[macro_use]
extern crate pest_derive;
#[cfg(test)]
#[macro_use]
extern crate float_cmp;

pub mod animator;
pub mod demo;
pub mod error;
pub mod gesture;
pub mod keyframes;
pub mod manipulation;
pub mod parser;
pub mod scene_graph;
pub mod viewer;

pub use error::*;
