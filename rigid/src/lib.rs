//! Rigid body transformations and their interpolation.

#[macro_use]
extern crate float_cmp;
#[macro_use]
extern crate log;

pub mod arcball;
pub mod geometry;
pub mod interpolation;
pub mod math;
