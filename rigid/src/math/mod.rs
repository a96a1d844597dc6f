//! Scalar helpers shared by the geometry types

mod clamp;
mod common;

// Re-export
pub use clamp::*;
pub use common::*;
