//! Discretization Engine
//!
//! Converts a layer-list model into a uniformly sampled depth column for
//! forward modelling and plotting.

pub mod column;
pub mod engine;

pub use column::DepthColumn;
pub use engine::{discretize, discretize_model, interpolate, DEFAULT_CELL_SIZE};
