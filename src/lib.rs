//! smaps - Layered Earth Models for Trans-Dimensional Surface-Wave Inversion
//!
//! Builds synthetic earth models and prepares them for forward modelling and
//! for comparison against posterior ensembles.
//!
//! # Architecture
//!
//! - `model`: layer-list models, petrophysical relations and named presets
//! - `discretize`: layer list to a uniform depth column
//! - `ensemble`: trans-dimensional samples, statistics boundary, dimension
//!   and data-noise posteriors, panel layout
//! - `forward`: velocity model and kernel types for the forward solver
//!
//! The sampler, the forward solver and the tessellation statistics library
//! are external; they appear here only as traits and data types.

pub mod cli;
pub mod config;
pub mod discretize;
pub mod ensemble;
pub mod error;
pub mod forward;
pub mod model;

pub use discretize::{discretize, discretize_model, DepthColumn, DEFAULT_CELL_SIZE};
pub use error::{Result, SmapsError};
pub use model::{LayerListModel, LayerValue};
