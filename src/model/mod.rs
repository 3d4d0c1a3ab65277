//! Layer-list earth models
//!
//! - `layer`: the model type and per-layer values
//! - `relations`: velocity ratios and density laws
//! - `presets`: named reference models

pub mod layer;
pub mod presets;
pub mod relations;

pub use layer::{constant_layers, LayerListModel, LayerValue, WATER_RHO, WATER_VP, WATER_VS};
pub use presets::{preset, Preset, PresetRegistry};
pub use relations::{DensityRelation, VelocityRatio};
