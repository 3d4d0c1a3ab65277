//! Layer-list earth model
//!
//! A model is four index-aligned sequences: thickness, Vp, Vs and density.
//! Each attribute of a layer is either constant or varies linearly from the
//! top of the layer to its bottom.

use crate::error::{Result, SmapsError};
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// P-wave velocity of sea water (m/s)
pub const WATER_VP: f64 = 1500.0;

/// Nominal S-wave velocity of water (m/s); kept above zero for the forward solver
pub const WATER_VS: f64 = 0.001;

/// Density of water (kg/m^3)
pub const WATER_RHO: f64 = 1000.0;

// ============================================================================
// Layer Value
// ============================================================================

/// Value of one attribute across one layer
///
/// `top == bottom` describes a constant layer, anything else a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerValue {
    /// Value at the top of the layer
    pub top: f64,
    /// Value at the bottom of the layer
    pub bottom: f64,
}

impl LayerValue {
    /// Constant value throughout the layer
    pub fn constant(value: f64) -> Self {
        Self {
            top: value,
            bottom: value,
        }
    }

    /// Linear gradient from `top` to `bottom`
    pub fn gradient(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// True when top and bottom are identical
    pub fn is_constant(&self) -> bool {
        self.top == self.bottom
    }

    fn is_finite(&self) -> bool {
        self.top.is_finite() && self.bottom.is_finite()
    }
}

impl From<f64> for LayerValue {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl From<(f64, f64)> for LayerValue {
    fn from((top, bottom): (f64, f64)) -> Self {
        Self::gradient(top, bottom)
    }
}

/// Convert a slice of plain values into constant layers
pub fn constant_layers(values: &[f64]) -> Vec<LayerValue> {
    values.iter().copied().map(LayerValue::constant).collect()
}

// ============================================================================
// Layer-List Model
// ============================================================================

/// Compact earth model: N layers with thickness, Vp, Vs and density
///
/// Immutable once built. Equal sequence lengths are checked here; thickness
/// and cell-size checks happen in the discretization engine. Deserialized
/// models go through the same checks as [`LayerListModel::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLayerListModel")]
pub struct LayerListModel {
    thicknesses: Vec<f64>,
    vp: Vec<LayerValue>,
    vs: Vec<LayerValue>,
    rho: Vec<LayerValue>,
}

/// Unchecked wire form of [`LayerListModel`]
#[derive(Deserialize)]
struct RawLayerListModel {
    thicknesses: Vec<f64>,
    vp: Vec<LayerValue>,
    vs: Vec<LayerValue>,
    rho: Vec<LayerValue>,
}

impl TryFrom<RawLayerListModel> for LayerListModel {
    type Error = SmapsError;

    fn try_from(raw: RawLayerListModel) -> Result<Self> {
        Self::new(raw.thicknesses, raw.vp, raw.vs, raw.rho)
    }
}

impl LayerListModel {
    /// Create a model from four aligned sequences
    ///
    /// # Errors
    /// `InvalidModel` if the sequences differ in length, are empty, or hold
    /// a non-finite attribute value.
    pub fn new(
        thicknesses: Vec<f64>,
        vp: Vec<LayerValue>,
        vs: Vec<LayerValue>,
        rho: Vec<LayerValue>,
    ) -> Result<Self> {
        check_aligned(thicknesses.len(), vp.len(), vs.len(), rho.len())?;

        for (name, column) in [("vp", &vp), ("vs", &vs), ("rho", &rho)] {
            if let Some(index) = column.iter().position(|v| !v.is_finite()) {
                return Err(SmapsError::invalid_model(format!(
                    "{} of layer {} is not finite",
                    name, index
                )));
            }
        }

        Ok(Self {
            thicknesses,
            vp,
            vs,
            rho,
        })
    }

    /// Assemble a model from literal columns already known to be aligned
    pub(crate) fn from_parts(
        thicknesses: Vec<f64>,
        vp: Vec<LayerValue>,
        vs: Vec<LayerValue>,
        rho: Vec<LayerValue>,
    ) -> Self {
        debug_assert!(check_aligned(thicknesses.len(), vp.len(), vs.len(), rho.len()).is_ok());
        Self {
            thicknesses,
            vp,
            vs,
            rho,
        }
    }

    /// Create a model in which every layer is constant
    pub fn constant(thicknesses: &[f64], vp: &[f64], vs: &[f64], rho: &[f64]) -> Result<Self> {
        Self::new(
            thicknesses.to_vec(),
            constant_layers(vp),
            constant_layers(vs),
            constant_layers(rho),
        )
    }

    /// Number of layers
    pub fn num_layers(&self) -> usize {
        self.thicknesses.len()
    }

    pub fn thicknesses(&self) -> &[f64] {
        &self.thicknesses
    }

    pub fn vp(&self) -> &[LayerValue] {
        &self.vp
    }

    pub fn vs(&self) -> &[LayerValue] {
        &self.vs
    }

    pub fn rho(&self) -> &[LayerValue] {
        &self.rho
    }

    /// Sum of all layer thicknesses
    pub fn total_thickness(&self) -> f64 {
        self.thicknesses.iter().sum()
    }

    /// Depth of the bottom of each layer, measured from the top of layer 0
    pub fn interface_depths(&self) -> Vec<f64> {
        self.thicknesses
            .iter()
            .scan(0.0, |depth, t| {
                *depth += t;
                Some(*depth)
            })
            .collect()
    }

    /// Prepend a padding layer that reuses the first layer's properties
    ///
    /// Shifts the whole model down so absolute depths match a reference
    /// frame with a known overburden.
    pub fn with_padding(&self, thickness: f64) -> Self {
        let mut padded = self.clone();
        padded.thicknesses.insert(0, thickness);
        padded.vp.insert(0, LayerValue::constant(self.vp[0].top));
        padded.vs.insert(0, LayerValue::constant(self.vs[0].top));
        padded.rho.insert(0, LayerValue::constant(self.rho[0].top));
        padded
    }

    /// Prepend a water layer of the given thickness
    pub fn with_water_column(&self, thickness: f64) -> Self {
        let mut wet = self.clone();
        wet.thicknesses.insert(0, thickness);
        wet.vp.insert(0, LayerValue::constant(WATER_VP));
        wet.vs.insert(0, LayerValue::constant(WATER_VS));
        wet.rho.insert(0, LayerValue::constant(WATER_RHO));
        wet
    }
}

/// Check that four sequence lengths agree and are non-zero
pub(crate) fn check_aligned(thick: usize, vp: usize, vs: usize, rho: usize) -> Result<()> {
    if thick == 0 {
        return Err(SmapsError::invalid_model("model has no layers"));
    }
    for (name, len) in [("vp", vp), ("vs", vs), ("rho", rho)] {
        if len != thick {
            return Err(SmapsError::invalid_model(format!(
                "{} has {} layers, expected {} to match thicknesses",
                name, len, thick
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_layer() -> LayerListModel {
        LayerListModel::constant(&[50.0, 50.0], &[2800.0, 3000.0], &[1400.0, 1500.0], &[2200.0, 2300.0])
            .unwrap()
    }

    #[test]
    fn test_layer_value_constructors() {
        assert!(LayerValue::constant(3.0).is_constant());
        assert!(!LayerValue::gradient(100.0, 200.0).is_constant());
        assert_eq!(LayerValue::from(2.5), LayerValue::constant(2.5));
        assert_eq!(LayerValue::from((1.0, 2.0)), LayerValue::gradient(1.0, 2.0));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = LayerListModel::constant(&[50.0, 50.0], &[2800.0], &[1400.0, 1500.0], &[2200.0, 2300.0])
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MODEL");
    }

    #[test]
    fn test_empty_model_rejected() {
        assert!(LayerListModel::constant(&[], &[], &[], &[]).is_err());
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let err = LayerListModel::constant(&[10.0], &[f64::NAN], &[1.0], &[1.0]).unwrap_err();
        assert!(err.to_string().contains("vp of layer 0"));
    }

    #[test]
    fn test_interface_depths() {
        let model = two_layer();
        assert_eq!(model.interface_depths(), vec![50.0, 100.0]);
        assert_eq!(model.total_thickness(), 100.0);
    }

    #[test]
    fn test_with_padding_reuses_first_layer() {
        let padded = two_layer().with_padding(800.0);
        assert_eq!(padded.num_layers(), 3);
        assert_eq!(padded.thicknesses()[0], 800.0);
        assert_eq!(padded.vp()[0], padded.vp()[1]);
        assert_eq!(padded.rho()[0], padded.rho()[1]);
    }

    #[test]
    fn test_with_water_column() {
        let wet = two_layer().with_water_column(800.0);
        assert_eq!(wet.vp()[0], LayerValue::constant(WATER_VP));
        assert_eq!(wet.vs()[0], LayerValue::constant(WATER_VS));
        assert_eq!(wet.rho()[0], LayerValue::constant(WATER_RHO));
        assert_eq!(wet.vp()[1], LayerValue::constant(2800.0));
    }

    #[test]
    fn test_deserialize_checks_alignment() {
        let model = two_layer();
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(serde_json::from_str::<LayerListModel>(&json).unwrap(), model);

        let misaligned = r#"{"thicknesses":[5.0,5.0],"vp":[{"top":1.0,"bottom":1.0}],"vs":[],"rho":[]}"#;
        let err = serde_json::from_str::<LayerListModel>(misaligned).unwrap_err();
        assert!(err.to_string().contains("vp has 1 layers"));

        let empty = r#"{"thicknesses":[],"vp":[],"vs":[],"rho":[]}"#;
        assert!(serde_json::from_str::<LayerListModel>(empty).is_err());
    }
}
