//! Four-column velocity model handed to the forward solver

use serde::{Deserialize, Serialize};

use crate::discretize::DepthColumn;
use crate::error::{Result, SmapsError};
use crate::model::layer::check_aligned;
use crate::model::{DensityRelation, LayerListModel, VelocityRatio};

/// Columns `[thickness, vp, vs, rho]`, ordered from the surface down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVelocityModel")]
pub struct VelocityModel {
    thickness: Vec<f64>,
    vp: Vec<f64>,
    vs: Vec<f64>,
    rho: Vec<f64>,
}

/// Unchecked wire form of [`VelocityModel`]
#[derive(Deserialize)]
struct RawVelocityModel {
    thickness: Vec<f64>,
    vp: Vec<f64>,
    vs: Vec<f64>,
    rho: Vec<f64>,
}

impl TryFrom<RawVelocityModel> for VelocityModel {
    type Error = SmapsError;

    fn try_from(raw: RawVelocityModel) -> Result<Self> {
        Self::new(raw.thickness, raw.vp, raw.vs, raw.rho)
    }
}

impl VelocityModel {
    pub fn new(thickness: Vec<f64>, vp: Vec<f64>, vs: Vec<f64>, rho: Vec<f64>) -> Result<Self> {
        check_aligned(thickness.len(), vp.len(), vs.len(), rho.len())?;
        Ok(Self {
            thickness,
            vp,
            vs,
            rho,
        })
    }

    /// One row per discretized cell
    pub fn from_column(column: &DepthColumn) -> Self {
        Self {
            thickness: column.thickness().to_vec(),
            vp: column.vp().to_vec(),
            vs: column.vs().to_vec(),
            rho: column.rho().to_vec(),
        }
    }

    /// One row per layer; gradient layers are represented by their mid-layer value
    pub fn from_layers(model: &LayerListModel) -> Self {
        let mid = |values: &[crate::model::LayerValue]| -> Vec<f64> {
            values.iter().map(|v| 0.5 * (v.top + v.bottom)).collect()
        };
        Self {
            thickness: model.thicknesses().to_vec(),
            vp: mid(model.vp()),
            vs: mid(model.vs()),
            rho: mid(model.rho()),
        }
    }

    pub fn len(&self) -> usize {
        self.thickness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thickness.is_empty()
    }

    pub fn thickness(&self) -> &[f64] {
        &self.thickness
    }

    pub fn vp(&self) -> &[f64] {
        &self.vp
    }

    pub fn vs(&self) -> &[f64] {
        &self.vs
    }

    pub fn rho(&self) -> &[f64] {
        &self.rho
    }

    pub fn rows(&self) -> impl Iterator<Item = [f64; 4]> + '_ {
        (0..self.len()).map(move |i| [self.thickness[i], self.vp[i], self.vs[i], self.rho[i]])
    }

    /// Depth of the bottom of every row
    pub fn interface_depths(&self) -> Vec<f64> {
        self.thickness
            .iter()
            .scan(0.0, |depth, t| {
                *depth += t;
                Some(*depth)
            })
            .collect()
    }

    /// Lower depth limit for profile plots: total depth plus the thickest row
    pub fn plot_depth_limit(&self) -> f64 {
        let total: f64 = self.thickness.iter().sum();
        let thickest = self.thickness.iter().copied().fold(0.0, f64::max);
        total + thickest
    }

    /// Vp and density predicted from this model's Vs by the relations the
    /// sampler uses, for overlay against the true columns
    pub fn relation_overlay(&self, vp_vs: VelocityRatio, density: DensityRelation) -> (Vec<f64>, Vec<f64>) {
        let vp = vp_vs.vp_from_vs(&self.vs);
        let rho = density.apply(&vp);
        (vp, rho)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretize::discretize;
    use crate::model::LayerValue;

    #[test]
    fn test_from_column() {
        let column = discretize(&[2.0, 1.0], &[100.0, 200.0], &[50.0, 100.0], &[1.0, 2.0], 1.0).unwrap();
        let model = VelocityModel::from_column(&column);
        let rows: Vec<_> = model.rows().collect();
        assert_eq!(rows, vec![[1.0, 100.0, 50.0, 1.0], [1.0, 100.0, 50.0, 1.0], [1.0, 200.0, 100.0, 2.0]]);
        assert_eq!(model.interface_depths(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_layers_uses_mid_layer_value() {
        let layers = LayerListModel::new(
            vec![10.0, 20.0],
            vec![LayerValue::gradient(100.0, 200.0), LayerValue::constant(300.0)],
            vec![LayerValue::constant(50.0), LayerValue::constant(150.0)],
            vec![LayerValue::constant(1.0), LayerValue::constant(2.0)],
        )
        .unwrap();
        let model = VelocityModel::from_layers(&layers);
        assert_eq!(model.vp(), &[150.0, 300.0]);
        assert_eq!(model.plot_depth_limit(), 50.0);
    }

    #[test]
    fn test_misaligned_columns_rejected() {
        assert!(VelocityModel::new(vec![1.0], vec![1.0, 2.0], vec![1.0], vec![1.0]).is_err());
    }

    #[test]
    fn test_relation_overlay() {
        let model = VelocityModel::new(vec![1.0, 1.0], vec![0.0; 2], vec![1000.0, 2000.0], vec![0.0; 2]).unwrap();
        let (vp, rho) = model.relation_overlay(VelocityRatio(2.0), DensityRelation::Linear { a: 0.5, b: 10.0 });
        assert_eq!(vp, vec![2000.0, 4000.0]);
        assert_eq!(rho, vec![1010.0, 2010.0]);
    }

    #[test]
    fn test_deserialize_checks_alignment() {
        let model = VelocityModel::new(vec![1.0, 2.0], vec![1.0, 2.0], vec![0.5, 1.0], vec![1.0, 1.0]).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(serde_json::from_str::<VelocityModel>(&json).unwrap(), model);

        let short = r#"{"thickness":[1.0,2.0],"vp":[1.0],"vs":[0.5,1.0],"rho":[1.0,1.0]}"#;
        assert!(serde_json::from_str::<VelocityModel>(short).is_err());
    }
}
