//! Discretized depth column
//!
//! Output of the discretization engine: one uniform cell per `cell_size`,
//! ordered from the top of the first layer downward.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmapsError};

/// Uniformly sampled depth column
///
/// All four columns are index-aligned. Cell `i` spans
/// `[i * cell_size, (i + 1) * cell_size)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDepthColumn")]
pub struct DepthColumn {
    cell_size: f64,
    thickness: Vec<f64>,
    vp: Vec<f64>,
    vs: Vec<f64>,
    rho: Vec<f64>,
    /// First cell of each source layer, plus one past the last cell
    layer_offsets: Vec<usize>,
}

/// Unchecked wire form of [`DepthColumn`]
#[derive(Deserialize)]
struct RawDepthColumn {
    cell_size: f64,
    thickness: Vec<f64>,
    vp: Vec<f64>,
    vs: Vec<f64>,
    rho: Vec<f64>,
    layer_offsets: Vec<usize>,
}

impl TryFrom<RawDepthColumn> for DepthColumn {
    type Error = SmapsError;

    fn try_from(raw: RawDepthColumn) -> Result<Self> {
        if !raw.cell_size.is_finite() || raw.cell_size <= 0.0 {
            return Err(SmapsError::invalid_parameter(
                "cell_size",
                raw.cell_size,
                "must be positive and finite",
            ));
        }
        let cells = raw.thickness.len();
        for (name, len) in [("vp", raw.vp.len()), ("vs", raw.vs.len()), ("rho", raw.rho.len())] {
            if len != cells {
                return Err(SmapsError::invalid_model(format!(
                    "{} has {} cells, expected {} to match thickness",
                    name, len, cells
                )));
            }
        }
        if raw.thickness.iter().any(|t| *t != raw.cell_size) {
            return Err(SmapsError::invalid_model("every cell must be cell_size thick"));
        }
        let bounded = raw.layer_offsets.first() == Some(&0) && raw.layer_offsets.last() == Some(&cells);
        let ascending = raw.layer_offsets.windows(2).all(|w| w[0] < w[1]);
        if !bounded || !ascending || raw.layer_offsets.len() < 2 {
            return Err(SmapsError::invalid_model(
                "layer offsets must rise strictly from 0 to the cell count",
            ));
        }

        Ok(Self {
            cell_size: raw.cell_size,
            thickness: raw.thickness,
            vp: raw.vp,
            vs: raw.vs,
            rho: raw.rho,
            layer_offsets: raw.layer_offsets,
        })
    }
}

impl DepthColumn {
    pub(crate) fn from_parts(
        cell_size: f64,
        vp: Vec<f64>,
        vs: Vec<f64>,
        rho: Vec<f64>,
        layer_offsets: Vec<usize>,
    ) -> Self {
        debug_assert!(vp.len() == vs.len() && vs.len() == rho.len());
        let thickness = vec![cell_size; vp.len()];
        Self {
            cell_size,
            thickness,
            vp,
            vs,
            rho,
            layer_offsets,
        }
    }

    /// Number of cells (M)
    pub fn len(&self) -> usize {
        self.thickness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thickness.is_empty()
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
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

    /// Depth of the top of every cell
    pub fn depths(&self) -> Vec<f64> {
        (0..self.len()).map(|i| i as f64 * self.cell_size).collect()
    }

    /// Depth of the bottom of every cell (running sum of cell thickness)
    pub fn cumulative_depths(&self) -> Vec<f64> {
        self.thickness
            .iter()
            .scan(0.0, |depth, t| {
                *depth += t;
                Some(*depth)
            })
            .collect()
    }

    /// Sum of all cell thicknesses
    pub fn total_depth(&self) -> f64 {
        self.thickness.iter().sum()
    }

    /// Number of source layers the column was built from
    pub fn num_layers(&self) -> usize {
        self.layer_offsets.len().saturating_sub(1)
    }

    /// Cell indices belonging to source layer `layer`
    pub fn layer_range(&self, layer: usize) -> Option<Range<usize>> {
        if layer >= self.num_layers() {
            return None;
        }
        Some(self.layer_offsets[layer]..self.layer_offsets[layer + 1])
    }

    /// Rows of `[thickness, vp, vs, rho]`, surface first
    pub fn rows(&self) -> impl Iterator<Item = [f64; 4]> + '_ {
        (0..self.len()).map(move |i| [self.thickness[i], self.vp[i], self.vs[i], self.rho[i]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_column() -> DepthColumn {
        DepthColumn::from_parts(
            2.0,
            vec![1.0, 1.0, 2.0],
            vec![0.5, 0.5, 1.0],
            vec![3.0, 3.0, 4.0],
            vec![0, 2, 3],
        )
    }

    #[test]
    fn test_depths() {
        let column = small_column();
        assert_eq!(column.depths(), vec![0.0, 2.0, 4.0]);
        assert_eq!(column.cumulative_depths(), vec![2.0, 4.0, 6.0]);
        assert_eq!(column.total_depth(), 6.0);
    }

    #[test]
    fn test_layer_ranges() {
        let column = small_column();
        assert_eq!(column.num_layers(), 2);
        assert_eq!(column.layer_range(0), Some(0..2));
        assert_eq!(column.layer_range(1), Some(2..3));
        assert_eq!(column.layer_range(2), None);
    }

    #[test]
    fn test_rows() {
        let rows: Vec<[f64; 4]> = small_column().rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], [2.0, 2.0, 1.0, 4.0]);
    }

    #[test]
    fn test_deserialize_checks_columns() {
        let column = small_column();
        let json = serde_json::to_string(&column).unwrap();
        assert_eq!(serde_json::from_str::<DepthColumn>(&json).unwrap(), column);

        let short_vp = r#"{"cell_size":1.0,"thickness":[1.0,1.0],"vp":[1.0],"vs":[1.0,1.0],"rho":[1.0,1.0],"layer_offsets":[0,2]}"#;
        let err = serde_json::from_str::<DepthColumn>(short_vp).unwrap_err();
        assert!(err.to_string().contains("vp has 1 cells"));

        let bad_offsets = r#"{"cell_size":1.0,"thickness":[1.0,1.0],"vp":[1.0,1.0],"vs":[1.0,1.0],"rho":[1.0,1.0],"layer_offsets":[0,3]}"#;
        assert!(serde_json::from_str::<DepthColumn>(bad_offsets).is_err());

        let bad_cell = r#"{"cell_size":0.0,"thickness":[],"vp":[],"vs":[],"rho":[],"layer_offsets":[0]}"#;
        assert!(serde_json::from_str::<DepthColumn>(bad_cell).is_err());
    }
}
