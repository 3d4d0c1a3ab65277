//! Layer list to uniform depth column
//!
//! Every layer is expanded into `round(thickness / cell_size)` cells. Inside
//! a layer each attribute is interpolated linearly from its top value to its
//! bottom value, so constant and gradient layers share one code path. Layers
//! are filled top to bottom and concatenated in depth order.

use log::debug;
use num_traits::{Float, ToPrimitive};

use super::column::DepthColumn;
use crate::error::{Result, SmapsError};
use crate::model::layer::check_aligned;
use crate::model::{LayerListModel, LayerValue};

// ============================================================================
// Constants
// ============================================================================

/// Default cell size (one metre)
pub const DEFAULT_CELL_SIZE: f64 = 1.0;

// ============================================================================
// Helper Functions
// ============================================================================

/// `n` evenly spaced values from `top` to `bottom`, both ends included
///
/// A single sample takes the top value. The last sample is exactly `bottom`.
pub fn interpolate<T: Float>(top: T, bottom: T, n: usize) -> impl Iterator<Item = T> {
    let steps = T::from(n.saturating_sub(1)).unwrap_or_else(T::one);
    let step = if n > 1 { (bottom - top) / steps } else { T::zero() };
    (0..n).map(move |k| {
        if k + 1 == n && n > 1 {
            bottom
        } else {
            top + step * T::from(k).unwrap_or_else(T::zero)
        }
    })
}

/// Number of cells for one layer
fn cell_count(index: usize, thickness: f64, cell_size: f64) -> Result<usize> {
    if !thickness.is_finite() || thickness <= 0.0 {
        return Err(SmapsError::invalid_parameter(
            format!("thicknesses[{}]", index),
            thickness,
            "layer thickness must be positive",
        ));
    }

    match (thickness / cell_size).round().to_usize() {
        Some(0) => Err(SmapsError::invalid_parameter(
            format!("thicknesses[{}]", index),
            thickness,
            format!("layer is thinner than one cell of {}", cell_size),
        )),
        Some(n) => Ok(n),
        None => Err(SmapsError::invalid_parameter(
            format!("thicknesses[{}]", index),
            thickness,
            format!("cell count overflows at cell size {}", cell_size),
        )),
    }
}

fn fill_layer(column: &mut Vec<f64>, value: LayerValue, cells: usize) {
    if value.is_constant() {
        column.extend(std::iter::repeat(value.top).take(cells));
    } else {
        column.extend(interpolate(value.top, value.bottom, cells));
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Discretize a layer list into a uniform depth column
///
/// `vp`, `vs` and `rho` accept plain `f64` (constant layers) or any other
/// value convertible into [`LayerValue`].
///
/// # Errors
/// - `InvalidModel` when the four sequences differ in length or are empty
/// - `InvalidParameter` for a non-positive thickness or cell size, a layer
///   thinner than one cell, or layers whose rounding drift adds up to a
///   whole cell
///
/// # Example
/// ```
/// use smaps::discretize::discretize;
///
/// let column = discretize(&[50.0, 50.0], &[2800.0, 3000.0], &[1400.0, 1500.0], &[2200.0, 2300.0], 50.0)
///     .unwrap();
/// assert_eq!(column.vp(), &[2800.0, 3000.0]);
/// ```
pub fn discretize<P, S, R>(
    thicknesses: &[f64],
    vp: &[P],
    vs: &[S],
    rho: &[R],
    cell_size: f64,
) -> Result<DepthColumn>
where
    P: Copy + Into<LayerValue>,
    S: Copy + Into<LayerValue>,
    R: Copy + Into<LayerValue>,
{
    check_aligned(thicknesses.len(), vp.len(), vs.len(), rho.len())?;

    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(SmapsError::invalid_parameter(
            "cell_size",
            cell_size,
            "cell size must be positive",
        ));
    }

    let counts = thicknesses
        .iter()
        .enumerate()
        .map(|(i, &t)| cell_count(i, t, cell_size))
        .collect::<Result<Vec<usize>>>()?;

    let total_cells = counts
        .iter()
        .try_fold(0usize, |total, &n| total.checked_add(n))
        .ok_or_else(|| {
            SmapsError::invalid_parameter(
                "cell_size",
                cell_size,
                "total cell count overflows; use a coarser cell size",
            )
        })?;
    let total_thickness: f64 = thicknesses.iter().sum();
    let drift = total_cells as f64 * cell_size - total_thickness;
    if drift.abs() >= cell_size {
        return Err(SmapsError::invalid_parameter(
            "cell_size",
            cell_size,
            format!(
                "layer boundaries drift by {:.3} from the cell grid; use a finer cell size",
                drift
            ),
        ));
    }

    let mut vp_out = Vec::with_capacity(total_cells);
    let mut vs_out = Vec::with_capacity(total_cells);
    let mut rho_out = Vec::with_capacity(total_cells);
    let mut offsets = Vec::with_capacity(counts.len() + 1);
    offsets.push(0);

    for (layer, &cells) in counts.iter().enumerate() {
        fill_layer(&mut vp_out, vp[layer].into(), cells);
        fill_layer(&mut vs_out, vs[layer].into(), cells);
        fill_layer(&mut rho_out, rho[layer].into(), cells);
        offsets.push(offsets[layer] + cells);
    }

    debug!(
        "Discretized {} layers at cell size {} into {} cells",
        thicknesses.len(),
        cell_size,
        total_cells
    );

    Ok(DepthColumn::from_parts(cell_size, vp_out, vs_out, rho_out, offsets))
}

/// Discretize a [`LayerListModel`]
pub fn discretize_model(model: &LayerListModel, cell_size: f64) -> Result<DepthColumn> {
    discretize(model.thicknesses(), model.vp(), model.vs(), model.rho(), cell_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interpolate_endpoints() {
        let values: Vec<f64> = interpolate(100.0, 200.0, 5).collect();
        assert_eq!(values, vec![100.0, 125.0, 150.0, 175.0, 200.0]);

        let single: Vec<f64> = interpolate(100.0, 200.0, 1).collect();
        assert_eq!(single, vec![100.0]);

        assert_eq!(interpolate(1.0_f64, 2.0, 0).count(), 0);
    }

    #[test]
    fn test_interpolate_last_value_is_exact() {
        let values: Vec<f64> = interpolate(0.1, 0.7, 7).collect();
        assert_eq!(*values.last().unwrap(), 0.7);
    }

    #[test]
    fn test_constant_layers_fill_exactly() {
        let column = discretize(&[3.0, 2.0], &[1.1, 2.2], &[0.3, 0.4], &[5.0, 6.0], 1.0).unwrap();
        assert_eq!(column.vp(), &[1.1, 1.1, 1.1, 2.2, 2.2]);
        assert_eq!(column.vs(), &[0.3, 0.3, 0.3, 0.4, 0.4]);
        assert_eq!(column.rho(), &[5.0, 5.0, 5.0, 6.0, 6.0]);
        assert_eq!(column.thickness(), &[1.0; 5]);
    }

    #[test]
    fn test_gradient_layer_runs_top_to_bottom() {
        let vp = [LayerValue::constant(1000.0), LayerValue::gradient(2000.0, 2400.0)];
        let column = discretize(&[2.0, 5.0], &vp, &[500.0, 900.0], &[1.0, 2.0], 1.0).unwrap();
        assert_eq!(column.vp(), &[1000.0, 1000.0, 2000.0, 2100.0, 2200.0, 2300.0, 2400.0]);
    }

    #[test]
    fn test_cell_counts_round_per_layer() {
        let column = discretize(&[2.6, 1.4], &[1.0, 2.0], &[1.0, 2.0], &[1.0, 2.0], 1.0).unwrap();
        assert_eq!(column.len(), 4);
        assert_eq!(column.layer_range(0), Some(0..3));
        assert_eq!(column.layer_range(1), Some(3..4));
    }

    #[test]
    fn test_zero_cell_layer_rejected() {
        let err = discretize(&[10.0, 0.4], &[1.0, 2.0], &[1.0, 2.0], &[1.0, 2.0], 1.0).unwrap_err();
        match err {
            SmapsError::InvalidParameter { param, .. } => assert_eq!(param, "thicknesses[1]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_and_nan_thickness_rejected() {
        assert!(discretize(&[-5.0], &[1.0], &[1.0], &[1.0], 1.0).is_err());
        assert!(discretize(&[f64::NAN], &[1.0], &[1.0], &[1.0], 1.0).is_err());
    }

    #[test]
    fn test_bad_cell_size_rejected() {
        for cell_size in [0.0, -1.0, f64::INFINITY] {
            let err = discretize(&[10.0], &[1.0], &[1.0], &[1.0], cell_size).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_PARAMETER");
        }
    }

    #[test]
    fn test_cell_count_overflow_rejected() {
        let err = discretize(&[1e300], &[1.0], &[1.0], &[1.0], 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert!(err.to_string().contains("overflows"));
        assert!(!err.to_string().contains("thinner"));

        let err = discretize(&[1e19, 1e19], &[1.0; 2], &[1.0; 2], &[1.0; 2], 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_accumulated_drift_rejected() {
        // Three layers of 1.4 round to 1 cell each: 3 cells for 4.2 m
        let err = discretize(&[1.4, 1.4, 1.4], &[1.0; 3], &[1.0; 3], &[1.0; 3], 1.0).unwrap_err();
        assert!(err.to_string().contains("drift"));
    }

    #[test]
    fn test_discretize_model() {
        let model = LayerListModel::constant(&[50.0, 50.0], &[2800.0, 3000.0], &[1400.0, 1500.0], &[2000.0, 2100.0])
            .unwrap();
        let column = discretize_model(&model, DEFAULT_CELL_SIZE).unwrap();
        assert_eq!(column.len(), 100);
        assert_relative_eq!(column.total_depth(), model.total_thickness());
        assert_eq!(column.vp()[49], 2800.0);
        assert_eq!(column.vp()[50], 3000.0);
    }
}
