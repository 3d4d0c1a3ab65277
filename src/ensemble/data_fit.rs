//! Predicted data against the observed dispersion curve
//!
//! Every posterior sample predicts one phase-velocity curve at the observed
//! frequencies. The panel shows a lower and upper percentile of those
//! predictions per frequency, so every curve must be aligned with the
//! observations.

use serde::Serialize;

use super::summary::{check_percentiles, DEFAULT_PERCENTILES};
use crate::error::{Result, SmapsError};
use crate::forward::DispersionCurve;

/// Percentile band of predicted phase velocities, index-aligned with the
/// observed frequencies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedBand {
    pub frequencies: Vec<f64>,
    /// Percentile levels of `low` and `high`
    pub levels: (f64, f64),
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl PredictedBand {
    /// Wrap percentile curves computed elsewhere
    ///
    /// # Errors
    /// `EnsembleAlignment` if either curve differs in length from `observed`.
    pub fn new(observed: &DispersionCurve, levels: (f64, f64), low: Vec<f64>, high: Vec<f64>) -> Result<Self> {
        check_percentiles(levels.0, levels.1)?;
        for (field, curve) in [("predicted_low", &low), ("predicted_high", &high)] {
            check_length(field.to_string(), observed.len(), curve.len())?;
        }
        Ok(Self {
            frequencies: observed.frequencies().to_vec(),
            levels,
            low,
            high,
        })
    }

    /// 10th to 90th percentile band of raw predictions
    pub fn from_predictions(observed: &DispersionCurve, predictions: &[Vec<f64>]) -> Result<Self> {
        Self::from_predictions_at(observed, predictions, DEFAULT_PERCENTILES)
    }

    /// Percentile band of raw predictions, one curve per posterior sample
    ///
    /// Percentiles interpolate linearly between the closest ranks.
    ///
    /// # Errors
    /// - `InvalidParameter` for bad levels, no predictions, or a non-finite
    ///   predicted value
    /// - `EnsembleAlignment` if a prediction differs in length from `observed`
    pub fn from_predictions_at(
        observed: &DispersionCurve,
        predictions: &[Vec<f64>],
        levels: (f64, f64),
    ) -> Result<Self> {
        check_percentiles(levels.0, levels.1)?;
        if predictions.is_empty() {
            return Err(SmapsError::invalid_parameter("predictions", 0.0, "no predicted curves"));
        }
        for (index, curve) in predictions.iter().enumerate() {
            check_length(format!("predictions[{}]", index), observed.len(), curve.len())?;
            if let Some(&bad) = curve.iter().find(|v| !v.is_finite()) {
                return Err(SmapsError::invalid_parameter(
                    format!("predictions[{}]", index),
                    bad,
                    "predicted velocity is not finite",
                ));
            }
        }

        let mut low = Vec::with_capacity(observed.len());
        let mut high = Vec::with_capacity(observed.len());
        let mut column = Vec::with_capacity(predictions.len());
        for k in 0..observed.len() {
            column.clear();
            column.extend(predictions.iter().map(|curve| curve[k]));
            column.sort_by(f64::total_cmp);
            low.push(percentile(&column, levels.0));
            high.push(percentile(&column, levels.1));
        }

        Ok(Self {
            frequencies: observed.frequencies().to_vec(),
            levels,
            low,
            high,
        })
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Fraction of observed velocities that fall inside the band
    pub fn coverage(&self, observed: &DispersionCurve) -> Result<f64> {
        check_length("observed".to_string(), self.len(), observed.len())?;
        if self.is_empty() {
            return Ok(0.0);
        }
        let inside = observed
            .velocities()
            .iter()
            .zip(self.low.iter().zip(&self.high))
            .filter(|(v, (lo, hi))| (**lo..=**hi).contains(*v))
            .count();
        Ok(inside as f64 / self.len() as f64)
    }
}

fn check_length(field: String, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(SmapsError::EnsembleAlignment { field, expected, actual });
    }
    Ok(())
}

/// Percentile of a sorted, non-empty slice
fn percentile(sorted: &[f64], level: f64) -> f64 {
    let rank = level / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}
