//! Eigenfunction kernels from the forward solver
//!
//! The solver itself is external. Whatever it returns is checked here so
//! depth and displacement arrays can be plotted against each other safely.

use log::debug;
use serde::{Deserialize, Serialize};

use super::velocity::VelocityModel;
use crate::error::{Result, SmapsError};

/// Normalized Rayleigh-wave displacement eigenfunction at one frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenFunction {
    /// Frequency (Hz)
    pub frequency: f64,
    pub depth: Vec<f64>,
    /// Vertical displacement
    pub uz: Vec<f64>,
    /// Radial displacement
    pub ur: Vec<f64>,
}

impl EigenFunction {
    /// Period in seconds
    pub fn period(&self) -> f64 {
        1.0 / self.frequency
    }

    /// Check that `uz` and `ur` match `depth` in length
    pub fn validate(&self) -> Result<()> {
        for (field, values) in [("uz", &self.uz), ("ur", &self.ur)] {
            if values.len() != self.depth.len() {
                return Err(SmapsError::KernelAlignment {
                    frequency: self.frequency,
                    field: field.to_string(),
                    expected: self.depth.len(),
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}

/// External forward-model / eigenfunction engine
pub trait ForwardModel {
    /// Fundamental-mode Rayleigh eigenfunctions at each period
    fn rayleigh_eigenfunctions(&self, model: &VelocityModel, periods: &[f64]) -> Result<Vec<EigenFunction>>;
}

/// Depth sensitivity kernels for a list of frequencies
///
/// Converts frequencies to periods, calls the solver once and verifies that
/// one aligned eigenfunction came back per frequency.
pub fn sensitivity_kernels<F: ForwardModel + ?Sized>(
    forward: &F,
    model: &VelocityModel,
    frequencies: &[f64],
) -> Result<Vec<EigenFunction>> {
    if let Some(&bad) = frequencies.iter().find(|f| !f.is_finite() || **f <= 0.0) {
        return Err(SmapsError::invalid_parameter("frequency", bad, "frequencies must be positive"));
    }

    let periods: Vec<f64> = frequencies.iter().map(|f| 1.0 / f).collect();
    debug!("Requesting {} eigenfunctions for a {}-row model", periods.len(), model.len());

    let kernels = forward.rayleigh_eigenfunctions(model, &periods)?;
    if kernels.len() != frequencies.len() {
        return Err(SmapsError::KernelAlignment {
            frequency: frequencies.first().copied().unwrap_or(0.0),
            field: "frequencies".to_string(),
            expected: frequencies.len(),
            actual: kernels.len(),
        });
    }
    for kernel in &kernels {
        kernel.validate()?;
    }
    Ok(kernels)
}
