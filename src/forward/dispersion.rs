//! Observed and predicted dispersion curves

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmapsError};

/// Phase velocity as a function of frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDispersionCurve")]
pub struct DispersionCurve {
    frequencies: Vec<f64>,
    velocities: Vec<f64>,
}

#[derive(Deserialize)]
struct RawDispersionCurve {
    frequencies: Vec<f64>,
    velocities: Vec<f64>,
}

impl TryFrom<RawDispersionCurve> for DispersionCurve {
    type Error = SmapsError;

    fn try_from(raw: RawDispersionCurve) -> Result<Self> {
        Self::new(raw.frequencies, raw.velocities)
    }
}

impl DispersionCurve {
    pub fn new(frequencies: Vec<f64>, velocities: Vec<f64>) -> Result<Self> {
        if frequencies.len() != velocities.len() {
            return Err(SmapsError::invalid_model(format!(
                "dispersion curve has {} frequencies but {} velocities",
                frequencies.len(),
                velocities.len()
            )));
        }
        if let Some(&bad) = frequencies.iter().find(|f| !f.is_finite() || **f <= 0.0) {
            return Err(SmapsError::invalid_parameter("frequency", bad, "frequencies must be positive"));
        }
        Ok(Self {
            frequencies,
            velocities,
        })
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Wavelength of every point: velocity / frequency
    pub fn wavelengths(&self) -> Vec<f64> {
        self.velocities
            .iter()
            .zip(&self.frequencies)
            .map(|(v, f)| v / f)
            .collect()
    }

    pub fn max_wavelength(&self) -> Option<f64> {
        self.wavelengths().into_iter().reduce(f64::max)
    }
}
