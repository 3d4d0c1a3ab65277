//! Posterior over the data-noise standard deviation
//!
//! Equal-width bins spanning the noise prior `std_min..=std_max`, normalized
//! to a density, next to the uniform prior density `1 / (std_max - std_min)`.

use serde::Serialize;

use crate::config::NoiseSettings;
use crate::error::{Result, SmapsError};

/// Number of histogram bins used for the noise panel
pub const DEFAULT_NOISE_BINS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoisePosterior {
    /// Bin edges from `std_min` to `std_max`, one more than the bin count
    pub edges: Vec<f64>,
    /// Raw sample counts per bin
    pub counts: Vec<usize>,
    /// Counts normalized so the histogram integrates to one
    pub density: Vec<f64>,
    /// Uniform prior density `1 / (std_max - std_min)`
    pub prior_density: f64,
    /// Samples that fell outside the prior range
    pub outside: usize,
}

impl NoisePosterior {
    /// Histogram the sampled noise standard deviations
    ///
    /// # Errors
    /// `InvalidParameter` when `std_min >= std_max`, when `bins` is zero, or
    /// when a sampled value is not finite.
    pub fn from_samples(noise_std: &[f64], prior: &NoiseSettings, bins: usize) -> Result<Self> {
        let (min, max) = (prior.std_min, prior.std_max);
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(SmapsError::invalid_parameter(
                "noise.std_min",
                min,
                format!("must be below std_max = {}", max),
            ));
        }
        if bins == 0 {
            return Err(SmapsError::invalid_parameter("bins", 0.0, "need at least one bin"));
        }
        if let Some(&bad) = noise_std.iter().find(|v| !v.is_finite()) {
            return Err(SmapsError::invalid_parameter("noise_std", bad, "sampled noise is not finite"));
        }

        let width = (max - min) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { max } else { min + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        let mut outside = 0;
        for &std in noise_std {
            if std < min || std > max {
                outside += 1;
                continue;
            }
            // The upper edge belongs to the last bin
            let bin = (((std - min) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }

        let inside: usize = counts.iter().sum();
        let density = counts
            .iter()
            .map(|&c| if inside == 0 { 0.0 } else { c as f64 / (inside as f64 * width) })
            .collect();

        Ok(Self {
            edges,
            counts,
            density,
            prior_density: 1.0 / (max - min),
            outside,
        })
    }

    /// Midpoint of every bin
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }

    /// Centre of the fullest bin (lowest wins a tie)
    pub fn mode(&self) -> Option<f64> {
        let best = *self.counts.iter().max()?;
        if best == 0 {
            return None;
        }
        let index = self.counts.iter().position(|&c| c == best)?;
        self.centers().get(index).copied()
    }
}
