//! Posterior over the number of dimensions
//!
//! Unit-width bins centred on every admissible dimension count, normalized
//! to a density, next to the uniform prior over the same range.

use serde::Serialize;

use super::sample::SampleArena;
use crate::error::{Result, SmapsError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionPosterior {
    /// Dimension counts `min..=max`, one per bin
    pub dimensions: Vec<usize>,
    /// Raw sample counts per bin
    pub counts: Vec<usize>,
    /// Counts normalized so the histogram integrates to one
    pub density: Vec<f64>,
    /// Uniform prior density `1 / (1 + max - min)`
    pub prior_density: f64,
    /// Samples whose dimension fell outside `min..=max`
    pub outside: usize,
}

impl DimensionPosterior {
    pub fn from_samples(samples: &SampleArena, min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(SmapsError::invalid_parameter(
                "n_dimensions_min",
                min as f64,
                format!("exceeds n_dimensions_max = {}", max),
            ));
        }

        let dimensions: Vec<usize> = (min..=max).collect();
        let mut counts = vec![0usize; dimensions.len()];
        let mut outside = 0;
        for n in samples.dimensions() {
            if (min..=max).contains(&n) {
                counts[n - min] += 1;
            } else {
                outside += 1;
            }
        }

        let inside: usize = counts.iter().sum();
        let density = counts
            .iter()
            .map(|&c| if inside == 0 { 0.0 } else { c as f64 / inside as f64 })
            .collect();

        Ok(Self {
            dimensions,
            counts,
            density,
            prior_density: 1.0 / (1 + max - min) as f64,
            outside,
        })
    }

    /// Dimension count with the most samples (lowest wins a tie)
    pub fn mode(&self) -> Option<usize> {
        let best = *self.counts.iter().max()?;
        if best == 0 {
            return None;
        }
        self.counts
            .iter()
            .position(|&c| c == best)
            .map(|i| self.dimensions[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples(dims: &[usize]) -> SampleArena {
        let mut arena = SampleArena::new();
        for &n in dims {
            let nuclei: Vec<f64> = (0..n).map(|i| i as f64 * 10.0).collect();
            let values = vec![1500.0; n];
            arena.push(&nuclei, &values).unwrap();
        }
        arena
    }

    #[test]
    fn test_histogram_density() {
        let posterior = DimensionPosterior::from_samples(&samples(&[2, 3, 3, 4, 3]), 2, 5).unwrap();
        assert_eq!(posterior.dimensions, vec![2, 3, 4, 5]);
        assert_eq!(posterior.counts, vec![1, 3, 1, 0]);
        assert_relative_eq!(posterior.density.iter().sum::<f64>(), 1.0);
        assert_relative_eq!(posterior.prior_density, 0.25);
        assert_eq!(posterior.mode(), Some(3));
    }

    #[test]
    fn test_out_of_range_samples_counted() {
        let posterior = DimensionPosterior::from_samples(&samples(&[1, 2, 9]), 2, 4).unwrap();
        assert_eq!(posterior.outside, 2);
        assert_eq!(posterior.counts, vec![1, 0, 0]);
    }

    #[test]
    fn test_empty_arena() {
        let posterior = DimensionPosterior::from_samples(&SampleArena::new(), 1, 3).unwrap();
        assert!(posterior.density.iter().all(|d| *d == 0.0));
        assert_eq!(posterior.mode(), None);
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(DimensionPosterior::from_samples(&SampleArena::new(), 5, 2).is_err());
    }
}
