//! Boundary to the tessellation statistics library
//!
//! The statistics themselves are computed by an external collaborator. This
//! module hands it a depth grid plus samples and checks that whatever comes
//! back is aligned with the grid before anything downstream plots it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::sample::{pool_chains, Chain, SampleArena};
use crate::discretize::DepthColumn;
use crate::error::{Result, SmapsError};

/// Percentile levels plotted around the ensemble median
pub const DEFAULT_PERCENTILES: (f64, f64) = (10.0, 90.0);

/// Require `0 <= low < high <= 100`
pub(crate) fn check_percentiles(low: f64, high: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&low) || !(0.0..=100.0).contains(&high) || low >= high {
        return Err(SmapsError::invalid_parameter(
            "percentiles",
            low,
            format!("need 0 <= low < high <= 100, got ({}, {})", low, high),
        ));
    }
    Ok(())
}

// ============================================================================
// Depth Grid
// ============================================================================

/// Strictly increasing depths at which ensemble statistics are evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDepthGrid")]
pub struct DepthGrid {
    depths: Vec<f64>,
}

#[derive(Deserialize)]
struct RawDepthGrid {
    depths: Vec<f64>,
}

impl TryFrom<RawDepthGrid> for DepthGrid {
    type Error = SmapsError;

    fn try_from(raw: RawDepthGrid) -> Result<Self> {
        Self::new(raw.depths)
    }
}

impl DepthGrid {
    /// # Errors
    /// `InvalidParameter` when the grid is empty, holds a non-finite depth,
    /// or is not strictly increasing.
    pub fn new(depths: Vec<f64>) -> Result<Self> {
        if depths.is_empty() {
            return Err(SmapsError::invalid_parameter("depth_grid", 0.0, "grid is empty"));
        }
        if let Some(bad) = depths.iter().find(|d| !d.is_finite()) {
            return Err(SmapsError::invalid_parameter("depth_grid", *bad, "depth is not finite"));
        }
        if let Some(w) = depths.windows(2).find(|w| w[1] <= w[0]) {
            return Err(SmapsError::invalid_parameter(
                "depth_grid",
                w[1],
                format!("depths must increase strictly, {} follows {}", w[1], w[0]),
            ));
        }
        Ok(Self { depths })
    }

    /// `n` evenly spaced depths from `start` to `end` inclusive
    pub fn linspace(start: f64, end: f64, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(SmapsError::invalid_parameter(
                "n",
                n as f64,
                "a depth grid needs at least two points",
            ));
        }
        let step = (end - start) / (n - 1) as f64;
        Self::new((0..n).map(|i| start + step * i as f64).collect())
    }

    /// Cell-top depths of a discretized column, every `stride` cells
    pub fn from_column(column: &DepthColumn, stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(SmapsError::invalid_parameter("stride", 0.0, "stride must be at least 1"));
        }
        Self::new(column.depths().into_iter().step_by(stride).collect())
    }

    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}

// ============================================================================
// Collaborator contract
// ============================================================================

/// Raw per-depth statistics as returned by the collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSummary {
    pub mean: Vec<f64>,
    pub median: Vec<f64>,
    pub std: Vec<f64>,
    /// Lower and upper percentile curves
    pub percentiles: (Vec<f64>, Vec<f64>),
}

/// External tessellation statistics library
///
/// Implementations evaluate mean, median, standard deviation and a pair of
/// percentiles of the sampled profiles at every grid depth.
pub trait TessellationStatistics {
    fn summarize(
        &self,
        grid: &DepthGrid,
        samples: &SampleArena,
        percentiles: (f64, f64),
    ) -> Result<RawSummary>;
}

/// Ensemble statistics aligned with a depth grid: index `k` is depth `k`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSummary {
    pub depths: Vec<f64>,
    pub mean: Vec<f64>,
    pub median: Vec<f64>,
    pub std: Vec<f64>,
    /// Percentile levels of `low` and `high`
    pub levels: (f64, f64),
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl EnsembleSummary {
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Width of the percentile band at every depth
    pub fn band_width(&self) -> Vec<f64> {
        self.high.iter().zip(&self.low).map(|(h, l)| h - l).collect()
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// Calls the statistics collaborator and enforces grid alignment
#[derive(Debug, Clone)]
pub struct EnsembleSummaryAdapter<S> {
    statistics: S,
    percentiles: (f64, f64),
}

impl<S: TessellationStatistics> EnsembleSummaryAdapter<S> {
    pub fn new(statistics: S) -> Self {
        Self {
            statistics,
            percentiles: DEFAULT_PERCENTILES,
        }
    }

    /// Request percentile levels other than 10/90
    pub fn with_percentiles(mut self, low: f64, high: f64) -> Result<Self> {
        check_percentiles(low, high)?;
        self.percentiles = (low, high);
        Ok(self)
    }

    pub fn percentiles(&self) -> (f64, f64) {
        self.percentiles
    }

    /// Summarize one set of samples on `grid`
    ///
    /// # Errors
    /// `EnsembleAlignment` if any returned curve differs in length from the
    /// grid. Collaborator errors are passed through unchanged.
    pub fn summarize(&self, grid: &DepthGrid, samples: &SampleArena) -> Result<EnsembleSummary> {
        debug!(
            "Summarizing {} samples on a {}-point depth grid",
            samples.len(),
            grid.len()
        );

        let raw = self.statistics.summarize(grid, samples, self.percentiles)?;

        let (low, high) = raw.percentiles;
        for (field, curve) in [
            ("mean", &raw.mean),
            ("median", &raw.median),
            ("std", &raw.std),
            ("percentile_low", &low),
            ("percentile_high", &high),
        ] {
            if curve.len() != grid.len() {
                warn!(
                    "Statistics collaborator returned {} values for {}, grid has {}",
                    curve.len(),
                    field,
                    grid.len()
                );
                return Err(SmapsError::EnsembleAlignment {
                    field: field.to_string(),
                    expected: grid.len(),
                    actual: curve.len(),
                });
            }
        }

        Ok(EnsembleSummary {
            depths: grid.depths().to_vec(),
            mean: raw.mean,
            median: raw.median,
            std: raw.std,
            levels: self.percentiles,
            low,
            high,
        })
    }

    /// Summarize the pooled samples of every chain in a single call
    pub fn summarize_chains(&self, grid: &DepthGrid, chains: &[Chain]) -> Result<EnsembleSummary> {
        self.summarize(grid, &pool_chains(chains))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretize::discretize;
    use std::cell::Cell;

    /// Returns constant curves, optionally one short on the mean
    struct FlatStatistics {
        value: f64,
        truncate_mean: bool,
        calls: Cell<usize>,
    }

    impl FlatStatistics {
        fn new(value: f64) -> Self {
            Self {
                value,
                truncate_mean: false,
                calls: Cell::new(0),
            }
        }
    }

    impl TessellationStatistics for FlatStatistics {
        fn summarize(
            &self,
            grid: &DepthGrid,
            _samples: &SampleArena,
            _percentiles: (f64, f64),
        ) -> Result<RawSummary> {
            self.calls.set(self.calls.get() + 1);
            let n = grid.len();
            let mean_len = if self.truncate_mean { n - 1 } else { n };
            Ok(RawSummary {
                mean: vec![self.value; mean_len],
                median: vec![self.value; n],
                std: vec![0.0; n],
                percentiles: (vec![self.value - 1.0; n], vec![self.value + 1.0; n]),
            })
        }
    }

    struct FailingStatistics;

    impl TessellationStatistics for FailingStatistics {
        fn summarize(&self, _: &DepthGrid, _: &SampleArena, _: (f64, f64)) -> Result<RawSummary> {
            Err(SmapsError::Collaborator {
                collaborator: "tessellation statistics".to_string(),
                source: "no samples after burn-in".into(),
            })
        }
    }

    #[test]
    fn test_grid_must_increase() {
        assert!(DepthGrid::new(vec![0.0, 1.0, 1.0]).is_err());
        assert!(DepthGrid::new(vec![2.0, 1.0]).is_err());
        assert!(DepthGrid::new(vec![]).is_err());
        assert!(DepthGrid::new(vec![0.0, f64::NAN]).is_err());
        assert!(DepthGrid::new(vec![0.0, 0.5, 3.0]).is_ok());
    }

    #[test]
    fn test_linspace_grid() {
        let grid = DepthGrid::linspace(0.0, 100.0, 5).unwrap();
        assert_eq!(grid.depths(), &[0.0, 25.0, 50.0, 75.0, 100.0]);
        assert!(DepthGrid::linspace(0.0, 100.0, 1).is_err());
    }

    #[test]
    fn test_grid_from_column() {
        let column = discretize(&[10.0], &[1.0], &[1.0], &[1.0], 1.0).unwrap();
        let grid = DepthGrid::from_column(&column, 5).unwrap();
        assert_eq!(grid.depths(), &[0.0, 5.0]);
        assert!(DepthGrid::from_column(&column, 0).is_err());
    }

    #[test]
    fn test_aligned_summary() {
        let grid = DepthGrid::linspace(0.0, 90.0, 10).unwrap();
        let adapter = EnsembleSummaryAdapter::new(FlatStatistics::new(1500.0));
        let summary = adapter.summarize(&grid, &SampleArena::new()).unwrap();
        assert_eq!(summary.len(), 10);
        assert_eq!(summary.depths[3], 30.0);
        assert_eq!(summary.levels, (10.0, 90.0));
        assert!(summary.band_width().iter().all(|w| *w == 2.0));
    }

    #[test]
    fn test_short_mean_is_alignment_error() {
        let grid = DepthGrid::linspace(0.0, 90.0, 10).unwrap();
        let mut statistics = FlatStatistics::new(1500.0);
        statistics.truncate_mean = true;
        let err = EnsembleSummaryAdapter::new(statistics)
            .summarize(&grid, &SampleArena::new())
            .unwrap_err();
        match err {
            SmapsError::EnsembleAlignment {
                field,
                expected,
                actual,
            } => {
                assert_eq!(field, "mean");
                assert_eq!(expected, 10);
                assert_eq!(actual, 9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_collaborator_error_propagates() {
        let grid = DepthGrid::linspace(0.0, 10.0, 3).unwrap();
        let err = EnsembleSummaryAdapter::new(FailingStatistics)
            .summarize(&grid, &SampleArena::new())
            .unwrap_err();
        assert_eq!(err.error_code(), "COLLABORATOR_ERROR");
    }

    #[test]
    fn test_chains_are_pooled_into_one_call() {
        let grid = DepthGrid::linspace(0.0, 10.0, 3).unwrap();
        let adapter = EnsembleSummaryAdapter::new(FlatStatistics::new(2.0));
        let chains = vec![Chain::new(0), Chain::new(1), Chain::new(2)];
        adapter.summarize_chains(&grid, &chains).unwrap();
        assert_eq!(adapter.statistics.calls.get(), 1);
    }

    #[test]
    fn test_percentile_levels_validated() {
        assert!(EnsembleSummaryAdapter::new(FlatStatistics::new(1.0))
            .with_percentiles(90.0, 10.0)
            .is_err());
        let adapter = EnsembleSummaryAdapter::new(FlatStatistics::new(1.0))
            .with_percentiles(5.0, 95.0)
            .unwrap();
        assert_eq!(adapter.percentiles(), (5.0, 95.0));
    }

    #[test]
    fn test_deserialized_grid_is_checked() {
        let grid: DepthGrid = serde_json::from_str(r#"{"depths":[0.0,5.0,10.0]}"#).unwrap();
        assert_eq!(grid.len(), 3);
        assert!(serde_json::from_str::<DepthGrid>(r#"{"depths":[0.0,5.0,5.0]}"#).is_err());
        assert!(serde_json::from_str::<DepthGrid>(r#"{"depths":[]}"#).is_err());
    }
}
