//! Posterior ensembles
//!
//! Trans-dimensional samples from the sampler, the statistics boundary that
//! turns them into depth-aligned curves, the dimension and data-noise
//! posteriors, and the per-chain panel layout.

pub mod data_fit;
pub mod dimensions;
pub mod layout;
pub mod noise;
pub mod sample;
pub mod summary;

pub use data_fit::PredictedBand;
pub use dimensions::DimensionPosterior;
pub use layout::SubplotLayout;
pub use noise::{NoisePosterior, DEFAULT_NOISE_BINS};
pub use sample::{pool_chains, Chain, SampleArena, SampleView};
pub use summary::{
    DepthGrid, EnsembleSummary, EnsembleSummaryAdapter, RawSummary, TessellationStatistics,
    DEFAULT_PERCENTILES,
};
