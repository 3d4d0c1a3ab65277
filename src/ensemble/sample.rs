//! Trans-dimensional posterior samples
//!
//! Samples differ in length from one to the next, so they are stored
//! back-to-back in flat buffers with per-sample offsets rather than in a
//! fixed-shape array. A sample is immutable once pushed.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmapsError};

/// Arena of variable-length piecewise-constant profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleArena")]
pub struct SampleArena {
    nuclei: Vec<f64>,
    values: Vec<f64>,
    /// `offsets[i]..offsets[i + 1]` spans sample `i`
    offsets: Vec<usize>,
}

/// Unchecked wire form of [`SampleArena`]
#[derive(Deserialize)]
struct RawSampleArena {
    nuclei: Vec<f64>,
    values: Vec<f64>,
    offsets: Vec<usize>,
}

impl TryFrom<RawSampleArena> for SampleArena {
    type Error = SmapsError;

    /// Rebuild the arena sample by sample so every span passes `push`
    fn try_from(raw: RawSampleArena) -> Result<Self> {
        if raw.nuclei.len() != raw.values.len() {
            return Err(SmapsError::invalid_model(format!(
                "sample arena holds {} nuclei but {} values",
                raw.nuclei.len(),
                raw.values.len()
            )));
        }
        if raw.offsets.first() != Some(&0) || raw.offsets.last() != Some(&raw.nuclei.len()) {
            return Err(SmapsError::invalid_model(
                "sample offsets must start at 0 and end at the buffer length",
            ));
        }

        let mut arena = Self::new();
        for window in raw.offsets.windows(2) {
            let (start, end) = (window[0], window[1]);
            if start > end {
                return Err(SmapsError::invalid_model("sample offsets are not ascending"));
            }
            arena.push(&raw.nuclei[start..end], &raw.values[start..end])?;
        }
        Ok(arena)
    }
}

impl Default for SampleArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed view of one posterior sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleView<'a> {
    nuclei: &'a [f64],
    values: &'a [f64],
}

impl<'a> SampleView<'a> {
    /// Nuclei depths (layer-defining positions)
    pub fn nuclei(&self) -> &'a [f64] {
        self.nuclei
    }

    /// Per-layer values matching the nuclei
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Number of nuclei in this sample
    pub fn n_dimensions(&self) -> usize {
        self.nuclei.len()
    }
}

impl SampleArena {
    pub fn new() -> Self {
        Self {
            nuclei: Vec::new(),
            values: Vec::new(),
            offsets: vec![0],
        }
    }

    /// Append one sample
    ///
    /// # Errors
    /// `InvalidModel` when the sample is empty, when nuclei and values differ
    /// in length, or when a value is not finite.
    pub fn push(&mut self, nuclei: &[f64], values: &[f64]) -> Result<()> {
        if nuclei.is_empty() {
            return Err(SmapsError::invalid_model("posterior sample has no nuclei"));
        }
        if nuclei.len() != values.len() {
            return Err(SmapsError::invalid_model(format!(
                "posterior sample has {} nuclei but {} values",
                nuclei.len(),
                values.len()
            )));
        }
        if nuclei.iter().chain(values).any(|v| !v.is_finite()) {
            return Err(SmapsError::invalid_model("posterior sample holds a non-finite value"));
        }

        self.nuclei.extend_from_slice(nuclei);
        self.values.extend_from_slice(values);
        self.offsets.push(self.nuclei.len());
        Ok(())
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn span(&self, index: usize) -> Range<usize> {
        self.offsets[index]..self.offsets[index + 1]
    }

    /// Borrow sample `index`
    pub fn get(&self, index: usize) -> Option<SampleView<'_>> {
        if index >= self.len() {
            return None;
        }
        let span = self.span(index);
        Some(SampleView {
            nuclei: &self.nuclei[span.clone()],
            values: &self.values[span],
        })
    }

    /// Iterate over all samples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = SampleView<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Samples with exactly `n_dimensions` nuclei
    pub fn with_dimension(&self, n_dimensions: usize) -> impl Iterator<Item = SampleView<'_>> + '_ {
        self.iter().filter(move |s| s.n_dimensions() == n_dimensions)
    }

    /// `n_dimensions` of every sample
    pub fn dimensions(&self) -> Vec<usize> {
        self.offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Append every sample of `other`
    pub fn extend_from(&mut self, other: &SampleArena) {
        for sample in other.iter() {
            self.nuclei.extend_from_slice(sample.nuclei);
            self.values.extend_from_slice(sample.values);
            self.offsets.push(self.nuclei.len());
        }
    }
}

/// One Markov chain of saved posterior samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub id: usize,
    pub samples: SampleArena,
}

impl Chain {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            samples: SampleArena::new(),
        }
    }
}

/// Merge the samples of every chain into one arena
pub fn pool_chains(chains: &[Chain]) -> SampleArena {
    let mut pooled = SampleArena::new();
    for chain in chains {
        pooled.extend_from(&chain.samples);
    }
    pooled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> SampleArena {
        let mut arena = SampleArena::new();
        arena.push(&[10.0, 40.0], &[1500.0, 2000.0]).unwrap();
        arena.push(&[5.0, 20.0, 60.0], &[1400.0, 1800.0, 2100.0]).unwrap();
        arena.push(&[15.0, 30.0], &[1600.0, 1900.0]).unwrap();
        arena
    }

    #[test]
    fn test_variable_length_samples() {
        let arena = arena();
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.dimensions(), vec![2, 3, 2]);

        let second = arena.get(1).unwrap();
        assert_eq!(second.nuclei(), &[5.0, 20.0, 60.0]);
        assert_eq!(second.values(), &[1400.0, 1800.0, 2100.0]);
        assert!(arena.get(3).is_none());
    }

    #[test]
    fn test_malformed_samples_rejected() {
        let mut arena = SampleArena::new();
        assert!(arena.push(&[1.0, 2.0], &[1.0]).is_err());
        assert!(arena.push(&[], &[]).is_err());
        assert!(arena.push(&[f64::NAN], &[1.0]).is_err());
        assert!(arena.is_empty());
    }

    #[test]
    fn test_with_dimension() {
        let arena = arena();
        let two: Vec<_> = arena.with_dimension(2).collect();
        assert_eq!(two.len(), 2);
        assert_eq!(two[1].nuclei(), &[15.0, 30.0]);
        assert_eq!(arena.with_dimension(4).count(), 0);
    }

    #[test]
    fn test_default_arena_accepts_samples() {
        let mut arena = SampleArena::default();
        assert_eq!(arena, SampleArena::new());
        assert!(arena.is_empty());
        arena.push(&[1.0], &[2.0]).unwrap();
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_pool_chains() {
        let mut a = Chain::new(0);
        a.samples = arena();
        let mut b = Chain::new(1);
        b.samples.push(&[7.0], &[1700.0]).unwrap();

        let pooled = pool_chains(&[a, b]);
        assert_eq!(pooled.len(), 4);
        assert_eq!(pooled.get(3).unwrap().values(), &[1700.0]);
    }

    #[test]
    fn test_deserialize_round_trip() {
        let arena = arena();
        let json = serde_json::to_string(&arena).unwrap();
        assert_eq!(serde_json::from_str::<SampleArena>(&json).unwrap(), arena);

        let empty: SampleArena = serde_json::from_str(r#"{"nuclei":[],"values":[],"offsets":[0]}"#).unwrap();
        assert_eq!(empty, SampleArena::new());
    }

    #[test]
    fn test_deserialize_rejects_broken_offsets() {
        for json in [
            r#"{"nuclei":[1.0,2.0],"values":[5.0],"offsets":[0,2]}"#,
            r#"{"nuclei":[1.0,2.0],"values":[5.0,6.0],"offsets":[0,3]}"#,
            r#"{"nuclei":[1.0,2.0],"values":[5.0,6.0],"offsets":[0,2,1,2]}"#,
            r#"{"nuclei":[1.0,2.0],"values":[5.0,6.0],"offsets":[0,0,2]}"#,
            r#"{"nuclei":[],"values":[],"offsets":[]}"#,
        ] {
            assert!(serde_json::from_str::<SampleArena>(json).is_err(), "accepted {}", json);
        }

        let chain = r#"{"id":3,"samples":{"nuclei":[1.0,2.0],"values":[5.0],"offsets":[0,2]}}"#;
        assert!(serde_json::from_str::<Chain>(chain).is_err());
    }
}
