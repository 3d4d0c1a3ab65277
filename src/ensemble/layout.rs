//! Panel grid for per-chain plots

use serde::Serialize;

use crate::error::{Result, SmapsError};

/// Row/column arrangement of one panel per chain
///
/// `rows = floor(sqrt(n))`, `cols = ceil(n / rows)`. Panels past the last
/// chain stay blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubplotLayout {
    pub rows: usize,
    pub cols: usize,
    pub panels: usize,
}

impl SubplotLayout {
    pub fn for_panels(n_panels: usize) -> Result<Self> {
        if n_panels == 0 {
            return Err(SmapsError::invalid_parameter(
                "n_chains",
                0.0,
                "need at least one chain to lay out",
            ));
        }
        let rows = integer_sqrt(n_panels);
        let cols = n_panels.div_ceil(rows);
        Ok(Self {
            rows,
            cols,
            panels: n_panels,
        })
    }

    /// Total number of grid slots, used or blank
    pub fn slots(&self) -> usize {
        self.rows * self.cols
    }

    /// (row, col) of panel `index`, row-major
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.slots()).then(|| (index / self.cols, index % self.cols))
    }

    /// Panels in the first column carry the depth axis label
    pub fn is_first_column(&self, index: usize) -> bool {
        index % self.cols == 0
    }

    /// Panels in the last row carry the velocity axis label
    pub fn is_bottom_row(&self, index: usize) -> bool {
        index >= (self.rows - 1) * self.cols
    }

    /// Slot indices that receive no chain
    pub fn blank_panels(&self) -> std::ops::Range<usize> {
        self.panels..self.slots()
    }
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
