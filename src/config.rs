//! Configuration files
//!
//! Two JSON documents are read by the CLI: discretization settings and the
//! sampler parameterization that produced a posterior ensemble. The latter is
//! only recorded and summarized here; the sampler runs elsewhere.

use std::fs;
use std::path::Path;

use log::info;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::discretize::DEFAULT_CELL_SIZE;
use crate::error::{Result, SmapsError};
use crate::model::DensityRelation;

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    info!("Loading configuration: {}", path.display());
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}

fn format_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

// ============================================================================
// Discretization
// ============================================================================

/// Settings for turning a preset or model file into a depth column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscretizeConfig {
    /// Cell size in model units
    pub cell_size: f64,
    /// Every `grid_stride`-th cell is kept in the ensemble depth grid
    pub grid_stride: usize,
}

impl Default for DiscretizeConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            grid_stride: 1,
        }
    }
}

impl DiscretizeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(SmapsError::invalid_parameter("cell_size", self.cell_size, "must be positive"));
        }
        if self.grid_stride == 0 {
            return Err(SmapsError::invalid_parameter("grid_stride", 0.0, "must be at least 1"));
        }
        Ok(())
    }
}

// ============================================================================
// Sampler parameterization
// ============================================================================

/// Voronoi nuclei positions (depth control)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoronoiSettings {
    pub vmin: f64,
    pub vmax: f64,
    pub perturb_std: f64,
}

/// Data noise parameterization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseSettings {
    pub std_min: f64,
    pub std_max: f64,
    pub std_perturb_std: f64,
}

/// Trans-dimensional bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSettings {
    pub n_dimensions: usize,
    pub n_dimensions_min: usize,
    pub n_dimensions_max: usize,
}

/// Vs parameterization and the relations tying Vp and density to it
///
/// The Vs prior is bounded by `vs_min..vs_max`, each bound pinned at the
/// matching depth in `vs_position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VsSettings {
    pub vs_min: Vec<f64>,
    pub vs_max: Vec<f64>,
    pub vs_position: Vec<f64>,
    pub vs_perturb_std: f64,
    pub vp_vs: f64,
    /// Forward density relation applied to `vp = vs * vp_vs`
    pub density: DensityRelation,
}

impl VsSettings {
    fn validate(&self) -> Result<()> {
        let points = self.vs_position.len();
        if points == 0 {
            return Err(SmapsError::invalid_parameter("vs.vs_position", 0.0, "needs at least one depth"));
        }
        for (param, len) in [("vs.vs_min", self.vs_min.len()), ("vs.vs_max", self.vs_max.len())] {
            if len != points {
                return Err(SmapsError::invalid_parameter(
                    param,
                    len as f64,
                    format!("must hold one bound per vs_position ({})", points),
                ));
            }
        }
        if let Some((low, high)) = self.vs_min.iter().zip(&self.vs_max).find(|(low, high)| !(low < high)) {
            return Err(SmapsError::invalid_parameter(
                "vs.vs_min",
                *low,
                format!("must be below its upper bound {}", high),
            ));
        }
        if self.vp_vs <= 0.0 {
            return Err(SmapsError::invalid_parameter("vs.vp_vs", self.vp_vs, "must be positive"));
        }
        Ok(())
    }
}

/// Markov chain Monte Carlo run lengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McmcSettings {
    pub n_chains: usize,
    pub n_iterations: usize,
    pub burnin_iterations: usize,
    pub save_every: usize,
}

/// Full sampler parameterization of an inversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InversionSettings {
    pub voronoi: VoronoiSettings,
    pub noise: NoiseSettings,
    pub dimensions: DimensionSettings,
    pub vs: VsSettings,
    pub mcmc: McmcSettings,
}

/// Titled block of `key = value` lines for the parameter text panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySection {
    pub title: &'static str,
    pub entries: Vec<(&'static str, String)>,
}

impl InversionSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let settings: Self = load_json(path)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn validate(&self) -> Result<()> {
        let ordered = [
            ("voronoi.vmin", self.voronoi.vmin, self.voronoi.vmax),
            ("noise.std_min", self.noise.std_min, self.noise.std_max),
        ];
        for (param, low, high) in ordered {
            if !(low < high) {
                return Err(SmapsError::invalid_parameter(
                    param,
                    low,
                    format!("must be below its upper bound {}", high),
                ));
            }
        }

        let d = &self.dimensions;
        if d.n_dimensions_min > d.n_dimensions_max
            || !(d.n_dimensions_min..=d.n_dimensions_max).contains(&d.n_dimensions)
        {
            return Err(SmapsError::invalid_parameter(
                "dimensions.n_dimensions",
                d.n_dimensions as f64,
                format!("must lie in {}..={}", d.n_dimensions_min, d.n_dimensions_max),
            ));
        }

        self.vs.validate()?;

        let m = &self.mcmc;
        for (param, count) in [
            ("mcmc.n_chains", m.n_chains),
            ("mcmc.n_iterations", m.n_iterations),
            ("mcmc.save_every", m.save_every),
        ] {
            if count == 0 {
                return Err(SmapsError::invalid_parameter(param, 0.0, "must be at least 1"));
            }
        }
        if m.burnin_iterations >= m.n_iterations {
            return Err(SmapsError::invalid_parameter(
                "mcmc.burnin_iterations",
                m.burnin_iterations as f64,
                format!("must be below n_iterations = {}", m.n_iterations),
            ));
        }
        Ok(())
    }

    /// Samples each chain keeps after burn-in
    pub fn saved_samples_per_chain(&self) -> usize {
        let m = &self.mcmc;
        (m.n_iterations - m.burnin_iterations) / m.save_every
    }

    /// Sections of the parameter panel, in display order
    pub fn summary_sections(&self) -> Vec<SummarySection> {
        vec![
            SummarySection {
                title: "VORONOI POSITIONS (DEPTH-CONTROL)",
                entries: vec![
                    ("vmin", self.voronoi.vmin.to_string()),
                    ("vmax", self.voronoi.vmax.to_string()),
                    ("perturb_std", self.voronoi.perturb_std.to_string()),
                ],
            },
            SummarySection {
                title: "NOISE PARAMETERIZATION",
                entries: vec![
                    ("std_min", self.noise.std_min.to_string()),
                    ("std_max", self.noise.std_max.to_string()),
                    ("std_perturb_std", self.noise.std_perturb_std.to_string()),
                ],
            },
            SummarySection {
                title: "TD PARAMETERIZATION",
                entries: vec![
                    ("n_dimensions", self.dimensions.n_dimensions.to_string()),
                    ("n_dimensions_min", self.dimensions.n_dimensions_min.to_string()),
                    ("n_dimensions_max", self.dimensions.n_dimensions_max.to_string()),
                ],
            },
            SummarySection {
                title: "VS PARAMETERIZATION",
                entries: vec![
                    ("vs_min", format_list(&self.vs.vs_min)),
                    ("vs_max", format_list(&self.vs.vs_max)),
                    ("vs_position", format_list(&self.vs.vs_position)),
                    ("vs_perturb_std", self.vs.vs_perturb_std.to_string()),
                ],
            },
            SummarySection {
                title: "VP and RHO RELATIONSHIPS to VS",
                entries: vec![
                    ("vp_vs", self.vs.vp_vs.to_string()),
                    ("forward_vp", format!("vp = vs * {}", self.vs.vp_vs)),
                    ("forward_rho", self.vs.density.to_string()),
                ],
            },
            SummarySection {
                title: "MCMC PARAMETERIZATION",
                entries: vec![
                    ("n_chains", self.mcmc.n_chains.to_string()),
                    ("n_iterations", self.mcmc.n_iterations.to_string()),
                    ("burnin_iterations", self.mcmc.burnin_iterations.to_string()),
                    ("save_every", self.mcmc.save_every.to_string()),
                ],
            },
        ]
    }

    /// Plain-text rendering of [`summary_sections`](Self::summary_sections)
    pub fn summary_text(&self) -> String {
        let mut text = String::new();
        for section in self.summary_sections() {
            text.push_str(section.title);
            text.push('\n');
            for (key, value) in &section.entries {
                text.push_str(&format!("    {} = {}\n", key, value));
            }
            text.push('\n');
        }
        text
    }
}
