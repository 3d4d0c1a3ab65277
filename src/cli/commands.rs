//! CLI Command Implementations

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::info;

use super::OutputFormat;
use crate::config::{DiscretizeConfig, InversionSettings};
use crate::discretize::{discretize_model, DepthColumn};
use crate::ensemble::SubplotLayout;
use crate::error::{Result, SmapsError};
use crate::model::{LayerListModel, PresetRegistry};

/// List bundled presets.
pub fn list_presets() -> Result<()> {
    println!("{:<28} {:>6} {:>10}  description", "name", "layers", "depth");
    println!("{:-<72}", "");
    for preset in PresetRegistry::global().iter() {
        println!(
            "{:<28} {:>6} {:>10.1}  {}",
            preset.name,
            preset.model.num_layers(),
            preset.model.total_thickness(),
            preset.description
        );
    }
    Ok(())
}

/// Resolve the model named on the command line.
pub fn resolve_model(preset: Option<&str>, model: Option<&Path>) -> Result<LayerListModel> {
    match (preset, model) {
        (Some(name), _) => Ok(PresetRegistry::global().get(name)?.clone()),
        (None, Some(path)) => {
            info!("Loading model: {}", path.display());
            let content = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        (None, None) => Err(SmapsError::invalid_model("pass --preset or --model")),
    }
}

/// Render a column as whitespace-separated rows.
pub fn format_table(column: &DepthColumn) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# depth thickness vp vs rho");
    for (depth, row) in column.depths().iter().zip(column.rows()) {
        let _ = writeln!(
            out,
            "{:.3} {:.3} {:.3} {:.3} {:.3}",
            depth, row[0], row[1], row[2], row[3]
        );
    }
    out
}

/// Discretize a preset or model file.
pub fn discretize(
    preset: Option<&str>,
    model: Option<&Path>,
    cell_size: Option<f64>,
    config: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let mut settings = match config {
        Some(path) => DiscretizeConfig::load(path)?,
        None => DiscretizeConfig::default(),
    };
    if let Some(size) = cell_size {
        settings.cell_size = size;
    }
    settings.validate()?;

    let layers = resolve_model(preset, model)?;
    let column = discretize_model(&layers, settings.cell_size)?;
    info!(
        "Discretized {} layers into {} cells of {}",
        layers.num_layers(),
        column.len(),
        column.cell_size()
    );

    let rendered = match format {
        OutputFormat::Table => format_table(&column),
        OutputFormat::Json => serde_json::to_string_pretty(&column)?,
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            println!("Column written: {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Show the subplot grid for `chains` panels.
pub fn show_layout(chains: usize) -> Result<()> {
    let layout = SubplotLayout::for_panels(chains)?;
    println!("{} chains -> {} rows x {} cols", chains, layout.rows, layout.cols);
    for index in 0..layout.slots() {
        if let Some((row, col)) = layout.position(index) {
            let label = if index < chains {
                format!("chain {}", index)
            } else {
                "blank".to_string()
            };
            println!("  [{}, {}] {}", row, col, label);
        }
    }
    Ok(())
}

/// Print an inversion settings summary.
pub fn show_settings(path: &Path) -> Result<()> {
    let settings = InversionSettings::load(path)?;
    print!("{}", settings.summary_text());
    println!(
        "Saved samples per chain: {}",
        settings.saved_samples_per_chain()
    );
    Ok(())
}
