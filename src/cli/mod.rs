//! CLI Module
//!
//! Command-line front-end for listing presets and discretizing models.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// smaps - layered earth models for trans-dimensional surface-wave inversion
#[derive(Parser, Debug)]
#[command(name = "smaps")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for discretized columns
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `depth thickness vp vs rho` line per cell
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the bundled reference models
    #[command(name = "presets")]
    Presets,

    /// Discretize a preset or a model file into uniform cells
    #[command(name = "discretize")]
    Discretize {
        /// Name of a bundled preset
        #[arg(short, long, conflicts_with = "model")]
        preset: Option<String>,

        /// JSON layer-list model file
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Cell size (overrides the config file)
        #[arg(short, long)]
        cell_size: Option<f64>,

        /// JSON discretization config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the panel grid used for per-chain plots
    #[command(name = "layout")]
    Layout {
        /// Number of chains
        #[arg(short = 'n', long)]
        chains: usize,
    },

    /// Print the parameter summary of an inversion settings file
    #[command(name = "settings")]
    Settings {
        /// JSON inversion settings
        path: PathBuf,
    },
}
