//! smaps CLI
//!
//! Command-line interface for the layered-model tools.

use clap::Parser;
use env_logger::Env;
use log::info;

use smaps::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("smaps v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("smaps v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    let result = match cmd {
        Commands::Presets => commands::list_presets(),
        Commands::Discretize {
            preset,
            model,
            cell_size,
            config,
            format,
            output,
        } => commands::discretize(
            preset.as_deref(),
            model.as_deref(),
            cell_size,
            config.as_deref(),
            format,
            output.as_deref(),
        ),
        Commands::Layout { chains } => commands::show_layout(chains),
        Commands::Settings { path } => commands::show_settings(&path),
    };

    result.map_err(|err| {
        let hint = err.recovery_hint();
        anyhow::Error::new(err).context(hint)
    })
}
