//! gridwin - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// gridwin - windowed TUI viewer for very large grids
#[derive(Parser, Debug)]
#[command(name = "gridwin")]
#[command(version)]
#[command(about = "Windowed (virtualized) TUI viewer for very large fixed-row-height grids")]
pub struct Args {
    /// Number of synthetic items when no data file is given
    #[arg(long, default_value = "10000")]
    pub items: usize,

    /// Path to a JSON file containing an array of item strings
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Cells per row (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub columns: Option<u64>,

    /// Row height in terminal lines
    #[arg(long)]
    pub row_height: Option<f64>,

    /// Extra rows rendered beyond the visible window
    #[arg(long)]
    pub overscan: Option<usize>,

    /// Scroll offset applied once at startup, in terminal lines
    #[arg(long)]
    pub initial_offset: Option<f64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to log file (overrides config)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Full precedence chain: Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = gridwin::config::load_config_with_precedence(args.config.clone())?;
        let merged = gridwin::config::merge_config(config_file);
        let with_env = gridwin::config::apply_env_overrides(merged);
        let mut resolved = gridwin::config::apply_cli_overrides(
            with_env,
            args.columns.map(|c| c as usize),
            args.row_height,
            args.overscan,
            args.initial_offset,
        );
        if let Some(log_file) = args.log_file.clone() {
            resolved.log_file_path = log_file;
        }
        resolved
    };

    gridwin::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let data = match &args.data {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            let items: Vec<String> = serde_json::from_str(&contents)?;
            info!(count = items.len(), path = ?path, "loaded items from file");
            items
        }
        None => (0..args.items).map(|i| format!("item {i:05}")).collect(),
    };

    gridwin::view::run(data, &config)?;

    Ok(())
}
