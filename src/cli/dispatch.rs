use anyhow::{Context, Result};
use specgraph::commands::{bootstrap, check, deps, validate};
use specgraph::config::SpecGraphConfig;
use specgraph::validate::ValidatorOverrides;
use std::path::PathBuf;

use super::types::{Cli, Commands};

pub fn dispatch(cli: Cli) -> Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let overrides = match &cli.command {
        Commands::Validate { thresholds, .. } => thresholds.overrides(),
        _ => ValidatorOverrides::default(),
    };
    let config = load_config(root, cli.specs_dir, &overrides)?;

    match cli.command {
        Commands::Deps { json } => deps::execute(&config, json),
        Commands::Validate { specs, json, .. } => validate::execute(&config, &specs, json),
        Commands::Check { json } => check::execute(&config, json),
        Commands::Bootstrap { specs, write } => bootstrap::execute(&config, &specs, write),
    }
}

fn load_config(
    root: PathBuf,
    specs_dir: Option<PathBuf>,
    overrides: &ValidatorOverrides,
) -> Result<SpecGraphConfig> {
    SpecGraphConfig::load(&root)?.with_cli_overrides(specs_dir, overrides)
}
