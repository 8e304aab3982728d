use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use specgraph::validate::ValidatorOverrides;

#[derive(Parser)]
#[command(name = "specgraph")]
#[command(about = "Spec metadata, dependency graph and sub-document validation", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Project root containing specgraph.toml (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Spec directory, relative to the project root
    #[arg(long, global = true)]
    pub specs_dir: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dependency graph of all specs
    Deps {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate sub-documents of specs (exits non-zero when any spec fails)
    Validate {
        /// Specs to validate, by full id, number or name (default: all)
        specs: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Report header validity and inferred metadata for invalid headers
    Check {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate headers for specs that lack a valid one
    Bootstrap {
        /// Specs to bootstrap (default: all)
        specs: Vec<String>,

        /// Write the new headers instead of printing them
        #[arg(long)]
        write: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ThresholdArgs {
    /// Line count above which a document gets a split warning
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Estimated tokens at which a sub-document gets a warning
    #[arg(long)]
    pub warning_threshold: Option<usize>,

    /// Estimated tokens at which a sub-document fails
    #[arg(long)]
    pub error_threshold: Option<usize>,

    /// Skip the broken cross-reference check
    #[arg(long)]
    pub no_cross_references: bool,
}

impl ThresholdArgs {
    pub fn overrides(&self) -> ValidatorOverrides {
        ValidatorOverrides {
            max_lines: self.max_lines,
            warning_threshold: self.warning_threshold,
            error_threshold: self.error_threshold,
            check_cross_references: self.no_cross_references.then_some(false),
        }
    }
}
