//! Project configuration from `specgraph.toml`
//!
//! ```toml
//! [specs]
//! dir = "specs"
//! primary = "README.md"
//!
//! [validation]
//! max_lines = 400
//! warning_threshold = 3500
//! error_threshold = 5000
//! check_cross_references = true
//! ```
//!
//! Every key is optional. The file is layered over the defaults and CLI
//! flags are layered over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::validate::{ValidatorConfig, ValidatorOverrides};

pub const CONFIG_FILE: &str = "specgraph.toml";
pub const DEFAULT_SPECS_DIR: &str = "specs";
pub const DEFAULT_PRIMARY: &str = "README.md";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    specs: SpecsSection,
    validation: ValidatorOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SpecsSection {
    dir: Option<PathBuf>,
    primary: Option<String>,
}

/// Resolved configuration for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecGraphConfig {
    pub project_root: PathBuf,
    /// Spec directory, relative to `project_root` unless absolute
    pub specs_dir: PathBuf,
    /// Primary document filename inside each spec directory
    pub primary: String,
    pub validation: ValidatorConfig,
}

impl SpecGraphConfig {
    pub fn defaults(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            specs_dir: PathBuf::from(DEFAULT_SPECS_DIR),
            primary: DEFAULT_PRIMARY.to_string(),
            validation: ValidatorConfig::default(),
        }
    }

    /// Load `specgraph.toml` from `project_root`, falling back to defaults
    /// when the file does not exist.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::defaults(project_root));
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::from_toml(project_root, &content)
            .with_context(|| format!("Invalid configuration in {}", config_path.display()))
    }

    /// Parse configuration text and layer it over the defaults
    pub fn from_toml(project_root: &Path, content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).context("Failed to parse TOML")?;

        let mut config = Self::defaults(project_root);
        if let Some(dir) = file.specs.dir {
            config.specs_dir = dir;
        }
        if let Some(primary) = file.specs.primary {
            config.primary = primary;
        }
        config.validation = config.validation.with_overrides(&file.validation);
        config.validation.ensure_consistent()?;

        Ok(config)
    }

    /// Layer command-line values over the loaded configuration
    pub fn with_cli_overrides(
        mut self,
        specs_dir: Option<PathBuf>,
        validation: &ValidatorOverrides,
    ) -> Result<Self> {
        if let Some(dir) = specs_dir {
            self.specs_dir = dir;
        }
        self.validation = self.validation.with_overrides(validation);
        self.validation.ensure_consistent()?;
        Ok(self)
    }

    /// Absolute (or root-relative) path of the spec directory
    pub fn specs_path(&self) -> PathBuf {
        self.project_root.join(&self.specs_dir)
    }
}
