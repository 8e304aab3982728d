//! Thresholds for sub-document validation

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_LINES: usize = 400;
pub const DEFAULT_WARNING_THRESHOLD: usize = 3500;
pub const DEFAULT_ERROR_THRESHOLD: usize = 5000;

/// Fully resolved validator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Line count above which a document gets a split suggestion
    pub max_lines: usize,
    /// Estimated tokens at which a sub-document is flagged as elevated complexity
    pub warning_threshold: usize,
    /// Estimated tokens at which a sub-document fails validation
    pub error_threshold: usize,
    pub check_cross_references: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            error_threshold: DEFAULT_ERROR_THRESHOLD,
            check_cross_references: true,
        }
    }
}

/// Partial configuration layered over the defaults (config file, CLI flags).
///
/// Each field overrides only itself; setting one threshold never resets another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorOverrides {
    pub max_lines: Option<usize>,
    pub warning_threshold: Option<usize>,
    pub error_threshold: Option<usize>,
    pub check_cross_references: Option<bool>,
}

impl ValidatorConfig {
    /// Apply an override layer, keeping current values for unset fields
    pub fn with_overrides(self, overrides: &ValidatorOverrides) -> Self {
        Self {
            max_lines: overrides.max_lines.unwrap_or(self.max_lines),
            warning_threshold: overrides.warning_threshold.unwrap_or(self.warning_threshold),
            error_threshold: overrides.error_threshold.unwrap_or(self.error_threshold),
            check_cross_references: overrides
                .check_cross_references
                .unwrap_or(self.check_cross_references),
        }
    }

    /// Reject threshold combinations the size check cannot classify
    pub fn ensure_consistent(&self) -> Result<()> {
        if self.warning_threshold >= self.error_threshold {
            bail!(
                "warning_threshold ({}) must be lower than error_threshold ({})",
                self.warning_threshold,
                self.error_threshold
            );
        }
        if self.max_lines == 0 {
            bail!("max_lines must be greater than zero");
        }
        Ok(())
    }
}
