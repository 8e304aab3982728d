//! Helpers shared by the batch commands

use anyhow::{bail, Result};
use colored::{ColoredString, Colorize};
use tracing::warn;

use crate::config::SpecGraphConfig;
use crate::fs::{load_specs, LoadFailure, LoadedSpec, SpecCorpus};
use crate::graph::resolve_identifier;
use crate::spec::SpecStatus;

pub fn load_corpus(config: &SpecGraphConfig) -> Result<SpecCorpus> {
    load_specs(&config.specs_path(), &config.primary)
}

/// Pick the specs named by `selectors`, or every spec when none are given.
///
/// Selectors resolve like dependency references (`45` finds `045-name`).
/// Unknown selectors are reported and skipped; it is an error only when
/// nothing at all matches.
pub fn select_specs<'a>(corpus: &'a SpecCorpus, selectors: &[String]) -> Result<Vec<&'a LoadedSpec>> {
    if selectors.is_empty() {
        return Ok(corpus.specs.iter().collect());
    }

    let known = corpus.ids();
    let mut selected: Vec<&LoadedSpec> = Vec::new();
    for selector in selectors {
        match resolve_identifier(selector, &known).and_then(|id| corpus.get(&id)) {
            Some(spec) if !selected.iter().any(|s| s.id == spec.id) => selected.push(spec),
            Some(_) => {}
            None => {
                warn!(selector = %selector, "No spec matches");
                eprintln!(
                    "{} No spec matches '{}'",
                    "WARNING:".yellow().bold(),
                    selector
                );
            }
        }
    }

    if selected.is_empty() {
        bail!("None of the requested specs were found");
    }
    Ok(selected)
}

pub fn print_failures(failures: &[LoadFailure]) {
    for failure in failures {
        eprintln!(
            "{} Could not load spec '{}': {}",
            "ERROR:".red().bold(),
            failure.id,
            failure.error
        );
    }
}

pub fn status_indicator(status: SpecStatus) -> ColoredString {
    match status {
        SpecStatus::Planned => "○".white().dimmed(),
        SpecStatus::InProgress => "●".blue().bold(),
        SpecStatus::Complete => "✓".green().bold(),
        SpecStatus::Archived => "▪".white().dimmed(),
    }
}
