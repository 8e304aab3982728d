//! Sub-document validation across specs
//! Usage: specgraph validate [SPEC...] [--json]

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use super::common::{load_corpus, print_failures, select_specs};
use crate::config::SpecGraphConfig;
use crate::fs::{LoadFailure, LoadedSpec};
use crate::validate::{validate, Issue, ValidationResult, ValidatorConfig};

#[derive(Debug, Serialize)]
pub struct SpecValidation {
    pub id: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

#[derive(Debug, Serialize)]
pub struct ValidateReport {
    pub passed: bool,
    pub specs: Vec<SpecValidation>,
    pub failures: Vec<LoadFailure>,
}

impl ValidateReport {
    pub fn failed_count(&self) -> usize {
        self.specs.iter().filter(|s| !s.result.passed()).count() + self.failures.len()
    }
}

pub fn build_report(
    specs: &[&LoadedSpec],
    failures: Vec<LoadFailure>,
    config: &ValidatorConfig,
) -> ValidateReport {
    let specs: Vec<SpecValidation> = specs
        .iter()
        .map(|spec| SpecValidation {
            id: spec.id.clone(),
            result: validate(&spec.primary, &spec.siblings, config),
        })
        .collect();

    ValidateReport {
        passed: failures.is_empty() && specs.iter().all(|s| s.result.passed()),
        specs,
        failures,
    }
}

pub fn execute(config: &SpecGraphConfig, selectors: &[String], json: bool) -> Result<()> {
    let corpus = load_corpus(config)?;
    let selected = select_specs(&corpus, selectors)?;

    // Load failures only matter when the whole corpus was asked for
    let failures = if selectors.is_empty() {
        corpus.failures.clone()
    } else {
        Vec::new()
    };
    let report = build_report(&selected, failures, &config.validation);
    info!(specs = report.specs.len(), passed = report.passed, "Validation finished");

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        print_report(&report);
    }

    if !report.passed {
        bail!("{} spec(s) failed validation", report.failed_count());
    }
    Ok(())
}

fn print_report(report: &ValidateReport) {
    print_failures(&report.failures);

    for spec in &report.specs {
        let result = &spec.result;
        let marker = if result.passed() {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        println!("{marker} {}", spec.id.bold());

        for issue in result.errors() {
            print_issue("ERROR:".red().bold().to_string(), issue);
        }
        for issue in result.warnings() {
            print_issue("WARNING:".yellow().bold().to_string(), issue);
        }
    }

    let failed = report.failed_count();
    println!();
    if failed == 0 {
        println!("{} {} spec(s) passed", "✓".green().bold(), report.specs.len());
    } else {
        println!("{} {failed} spec(s) failed", "✗".red().bold());
    }
}

fn print_issue(label: String, issue: &Issue) {
    println!("    {label} {}", issue.message);
    if let Some(suggestion) = &issue.suggestion {
        println!("      {} {suggestion}", "→".dimmed());
    }
}
