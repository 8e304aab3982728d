//! Header validity per spec, with inferred metadata for invalid headers
//! Usage: specgraph check [--json]

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use colored::Colorize;
use serde::Serialize;

use super::common::{load_corpus, print_failures, status_indicator};
use crate::config::SpecGraphConfig;
use crate::fs::{LoadFailure, LoadedSpec};
use crate::git::GitHistory;
use crate::infer::{infer_on, HistoryQuery, InferredMetadata, SpecHistory};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCheck {
    pub id: String,
    pub has_header: bool,
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    /// Only present for specs without a valid header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred: Option<InferredMetadata>,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub specs: Vec<HeaderCheck>,
    pub failures: Vec<LoadFailure>,
}

impl CheckReport {
    pub fn invalid_count(&self) -> usize {
        self.specs.iter().filter(|s| !s.valid).count()
    }
}

pub fn check_spec(
    spec: &LoadedSpec,
    history: Option<&dyn SpecHistory>,
    today: NaiveDate,
) -> HeaderCheck {
    let header = &spec.header;
    let inferred = (!header.has_valid_header).then(|| {
        let path = spec.primary_path();
        let query = history.map(|backend| HistoryQuery::new(backend, &path));
        infer_on(&spec.primary.content, query, today)
    });

    HeaderCheck {
        id: spec.id.clone(),
        has_header: header.has_header,
        valid: header.has_valid_header,
        problems: header.problems.clone(),
        parse_error: header.parse_error.clone(),
        inferred,
    }
}

pub fn execute(config: &SpecGraphConfig, json: bool) -> Result<()> {
    let corpus = load_corpus(config)?;
    let history = GitHistory::discover(&config.project_root);
    let today = Utc::now().date_naive();

    let report = CheckReport {
        specs: corpus
            .specs
            .iter()
            .map(|spec| check_spec(spec, history.as_ref().map(|h| h as &dyn SpecHistory), today))
            .collect(),
        failures: corpus.failures.clone(),
    };

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
        return Ok(());
    }

    print_failures(&report.failures);
    for check in &report.specs {
        if check.valid {
            println!("{} {}", "✓".green().bold(), check.id);
            continue;
        }

        println!("{} {}  {}", "✗".red().bold(), check.id.bold(), check.problems.join("; ").dimmed());
        if let Some(err) = &check.parse_error {
            println!("    {err}");
        }
        if let Some(inferred) = &check.inferred {
            println!(
                "    {} {} {} (from {}), created {} (from {})",
                "inferred:".dimmed(),
                status_indicator(inferred.status),
                inferred.status,
                inferred.status_source,
                inferred.created_date,
                inferred.date_source
            );
        }
    }

    let invalid = report.invalid_count();
    println!();
    if invalid == 0 {
        println!("{} All {} headers valid", "✓".green().bold(), report.specs.len());
    } else {
        println!(
            "{} {invalid} of {} specs need a header; run `specgraph bootstrap` to add them",
            "!".yellow().bold(),
            report.specs.len()
        );
    }

    Ok(())
}
