//! Generate headers for specs that lack a valid one
//! Usage: specgraph bootstrap [SPEC...] [--write]

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use colored::Colorize;
use tracing::{info, warn};

use super::common::{load_corpus, select_specs};
use crate::config::SpecGraphConfig;
use crate::fs::LoadedSpec;
use crate::git::GitHistory;
use crate::infer::{
    bootstrap_document, infer_on, BootstrapOutcome, HistoryQuery, InferredMetadata, SpecHistory,
};
use crate::parser::frontmatter::split_frontmatter;

/// Outcome for one spec, with the inference it used (if any)
#[derive(Debug)]
pub struct SpecBootstrap {
    pub id: String,
    pub inferred: Option<InferredMetadata>,
    pub outcome: BootstrapOutcome,
}

pub fn bootstrap_spec(
    spec: &LoadedSpec,
    history: Option<&dyn SpecHistory>,
    today: NaiveDate,
) -> SpecBootstrap {
    if spec.header.has_valid_header {
        return SpecBootstrap {
            id: spec.id.clone(),
            inferred: None,
            outcome: BootstrapOutcome::Unchanged,
        };
    }

    let path = spec.primary_path();
    let query = history.map(|backend| HistoryQuery::new(backend, &path));
    let inferred = infer_on(&spec.primary.content, query, today);
    let outcome = bootstrap_document(&spec.primary.content, &inferred);

    SpecBootstrap {
        id: spec.id.clone(),
        inferred: Some(inferred),
        outcome,
    }
}

pub fn execute(config: &SpecGraphConfig, selectors: &[String], write: bool) -> Result<()> {
    let corpus = load_corpus(config)?;
    let selected = select_specs(&corpus, selectors)?;
    let history = GitHistory::discover(&config.project_root);
    let today = Utc::now().date_naive();

    let mut rewritten = 0;
    let mut problems = 0;

    for spec in selected {
        let result = bootstrap_spec(spec, history.as_ref().map(|h| h as &dyn SpecHistory), today);

        match &result.outcome {
            BootstrapOutcome::Unchanged => {
                println!("{} {} already has a valid header", "✓".green().bold(), spec.id);
            }
            BootstrapOutcome::Malformed { error } => {
                problems += 1;
                warn!(spec = %spec.id, error = %error, "Header needs manual repair");
                println!(
                    "{} {} has a header that cannot be parsed; fix it by hand",
                    "✗".red().bold(),
                    spec.id.bold()
                );
                println!("    {error}");
            }
            BootstrapOutcome::Bootstrapped { content } => {
                if write {
                    let path = spec.primary_path();
                    match std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))
                    {
                        Ok(()) => {
                            rewritten += 1;
                            info!(spec = %spec.id, "Header written");
                            println!("{} {} header written", "✓".green().bold(), spec.id.bold());
                        }
                        Err(e) => {
                            problems += 1;
                            println!("{} {e:#}", "ERROR:".red().bold());
                        }
                    }
                } else {
                    rewritten += 1;
                    println!("{} {}", "+".cyan().bold(), spec.id.bold());
                    if let Some(header) = split_frontmatter(content).header {
                        for line in header.lines() {
                            println!("    {}", line.cyan());
                        }
                    }
                }
            }
        }
    }

    if rewritten > 0 && !write {
        println!("\nRe-run with --write to apply {rewritten} header(s)");
    }
    if problems > 0 {
        bail!("{problems} spec(s) could not be bootstrapped");
    }
    Ok(())
}
