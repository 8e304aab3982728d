//! Relationship map for every spec
//! Usage: specgraph deps [--json]

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use super::common::{load_corpus, print_failures, status_indicator};
use crate::config::SpecGraphConfig;
use crate::fs::{LoadFailure, SpecCorpus};
use crate::graph::traversal::find_cycles;
use crate::graph::{resolve_references, DanglingReference, RelationshipMap};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepsReport {
    pub specs: RelationshipMap,
    pub dangling: Vec<DanglingReference>,
    pub cycles: Vec<Vec<String>>,
    pub failures: Vec<LoadFailure>,
}

pub fn build_report(corpus: &SpecCorpus) -> DepsReport {
    let records = resolve_references(&corpus.records());
    let map = RelationshipMap::build(&records);

    DepsReport {
        dangling: map.dangling(),
        cycles: find_cycles(&map),
        specs: map,
        failures: corpus.failures.clone(),
    }
}

pub fn execute(config: &SpecGraphConfig, json: bool) -> Result<()> {
    let corpus = load_corpus(config)?;
    let report = build_report(&corpus);

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
        return Ok(());
    }

    print_failures(&report.failures);
    println!(
        "{} ({} specs)\n",
        "Spec dependencies".bold(),
        report.specs.len()
    );

    for spec in &corpus.specs {
        let title = spec.title.as_deref().unwrap_or("");
        println!(
            "{} {}  {}",
            status_indicator(spec.header.metadata.status),
            spec.id.bold(),
            title.dimmed()
        );

        let Some(rel) = report.specs.get(&spec.id) else {
            continue;
        };
        print_edges("depends on", &rel.depends_on);
        print_edges("required by", &rel.required_by);
        print_edges("related", &rel.related);
    }

    if !report.cycles.is_empty() {
        println!();
        for cycle in &report.cycles {
            println!("{} Dependency cycle: {}", "WARNING:".yellow().bold(), cycle.join(" → "));
        }
    }
    if !report.dangling.is_empty() {
        println!();
        for d in &report.dangling {
            println!(
                "{} '{}' depends on unknown spec '{}'",
                "WARNING:".yellow().bold(),
                d.source,
                d.target
            );
        }
    }

    Ok(())
}

fn print_edges(label: &str, ids: &[String]) {
    if !ids.is_empty() {
        println!("    {} {}", format!("{label}:").dimmed(), ids.join(", "));
    }
}
