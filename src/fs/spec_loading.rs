//! Load spec directories from disk.
//!
//! Every child directory of the spec root is one spec; its name is the spec
//! identifier. The primary document sits inside it next to any sibling
//! markdown sub-documents.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::parser::frontmatter::{extract, ExtractedHeader};
use crate::parser::markdown::MarkdownDocument;
use crate::spec::SpecRecord;
use crate::validate::SpecFile;

/// One spec directory read into memory
#[derive(Debug, Clone)]
pub struct LoadedSpec {
    pub id: String,
    pub dir: PathBuf,
    pub primary: SpecFile,
    /// Sibling `.md` files, sorted by filename
    pub siblings: Vec<SpecFile>,
    /// First `# ` heading of the primary document
    pub title: Option<String>,
    pub header: ExtractedHeader,
}

impl LoadedSpec {
    pub fn primary_path(&self) -> PathBuf {
        self.dir.join(&self.primary.filename)
    }

    pub fn record(&self) -> SpecRecord {
        SpecRecord::new(&self.id, self.header.metadata.clone())
    }
}

/// A spec directory that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadFailure {
    pub id: String,
    pub path: PathBuf,
    pub error: String,
}

/// Everything found under a spec root
#[derive(Debug, Clone, Default)]
pub struct SpecCorpus {
    pub specs: Vec<LoadedSpec>,
    pub failures: Vec<LoadFailure>,
}

impl SpecCorpus {
    pub fn records(&self) -> Vec<SpecRecord> {
        self.specs.iter().map(LoadedSpec::record).collect()
    }

    pub fn get(&self, id: &str) -> Option<&LoadedSpec> {
        self.specs.iter().find(|s| s.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.id.as_str()).collect()
    }
}

/// Load a single spec directory
pub fn load_spec(dir: &Path, primary: &str) -> Result<LoadedSpec> {
    let id = dir
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid spec directory name: {}", dir.display()))?
        .to_string();

    let primary_path = dir.join(primary);
    if !primary_path.is_file() {
        bail!("Missing {} in {}", primary, dir.display());
    }
    let primary_content = std::fs::read_to_string(&primary_path)
        .with_context(|| format!("Failed to read {}", primary_path.display()))?;

    let mut siblings = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read spec directory: {}", dir.display()))?
    {
        let path = entry?.path();

        // Only markdown sub-documents take part in validation
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if filename == primary {
            continue;
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        siblings.push(SpecFile::new(filename, content));
    }
    siblings.sort_by(|a, b| a.filename.cmp(&b.filename));

    let header = extract(&primary_content);
    if let Some(err) = &header.parse_error {
        debug!(spec = %id, error = %err, "Header did not parse");
    }

    Ok(LoadedSpec {
        title: MarkdownDocument::parse(&primary_content).title,
        id,
        dir: dir.to_path_buf(),
        primary: SpecFile::new(primary, primary_content),
        siblings,
        header,
    })
}

/// Load every spec under `specs_dir`.
///
/// Only an unreadable root is an error. A spec directory that fails to load
/// is recorded in `failures` and the rest are still loaded.
pub fn load_specs(specs_dir: &Path, primary: &str) -> Result<SpecCorpus> {
    let mut corpus = SpecCorpus::default();

    for entry in std::fs::read_dir(specs_dir)
        .with_context(|| format!("Failed to read specs directory: {}", specs_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.starts_with('.') {
            continue;
        }

        match load_spec(&path, primary) {
            Ok(spec) => corpus.specs.push(spec),
            Err(e) => {
                warn!(spec = %name, error = %e, "Skipping spec");
                corpus.failures.push(LoadFailure {
                    id: name,
                    path,
                    error: format!("{e:#}"),
                });
            }
        }
    }

    corpus.specs.sort_by(|a, b| a.id.cmp(&b.id));
    corpus.failures.sort_by(|a, b| a.id.cmp(&b.id));
    debug!(
        loaded = corpus.specs.len(),
        failed = corpus.failures.len(),
        "Loaded specs from {}",
        specs_dir.display()
    );

    Ok(corpus)
}
