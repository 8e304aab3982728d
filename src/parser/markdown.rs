use regex::Regex;
use std::sync::LazyLock;

use super::frontmatter::split_frontmatter;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!?\[([^\]]*)\]\(\s*<?([^)\s>]+)>?(?:\s+"[^"]*")?\s*\)"#)
        .expect("Invalid regex pattern")
});

#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    pub title: Option<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub level: u8,
    pub title: String,
    pub content: String,
}

/// An inline `[text](target)` link found in a document body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink {
    pub text: String,
    pub target: String,
    /// 1-based line number within the scanned text
    pub line: usize,
}

impl MarkdownDocument {
    /// Parse the body of a document into heading sections.
    ///
    /// Any frontmatter header is skipped, and `#` lines inside fenced code
    /// blocks are not treated as headings.
    pub fn parse(content: &str) -> Self {
        let body = split_frontmatter(content).body;
        let sections = Self::parse_sections(body);
        let title = sections
            .iter()
            .find(|s| s.level == 1)
            .map(|s| s.title.clone());

        Self { title, sections }
    }

    fn parse_sections(body: &str) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut current_section: Option<Section> = None;
        let mut in_fence = false;

        for line in body.lines() {
            if is_fence(line) {
                in_fence = !in_fence;
            }

            if !in_fence && is_heading(line) {
                if let Some(section) = current_section.take() {
                    sections.push(section);
                }

                let level = line.chars().take_while(|&c| c == '#').count() as u8;
                let title = line.trim_start_matches('#').trim().to_string();

                current_section = Some(Section {
                    level,
                    title,
                    content: String::new(),
                });
            } else if let Some(ref mut section) = current_section {
                if !section.content.is_empty() {
                    section.content.push('\n');
                }
                section.content.push_str(line);
            }
        }

        if let Some(section) = current_section {
            sections.push(section);
        }

        sections
    }

    /// Find a section by title, ignoring case
    pub fn get_section(&self, title: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.title.eq_ignore_ascii_case(title))
    }
}

impl Section {
    pub fn trimmed_content(&self) -> String {
        self.content.trim().to_string()
    }

    /// First non-empty line of the section body
    pub fn first_line(&self) -> Option<&str> {
        self.content.lines().map(str::trim).find(|l| !l.is_empty())
    }
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

fn is_heading(line: &str) -> bool {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes) && line[hashes..].starts_with([' ', '\t'])
}

/// Collect inline links from markdown text, skipping fenced code blocks
pub fn extract_links(text: &str) -> Vec<MarkdownLink> {
    let mut links = Vec::new();
    let mut in_fence = false;

    for (idx, line) in text.lines().enumerate() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        for caps in LINK_RE.captures_iter(line) {
            links.push(MarkdownLink {
                text: caps[1].to_string(),
                target: caps[2].to_string(),
                line: idx + 1,
            });
        }
    }

    links
}

/// Normalize a link target that points at a file in the same directory.
///
/// Strips a leading `./`, any `#anchor` or `?query`, and percent-encoded
/// spaces. Returns `None` for URLs, pure anchors, absolute paths and
/// targets in other directories.
pub fn same_directory_target(target: &str) -> Option<String> {
    let target = target.trim();
    if target.starts_with('#') || target.starts_with('/') || target.contains("://") {
        return None;
    }
    if target.starts_with("mailto:") || target.starts_with("tel:") {
        return None;
    }

    let path = target.split(['#', '?']).next().unwrap_or_default();
    let mut path = path;
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }

    if path.is_empty() || path.contains('/') || path.contains('\\') {
        return None;
    }

    Some(path.replace("%20", " "))
}
