use serde::Serialize;
use tracing::debug;

use super::structured;
use crate::spec::metadata::SpecMetadata;

/// A document split at its `---` header delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// Text between the delimiters, `None` when the document has no header
    pub header: Option<&'a str>,
    /// Everything after the closing delimiter (the whole text without a header)
    pub body: &'a str,
}

/// Split a document into header block and body.
///
/// A header exists only when the very first line is `---` and a later line
/// is `---` as well; both must start at column 0. Indented `---` lines inside
/// block scalars therefore never close the header. An unclosed header means
/// the document has no header at all.
///
/// # Example
///
/// ```text
/// ---
/// status: planned
/// created: 2025-01-15
/// ---
/// # Markdown content here
/// ```
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_header = FrontmatterSplit {
        header: None,
        body: content,
    };
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return no_header;
    };
    if first.trim_end() != "---" {
        return no_header;
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == "---" {
            return FrontmatterSplit {
                header: Some(&text[header_start..offset]),
                body: &text[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    no_header
}

/// Document body with any header removed
pub fn body(content: &str) -> &str {
    split_frontmatter(content).body
}

/// Outcome of reading a document's header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedHeader {
    pub has_header: bool,
    pub has_valid_header: bool,
    pub metadata: SpecMetadata,
    /// Parser message when the header block was malformed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    /// Reasons the header is not valid (empty when valid)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<String>,
}

/// Extract spec metadata from a document.
///
/// Never fails. A malformed header is reported through `has_valid_header`
/// and `parse_error` so batch callers can keep going. A header is valid when
/// it parses, carries a recognized `status`, and has a parseable `created` date.
pub fn extract(content: &str) -> ExtractedHeader {
    let Some(header) = split_frontmatter(content).header else {
        return ExtractedHeader {
            has_header: false,
            has_valid_header: false,
            metadata: SpecMetadata::default(),
            parse_error: None,
            problems: vec!["no frontmatter header".to_string()],
        };
    };

    let map = match structured::parse(header) {
        Ok(map) => map,
        Err(e) => {
            debug!(error = %e, "Frontmatter failed to parse");
            return ExtractedHeader {
                has_header: true,
                has_valid_header: false,
                metadata: SpecMetadata::default(),
                parse_error: Some(e.to_string()),
                problems: vec!["frontmatter could not be parsed".to_string()],
            };
        }
    };

    let metadata = SpecMetadata::from_mapping(&map);
    let mut problems = Vec::new();

    if !SpecMetadata::status_recognized(&map) {
        problems.push(match crate::spec::field_value(&map, "status") {
            Some(raw) if !raw.is_null() => format!(
                "unrecognized status '{}'",
                raw.to_scalar_string().unwrap_or_default()
            ),
            _ => "missing status".to_string(),
        });
    }
    if metadata.created.is_none() {
        problems.push("missing or invalid created date".to_string());
    }

    ExtractedHeader {
        has_header: true,
        has_valid_header: problems.is_empty(),
        metadata,
        parse_error: None,
        problems,
    }
}
