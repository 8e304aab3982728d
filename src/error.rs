//! Typed errors for the structured header parser.
//!
//! Everything above the parser (loader, config, git, commands) uses
//! `anyhow::Result`; these variants exist so callers can tell an
//! indentation problem apart from any other malformed line.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Inconsistent indentation on line {line}: expected {expected} spaces, found {found} ({content:?})"
    )]
    Indentation {
        line: usize,
        content: String,
        expected: usize,
        found: usize,
    },

    #[error("Parse error on line {line}: {reason} ({content:?})")]
    Syntax {
        line: usize,
        content: String,
        reason: String,
    },
}

impl ParseError {
    /// 1-based line number within the parsed block
    pub fn line(&self) -> usize {
        match self {
            ParseError::Indentation { line, .. } | ParseError::Syntax { line, .. } => *line,
        }
    }

    pub fn is_indentation(&self) -> bool {
        matches!(self, ParseError::Indentation { .. })
    }
}
