//! Restricted YAML-style block parser for spec headers.
//!
//! Supports:
//! - `key: value` scalars (quoted strings, booleans, null, integers, floats, plain text)
//! - block lists (`- item`) with one consistent indentation per list
//! - nested mappings under deeper indentation, including mappings inside list items
//! - flow lists (`[a, "b", 3]`) and `|` / `>` block scalars
//!
//! This is deliberately not a general YAML parser. Anything ambiguous, most
//! importantly sibling list items at different indentation, is rejected with a
//! [`ParseError`] naming the offending line instead of being guessed at.


use regex::Regex;
use std::sync::LazyLock;

use super::value::{Mapping, Value};
use crate::error::ParseError;

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("Invalid regex pattern"));

static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:[0-9]+\.[0-9]*|\.[0-9]+|[0-9]+)(?:[eE][-+]?[0-9]+)?$")
        .expect("Invalid regex pattern")
});

/// Parse a header block into a key/value mapping.
///
/// Empty input, or input without any top-level `key:` line, yields an empty
/// mapping rather than an error.
pub fn parse(text: &str) -> Result<Mapping, ParseError> {
    let mut parser = Parser::new(text)?;

    if !parser.has_top_level_key() {
        return Ok(Mapping::new());
    }

    parser.parse_mapping(0)
}

#[derive(Debug, Clone)]
struct Line {
    /// 1-based line number within the block
    number: usize,
    indent: usize,
    /// Line text without leading or trailing whitespace
    content: String,
    raw: String,
    /// Blank or comment-only line
    skippable: bool,
}

struct Parser {
    lines: Vec<Line>,
    pos: usize,
}

impl Parser {
    fn new(text: &str) -> Result<Self, ParseError> {
        let mut lines = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let trimmed = raw.trim();
            let leading = &raw[..raw.len() - raw.trim_start().len()];
            let skippable = trimmed.is_empty() || trimmed.starts_with('#');

            if !skippable && leading.chars().any(|c| c != ' ') {
                let reason = if leading.contains('\t') {
                    "tab character in indentation"
                } else {
                    "non-space character in indentation"
                };
                return Err(ParseError::Syntax {
                    line: idx + 1,
                    content: raw.to_string(),
                    reason: reason.to_string(),
                });
            }

            lines.push(Line {
                number: idx + 1,
                indent: leading.len(),
                content: trimmed.to_string(),
                raw: raw.trim_end().to_string(),
                skippable,
            });
        }

        Ok(Self { lines, pos: 0 })
    }

    fn has_top_level_key(&self) -> bool {
        self.lines.iter().any(|line| {
            !line.skippable
                && line.indent == 0
                && !is_list_item(&line.content)
                && split_key(&line.content).is_some()
        })
    }

    fn skip_blank(&mut self) {
        while self.pos < self.lines.len() && self.lines[self.pos].skippable {
            self.pos += 1;
        }
    }

    fn current(&mut self) -> Option<Line> {
        self.skip_blank();
        self.lines.get(self.pos).cloned()
    }

    fn parse_mapping(&mut self, indent: usize) -> Result<Mapping, ParseError> {
        let mut map = Mapping::new();

        while let Some(line) = self.current() {
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(indentation_error(&line, indent));
            }
            if is_list_item(&line.content) {
                return Err(syntax_error(
                    &line,
                    "list item where a `key: value` entry was expected",
                ));
            }

            let (key, rest) = split_key(&line.content)
                .ok_or_else(|| syntax_error(&line, "expected `key: value`"))?;

            if map.contains_key(&key) {
                return Err(syntax_error(&line, &format!("duplicate key '{key}'")));
            }

            self.pos += 1;
            let value = self.parse_value(indent, &rest, &line, true)?;
            map.insert(key, value);
        }

        Ok(map)
    }

    /// Parse whatever follows `key:` (`after_key`) or `- ` on `line`.
    fn parse_value(
        &mut self,
        indent: usize,
        rest: &str,
        line: &Line,
        after_key: bool,
    ) -> Result<Value, ParseError> {
        let rest = strip_comment(rest).trim();

        if rest.is_empty() {
            return self.parse_nested(indent, after_key);
        }

        if is_block_indicator(rest) {
            return self.parse_block_scalar(indent, rest);
        }

        parse_inline(rest, line)
    }

    /// Parse the block under a key or list item whose value was left empty.
    fn parse_nested(&mut self, parent_indent: usize, after_key: bool) -> Result<Value, ParseError> {
        let Some(next) = self.current() else {
            return Ok(Value::Null);
        };

        if next.indent > parent_indent {
            if is_list_item(&next.content) {
                return Ok(Value::List(self.parse_list(next.indent, parent_indent, after_key)?));
            }
            return Ok(Value::Map(self.parse_mapping(next.indent)?));
        }

        // `key:` followed by `- item` at the key's own column. An empty `-`
        // item never opens a list this way; its next sibling is not its child.
        if after_key && next.indent == parent_indent && is_list_item(&next.content) {
            return Ok(Value::List(self.parse_list(parent_indent, parent_indent, true)?));
        }

        Ok(Value::Null)
    }

    fn parse_list(
        &mut self,
        indent: usize,
        parent_indent: usize,
        after_key: bool,
    ) -> Result<Vec<Value>, ParseError> {
        let mut items = Vec::new();

        while let Some(line) = self.current() {
            if line.indent < indent {
                if line.indent > parent_indent {
                    return Err(indentation_error(&line, indent));
                }
                // Under a key, an item back at the key's column is a misplaced
                // sibling; under a list item it belongs to the outer list.
                if after_key && line.indent == parent_indent && is_list_item(&line.content) {
                    return Err(indentation_error(&line, indent));
                }
                break;
            }
            if line.indent > indent {
                return Err(indentation_error(&line, indent));
            }
            if !is_list_item(&line.content) {
                if indent == parent_indent {
                    break;
                }
                return Err(syntax_error(&line, "expected a `- item` entry"));
            }

            let after_dash = &line.content[1..];
            let rest = after_dash.trim_start();
            let item_indent = indent + 1 + (after_dash.len() - rest.len());

            if !rest.is_empty() && !starts_flow_or_quote(rest) && split_key(rest).is_some() {
                // `- key: value` opens a mapping whose keys align with `key`
                self.lines[self.pos].indent = item_indent;
                self.lines[self.pos].content = rest.to_string();
                items.push(Value::Map(self.parse_mapping(item_indent)?));
                continue;
            }

            self.pos += 1;
            items.push(self.parse_value(indent, rest, &line, false)?);
        }

        Ok(items)
    }

    fn parse_block_scalar(&mut self, parent_indent: usize, indicator: &str) -> Result<Value, ParseError> {
        let mut collected: Vec<String> = Vec::new();
        let mut block_indent: Option<usize> = None;

        while let Some(line) = self.lines.get(self.pos) {
            if line.content.is_empty() {
                collected.push(String::new());
                self.pos += 1;
                continue;
            }
            if line.indent <= parent_indent {
                break;
            }

            let expected = *block_indent.get_or_insert(line.indent);
            if line.indent < expected {
                return Err(indentation_error(line, expected));
            }

            let Some(text) = line.raw.get(expected..) else {
                return Err(indentation_error(line, expected));
            };
            collected.push(text.to_string());
            self.pos += 1;
        }

        while collected.last().is_some_and(|l| l.is_empty()) {
            collected.pop();
        }

        let mut text = if indicator.starts_with('|') {
            collected.join("\n")
        } else {
            fold_lines(&collected)
        };

        if !text.is_empty() && !indicator.ends_with('-') {
            text.push('\n');
        }

        Ok(Value::String(text))
    }
}

fn indentation_error(line: &Line, expected: usize) -> ParseError {
    ParseError::Indentation {
        line: line.number,
        content: line.raw.clone(),
        expected,
        found: line.indent,
    }
}

fn syntax_error(line: &Line, reason: &str) -> ParseError {
    ParseError::Syntax {
        line: line.number,
        content: line.raw.clone(),
        reason: reason.to_string(),
    }
}

fn is_list_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

fn is_block_indicator(text: &str) -> bool {
    matches!(text, "|" | "|-" | "|+" | ">" | ">-" | ">+")
}

fn starts_flow_or_quote(text: &str) -> bool {
    text.starts_with(['[', '{', '"', '\''])
}

/// Folded (`>`) scalars join lines with spaces; blank lines become newlines.
fn fold_lines(lines: &[String]) -> String {
    let mut out = String::new();
    let mut pending_space = false;

    for line in lines {
        if line.is_empty() {
            out.push('\n');
            pending_space = false;
            continue;
        }
        if pending_space {
            out.push(' ');
        }
        out.push_str(line);
        pending_space = true;
    }

    out
}

/// Split `key: rest` at the first colon outside quotes that is followed by
/// whitespace or the end of the line.
///
/// Returns `None` when the line has no such colon, so `http://host` is never
/// mistaken for a key.
fn split_key(content: &str) -> Option<(String, String)> {
    if content.starts_with(['[', '{']) {
        return None;
    }

    if let Some(quote) = content.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let close = content[1..].find(quote)? + 1;
        let after = content[close + 1..].trim_start();
        let rest = after.strip_prefix(':')?;
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let key = content[1..close].to_string();
        return (!key.is_empty()).then(|| (key, rest.to_string()));
    }

    let bytes = content.as_bytes();
    for (idx, ch) in content.char_indices() {
        if ch == '#' && idx > 0 && bytes[idx - 1].is_ascii_whitespace() {
            return None;
        }
        if ch != ':' {
            continue;
        }
        let next = bytes.get(idx + 1);
        if next.is_none() || next.is_some_and(|b| b.is_ascii_whitespace()) {
            let key = content[..idx].trim();
            if key.is_empty() {
                return None;
            }
            return Some((key.to_string(), content[idx + 1..].to_string()));
        }
    }

    None
}

/// Drop a trailing ` # comment` that sits outside quotes.
fn strip_comment(text: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut prev_ws = true;

    for (idx, ch) in text.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => {
                if prev_ws {
                    quote = Some(ch);
                }
            }
            None if ch == '#' && prev_ws => return &text[..idx],
            None => {}
        }
        prev_ws = ch.is_whitespace();
    }

    text
}

fn parse_inline(text: &str, line: &Line) -> Result<Value, ParseError> {
    if text.starts_with('[') {
        return parse_flow_list(text, line);
    }
    if text.starts_with('{') {
        if text.replace(' ', "") == "{}" {
            return Ok(Value::Map(Mapping::new()));
        }
        return Err(syntax_error(line, "flow mappings are not supported"));
    }
    parse_scalar(text, line)
}

fn parse_flow_list(text: &str, line: &Line) -> Result<Value, ParseError> {
    let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) else {
        return Err(syntax_error(line, "unterminated flow list"));
    };

    let mut items = Vec::new();
    for piece in split_outside_quotes(inner, ',') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        if piece.starts_with(['[', '{']) {
            return Err(syntax_error(line, "nested flow collections are not supported"));
        }
        items.push(parse_scalar(piece, line)?);
    }

    Ok(Value::List(items))
}

fn split_outside_quotes(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == sep => {
                parts.push(&text[start..idx]);
                start = idx + ch.len_utf8();
            }
            None => {}
        }
    }
    parts.push(&text[start..]);

    parts
}

fn parse_scalar(text: &str, line: &Line) -> Result<Value, ParseError> {
    if text.starts_with('"') {
        if text.len() < 2 || !text.ends_with('"') || closing_quote_escaped(text) {
            return Err(syntax_error(line, "unterminated double-quoted string"));
        }
        return Ok(Value::String(unescape_double(&text[1..text.len() - 1])));
    }

    if let Some(body) = text.strip_prefix('\'') {
        let inner = body
            .strip_suffix('\'')
            .filter(|_| text.len() >= 2)
            .ok_or_else(|| syntax_error(line, "unterminated single-quoted string"))?;
        return Ok(Value::String(inner.replace("''", "'")));
    }

    match text {
        "true" | "True" | "TRUE" => return Ok(Value::Bool(true)),
        "false" | "False" | "FALSE" => return Ok(Value::Bool(false)),
        "null" | "Null" | "NULL" | "~" => return Ok(Value::Null),
        _ => {}
    }

    if INTEGER_RE.is_match(text) {
        // Zero-padded identifiers such as `045` keep their spelling
        let digits = text.trim_start_matches(['-', '+']);
        if digits.len() > 1 && digits.starts_with('0') {
            return Ok(Value::String(text.to_string()));
        }
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Value::Integer(n));
        }
    }

    if FLOAT_RE.is_match(text) {
        if let Ok(f) = text.parse::<f64>() {
            return Ok(Value::Float(f));
        }
    }

    Ok(Value::String(text.to_string()))
}

/// An odd run of backslashes before the final `"` escapes it.
fn closing_quote_escaped(text: &str) -> bool {
    let body = &text[1..text.len() - 1];
    let backslashes = body.chars().rev().take_while(|c| *c == '\\').count();
    backslashes % 2 == 1
}

fn unescape_double(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
