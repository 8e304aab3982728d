//! Approximate token counting.
//!
//! Not a real tokenizer. Each word counts as one token per four characters
//! (rounded up) and each punctuation symbol counts as one. The count never
//! decreases when text is appended, which is all the size check relies on.

use regex::Regex;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]").expect("Invalid regex pattern"));

const CHARS_PER_SUBWORD: usize = 4;

pub fn estimate_tokens(text: &str) -> usize {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().chars().count().div_ceil(CHARS_PER_SUBWORD))
        .sum()
}

pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}
