//! Newline-to-break collapsing and whitespace squashing.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::NewlineMode;

// A newline run may have horizontal whitespace between its newlines, since
// normalization puts a space ahead of every newline.
static NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[^\S\n]*\n)*").expect("valid regex"));
static MULTI_NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[^\S\n]*\n)+").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Replace newline runs with `break_marker` according to `mode`, then squash
/// every remaining whitespace run to one space.
///
/// The result never contains a newline character.
pub fn collapse_whitespace(text: &str, mode: NewlineMode, break_marker: &str) -> String {
    let pattern = match mode {
        NewlineMode::Single => &*NEWLINE_RUN,
        NewlineMode::Double => &*MULTI_NEWLINE_RUN,
    };
    let marked = pattern.replace_all(text.trim(), regex::NoExpand(break_marker));
    WHITESPACE.replace_all(&marked, " ").into_owned()
}
