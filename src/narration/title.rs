//! Chapter title resolution and sanitizing.

use std::sync::LazyLock;

use regex::Regex;

use super::cjk::is_cjk;
use crate::markup::{MarkupTree, NodeId};

/// Elements probed for a title, highest priority first.
pub const TITLE_TAGS: [&str; 4] = ["title", "h1", "h2", "h3"];

/// Characters of chapter text used when no title element exists.
pub const FALLBACK_TITLE_CHARS: usize = 60;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// The element a chapter title was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTitle {
    pub node: NodeId,
    pub text: String,
}

/// First `title`, `h1`, `h2` or `h3` element, probed in that order.
///
/// Returns `None` when none of them exist. A present but empty element yields
/// an empty `text`; callers treat that like a missing title.
pub fn resolve_title(tree: &MarkupTree) -> Option<ResolvedTitle> {
    TITLE_TAGS
        .iter()
        .find_map(|tag| tree.find_by_tag(tag))
        .map(|node| ResolvedTitle {
            node,
            text: tree.collect_text(node),
        })
}

/// Leading slice of chapter text to stand in for a missing title.
pub fn fallback_title(text: &str) -> &str {
    match text.char_indices().nth(FALLBACK_TITLE_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Turn a title into an underscore-joined, filesystem-safe token.
///
/// Break markers become spaces, anything that is neither a word character nor
/// whitespace is dropped, whitespace runs become `_`, and outer underscores are
/// trimmed. The result may be empty.
///
/// A marker stripped of its padding is only recognised next to a CJK
/// ideograph, where CJK spacing removal leaves it that way.
pub fn sanitize_title(title: &str, break_marker: &str) -> String {
    let mut spaced = title.to_string();
    if !break_marker.is_empty() {
        spaced = spaced.replace(break_marker, " ");
    }
    let bare = break_marker.trim();
    if !bare.is_empty() && bare != break_marker {
        spaced = replace_unpadded_marker(&spaced, bare);
    }
    let words = NON_WORD.replace_all(&spaced, "");
    let joined = WHITESPACE.replace_all(words.trim(), "_");
    joined.trim_matches('_').to_string()
}

fn replace_unpadded_marker(text: &str, bare: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(bare) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + bare.len()..];
        let touches_cjk = out.chars().next_back().is_some_and(is_cjk)
            || after.chars().next().is_some_and(is_cjk);
        out.push_str(if touches_cjk { " " } else { bare });
        rest = after;
    }
    out.push_str(rest);
    out
}
