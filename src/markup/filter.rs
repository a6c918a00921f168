//! Removal of non-narrative markup.

use super::tree::{MarkupTree, NodeId};

/// Fixed set of tag names whose subtrees are never narrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcludedTagSet {
    tags: &'static [&'static str],
}

impl ExcludedTagSet {
    /// Document metadata, scripts and styles, navigation wrappers, raw-markup
    /// containers, code blocks and form controls.
    pub const NARRATION: ExcludedTagSet = ExcludedTagSet::from_static(&[
        "meta", "link", "script", "style", "noscript", "template", "header", "nav", "xmp", "pre",
        "code", "input", "select", "textarea", "button",
    ]);

    pub const fn from_static(tags: &'static [&'static str]) -> Self {
        Self { tags }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| *t == tag)
    }
}

impl Default for ExcludedTagSet {
    fn default() -> Self {
        Self::NARRATION
    }
}

/// What a hyperlink's visible text looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// No alphabetic character, e.g. `12` or `[3]`: an endnote reference.
    Footnote,
    /// Link text with words in it.
    Labelled,
}

/// Classify a link by its text.
pub fn classify_link(text: &str) -> LinkKind {
    if text.chars().any(char::is_alphabetic) {
        LinkKind::Labelled
    } else {
        LinkKind::Footnote
    }
}

/// Counts of what [`filter_markup`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub excluded_subtrees: usize,
    pub footnote_links: usize,
    pub labelled_links: usize,
}

impl FilterReport {
    pub fn links_removed(&self) -> usize {
        self.footnote_links + self.labelled_links
    }
}

/// Excise excluded subtrees, then every hyperlink.
///
/// Links are removed whatever their text; the classification only feeds the
/// report.
pub fn filter_markup(tree: &mut MarkupTree, excluded: &ExcludedTagSet) -> FilterReport {
    let mut report = FilterReport::default();

    for id in collect_matching(tree, |tree, id| {
        tree.element_name(id).is_some_and(|tag| excluded.contains(tag))
    }) {
        tree.detach(id);
        report.excluded_subtrees += 1;
    }

    for id in collect_matching(tree, is_link) {
        match classify_link(&tree.collect_text(id)) {
            LinkKind::Footnote => report.footnote_links += 1,
            LinkKind::Labelled => report.labelled_links += 1,
        }
        tree.detach(id);
    }

    report
}

/// A hyperlink-bearing inline node.
pub fn is_link(tree: &MarkupTree, id: NodeId) -> bool {
    tree.element_name(id).is_some_and(|tag| tag.as_ref() == "a") && tree.get_attr(id, "href").is_some()
}

/// Outermost reachable nodes matching `predicate`; matches are not descended into.
fn collect_matching<F>(tree: &MarkupTree, predicate: F) -> Vec<NodeId>
where
    F: Fn(&MarkupTree, NodeId) -> bool,
{
    let mut found = Vec::new();
    let mut stack = vec![tree.document()];
    while let Some(id) = stack.pop() {
        if predicate(tree, id) {
            found.push(id);
            continue;
        }
        let mark = stack.len();
        stack.extend(tree.children(id));
        stack[mark..].reverse();
    }
    found
}
