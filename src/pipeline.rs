//! Per-document chapter extraction.
//!
//! Each [`DocumentItem`] is processed to completion on its own:
//!
//! ```text
//! markup ─ parse ─ filter ─ resolve title ─┬─ title text ──────────────────┐
//!                                          └─ detach title element ─ text  ├─ sanitize title
//!                                             ─ clean (normalize, collapse,│
//!                                               endnotes, CJK) ────────────┘
//! ```
//!
//! The element a title came from is not narrated. The title falls back to the
//! opening of the chapter text, then to the document's file stem, so it is
//! never empty.
//!
//! Nothing is shared between documents except the read-only [`Settings`] and
//! [`ExcludedTagSet`], so output order is exactly source order.

use std::path::Path;

use log::{debug, info, warn};

use crate::config::{DEFAULT_BREAK_MARKER, Settings};
use crate::error::{Error, Result};
use crate::markup::{ExcludedTagSet, filter_markup, narration_text, parse_markup};
use crate::narration::{clean_text, fallback_title, resolve_title, sanitize_title};
use crate::source::{DocumentItem, DocumentSource, UNTITLED};

/// One chapter ready for speech synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ChapterRecord {
    /// Filesystem-safe, underscore-joined title.
    pub title: String,
    /// Narration text; paragraph breaks appear as the break marker, never as
    /// newlines.
    pub text: String,
}

/// Turns content documents into [`ChapterRecord`]s.
#[derive(Debug, Clone)]
pub struct ChapterExtractor {
    settings: Settings,
    excluded: ExcludedTagSet,
    break_marker: String,
}

impl ChapterExtractor {
    /// Build an extractor. Fails if `break_marker` is empty.
    pub fn new(settings: Settings, break_marker: impl Into<String>) -> Result<Self> {
        let break_marker = break_marker.into();
        if break_marker.is_empty() {
            return Err(Error::InvalidConfiguration(
                "break marker cannot be empty".into(),
            ));
        }
        Ok(Self {
            settings,
            excluded: ExcludedTagSet::NARRATION,
            break_marker,
        })
    }

    /// Extractor using [`DEFAULT_BREAK_MARKER`].
    pub fn with_default_marker(settings: Settings) -> Self {
        Self {
            settings,
            excluded: ExcludedTagSet::NARRATION,
            break_marker: DEFAULT_BREAK_MARKER.to_string(),
        }
    }

    /// Replace the set of tags whose content is never narrated.
    pub fn with_excluded_tags(mut self, excluded: ExcludedTagSet) -> Self {
        self.excluded = excluded;
        self
    }

    /// Extract one chapter. Malformed markup degrades the result, never fails it.
    pub fn extract_document(&self, item: &DocumentItem) -> ChapterRecord {
        let mut parsed = parse_markup(&item.content);
        if parsed.quality.is_degraded() {
            warn!("{}: markup recovered best-effort ({:?})", item.href, parsed.quality);
        }

        let report = filter_markup(&mut parsed.tree, &self.excluded);
        debug!("{}: filtered {:?}", item.href, report);

        let resolved = resolve_title(&parsed.tree);
        if let Some(title) = &resolved {
            parsed.tree.detach(title.node);
        }
        let raw = narration_text(&parsed.tree);
        debug!("Raw text: <{}>", raw);

        let text = clean_text(&raw, &self.settings, &self.break_marker);

        let candidates = [
            resolved.as_ref().map(|t| t.text.as_str()),
            Some(fallback_title(&text)),
            Path::new(&item.href).file_stem().and_then(|stem| stem.to_str()),
        ];
        let title = candidates
            .into_iter()
            .flatten()
            .map(|raw_title| {
                debug!("Raw title: <{}>", raw_title);
                sanitize_title(raw_title, &self.break_marker)
            })
            .find(|title| !title.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        debug!("Sanitized title: <{}>", title);

        ChapterRecord { title, text }
    }

    /// Extract every document of `source`, in source order.
    pub fn extract_chapters<S: DocumentSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<Vec<ChapterRecord>> {
        let count = source.document_count();
        let mut chapters = Vec::with_capacity(count);
        for index in 0..count {
            let item = source.load_document(index)?;
            chapters.push(self.extract_document(&item));
        }
        info!(
            "Extracted {} chapters from \"{}\" by {}",
            chapters.len(),
            source.metadata().title(),
            source.metadata().author()
        );
        Ok(chapters)
    }
}
