//! Sources of content documents.
//!
//! A [`DocumentSource`] hands out a book's content documents one at a time,
//! in reading order, plus the book-level metadata. [`EpubSource`] reads EPUB
//! containers; [`MemorySource`] serves documents already in memory.

mod epub;

pub use epub::EpubSource;

use crate::error::{Error, Result};

/// Title reported when a book has no `dc:title`.
pub const UNTITLED: &str = "Untitled";

/// Author reported when a book has no `dc:creator`.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One content document's raw markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentItem {
    /// Path of the document inside its container.
    pub href: String,
    pub content: Vec<u8>,
}

impl DocumentItem {
    pub fn new(href: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            href: href.into(),
            content: content.into(),
        }
    }
}

/// Book-level metadata, every recorded value in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookMetadata {
    pub titles: Vec<String>,
    pub creators: Vec<String>,
    pub language: Option<String>,
}

impl BookMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.titles.push(title.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creators.push(creator.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// First recorded title, or `"Untitled"`.
    pub fn title(&self) -> &str {
        self.titles.first().map(String::as_str).unwrap_or(UNTITLED)
    }

    /// First recorded creator, or `"Unknown"`.
    pub fn author(&self) -> &str {
        self.creators.first().map(String::as_str).unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// A container yielding content documents in reading order.
pub trait DocumentSource {
    fn metadata(&self) -> &BookMetadata;

    /// Number of content documents.
    fn document_count(&self) -> usize;

    /// Load the raw markup of the document at `index` (`0..document_count()`).
    fn load_document(&mut self, index: usize) -> Result<DocumentItem>;
}

/// Documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    metadata: BookMetadata,
    documents: Vec<DocumentItem>,
}

impl MemorySource {
    pub fn new(metadata: BookMetadata) -> Self {
        Self {
            metadata,
            documents: Vec::new(),
        }
    }

    pub fn with_document(mut self, href: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.push(DocumentItem::new(href, content));
        self
    }

    pub fn push(&mut self, item: DocumentItem) {
        self.documents.push(item);
    }
}

impl DocumentSource for MemorySource {
    fn metadata(&self) -> &BookMetadata {
        &self.metadata
    }

    fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn load_document(&mut self, index: usize) -> Result<DocumentItem> {
        self.documents.get(index).cloned().ok_or_else(|| {
            Error::InvalidInput(format!(
                "document index {index} out of range ({} documents)",
                self.documents.len()
            ))
        })
    }
}
