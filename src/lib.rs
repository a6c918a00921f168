//! # narrator
//!
//! Extract narration-ready chapter text from EPUB ebooks.
//!
//! Each content document of a book becomes one [`ChapterRecord`]: a
//! filesystem-safe title plus plain text cleaned up for a text-to-speech
//! engine. Paragraph breaks are replaced by a break marker the synthesizer
//! turns into a pause.
//!
//! ## Quick Start
//!
//! ```no_run
//! use narrator::{ChapterExtractor, EpubSource, Settings};
//!
//! let settings = Settings::default().with_remove_endnotes(true);
//! let extractor = ChapterExtractor::new(settings, " @BRK#").unwrap();
//!
//! let mut book = EpubSource::open("book.epub").unwrap();
//! for chapter in extractor.extract_chapters(&mut book).unwrap() {
//!     println!("{}: {} chars", chapter.title, chapter.text.len());
//! }
//! ```
//!
//! ## In-memory documents
//!
//! ```
//! use narrator::{BookMetadata, ChapterExtractor, MemorySource, Settings};
//!
//! let mut source = MemorySource::new(BookMetadata::new().with_title("Notes"))
//!     .with_document("ch1.xhtml", "<h1>Chapter One</h1><p>Call me Ishmael.</p>");
//!
//! let extractor = ChapterExtractor::with_default_marker(Settings::default());
//! let chapters = extractor.extract_chapters(&mut source).unwrap();
//! assert_eq!(chapters[0].title, "Chapter_One");
//! ```

pub mod config;
pub mod error;
pub mod markup;
pub mod narration;
pub mod pipeline;
pub mod source;

pub use config::{DEFAULT_BREAK_MARKER, EndnoteAnchors, NewlineMode, Settings};
pub use error::{Error, Result};
pub use markup::{ExcludedTagSet, ParseQuality, ParsedMarkup, parse_markup};
pub use pipeline::{ChapterExtractor, ChapterRecord};
pub use source::{BookMetadata, DocumentItem, DocumentSource, EpubSource, MemorySource};
