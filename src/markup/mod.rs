//! Markup parsing and filtering.
//!
//! Content documents are decoded, parsed leniently with html5ever into a
//! [`MarkupTree`], and stripped of non-narrative nodes by [`filter_markup`].
//! Parsing never fails: malformed input yields a [`ParseQuality::Degraded`]
//! tree holding whatever structure could be recovered.
//!
//! ```
//! use narrator::markup::{ExcludedTagSet, filter_markup, narration_text, parse_markup};
//!
//! let mut parsed = parse_markup(b"<p>Text<a href='#n1'>1</a>.</p><script>x()</script>");
//! filter_markup(&mut parsed.tree, &ExcludedTagSet::NARRATION);
//! assert_eq!(narration_text(&parsed.tree), "Text.");
//! ```

mod decode;
mod filter;
mod sink;
mod tree;

pub use decode::{decode_text, extract_xml_encoding};
pub use filter::{ExcludedTagSet, FilterReport, LinkKind, classify_link, filter_markup, is_link};
pub use sink::TreeBuilder;
pub use tree::{Attribute, MarkupTree, Node, NodeData, NodeId};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// How cleanly a document parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseQuality {
    Clean,
    /// The tree is a best-effort recovery.
    Degraded {
        /// Bytes were not valid UTF-8 and a fallback encoding was used.
        decode_fallback: bool,
        /// Recoverable errors reported by the HTML parser.
        parse_errors: usize,
    },
}

impl ParseQuality {
    pub fn is_degraded(&self) -> bool {
        matches!(self, ParseQuality::Degraded { .. })
    }
}

/// A parsed document and how trustworthy its structure is.
pub struct ParsedMarkup {
    pub tree: MarkupTree,
    pub quality: ParseQuality,
}

/// Decode and parse one document's raw markup.
pub fn parse_markup(bytes: &[u8]) -> ParsedMarkup {
    let (html, decode_fallback) = decode_text(bytes, extract_xml_encoding(bytes));

    let (tree, parse_errors) = parse_document(TreeBuilder::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_parts();

    let quality = if decode_fallback || parse_errors > 0 {
        ParseQuality::Degraded {
            decode_fallback,
            parse_errors,
        }
    } else {
        ParseQuality::Clean
    };

    ParsedMarkup { tree, quality }
}

/// Text to narrate: every text node under `<body>` (or the whole document when
/// there is no body), concatenated in document order with whitespace intact.
pub fn narration_text(tree: &MarkupTree) -> String {
    let root = tree.find_by_tag("body").unwrap_or_else(|| tree.document());
    tree.collect_text(root)
}
