//! Text cleanup for speech synthesis.
//!
//! [`clean_text`] chains the stages in their fixed order:
//!
//! 1. [`normalize_text`]: substitution table (pauses, quotes, symbols)
//! 2. [`collapse_whitespace`]: newline runs to break markers, whitespace squash
//! 3. [`strip_endnotes`]: only when endnote removal is enabled
//! 4. [`remove_cjk_spacing`]: only for Chinese language codes
//!
//! Titles are handled separately by [`resolve_title`] and [`sanitize_title`].

mod cjk;
mod endnotes;
mod normalize;
mod title;
mod whitespace;

pub use cjk::{is_chinese, remove_cjk_spacing};
pub use endnotes::strip_endnotes;
pub use normalize::{SUBSTITUTIONS, normalize_text};
pub use title::{
    FALLBACK_TITLE_CHARS, ResolvedTitle, TITLE_TAGS, fallback_title, resolve_title, sanitize_title,
};
pub use whitespace::collapse_whitespace;

use log::debug;

use crate::config::Settings;

/// Longest prefix of `text` shown in debug logs.
fn preview(text: &str) -> &str {
    match text.char_indices().nth(100) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Run the full cleanup chain over a document's raw text.
pub fn clean_text(raw: &str, settings: &Settings, break_marker: &str) -> String {
    let normalized = normalize_text(raw);

    let mut text = collapse_whitespace(&normalized, settings.newline_mode, break_marker);
    debug!("Collapsed text: <{}>", preview(&text));

    if settings.remove_endnotes {
        text = strip_endnotes(&text, settings.endnote_anchors);
        debug!("Endnotes stripped: <{}>", preview(&text));
    }

    if is_chinese(&settings.language) {
        text = remove_cjk_spacing(&text);
        debug!("CJK spacing removed: <{}>", preview(&text));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EndnoteAnchors, NewlineMode};

    const BRK: &str = " @BRK#";

    #[test]
    fn test_clean_text_defaults() {
        let settings = Settings::default();
        assert_eq!(
            clean_text("He said--\"Hello;there.\"", &settings, BRK),
            "He said, \"Hello, there.\""
        );
    }

    #[test]
    fn test_clean_text_paragraphs_single() {
        let settings = Settings::default();
        assert_eq!(
            clean_text("\n  First line.\nSecond.\n\nThird.\n", &settings, BRK),
            "First line. @BRK#Second. @BRK#Third."
        );
    }

    #[test]
    fn test_clean_text_paragraphs_double() {
        let settings = Settings::default().with_newline_mode(NewlineMode::Double);
        assert_eq!(
            clean_text("First line.\nSecond.\n\nThird.", &settings, BRK),
            "First line. Second. @BRK#Third."
        );
    }

    #[test]
    fn test_clean_text_endnotes_toggle() {
        let raw = "It ended.12 Then 3 more.";
        assert_eq!(clean_text(raw, &Settings::default(), BRK), raw);

        let settings = Settings::default().with_remove_endnotes(true);
        assert_eq!(clean_text(raw, &settings, BRK), "It ended. Then 3 more.");

        let settings = settings.with_endnote_anchors(EndnoteAnchors::PunctuationAndLetters);
        assert_eq!(clean_text("word7 here", &settings, BRK), "word here");
    }

    #[test]
    fn test_clean_text_chinese() {
        let raw = "我 是 学 生。 Hello there.";
        let zh = Settings::default().with_language("zh-CN");
        assert_eq!(clean_text(raw, &zh, BRK), "我是学生。 Hello there.");
        assert_eq!(clean_text(raw, &Settings::default(), BRK), raw);
    }

    #[test]
    fn test_no_newline_survives() {
        let settings = Settings::default().with_newline_mode(NewlineMode::Double);
        let text = clean_text("a\nb\r\n\nc\n\n\n\nd\n", &settings, BRK);
        assert!(!text.contains('\n'));
    }
}
