//! Run settings for chapter extraction.
//!
//! [`Settings`] is built once (from CLI flags, a JSON settings file, or code)
//! and stays read-only for the whole run. Unsupported values are rejected
//! while the settings are parsed, before any document is touched.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Default sentinel injected where newline runs are collapsed.
pub const DEFAULT_BREAK_MARKER: &str = " @BRK#";

/// Default language code.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// How newline runs are turned into break markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "cli",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum NewlineMode {
    /// Every run of one or more newlines becomes a break.
    #[default]
    Single,
    /// Only runs of two or more newlines become a break.
    Double,
}

impl NewlineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewlineMode::Single => "single",
            NewlineMode::Double => "double",
        }
    }
}

impl FromStr for NewlineMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(NewlineMode::Single),
            "double" => Ok(NewlineMode::Double),
            other => Err(Error::InvalidConfiguration(format!(
                "unsupported newline mode: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for NewlineMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<NewlineMode> for String {
    fn from(mode: NewlineMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for NewlineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which characters may precede an inline endnote number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "cli",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum EndnoteAnchors {
    /// Sentence punctuation, closing quotes and closing parentheses.
    #[default]
    Punctuation,
    /// Punctuation plus ASCII letters (`word12` loses its `12`).
    PunctuationAndLetters,
}

/// Read-only settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "cli",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Settings {
    /// Book to read. Only checked by [`Settings::validate_input`].
    pub input_file: Option<PathBuf>,
    pub newline_mode: NewlineMode,
    pub remove_endnotes: bool,
    pub endnote_anchors: EndnoteAnchors,
    /// Language code, e.g. `en-US` or `zh-CN`.
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_file: None,
            newline_mode: NewlineMode::default(),
            remove_endnotes: false,
            endnote_anchors: EndnoteAnchors::default(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_file = Some(path.into());
        self
    }

    pub fn with_newline_mode(mut self, mode: NewlineMode) -> Self {
        self.newline_mode = mode;
        self
    }

    pub fn with_remove_endnotes(mut self, remove: bool) -> Self {
        self.remove_endnotes = remove;
        self
    }

    pub fn with_endnote_anchors(mut self, anchors: EndnoteAnchors) -> Self {
        self.endnote_anchors = anchors;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Check that an input file is configured and looks like an EPUB.
    ///
    /// This runs once, before any document is processed.
    pub fn validate_input(&self) -> Result<&Path> {
        let path = self
            .input_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| Error::InvalidInput("input file cannot be empty".into()))?;
        check_epub_extension(path)?;
        Ok(path)
    }
}

/// Reject paths whose extension is not `.epub` (case-insensitive).
pub(crate) fn check_epub_extension(path: &Path) -> Result<()> {
    let is_epub = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("epub"));
    if is_epub {
        Ok(())
    } else {
        Err(Error::UnsupportedFormat(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_mode_parse() {
        assert_eq!("single".parse::<NewlineMode>().unwrap(), NewlineMode::Single);
        assert_eq!("double".parse::<NewlineMode>().unwrap(), NewlineMode::Double);
    }

    #[test]
    fn test_newline_mode_rejects_unknown() {
        let err = "triple".parse::<NewlineMode>().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(err.to_string().contains("triple"));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.newline_mode, NewlineMode::Single);
        assert!(!settings.remove_endnotes);
        assert_eq!(settings.language, "en-US");
    }

    #[test]
    fn test_validate_input_missing() {
        let err = Settings::new().validate_input().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = Settings::new().with_input_file("").validate_input().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_validate_input_extension() {
        let settings = Settings::new().with_input_file("books/Moby Dick.EPUB");
        assert!(settings.validate_input().is_ok());

        let err = Settings::new()
            .with_input_file("books/moby.pdf")
            .validate_input()
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_settings_from_json() {
        let settings: Settings = serde_json::from_str(
            r#"{"newline_mode": "double", "remove_endnotes": true, "language": "zh-CN"}"#,
        )
        .unwrap();
        assert_eq!(settings.newline_mode, NewlineMode::Double);
        assert!(settings.remove_endnotes);
        assert_eq!(settings.endnote_anchors, EndnoteAnchors::Punctuation);
        assert_eq!(settings.language, "zh-CN");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_settings_from_json_bad_mode() {
        let err = serde_json::from_str::<Settings>(r#"{"newline_mode": "triple"}"#).unwrap_err();
        assert!(err.to_string().contains("unsupported newline mode: triple"));
    }
}
