//! End-to-end chapter extraction from in-memory documents.

use narrator::{
    BookMetadata, ChapterExtractor, ChapterRecord, DocumentItem, EndnoteAnchors, MemorySource,
    NewlineMode, Settings,
};

const BRK: &str = " @BRK#";

const LOOMINGS: &str = "<html><head><title>Loomings</title></head><body><h1>Chapter 1</h1>\n\
<p>Call me Ishmael.<a href=\"#n1\">1</a> Some years ago--never mind how long.</p>\n\n\
<p>Whenever I find myself growing grim about the mouth; whenever it is a damp, drizzly November in my soul.</p>\
</body></html>";

fn extract_one(html: &str, settings: Settings) -> ChapterRecord {
    ChapterExtractor::new(settings, BRK)
        .expect("valid marker")
        .extract_document(&DocumentItem::new("chapter.xhtml", html))
}

#[test]
fn test_end_to_end_dialogue() {
    let record = extract_one(
        r#"<h1>Chapter One</h1><p>He said--"Hello;there."</p>"#,
        Settings::default().with_language("en"),
    );
    assert_eq!(record.title, "Chapter_One");
    assert_eq!(record.text, r#"He said, "Hello, there.""#);
}

#[test]
fn test_single_newline_mode() {
    let record = extract_one(LOOMINGS, Settings::default());
    assert_eq!(record.title, "Loomings");
    assert_eq!(
        record.text,
        "Chapter 1 @BRK#Call me Ishmael. Some years ago, never mind how long. \
@BRK#Whenever I find myself growing grim about the mouth, whenever it is a damp, \
drizzly November in my soul."
    );
}

#[test]
fn test_double_newline_mode() {
    let record = extract_one(
        LOOMINGS,
        Settings::default().with_newline_mode(NewlineMode::Double),
    );
    assert_eq!(
        record.text,
        "Chapter 1 Call me Ishmael. Some years ago, never mind how long. \
@BRK#Whenever I find myself growing grim about the mouth, whenever it is a damp, \
drizzly November in my soul."
    );
}

#[test]
fn test_endnotes_removed_after_punctuation() {
    let html = r#"<h2>Notes</h2><p>It ended.12 Then "quoted."3 And middle3 stays.</p>"#;

    let kept = extract_one(html, Settings::default());
    assert_eq!(kept.text, r#"It ended.12 Then "quoted."3 And middle3 stays."#);

    let stripped = extract_one(html, Settings::default().with_remove_endnotes(true));
    assert_eq!(stripped.title, "Notes");
    assert_eq!(stripped.text, r#"It ended. Then "quoted." And middle3 stays."#);

    let letters = extract_one(
        html,
        Settings::default()
            .with_remove_endnotes(true)
            .with_endnote_anchors(EndnoteAnchors::PunctuationAndLetters),
    );
    assert_eq!(letters.text, r#"It ended. Then "quoted." And middle stays."#);
}

#[test]
fn test_chinese_spacing_and_fallback_title() {
    let record = extract_one(
        "<p>我 是 学 生。 Hello there.</p>",
        Settings::default().with_language("zh-CN"),
    );
    assert_eq!(record.text, "我是学生。 Hello there.");
    assert_eq!(record.title, "我是学生_Hello_there");
}

#[test]
fn test_excluded_content_not_narrated() {
    let record = extract_one(
        "<body><nav>Contents</nav><script>var x = 1;</script>\
<p>Kept <code>skipped()</code>text.</p><button>Next</button></body>",
        Settings::default(),
    );
    assert_eq!(record.text, "Kept text.");
}

#[test]
fn test_malformed_markup_still_extracts() {
    let record = extract_one("<p>Unclosed <b>bold</p></b><<", Settings::default());
    assert!(record.text.starts_with("Unclosed bold"));
}

#[test]
fn test_windows_1252_document() {
    let extractor = ChapterExtractor::with_default_marker(Settings::default());
    let record =
        extractor.extract_document(&DocumentItem::new("latin.html", b"<p>Caf\xe9 society</p>".to_vec()));
    assert_eq!(record.text, "Café society");
    assert_eq!(record.title, "Café_society");
}

#[test]
fn test_chapters_keep_source_order() {
    let mut source = MemorySource::new(
        BookMetadata::new()
            .with_title("Moby Dick")
            .with_creator("Herman Melville"),
    )
    .with_document("c.xhtml", "<h1>Third</h1><p>c</p>")
    .with_document("a.xhtml", "<h1>First</h1><p>a</p>")
    .with_document("b.xhtml", "<h1>Second</h1><p>b</p>");

    let extractor = ChapterExtractor::new(Settings::default(), BRK).unwrap();
    let chapters = extractor.extract_chapters(&mut source).unwrap();

    let titles: Vec<_> = chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Third", "First", "Second"]);
}

#[test]
fn test_empty_document_titled_from_file_name() {
    let record = extract_one("", Settings::default());
    assert_eq!(record.title, "chapter");
    assert_eq!(record.text, "");
}

#[test]
fn test_scene_break_heading_never_leaves_title_empty() {
    let record = extract_one("<h1>* * *</h1><p>Body text here.</p>", Settings::default());
    assert_eq!(record.title, "Body_text_here");
    assert_eq!(record.text, "Body text here.");

    for html in ["<h2>***</h2>", "<p>...</p>", "<title> </title>"] {
        let record = extract_one(html, Settings::default());
        assert!(!record.title.is_empty(), "empty title for {html}");
    }
}

#[test]
fn test_body_heading_narrated_when_title_element_present() {
    let record = extract_one(
        "<html><head><title>Loomings</title></head><body><h1>Chapter 1</h1><p>Text.</p></body></html>",
        Settings::default(),
    );
    assert_eq!(record.title, "Loomings");
    assert_eq!(record.text, "Chapter 1Text.");
}

#[test]
fn test_custom_break_marker() {
    let record = ChapterExtractor::new(Settings::default(), " <pause> ")
        .unwrap()
        .extract_document(&DocumentItem::new("p.xhtml", "<p>One</p>\n<p>Two</p>"));
    assert_eq!(record.text, "One <pause> Two");
    assert_eq!(record.title, "One_Two");
}
