//! narrator - extract narration text from EPUB ebooks

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use narrator::{
    ChapterExtractor, ChapterRecord, DEFAULT_BREAK_MARKER, DocumentSource, EndnoteAnchors,
    EpubSource, NewlineMode, Settings,
};

/// Characters of chapter text shown per chapter.
const PREVIEW_CHARS: usize = 80;

#[derive(Parser)]
#[command(name = "narrator")]
#[command(version, about = "Extract narration text from EPUB ebooks", long_about = None)]
#[command(after_help = "EXAMPLES:
    narrator book.epub                         List chapters with a text preview
    narrator book.epub --remove-endnotes       Drop inline endnote numbers
    narrator book.epub --newline-mode double   Only blank lines become pauses
    narrator book.epub --json > chapters.json  Dump chapters as JSON")]
struct Cli {
    /// Input file (EPUB)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// JSON settings file; command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Which newline runs become break markers: single or double
    #[arg(long, value_name = "MODE")]
    newline_mode: Option<NewlineMode>,

    /// Remove endnote numbers following punctuation
    #[arg(long)]
    remove_endnotes: bool,

    /// Also treat digits directly after letters as endnotes
    #[arg(long)]
    endnotes_after_letters: bool,

    /// Language code, e.g. en-US or zh-CN
    #[arg(long, value_name = "CODE")]
    language: Option<String>,

    /// Marker inserted where paragraphs break
    #[arg(long, value_name = "MARKER", default_value = DEFAULT_BREAK_MARKER)]
    break_marker: String,

    /// Print chapters as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress everything but errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let settings = build_settings(cli)?;
    let path = settings.validate_input().map_err(|e| e.to_string())?;

    let mut book = EpubSource::open(path).map_err(|e| e.to_string())?;
    let extractor =
        ChapterExtractor::new(settings.clone(), cli.break_marker.as_str()).map_err(|e| e.to_string())?;
    let chapters = extractor
        .extract_chapters(&mut book)
        .map_err(|e| e.to_string())?;

    if cli.json {
        let json = serde_json::to_string_pretty(&chapters).map_err(|e| e.to_string())?;
        println!("{json}");
    } else if !cli.quiet {
        print_chapters(&book, &chapters);
    }

    Ok(())
}

fn build_settings(cli: &Cli) -> Result<Settings, String> {
    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };

    if let Some(input) = &cli.input {
        settings.input_file = Some(input.clone());
    }
    if let Some(mode) = cli.newline_mode {
        settings.newline_mode = mode;
    }
    if cli.remove_endnotes {
        settings.remove_endnotes = true;
    }
    if cli.endnotes_after_letters {
        settings.endnote_anchors = EndnoteAnchors::PunctuationAndLetters;
    }
    if let Some(language) = &cli.language {
        settings.language = language.clone();
    }

    Ok(settings)
}

fn load_settings(path: &Path) -> Result<Settings, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))
}

fn print_chapters<S: DocumentSource>(book: &S, chapters: &[ChapterRecord]) {
    let meta = book.metadata();
    println!("Title: {}", meta.title());
    println!("Author: {}", meta.author());
    println!("Chapters: {}", chapters.len());

    for (index, chapter) in chapters.iter().enumerate() {
        let preview: String = chapter.text.chars().take(PREVIEW_CHARS).collect();
        let ellipsis = if chapter.text.chars().count() > PREVIEW_CHARS {
            "..."
        } else {
            ""
        };
        println!();
        println!("[{:>3}] {}", index + 1, chapter.title);
        println!("      {preview}{ellipsis}");
    }
}
