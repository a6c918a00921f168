//! Character substitutions that make text read well aloud.

/// Ordered `(pattern, replacement)` pairs applied by [`normalize_text`].
///
/// Order matters: a rule sees the output of every rule above it.
pub const SUBSTITUTIONS: &[(&str, &str)] = &[
    // Dashes become a pause
    ("--", ", "),
    ("\u{2014}", ", "),
    ("\u{e2}\u{20ac}\u{201d}", ", "),
    (";", ", "),
    (":", ", "),
    ("''", ", "),
    // Curly quotes, clean and mis-decoded, fold to ASCII
    ("\u{2019}", "'"),
    ("\u{e2}\u{20ac}\u{2122}", "'"),
    ("\u{201c}", "\""),
    ("\u{201d}", "\""),
    ("\u{e2}\u{20ac}\u{153}", "\""),
    ("\u{e2}\u{20ac}\u{9d}", "\""),
    // Ornamental scene-break diamond
    ("\u{25c7}", ""),
    ("\u{a0}.\u{a0}.\u{a0}. ", ", "),
    ("... ", ", "),
    ("\u{ab}", " "),
    ("\u{bb}", " "),
    // Citation brackets
    ("[", ""),
    ("]", ""),
    ("&", " and "),
    // Corpus-specific: "GNU" is read as "new"
    (" GNU ", " new "),
    // Keep a space ahead of each newline so collapsing never joins words
    ("\n", " \n"),
    ("*", " "),
];

/// Apply [`SUBSTITUTIONS`] in order, then trim surrounding whitespace.
pub fn normalize_text(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, replacement) in SUBSTITUTIONS {
        if out.contains(pattern) {
            out = out.replace(pattern, replacement);
        }
    }
    out.trim().to_string()
}
