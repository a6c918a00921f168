//! Removal of inline endnote numbers.

use crate::config::EndnoteAnchors;

fn is_anchor(c: char, anchors: EndnoteAnchors) -> bool {
    match c {
        '.' | ',' | '!' | '?' | ';' | '"' | '\u{201d}' | ')' => true,
        c if c.is_ascii_alphabetic() => anchors == EndnoteAnchors::PunctuationAndLetters,
        _ => false,
    }
}

/// Drop every maximal run of ASCII digits that directly follows an anchor
/// character, e.g. the `12` in `end.12`.
pub fn strip_endnotes(text: &str, anchors: EndnoteAnchors) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut skipping = false;

    for c in text.chars() {
        if c.is_ascii_digit() {
            if !skipping {
                skipping = prev.is_some_and(|p| is_anchor(p, anchors));
            }
        } else {
            skipping = false;
        }
        if !skipping {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}
