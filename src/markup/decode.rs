//! Byte-to-text decoding for content documents.

use std::borrow::Cow;

/// Decode document bytes, reporting whether a fallback encoding was needed.
///
/// 1. UTF-8 (a BOM is handled by encoding_rs)
/// 2. the encoding named in the XML declaration, if any
/// 3. Windows-1252, which old ebooks commonly use
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> (Cow<'a, str>, bool) {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return (result, false);
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return (result, true);
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    (result, true)
}

/// Pull the `encoding="..."` value out of a leading XML declaration.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    // The declaration must sit at the very start; 100 bytes is plenty
    let prefix = &bytes[..bytes.len().min(100)];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let quote = *after_enc.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_end = after_enc[1..].iter().position(|&b| b == quote)? + 1;
    std::str::from_utf8(&after_enc[1..value_end]).ok()
}
