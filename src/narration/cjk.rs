//! Removal of extraction-inserted spaces inside Chinese sentences.

/// Sentence-final marks that delimit segments.
const SENTENCE_TERMINALS: [char; 3] = ['\u{3002}', '\u{ff1f}', '\u{ff01}'];

/// CJK Unified Ideographs, basic block.
pub(crate) fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Whether the language code selects Chinese (`zh`, `zh-CN`, `zh_TW`, ...).
pub fn is_chinese(language: &str) -> bool {
    language
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("zh"))
}

/// Remove all whitespace from every sentence that contains a CJK ideograph.
///
/// Sentences without ideographs, and the terminal marks themselves, are
/// copied through unchanged.
pub fn remove_cjk_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        if SENTENCE_TERMINALS.contains(&c) {
            push_segment(&mut out, &text[start..idx]);
            out.push(c);
            start = idx + c.len_utf8();
        }
    }
    push_segment(&mut out, &text[start..]);
    out
}

fn push_segment(out: &mut String, segment: &str) {
    if segment.chars().any(is_cjk) {
        out.extend(segment.chars().filter(|c| !c.is_whitespace()));
    } else {
        out.push_str(segment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_chinese() {
        assert!(is_chinese("zh"));
        assert!(is_chinese("zh-CN"));
        assert!(is_chinese("ZH_tw"));
        assert!(!is_chinese("en-US"));
        assert!(!is_chinese("z"));
        assert!(!is_chinese(""));
    }

    #[test]
    fn test_spaces_removed_inside_cjk_sentence() {
        assert_eq!(remove_cjk_spacing("你 好 世 界。"), "你好世界。");
    }

    #[test]
    fn test_non_cjk_sentences_untouched() {
        assert_eq!(
            remove_cjk_spacing("我 是 学 生。 Hello there ！ 他 很 好"),
            "我是学生。 Hello there ！他很好"
        );
    }

    #[test]
    fn test_repeated_sentences_each_cleaned() {
        assert_eq!(remove_cjk_spacing("好 的。好 的。"), "好的。好的。");
    }

    #[test]
    fn test_repeated_segment_does_not_touch_other_positions() {
        // "a b" alone is Latin and must keep its space even though the same
        // text also appears inside a CJK sentence.
        assert_eq!(remove_cjk_spacing("中 a b。a b"), "中ab。a b");
    }

    #[test]
    fn test_break_marker_spacing_inside_cjk_sentence() {
        assert_eq!(remove_cjk_spacing("第 一 @BRK#第 二"), "第一@BRK#第二");
    }
}
