//! Caption fitting for the alt-text fallback shown when an image fails.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "…";

/// Truncate `text` to at most `columns` display columns.
///
/// Cuts on grapheme boundaries and appends an ellipsis when anything was
/// dropped. Wide characters count as two columns.
pub fn fit_caption(text: &str, columns: usize) -> String {
    if UnicodeWidthStr::width(text) <= columns {
        return text.to_string();
    }
    if columns == 0 {
        return String::new();
    }

    let budget = columns - 1;
    let mut used = 0;
    let mut out = String::with_capacity(text.len());
    for grapheme in text.graphemes(true) {
        let width = UnicodeWidthStr::width(grapheme);
        if used + width > budget {
            break;
        }
        used += width;
        out.push_str(grapheme);
    }
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(fit_caption("Random cat 3", 48), "Random cat 3");
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        assert_eq!(fit_caption("Sleepy kitten on blanket", 10), "Sleepy ki…");
    }

    #[test]
    fn test_wide_graphemes() {
        // Each CJK character is two columns wide.
        assert_eq!(fit_caption("日本語のねこ", 5), "日本…");
    }

    #[test]
    fn test_zero_columns() {
        assert_eq!(fit_caption("cat", 0), "");
    }
}
