//! Utility functions and helpers.

pub mod http;
pub mod log;
pub mod url;

use unicode_segmentation::UnicodeSegmentation;

/// Truncate text to at most `width` grapheme clusters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = graphemes[..width - 1].concat();
    out.push('…');
    out
}

/// Display width of text, counted in grapheme clusters.
pub fn text_width(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Pad text on the right to `width` grapheme clusters.
pub fn pad(text: &str, width: usize) -> String {
    let len = text_width(text);
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("try-with-resources", 8), "try-wit…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_truncate_counts_graphemes() {
        // "é" written as e + combining acute is one grapheme
        let text = "cafe\u{301} au lait";
        assert_eq!(truncate(text, 4), "caf…");
        assert_eq!(text_width("cafe\u{301}"), 4);
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
    }
}
