use unicode_display_width::width as display_width_impl;
use unicode_segmentation::UnicodeSegmentation;

pub(crate) fn display_width(text: &str) -> usize {
    display_width_impl(text) as usize
}

/// Byte index of the first grapheme that would end past `cells` columns.
///
/// A wide grapheme straddling the cut stays on the right-hand side.
pub(crate) fn byte_index_at_width(text: &str, cells: usize) -> usize {
    let mut used = 0;
    for (idx, grapheme) in UnicodeSegmentation::grapheme_indices(text, true) {
        let width = display_width(grapheme);
        if used + width > cells {
            return idx;
        }
        used += width;
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_graphemes() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(byte_index_at_width("e\u{301}x", 1), "e\u{301}".len());
    }

    #[test]
    fn test_byte_index_at_width() {
        assert_eq!(byte_index_at_width("hello", 2), 2);
        assert_eq!(byte_index_at_width("日本", 3), "日".len());
        assert_eq!(byte_index_at_width("ab", 10), 2);
    }
}
