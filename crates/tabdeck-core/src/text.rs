#![forbid(unsafe_code)]

//! Cell-width measurement for terminal layout.

use unicode_width::UnicodeWidthStr;

/// Number of terminal cells `text` occupies.
///
/// Wide CJK glyphs count as two cells, combining marks as zero.
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cell count as a `u16` span, saturating at `u16::MAX`.
#[must_use]
pub fn cell_span(width: usize) -> u16 {
    u16::try_from(width).unwrap_or(u16::MAX)
}

/// Clip `text` so it fits in `max` cells, never splitting a wide glyph.
#[must_use]
pub fn clip_to_width(text: &str, max: usize) -> &str {
    let mut used = 0usize;
    for (idx, ch) in text.char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max {
            return &text[..idx];
        }
        used += w;
    }
    text
}
