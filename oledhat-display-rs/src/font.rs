//! Bundled 4-column bitmap font.
//!
//! Each glyph is three columns of ink plus one blank spacing column. A
//! column byte is a vertical 8-pixel strip with bit 0 at the top of the
//! page band; glyph bodies use rows 1–5, descenders reach row 6.

/// Columns per glyph in [`FONT_4X8`].
pub const GLYPH_WIDTH: usize = 4;

/// One character's column bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub columns: &'static [u8],
}

const fn glyph(ch: char, columns: &'static [u8]) -> Glyph {
    Glyph { ch, columns }
}

/// A read-only codepoint → glyph mapping, sorted by codepoint.
#[derive(Debug, Clone, Copy)]
pub struct GlyphTable {
    glyphs: &'static [Glyph],
}

impl GlyphTable {
    /// Wrap a table. `glyphs` must be sorted by `ch` with no duplicates.
    pub const fn new(glyphs: &'static [Glyph]) -> Self {
        Self { glyphs }
    }

    /// Column bytes for `ch`, or `None` if the font has no such glyph.
    pub fn get(&self, ch: char) -> Option<&'static [u8]> {
        self.glyphs
            .binary_search_by_key(&ch, |g| g.ch)
            .ok()
            .map(|i| self.glyphs[i].columns)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.get(ch).is_some()
    }

    /// Every glyph in ascending codepoint order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Glyph> {
        self.glyphs.iter()
    }

    /// Every covered codepoint in ascending order.
    pub fn chars(&self) -> impl Iterator<Item = char> {
        self.glyphs.iter().map(|g| g.ch)
    }

    /// Glyph at position `index` in codepoint order.
    pub fn nth(&self, index: usize) -> Option<&'static Glyph> {
        self.glyphs.get(index)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Width of the space glyph, which the paginator trims from the end
    /// of every line. Zero if the table has no space.
    pub fn space_width(&self) -> usize {
        self.get(' ').map_or(0, <[u8]>::len)
    }
}

/// Printable ASCII, U+0020 to U+007E.
pub static FONT_4X8: GlyphTable = GlyphTable::new(&GLYPHS_4X8);

#[rustfmt::skip]
static GLYPHS_4X8: [Glyph; 95] = [
    glyph(' ', &[0x00, 0x00, 0x00, 0x00]),
    glyph('!', &[0x00, 0x2E, 0x00, 0x00]),
    glyph('"', &[0x06, 0x00, 0x06, 0x00]),
    glyph('#', &[0x3E, 0x14, 0x3E, 0x00]),
    glyph('$', &[0x24, 0x3E, 0x12, 0x00]),
    glyph('%', &[0x12, 0x08, 0x24, 0x00]),
    glyph('&', &[0x1E, 0x2E, 0x38, 0x00]),
    glyph('\'', &[0x00, 0x06, 0x00, 0x00]),
    glyph('(', &[0x00, 0x1C, 0x22, 0x00]),
    glyph(')', &[0x22, 0x1C, 0x00, 0x00]),
    glyph('*', &[0x0A, 0x04, 0x0A, 0x00]),
    glyph('+', &[0x08, 0x1C, 0x08, 0x00]),
    glyph(',', &[0x20, 0x10, 0x00, 0x00]),
    glyph('-', &[0x08, 0x08, 0x08, 0x00]),
    glyph('.', &[0x00, 0x20, 0x00, 0x00]),
    glyph('/', &[0x30, 0x08, 0x06, 0x00]),
    glyph('0', &[0x3C, 0x22, 0x1E, 0x00]),
    glyph('1', &[0x04, 0x3E, 0x00, 0x00]),
    glyph('2', &[0x32, 0x2A, 0x24, 0x00]),
    glyph('3', &[0x22, 0x2A, 0x14, 0x00]),
    glyph('4', &[0x0E, 0x08, 0x3E, 0x00]),
    glyph('5', &[0x2E, 0x2A, 0x12, 0x00]),
    glyph('6', &[0x3C, 0x2A, 0x3A, 0x00]),
    glyph('7', &[0x32, 0x0A, 0x06, 0x00]),
    glyph('8', &[0x3E, 0x2A, 0x3E, 0x00]),
    glyph('9', &[0x2E, 0x2A, 0x1E, 0x00]),
    glyph(':', &[0x00, 0x14, 0x00, 0x00]),
    glyph(';', &[0x20, 0x14, 0x00, 0x00]),
    glyph('<', &[0x08, 0x14, 0x22, 0x00]),
    glyph('=', &[0x14, 0x14, 0x14, 0x00]),
    glyph('>', &[0x22, 0x14, 0x08, 0x00]),
    glyph('?', &[0x02, 0x2A, 0x06, 0x00]),
    glyph('@', &[0x1C, 0x2A, 0x2C, 0x00]),
    glyph('A', &[0x3C, 0x0A, 0x3C, 0x00]),
    glyph('B', &[0x3E, 0x2A, 0x14, 0x00]),
    glyph('C', &[0x1C, 0x22, 0x22, 0x00]),
    glyph('D', &[0x3E, 0x22, 0x1C, 0x00]),
    glyph('E', &[0x3E, 0x2A, 0x2A, 0x00]),
    glyph('F', &[0x3E, 0x0A, 0x0A, 0x00]),
    glyph('G', &[0x1C, 0x2A, 0x3A, 0x00]),
    glyph('H', &[0x3E, 0x08, 0x3E, 0x00]),
    glyph('I', &[0x22, 0x3E, 0x22, 0x00]),
    glyph('J', &[0x10, 0x20, 0x1E, 0x00]),
    glyph('K', &[0x3E, 0x08, 0x36, 0x00]),
    glyph('L', &[0x3E, 0x20, 0x20, 0x00]),
    glyph('M', &[0x3E, 0x0C, 0x3E, 0x00]),
    glyph('N', &[0x3E, 0x1C, 0x3E, 0x00]),
    glyph('O', &[0x1C, 0x22, 0x1C, 0x00]),
    glyph('P', &[0x3E, 0x0A, 0x04, 0x00]),
    glyph('Q', &[0x1C, 0x32, 0x3C, 0x00]),
    glyph('R', &[0x3E, 0x1A, 0x2C, 0x00]),
    glyph('S', &[0x24, 0x2A, 0x12, 0x00]),
    glyph('T', &[0x02, 0x3E, 0x02, 0x00]),
    glyph('U', &[0x1E, 0x20, 0x3E, 0x00]),
    glyph('V', &[0x0E, 0x30, 0x0E, 0x00]),
    glyph('W', &[0x3E, 0x18, 0x3E, 0x00]),
    glyph('X', &[0x36, 0x08, 0x36, 0x00]),
    glyph('Y', &[0x06, 0x38, 0x06, 0x00]),
    glyph('Z', &[0x32, 0x2A, 0x26, 0x00]),
    glyph('[', &[0x3E, 0x22, 0x22, 0x00]),
    glyph('\\', &[0x04, 0x08, 0x10, 0x00]),
    glyph(']', &[0x22, 0x22, 0x3E, 0x00]),
    glyph('^', &[0x04, 0x02, 0x04, 0x00]),
    glyph('_', &[0x20, 0x20, 0x20, 0x00]),
    glyph('`', &[0x02, 0x04, 0x00, 0x00]),
    glyph('a', &[0x34, 0x2C, 0x38, 0x00]),
    glyph('b', &[0x3E, 0x24, 0x18, 0x00]),
    glyph('c', &[0x18, 0x24, 0x24, 0x00]),
    glyph('d', &[0x18, 0x24, 0x3E, 0x00]),
    glyph('e', &[0x18, 0x34, 0x2C, 0x00]),
    glyph('f', &[0x08, 0x3C, 0x0A, 0x00]),
    glyph('g', &[0x18, 0x54, 0x3C, 0x00]),
    glyph('h', &[0x3E, 0x04, 0x38, 0x00]),
    glyph('i', &[0x00, 0x3A, 0x00, 0x00]),
    glyph('j', &[0x20, 0x40, 0x3A, 0x00]),
    glyph('k', &[0x3E, 0x18, 0x24, 0x00]),
    glyph('l', &[0x22, 0x3E, 0x20, 0x00]),
    glyph('m', &[0x3C, 0x1C, 0x3C, 0x00]),
    glyph('n', &[0x3C, 0x04, 0x38, 0x00]),
    glyph('o', &[0x18, 0x24, 0x18, 0x00]),
    glyph('p', &[0x7C, 0x24, 0x18, 0x00]),
    glyph('q', &[0x18, 0x24, 0x7C, 0x00]),
    glyph('r', &[0x38, 0x04, 0x04, 0x00]),
    glyph('s', &[0x28, 0x3C, 0x14, 0x00]),
    glyph('t', &[0x04, 0x3E, 0x24, 0x00]),
    glyph('u', &[0x1C, 0x20, 0x3C, 0x00]),
    glyph('v', &[0x1C, 0x30, 0x1C, 0x00]),
    glyph('w', &[0x3C, 0x38, 0x3C, 0x00]),
    glyph('x', &[0x24, 0x18, 0x24, 0x00]),
    glyph('y', &[0x0C, 0x50, 0x3C, 0x00]),
    glyph('z', &[0x34, 0x3C, 0x2C, 0x00]),
    glyph('{', &[0x08, 0x3E, 0x22, 0x00]),
    glyph('|', &[0x00, 0x36, 0x00, 0x00]),
    glyph('}', &[0x22, 0x3E, 0x08, 0x00]),
    glyph('~', &[0x08, 0x0C, 0x04, 0x00]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        assert!(GLYPHS_4X8.windows(2).all(|w| w[0].ch < w[1].ch));
    }

    #[test]
    fn covers_printable_ascii() {
        assert_eq!(FONT_4X8.len(), 95);
        for c in ' '..='~' {
            assert!(FONT_4X8.contains(c), "missing {:?}", c);
        }
        assert!(!FONT_4X8.contains('\n'));
        assert!(!FONT_4X8.contains('é'));
    }

    #[test]
    fn every_glyph_is_fixed_width_with_blank_spacing_column() {
        for g in GLYPHS_4X8.iter() {
            assert_eq!(g.columns.len(), GLYPH_WIDTH, "{:?}", g.ch);
            assert_eq!(g.columns[GLYPH_WIDTH - 1], 0, "{:?}", g.ch);
        }
    }

    #[test]
    fn space_is_blank() {
        assert_eq!(FONT_4X8.get(' '), Some(&[0u8, 0, 0, 0][..]));
        assert_eq!(FONT_4X8.space_width(), 4);
    }

    #[test]
    fn chars_in_codepoint_order() {
        let mut chars = FONT_4X8.chars();
        assert_eq!(chars.next(), Some(' '));
        assert_eq!(chars.last(), Some('~'));
        assert_eq!(FONT_4X8.nth(33).map(|g| g.ch), Some('A'));
    }
}
