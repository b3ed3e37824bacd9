//! Text normalization and glyph encoding.
//!
//! The font only covers printable ASCII, so text is folded before
//! lookup: tabs become two spaces, then the string is canonically
//! decomposed, stripped of non-spacing marks and recomposed. Accented
//! Latin letters come out as their base letter (`é` → `e`); anything
//! else the font lacks is reported, never skipped.

use alloc::string::String;
use alloc::vec::Vec;

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

use crate::error::TextError;
use crate::font::GlyphTable;

/// Fold `text` into the form the glyph table is keyed by.
///
/// Idempotent: `normalize(&normalize(t)) == normalize(t)`.
///
/// ```
/// use oledhat_display_rs::text::normalize;
///
/// assert_eq!(normalize("Café\tau lait"), "Cafe  au lait");
/// ```
pub fn normalize(text: &str) -> String {
    text.replace('\t', "  ")
        .nfd()
        .filter(|&c| get_general_category(c) != GeneralCategory::NonspacingMark)
        .nfc()
        .collect()
}

/// [`normalize`] for raw bytes.
///
/// # Errors
/// [`TextError::Encoding`] if `bytes` is not valid UTF-8.
pub fn normalize_utf8(bytes: &[u8]) -> Result<String, TextError> {
    let text = core::str::from_utf8(bytes).map_err(|e| TextError::Encoding {
        valid_up_to: e.valid_up_to(),
    })?;
    Ok(normalize(text))
}

/// Turns text into column bytes with a [`GlyphTable`].
#[derive(Debug, Clone, Copy)]
pub struct TextEncoder<'t> {
    table: &'t GlyphTable,
}

impl<'t> TextEncoder<'t> {
    pub fn new(table: &'t GlyphTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t GlyphTable {
        self.table
    }

    /// Normalize `text` and concatenate its glyphs.
    ///
    /// # Errors
    /// [`TextError::UnknownGlyph`] for the first character the table
    /// does not cover.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, TextError> {
        let mut out = Vec::new();
        self.encode_into(text, &mut out)?;
        Ok(out)
    }

    /// Like [`encode`](Self::encode), appending to `out`.
    ///
    /// On error `out` may hold the glyphs before the failing character.
    pub fn encode_into(&self, text: &str, out: &mut Vec<u8>) -> Result<(), TextError> {
        for ch in normalize(text).chars() {
            let columns = self.table.get(ch).ok_or(TextError::UnknownGlyph(ch))?;
            out.extend_from_slice(columns);
        }
        Ok(())
    }

    /// Encode `word` followed by one space glyph.
    pub fn encode_word(&self, word: &str) -> Result<Vec<u8>, TextError> {
        let mut out = self.encode(word)?;
        let space = self.table.get(' ').ok_or(TextError::UnknownGlyph(' '))?;
        out.extend_from_slice(space);
        Ok(out)
    }
}
