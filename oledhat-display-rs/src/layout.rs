//! Layout configuration, pagination and alignment.
//!
//! This module turns text into page-sized column buffers and decides
//! where on the panel each buffer goes. Nothing here touches the bus.

use alloc::vec;
use alloc::vec::Vec;

use crate::driver::ResetTiming;
use crate::error::TextError;
use crate::text::TextEncoder;

/// One horizontal 8-pixel band of column bytes.
pub type Page = Vec<u8>;

/// Most text pages a single screen will render.
pub const MAX_TEXT_PAGES: usize = 7;

/// Widest page the I2C framing buffer can hold.
pub const MAX_PAGE_WIDTH: usize = 132;

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Configuration for the panel geometry, bring-up and update task.
///
/// [`DisplayConfig::default()`] matches the 1.3" 132×64 HAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Column bytes per page. Default: 132. Max: [`MAX_PAGE_WIDTH`].
    pub page_width: usize,
    /// Number of page bands. Default: 8.
    pub page_count: usize,
    /// Refresh rate of the static screens in Hz. Default: 15.
    pub update_frequency_hz: u32,
    /// Frame rate of the boot animation in Hz. Default: 15.
    pub boot_frequency_hz: u32,
    /// Frame rate of the animated screens in Hz. Default: 15.
    pub animation_frequency_hz: u32,
    /// Contrast sent during bring-up. Default: `0xFF`.
    pub contrast: u8,
    pub reset_timing: ResetTiming,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_width: 132,
            page_count: 8,
            update_frequency_hz: 15,
            boot_frequency_hz: 15,
            animation_frequency_hz: 15,
            contrast: 0xFF,
            reset_timing: ResetTiming::default(),
        }
    }
}

impl DisplayConfig {
    /// Timer period for static screens: `1000 / update_frequency_hz`.
    pub fn update_period_ms(&self) -> u64 {
        period_ms(self.update_frequency_hz)
    }

    pub fn boot_period_ms(&self) -> u64 {
        period_ms(self.boot_frequency_hz)
    }

    pub fn animation_period_ms(&self) -> u64 {
        period_ms(self.animation_frequency_hz)
    }
}

fn period_ms(hz: u32) -> u64 {
    1000 / u64::from(hz.max(1))
}

// ── Addressing and alignment ─────────────────────────────────────────────

/// How a logical row maps to the controller's page register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressingScheme {
    /// `0xB0 + row`.
    BottomOrigin,
    /// `0xB7 - row`; row 0 is the top text line.
    #[default]
    TopOrigin,
}

impl AddressingScheme {
    /// Page register for `row`.
    ///
    /// Not range-checked: rows past the last band produce registers
    /// outside `0xB0..=0xB7`, which
    /// [`OledDriver::select_page()`](crate::OledDriver::select_page) rejects.
    pub fn register(self, row: usize) -> u8 {
        let row = row.min(u8::MAX as usize) as u8;
        match self {
            AddressingScheme::BottomOrigin => 0xB0u8.wrapping_add(row),
            AddressingScheme::TopOrigin => 0xB7u8.wrapping_sub(row),
        }
    }
}

/// Horizontal placement of a page narrower than the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
}

/// Where and how a run of pages is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// First row the run is written to.
    pub offset: usize,
    pub align: Alignment,
    pub scheme: AddressingScheme,
}

impl RenderOptions {
    pub fn top(offset: usize) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn bottom(offset: usize) -> Self {
        Self {
            offset,
            scheme: AddressingScheme::BottomOrigin,
            ..Self::default()
        }
    }

    pub fn aligned(self, align: Alignment) -> Self {
        Self { align, ..self }
    }
}

/// Outcome of writing a run of pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderReport {
    pub pages_written: usize,
    /// Pages that did not fit on the panel and were left out.
    pub pages_dropped: usize,
}

impl RenderReport {
    pub fn is_overflow(&self) -> bool {
        self.pages_dropped > 0
    }
}

// ── Padding ──────────────────────────────────────────────────────────────

/// Zero bytes before `data` up to `width` (right-justified).
///
/// Data already `width` or wider is returned unchanged.
pub fn pad_left(data: &[u8], width: usize) -> Vec<u8> {
    let mut out = vec![0; width.saturating_sub(data.len())];
    out.extend_from_slice(data);
    out
}

/// Zero bytes after `data` up to `width` (left-justified).
pub fn pad_right(data: &[u8], width: usize) -> Vec<u8> {
    let mut out = data.to_vec();
    if out.len() < width {
        out.resize(width, 0);
    }
    out
}

/// `floor((width - len) / 2)` zero bytes before `data`, nothing after.
pub fn pad_center(data: &[u8], width: usize) -> Vec<u8> {
    let mut out = vec![0; width.saturating_sub(data.len()) / 2];
    out.extend_from_slice(data);
    out
}

/// Pad `data` to exactly `width` bytes with the given placement.
pub fn align(data: &[u8], alignment: Alignment, width: usize) -> Vec<u8> {
    match alignment {
        Alignment::Left => pad_right(data, width),
        Alignment::Right => pad_left(data, width),
        Alignment::Center => pad_right(&pad_center(data, width), width),
    }
}

// ── Pagination ───────────────────────────────────────────────────────────

/// Word-wrap `text` into pages of at most `max_width` column bytes.
///
/// Lines split on `\n`, words on `' '`. Each word is encoded with one
/// trailing space and added to the current page; when the next word
/// would push the page past `max_width` the page is emitted as is and
/// the word starts a new one. At the end of a line the final page is
/// emitted minus its trailing space glyph.
///
/// A page holding no word text (a blank line, a run of spaces) is emitted
/// empty, and empty pages at the end are dropped. A single word wider
/// than `max_width` is never split: its page is wider than the panel.
///
/// ```
/// use oledhat_display_rs::{font::FONT_4X8, layout::paginate, text::TextEncoder};
///
/// let pages = paginate(&TextEncoder::new(&FONT_4X8), "hi there", 132).unwrap();
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].len(), 8 * 4);
/// ```
pub fn paginate(
    encoder: &TextEncoder<'_>,
    text: &str,
    max_width: usize,
) -> Result<Vec<Page>, TextError> {
    let trim = encoder.table().space_width();
    let mut pages: Vec<Page> = Vec::new();

    for line in text.split('\n') {
        let mut buffer = PageBuilder::default();

        for word in line.split(' ') {
            let encoded = encoder.encode_word(word)?;
            // Never flush an empty page, even ahead of an overlong word.
            if !buffer.bytes.is_empty() && buffer.bytes.len() + encoded.len() > max_width {
                pages.push(buffer.finish(0));
            }
            buffer.push(&encoded, !word.is_empty());
        }

        pages.push(buffer.finish(trim));
    }

    while pages.last().is_some_and(Vec::is_empty) {
        pages.pop();
    }
    Ok(pages)
}

#[derive(Default)]
struct PageBuilder {
    bytes: Page,
    has_text: bool,
}

impl PageBuilder {
    fn push(&mut self, encoded: &[u8], is_text: bool) {
        self.bytes.extend_from_slice(encoded);
        self.has_text |= is_text;
    }

    /// Take the page, dropping `trim` trailing bytes.
    fn finish(&mut self, trim: usize) -> Page {
        let mut page = core::mem::take(&mut self.bytes);
        if core::mem::take(&mut self.has_text) {
            page.truncate(page.len().saturating_sub(trim));
            page
        } else {
            Page::new()
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
