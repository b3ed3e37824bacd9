//! Screen compositions.
//!
//! [`ScreenRenderer`] builds each screen out of the text pipeline, the
//! pattern generator and the driver's page writes. Row numbering depends
//! on the screen:
//!
//! ```text
//! register  top-origin row  bottom-origin row   titled text  tweet card
//!   0xB7          0               7              title        name(handle)
//!   0xB6          1               6              ------       ------
//!   0xB5          2               5              body 0       body 0
//!   ...          ...             ...             ...          ...
//!   0xB0          7               0              body 5       body 5
//! ```

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use display_interface::AsyncWriteOnlyDataCommand;
use rand::{Rng, RngCore};

use crate::driver::OledDriver;
use crate::error::OledError;
use crate::font::GlyphTable;
use crate::layout::{
    align, paginate, AddressingScheme, Alignment, DisplayConfig, Page, RenderOptions,
    RenderReport, MAX_TEXT_PAGES,
};
use crate::pattern::{generate_pattern, Density};
use crate::text::TextEncoder;

/// Messages shown over the boot animation.
pub const BOOT_MESSAGES: [&str; 3] = ["Reticulating Splines", "Downloading More RAM", "rm -rf /"];

/// Top-origin row of the boot message.
const BOOT_MESSAGE_ROW: usize = 3;

/// Pick one of [`BOOT_MESSAGES`] at random.
pub fn pick_boot_message<R: RngCore>(rng: &mut R) -> &'static str {
    BOOT_MESSAGES[rng.gen_range(0..BOOT_MESSAGES.len())]
}

/// Draws whole screens through an [`OledDriver`].
#[derive(Debug, Clone, Copy)]
pub struct ScreenRenderer {
    font: &'static GlyphTable,
    page_width: usize,
    page_count: usize,
}

impl ScreenRenderer {
    pub fn new(font: &'static GlyphTable, config: &DisplayConfig) -> Self {
        Self {
            font,
            page_width: config.page_width,
            page_count: config.page_count,
        }
    }

    pub fn encoder(&self) -> TextEncoder<'static> {
        TextEncoder::new(self.font)
    }

    /// Word-wrap `text` to the panel width.
    pub fn paginate(&self, text: &str) -> Result<Vec<Page>, OledError> {
        Ok(paginate(&self.encoder(), text, self.page_width)?)
    }

    /// Dashes across the panel, one glyph short of the full width.
    pub fn divider(&self) -> String {
        let glyph_width = self.font.space_width();
        let len = (self.page_width / glyph_width.max(1)).saturating_sub(1);
        "-".repeat(len)
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    /// Write `pages` one row apart starting at `options.offset`.
    ///
    /// Top-origin runs go down from the offset, bottom-origin runs count
    /// down to row 0. At most [`MAX_TEXT_PAGES`] pages are written and
    /// never past the last row; the rest are reported as dropped. A page
    /// wider than the panel (one overlong word) is dropped too and its row
    /// blanked.
    pub async fn write_pages<DI>(
        &self,
        driver: &mut OledDriver<DI>,
        pages: &[Page],
        options: &RenderOptions,
    ) -> Result<RenderReport, OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
    {
        let (report, _rows) = self.write_run(driver, pages, options).await?;
        Ok(report)
    }

    /// [`write_pages()`](Self::write_pages), also returning the number of
    /// rows the run occupied.
    async fn write_run<DI>(
        &self,
        driver: &mut OledDriver<DI>,
        pages: &[Page],
        options: &RenderOptions,
    ) -> Result<(RenderReport, usize), OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
    {
        let rows = match options.scheme {
            AddressingScheme::TopOrigin => self.page_count.saturating_sub(options.offset),
            AddressingScheme::BottomOrigin => (options.offset + 1).min(self.page_count),
        };
        let count = pages.len().min(MAX_TEXT_PAGES).min(rows);
        let mut report = RenderReport {
            pages_written: 0,
            pages_dropped: pages.len() - count,
        };

        for (i, page) in pages[..count].iter().enumerate() {
            let row = match options.scheme {
                AddressingScheme::TopOrigin => options.offset + i,
                AddressingScheme::BottomOrigin => options.offset - i,
            };
            let bytes = if page.len() > self.page_width {
                #[cfg(feature = "defmt")]
                defmt::warn!("{}-byte word dropped from row {}", page.len(), row);
                report.pages_dropped += 1;
                vec![0u8; self.page_width]
            } else {
                report.pages_written += 1;
                align(page, options.align, self.page_width)
            };
            driver
                .write_page(options.scheme.register(row), &bytes)
                .await?;
        }

        #[cfg(feature = "defmt")]
        if report.is_overflow() {
            defmt::debug!("{} text pages dropped", report.pages_dropped);
        }
        Ok((report, count))
    }

    /// First of `pages` on row `options.offset`, or a blank row if there
    /// is none.
    async fn write_line<DI>(
        &self,
        driver: &mut OledDriver<DI>,
        pages: &[Page],
        options: &RenderOptions,
    ) -> Result<(), OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
    {
        let (_, rows) = self.write_run(driver, first_page(pages), options).await?;
        if rows == 0 {
            self.blank_rows(driver, options.scheme, [options.offset])
                .await?;
        }
        Ok(())
    }

    async fn blank_rows<DI>(
        &self,
        driver: &mut OledDriver<DI>,
        scheme: AddressingScheme,
        rows: impl IntoIterator<Item = usize>,
    ) -> Result<(), OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
    {
        let zeros = vec![0u8; self.page_width];
        for row in rows {
            driver.write_page(scheme.register(row), &zeros).await?;
        }
        Ok(())
    }

    /// Paginate and write `text`.
    pub async fn print_text<DI>(
        &self,
        driver: &mut OledDriver<DI>,
        text: &str,
        options: &RenderOptions,
    ) -> Result<RenderReport, OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
    {
        let pages = self.paginate(text)?;
        self.write_pages(driver, &pages, options).await
    }

    /// Title on row 0, divider on row 1, `body` from row 2.
    ///
    /// `scroll` leading body pages are skipped, clamped so the last page
    /// stays on screen. Every row is rewritten, unused ones blank, so the
    /// panel needs no clear between redraws. The report covers the body
    /// only.
    pub async fn print_titled_text<DI>(
        &self,
        driver: &mut OledDriver<DI>,
        title: &str,
        body: &str,
        scroll: usize,
    ) -> Result<RenderReport, OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
    {
        let pages = self.paginate(body)?;
        self.print_titled_pages(driver, title, &pages, scroll).await
    }

    /// [`print_titled_text()`](Self::print_titled_text) with the body
    /// already paginated.
    pub async fn print_titled_pages<DI>(
        &self,
        driver: &mut OledDriver<DI>,
        title: &str,
        body: &[Page],
        scroll: usize,
    ) -> Result<RenderReport, OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
    {
        let title_pages = self.paginate(title)?;
        let divider = self.paginate(&self.divider())?;
        self.write_line(driver, &title_pages, &RenderOptions::top(0))
            .await?;
        self.write_line(driver, &divider, &RenderOptions::top(1))
            .await?;

        let skip = scroll.min(body.len().saturating_sub(1));
        let (mut report, rows) = self
            .write_run(driver, &body[skip..], &RenderOptions::top(2))
            .await?;
        report.pages_dropped += skip;

        self.blank_rows(driver, AddressingScheme::TopOrigin, 2 + rows..self.page_count)
            .await?;
        Ok(report)
    }

    /// Centred `name(handle)` header on the top band, a divider below it
    /// and the centred body counting down to the bottom band.
    ///
    /// Body text past the last band is cut off; bands the body does not
    /// reach are blanked.
    pub async fn print_tweet_card<DI>(
        &self,
        driver: &mut OledDriver<DI>,
        name: &str,
        handle: &str,
        text: &str,
    ) -> Result<RenderReport, OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
    {
        let top = self.page_count.saturating_sub(1);
        let mut header = String::with_capacity(name.len() + handle.len() + 2);
        header.push_str(name);
        header.push('(');
        header.push_str(handle);
        header.push(')');

        let header_pages = self.paginate(&header)?;
        let divider = self.paginate(&self.divider())?;
        let body = self.paginate(text)?;

        let centred = |row| RenderOptions::bottom(row).aligned(Alignment::Center);
        self.write_line(driver, &header_pages, &centred(top)).await?;
        if top < 2 {
            return Ok(RenderReport {
                pages_written: 0,
                pages_dropped: body.len(),
            });
        }
        self.write_line(driver, &divider, &centred(top - 1)).await?;

        let (report, rows) = self.write_run(driver, &body, &centred(top - 2)).await?;
        self.blank_rows(
            driver,
            AddressingScheme::BottomOrigin,
            (0..(top - 1).saturating_sub(rows)).rev(),
        )
        .await?;
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Font and patterns
    // -----------------------------------------------------------------------

    /// Every glyph in codepoint order, as many per row as fit.
    pub async fn print_font<DI>(&self, driver: &mut OledDriver<DI>) -> Result<RenderReport, OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
    {
        let mut pages: Vec<Page> = Vec::new();
        let mut line = Page::new();
        for glyph in self.font.iter() {
            if !line.is_empty() && line.len() + glyph.columns.len() > self.page_width {
                pages.push(core::mem::take(&mut line));
            }
            line.extend_from_slice(glyph.columns);
        }
        if !line.is_empty() {
            pages.push(line);
        }

        self.write_pages(driver, &pages, &RenderOptions::top(0)).await
    }

    /// Fill every band with random glyphs, band 7 first.
    pub async fn print_random_glyphs<DI, R>(
        &self,
        driver: &mut OledDriver<DI>,
        rng: &mut R,
    ) -> Result<(), OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
        R: RngCore,
    {
        if self.font.is_empty() {
            return Ok(());
        }
        for row in (0..self.page_count).rev() {
            let mut page = Page::with_capacity(self.page_width);
            loop {
                let glyph = self.font.nth(rng.gen_range(0..self.font.len()));
                match glyph {
                    Some(g) if page.len() + g.columns.len() <= self.page_width => {
                        page.extend_from_slice(g.columns);
                    }
                    _ => break,
                }
            }
            let page = align(&page, Alignment::Left, self.page_width);
            driver
                .write_page(AddressingScheme::BottomOrigin.register(row), &page)
                .await?;
        }
        Ok(())
    }

    /// Random dots over the whole panel.
    pub async fn print_dots<DI, R>(
        &self,
        driver: &mut OledDriver<DI>,
        rng: &mut R,
        density: Density,
    ) -> Result<(), OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
        R: RngCore,
    {
        for row in 0..self.page_count {
            let page = generate_pattern(rng, density, self.page_width);
            driver
                .write_page(AddressingScheme::BottomOrigin.register(row), &page)
                .await?;
        }
        Ok(())
    }

    /// One frame of the boot animation: static with `message` centred on
    /// row 3.
    ///
    /// # Errors
    /// [`OledError::PageOverflow`] if the padded message is wider than the
    /// panel.
    pub async fn boot_screen<DI, R>(
        &self,
        driver: &mut OledDriver<DI>,
        rng: &mut R,
        message: &str,
    ) -> Result<(), OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
        R: RngCore,
    {
        let mut padded = String::with_capacity(message.len() + 2);
        padded.push(' ');
        padded.push_str(message);
        padded.push(' ');
        let label = self.encoder().encode(&padded)?;
        if label.len() > self.page_width {
            return Err(OledError::PageOverflow {
                len: label.len(),
                max: self.page_width,
            });
        }

        for row in 0..self.page_count {
            let mut page = generate_pattern(rng, Density::Blank, self.page_width);
            if row == BOOT_MESSAGE_ROW {
                let start = (self.page_width - label.len()) / 2;
                page[start..start + label.len()].copy_from_slice(&label);
            }
            driver
                .write_page(AddressingScheme::TopOrigin.register(row), &page)
                .await?;
        }
        Ok(())
    }
}

fn first_page(pages: &[Page]) -> &[Page] {
    &pages[..pages.len().min(1)]
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ControlPins;
    use crate::font::{FONT_4X8, GLYPH_WIDTH};
    use crate::testing::{EventLog, FakeDelay, FakeInterface, NoPin};
    use embassy_futures::block_on;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const W: usize = 132;

    fn setup() -> (ScreenRenderer, OledDriver<FakeInterface>) {
        let config = DisplayConfig::default();
        let log = EventLog::default();
        let mut driver = OledDriver::new(FakeInterface::default(), config);
        block_on(driver.init(
            &mut ControlPins::new(NoPin, NoPin, NoPin),
            &mut FakeDelay::new(&log),
        ))
        .unwrap();
        // Forget the bring-up traffic.
        driver.interface_mut().frames.clear();
        (ScreenRenderer::new(&FONT_4X8, &config), driver)
    }

    fn writes(driver: OledDriver<FakeInterface>) -> Vec<(u8, Vec<u8>)> {
        driver.interface().page_writes()
    }

    fn enc(s: &str) -> Vec<u8> {
        TextEncoder::new(&FONT_4X8).encode(s).unwrap()
    }

    #[test]
    fn print_text_pads_each_page_right() {
        let (screens, mut driver) = setup();
        let report = block_on(screens.print_text(&mut driver, "a\nb", &RenderOptions::top(0))).unwrap();
        assert_eq!(report, RenderReport { pages_written: 2, pages_dropped: 0 });

        let w = writes(driver);
        assert_eq!(w.len(), 2);
        assert_eq!(w[0].0, 0xB7);
        assert_eq!(w[1].0, 0xB6);
        assert_eq!(w[0].1.len(), W);
        assert_eq!(&w[0].1[..GLYPH_WIDTH], FONT_4X8.get('a').unwrap());
        assert!(w[0].1[GLYPH_WIDTH..].iter().all(|&b| b == 0));
    }

    #[test]
    fn text_is_capped_at_seven_pages() {
        let (screens, mut driver) = setup();
        let text = "1\n2\n3\n4\n5\n6\n7\n8\n9";
        let report = block_on(screens.print_text(&mut driver, text, &RenderOptions::top(0))).unwrap();
        assert_eq!(report.pages_written, 7);
        assert_eq!(report.pages_dropped, 2);
        assert!(report.is_overflow());
        assert_eq!(writes(driver).len(), 7);
    }

    #[test]
    fn titled_text_layout() {
        let (screens, mut driver) = setup();
        let report =
            block_on(screens.print_titled_text(&mut driver, "cpu", "core 0: 1.00", 0)).unwrap();
        assert_eq!(report.pages_written, 1);

        let w = writes(driver);
        let registers: Vec<u8> = w.iter().map(|(r, _)| *r).collect();
        assert_eq!(registers, [0xB7, 0xB6, 0xB5, 0xB4, 0xB3, 0xB2, 0xB1, 0xB0]);
        assert_eq!(w[0].1[..12], enc("cpu")[..]);
        assert_eq!(w[1].1[..32 * GLYPH_WIDTH], enc(&"-".repeat(32))[..]);
        assert_eq!(w[2].1[..12 * GLYPH_WIDTH], enc("core 0: 1.00")[..]);
        assert!(w[3..].iter().all(|(_, d)| d.iter().all(|&b| b == 0)));
    }

    #[test]
    fn titled_body_never_reaches_past_the_last_band() {
        let (screens, mut driver) = setup();
        let body = "1\n2\n3\n4\n5\n6\n7";
        let report = block_on(screens.print_titled_text(&mut driver, "t", body, 0)).unwrap();
        assert_eq!(report.pages_written, 6);
        assert_eq!(report.pages_dropped, 1);
        assert!(writes(driver).iter().all(|(r, _)| (0xB0..=0xB7).contains(r)));
    }

    #[test]
    fn scroll_skips_leading_body_pages() {
        let (screens, mut driver) = setup();
        let report = block_on(screens.print_titled_text(&mut driver, "t", "a\nb\nc", 2)).unwrap();
        assert_eq!(report.pages_written, 1);
        assert_eq!(report.pages_dropped, 2);
        let w = writes(driver);
        assert_eq!(w[2].1[..GLYPH_WIDTH], enc("c")[..]);
    }

    #[test]
    fn scroll_is_clamped_to_the_last_page() {
        let (screens, mut driver) = setup();
        block_on(screens.print_titled_text(&mut driver, "t", "a\nb", 50)).unwrap();
        let w = writes(driver);
        assert_eq!(w[2].1[..GLYPH_WIDTH], enc("b")[..]);
    }

    #[test]
    fn tweet_card_centres_header_and_counts_down() {
        let (screens, mut driver) = setup();
        let report =
            block_on(screens.print_tweet_card(&mut driver, "Ann", "ann", "hello\nworld")).unwrap();
        assert_eq!(report.pages_written, 2);

        let w = writes(driver);
        let registers: Vec<u8> = w.iter().map(|(r, _)| *r).collect();
        assert_eq!(registers, [0xB7, 0xB6, 0xB5, 0xB4, 0xB3, 0xB2, 0xB1, 0xB0]);
        assert!(w[4..].iter().all(|(_, d)| d.iter().all(|&b| b == 0)));

        let header = enc("Ann(ann)");
        let start = (W - header.len()) / 2;
        assert!(w[0].1[..start].iter().all(|&b| b == 0));
        assert_eq!(w[0].1[start..start + header.len()], header[..]);
        assert_eq!(w[0].1.len(), W);
    }

    #[test]
    fn empty_title_blanks_row_zero() {
        let (screens, mut driver) = setup();
        block_on(screens.print_titled_text(&mut driver, "", "x", 0)).unwrap();

        let w = writes(driver);
        assert_eq!(w.len(), 8);
        assert_eq!(w[0].0, 0xB7);
        assert!(w[0].1.iter().all(|&b| b == 0));
        assert_eq!(w[2].1[..GLYPH_WIDTH], enc("x")[..]);
    }

    #[test]
    fn overlong_word_row_is_blanked_and_reported() {
        let (screens, mut driver) = setup();
        let body = alloc::format!("ab {} cd", "x".repeat(40));
        let report = block_on(screens.print_titled_text(&mut driver, "net", &body, 0)).unwrap();
        assert_eq!(report, RenderReport { pages_written: 2, pages_dropped: 1 });

        let w = writes(driver);
        assert_eq!(w.len(), 8);
        assert_eq!(w[2].1[..3 * GLYPH_WIDTH], enc("ab ")[..]);
        assert!(w[3].1.iter().all(|&b| b == 0));
        assert_eq!(w[4].1[..2 * GLYPH_WIDTH], enc("cd")[..]);
    }

    #[test]
    fn long_tweet_is_truncated_at_band_zero() {
        let (screens, mut driver) = setup();
        let body = "1\n2\n3\n4\n5\n6\n7\n8";
        let report = block_on(screens.print_tweet_card(&mut driver, "a", "b", body)).unwrap();
        assert_eq!(report.pages_written, 6);
        assert_eq!(report.pages_dropped, 2);
        let w = writes(driver);
        assert_eq!(w.last().map(|(r, _)| *r), Some(0xB0));
    }

    #[test]
    fn font_dump_shows_every_glyph_in_order() {
        let (screens, mut driver) = setup();
        let report = block_on(screens.print_font(&mut driver)).unwrap();
        // 95 glyphs, 33 per row.
        assert_eq!(report.pages_written, 3);

        let w = writes(driver);
        assert_eq!(w[0].0, 0xB7);
        let all: String = FONT_4X8.chars().collect();
        assert_eq!(w[0].1, enc(&all[..33]));
        assert_eq!(w[1].1, enc(&all[33..66]));
        assert_eq!(w[2].1[..29 * GLYPH_WIDTH], enc(&all[66..])[..]);
    }

    #[test]
    fn random_glyphs_fill_each_band_without_overflow() {
        let (screens, mut driver) = setup();
        let mut rng = SmallRng::seed_from_u64(1);
        block_on(screens.print_random_glyphs(&mut driver, &mut rng)).unwrap();

        let w = writes(driver);
        let registers: Vec<u8> = w.iter().map(|(r, _)| *r).collect();
        assert_eq!(registers, [0xB7, 0xB6, 0xB5, 0xB4, 0xB3, 0xB2, 0xB1, 0xB0]);
        assert!(w.iter().all(|(_, d)| d.len() == W));
    }

    #[test]
    fn dots_cover_all_bands_bottom_origin() {
        let (screens, mut driver) = setup();
        let mut rng = SmallRng::seed_from_u64(2);
        block_on(screens.print_dots(&mut driver, &mut rng, Density::Sparse)).unwrap();

        let w = writes(driver);
        assert_eq!(w.len(), 8);
        for (row, (register, data)) in w.iter().enumerate() {
            assert_eq!(*register, 0xB0 + row as u8);
            assert!(data.iter().skip(1).step_by(2).all(|&b| b == 0));
        }
    }

    #[test]
    fn boot_screen_overlays_message_on_row_three() {
        let (screens, mut driver) = setup();
        let mut rng = SmallRng::seed_from_u64(3);
        block_on(screens.boot_screen(&mut driver, &mut rng, "rm -rf /")).unwrap();

        let w = writes(driver);
        assert_eq!(w.len(), 8);
        let (register, data) = &w[3];
        assert_eq!(*register, 0xB4);
        let label = enc(" rm -rf / ");
        let start = (W - label.len()) / 2;
        assert_eq!(data[start..start + label.len()], label[..]);
    }

    #[test]
    fn boot_message_wider_than_panel_is_rejected() {
        let (screens, mut driver) = setup();
        let mut rng = SmallRng::seed_from_u64(4);
        let message = "x".repeat(40);
        assert!(matches!(
            block_on(screens.boot_screen(&mut driver, &mut rng, &message)),
            Err(OledError::PageOverflow { len: 168, max: 132 })
        ));
        assert!(writes(driver).is_empty());
    }

    #[test]
    fn every_boot_message_fits() {
        let (screens, mut driver) = setup();
        let mut rng = SmallRng::seed_from_u64(5);
        for message in BOOT_MESSAGES {
            block_on(screens.boot_screen(&mut driver, &mut rng, message)).unwrap();
        }
        assert!(BOOT_MESSAGES.contains(&pick_boot_message(&mut rng)));
    }

    #[test]
    fn unknown_glyph_aborts_before_any_write() {
        let (screens, mut driver) = setup();
        assert!(matches!(
            block_on(screens.print_titled_text(&mut driver, "t", "5€", 0)),
            Err(OledError::Text(crate::error::TextError::UnknownGlyph('€')))
        ));
        assert!(writes(driver).is_empty());
    }
}
