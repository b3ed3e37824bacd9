//! Per-frame rendering state.
//!
//! [`DisplaySession`] is owned by the render loop. Each frame it gets a
//! [`View`] of the shared selection and the latest stats snapshot, and
//! decides whether anything has to go over the bus at all.

use alloc::string::String;
use alloc::vec::Vec;

use display_interface::AsyncWriteOnlyDataCommand;
use rand::RngCore;

use oledhat::shared_state::{CarouselPage, ScreenMode, StatsSnapshot, View};

use crate::driver::OledDriver;
use crate::error::OledError;
use crate::font::GlyphTable;
use crate::layout::{DisplayConfig, Page, RenderReport};
use crate::pattern::Density;
use crate::screens::{ScreenRenderer, BOOT_MESSAGES};

/// Content of the text block screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    pub title: String,
    pub body: String,
}

/// Content of the tweet card screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tweet {
    pub name: String,
    pub handle: String,
    pub text: String,
}

/// What [`DisplaySession::render_frame()`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameOutcome {
    /// The screen was redrawn. Animations report no pages.
    Drawn(RenderReport),
    /// Nothing changed since the last frame; no bus traffic.
    Skipped,
}

/// The render loop's mutable state.
pub struct DisplaySession {
    screens: ScreenRenderer,
    text_block: TextBlock,
    /// Paginated `text_block.body`, built on first use.
    text_pages: Option<Vec<Page>>,
    tweet: Tweet,
    boot_message: &'static str,
    /// The view last drawn, scroll clamped to `max_scroll`.
    last_view: Option<View>,
    last_stats: Option<StatsSnapshot>,
    /// Highest scroll offset that still changes the last drawn screen.
    max_scroll: u8,
    dirty: bool,
}

impl DisplaySession {
    pub fn new(font: &'static GlyphTable, config: &DisplayConfig) -> Self {
        Self {
            screens: ScreenRenderer::new(font, config),
            text_block: TextBlock::default(),
            text_pages: None,
            tweet: Tweet::default(),
            boot_message: BOOT_MESSAGES[0],
            last_view: None,
            last_stats: None,
            max_scroll: 0,
            dirty: true,
        }
    }

    pub fn screens(&self) -> &ScreenRenderer {
        &self.screens
    }

    pub fn set_boot_message(&mut self, message: &'static str) {
        self.boot_message = message;
    }

    pub fn boot_message(&self) -> &'static str {
        self.boot_message
    }

    /// Replace the text block screen's content.
    pub fn set_text_block(&mut self, title: &str, body: &str) {
        self.text_block = TextBlock {
            title: title.into(),
            body: body.into(),
        };
        self.text_pages = None;
        self.dirty = true;
    }

    pub fn text_block(&self) -> &TextBlock {
        &self.text_block
    }

    /// Replace the tweet card's content.
    pub fn set_tweet(&mut self, name: &str, handle: &str, text: &str) {
        self.tweet = Tweet {
            name: name.into(),
            handle: handle.into(),
            text: text.into(),
        };
        self.dirty = true;
    }

    pub fn tweet(&self) -> &Tweet {
        &self.tweet
    }

    /// Force a full redraw, clear included, on the next frame.
    pub fn invalidate(&mut self) {
        self.last_view = None;
        self.dirty = true;
    }

    /// One frame of the boot animation with this session's message.
    pub async fn boot_frame<DI, R>(
        &mut self,
        driver: &mut OledDriver<DI>,
        rng: &mut R,
    ) -> Result<(), OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
        R: RngCore,
    {
        self.screens.boot_screen(driver, rng, self.boot_message).await
    }

    /// Highest useful scroll offset on the screen drawn last: one less
    /// than its body page count, or 0 for screens that do not scroll.
    ///
    /// The render loop feeds this back with
    /// [`Selection::clamp_scroll()`](oledhat::shared_state::Selection::clamp_scroll)
    /// so scrolling up after overshooting the end takes effect at once.
    pub fn max_scroll(&self) -> u8 {
        self.max_scroll
    }

    /// Draw `view`.
    ///
    /// The panel is cleared first whenever the mode or (on the stats
    /// carousel) the page differs from the last frame's. Static screens
    /// are skipped when neither their content, the snapshot (stats
    /// carousel) nor the scroll position as clamped to the body changed;
    /// animated screens always redraw. A failed frame is retried in full
    /// next time.
    pub async fn render_frame<DI, R>(
        &mut self,
        driver: &mut OledDriver<DI>,
        rng: &mut R,
        view: View,
        stats: Option<&StatsSnapshot>,
    ) -> Result<FrameOutcome, OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
        R: RngCore,
    {
        let view = relevant(view);
        let screen = self.last_view.map(|v| (v.mode, v.page));
        if screen != Some((view.mode, view.page)) {
            #[cfg(feature = "defmt")]
            if screen.map(|(mode, _)| mode) != Some(view.mode) {
                defmt::info!("screen: {}", view.mode);
            }
            self.dirty = true;
            self.last_view = None;
            driver.clear().await?;
        }

        if view.mode == ScreenMode::StatsCarousel && self.last_stats.as_ref() != stats {
            self.dirty = true;
        }

        if !self.dirty && !view.mode.is_animated() && self.last_view == Some(self.clamped(view)) {
            return Ok(FrameOutcome::Skipped);
        }

        let report = self.draw(driver, rng, view, stats).await?;
        self.dirty = false;
        self.last_stats = stats.cloned();
        self.last_view = Some(self.clamped(view));
        Ok(FrameOutcome::Drawn(report))
    }

    fn clamped(&self, view: View) -> View {
        View {
            scroll: view.scroll.min(self.max_scroll),
            ..view
        }
    }

    async fn draw<DI, R>(
        &mut self,
        driver: &mut OledDriver<DI>,
        rng: &mut R,
        view: View,
        stats: Option<&StatsSnapshot>,
    ) -> Result<RenderReport, OledError>
    where
        DI: AsyncWriteOnlyDataCommand,
        R: RngCore,
    {
        let screens = self.screens;
        let scroll = usize::from(view.scroll);
        self.max_scroll = 0;

        match view.mode {
            ScreenMode::StatsCarousel => {
                let body = screens.paginate(&view.page.body(stats))?;
                self.max_scroll = scroll_limit(&body);
                screens
                    .print_titled_pages(driver, view.page.title(), &body, scroll)
                    .await
            }
            ScreenMode::TextBlock => {
                if self.text_pages.is_none() {
                    self.text_pages = Some(screens.paginate(&self.text_block.body)?);
                }
                let pages = self.text_pages.as_deref().unwrap_or_default();
                self.max_scroll = scroll_limit(pages);
                screens
                    .print_titled_pages(driver, &self.text_block.title, pages, scroll)
                    .await
            }
            ScreenMode::TweetCard => {
                let tweet = &self.tweet;
                screens
                    .print_tweet_card(driver, &tweet.name, &tweet.handle, &tweet.text)
                    .await
            }
            ScreenMode::FontDump => screens.print_font(driver).await,
            ScreenMode::RandomGlyphAnimation => {
                screens.print_random_glyphs(driver, rng).await?;
                Ok(RenderReport::default())
            }
            ScreenMode::DotPattern => {
                let density = Density::from_level(view.variant % 4);
                screens.print_dots(driver, rng, density).await?;
                Ok(RenderReport::default())
            }
            ScreenMode::BootAnimation => {
                screens.boot_screen(driver, rng, self.boot_message).await?;
                Ok(RenderReport::default())
            }
        }
    }
}

/// `view` with the fields its screen ignores zeroed, so changing them
/// neither clears nor redraws the panel.
fn relevant(view: View) -> View {
    let scrolls = matches!(view.mode, ScreenMode::StatsCarousel | ScreenMode::TextBlock);
    View {
        mode: view.mode,
        page: match view.mode {
            ScreenMode::StatsCarousel => view.page,
            _ => CarouselPage::default(),
        },
        scroll: if scrolls { view.scroll } else { 0 },
        variant: match view.mode {
            ScreenMode::DotPattern => view.variant,
            _ => 0,
        },
    }
}

fn scroll_limit(body: &[Page]) -> u8 {
    u8::try_from(body.len().saturating_sub(1)).unwrap_or(u8::MAX)
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ControlPins;
    use crate::font::FONT_4X8;
    use crate::testing::{EventLog, FakeDelay, FakeInterface, NoPin};
    use embassy_futures::block_on;
    use oledhat::shared_state::CarouselPage;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    struct Rig {
        session: DisplaySession,
        driver: OledDriver<FakeInterface>,
        rng: SmallRng,
    }

    impl Rig {
        fn new() -> Self {
            let config = DisplayConfig::default();
            let log = EventLog::default();
            let mut driver = OledDriver::new(FakeInterface::default(), config);
            block_on(driver.init(
                &mut ControlPins::new(NoPin, NoPin, NoPin),
                &mut FakeDelay::new(&log),
            ))
            .unwrap();
            driver.interface_mut().frames.clear();
            Self {
                session: DisplaySession::new(&FONT_4X8, &config),
                driver,
                rng: SmallRng::seed_from_u64(7),
            }
        }

        fn frame(
            &mut self,
            view: View,
            stats: Option<&StatsSnapshot>,
        ) -> Result<FrameOutcome, OledError> {
            self.driver.interface_mut().frames.clear();
            block_on(
                self.session
                    .render_frame(&mut self.driver, &mut self.rng, view, stats),
            )
        }

        fn writes(&self) -> Vec<(u8, Vec<u8>)> {
            self.driver.interface().page_writes()
        }
    }

    fn view(mode: ScreenMode) -> View {
        View {
            mode,
            ..View::default()
        }
    }

    fn snapshot(load: f32) -> StatsSnapshot {
        let mut s = StatsSnapshot::default();
        s.cpu_percent.push(load).unwrap();
        s
    }

    fn is_blank(data: &[u8]) -> bool {
        data.iter().all(|&b| b == 0)
    }

    #[test]
    fn first_frame_clears_then_draws() {
        let mut rig = Rig::new();
        let outcome = rig.frame(View::default(), None).unwrap();
        assert_eq!(outcome, FrameOutcome::Drawn(RenderReport::default()));

        let w = rig.writes();
        // 8 clear writes, title, divider, 6 blank body rows.
        assert_eq!(w.len(), 16);
        assert!(w[..8].iter().all(|(_, d)| is_blank(d)));
        assert_eq!(w[8].0, 0xB7);
        assert!(!is_blank(&w[8].1));
    }

    #[test]
    fn unchanged_static_frame_is_skipped() {
        let mut rig = Rig::new();
        let stats = snapshot(10.0);
        rig.frame(View::default(), Some(&stats)).unwrap();

        assert_eq!(rig.frame(View::default(), Some(&stats)).unwrap(), FrameOutcome::Skipped);
        assert!(rig.driver.interface().frames.is_empty());
    }

    #[test]
    fn new_snapshot_redraws_without_clearing() {
        let mut rig = Rig::new();
        rig.frame(View::default(), Some(&snapshot(10.0))).unwrap();

        let outcome = rig.frame(View::default(), Some(&snapshot(20.0))).unwrap();
        assert_eq!(
            outcome,
            FrameOutcome::Drawn(RenderReport {
                pages_written: 1,
                pages_dropped: 0
            })
        );
        let w = rig.writes();
        assert_eq!(w.len(), 8);
        assert_eq!(w[0].0, 0xB7);
    }

    #[test]
    fn page_change_clears_the_panel() {
        let mut rig = Rig::new();
        rig.frame(View::default(), None).unwrap();

        let next = View {
            page: CarouselPage::Host,
            ..View::default()
        };
        rig.frame(next, None).unwrap();
        let w = rig.writes();
        assert!(w[..8].iter().all(|(_, d)| is_blank(d)));
        assert_eq!(w.len(), 16);
    }

    #[test]
    fn animations_always_redraw() {
        let mut rig = Rig::new();
        let dots = view(ScreenMode::DotPattern);
        rig.frame(dots, None).unwrap();
        assert!(matches!(rig.frame(dots, None).unwrap(), FrameOutcome::Drawn(_)));
        assert_eq!(rig.writes().len(), 8);
    }

    #[test]
    fn dot_density_follows_variant() {
        let mut rig = Rig::new();
        let dense = View {
            variant: 7,
            ..view(ScreenMode::DotPattern)
        };
        rig.frame(dense, None).unwrap();
        assert!(rig.writes()[8..].iter().all(|(_, d)| is_blank(d)));
    }

    #[test]
    fn text_block_is_paginated_once_and_redrawn_on_change() {
        let mut rig = Rig::new();
        rig.session.set_text_block("notes", "one\ntwo");
        let text = view(ScreenMode::TextBlock);

        let outcome = rig.frame(text, None).unwrap();
        assert_eq!(
            outcome,
            FrameOutcome::Drawn(RenderReport {
                pages_written: 2,
                pages_dropped: 0
            })
        );
        assert!(rig.session.text_pages.is_some());
        assert_eq!(rig.frame(text, None).unwrap(), FrameOutcome::Skipped);

        rig.session.set_text_block("notes", "three");
        assert!(matches!(rig.frame(text, None).unwrap(), FrameOutcome::Drawn(_)));
        assert_eq!(rig.writes().len(), 8);
    }

    #[test]
    fn tweet_card_screen() {
        let mut rig = Rig::new();
        rig.session.set_tweet("Ann", "ann", "hello");
        let outcome = rig.frame(view(ScreenMode::TweetCard), None).unwrap();
        assert_eq!(
            outcome,
            FrameOutcome::Drawn(RenderReport {
                pages_written: 1,
                pages_dropped: 0
            })
        );
        let registers: Vec<u8> = rig.writes()[8..].iter().map(|(r, _)| *r).collect();
        assert_eq!(registers, [0xB7, 0xB6, 0xB5, 0xB4, 0xB3, 0xB2, 0xB1, 0xB0]);
    }

    #[test]
    fn shorter_tweet_blanks_the_old_lines() {
        let mut rig = Rig::new();
        let card = view(ScreenMode::TweetCard);
        rig.session.set_tweet("a", "b", "1\n2\n3");
        rig.frame(card, None).unwrap();

        rig.session.set_tweet("a", "b", "x");
        rig.frame(card, None).unwrap();
        let w = rig.writes();
        // Redrawn in place, no clear.
        assert_eq!(w.len(), 8);
        let blank: Vec<u8> = w
            .iter()
            .filter(|(_, d)| is_blank(d))
            .map(|(r, _)| *r)
            .collect();
        assert_eq!(blank, [0xB4, 0xB3, 0xB2, 0xB1, 0xB0]);
    }

    #[test]
    fn scrolling_past_the_end_changes_nothing() {
        let mut rig = Rig::new();
        rig.session.set_text_block("t", "a\nb");
        let text = view(ScreenMode::TextBlock);
        rig.frame(text, None).unwrap();
        assert_eq!(rig.session.max_scroll(), 1);

        // One step down redraws in place.
        let down = View { scroll: 1, ..text };
        assert!(matches!(rig.frame(down, None).unwrap(), FrameOutcome::Drawn(_)));
        assert_eq!(rig.writes().len(), 8);

        // Further steps clamp to the same screen.
        let far = View { scroll: 5, ..text };
        assert_eq!(rig.frame(far, None).unwrap(), FrameOutcome::Skipped);
        let back = View { scroll: 4, ..text };
        assert_eq!(rig.frame(back, None).unwrap(), FrameOutcome::Skipped);
        assert!(rig.driver.interface().frames.is_empty());

        // Back to the top redraws without a clear.
        assert!(matches!(rig.frame(text, None).unwrap(), FrameOutcome::Drawn(_)));
        assert_eq!(rig.writes().len(), 8);
    }

    #[test]
    fn ignored_view_fields_do_not_redraw() {
        let mut rig = Rig::new();
        let card = view(ScreenMode::TweetCard);
        rig.frame(card, None).unwrap();

        let fiddled = View {
            page: CarouselPage::Network,
            scroll: 3,
            variant: 2,
            ..card
        };
        assert_eq!(rig.frame(fiddled, None).unwrap(), FrameOutcome::Skipped);
    }

    #[test]
    fn overlong_word_drops_one_row_not_the_frame() {
        let mut rig = Rig::new();
        let addr = "fe80:0000:0000:0000:0211:22ff:fe33:4455";
        rig.session.set_text_block("net", &alloc::format!("eth0: {}", addr));
        let outcome = rig.frame(view(ScreenMode::TextBlock), None).unwrap();
        assert_eq!(
            outcome,
            FrameOutcome::Drawn(RenderReport {
                pages_written: 1,
                pages_dropped: 1
            })
        );
    }

    #[test]
    fn content_error_skips_the_frame_and_retries() {
        let mut rig = Rig::new();
        rig.session.set_text_block("t", "5€");
        let text = view(ScreenMode::TextBlock);

        let err = rig.frame(text, None).unwrap_err();
        assert!(!err.is_fatal());
        // Still dirty: the next frame tries again rather than skipping.
        assert!(rig.frame(text, None).is_err());
    }

    #[test]
    fn bus_error_is_fatal() {
        let mut rig = Rig::new();
        rig.driver.interface_mut().fail_from = Some(0);
        let err = rig.frame(View::default(), None).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn boot_frame_uses_the_session_message() {
        let mut rig = Rig::new();
        rig.session.set_boot_message("rm -rf /");
        block_on(rig.session.boot_frame(&mut rig.driver, &mut rig.rng)).unwrap();
        assert_eq!(rig.writes().len(), 8);
        assert_eq!(rig.session.boot_message(), "rm -rf /");
    }
}
