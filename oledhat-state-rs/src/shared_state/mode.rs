use super::error::SelectionError;
use super::{CAROUSEL_PAGES, CAROUSEL_TITLES, MODES, N_CAROUSEL_PAGES, N_MODES};

/// One of the screens the render loop can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenMode {
    /// Titled system stats, one [`CarouselPage`] at a time.
    #[default]
    StatsCarousel,
    /// Title, divider rule and a paginated body.
    TextBlock,
    /// Centred `name(handle)` header, divider and a paginated body.
    TweetCard,
    /// Every glyph of the font in codepoint order.
    FontDump,
    /// Bands of random glyphs, redrawn every frame.
    RandomGlyphAnimation,
    /// Dithered dots at the selected density, redrawn every frame.
    DotPattern,
    /// Static-like background with a centred message.
    BootAnimation,
}

impl ScreenMode {
    /// Position of this mode in [`MODES`].
    pub fn index(self) -> usize {
        match self {
            ScreenMode::StatsCarousel => 0,
            ScreenMode::TextBlock => 1,
            ScreenMode::TweetCard => 2,
            ScreenMode::FontDump => 3,
            ScreenMode::RandomGlyphAnimation => 4,
            ScreenMode::DotPattern => 5,
            ScreenMode::BootAnimation => 6,
        }
    }

    /// Look up a mode by its position in [`MODES`].
    pub fn from_index(index: usize) -> Result<Self, SelectionError> {
        MODES
            .get(index)
            .copied()
            .ok_or(SelectionError::InvalidModeIndex)
    }

    /// The mode after this one, wrapping at the end of [`MODES`].
    pub fn next(self) -> Self {
        MODES[(self.index() + 1) % N_MODES]
    }

    /// The mode before this one, wrapping at the start of [`MODES`].
    pub fn previous(self) -> Self {
        MODES[(self.index() + N_MODES - 1) % N_MODES]
    }

    /// Animated screens redraw on every tick; the others only when
    /// something they show has changed.
    pub fn is_animated(self) -> bool {
        matches!(
            self,
            ScreenMode::RandomGlyphAnimation | ScreenMode::DotPattern | ScreenMode::BootAnimation
        )
    }
}

/// A page of the stats carousel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CarouselPage {
    #[default]
    Cpu,
    Host,
    Memory,
    Network,
}

impl CarouselPage {
    /// Position of this page in [`CAROUSEL_PAGES`].
    pub fn index(self) -> usize {
        match self {
            CarouselPage::Cpu => 0,
            CarouselPage::Host => 1,
            CarouselPage::Memory => 2,
            CarouselPage::Network => 3,
        }
    }

    /// Look up a page by its position in [`CAROUSEL_PAGES`].
    pub fn from_index(index: usize) -> Result<Self, SelectionError> {
        CAROUSEL_PAGES
            .get(index)
            .copied()
            .ok_or(SelectionError::InvalidPageIndex)
    }

    pub fn next(self) -> Self {
        CAROUSEL_PAGES[(self.index() + 1) % N_CAROUSEL_PAGES]
    }

    pub fn previous(self) -> Self {
        CAROUSEL_PAGES[(self.index() + N_CAROUSEL_PAGES - 1) % N_CAROUSEL_PAGES]
    }

    /// Title shown above the page body.
    pub fn title(self) -> &'static str {
        CAROUSEL_TITLES[self.index()]
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
