use portable_atomic::{AtomicU8, Ordering};

use super::error::SelectionError;
use super::mode::{CarouselPage, ScreenMode};

/// A single user intent decoded from the buttons or joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Navigation {
    NextMode,
    PreviousMode,
    /// Scroll back to the first body page.
    ResetView,
    PreviousPage,
    NextPage,
    ScrollUp,
    ScrollDown,
    /// Step the mode-specific variant (the dot density, for instance).
    CycleVariant,
}

/// Plain copy of a [`Selection`] taken at the start of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct View {
    pub mode: ScreenMode,
    pub page: CarouselPage,
    /// Number of leading body pages skipped.
    pub scroll: u8,
    pub variant: u8,
}

/// The index/mode variable shared by the input poller and the render loop.
///
/// Each field lives in its own atomic. The poller is the only writer of
/// mode, page and variant, so its read-modify-write sequences need no
/// compare-and-swap. The render loop reads through
/// [`snapshot()`](Self::snapshot) and only ever lowers the scroll offset,
/// through [`clamp_scroll()`](Self::clamp_scroll).
///
/// `const`-constructible so it can live in a `static`:
///
/// ```
/// use oledhat::shared_state::{Navigation, ScreenMode, Selection};
///
/// static SELECTION: Selection = Selection::new();
///
/// SELECTION.apply(Navigation::NextMode);
/// assert_eq!(SELECTION.snapshot().mode, ScreenMode::TextBlock);
/// ```
pub struct Selection {
    mode: AtomicU8,
    page: AtomicU8,
    scroll: AtomicU8,
    variant: AtomicU8,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    /// Start on the first carousel page of the stats screen.
    pub const fn new() -> Self {
        Self {
            mode: AtomicU8::new(0),
            page: AtomicU8::new(0),
            scroll: AtomicU8::new(0),
            variant: AtomicU8::new(0),
        }
    }

    /// Read all fields.
    ///
    /// Out-of-range stored indices cannot occur because every writer goes
    /// through the validating setters; they decode to the defaults anyway.
    pub fn snapshot(&self) -> View {
        View {
            mode: ScreenMode::from_index(self.mode.load(Ordering::Acquire) as usize)
                .unwrap_or_default(),
            page: CarouselPage::from_index(self.page.load(Ordering::Acquire) as usize)
                .unwrap_or_default(),
            scroll: self.scroll.load(Ordering::Acquire),
            variant: self.variant.load(Ordering::Acquire),
        }
    }

    /// Apply one decoded input.
    ///
    /// Changing mode or carousel page resets the scroll position. Scrolling
    /// saturates at both ends; the renderer clamps to the actual page count.
    pub fn apply(&self, navigation: Navigation) {
        let view = self.snapshot();
        match navigation {
            Navigation::NextMode => self.set_mode(view.mode.next()),
            Navigation::PreviousMode => self.set_mode(view.mode.previous()),
            Navigation::ResetView => self.scroll.store(0, Ordering::Release),
            Navigation::PreviousPage => self.set_carousel_page(view.page.previous()),
            Navigation::NextPage => self.set_carousel_page(view.page.next()),
            Navigation::ScrollUp => self
                .scroll
                .store(view.scroll.saturating_sub(1), Ordering::Release),
            Navigation::ScrollDown => self
                .scroll
                .store(view.scroll.saturating_add(1), Ordering::Release),
            Navigation::CycleVariant => self
                .variant
                .store(view.variant.wrapping_add(1), Ordering::Release),
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("selection: {} -> {}", navigation, self.snapshot());
    }

    /// Switch to `mode` and scroll back to the top.
    pub fn set_mode(&self, mode: ScreenMode) {
        self.scroll.store(0, Ordering::Release);
        self.mode.store(mode.index() as u8, Ordering::Release);
    }

    /// Switch the carousel to `page` and scroll back to the top.
    pub fn set_carousel_page(&self, page: CarouselPage) {
        self.scroll.store(0, Ordering::Release);
        self.page.store(page.index() as u8, Ordering::Release);
    }

    /// Lower the scroll offset to `max` if `view` is still the selected
    /// screen.
    ///
    /// Called by the render loop with the body length it just drew, so an
    /// offset scrolled past the end does not swallow the next scroll-up.
    pub fn clamp_scroll(&self, view: &View, max: u8) {
        let current = self.snapshot();
        if current.mode == view.mode && current.page == view.page {
            self.scroll.fetch_min(max, Ordering::AcqRel);
        }
    }

    /// Switch the carousel by index.
    ///
    /// Returns [`SelectionError::InvalidPageIndex`] if `index >= N_CAROUSEL_PAGES`.
    pub fn set_carousel_index(&self, index: usize) -> Result<(), SelectionError> {
        self.set_carousel_page(CarouselPage::from_index(index)?);
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
