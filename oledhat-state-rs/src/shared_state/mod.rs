//! Screen selection and system stats shared between the HAT's tasks.
//!
//! # Architecture
//!
//! Three independent loops touch this state:
//!
//! ```text
//! input poller (200 ms) ──► Selection  ──┐
//!                                        ├──► render loop (15 Hz)
//! stats sampler (1 s)   ──► StatsSlot  ──┘
//! ```
//!
//! - [`Selection`] is the small index/mode variable the poller mutates. It
//!   is backed by atomics so the render loop can take a [`View`] of it at
//!   the start of every frame without locking.
//! - [`StatsSlot`] holds the most recent [`StatsSnapshot`]. The sampler
//!   replaces it wholesale; the render loop copies it out and never waits
//!   for a fresh one. Before the first sample the slot is empty and the
//!   stats screens render with an empty body.
//!
//! # Screens
//!
//! The display cycles through the [`ScreenMode`]s in [`MODES`] order. The
//! stats carousel additionally has [`N_CAROUSEL_PAGES`] pages selected
//! with the joystick:
//!
//! ```text
//! Page 0: cpu     core 0: 12.50 / core 1: 3.00 / ...
//! Page 1: host    hostname: ... / uptime: ...
//! Page 2: memory  Total: ... / Free: ... / Used: ...%
//! Page 3: net     eth0: 192.168.1.2/24 / ...
//! ```
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. Strings and lists are `heapless` containers sized
//! by the constants in [`stats`].

mod error;
mod format;
mod mode;
mod selection;
pub mod stats;

pub use error::SelectionError;
pub use format::{format_bytes, ByteString};
pub use mode::{CarouselPage, ScreenMode};
pub use selection::{Navigation, Selection, View};
pub use stats::{HostInfo, MemoryInfo, NetInterface, PageText, StatsSlot, StatsSnapshot};

/// Number of selectable screen modes.
pub const N_MODES: usize = 7;

/// Number of pages in the stats carousel.
pub const N_CAROUSEL_PAGES: usize = 4;

/// Screen modes in the order the mode buttons step through them.
///
/// The first entry is the screen shown once the boot animation finishes.
pub const MODES: [ScreenMode; N_MODES] = [
    ScreenMode::StatsCarousel,
    ScreenMode::TextBlock,
    ScreenMode::TweetCard,
    ScreenMode::FontDump,
    ScreenMode::RandomGlyphAnimation,
    ScreenMode::DotPattern,
    ScreenMode::BootAnimation,
];

/// Carousel pages in joystick order.
pub const CAROUSEL_PAGES: [CarouselPage; N_CAROUSEL_PAGES] = [
    CarouselPage::Cpu,
    CarouselPage::Host,
    CarouselPage::Memory,
    CarouselPage::Network,
];

/// Titles rendered on the first row-band of each carousel page, indexed
/// like [`CAROUSEL_PAGES`].
pub const CAROUSEL_TITLES: [&str; N_CAROUSEL_PAGES] = ["cpu", "host", "memory", "net"];
