//! System stats snapshot and the slot it is published through.
//!
//! Sampling itself happens outside this crate. Whatever produces the
//! numbers builds a [`StatsSnapshot`] and hands it to
//! [`StatsSlot::publish()`]; the render loop calls
//! [`StatsSlot::latest()`] once per frame.

use core::cell::RefCell;
use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::{String, Vec};

use super::format::format_bytes;
use super::mode::CarouselPage;

/// Maximum number of CPU cores reported.
pub const MAX_CORES: usize = 8;

/// Maximum number of network interfaces reported.
pub const MAX_INTERFACES: usize = 8;

/// Capacity of a rendered carousel body. Longer bodies are cut at the
/// capacity; the display shows far fewer rows than this anyway.
pub const PAGE_TEXT_CAPACITY: usize = 640;

/// Text body of one carousel page, lines separated by `\n`.
pub type PageText = String<PAGE_TEXT_CAPACITY>;

/// Host identity and uptime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostInfo {
    pub hostname: String<32>,
    pub uptime_secs: u64,
}

/// Virtual memory usage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryInfo {
    pub total: u64,
    pub free: u64,
    pub used_percent: f32,
}

/// First address of a network interface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetInterface {
    pub name: String<16>,
    /// Address in CIDR notation. Empty when the interface has none.
    pub addr: String<48>,
}

/// One complete sample of the host's vital signs.
///
/// Immutable once published: the sampler builds a new value each tick
/// rather than editing the one in the slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    /// Per-core utilisation in percent.
    pub cpu_percent: Vec<f32, MAX_CORES>,
    pub host: HostInfo,
    pub memory: MemoryInfo,
    pub interfaces: Vec<NetInterface, MAX_INTERFACES>,
}

impl CarouselPage {
    /// Render the body text for this page.
    ///
    /// An absent snapshot renders as an empty body rather than an error, so
    /// the carousel can be shown before the first sample arrives.
    ///
    /// ```
    /// use oledhat::shared_state::{CarouselPage, StatsSnapshot};
    ///
    /// let mut snapshot = StatsSnapshot::default();
    /// snapshot.cpu_percent.push(12.5).unwrap();
    ///
    /// assert_eq!(CarouselPage::Cpu.body(Some(&snapshot)).as_str(), "core 0: 12.50");
    /// assert_eq!(CarouselPage::Cpu.body(None).as_str(), "");
    /// ```
    pub fn body(self, snapshot: Option<&StatsSnapshot>) -> PageText {
        let mut text = PageText::new();
        let Some(stats) = snapshot else {
            return text;
        };

        // Writes past PAGE_TEXT_CAPACITY are dropped.
        let mut lines = Lines::new(&mut text);
        match self {
            CarouselPage::Cpu => {
                for (core, percent) in stats.cpu_percent.iter().enumerate() {
                    lines.line(format_args!("core {}: {:.2}", core, percent));
                }
            }
            CarouselPage::Host => {
                lines.line(format_args!("hostname: {}", stats.host.hostname));
                lines.line(format_args!("uptime: {}", stats.host.uptime_secs));
            }
            CarouselPage::Memory => {
                lines.line(format_args!("Total: {}", format_bytes(stats.memory.total)));
                lines.line(format_args!("Free: {}", format_bytes(stats.memory.free)));
                lines.line(format_args!("Used: {:.2}%", stats.memory.used_percent));
            }
            CarouselPage::Network => {
                for iface in stats.interfaces.iter().filter(|i| !i.addr.is_empty()) {
                    lines.line(format_args!("{}: {}", iface.name, iface.addr));
                }
            }
        }
        text
    }
}

/// Joins formatted lines with `\n`.
struct Lines<'a> {
    out: &'a mut PageText,
    first: bool,
}

impl<'a> Lines<'a> {
    fn new(out: &'a mut PageText) -> Self {
        Self { out, first: true }
    }

    fn line(&mut self, args: core::fmt::Arguments<'_>) {
        if !self.first {
            let _ = self.out.push('\n');
        }
        self.first = false;
        let _ = self.out.write_fmt(args);
    }
}

// ── StatsSlot ────────────────────────────────────────────────────────────

/// Latest-value slot for [`StatsSnapshot`]s.
///
/// Backed by a critical-section mutex that is only ever held for the
/// duration of a clone, so neither side can stall the other.
///
/// ```
/// use oledhat::shared_state::{StatsSlot, StatsSnapshot};
///
/// static STATS: StatsSlot = StatsSlot::new();
///
/// assert!(STATS.latest().is_none());
/// STATS.publish(StatsSnapshot::default());
/// assert!(STATS.is_available());
/// ```
pub struct StatsSlot {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Option<StatsSnapshot>>>,
}

impl Default for StatsSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsSlot {
    /// An empty slot: [`latest()`](Self::latest) returns `None` until the
    /// first [`publish()`](Self::publish).
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Replace the stored snapshot.
    pub fn publish(&self, snapshot: StatsSnapshot) {
        #[cfg(feature = "defmt")]
        let first = !self.is_available();

        self.inner.lock(|cell| {
            cell.replace(Some(snapshot));
        });

        #[cfg(feature = "defmt")]
        if first {
            defmt::info!("first stats snapshot published");
        }
    }

    /// Copy of the most recent snapshot, or `None` before the first sample.
    pub fn latest(&self) -> Option<StatsSnapshot> {
        self.inner.lock(|cell| cell.borrow().clone())
    }

    /// Whether at least one snapshot has been published.
    pub fn is_available(&self) -> bool {
        self.inner.lock(|cell| cell.borrow().is_some())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
