//! Async page-mode renderer for the OLED HAT's 132×64 SSD1306-family panel.
//!
//! The panel is driven one 8-pixel page at a time: select a page register,
//! then write up to 132 column bytes. Text is set in a fixed 4×8 bitmap
//! font and word-wrapped into such pages.
//!
//! This crate provides
//!
//! - [`I2cInterface`], the two-wire transport with one control byte per
//!   transaction,
//! - [`OledDriver`], the power-up sequence and page writes,
//! - [`ScreenRenderer`], the screens built on top (titled text, tweet
//!   card, font dump, patterns, boot animation),
//! - [`DisplaySession`], which picks the screen for the current
//!   [`View`](oledhat::shared_state::View) and skips frames that would not
//!   change anything,
//! - [`display_update_task`], the periodic update loop.
//!
//! # Quick Start
//!
//! ```ignore
//! use oledhat_display_rs::{
//!     display_update_task, ControlPins, DisplayConfig, DisplaySession, I2cInterface,
//!     OledDriver, DEFAULT_ADDRESS, FONT_4X8,
//! };
//!
//! let config = DisplayConfig::default();
//! let driver = OledDriver::new(I2cInterface::new(i2c, DEFAULT_ADDRESS), config);
//! let pins = ControlPins::new(reset, dc, cs);
//! let session = DisplaySession::new(&FONT_4X8, &config);
//! spawner.spawn(oled_task(driver, pins, session)).unwrap();
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`].
//! - **`task`**: [`display_update_task`], timed with `embassy-time`.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod commands;
#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod font;
pub mod interface;
pub mod layout;
pub mod pattern;
pub mod screens;
pub mod session;
pub mod text;

#[cfg(test)]
mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

#[cfg(feature = "task")]
pub use display_task::display_update_task;
pub use driver::{ControlPins, OledDriver, PowerState, ResetTiming};
pub use error::{OledError, TextError};
pub use font::FONT_4X8;
pub use interface::{I2cInterface, DEFAULT_ADDRESS};
pub use layout::{AddressingScheme, Alignment, DisplayConfig, RenderOptions, RenderReport};
pub use pattern::Density;
pub use screens::ScreenRenderer;
pub use session::{DisplaySession, FrameOutcome};
