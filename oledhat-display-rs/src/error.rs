//! Error types for the OLED display driver and text pipeline.

use core::fmt;

use display_interface::DisplayError;

use crate::driver::PowerState;

/// Failures of the text pipeline (normalize → encode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextError {
    /// The character has no entry in the glyph table.
    UnknownGlyph(char),
    /// Input bytes were not valid UTF-8.
    Encoding {
        /// Length of the longest valid prefix.
        valid_up_to: usize,
    },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TextError::UnknownGlyph(c) => write!(f, "no glyph for {:?} (U+{:04X})", c, *c as u32),
            TextError::Encoding { valid_up_to } => {
                write!(f, "invalid UTF-8 after byte {}", valid_up_to)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TextError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TextError::UnknownGlyph(c) => defmt::write!(f, "No glyph for {}", c),
            TextError::Encoding { valid_up_to } => {
                defmt::write!(f, "Invalid UTF-8 after byte {}", valid_up_to)
            }
        }
    }
}

/// Errors that can occur during OLED display operations.
///
/// Bus and control-line failures arrive as [`DisplayError`]: the I2C
/// interface maps bus errors to `BusWriteError`, and the reset / chip
/// select / data-command lines to `RSError`, `CSError` and `DCError`.
#[derive(Debug)]
pub enum OledError {
    /// Display interface error (wraps I2C and control-line failures).
    Display(DisplayError),
    /// Text could not be turned into column bytes.
    Text(TextError),
    /// A data write longer than one page.
    PageOverflow { len: usize, max: usize },
    /// A page register outside `0xB0..=0xB7`.
    InvalidPage(u8),
    /// An operation was attempted before [`OledDriver::init()`](crate::OledDriver::init)
    /// succeeded.
    NotInitialized,
    /// [`OledDriver::init()`](crate::OledDriver::init) called in a state
    /// other than `Uninitialized`.
    InvalidState(PowerState),
}

impl OledError {
    /// Whether the session should end.
    ///
    /// Bus failures and state-machine misuse are fatal. Content errors
    /// only spoil the current frame.
    pub fn is_fatal(&self) -> bool {
        match self {
            OledError::Display(_) | OledError::NotInitialized | OledError::InvalidState(_) => true,
            OledError::Text(_) | OledError::PageOverflow { .. } | OledError::InvalidPage(_) => {
                false
            }
        }
    }
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Display(e)
    }
}

impl From<TextError> for OledError {
    fn from(e: TextError) -> Self {
        OledError::Text(e)
    }
}

impl fmt::Display for OledError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::Display(e) => write!(f, "display interface error: {:?}", e),
            OledError::Text(e) => write!(f, "{}", e),
            OledError::PageOverflow { len, max } => {
                write!(f, "page data of {} bytes exceeds width {}", len, max)
            }
            OledError::InvalidPage(reg) => write!(f, "invalid page register 0x{:02X}", reg),
            OledError::NotInitialized => write!(f, "not initialized"),
            OledError::InvalidState(state) => write!(f, "invalid power state {:?}", state),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Display(_e) => defmt::write!(f, "Display interface error"),
            OledError::Text(e) => defmt::write!(f, "{}", e),
            OledError::PageOverflow { len, max } => {
                defmt::write!(f, "Page overflow: {} > {}", len, max)
            }
            OledError::InvalidPage(reg) => defmt::write!(f, "Invalid page register {=u8:#x}", *reg),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
            OledError::InvalidState(state) => defmt::write!(f, "Invalid state {}", state),
        }
    }
}
