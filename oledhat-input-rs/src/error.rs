//! Error types for the input driver.

use core::fmt;

/// Errors that can occur when reading the HAT's input lines.
#[derive(Debug)]
pub enum InputError<E> {
    /// Underlying GPIO read error.
    Pin(E),
}

// Allow ergonomic `?` propagation from raw pin errors.
impl<E> From<E> for InputError<E> {
    fn from(error: E) -> Self {
        InputError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for InputError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::Pin(e) => write!(f, "GPIO error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for InputError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            InputError::Pin(e) => defmt::write!(f, "GPIO error: {}", e),
        }
    }
}
