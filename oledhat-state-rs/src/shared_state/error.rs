/// Errors that can occur when addressing screens or carousel pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectionError {
    /// Mode index is out of bounds (must be < N_MODES).
    InvalidModeIndex,
    /// Carousel page index is out of bounds (must be < N_CAROUSEL_PAGES).
    InvalidPageIndex,
}

impl core::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SelectionError::InvalidModeIndex => write!(f, "screen mode index out of range"),
            SelectionError::InvalidPageIndex => write!(f, "carousel page index out of range"),
        }
    }
}
