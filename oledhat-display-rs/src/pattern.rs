//! Dithered random fill for placeholder and boot screens.

use alloc::vec;
use alloc::vec::Vec;

use rand::RngCore;

/// How much of a random page survives masking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Density {
    /// Raw random bytes, like TV static.
    Blank,
    /// Even columns `& 0xAA`, odd columns off.
    #[default]
    Sparse,
    /// Every fourth column `& 0x88`, the rest off.
    Medium,
    /// Everything off.
    Dense,
}

impl Density {
    /// Level 0–3 as selected on the dots screen. Anything else is
    /// [`Density::Sparse`].
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Density::Blank,
            1 => Density::Sparse,
            2 => Density::Medium,
            3 => Density::Dense,
            _ => Density::Sparse,
        }
    }

    /// Mask `bytes` in place; `bytes[0]` is treated as column 0.
    pub fn apply(self, bytes: &mut [u8]) {
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = match self {
                Density::Blank => *b,
                Density::Sparse if i % 2 == 0 => *b & 0xAA,
                Density::Medium if i % 4 == 0 => *b & 0x88,
                Density::Sparse | Density::Medium | Density::Dense => 0,
            };
        }
    }
}

/// A `width`-byte page of random columns masked to `density`.
pub fn generate_pattern<R: RngCore>(rng: &mut R, density: Density, width: usize) -> Vec<u8> {
    let mut page = vec![0u8; width];
    if density != Density::Dense {
        rng.fill_bytes(&mut page);
    }
    density.apply(&mut page);
    page
}
