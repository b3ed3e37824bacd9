//! Controller command bytes and the bring-up sequence.
//!
//! All commands are sent through the interface's command channel, each
//! as its own framed write.

// ---------------------------------------------------------------------------
// Fundamental commands
// ---------------------------------------------------------------------------

pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;
pub const SET_CONTRAST: u8 = 0x81;
pub const NORMAL_DISPLAY: u8 = 0xA6;

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Lower column nibble. The panel's RAM is 132 columns wide starting at 2.
pub const COLUMN_LOW: u8 = 0x02;
pub const COLUMN_HIGH: u8 = 0x10;
pub const SET_START_LINE: u8 = 0x40;

/// Page register of band 0.
pub const PAGE_FIRST: u8 = 0xB0;
/// Page register of band 7.
pub const PAGE_LAST: u8 = 0xB7;

// ---------------------------------------------------------------------------
// Hardware configuration
// ---------------------------------------------------------------------------

pub const CHARGE_PUMP: u8 = 0xAD;
pub const CHARGE_PUMP_ON: u8 = 0x8B;
pub const SEGMENT_REMAP: u8 = 0xA0;
pub const COM_SCAN_DEC: u8 = 0xC8;
pub const SET_MULTIPLEX: u8 = 0xA8;
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_CLOCK_DIV: u8 = 0xD5;
pub const SET_PRECHARGE: u8 = 0xD9;
pub const SET_COM_PINS: u8 = 0xDA;
pub const SET_VCOMH: u8 = 0xDB;

/// Number of writes in [`init_sequence()`].
pub const INIT_SEQUENCE_LEN: usize = 14;

/// One command-channel write: a register byte and up to two data bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    bytes: [u8; 3],
    len: u8,
}

impl Command {
    pub const fn new(register: u8) -> Self {
        Self {
            bytes: [register, 0, 0],
            len: 1,
        }
    }

    pub const fn with_data(register: u8, data: u8) -> Self {
        Self {
            bytes: [register, data, 0],
            len: 2,
        }
    }

    /// Select a page band and reset the column pointer to its start.
    pub const fn select_page(register: u8) -> Self {
        Self {
            bytes: [register, COLUMN_LOW, COLUMN_HIGH],
            len: 3,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

/// Writes taking a freshly reset panel to displaying, in order.
///
/// ```
/// use oledhat_display_rs::commands::{init_sequence, DISPLAY_OFF, DISPLAY_ON};
///
/// let seq = init_sequence(0xFF);
/// assert_eq!(seq[0].as_bytes(), [DISPLAY_OFF]);
/// assert_eq!(seq[13].as_bytes(), [DISPLAY_ON]);
/// ```
pub fn init_sequence(contrast: u8) -> [Command; INIT_SEQUENCE_LEN] {
    [
        Command::new(DISPLAY_OFF),
        Command::with_data(COLUMN_LOW, COLUMN_HIGH),
        Command::with_data(SET_START_LINE, 0x00),
        Command::with_data(CHARGE_PUMP, CHARGE_PUMP_ON),
        Command::with_data(SET_CONTRAST, contrast),
        Command::with_data(SEGMENT_REMAP, COM_SCAN_DEC),
        Command::new(NORMAL_DISPLAY),
        Command::with_data(SET_MULTIPLEX, 0x3F),
        Command::with_data(SET_DISPLAY_OFFSET, 0x00),
        Command::with_data(SET_CLOCK_DIV, 0x80),
        Command::with_data(SET_PRECHARGE, 0xFF),
        Command::with_data(SET_COM_PINS, 0x12),
        Command::with_data(SET_VCOMH, 0x40),
        Command::new(DISPLAY_ON),
    ]
}
