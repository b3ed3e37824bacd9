//! I2C transport for the controller.
//!
//! Every write is a single I2C transaction: one control byte saying
//! whether the rest is commands (`0x00`) or display data (`0x40`), then
//! the payload. The generic `display-interface-i2c` adapter splits data
//! into 16-byte chunks, each with its own control byte; this one keeps a
//! whole page in one frame.

use display_interface::{AsyncWriteOnlyDataCommand, DataFormat, DisplayError};
use embedded_hal_async::i2c::I2c;
use heapless::Vec;

use crate::layout::MAX_PAGE_WIDTH;

/// Default 7-bit address of the HAT's controller.
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte for a command write.
pub const CONTROL_COMMAND: u8 = 0x00;
/// Control byte for a display data write.
pub const CONTROL_DATA: u8 = 0x40;

/// Largest frame: control byte plus one full page.
const MAX_FRAME: usize = 1 + MAX_PAGE_WIDTH;

/// [`AsyncWriteOnlyDataCommand`] over an async I2C bus.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access)
    /// * `address`: 7-bit device address (typically [`DEFAULT_ADDRESS`])
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    async fn write_framed(&mut self, control: u8, payload: DataFormat<'_>) -> Result<(), DisplayError> {
        let DataFormat::U8(bytes) = payload else {
            return Err(DisplayError::DataFormatNotImplemented);
        };

        let mut frame: Vec<u8, MAX_FRAME> = Vec::new();
        frame
            .push(control)
            .map_err(|_| DisplayError::OutOfBoundsError)?;
        frame
            .extend_from_slice(bytes)
            .map_err(|_| DisplayError::OutOfBoundsError)?;

        self.i2c
            .write(self.address, &frame)
            .await
            .map_err(|_| DisplayError::BusWriteError)
    }
}

impl<I2C> AsyncWriteOnlyDataCommand for I2cInterface<I2C>
where
    I2C: I2c,
{
    async fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
        self.write_framed(CONTROL_COMMAND, cmd).await
    }

    async fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        self.write_framed(CONTROL_DATA, buf).await
    }
}
