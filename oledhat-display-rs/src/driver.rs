//! Controller driver: bring-up state machine and page addressing.
//!
//! [`OledDriver`] manages the controller lifecycle: construction without
//! bus traffic, explicit async bring-up, page-addressed writes and an
//! orderly power-off.

use alloc::vec;

use display_interface::{AsyncWriteOnlyDataCommand, DataFormat, DisplayError};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::commands::{init_sequence, Command, DISPLAY_OFF, PAGE_FIRST, PAGE_LAST};
use crate::error::OledError;
use crate::layout::{AddressingScheme, DisplayConfig};

/// Bring-up progress of the controller.
///
/// ```text
/// Uninitialized ─► Resetting ─► ConfigSequence ─► Ready ─► Off
///                      │              │
///                      └──────────────┴─► Failed
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    #[default]
    Uninitialized,
    /// Pulsing the reset line.
    Resetting,
    /// Sending the configuration commands.
    ConfigSequence,
    Ready,
    /// Bring-up hit an error. Terminal.
    Failed,
    /// Panel switched off by [`OledDriver::power_off()`].
    Off,
}

/// Hold times of the reset pulse, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTiming {
    /// Reset released (high) before the pulse. Default: 100.
    pub settle_ms: u32,
    /// Reset asserted (low). Default: 100.
    pub assert_ms: u32,
    /// Reset released again before the first command. Default: 100.
    pub release_ms: u32,
}

impl Default for ResetTiming {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            assert_ms: 100,
            release_ms: 100,
        }
    }
}

// ── Control lines ────────────────────────────────────────────────────────

/// Reset, data/command and chip-select lines of the HAT.
///
/// On I2C the controller ignores D/C and CS, but both are driven low so
/// the HAT's level shifters select I2C mode.
pub struct ControlPins<RST, DC, CS> {
    pub reset: RST,
    pub dc: DC,
    pub cs: CS,
}

impl<RST, DC, CS> ControlPins<RST, DC, CS>
where
    RST: OutputPin,
    DC: OutputPin,
    CS: OutputPin,
{
    pub fn new(reset: RST, dc: DC, cs: CS) -> Self {
        Self { reset, dc, cs }
    }

    /// Chip select low, then D/C low.
    pub fn select(&mut self) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::CSError)?;
        self.dc.set_low().map_err(|_| DisplayError::DCError)
    }

    /// High, low, high on the reset line with the configured holds.
    pub async fn reset_pulse<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timing: &ResetTiming,
    ) -> Result<(), DisplayError> {
        self.reset.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(timing.settle_ms).await;
        self.reset.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(timing.assert_ms).await;
        self.reset.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(timing.release_ms).await;
        Ok(())
    }
}

// ── Driver ───────────────────────────────────────────────────────────────

/// Async driver for the HAT's page-addressed controller.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`]: constructs the driver without any bus traffic.
/// 2. [`OledDriver::init()`]: reset pulse and configuration sequence.
/// 3. [`select_page()`](Self::select_page) + [`write_page_data()`](Self::write_page_data),
///    or [`clear()`](Self::clear).
/// 4. [`OledDriver::release()`]: panel off, interface handed back.
///
/// # Example
///
/// ```ignore
/// let mut oled = OledDriver::new(I2cInterface::new(i2c, DEFAULT_ADDRESS), DisplayConfig::default());
/// oled.init(&mut pins, &mut Delay).await?;
/// oled.clear().await?;
/// oled.write_page(0xB0, &bytes).await?;
/// ```
pub struct OledDriver<DI> {
    interface: DI,
    config: DisplayConfig,
    state: PowerState,
}

impl<DI> OledDriver<DI>
where
    DI: AsyncWriteOnlyDataCommand,
{
    /// Construct an uninitialised driver. No bus traffic is generated.
    pub fn new(interface: DI, config: DisplayConfig) -> Self {
        Self {
            interface,
            config,
            state: PowerState::Uninitialized,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == PowerState::Ready
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Bring the panel up from power-on.
    ///
    /// Selects the chip, pulses reset, then sends the configuration
    /// sequence one command frame at a time. There is no retry: any
    /// failure leaves the driver in [`PowerState::Failed`] for good.
    ///
    /// # Errors
    ///
    /// * [`OledError::InvalidState`] if called in any state but
    ///   `Uninitialized`.
    /// * [`OledError::Display`] on a bus or control-line failure.
    pub async fn init<RST, DC, CS, D>(
        &mut self,
        pins: &mut ControlPins<RST, DC, CS>,
        delay: &mut D,
    ) -> Result<(), OledError>
    where
        RST: OutputPin,
        DC: OutputPin,
        CS: OutputPin,
        D: DelayNs,
    {
        if self.state != PowerState::Uninitialized {
            return Err(OledError::InvalidState(self.state));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("OLED bring-up started");

        match self.bring_up(pins, delay).await {
            Ok(()) => {
                self.state = PowerState::Ready;
                #[cfg(feature = "defmt")]
                defmt::info!("OLED ready");
                Ok(())
            }
            Err(e) => {
                let e = OledError::from(e);
                #[cfg(feature = "defmt")]
                defmt::error!("OLED bring-up failed in {}: {}", self.state, e);
                self.state = PowerState::Failed;
                Err(e)
            }
        }
    }

    async fn bring_up<RST, DC, CS, D>(
        &mut self,
        pins: &mut ControlPins<RST, DC, CS>,
        delay: &mut D,
    ) -> Result<(), DisplayError>
    where
        RST: OutputPin,
        DC: OutputPin,
        CS: OutputPin,
        D: DelayNs,
    {
        self.state = PowerState::Resetting;
        pins.select()?;
        pins.reset_pulse(delay, &self.config.reset_timing).await?;

        self.state = PowerState::ConfigSequence;
        for command in init_sequence(self.config.contrast).iter() {
            self.send_command(command).await?;
        }
        Ok(())
    }

    async fn send_command(&mut self, command: &Command) -> Result<(), DisplayError> {
        self.interface
            .send_commands(DataFormat::U8(command.as_bytes()))
            .await
    }

    fn ensure_ready(&self) -> Result<(), OledError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(OledError::NotInitialized)
        }
    }

    // -----------------------------------------------------------------------
    // Page addressing
    // -----------------------------------------------------------------------

    /// Point subsequent data writes at the start of the page with
    /// register `register` (`0xB0..=0xB7`).
    ///
    /// # Errors
    /// * [`OledError::InvalidPage`] for a register outside the page range.
    /// * [`OledError::NotInitialized`] before bring-up completes.
    pub async fn select_page(&mut self, register: u8) -> Result<(), OledError> {
        self.ensure_ready()?;
        if !(PAGE_FIRST..=PAGE_LAST).contains(&register) {
            return Err(OledError::InvalidPage(register));
        }
        self.send_command(&Command::select_page(register)).await?;
        Ok(())
    }

    /// [`select_page()`](Self::select_page) by row and addressing scheme.
    pub async fn select_row(&mut self, row: usize, scheme: AddressingScheme) -> Result<(), OledError> {
        self.select_page(scheme.register(row)).await
    }

    /// Write column bytes from the current column onwards.
    ///
    /// Columns past the end of `bytes` keep whatever they showed before.
    ///
    /// # Errors
    /// [`OledError::PageOverflow`] if `bytes` is wider than a page; nothing
    /// is sent.
    pub async fn write_page_data(&mut self, bytes: &[u8]) -> Result<(), OledError> {
        self.ensure_ready()?;
        if bytes.len() > self.config.page_width {
            return Err(OledError::PageOverflow {
                len: bytes.len(),
                max: self.config.page_width,
            });
        }
        self.interface.send_data(DataFormat::U8(bytes)).await?;
        Ok(())
    }

    /// Select `register` and write `bytes` to it.
    pub async fn write_page(&mut self, register: u8, bytes: &[u8]) -> Result<(), OledError> {
        if bytes.len() > self.config.page_width {
            return Err(OledError::PageOverflow {
                len: bytes.len(),
                max: self.config.page_width,
            });
        }
        self.select_page(register).await?;
        self.write_page_data(bytes).await
    }

    /// Blank every page.
    pub async fn clear(&mut self) -> Result<(), OledError> {
        let zeros = vec![0u8; self.config.page_width];
        for page in 0..self.config.page_count {
            self.write_page(AddressingScheme::BottomOrigin.register(page), &zeros)
                .await?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Shutdown
    // -----------------------------------------------------------------------

    /// Switch the panel off.
    ///
    /// No traffic if the panel was never brought up or is already off.
    pub async fn power_off(&mut self) -> Result<(), OledError> {
        if matches!(self.state, PowerState::Uninitialized | PowerState::Off) {
            return Ok(());
        }
        self.send_command(&Command::new(DISPLAY_OFF)).await?;
        self.state = PowerState::Off;

        #[cfg(feature = "defmt")]
        defmt::info!("OLED off");
        Ok(())
    }

    /// Power the panel off and hand back the interface.
    ///
    /// A failure to send the off command is logged, not returned: the
    /// interface comes back either way.
    pub async fn release(mut self) -> DI {
        if let Err(_e) = self.power_off().await {
            #[cfg(feature = "defmt")]
            defmt::warn!("OLED power-off failed: {}", _e);
        }
        self.interface
    }
}

#[cfg(test)]
impl<DI> OledDriver<DI> {
    pub(crate) fn interface(&self) -> &DI {
        &self.interface
    }

    pub(crate) fn interface_mut(&mut self) -> &mut DI {
        &mut self.interface
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
