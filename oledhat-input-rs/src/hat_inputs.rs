//! Button and joystick reader for the OLED HAT.
//!
//! [`HatInputs`] owns the eight GPIO inputs and turns their levels into
//! [`Navigation`] intents for the shared [`Selection`].

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use oledhat::shared_state::{Navigation, Selection};

use crate::error::InputError;
use crate::lines::{InputLine, PollConfig, INPUT_COUNT};

/// Levels of all eight lines sampled in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputState {
    /// `true` where the line reads LOW (pressed), indexed by [`InputLine::index()`].
    pub pressed: [bool; INPUT_COUNT],
}

impl InputState {
    pub fn is_pressed(&self, line: InputLine) -> bool {
        self.pressed[line.index()]
    }

    /// Decode the sample into at most one intent.
    ///
    /// When several controls are held at once the buttons win over the
    /// joystick; left/right win over up/down, and press comes last.
    pub fn navigation(&self) -> Option<Navigation> {
        const PRIORITY: [(InputLine, Navigation); INPUT_COUNT] = [
            (InputLine::Button1, Navigation::NextMode),
            (InputLine::Button2, Navigation::PreviousMode),
            (InputLine::Button3, Navigation::ResetView),
            (InputLine::JoyLeft, Navigation::PreviousPage),
            (InputLine::JoyRight, Navigation::NextPage),
            (InputLine::JoyUp, Navigation::ScrollUp),
            (InputLine::JoyDown, Navigation::ScrollDown),
            (InputLine::JoyPress, Navigation::CycleVariant),
        ];

        PRIORITY
            .iter()
            .find(|(line, _)| self.is_pressed(*line))
            .map(|&(_, navigation)| navigation)
    }
}

/// The HAT's three push buttons and five-way joystick.
///
/// Pins must be configured as inputs with pull-ups before they are handed
/// over; a pressed control pulls its line to ground.
///
/// # Example
///
/// ```ignore
/// use hat_input::HatInputs;
/// use oledhat::shared_state::Selection;
///
/// static SELECTION: Selection = Selection::new();
///
/// // Pins in `InputLine::ALL` order.
/// let mut inputs = HatInputs::new([b1, b2, b3, up, down, left, right, press]);
/// inputs.poll_once(&SELECTION)?;
/// ```
pub struct HatInputs<P> {
    pins: [P; INPUT_COUNT],
}

impl<P> HatInputs<P>
where
    P: InputPin,
{
    /// Take ownership of the pins, ordered as [`InputLine::ALL`].
    pub fn new(pins: [P; INPUT_COUNT]) -> Self {
        Self { pins }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Whether `line` is currently pressed.
    ///
    /// # Errors
    /// [`InputError::Pin`] if the GPIO read fails.
    pub fn read(&mut self, line: InputLine) -> Result<bool, InputError<P::Error>> {
        Ok(self.pins[line.index()].is_low()?)
    }

    /// Sample every line.
    ///
    /// Returns the first pin error encountered; no partial sample is
    /// returned.
    pub fn read_all(&mut self) -> Result<InputState, InputError<P::Error>> {
        let mut state = InputState::default();
        for line in InputLine::ALL {
            state.pressed[line.index()] = self.read(line)?;
        }
        Ok(state)
    }

    /// Sleep until `line` reads pressed, then hold off for the debounce
    /// period.
    ///
    /// Returns immediately (after the debounce) if the line is already
    /// pressed on entry.
    pub async fn wait_for_press<D: DelayNs>(
        &mut self,
        line: InputLine,
        delay: &mut D,
        config: &PollConfig,
    ) -> Result<(), InputError<P::Error>> {
        while !self.read(line)? {
            delay.delay_ms(config.wait_step_ms).await;
        }
        delay.delay_ms(config.debounce_ms).await;
        Ok(())
    }

    /// Sample the lines once and apply the decoded intent to `selection`.
    ///
    /// Level-triggered: a control held across several polls repeats its
    /// intent once per poll. Returns the applied intent, if any.
    pub fn poll_once(
        &mut self,
        selection: &Selection,
    ) -> Result<Option<Navigation>, InputError<P::Error>> {
        let navigation = self.read_all()?.navigation();
        if let Some(navigation) = navigation {
            selection.apply(navigation);
        }
        Ok(navigation)
    }

    /// Give the pins back.
    pub fn release(self) -> [P; INPUT_COUNT] {
        self.pins
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
