//! Input line identifiers and the HAT's default wiring.
//!
//! All eight lines are wired to ground through the switch and read with
//! the internal pull-up enabled, so a pressed control reads LOW.

// ---------------------------------------------------------------------------
// BCM pin numbers on the 40-pin header
// ---------------------------------------------------------------------------

/// Push button 1.
pub const BCM_BUTTON_1: u8 = 21;

/// Push button 2.
pub const BCM_BUTTON_2: u8 = 20;

/// Push button 3.
pub const BCM_BUTTON_3: u8 = 16;

/// Joystick up.
pub const BCM_JOY_UP: u8 = 6;

/// Joystick down.
pub const BCM_JOY_DOWN: u8 = 19;

/// Joystick left.
pub const BCM_JOY_LEFT: u8 = 5;

/// Joystick right.
pub const BCM_JOY_RIGHT: u8 = 26;

/// Joystick centre press.
pub const BCM_JOY_PRESS: u8 = 13;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Period of the background input poll.
pub const POLL_PERIOD_MS: u64 = 200;

/// Hold-off after a press is seen by [`wait_for_press`](crate::HatInputs::wait_for_press).
pub const DEBOUNCE_MS: u32 = 250;

/// Sleep between reads while waiting for a press.
pub const WAIT_STEP_MS: u32 = 10;

/// Number of input lines on the HAT.
pub const INPUT_COUNT: usize = 8;

/// One of the HAT's logical inputs.
///
/// The discriminant is the line's index in the pin array handed to
/// [`HatInputs::new()`](crate::HatInputs::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputLine {
    Button1 = 0,
    Button2 = 1,
    Button3 = 2,
    JoyUp = 3,
    JoyDown = 4,
    JoyLeft = 5,
    JoyRight = 6,
    JoyPress = 7,
}

impl InputLine {
    /// All lines in pin-array order.
    pub const ALL: [InputLine; INPUT_COUNT] = [
        InputLine::Button1,
        InputLine::Button2,
        InputLine::Button3,
        InputLine::JoyUp,
        InputLine::JoyDown,
        InputLine::JoyLeft,
        InputLine::JoyRight,
        InputLine::JoyPress,
    ];

    /// Index into the pin array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// BCM pin the line is wired to on the HAT.
    pub fn bcm_pin(self) -> u8 {
        match self {
            InputLine::Button1 => BCM_BUTTON_1,
            InputLine::Button2 => BCM_BUTTON_2,
            InputLine::Button3 => BCM_BUTTON_3,
            InputLine::JoyUp => BCM_JOY_UP,
            InputLine::JoyDown => BCM_JOY_DOWN,
            InputLine::JoyLeft => BCM_JOY_LEFT,
            InputLine::JoyRight => BCM_JOY_RIGHT,
            InputLine::JoyPress => BCM_JOY_PRESS,
        }
    }
}

/// Timing for the input poller and [`wait_for_press`](crate::HatInputs::wait_for_press).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Period of the background poll. Default: 200 ms.
    pub poll_period_ms: u64,
    /// Delay after a press is detected. Default: 250 ms.
    pub debounce_ms: u32,
    /// Delay between reads while waiting. Default: 10 ms.
    pub wait_step_ms: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_period_ms: POLL_PERIOD_MS,
            debounce_ms: DEBOUNCE_MS,
            wait_step_ms: WAIT_STEP_MS,
        }
    }
}
