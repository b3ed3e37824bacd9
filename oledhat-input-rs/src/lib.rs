//! Driver for the OLED HAT's three push buttons and five-way joystick.
//!
//! [`HatInputs`] reads the eight active-low lines through
//! `embedded-hal` [`InputPin`](embedded_hal::digital::InputPin)s and
//! feeds decoded [`Navigation`](oledhat::shared_state::Navigation)
//! intents into the shared [`Selection`](oledhat::shared_state::Selection).
//!
//! # Features
//!
//! - **`defmt`**: [`defmt::Format`] on the public types and log output.
//! - **`task`**: [`input_poll_task`], the periodic poller (pulls in
//!   `embassy-time`).

#![cfg_attr(not(test), no_std)]

pub use error::InputError;
pub use hat_inputs::{HatInputs, InputState};
pub use lines::{InputLine, PollConfig, INPUT_COUNT};
#[cfg(feature = "task")]
pub use poll_task::input_poll_task;

mod error;
mod hat_inputs;
pub mod lines;
#[cfg(feature = "task")]
mod poll_task;
