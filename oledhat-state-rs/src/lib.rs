//! Shared state for the OLED HAT display.
//!
//! Everything in here is read by the render loop and written by one of the
//! background producers (the input poller or the stats sampler). See
//! [`shared_state`] for the details.

#![cfg_attr(not(test), no_std)]

pub mod shared_state;
