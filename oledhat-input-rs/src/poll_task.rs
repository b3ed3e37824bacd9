//! Background input poller.

use embassy_time::{Duration, Ticker};
use embedded_hal::digital::InputPin;

use oledhat::shared_state::Selection;

use crate::hat_inputs::HatInputs;
use crate::lines::PollConfig;

/// Poll the HAT's controls forever at `config.poll_period_ms`.
///
/// Like the display loop, this is a plain `async fn`; wrap it in a
/// concrete `#[embassy_executor::task]` for your pin type:
///
/// ```ignore
/// static SELECTION: Selection = Selection::new();
///
/// #[embassy_executor::task]
/// async fn input_task(inputs: HatInputs<Input<'static>>) {
///     input_poll_task(inputs, &SELECTION, PollConfig::default()).await;
/// }
/// ```
///
/// A failed read is logged and the poll retried on the next tick.
pub async fn input_poll_task<P>(
    mut inputs: HatInputs<P>,
    selection: &'static Selection,
    config: PollConfig,
) -> !
where
    P: InputPin,
    P::Error: core::fmt::Debug,
{
    let mut ticker = Ticker::every(Duration::from_millis(config.poll_period_ms));

    loop {
        match inputs.poll_once(selection) {
            Ok(Some(_navigation)) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("input: {}", _navigation);
            }
            Ok(None) => {}
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("input read failed: {}", defmt::Debug2Format(&_e));
            }
        }
        ticker.next().await;
    }
}
