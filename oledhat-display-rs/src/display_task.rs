//! Display update task.
//!
//! Brings the panel up, plays the boot animation until the first stats
//! snapshot lands, then renders the selected screen forever.

use display_interface::AsyncWriteOnlyDataCommand;
use embassy_time::{Duration, Instant, Timer};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use oledhat::shared_state::{Selection, StatsSlot};

use crate::driver::{ControlPins, OledDriver};
use crate::screens::pick_boot_message;
use crate::session::DisplaySession;

/// RNG for the pattern screens, seeded from the monotonic clock.
pub fn time_seeded_rng() -> SmallRng {
    SmallRng::seed_from_u64(Instant::now().as_ticks())
}

/// Periodic display update loop.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Callers
/// wrap it in a thin concrete task, since Embassy tasks cannot be generic:
///
/// ```ignore
/// static SELECTION: Selection = Selection::new();
/// static STATS: StatsSlot = StatsSlot::new();
///
/// #[embassy_executor::task]
/// async fn oled_task(
///     driver: OledDriver<I2cInterface<MyI2c>>,
///     pins: ControlPins<Output<'static>, Output<'static>, Output<'static>>,
///     session: DisplaySession,
/// ) {
///     let _i2c = display_update_task(driver, pins, Delay, session, &SELECTION, &STATS).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Initialise the panel and clear it.
/// 2. Draw boot frames every `boot_period_ms` until `stats` holds a
///    snapshot, then clear.
/// 3. Loop: snapshot the selection and the stats, render the frame, pull
///    an overshooting scroll offset back to the last body row, sleep
///    `animation_period_ms` for animated screens or `update_period_ms`
///    for the rest.
///
/// # Errors
///
/// Content errors skip the frame. Bus and state errors are fatal: the
/// panel is switched off and the interface handed back.
pub async fn display_update_task<DI, RST, DC, CS, D>(
    mut driver: OledDriver<DI>,
    mut pins: ControlPins<RST, DC, CS>,
    mut delay: D,
    mut session: DisplaySession,
    selection: &'static Selection,
    stats: &'static StatsSlot,
) -> DI
where
    DI: AsyncWriteOnlyDataCommand,
    RST: OutputPin,
    DC: OutputPin,
    CS: OutputPin,
    D: DelayNs,
{
    // ── Initialisation ───────────────────────────────────────────────
    if let Err(_e) = driver.init(&mut pins, &mut delay).await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return driver.release().await;
    }
    if let Err(_e) = driver.clear().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED clear failed: {}", _e);
        return driver.release().await;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("OLED initialised");

    let config = *driver.config();
    let mut rng = time_seeded_rng();
    session.set_boot_message(pick_boot_message(&mut rng));

    // ── Boot animation ───────────────────────────────────────────────
    let boot_period = Duration::from_millis(config.boot_period_ms());
    while !stats.is_available() {
        if let Err(e) = session.boot_frame(&mut driver, &mut rng).await {
            if e.is_fatal() {
                #[cfg(feature = "defmt")]
                defmt::error!("boot frame failed: {}", e);
                return driver.release().await;
            }
            #[cfg(feature = "defmt")]
            defmt::warn!("boot frame skipped: {}", e);
        }
        Timer::after(boot_period).await;
    }
    session.invalidate();

    // ── Main loop ────────────────────────────────────────────────────
    loop {
        let view = selection.snapshot();
        let snapshot = stats.latest();

        match session
            .render_frame(&mut driver, &mut rng, view, snapshot.as_ref())
            .await
        {
            Ok(_) => selection.clamp_scroll(&view, session.max_scroll()),
            Err(e) => {
                if e.is_fatal() {
                    #[cfg(feature = "defmt")]
                    defmt::error!("render failed: {}", e);
                    return driver.release().await;
                }
                #[cfg(feature = "defmt")]
                defmt::warn!("frame skipped: {}", e);
            }
        }

        let period = if view.mode.is_animated() {
            config.animation_period_ms()
        } else {
            config.update_period_ms()
        };
        Timer::after(Duration::from_millis(period)).await;
    }
}
