//! Battery sampling - SAADC cell voltage plus the charger status line.
//!
//! A reading is sent every [`BATTERY_SAMPLE_SECS`] and immediately when
//! the charger starts or stops, so the charging glyph follows the cable.

use defmt::{debug, info};
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::Input;
use embassy_nrf::saadc::Saadc;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};

use slideface::config::BATTERY_SAMPLE_SECS;
use slideface::status::battery::{millivolts_from_saadc, percent_from_millivolts, BatteryReading};

use crate::StatusEvent;

/// Sample forever.
///
/// `charger_stat` is the charger's open-drain STAT output, low while
/// charging.
pub async fn battery_task(
    mut saadc: Saadc<'static, 1>,
    mut charger_stat: Input<'static>,
    tx: &Sender<'static, CriticalSectionRawMutex, StatusEvent, 8>,
) -> ! {
    saadc.calibrate().await;
    info!("Battery sampling every {} s", BATTERY_SAMPLE_SECS);

    loop {
        let mut buf = [0i16; 1];
        saadc.sample(&mut buf).await;

        let mv = millivolts_from_saadc(buf[0]);
        let reading = BatteryReading {
            percent: percent_from_millivolts(mv),
            charging: charger_stat.is_low(),
        };
        debug!("Battery: {} mV -> {}", mv, reading);
        tx.send(StatusEvent::Battery(reading)).await;

        match select(
            Timer::after(Duration::from_secs(BATTERY_SAMPLE_SECS)),
            charger_stat.wait_for_any_edge(),
        )
        .await
        {
            Either::First(()) => {}
            Either::Second(()) => info!("Charger state changed"),
        }
    }
}
