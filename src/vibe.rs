//! Vibration motor driven from a GPIO (active high).

use defmt::info;
use embassy_nrf::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Timer};

use slideface::config::{VIBE_GAP_MS, VIBE_LONG_MS, VIBE_SHORT_MS};
use slideface::status::Haptic;

async fn pulse(motor: &mut Output<'static>, ms: u64) {
    motor.set_high();
    Timer::after(Duration::from_millis(ms)).await;
    motor.set_low();
}

/// Play each requested pattern to completion, in order.
pub async fn vibe_task(
    mut motor: Output<'static>,
    rx: &Receiver<'static, CriticalSectionRawMutex, Haptic, 4>,
) -> ! {
    loop {
        let haptic = rx.receive().await;
        info!("Vibe: {}", haptic);

        match haptic {
            Haptic::DoublePulse => {
                pulse(&mut motor, VIBE_SHORT_MS).await;
                Timer::after(Duration::from_millis(VIBE_GAP_MS)).await;
                pulse(&mut motor, VIBE_SHORT_MS).await;
            }
            Haptic::LongPulse => pulse(&mut motor, VIBE_LONG_MS).await,
        }
    }
}
