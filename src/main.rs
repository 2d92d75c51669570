//! slideface firmware - main entry point.
//!
//! nRF52840 + SSD1306 watch face.  One task owns the face and the panel;
//! the BLE, battery and motor tasks talk to it through channels.
//!
//! ## Task map
//!
//! | Task             | Role                                               |
//! |------------------|----------------------------------------------------|
//! | `softdevice_task`| runs the SoftDevice event loop                     |
//! | `ble_task`       | advertising, sync writes, link up/down             |
//! | `battery_task`   | SAADC samples + charger line                       |
//! | `vibe_task`      | motor patterns                                     |
//! | `face_task`      | clock, face, settings, drawing                     |

#![no_std]
#![no_main]

mod battery;
mod ble;
mod display;
mod stage;
mod storage;
mod vibe;

use core::mem;

use defmt::{debug, error, info, unwrap, warn};
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_futures::select::{select4, Either4};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::saadc::{self, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Ticker, Timer};
use nrf_softdevice::{raw, Flash, Softdevice};
use static_cell::StaticCell;

use slideface::clock::calendar::WallClock;
use slideface::clock::locale::Locale;
use slideface::config::{BLE_DEVICE_NAME, FRAME_PERIOD_MS, SYSTEM_LOCALE};
use slideface::face::controller::{ClockFace, FaceLayout, TickReport};
use slideface::face::scheduler::TickKind;
use slideface::settings::Settings;
use slideface::status::battery::{BatteryMonitor, BatteryReading};
use slideface::status::connection::{ConnectionMonitor, LinkIcon};
use slideface::status::Haptic;
use slideface::sync::tuple::decode;
use slideface::sync::{SyncMessage, Weather};

use crate::ble::peripheral::Server;
use crate::ble::SyncWrite;
use crate::display::StatusBar;
use crate::stage::Stage;
use crate::storage::SettingsStore;

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SAADC => saadc::InterruptHandler;
});

/// Battery and link changes for the face task.
#[derive(Clone, Copy, defmt::Format)]
pub enum StatusEvent {
    Battery(BatteryReading),
    Link(bool),
}

// ═══════════════════════════════════════════════════════════════════════════
// Inter-task channels
// ═══════════════════════════════════════════════════════════════════════════

/// Companion writes, BLE -> face.
static SYNC_CHANNEL: Channel<CriticalSectionRawMutex, SyncWrite, 4> = Channel::new();

/// Battery readings and link edges -> face.
static STATUS_CHANNEL: Channel<CriticalSectionRawMutex, StatusEvent, 8> = Channel::new();

/// Haptic requests, face -> motor.
static VIBE_CHANNEL: Channel<CriticalSectionRawMutex, Haptic, 4> = Channel::new();

static SERVER: StaticCell<Server> = StaticCell::new();

// ═══════════════════════════════════════════════════════════════════════════
// Tasks
// ═══════════════════════════════════════════════════════════════════════════

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    ble::peripheral::ble_task(sd, server, &SYNC_CHANNEL.sender(), &STATUS_CHANNEL.sender()).await
}

#[embassy_executor::task]
async fn battery_task(saadc: Saadc<'static, 1>, charger_stat: Input<'static>) -> ! {
    battery::battery_task(saadc, charger_stat, &STATUS_CHANNEL.sender()).await
}

#[embassy_executor::task]
async fn vibe_task(motor: Output<'static>) -> ! {
    vibe::vibe_task(motor, &VIBE_CHANNEL.receiver()).await
}

/// Everything the face task keeps between events.
struct Watch {
    settings: Settings,
    clock: Option<WallClock>,
    weather: Weather,
    status: StatusBar,
    battery: BatteryMonitor,
    link: ConnectionMonitor,
}

impl Watch {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            clock: None,
            weather: Weather::default(),
            status: StatusBar {
                battery: None,
                link: LinkIcon::Disconnected,
            },
            battery: BatteryMonitor::new(),
            link: ConnectionMonitor::new(),
        }
    }

    /// Fold a companion batch in. Returns `(persist, redraw)`.
    fn apply(&mut self, messages: &[SyncMessage]) -> (bool, bool) {
        let mut persist = false;
        let mut redraw = false;

        for message in messages {
            persist |= self.settings.apply(message);
            redraw |= self.weather.apply(message);
            if let &SyncMessage::SetTime {
                unix_secs,
                utc_offset_min,
            } = message
            {
                info!("Clock set: {} (UTC{=i16} min)", unix_secs, utc_offset_min);
                self.clock = Some(WallClock::from_unix(
                    unix_secs,
                    utc_offset_min,
                    self.settings.hour_format,
                ));
            }
        }

        if let Some(clock) = self.clock.as_mut() {
            clock.set_format(self.settings.hour_format);
        }
        (persist, redraw || persist)
    }

    /// Apply a status event, returning the haptic it asks for.
    fn status(&mut self, event: StatusEvent) -> Option<Haptic> {
        match event {
            StatusEvent::Battery(reading) => {
                let update = self.battery.update(reading);
                self.status.battery = Some(update.icon);
                update.haptic
            }
            StatusEvent::Link(connected) => {
                let update = self
                    .link
                    .update(connected, self.settings.vibrate_on_disconnect);
                self.status.link = update.icon;
                update.haptic
            }
        }
    }
}

fn log_report(report: &TickReport) {
    if !report.issued.is_empty() {
        info!("{} tick: {} transitions", report.kind, report.issued.len());
        debug!("{}", report);
    }
    if report.interrupted > 0 {
        warn!("Clock jump cancelled {} motions", report.interrupted);
    }
    if !report.stalled.is_empty() {
        warn!("No motion for {}, redrawing next tick", report.stalled);
    }
    if !report.recovered.is_empty() {
        info!("Redrew {} statically", report.recovered);
    }
}

#[embassy_executor::task]
async fn face_task(sd: &'static Softdevice, i2c: Twim<'static, TWISPI0>) -> ! {
    let mut flash = Flash::take(sd);
    let mut store = SettingsStore::new();
    let mut watch = Watch::new(store.load(&mut flash).await);

    let mut display = display::init(i2c);
    let layout = FaceLayout::standard();
    let locale = Locale::from_system(SYSTEM_LOCALE);
    let mut face = ClockFace::activate(Stage::new(&layout), layout, locale);
    info!("Face active ({}), waiting for companion time", locale);

    let sync_rx = SYNC_CHANNEL.receiver();
    let status_rx = STATUS_CHANNEL.receiver();
    let vibe_tx = VIBE_CHANNEL.sender();
    let mut ticker = Ticker::every(Duration::from_secs(1));

    loop {
        let animating = face.host().is_animating();
        let frame = async {
            if animating {
                Timer::after(Duration::from_millis(FRAME_PERIOD_MS)).await
            } else {
                core::future::pending::<()>().await
            }
        };

        match select4(ticker.next(), frame, sync_rx.receive(), status_rx.receive()).await {
            Either4::First(()) => {
                if let Some(clock) = watch.clock.as_mut() {
                    let report = face.on_tick(&clock.tick());
                    clock.advance(1);
                    log_report(&report);
                    if report.kind == TickKind::First {
                        watch.link.mark_started();
                    }
                }
            }
            Either4::Second(()) => {
                for handle in face.host_mut().advance(Instant::now()) {
                    if let Some(done) = face.on_motion_complete(handle) {
                        debug!("{} done on {}", done.phase, done.cell);
                    }
                }
            }
            Either4::Third(write) => match decode(&write) {
                Ok(batch) => {
                    let (persist, redraw) = watch.apply(&batch);
                    if persist {
                        if let Err(e) = store.save(&mut flash, &watch.settings).await {
                            warn!("Settings not saved: {}", e);
                        }
                    }
                    if redraw {
                        face.host_mut().touch();
                    }
                }
                Err(e) => warn!("Sync write rejected: {}", e),
            },
            Either4::Fourth(event) => {
                debug!("Status: {}", event);
                if let Some(haptic) = watch.status(event) {
                    if vibe_tx.try_send(haptic).is_err() {
                        warn!("Vibe queue full - {} dropped", haptic);
                    }
                }
                face.host_mut().touch();
            }
        }

        if face.host_mut().take_dirty() {
            if let Err(e) = display::draw_face(
                &mut display,
                face.host(),
                &watch.status,
                &watch.weather,
                watch.settings.invert_colors,
            ) {
                warn!("Display flush failed: {}", e);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Entry point
// ═══════════════════════════════════════════════════════════════════════════

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 128 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            // SAFETY: an all-zero security mode is "no access", a valid value.
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("slideface v{=str}", env!("CARGO_PKG_VERSION"));

    // The SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    interrupt::TWISPI0.set_priority(Priority::P3);
    interrupt::SAADC.set_priority(Priority::P3);

    let sd = Softdevice::enable(&softdevice_config());
    let server = match ble::peripheral::server(sd) {
        Ok(server) => SERVER.init(server),
        Err(e) => {
            error!("BLE unavailable: {}", e);
            loop {
                Timer::after(Duration::from_secs(1)).await;
            }
        }
    };
    let sd: &'static Softdevice = sd;
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // I²C display: SDA P0.26, SCL P0.27.
    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim_config);

    // Battery divider on AIN2 (P0.04), charger STAT on P0.03.
    let channel = saadc::ChannelConfig::single_ended(p.P0_04);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc::Config::default(), [channel]);
    let charger_stat = Input::new(p.P0_03, Pull::Up);

    let motor = Output::new(p.P0_13, Level::Low, OutputDrive::Standard);

    unwrap!(spawner.spawn(ble_task(sd, server)));
    unwrap!(spawner.spawn(battery_task(saadc, charger_stat)));
    unwrap!(spawner.spawn(vibe_task(motor)));
    unwrap!(spawner.spawn(face_task(sd, i2c)));
    info!("All tasks spawned");
}
