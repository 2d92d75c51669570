//! Companion link: advertising, the sync GATT service and link events.

use defmt::{info, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload,
};
use nrf_softdevice::ble::{gatt_server, peripheral, Connection};
use nrf_softdevice::Softdevice;

use slideface::config::{BLE_ADV_INTERVAL, BLE_DEVICE_NAME};
use slideface::{BleError, Error};

use super::SyncWrite;
use crate::StatusEvent;

/// Back-off before re-advertising after a SoftDevice error.
const ADVERTISE_RETRY_MS: u64 = 1000;

/// GATT service the companion writes sync batches to.
///
/// The `#[nrf_softdevice::gatt_service]` macro generates registration and
/// the write event enum for the listed characteristics.
#[nrf_softdevice::gatt_service(uuid = "5f1a0001-8c3e-4b7a-9d52-2f7b3c1e6a10")]
pub struct SyncService {
    /// TLV batch, `[len][key][payload]...`.
    #[characteristic(uuid = "5f1a0002-8c3e-4b7a-9d52-2f7b3c1e6a10", write, write_without_response)]
    pub inbox: SyncWrite,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub sync: SyncService,
}

/// Register the GATT server with the SoftDevice.
pub fn server(sd: &mut Softdevice) -> Result<Server, Error> {
    Server::new(sd).map_err(|e| {
        warn!("GATT server registration failed: {:?}", e);
        Error::from(BleError::ServerFailed)
    })
}

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .full_name(BLE_DEVICE_NAME)
    .build();

static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new().build();

/// Advertise until the companion connects.
async fn advertise(sd: &'static Softdevice) -> Result<Connection, Error> {
    let config = peripheral::Config {
        interval: BLE_ADV_INTERVAL,
        ..Default::default()
    };
    let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
        adv_data: &ADV_DATA,
        scan_data: &SCAN_DATA,
    };

    peripheral::advertise_connectable(sd, adv, &config)
        .await
        .map_err(|e| {
            warn!("Advertising failed: {:?}", e);
            Error::from(BleError::AdvertiseFailed)
        })
}

/// Serve one companion at a time, forever.
///
/// Writes go to `sync_tx` without waiting: the GATT event callback is
/// synchronous, so a full queue drops the write with a warning.
pub async fn ble_task(
    sd: &'static Softdevice,
    server: &'static Server,
    sync_tx: &Sender<'static, CriticalSectionRawMutex, SyncWrite, 4>,
    status_tx: &Sender<'static, CriticalSectionRawMutex, StatusEvent, 8>,
) -> ! {
    loop {
        let conn = match advertise(sd).await {
            Ok(conn) => conn,
            Err(_) => {
                Timer::after(Duration::from_millis(ADVERTISE_RETRY_MS)).await;
                continue;
            }
        };

        info!("Companion connected");
        status_tx.send(StatusEvent::Link(true)).await;

        let reason = gatt_server::run(&conn, server, |event| match event {
            ServerEvent::Sync(SyncServiceEvent::InboxWrite(data)) => {
                info!("Sync write: {} bytes", data.len());
                if sync_tx.try_send(data).is_err() {
                    warn!("Sync queue full - write dropped");
                }
            }
        })
        .await;

        info!("Companion disconnected: {:?}", reason);
        status_tx.send(StatusEvent::Link(false)).await;
    }
}
