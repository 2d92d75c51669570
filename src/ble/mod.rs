//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertiser** - advertises the watch by name until the companion
//!    app connects.
//! 2. **Sync service** - one writable GATT characteristic that receives
//!    TLV batches from the companion (see `slideface::sync::tuple`).
//! 3. **Link state** - connect and disconnect edges are reported to the
//!    face task for the link icon and the disconnect alert.
//!
//! Communication with other tasks is done via Embassy channels defined
//! in the crate root.

pub mod peripheral;

use heapless::Vec;

use slideface::config::SYNC_MAX_WRITE;

/// Raw companion write, decoded by the face task.
pub type SyncWrite = Vec<u8, SYNC_MAX_WRITE>;
