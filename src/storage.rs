//! Persistent storage for user settings.
//!
//! Uses the nRF52840's internal flash via `sequential-storage` crate
//! so the wearer's preferences survive a reset.
//!
//! Storage layout:
//!   - One key-value map item under [`KEY_SETTINGS`] holding the
//!     [`Settings`] record (`[version][flags]`).
//!   - Rewrites are appended; `sequential-storage` handles wear levelling
//!     and garbage collection across the reserved pages.

use defmt::{debug, error, info, warn};
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

use slideface::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use slideface::settings::{Settings, RECORD_LEN};
use slideface::Error;

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Key of the settings record in the map storage.
const KEY_SETTINGS: u8 = 0x01;

/// Scratch buffer for map operations (item header + key + record, padded
/// to the flash word size).
const SCRATCH_LEN: usize = 32;

/// Settings as last written, so unchanged values are not rewritten.
pub struct SettingsStore {
    saved: Option<Settings>,
}

impl SettingsStore {
    pub const fn new() -> Self {
        Self { saved: None }
    }

    /// Read the stored settings, falling back to defaults.
    pub async fn load(&mut self, flash: &mut impl NorFlash) -> Settings {
        let mut buf = [0u8; SCRATCH_LEN];

        let settings = match map::fetch_item::<u8, &[u8], _>(
            flash,
            STORAGE_START..STORAGE_END,
            &mut NoCache::new(),
            &mut buf,
            &KEY_SETTINGS,
        )
        .await
        {
            Ok(Some(data)) => match Settings::deserialize(data) {
                Ok(settings) => {
                    info!("Loaded settings from flash: {}", settings);
                    settings
                }
                Err(e) => {
                    warn!("Stored settings unreadable ({}), using defaults", e);
                    Settings::default()
                }
            },
            Ok(None) => {
                info!("No settings in flash, using defaults");
                Settings::default()
            }
            Err(e) => {
                error!("Flash read error: {:?}", defmt::Debug2Format(&e));
                Settings::default()
            }
        };

        self.saved = Some(settings);
        settings
    }

    /// Persist `settings` if they differ from what is stored.
    pub async fn save(&mut self, flash: &mut impl NorFlash, settings: &Settings) -> Result<(), Error> {
        if self.saved.as_ref() == Some(settings) {
            debug!("SettingsStore: no changes to save");
            return Ok(());
        }

        let mut record = [0u8; RECORD_LEN];
        let len = settings.serialize(&mut record)?;
        let item: &[u8] = &record[..len];
        let mut buf = [0u8; SCRATCH_LEN];

        map::store_item::<u8, &[u8], _>(
            flash,
            STORAGE_START..STORAGE_END,
            &mut NoCache::new(),
            &mut buf,
            &KEY_SETTINGS,
            &item,
        )
        .await
        .map_err(|e| {
            error!("Flash write error: {:?}", defmt::Debug2Format(&e));
            Error::Storage
        })?;

        info!("Saved settings to flash: {}", settings);
        self.saved = Some(*settings);
        Ok(())
    }
}
