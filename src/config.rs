//! Application-wide constants and compile-time configuration.
//!
//! Animation timings, screen layout, storage placement and the
//! hardware pin map live here so they can be tuned in one place.

// Digit transitions

/// Second of the minute at which digits that are about to change slide out.
pub const EXIT_SECOND: u8 = 58;

/// Exit duration of the minute-units digit (ms). Outer digits are shorter.
pub const EXIT_BASE_MS: u32 = 1750;

/// Exit duration reduction per digit further from minute-units (ms).
pub const EXIT_STEP_MS: u32 = 250;

/// Entry duration of the minute-units digit (ms). Outer digits are longer.
pub const ENTER_BASE_MS: u32 = 875;

/// Entry duration increase per digit further from minute-units (ms).
pub const ENTER_STEP_MS: u32 = 125;

/// First-render entry duration of the minute-units digit (ms).
pub const STARTUP_BASE_MS: u32 = 800;

/// First-render entry duration increase per digit (ms).
pub const STARTUP_STEP_MS: u32 = 400;

/// Frame period used by the firmware while motions are running (ms).
/// 33 ms = ~30 fps, enough for a 128x64 I²C panel.
pub const FRAME_PERIOD_MS: u64 = 33;

// Screen layout (SSD1306 128×64)

/// Panel width in pixels.
pub const SCREEN_WIDTH: u32 = 128;

/// Panel height in pixels.
pub const SCREEN_HEIGHT: u32 = 64;

/// Height of the clipped band that holds the four big digits.
/// Parked digits sit one full band below, outside the clip.
pub const TIME_BAND_HEIGHT: u32 = 40;

/// Width of one big digit.
pub const DIGIT_WIDTH: u32 = 24;

/// Left edge of each digit, hour-tens first.
pub const DIGIT_X: [i32; 4] = [4, 32, 72, 100];

/// Baseline of the date / status row.
pub const STATUS_ROW_Y: i32 = 51;

/// Baseline of the city / weather row.
pub const WEATHER_ROW_Y: i32 = 62;

// State sync

/// Largest TLV payload accepted from the companion in one write.
pub const SYNC_MAX_WRITE: usize = 64;

/// Capacity of the city name string.
pub const CITY_CAPACITY: usize = 24;

/// Capacity of the temperature string.
pub const TEMPERATURE_CAPACITY: usize = 8;

// Battery

/// Cell voltage treated as empty (mV).
pub const BATTERY_EMPTY_MV: u32 = 3300;

/// Cell voltage treated as full (mV).
pub const BATTERY_FULL_MV: u32 = 4200;

/// Interval between battery samples (seconds).
pub const BATTERY_SAMPLE_SECS: u64 = 60;

// Haptics

/// Single pulse length of a double pulse (ms).
pub const VIBE_SHORT_MS: u64 = 100;

/// Gap between the two pulses of a double pulse (ms).
pub const VIBE_GAP_MS: u64 = 100;

/// Long pulse length (ms).
pub const VIBE_LONG_MS: u64 = 500;

// BLE

/// Advertised device name.
pub const BLE_DEVICE_NAME: &str = "slideface";

/// Advertising interval in 0.625 ms units (500 ms).
pub const BLE_ADV_INTERVAL: u32 = 800;

// Locale

/// Locale tag used for the date label. The watch has no OS locale, so this
/// stands in for it.
pub const SYSTEM_LOCALE: &str = "en_US";

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   I²C SDA          → P0.26
//   I²C SCL          → P0.27
//   Vibration motor  → P0.13 (active high)
//   Charger STAT     → P0.03 (low while charging)
//   Battery divider  → AIN2 (P0.04), 1:2 divider

/// Ratio of the battery voltage divider feeding the SAADC.
pub const BATTERY_DIVIDER: u32 = 2;

/// SAADC input range with gain 1/6 and the 0.6 V internal reference (mV).
pub const SAADC_FULL_SCALE_MV: u32 = 3600;

/// SAADC counts at full scale (12-bit).
pub const SAADC_MAX_COUNT: u32 = 4096;

// Settings storage

/// Flash page index where settings storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for settings storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 2;
