//! Unified error type for slideface.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the face and the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Animation
    /// The host could not allocate a motion for a digit.
    MotionUnavailable,

    // Storage
    /// Flash read/write/erase failed.
    Storage,

    /// A stored or received record could not be decoded.
    InvalidRecord,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    // BLE
    /// The SoftDevice returned an error.
    Ble(BleError),

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Advertising could not start or was aborted.
    AdvertiseFailed,
    /// The GATT server could not be registered.
    ServerFailed,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}
