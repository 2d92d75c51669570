//! User settings persisted across restarts.
//!
//! Encoded as a short versioned record so the firmware can store it with
//! `sequential-storage` and the host tests can check it byte for byte.

use crate::clock::HourFormat;
use crate::error::Error;
use crate::sync::SyncMessage;

/// Record layout version.
const RECORD_VERSION: u8 = 1;

/// Serialized size: `[version][flags]`.
pub const RECORD_LEN: usize = 2;

const FLAG_INVERT: u8 = 1 << 0;
const FLAG_VIBE: u8 = 1 << 1;
const FLAG_24H: u8 = 1 << 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Draw light-on-dark inverted.
    pub invert_colors: bool,
    /// Long buzz when the companion link drops.
    pub vibrate_on_disconnect: bool,
    pub hour_format: HourFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            invert_colors: false,
            vibrate_on_disconnect: false,
            hour_format: HourFormat::TwelveHour,
        }
    }
}

impl Settings {
    /// Write the record into `buf`, returning the number of bytes used.
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.len() < RECORD_LEN {
            return Err(Error::BufferOverflow);
        }

        let mut flags = 0;
        if self.invert_colors {
            flags |= FLAG_INVERT;
        }
        if self.vibrate_on_disconnect {
            flags |= FLAG_VIBE;
        }
        if self.hour_format.is_24h() {
            flags |= FLAG_24H;
        }

        buf[0] = RECORD_VERSION;
        buf[1] = flags;
        Ok(RECORD_LEN)
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, Error> {
        let [version, flags, ..] = data else {
            return Err(Error::InvalidRecord);
        };
        if *version != RECORD_VERSION {
            return Err(Error::InvalidRecord);
        }

        Ok(Self {
            invert_colors: flags & FLAG_INVERT != 0,
            vibrate_on_disconnect: flags & FLAG_VIBE != 0,
            hour_format: if flags & FLAG_24H != 0 {
                HourFormat::TwentyFourHour
            } else {
                HourFormat::TwelveHour
            },
        })
    }

    /// Fold a companion message in; `true` if a persisted field changed.
    pub fn apply(&mut self, message: &SyncMessage) -> bool {
        let before = *self;
        match message {
            SyncMessage::InvertColors(on) => self.invert_colors = *on,
            SyncMessage::VibrateOnDisconnect(on) => self.vibrate_on_disconnect = *on,
            SyncMessage::ClockStyle(format) => self.hour_format = *format,
            _ => {}
        }
        *self != before
    }
}
