//! TLV decoding of companion writes.
//!
//! A write is a run of records laid out like BLE advertising structures:
//! `[len][key][payload; len - 1]`.  Unknown keys are skipped; a zero length
//! or a record running past the end stops decoding.

use heapless::Vec;

use super::{key, truncate_utf8, SyncMessage, WeatherIcon};
use crate::clock::HourFormat;
use crate::error::Error;

/// Most records accepted from one write.
pub const MAX_MESSAGES: usize = 8;

pub type SyncBatch = Vec<SyncMessage, MAX_MESSAGES>;

/// Iterator over the raw `(key, payload)` records of a write.
pub struct Records<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Records<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = (u8, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.pos;
        if i >= self.data.len() {
            return None;
        }
        let len = self.data[i] as usize;
        if len == 0 || i + len >= self.data.len() {
            self.pos = self.data.len();
            return None;
        }

        let key = self.data[i + 1];
        let payload = &self.data[i + 2..i + 1 + len];
        self.pos = i + len + 1;
        Some((key, payload))
    }
}

/// Decode every recognised record of a write.
///
/// Records with an unknown key or a payload too short for their key are
/// skipped. More than [`MAX_MESSAGES`] recognised records is an error.
pub fn decode(data: &[u8]) -> Result<SyncBatch, Error> {
    let mut batch = SyncBatch::new();
    for (key, payload) in Records::new(data) {
        if let Some(message) = decode_record(key, payload) {
            batch.push(message).map_err(|_| Error::BufferOverflow)?;
        }
    }
    Ok(batch)
}

fn decode_record(k: u8, payload: &[u8]) -> Option<SyncMessage> {
    let flag = || payload.first().map(|&b| b != 0);

    match k {
        key::WEATHER_ICON => payload
            .first()
            .map(|&i| SyncMessage::WeatherIcon(WeatherIcon::from_index(i))),
        key::TEMPERATURE => Some(SyncMessage::Temperature(truncate_utf8(payload))),
        key::INVERT_COLORS => flag().map(SyncMessage::InvertColors),
        key::VIBRATE_ON_DISCONNECT => flag().map(SyncMessage::VibrateOnDisconnect),
        key::CITY => Some(SyncMessage::City(truncate_utf8(payload))),
        key::SET_TIME => {
            let secs: [u8; 4] = payload.get(0..4)?.try_into().ok()?;
            let offset: [u8; 2] = payload.get(4..6)?.try_into().ok()?;
            Some(SyncMessage::SetTime {
                unix_secs: u32::from_le_bytes(secs),
                utc_offset_min: i16::from_le_bytes(offset),
            })
        }
        key::CLOCK_STYLE => flag().map(|h24| {
            SyncMessage::ClockStyle(if h24 {
                HourFormat::TwentyFourHour
            } else {
                HourFormat::TwelveHour
            })
        }),
        _ => None,
    }
}
