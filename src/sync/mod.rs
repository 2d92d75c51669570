//! State sync with the companion app.
//!
//! The companion writes small TLV batches (see [`tuple`]) carrying weather,
//! user preferences and the wall-clock time.  Weather is kept in RAM only;
//! preferences go through [`crate::settings::Settings`].

pub mod tuple;

use heapless::String;

use crate::clock::HourFormat;
use crate::config::{CITY_CAPACITY, TEMPERATURE_CAPACITY};

/// Sync keys.
pub mod key {
    pub const WEATHER_ICON: u8 = 0x00;
    pub const TEMPERATURE: u8 = 0x01;
    pub const INVERT_COLORS: u8 = 0x02;
    pub const VIBRATE_ON_DISCONNECT: u8 = 0x03;
    // 0x04 was an hourly chime, never shipped.
    pub const CITY: u8 = 0x05;
    pub const SET_TIME: u8 = 0x10;
    pub const CLOCK_STYLE: u8 = 0x11;
}

pub type Temperature = String<TEMPERATURE_CAPACITY>;
pub type City = String<CITY_CAPACITY>;

/// Weather condition glyphs, in wire order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    Windy,
    Cold,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Haze,
    Cloud,
    Rain,
    Snow,
    Hail,
    Cloudy,
    Storm,
    Fog,
    #[default]
    NotAvailable,
}

impl WeatherIcon {
    const TABLE: [WeatherIcon; 15] = [
        WeatherIcon::ClearDay,
        WeatherIcon::ClearNight,
        WeatherIcon::Windy,
        WeatherIcon::Cold,
        WeatherIcon::PartlyCloudyDay,
        WeatherIcon::PartlyCloudyNight,
        WeatherIcon::Haze,
        WeatherIcon::Cloud,
        WeatherIcon::Rain,
        WeatherIcon::Snow,
        WeatherIcon::Hail,
        WeatherIcon::Cloudy,
        WeatherIcon::Storm,
        WeatherIcon::Fog,
        WeatherIcon::NotAvailable,
    ];

    /// Decode a wire index; anything out of range is "not available".
    pub fn from_index(index: u8) -> Self {
        Self::TABLE
            .get(usize::from(index))
            .copied()
            .unwrap_or(WeatherIcon::NotAvailable)
    }

    /// Short text stand-in drawn next to the temperature.
    pub fn label(self) -> &'static str {
        match self {
            WeatherIcon::ClearDay => "SUN",
            WeatherIcon::ClearNight => "MOON",
            WeatherIcon::Windy => "WIND",
            WeatherIcon::Cold => "COLD",
            WeatherIcon::PartlyCloudyDay | WeatherIcon::PartlyCloudyNight => "PCLD",
            WeatherIcon::Haze => "HAZE",
            WeatherIcon::Cloud | WeatherIcon::Cloudy => "CLDY",
            WeatherIcon::Rain => "RAIN",
            WeatherIcon::Snow => "SNOW",
            WeatherIcon::Hail => "HAIL",
            WeatherIcon::Storm => "STRM",
            WeatherIcon::Fog => "FOG",
            WeatherIcon::NotAvailable => "N/A",
        }
    }
}

/// One decoded companion record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncMessage {
    WeatherIcon(WeatherIcon),
    Temperature(Temperature),
    InvertColors(bool),
    VibrateOnDisconnect(bool),
    City(City),
    /// Unix time and the wearer's UTC offset.
    SetTime { unix_secs: u32, utc_offset_min: i16 },
    ClockStyle(HourFormat),
}

/// Weather shown on the lower rows. Not persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Weather {
    pub icon: WeatherIcon,
    pub temperature: Temperature,
    pub city: City,
}

impl Weather {
    /// Fold a message in; `true` if the weather changed.
    pub fn apply(&mut self, message: &SyncMessage) -> bool {
        match message {
            SyncMessage::WeatherIcon(icon) if *icon != self.icon => self.icon = *icon,
            SyncMessage::Temperature(t) if *t != self.temperature => self.temperature = t.clone(),
            SyncMessage::City(c) if *c != self.city => self.city = c.clone(),
            _ => return false,
        }
        true
    }
}

/// Copy as much of `bytes` as fits, stopping at a character boundary.
///
/// Invalid UTF-8 ends the string at the last valid character.
pub fn truncate_utf8<const N: usize>(bytes: &[u8]) -> String<N> {
    let text = match core::str::from_utf8(bytes) {
        Ok(text) => text,
        // The prefix up to `valid_up_to` is valid by definition.
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
    };

    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
