//! Host-testable library for slideface.
//!
//! Holds everything that does not touch hardware: the digit transition
//! engine, wall-clock formatting, status icons, the companion sync codec
//! and the persisted settings record.
//!
//! Usage: `cargo test --lib` / `cargo test --test integration`
//!
//! Note: The firmware binary (main.rs, `--features embedded`) links this
//! library and adds the display, BLE, flash and motor drivers around it.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod error;
pub mod face;
pub mod settings;
pub mod status;
pub mod sync;

pub use error::{BleError, Error};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - cross-module behaviour
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::clock::calendar::WallClock;
    use super::clock::HourFormat;
    use super::settings::Settings;
    use super::sync::tuple::decode;
    use super::sync::{SyncMessage, Weather, WeatherIcon};

    // ════════════════════════════════════════════════════════════════════════
    // Sync -> settings / weather
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn companion_batch_updates_settings_and_weather() {
        let data = [
            0x02, 0x00, 0x0c, // storm
            0x04, 0x01, b'-', b'3', b'C', // temperature
            0x02, 0x03, 0x01, // vibe on
            0x02, 0x11, 0x01, // 24h
        ];
        let batch = decode(&data).unwrap();

        let mut settings = Settings::default();
        let mut weather = Weather::default();
        let mut persist = false;
        let mut redraw = false;
        for message in &batch {
            persist |= settings.apply(message);
            redraw |= weather.apply(message);
        }

        assert!(persist);
        assert!(redraw);
        assert!(settings.vibrate_on_disconnect);
        assert!(!settings.invert_colors);
        assert_eq!(settings.hour_format, HourFormat::TwentyFourHour);
        assert_eq!(weather.icon, WeatherIcon::Storm);
        assert_eq!(weather.temperature.as_str(), "-3C");
    }

    #[test]
    fn stored_settings_survive_a_restart() {
        let mut settings = Settings::default();
        settings.apply(&SyncMessage::InvertColors(true));

        let mut buf = [0u8; 8];
        let len = settings.serialize(&mut buf).unwrap();
        let restored = Settings::deserialize(&buf[..len]).unwrap();
        assert_eq!(restored, settings);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Sync -> wall clock
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn set_time_seeds_the_wall_clock() {
        // 1792332309 = 2026-10-18 14:05:09 UTC; +120 min offset.
        let data = [0x07, 0x10, 0x15, 0xd2, 0xd4, 0x6a, 0x78, 0x00];
        let batch = decode(&data).unwrap();

        let SyncMessage::SetTime {
            unix_secs,
            utc_offset_min,
        } = batch[0].clone()
        else {
            panic!("expected SetTime, got {:?}", batch[0]);
        };
        assert_eq!(unix_secs, 1_792_332_309);

        let t = WallClock::from_unix(unix_secs, utc_offset_min, HourFormat::TwelveHour).tick();
        assert_eq!((t.hour, t.minute, t.second), (16, 5, 9));
        assert_eq!(t.display_time().display_hour(), 4);
    }
}
