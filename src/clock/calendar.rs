//! Software wall clock for targets without an OS calendar.
//!
//! The companion sends unix time plus the wearer's UTC offset; from then
//! on the firmware advances the clock once per second and derives a
//! [`WallTick`] for the face.

use super::{HourFormat, WallTick};

const SECS_PER_DAY: i64 = 86_400;

/// Local wall clock, kept as seconds since 1970-01-01 00:00 local time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    local_secs: i64,
    format: HourFormat,
}

impl WallClock {
    /// Clock at `unix_secs` UTC shifted by `utc_offset_min`.
    pub fn from_unix(unix_secs: u32, utc_offset_min: i16, format: HourFormat) -> Self {
        Self {
            local_secs: i64::from(unix_secs) + i64::from(utc_offset_min) * 60,
            format,
        }
    }

    /// Advance by `secs` seconds.
    pub fn advance(&mut self, secs: u32) {
        self.local_secs += i64::from(secs);
    }

    pub fn set_format(&mut self, format: HourFormat) {
        self.format = format;
    }

    pub fn format(&self) -> HourFormat {
        self.format
    }

    /// Break the clock down into calendar fields.
    pub fn tick(&self) -> WallTick {
        let days = self.local_secs.div_euclid(SECS_PER_DAY);
        let secs_of_day = self.local_secs.rem_euclid(SECS_PER_DAY);
        let (year, month, day) = civil_from_days(days);

        WallTick {
            year: year as u16,
            month,
            day_of_month: day,
            day_of_year: day_of_year(year, month, day),
            // 1970-01-01 was a Thursday.
            weekday: (days + 4).rem_euclid(7) as u8,
            hour: (secs_of_day / 3600) as u8,
            minute: (secs_of_day / 60 % 60) as u8,
            second: (secs_of_day % 60) as u8,
            format: self.format,
        }
    }
}

/// Year, month (1-12) and day (1-31) for a count of days since 1970-01-01.
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as i32, month as u8, day as u8)
}

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Zero-based day of the year.
fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    const CUMULATIVE: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    let mut doy = CUMULATIVE[usize::from(month - 1)] + u16::from(day) - 1;
    if month > 2 && is_leap(year) {
        doy += 1;
    }
    doy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_thursday_first_of_january() {
        let t = WallClock::from_unix(0, 0, HourFormat::TwentyFourHour).tick();
        assert_eq!((t.year, t.month, t.day_of_month), (1970, 1, 1));
        assert_eq!(t.day_of_year, 0);
        assert_eq!(t.weekday, 4);
        assert_eq!((t.hour, t.minute, t.second), (0, 0, 0));
    }

    #[test]
    fn known_instant_breaks_down() {
        // 2026-10-18 14:05:09 UTC, a Sunday.
        let t = WallClock::from_unix(1_792_332_309, 0, HourFormat::TwelveHour).tick();
        assert_eq!((t.year, t.month, t.day_of_month), (2026, 10, 18));
        assert_eq!(t.weekday, 0);
        assert_eq!(t.day_of_year, 290);
        assert_eq!((t.hour, t.minute, t.second), (14, 5, 9));
        assert_eq!(t.format, HourFormat::TwelveHour);
    }

    #[test]
    fn utc_offset_moves_local_day() {
        // 2026-01-01 00:30 UTC is still New Year's Eve at UTC-01:00.
        let t = WallClock::from_unix(1_767_227_400, -60, HourFormat::TwentyFourHour).tick();
        assert_eq!((t.year, t.month, t.day_of_month), (2025, 12, 31));
        assert_eq!(t.day_of_year, 364);
        assert_eq!((t.hour, t.minute), (23, 30));
    }

    #[test]
    fn leap_day_counts_in_day_of_year() {
        // 2028-03-01 00:00 UTC.
        let t = WallClock::from_unix(1_835_481_600, 0, HourFormat::TwentyFourHour).tick();
        assert_eq!((t.year, t.month, t.day_of_month), (2028, 3, 1));
        assert_eq!(t.day_of_year, 60);
    }

    #[test]
    fn advancing_produces_contiguous_ticks() {
        // 2026-12-31 23:59:59 UTC.
        let mut clock = WallClock::from_unix(1_798_761_599, 0, HourFormat::TwentyFourHour);
        let before = clock.tick();
        clock.advance(1);
        let after = clock.tick();
        assert_eq!((after.year, after.day_of_year), (2027, 0));
        assert!(after.follows(&before));
    }
}
