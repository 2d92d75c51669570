//! Wall-clock input and the display formatting applied to it.
//!
//! The tick source delivers one [`WallTick`] per second.  The face only
//! ever looks at the [`DisplayTime`] derived from it (hour, minute and the
//! 12/24-hour style) plus the date fields used for the date label.

pub mod calendar;
pub mod date;
pub mod locale;

use crate::face::{CellIndex, Glyph};

/// Hour display style selected by the wearer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    TwelveHour,
    TwentyFourHour,
}

impl HourFormat {
    pub fn is_24h(self) -> bool {
        matches!(self, HourFormat::TwentyFourHour)
    }
}

/// AM/PM badge shown in 12-hour mode while the hour-tens digit is blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridiem {
    Am,
    Pm,
}

/// One second of wall-clock time as delivered by the tick source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTick {
    /// Full year, e.g. 2026.
    pub year: u16,
    /// Month, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day_of_month: u8,
    /// Day of year, 0-365.
    pub day_of_year: u16,
    /// Day of week, 0 = Sunday.
    pub weekday: u8,
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
    /// Active hour style.
    pub format: HourFormat,
}

impl WallTick {
    /// The hour/minute pair the face is about to show.
    pub fn display_time(&self) -> DisplayTime {
        DisplayTime {
            hour: self.hour,
            minute: self.minute,
            format: self.format,
        }
    }

    /// Identifies the calendar day; changes exactly when the date label must.
    pub fn day_key(&self) -> u32 {
        u32::from(self.year) * 1000 + u32::from(self.day_of_year)
    }

    /// Seconds since local midnight.
    pub fn second_of_day(&self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }

    /// `true` if `self` is the same instant as `other`.
    pub fn same_instant(&self, other: &WallTick) -> bool {
        self.day_key() == other.day_key() && self.second_of_day() == other.second_of_day()
    }

    /// `true` if `self` is exactly one second after `prev`, including
    /// midnight and new-year rollover.
    pub fn follows(&self, prev: &WallTick) -> bool {
        if self.day_key() == prev.day_key() {
            return self.second_of_day() == prev.second_of_day() + 1;
        }

        if prev.second_of_day() != 86_399 || self.second_of_day() != 0 {
            return false;
        }

        let next_day_same_year =
            self.year == prev.year && self.day_of_year == prev.day_of_year + 1;
        let first_day_next_year = self.year == prev.year + 1 && self.day_of_year == 0;
        next_day_same_year || first_day_next_year
    }
}

/// Hour, minute and hour style for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayTime {
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    pub format: HourFormat,
}

impl DisplayTime {
    pub const fn new(hour: u8, minute: u8, format: HourFormat) -> Self {
        Self {
            hour,
            minute,
            format,
        }
    }

    /// The hour as shown: unchanged in 24-hour mode, 1-12 otherwise.
    pub fn display_hour(&self) -> u8 {
        display_hour(self.hour, self.format)
    }

    /// Glyph for every cell, hour-tens first.
    ///
    /// In 12-hour mode the hour-tens digit is blank for hours 1-9; in
    /// 24-hour mode the leading zero is kept.
    pub fn digits(&self) -> [Glyph; 4] {
        let hour = self.display_hour();
        let hour_tens = if hour < 10 && !self.format.is_24h() {
            Glyph::Blank
        } else {
            Glyph::Digit(hour / 10)
        };

        [
            hour_tens,
            Glyph::Digit(hour % 10),
            Glyph::Digit(self.minute / 10),
            Glyph::Digit(self.minute % 10),
        ]
    }

    /// Glyph shown by a single cell.
    pub fn glyph(&self, cell: CellIndex) -> Glyph {
        self.digits()[cell.as_usize()]
    }

    /// The display time one minute later, wrapping at midnight.
    pub fn next_minute(&self) -> DisplayTime {
        let (hour, minute) = if self.minute >= 59 {
            ((self.hour + 1) % 24, 0)
        } else {
            (self.hour, self.minute + 1)
        };
        DisplayTime::new(hour, minute, self.format)
    }

    /// AM/PM badge, shown in 12-hour mode only while the hour-tens digit is blank.
    pub fn meridiem_badge(&self) -> Option<Meridiem> {
        if self.format.is_24h() || self.display_hour() >= 10 {
            return None;
        }
        Some(if self.hour >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        })
    }
}

/// Turn a 0-23 hour into the hour actually displayed.
pub fn display_hour(hour: u8, format: HourFormat) -> u8 {
    if format.is_24h() {
        return hour;
    }

    // Converts "0" to "12"
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(year: u16, day_of_year: u16, hour: u8, minute: u8, second: u8) -> WallTick {
        WallTick {
            year,
            month: 1,
            day_of_month: 1,
            day_of_year,
            weekday: 0,
            hour,
            minute,
            second,
            format: HourFormat::TwentyFourHour,
        }
    }

    #[test]
    fn twelve_hour_display_hour_wraps_midnight_and_noon() {
        assert_eq!(display_hour(0, HourFormat::TwelveHour), 12);
        assert_eq!(display_hour(12, HourFormat::TwelveHour), 12);
        assert_eq!(display_hour(13, HourFormat::TwelveHour), 1);
        assert_eq!(display_hour(23, HourFormat::TwelveHour), 11);
        assert_eq!(display_hour(0, HourFormat::TwentyFourHour), 0);
        assert_eq!(display_hour(23, HourFormat::TwentyFourHour), 23);
    }

    #[test]
    fn hour_tens_is_blank_only_for_single_digit_twelve_hour() {
        let t = DisplayTime::new(9, 5, HourFormat::TwelveHour);
        assert_eq!(
            t.digits(),
            [Glyph::Blank, Glyph::Digit(9), Glyph::Digit(0), Glyph::Digit(5)]
        );

        let t = DisplayTime::new(9, 5, HourFormat::TwentyFourHour);
        assert_eq!(t.digits()[0], Glyph::Digit(0));

        let t = DisplayTime::new(0, 0, HourFormat::TwelveHour);
        assert_eq!(
            t.digits(),
            [Glyph::Digit(1), Glyph::Digit(2), Glyph::Digit(0), Glyph::Digit(0)]
        );
    }

    #[test]
    fn next_minute_rolls_hour_and_day() {
        let t = DisplayTime::new(10, 59, HourFormat::TwelveHour);
        assert_eq!(t.next_minute(), DisplayTime::new(11, 0, HourFormat::TwelveHour));

        let t = DisplayTime::new(23, 59, HourFormat::TwentyFourHour);
        assert_eq!(t.next_minute(), DisplayTime::new(0, 0, HourFormat::TwentyFourHour));

        let t = DisplayTime::new(7, 41, HourFormat::TwentyFourHour);
        assert_eq!(t.next_minute(), DisplayTime::new(7, 42, HourFormat::TwentyFourHour));
    }

    #[test]
    fn meridiem_badge_only_with_blank_hour_tens() {
        assert_eq!(
            DisplayTime::new(9, 0, HourFormat::TwelveHour).meridiem_badge(),
            Some(Meridiem::Am)
        );
        assert_eq!(
            DisplayTime::new(13, 0, HourFormat::TwelveHour).meridiem_badge(),
            Some(Meridiem::Pm)
        );
        assert_eq!(DisplayTime::new(11, 0, HourFormat::TwelveHour).meridiem_badge(), None);
        assert_eq!(DisplayTime::new(0, 30, HourFormat::TwelveHour).meridiem_badge(), None);
        assert_eq!(DisplayTime::new(9, 0, HourFormat::TwentyFourHour).meridiem_badge(), None);
    }

    #[test]
    fn follows_detects_contiguous_seconds() {
        assert!(tick(2026, 10, 8, 0, 1).follows(&tick(2026, 10, 8, 0, 0)));
        assert!(tick(2026, 10, 8, 1, 0).follows(&tick(2026, 10, 8, 0, 59)));
        assert!(!tick(2026, 10, 8, 0, 45).follows(&tick(2026, 10, 8, 0, 10)));
        assert!(!tick(2026, 10, 8, 0, 10).follows(&tick(2026, 10, 8, 0, 10)));
    }

    #[test]
    fn follows_crosses_midnight_and_new_year() {
        assert!(tick(2026, 11, 0, 0, 0).follows(&tick(2026, 10, 23, 59, 59)));
        assert!(tick(2027, 0, 0, 0, 0).follows(&tick(2026, 364, 23, 59, 59)));
        assert!(!tick(2026, 12, 0, 0, 0).follows(&tick(2026, 10, 23, 59, 59)));
        assert!(!tick(2026, 11, 0, 0, 1).follows(&tick(2026, 10, 23, 59, 59)));
    }

    #[test]
    fn same_instant_ignores_format() {
        let a = tick(2026, 5, 12, 0, 0);
        let mut b = a;
        b.format = HourFormat::TwelveHour;
        assert!(a.same_instant(&b));
        assert!(!a.same_instant(&tick(2026, 5, 12, 0, 1)));
    }
}
