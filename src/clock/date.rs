//! Date label ("Sun, 18th Oct") and its once-per-day memoization.

use core::fmt::Write;

use heapless::String;

use super::locale::Locale;
use super::WallTick;

/// Longest label: 4-byte weekday + ", " + "31st" + " " + 5-byte month.
pub const DATE_LABEL_CAPACITY: usize = 24;

/// Rendered date label.
pub type DateLabel = String<DATE_LABEL_CAPACITY>;

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: u8) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

/// Render the date label for `tick`.
pub fn format_date(tick: &WallTick, locale: Locale) -> DateLabel {
    let mut label = DateLabel::new();
    // Capacity covers the longest name in every table.
    let _ = write!(
        &mut label,
        "{}, {}{} {}",
        locale.weekday_abbr(tick.weekday),
        tick.day_of_month,
        ordinal_suffix(tick.day_of_month),
        locale.month_abbr(tick.month)
    );
    label
}

/// Caches the date label so it is only rebuilt when the day changes.
pub struct DateMemo {
    day_key: Option<u32>,
    locale: Locale,
    label: DateLabel,
}

impl DateMemo {
    pub const fn new(locale: Locale) -> Self {
        Self {
            day_key: None,
            locale,
            label: String::new(),
        }
    }

    /// Rebuild the label if `tick` falls on a different day than the last
    /// rebuild. Returns the new label only when it was rebuilt.
    pub fn refresh(&mut self, tick: &WallTick) -> Option<&str> {
        let key = tick.day_key();
        if self.day_key == Some(key) {
            return None;
        }
        self.day_key = Some(key);
        self.label = format_date(tick, self.locale);
        Some(self.label.as_str())
    }

    /// Switch locale; the next refresh rebuilds the label.
    pub fn set_locale(&mut self, locale: Locale) {
        if locale != self.locale {
            self.locale = locale;
            self.day_key = None;
        }
    }

    /// Last rendered label (empty before the first refresh).
    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}
