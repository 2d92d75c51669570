//! Battery icon and low-charge alerts.

use super::Haptic;
use crate::config::{
    BATTERY_DIVIDER, BATTERY_EMPTY_MV, BATTERY_FULL_MV, SAADC_FULL_SCALE_MV, SAADC_MAX_COUNT,
};

/// Charge level below which the first alert fires.
pub const LOW_THRESHOLD: u8 = 20;

/// Charge level below which the final alert fires.
pub const CRITICAL_THRESHOLD: u8 = 10;

/// One of the eleven battery glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryIcon {
    /// Upper bound of the bucket: 10, 20, ... 100.
    Level(u8),
    Charging,
}

impl BatteryIcon {
    /// Number of filled tenths drawn in the gauge.
    pub fn bars(self) -> u8 {
        match self {
            BatteryIcon::Level(level) => level / 10,
            BatteryIcon::Charging => 10,
        }
    }
}

/// One battery reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryReading {
    /// Charge, 0-100.
    pub percent: u8,
    pub charging: bool,
}

/// Result of feeding a reading to the monitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryUpdate {
    pub icon: BatteryIcon,
    pub haptic: Option<Haptic>,
}

/// Glyph for a reading: `<=10`, `<=20`, ... `<=100`, or charging.
pub fn battery_icon(reading: BatteryReading) -> BatteryIcon {
    if reading.charging {
        return BatteryIcon::Charging;
    }
    let percent = reading.percent.min(100);
    let bucket = ((percent + 9) / 10).max(1);
    BatteryIcon::Level(bucket * 10)
}

/// Linear charge estimate from the cell voltage.
pub fn percent_from_millivolts(mv: u32) -> u8 {
    if mv <= BATTERY_EMPTY_MV {
        return 0;
    }
    if mv >= BATTERY_FULL_MV {
        return 100;
    }
    ((mv - BATTERY_EMPTY_MV) * 100 / (BATTERY_FULL_MV - BATTERY_EMPTY_MV)) as u8
}

/// Cell voltage behind a raw SAADC sample taken through the divider.
///
/// Negative samples (input noise around ground) read as 0 mV.
pub fn millivolts_from_saadc(raw: i16) -> u32 {
    let counts = u32::try_from(raw).unwrap_or(0);
    counts * SAADC_FULL_SCALE_MV * BATTERY_DIVIDER / SAADC_MAX_COUNT
}

/// Tracks the previous reading to detect downward threshold crossings.
#[derive(Default)]
pub struct BatteryMonitor {
    last_percent: Option<u8>,
}

impl BatteryMonitor {
    pub const fn new() -> Self {
        Self { last_percent: None }
    }

    pub fn update(&mut self, reading: BatteryReading) -> BatteryUpdate {
        let previous = self.last_percent.replace(reading.percent);
        let haptic = match previous {
            Some(prev) if !reading.charging => crossing(prev, reading.percent),
            _ => None,
        };

        BatteryUpdate {
            icon: battery_icon(reading),
            haptic,
        }
    }

    pub fn last_percent(&self) -> Option<u8> {
        self.last_percent
    }
}

/// The deepest threshold passed going from `prev` down to `now`.
fn crossing(prev: u8, now: u8) -> Option<Haptic> {
    let crossed = |threshold: u8| prev >= threshold && now < threshold;
    if crossed(CRITICAL_THRESHOLD) {
        Some(Haptic::LongPulse)
    } else if crossed(LOW_THRESHOLD) {
        Some(Haptic::DoublePulse)
    } else {
        None
    }
}
