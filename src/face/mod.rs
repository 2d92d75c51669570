//! Digit transition engine - the sliding four-digit time display.
//!
//! Once per second the [`scheduler`] decides which digits are about to
//! change; those [`cell`]s slide out of the clipped time band, swap their
//! glyph while hidden, and slide back in.  Durations are staggered so the
//! motion reads as a cascade rather than a simultaneous jump.
//!
//! ## Components
//!
//! - **Digit cell**: one digit's glyph, frame and parked/visible state
//! - **Animation driver**: at most one live host motion per cell
//! - **Transition scheduler**: per-second exit/entry decisions
//! - **Controller**: owns all of the above for the face's lifetime
//!
//! The host (firmware stage or a test double) provides the motion
//! primitive through [`driver::MotionHost`].

pub mod cell;
pub mod controller;
pub mod driver;
pub mod easing;
pub mod scheduler;


/// Content of one digit cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Suppressed leading hour digit (12-hour mode, hours 1-9).
    Blank,
    /// A base-ten digit, 0-9.
    Digit(u8),
}

impl Glyph {
    /// The digit value, if any.
    pub fn digit(self) -> Option<u8> {
        match self {
            Glyph::Blank => None,
            Glyph::Digit(d) => Some(d),
        }
    }
}

/// The four digit positions, hour-tens first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CellIndex {
    HourTens = 0,
    HourUnits = 1,
    MinuteTens = 2,
    MinuteUnits = 3,
}

impl CellIndex {
    /// All cells in screen order.
    pub const ALL: [CellIndex; 4] = [
        CellIndex::HourTens,
        CellIndex::HourUnits,
        CellIndex::MinuteTens,
        CellIndex::MinuteUnits,
    ];

    pub fn as_usize(self) -> usize {
        self as usize
    }

    /// Distance from the minute-units cell (0 for minute-units, 3 for hour-tens).
    pub fn distance(self) -> u8 {
        3 - self as u8
    }

    /// Inverse of [`CellIndex::distance`].
    pub fn from_distance(distance: u8) -> Option<CellIndex> {
        match distance {
            0 => Some(CellIndex::MinuteUnits),
            1 => Some(CellIndex::MinuteTens),
            2 => Some(CellIndex::HourUnits),
            3 => Some(CellIndex::HourTens),
            _ => None,
        }
    }
}

/// Direction of a digit motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Sliding from the base frame down out of view.
    Exiting,
    /// Sliding from the parked frame back up to the base frame.
    Entering,
}
