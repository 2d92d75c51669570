//! Per-second transition decisions.
//!
//! At second [`EXIT_SECOND`] the digits that are about to change slide out
//! early so they can re-enter right as the minute turns over.  Every other
//! tick just brings parked cells back and repairs any cell whose glyph no
//! longer matches the time.

use heapless::Vec;

use super::cell::{CellState, DigitCell};
use super::{CellIndex, Glyph, Phase};
use crate::clock::{DisplayTime, WallTick};
use crate::config::{
    ENTER_BASE_MS, ENTER_STEP_MS, EXIT_BASE_MS, EXIT_SECOND, EXIT_STEP_MS, STARTUP_BASE_MS,
    STARTUP_STEP_MS,
};

/// How a tick relates to the one before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickKind {
    /// Nothing seen before.
    First,
    /// Exactly one second after the previous tick, same hour style.
    Contiguous,
    /// Same instant and style as the previous tick.
    Duplicate,
    /// Skipped or rewound time, or a changed hour style.
    Discontinuous,
}

/// One exit or entry the controller should start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingTransition {
    pub cell: CellIndex,
    pub target: Glyph,
    pub phase: Phase,
    pub duration_ms: u32,
}

/// Transitions for one tick, at most one per cell.
pub type Plan = Vec<PendingTransition, 4>;

/// The minute whose rollover is being waited for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ArmedBoundary {
    day_key: u32,
    hour: u8,
    minute: u8,
    depth: u8,
}

impl ArmedBoundary {
    fn covers(&self, tick: &WallTick) -> bool {
        self.day_key == tick.day_key() && self.hour == tick.hour && self.minute == tick.minute
    }
}

pub struct TransitionScheduler {
    last: Option<WallTick>,
    armed: Option<ArmedBoundary>,
}

impl TransitionScheduler {
    pub const fn new() -> Self {
        Self {
            last: None,
            armed: None,
        }
    }

    /// Compare `tick` with the previous one and remember it.
    pub fn classify(&mut self, tick: &WallTick) -> TickKind {
        let kind = match &self.last {
            None => TickKind::First,
            Some(prev) if prev.format != tick.format => TickKind::Discontinuous,
            Some(prev) if tick.same_instant(prev) => TickKind::Duplicate,
            Some(prev) if tick.follows(prev) => TickKind::Contiguous,
            Some(_) => TickKind::Discontinuous,
        };
        self.last = Some(*tick);
        kind
    }

    /// Number of cells in the current rollover window, 0 when none is armed.
    pub fn armed_depth(&self) -> u8 {
        self.armed.map_or(0, |b| b.depth)
    }

    /// Decide which cells start a motion on this tick.
    pub fn plan(&mut self, tick: &WallTick, kind: TickKind, cells: &[DigitCell; 4]) -> Plan {
        let mut plan = Plan::new();
        if kind == TickKind::Duplicate {
            return plan;
        }

        let display = tick.display_time();
        self.update_boundary(tick, kind, &display);

        let next = display.next_minute();
        let depth = self.armed_depth();

        for cell in cells {
            let index = cell.index();
            let held = index.distance() < depth;

            let transition = match cell.state() {
                CellState::Visible if held => Some((Phase::Exiting, next.glyph(index))),
                CellState::Visible if cell.glyph() != display.glyph(index) => {
                    Some((Phase::Exiting, display.glyph(index)))
                }
                CellState::Parked if !held => Some((Phase::Entering, display.glyph(index))),
                _ => None,
            };

            if let Some((phase, target)) = transition {
                let duration_ms = duration_for(index, phase, kind);
                // At most four cells, one entry each.
                let _ = plan.push(PendingTransition {
                    cell: index,
                    target,
                    phase,
                    duration_ms,
                });
            }
        }

        plan
    }

    fn update_boundary(&mut self, tick: &WallTick, kind: TickKind, display: &DisplayTime) {
        if matches!(kind, TickKind::First | TickKind::Discontinuous) {
            self.armed = None;
        }

        if let Some(boundary) = self.armed {
            if !boundary.covers(tick) {
                self.armed = None;
            }
        }

        if tick.second == EXIT_SECOND && kind != TickKind::First && self.armed.is_none() {
            self.armed = Some(ArmedBoundary {
                day_key: tick.day_key(),
                hour: tick.hour,
                minute: tick.minute,
                depth: boundary_depth(display),
            });
        }
    }
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// How many cells, counted from minute-units outward, change when the
/// minute rolls over.
pub fn boundary_depth(time: &DisplayTime) -> u8 {
    let now = time.digits();
    let next = time.next_minute().digits();

    CellIndex::ALL
        .into_iter()
        .find(|cell| now[cell.as_usize()] != next[cell.as_usize()])
        .map_or(0, |outermost| outermost.distance() + 1)
}

/// Motion length for a cell; the cascade is staggered by distance from
/// minute-units.
pub fn duration_for(cell: CellIndex, phase: Phase, kind: TickKind) -> u32 {
    let d = u32::from(cell.distance());
    match (phase, kind) {
        (Phase::Exiting, _) => EXIT_BASE_MS - d * EXIT_STEP_MS,
        (Phase::Entering, TickKind::First) => STARTUP_BASE_MS + d * STARTUP_STEP_MS,
        (Phase::Entering, _) => ENTER_BASE_MS + d * ENTER_STEP_MS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::HourFormat;

    fn depth(hour: u8, minute: u8, format: HourFormat) -> u8 {
        boundary_depth(&DisplayTime::new(hour, minute, format))
    }

    #[test]
    fn depth_one_for_ordinary_minute() {
        assert_eq!(depth(10, 14, HourFormat::TwelveHour), 1);
        assert_eq!(depth(10, 58, HourFormat::TwentyFourHour), 1);
    }

    #[test]
    fn depth_two_when_minute_tens_rolls() {
        assert_eq!(depth(10, 19, HourFormat::TwelveHour), 2);
        assert_eq!(depth(10, 49, HourFormat::TwentyFourHour), 2);
    }

    #[test]
    fn depth_three_on_the_hour() {
        assert_eq!(depth(10, 59, HourFormat::TwelveHour), 3);
        assert_eq!(depth(11, 59, HourFormat::TwelveHour), 3);
        assert_eq!(depth(23, 59, HourFormat::TwelveHour), 3);
        assert_eq!(depth(14, 59, HourFormat::TwentyFourHour), 3);
    }

    #[test]
    fn depth_four_when_hour_tens_changes() {
        assert_eq!(depth(9, 59, HourFormat::TwelveHour), 4);
        assert_eq!(depth(12, 59, HourFormat::TwelveHour), 4);
        assert_eq!(depth(21, 59, HourFormat::TwelveHour), 4);
        assert_eq!(depth(9, 59, HourFormat::TwentyFourHour), 4);
        assert_eq!(depth(19, 59, HourFormat::TwentyFourHour), 4);
        assert_eq!(depth(23, 59, HourFormat::TwentyFourHour), 4);
    }

    #[test]
    fn cascade_durations() {
        let exits = CellIndex::ALL.map(|c| duration_for(c, Phase::Exiting, TickKind::Contiguous));
        assert_eq!(exits, [1000, 1250, 1500, 1750]);

        let entries = CellIndex::ALL.map(|c| duration_for(c, Phase::Entering, TickKind::Contiguous));
        assert_eq!(entries, [1250, 1125, 1000, 875]);

        let startup = CellIndex::ALL.map(|c| duration_for(c, Phase::Entering, TickKind::First));
        assert_eq!(startup, [2000, 1600, 1200, 800]);
    }

    fn tick(hour: u8, minute: u8, second: u8) -> WallTick {
        WallTick {
            year: 2026,
            month: 10,
            day_of_month: 18,
            day_of_year: 290,
            weekday: 0,
            hour,
            minute,
            second,
            format: HourFormat::TwentyFourHour,
        }
    }

    #[test]
    fn classify_sequence() {
        let mut s = TransitionScheduler::new();
        assert_eq!(s.classify(&tick(8, 0, 0)), TickKind::First);
        assert_eq!(s.classify(&tick(8, 0, 1)), TickKind::Contiguous);
        assert_eq!(s.classify(&tick(8, 0, 1)), TickKind::Duplicate);
        assert_eq!(s.classify(&tick(8, 0, 30)), TickKind::Discontinuous);
        assert_eq!(s.classify(&tick(8, 0, 29)), TickKind::Discontinuous);

        let mut twelve = tick(8, 0, 29);
        twelve.format = HourFormat::TwelveHour;
        assert_eq!(s.classify(&twelve), TickKind::Discontinuous);
    }

    #[test]
    fn first_tick_at_exit_second_does_not_arm() {
        let mut s = TransitionScheduler::new();
        let cells = fresh_cells();
        let t = tick(8, 9, 58);
        let kind = s.classify(&t);
        let plan = s.plan(&t, kind, &cells);

        assert_eq!(s.armed_depth(), 0);
        assert_eq!(plan.len(), 4);
        assert!(plan.iter().all(|p| p.phase == Phase::Entering));
        assert_eq!(plan[3].target, Glyph::Digit(9));
    }

    #[test]
    fn duplicate_plans_nothing() {
        let mut s = TransitionScheduler::new();
        let cells = fresh_cells();
        let t = tick(8, 0, 5);
        s.classify(&t);
        let kind = s.classify(&t);
        assert!(s.plan(&t, kind, &cells).is_empty());
    }

    fn fresh_cells() -> [DigitCell; 4] {
        use embedded_graphics::prelude::{Point, Size};
        use embedded_graphics::primitives::Rectangle;
        CellIndex::ALL.map(|c| {
            DigitCell::new(
                c,
                Rectangle::new(Point::new(c.as_usize() as i32 * 30, 0), Size::new(24, 40)),
            )
        })
    }
}
