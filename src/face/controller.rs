//! Clock face controller - owns the cells, the driver and the scheduler
//! for the lifetime of an active face.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use super::cell::DigitCell;
use super::driver::{AnimationDriver, Completion, MotionHandle, MotionHost};
use super::easing::Easing;
use super::scheduler::{PendingTransition, TickKind, TransitionScheduler};
use super::{CellIndex, Glyph, Phase};
use crate::clock::date::DateMemo;
use crate::clock::locale::Locale;
use crate::clock::{Meridiem, WallTick};
use crate::config::{DIGIT_WIDTH, DIGIT_X, TIME_BAND_HEIGHT};
use crate::error::Error;

/// Everything the face needs from the platform beyond digit motions.
pub trait FaceHost: MotionHost {
    /// Replace the date label.
    fn show_date(&mut self, label: &str);

    /// Show or hide the AM/PM badge.
    fn show_meridiem(&mut self, badge: Option<Meridiem>);
}

/// Base frame of every digit cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceLayout {
    frames: [Rectangle; 4],
}

impl FaceLayout {
    pub const fn new(frames: [Rectangle; 4]) -> Self {
        Self { frames }
    }

    /// Four digits across the top band of the panel.
    pub fn standard() -> Self {
        let size = Size::new(DIGIT_WIDTH, TIME_BAND_HEIGHT);
        Self::new(DIGIT_X.map(|x| Rectangle::new(Point::new(x, 0), size)))
    }

    pub fn frame(&self, cell: CellIndex) -> Rectangle {
        self.frames[cell.as_usize()]
    }
}

impl Default for FaceLayout {
    fn default() -> Self {
        Self::standard()
    }
}

/// What a tick did, for logging.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub kind: TickKind,
    /// Motions started on this tick.
    pub issued: Vec<PendingTransition, 4>,
    /// Cells whose motion could not be started; redrawn next tick.
    pub stalled: Vec<CellIndex, 4>,
    /// Previously stalled cells redrawn without animation.
    pub recovered: Vec<CellIndex, 4>,
    /// Motions cancelled by a discontinuity.
    pub interrupted: u8,
    pub date_changed: bool,
}

impl TickReport {
    fn new(kind: TickKind) -> Self {
        Self {
            kind,
            issued: Vec::new(),
            stalled: Vec::new(),
            recovered: Vec::new(),
            interrupted: 0,
            date_changed: false,
        }
    }
}

pub struct ClockFace<H: FaceHost> {
    host: H,
    cells: [DigitCell; 4],
    driver: AnimationDriver,
    scheduler: TransitionScheduler,
    date: DateMemo,
    meridiem: Option<Option<Meridiem>>,
    stalled: [bool; 4],
    active: bool,
}

impl<H: FaceHost> ClockFace<H> {
    /// Build four parked cells and put them on the host.
    pub fn activate(mut host: H, layout: FaceLayout, locale: Locale) -> Self {
        let cells = CellIndex::ALL.map(|index| DigitCell::new(index, layout.frame(index)));
        for cell in &cells {
            cell.mount(&mut host);
        }

        Self {
            host,
            cells,
            driver: AnimationDriver::new(),
            scheduler: TransitionScheduler::new(),
            date: DateMemo::new(locale),
            meridiem: None,
            stalled: [false; 4],
            active: true,
        }
    }

    /// Advance the face by one second of wall time.
    pub fn on_tick(&mut self, tick: &WallTick) -> TickReport {
        let kind = self.scheduler.classify(tick);
        let mut report = TickReport::new(kind);
        if !self.active || kind == TickKind::Duplicate {
            return report;
        }

        if kind == TickKind::Discontinuous {
            report.interrupted = self.settle_all();
        }

        let display = tick.display_time();
        for index in CellIndex::ALL {
            let slot = index.as_usize();
            if !self.stalled[slot] {
                continue;
            }
            self.stalled[slot] = false;
            self.driver.cancel(&mut self.host, index);
            self.cells[slot].redraw_static(&mut self.host, display.glyph(index));
            let _ = report.recovered.push(index);
        }

        let plan = self.scheduler.plan(tick, kind, &self.cells);
        for transition in plan {
            match self.apply(&transition) {
                Ok(()) => {
                    let _ = report.issued.push(transition);
                }
                Err(_) => {
                    self.stalled[transition.cell.as_usize()] = true;
                    let _ = report.stalled.push(transition.cell);
                }
            }
        }

        if let Some(label) = self.date.refresh(tick) {
            self.host.show_date(label);
            report.date_changed = true;
        }

        let badge = display.meridiem_badge();
        if self.meridiem != Some(badge) {
            self.host.show_meridiem(badge);
            self.meridiem = Some(badge);
        }

        report
    }

    /// Route a finished host motion to its cell.
    pub fn on_motion_complete(&mut self, handle: MotionHandle) -> Option<Completion> {
        let completion = self.driver.complete(handle)?;
        self.cells[completion.cell.as_usize()].finish(&mut self.host, completion.phase);
        Some(completion)
    }

    /// Cancel every motion. Safe to call more than once.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.driver.cancel_all(&mut self.host);
        self.active = false;
    }

    /// Switch the date label language; shown from the next tick.
    pub fn set_locale(&mut self, locale: Locale) {
        self.date.set_locale(locale);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `true` while no motion is in flight.
    pub fn is_idle(&self) -> bool {
        self.driver.live_count() == 0
    }

    pub fn cell(&self, index: CellIndex) -> &DigitCell {
        &self.cells[index.as_usize()]
    }

    /// Glyphs currently held by the cells, hour-tens first.
    pub fn displayed(&self) -> [Glyph; 4] {
        self.cells.each_ref().map(|c| c.glyph())
    }

    pub fn date_label(&self) -> &str {
        self.date.label()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn apply(&mut self, transition: &PendingTransition) -> Result<(), Error> {
        let cell = &mut self.cells[transition.cell.as_usize()];
        match transition.phase {
            Phase::Exiting => {
                cell.begin_exit(
                    &mut self.driver,
                    &mut self.host,
                    transition.duration_ms,
                    Easing::EaseIn,
                )?;
                cell.set_value(&mut self.host, transition.target);
            }
            Phase::Entering => {
                cell.set_value(&mut self.host, transition.target);
                cell.begin_enter(
                    &mut self.driver,
                    &mut self.host,
                    transition.duration_ms,
                    Easing::EaseIn,
                )?;
            }
        }
        Ok(())
    }

    /// Cancel everything in flight and snap each cell to its destination.
    fn settle_all(&mut self) -> u8 {
        let interrupted = self.driver.cancel_all(&mut self.host);
        let mut count = 0;
        for index in CellIndex::ALL {
            if let Some(phase) = interrupted[index.as_usize()] {
                self.cells[index.as_usize()].interrupt(&mut self.host, phase);
                count += 1;
            }
        }
        count
    }
}

impl<H: FaceHost> Drop for ClockFace<H> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
