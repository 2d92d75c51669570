//! One digit position of the time display.

use embedded_graphics::prelude::{Point, Transform};
use embedded_graphics::primitives::Rectangle;

use super::driver::{AnimationDriver, MotionHandle, MotionHost, MotionRequest};
use super::easing::Easing;
use super::{CellIndex, Glyph, Phase};
use crate::error::Error;

/// Where a cell is in its exit/enter cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CellState {
    /// Resting at the base frame.
    Visible,
    /// Sliding out towards the parked frame.
    Exiting,
    /// Resting below the clipped band, out of view.
    Parked,
    /// Sliding back up to the base frame.
    Entering,
}

/// A single digit: its glyph, its frames and its motion state.
#[derive(Clone, Debug)]
pub struct DigitCell {
    index: CellIndex,
    base_frame: Rectangle,
    glyph: Glyph,
    state: CellState,
    pending: Option<Glyph>,
}

impl DigitCell {
    /// A parked cell showing `0`, so the first tick slides it in.
    pub fn new(index: CellIndex, base_frame: Rectangle) -> Self {
        Self {
            index,
            base_frame,
            glyph: Glyph::Digit(0),
            state: CellState::Parked,
            pending: None,
        }
    }

    pub fn index(&self) -> CellIndex {
        self.index
    }

    pub fn glyph(&self) -> Glyph {
        self.glyph
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// Glyph waiting to be swapped in when the current exit finishes.
    pub fn pending(&self) -> Option<Glyph> {
        self.pending
    }

    /// `true` while the cell rests out of view.
    pub fn parked(&self) -> bool {
        self.state == CellState::Parked
    }

    pub fn base_frame(&self) -> Rectangle {
        self.base_frame
    }

    /// The base frame pushed down by its own height.
    pub fn parked_frame(&self) -> Rectangle {
        let drop = self.base_frame.size.height as i32;
        self.base_frame.translate(Point::new(0, drop))
    }

    /// Push the current glyph and position to the host.
    pub fn mount<H: MotionHost + ?Sized>(&self, host: &mut H) {
        host.show_glyph(self.index, self.glyph);
        let frame = if self.parked() {
            self.parked_frame()
        } else {
            self.base_frame
        };
        host.place(self.index, frame);
    }

    /// Replace the cell's content.
    ///
    /// A parked cell switches glyph immediately. An exiting cell keeps
    /// showing the old glyph until it is out of view.
    ///
    /// # Panics
    ///
    /// If the cell is visible or entering.
    pub fn set_value<H: MotionHost + ?Sized>(&mut self, host: &mut H, glyph: Glyph) {
        assert!(
            matches!(self.state, CellState::Parked | CellState::Exiting),
            "set_value on a cell that is on screen"
        );

        match self.state {
            CellState::Exiting => self.pending = Some(glyph),
            _ => {
                self.pending = None;
                self.glyph = glyph;
                host.show_glyph(self.index, glyph);
            }
        }
    }

    /// Slide from the base frame to the parked frame.
    pub fn begin_exit<H: MotionHost + ?Sized>(
        &mut self,
        driver: &mut AnimationDriver,
        host: &mut H,
        duration_ms: u32,
        easing: Easing,
    ) -> Result<MotionHandle, Error> {
        let request = MotionRequest {
            cell: self.index,
            from: self.base_frame,
            to: self.parked_frame(),
            duration_ms,
            easing,
        };
        let handle = driver.play(host, &request, Phase::Exiting)?;
        self.state = CellState::Exiting;
        Ok(handle)
    }

    /// Slide from the parked frame back to the base frame.
    pub fn begin_enter<H: MotionHost + ?Sized>(
        &mut self,
        driver: &mut AnimationDriver,
        host: &mut H,
        duration_ms: u32,
        easing: Easing,
    ) -> Result<MotionHandle, Error> {
        debug_assert!(self.parked(), "begin_enter on a cell that is not parked");

        let request = MotionRequest {
            cell: self.index,
            from: self.parked_frame(),
            to: self.base_frame,
            duration_ms,
            easing,
        };
        let handle = driver.play(host, &request, Phase::Entering)?;
        self.state = CellState::Entering;
        Ok(handle)
    }

    /// A motion in `phase` ran to its end.
    pub fn finish<H: MotionHost + ?Sized>(&mut self, host: &mut H, phase: Phase) {
        match phase {
            Phase::Exiting => self.settle_parked(host),
            Phase::Entering => self.state = CellState::Visible,
        }
    }

    /// A motion in `phase` was cancelled; snap to where it was heading.
    pub fn interrupt<H: MotionHost + ?Sized>(&mut self, host: &mut H, phase: Phase) {
        match phase {
            Phase::Exiting => {
                host.place(self.index, self.parked_frame());
                self.settle_parked(host);
            }
            Phase::Entering => {
                host.place(self.index, self.base_frame);
                self.state = CellState::Visible;
            }
        }
    }

    /// Draw `glyph` at the base frame with no motion at all.
    pub fn redraw_static<H: MotionHost + ?Sized>(&mut self, host: &mut H, glyph: Glyph) {
        self.glyph = glyph;
        self.pending = None;
        self.state = CellState::Visible;
        host.show_glyph(self.index, glyph);
        host.place(self.index, self.base_frame);
    }

    fn settle_parked<H: MotionHost + ?Sized>(&mut self, host: &mut H) {
        self.state = CellState::Parked;
        if let Some(glyph) = self.pending.take() {
            self.glyph = glyph;
            host.show_glyph(self.index, glyph);
        }
    }
}
