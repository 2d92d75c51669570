//! Animation driver - owns the live host motion of every digit cell.
//!
//! The host hands out a [`MotionHandle`] per started motion.  The driver
//! keeps at most one per cell; starting a new motion on a busy cell cancels
//! the old one first, and a completion is reported exactly once.

use embedded_graphics::primitives::Rectangle;

use super::easing::Easing;
use super::{CellIndex, Glyph, Phase};
use crate::error::Error;

/// Opaque token for one host motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionHandle(pub u32);

/// Parameters of one frame-to-frame motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionRequest {
    pub cell: CellIndex,
    pub from: Rectangle,
    pub to: Rectangle,
    pub duration_ms: u32,
    pub easing: Easing,
}

/// Drawing and motion primitives provided by the platform.
pub trait MotionHost {
    /// Start moving `request.cell` from `request.from` to `request.to`.
    ///
    /// Must not block. The host reports the end of the motion later by
    /// handing the returned handle back to the face.
    fn start_motion(&mut self, request: &MotionRequest) -> Result<MotionHandle, Error>;

    /// Stop a motion and release its handle. No completion follows.
    fn cancel_motion(&mut self, handle: MotionHandle);

    /// Change the glyph drawn in a cell.
    fn show_glyph(&mut self, cell: CellIndex, glyph: Glyph);

    /// Move a cell to `frame` without animating.
    fn place(&mut self, cell: CellIndex, frame: Rectangle);
}

/// A finished motion, routed back to its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Completion {
    pub cell: CellIndex,
    pub phase: Phase,
}

#[derive(Clone, Copy, Debug)]
struct ActiveMotion {
    handle: MotionHandle,
    phase: Phase,
}

/// One motion slot per cell.
pub struct AnimationDriver {
    active: [Option<ActiveMotion>; 4],
}

impl AnimationDriver {
    pub const fn new() -> Self {
        Self { active: [None; 4] }
    }

    /// Start `request`, replacing whatever the cell was doing.
    pub fn play<H: MotionHost + ?Sized>(
        &mut self,
        host: &mut H,
        request: &MotionRequest,
        phase: Phase,
    ) -> Result<MotionHandle, Error> {
        let slot = request.cell.as_usize();
        if let Some(old) = self.active[slot].take() {
            host.cancel_motion(old.handle);
        }

        let handle = host.start_motion(request)?;
        self.active[slot] = Some(ActiveMotion { handle, phase });
        Ok(handle)
    }

    /// Resolve a finished host motion.
    ///
    /// Returns `None` for handles that were cancelled, replaced or already
    /// completed.
    pub fn complete(&mut self, handle: MotionHandle) -> Option<Completion> {
        CellIndex::ALL.into_iter().find_map(|cell| {
            let slot = &mut self.active[cell.as_usize()];
            match slot {
                Some(motion) if motion.handle == handle => {
                    let phase = motion.phase;
                    *slot = None;
                    Some(Completion { cell, phase })
                }
                _ => None,
            }
        })
    }

    /// Cancel one cell's motion, returning the phase it was in.
    pub fn cancel<H: MotionHost + ?Sized>(&mut self, host: &mut H, cell: CellIndex) -> Option<Phase> {
        let motion = self.active[cell.as_usize()].take()?;
        host.cancel_motion(motion.handle);
        Some(motion.phase)
    }

    /// Cancel everything. Indexed by cell; `None` where nothing was running.
    pub fn cancel_all<H: MotionHost + ?Sized>(&mut self, host: &mut H) -> [Option<Phase>; 4] {
        let mut interrupted = [None; 4];
        for cell in CellIndex::ALL {
            interrupted[cell.as_usize()] = self.cancel(host, cell);
        }
        interrupted
    }

    pub fn is_busy(&self, cell: CellIndex) -> bool {
        self.active[cell.as_usize()].is_some()
    }

    /// Number of motions currently in flight.
    pub fn live_count(&self) -> usize {
        self.active.iter().filter(|m| m.is_some()).count()
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}
