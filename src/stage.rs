//! Frame-based motion host for the clock face.
//!
//! Holds what the face asked to show (glyphs, cell frames, date, badge)
//! and runs digit motions on embassy time.  The face task calls
//! [`Stage::advance`] once per frame and hands finished handles back to
//! the face; the display module reads the stage to draw.

use defmt::{debug, warn};
use embassy_time::Instant;
use embedded_graphics::primitives::Rectangle;
use heapless::{String, Vec};

use slideface::clock::date::DATE_LABEL_CAPACITY;
use slideface::clock::Meridiem;
use slideface::face::controller::{FaceHost, FaceLayout};
use slideface::face::driver::{MotionHandle, MotionHost, MotionRequest};
use slideface::face::easing::{interpolate, progress};
use slideface::face::{CellIndex, Glyph};
use slideface::Error;

struct Motion {
    handle: MotionHandle,
    request: MotionRequest,
    started: Instant,
}

/// One digit as currently drawn.
#[derive(Clone, Copy)]
pub struct Sprite {
    pub glyph: Glyph,
    pub frame: Rectangle,
}

pub struct Stage {
    sprites: [Sprite; 4],
    motions: [Option<Motion>; 4],
    next_handle: u32,
    date: String<DATE_LABEL_CAPACITY>,
    meridiem: Option<Meridiem>,
    dirty: bool,
}

impl Stage {
    pub fn new(layout: &FaceLayout) -> Self {
        Self {
            sprites: CellIndex::ALL.map(|cell| Sprite {
                glyph: Glyph::Blank,
                frame: layout.frame(cell),
            }),
            motions: [None, None, None, None],
            next_handle: 0,
            date: String::new(),
            meridiem: None,
            dirty: true,
        }
    }

    /// Move every running motion to its position at `now`.
    ///
    /// Returns the handles of motions that reached their end frame; those
    /// slots are free again.
    pub fn advance(&mut self, now: Instant) -> Vec<MotionHandle, 4> {
        let mut finished = Vec::new();
        for (sprite, slot) in self.sprites.iter_mut().zip(self.motions.iter_mut()) {
            let Some(motion) = slot else { continue };

            let elapsed = now.saturating_duration_since(motion.started).as_millis();
            let r = &motion.request;
            let eased = r.easing.apply(progress(elapsed, r.duration_ms));
            sprite.frame = interpolate(r.from, r.to, eased);
            self.dirty = true;

            if elapsed >= u64::from(r.duration_ms) {
                let _ = finished.push(motion.handle);
                *slot = None;
            }
        }
        finished
    }

    pub fn is_animating(&self) -> bool {
        self.motions.iter().any(Option::is_some)
    }

    pub fn sprites(&self) -> &[Sprite; 4] {
        &self.sprites
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn meridiem(&self) -> Option<Meridiem> {
        self.meridiem
    }

    /// `true` once if anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    /// Force a redraw on the next frame.
    pub fn touch(&mut self) {
        self.dirty = true;
    }
}

impl MotionHost for Stage {
    fn start_motion(&mut self, request: &MotionRequest) -> Result<MotionHandle, Error> {
        let slot = &mut self.motions[request.cell.as_usize()];
        if slot.is_some() {
            warn!("cell {} already moving", request.cell);
            return Err(Error::MotionUnavailable);
        }

        self.next_handle = self.next_handle.wrapping_add(1);
        let handle = MotionHandle(self.next_handle);
        *slot = Some(Motion {
            handle,
            request: *request,
            started: Instant::now(),
        });
        self.sprites[request.cell.as_usize()].frame = request.from;
        self.dirty = true;
        debug!("motion {} on {} for {} ms", handle, request.cell, request.duration_ms);
        Ok(handle)
    }

    fn cancel_motion(&mut self, handle: MotionHandle) {
        for slot in self.motions.iter_mut() {
            if slot.as_ref().is_some_and(|m| m.handle == handle) {
                *slot = None;
            }
        }
    }

    fn show_glyph(&mut self, cell: CellIndex, glyph: Glyph) {
        self.sprites[cell.as_usize()].glyph = glyph;
        self.dirty = true;
    }

    fn place(&mut self, cell: CellIndex, frame: Rectangle) {
        self.sprites[cell.as_usize()].frame = frame;
        self.dirty = true;
    }
}

impl FaceHost for Stage {
    fn show_date(&mut self, label: &str) {
        self.date.clear();
        let _ = self.date.push_str(label);
        self.dirty = true;
    }

    fn show_meridiem(&mut self, badge: Option<Meridiem>) {
        self.meridiem = badge;
        self.dirty = true;
    }
}
