//! Easing curves and frame interpolation for host-side motions.
//!
//! Progress is carried in permille (0..=1000) so the firmware can
//! interpolate without floating point.

use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;

/// Full progress in permille.
pub const PROGRESS_MAX: u32 = 1000;

/// Timing curve of a motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Easing {
    Linear,
    /// Starts slow, ends fast. Used for every digit motion.
    #[default]
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map linear progress (permille) to eased progress (permille).
    pub fn apply(self, t: u32) -> u32 {
        let t = t.min(PROGRESS_MAX);
        let m = PROGRESS_MAX;
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t / m,
            Easing::EaseOut => m - (m - t) * (m - t) / m,
            Easing::EaseInOut => {
                if t < m / 2 {
                    2 * t * t / m
                } else {
                    let r = m - t;
                    m - 2 * r * r / m
                }
            }
        }
    }
}

/// Linear progress (permille) of a motion `elapsed_ms` into `duration_ms`.
pub fn progress(elapsed_ms: u64, duration_ms: u32) -> u32 {
    if duration_ms == 0 || elapsed_ms >= u64::from(duration_ms) {
        return PROGRESS_MAX;
    }
    (elapsed_ms * u64::from(PROGRESS_MAX) / u64::from(duration_ms)) as u32
}

/// Interpolate the top-left corner between two frames; the size is taken from `to`.
pub fn interpolate(from: Rectangle, to: Rectangle, eased: u32) -> Rectangle {
    let eased = eased.min(PROGRESS_MAX) as i32;
    let m = PROGRESS_MAX as i32;
    let lerp = |a: i32, b: i32| a + (b - a) * eased / m;
    Rectangle::new(
        Point::new(
            lerp(from.top_left.x, to.top_left.x),
            lerp(from.top_left.y, to.top_left.y),
        ),
        to.size,
    )
}
