//! Battery and link status: icon selection and haptic alerts.
//!
//! Both monitors are pure state machines fed by the firmware; they return
//! what to draw and whether the motor should buzz.

pub mod battery;
pub mod connection;

/// Vibration pattern requested by a status change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Haptic {
    /// Two short pulses.
    DoublePulse,
    /// One long pulse.
    LongPulse,
}
