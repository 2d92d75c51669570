//! Companion link icon and the disconnect alert.

use super::Haptic;

/// Link glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkIcon {
    Connected,
    Disconnected,
}

impl From<bool> for LinkIcon {
    fn from(connected: bool) -> Self {
        if connected {
            LinkIcon::Connected
        } else {
            LinkIcon::Disconnected
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkUpdate {
    pub icon: LinkIcon,
    pub haptic: Option<Haptic>,
}

/// Follows the link state and decides when to buzz on a drop.
///
/// Nothing buzzes until [`ConnectionMonitor::mark_started`] has been called,
/// so the state reported while the face comes up is silent.
#[derive(Default)]
pub struct ConnectionMonitor {
    started: bool,
    connected: Option<bool>,
}

impl ConnectionMonitor {
    pub const fn new() -> Self {
        Self {
            started: false,
            connected: None,
        }
    }

    pub fn mark_started(&mut self) {
        self.started = true;
    }

    pub fn update(&mut self, connected: bool, vibrate_on_disconnect: bool) -> LinkUpdate {
        let was_connected = self.connected.replace(connected);
        let dropped = was_connected == Some(true) && !connected;

        LinkUpdate {
            icon: LinkIcon::from(connected),
            haptic: (dropped && self.started && vibrate_on_disconnect).then_some(Haptic::LongPulse),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnect_after_startup_buzzes() {
        let mut m = ConnectionMonitor::new();
        m.update(true, true);
        m.mark_started();

        let update = m.update(false, true);
        assert_eq!(update.icon, LinkIcon::Disconnected);
        assert_eq!(update.haptic, Some(Haptic::LongPulse));
    }

    #[test]
    fn startup_state_is_silent() {
        let mut m = ConnectionMonitor::new();
        m.update(true, true);
        assert_eq!(m.update(false, true).haptic, None);
    }

    #[test]
    fn disabled_setting_is_silent() {
        let mut m = ConnectionMonitor::new();
        m.mark_started();
        m.update(true, false);
        assert_eq!(m.update(false, false).haptic, None);
    }

    #[test]
    fn only_the_falling_edge_buzzes() {
        let mut m = ConnectionMonitor::new();
        m.mark_started();
        assert_eq!(m.update(false, true).haptic, None);
        assert_eq!(m.update(true, true).haptic, None);
        assert!(m.is_connected());
        assert_eq!(m.update(false, true).haptic, Some(Haptic::LongPulse));
        assert_eq!(m.update(false, true).haptic, None);
    }
}
