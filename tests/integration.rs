//! Integration tests for slideface host-testable logic.
//!
//! Drives the face through its public API the way the firmware does:
//! companion writes seed the clock, a once-per-second tick feeds the face,
//! and the host reports motion completions back.

use embedded_graphics::primitives::Rectangle;

use slideface::clock::calendar::WallClock;
use slideface::clock::locale::Locale;
use slideface::clock::{HourFormat, Meridiem};
use slideface::face::cell::CellState;
use slideface::face::controller::{ClockFace, FaceHost, FaceLayout};
use slideface::face::driver::{MotionHandle, MotionHost, MotionRequest};
use slideface::face::easing::{interpolate, progress, Easing};
use slideface::face::scheduler::TickKind;
use slideface::face::{CellIndex, Glyph, Phase};
use slideface::settings::Settings;
use slideface::status::battery::{BatteryIcon, BatteryMonitor, BatteryReading};
use slideface::status::connection::{ConnectionMonitor, LinkIcon};
use slideface::status::Haptic;
use slideface::sync::tuple::decode;
use slideface::sync::SyncMessage;
use slideface::Error;

/// A motion the stub display is running.
struct Running {
    handle: MotionHandle,
    request: MotionRequest,
    elapsed_ms: u32,
}

/// Stub display that advances motions on a simulated millisecond clock.
#[derive(Default)]
struct StubDisplay {
    next: u32,
    running: Vec<Running>,
    frames: [Option<Rectangle>; 4],
    glyphs: [Option<Glyph>; 4],
    date: String,
    meridiem: Option<Meridiem>,
    starts: usize,
    cancels: usize,
}

impl StubDisplay {
    /// Advance every motion by `ms`, returning the handles that finished.
    fn advance(&mut self, ms: u32) -> Vec<MotionHandle> {
        let mut done = Vec::new();
        for motion in &mut self.running {
            motion.elapsed_ms += ms;
            let r = &motion.request;
            let eased = r.easing.apply(progress(u64::from(motion.elapsed_ms), r.duration_ms));
            self.frames[r.cell.as_usize()] = Some(interpolate(r.from, r.to, eased));
            if motion.elapsed_ms >= r.duration_ms {
                done.push(motion.handle);
            }
        }
        self.running.retain(|m| !done.contains(&m.handle));
        done
    }
}

impl MotionHost for StubDisplay {
    fn start_motion(&mut self, request: &MotionRequest) -> Result<MotionHandle, Error> {
        self.next += 1;
        self.starts += 1;
        let handle = MotionHandle(self.next);
        self.frames[request.cell.as_usize()] = Some(request.from);
        self.running.push(Running {
            handle,
            request: *request,
            elapsed_ms: 0,
        });
        Ok(handle)
    }

    fn cancel_motion(&mut self, handle: MotionHandle) {
        self.cancels += 1;
        self.running.retain(|m| m.handle != handle);
    }

    fn show_glyph(&mut self, cell: CellIndex, glyph: Glyph) {
        self.glyphs[cell.as_usize()] = Some(glyph);
    }

    fn place(&mut self, cell: CellIndex, frame: Rectangle) {
        self.frames[cell.as_usize()] = Some(frame);
    }
}

impl FaceHost for StubDisplay {
    fn show_date(&mut self, label: &str) {
        self.date = label.to_string();
    }

    fn show_meridiem(&mut self, badge: Option<Meridiem>) {
        self.meridiem = badge;
    }
}

/// One simulated second: tick, then run frames until the next tick.
fn second(face: &mut ClockFace<StubDisplay>, clock: &mut WallClock) -> TickKind {
    let report = face.on_tick(&clock.tick());
    for _ in 0..30 {
        let done = face.host_mut().advance(33);
        for handle in done {
            face.on_motion_complete(handle);
        }
    }
    clock.advance(1);
    report.kind
}

fn seeded_clock(write: &[u8], settings: &mut Settings) -> WallClock {
    let mut clock = None;
    for message in decode(write).unwrap() {
        settings.apply(&message);
        if let SyncMessage::SetTime {
            unix_secs,
            utc_offset_min,
        } = message
        {
            clock = Some(WallClock::from_unix(unix_secs, utc_offset_min, settings.hour_format));
        }
    }
    clock.expect("write carried a SetTime record")
}

#[test]
fn companion_time_drives_a_full_rollover() {
    // SetTime 2026-10-18 09:59:50 UTC, offset 0, then 12-hour style.
    let unix = 1_792_317_590u32.to_le_bytes();
    let write = [
        0x07, 0x10, unix[0], unix[1], unix[2], unix[3], 0x00, 0x00, //
        0x02, 0x11, 0x00,
    ];
    let mut settings = Settings::default();
    let mut clock = seeded_clock(&write, &mut settings);

    let mut face = ClockFace::activate(StubDisplay::default(), FaceLayout::standard(), Locale::EnUs);
    assert_eq!(second(&mut face, &mut clock), TickKind::First);
    assert_eq!(face.host().date, "Sun, 18th Oct");
    assert_eq!(face.host().meridiem, Some(Meridiem::Am));

    for _ in 0..20 {
        assert_eq!(second(&mut face, &mut clock), TickKind::Contiguous);
    }

    // 10:00:10 - every digit has cycled and come back to rest.
    assert_eq!(
        face.displayed(),
        [Glyph::Digit(1), Glyph::Digit(0), Glyph::Digit(0), Glyph::Digit(0)]
    );
    assert!(face.is_idle());
    let layout = FaceLayout::standard();
    for c in CellIndex::ALL {
        assert_eq!(face.cell(c).state(), CellState::Visible);
        assert_eq!(face.host().frames[c.as_usize()], Some(layout.frame(c)));
    }
    assert_eq!(face.host().glyphs[0], Some(Glyph::Digit(1)));
    assert_eq!(face.host().meridiem, None);
    assert_eq!(face.host().cancels, 0);
}

#[test]
fn exit_cascade_finishes_inner_digit_last() {
    // 2026-10-18 09:59:50 UTC.
    let mut clock = WallClock::from_unix(1_792_317_590, 0, HourFormat::TwentyFourHour);
    let mut face = ClockFace::activate(StubDisplay::default(), FaceLayout::standard(), Locale::EnUs);
    for _ in 0..8 {
        second(&mut face, &mut clock);
    }

    // 09:59:58
    let report = face.on_tick(&clock.tick());
    assert!(report.issued.iter().all(|p| p.phase == Phase::Exiting));
    assert_eq!(report.issued.len(), 4);

    let mut order = Vec::new();
    for _ in 0..60 {
        for handle in face.host_mut().advance(33) {
            if let Some(done) = face.on_motion_complete(handle) {
                order.push(done.cell);
            }
        }
    }
    assert_eq!(
        order,
        [
            CellIndex::HourTens,
            CellIndex::HourUnits,
            CellIndex::MinuteTens,
            CellIndex::MinuteUnits
        ]
    );
}

#[test]
fn clock_jump_mid_animation_recovers() {
    let mut clock = WallClock::from_unix(1_792_317_590, 0, HourFormat::TwentyFourHour);
    let mut face = ClockFace::activate(StubDisplay::default(), FaceLayout::standard(), Locale::EnUs);
    for _ in 0..8 {
        second(&mut face, &mut clock);
    }

    // Start the 09:59:58 exits, then jump the clock to 10:25:08.
    face.on_tick(&clock.tick());
    face.host_mut().advance(500);
    clock.advance(25 * 60 + 10);
    assert_eq!(second(&mut face, &mut clock), TickKind::Discontinuous);
    assert_eq!(face.host().cancels, 4);

    second(&mut face, &mut clock);
    second(&mut face, &mut clock);
    assert_eq!(
        face.displayed(),
        [Glyph::Digit(1), Glyph::Digit(0), Glyph::Digit(2), Glyph::Digit(5)]
    );
    assert!(CellIndex::ALL.iter().all(|&c| face.cell(c).state() == CellState::Visible));
}

#[test]
fn teardown_leaves_no_running_motion() {
    let mut clock = WallClock::from_unix(1_792_317_590, 0, HourFormat::TwelveHour);
    let mut face = ClockFace::activate(StubDisplay::default(), FaceLayout::standard(), Locale::EnUs);
    face.on_tick(&clock.tick());
    clock.advance(1);
    assert_eq!(face.host().running.len(), 4);

    face.deactivate();
    assert!(face.host().running.is_empty());
    assert_eq!(face.host().starts, 4);
}

#[test]
fn status_pipeline_buzzes_on_real_transitions_only() {
    let mut battery = BatteryMonitor::new();
    let mut link = ConnectionMonitor::new();
    let settings = Settings {
        vibrate_on_disconnect: true,
        ..Settings::default()
    };

    let readings = [25, 24, 19, 15, 9, 30];
    let buzzes: Vec<Option<Haptic>> = readings
        .iter()
        .map(|&percent| {
            battery
                .update(BatteryReading {
                    percent,
                    charging: false,
                })
                .haptic
        })
        .collect();
    assert_eq!(
        buzzes,
        [None, None, Some(Haptic::DoublePulse), None, Some(Haptic::LongPulse), None]
    );

    link.update(true, settings.vibrate_on_disconnect);
    link.mark_started();
    let update = link.update(false, settings.vibrate_on_disconnect);
    assert_eq!(update.icon, LinkIcon::Disconnected);
    assert_eq!(update.haptic, Some(Haptic::LongPulse));

    let update = battery.update(BatteryReading {
        percent: 30,
        charging: true,
    });
    assert_eq!(update.icon, BatteryIcon::Charging);
}

#[test]
fn easing_drives_monotonic_frames() {
    let layout = FaceLayout::standard();
    let base = layout.frame(CellIndex::MinuteUnits);
    let mut parked = base;
    parked.top_left.y += base.size.height as i32;

    let mut last_y = base.top_left.y;
    for elapsed in (0..=1750).step_by(33) {
        let eased = Easing::EaseIn.apply(progress(elapsed, 1750));
        let frame = interpolate(base, parked, eased);
        assert!(frame.top_left.y >= last_y);
        last_y = frame.top_left.y;
    }
    assert_eq!(interpolate(base, parked, Easing::EaseIn.apply(progress(1750, 1750))), parked);
}
