//! Deliver event batches to the pen and touch device files.
//!
//! Events are grouped into reports: everything up to and including a
//! SYN_REPORT is written in one go, after the pacing delay for that write.
//! A trailing run without a SYN_REPORT is never flushed.

use std::thread;
use std::time::Duration;

use evdevil::event::InputEvent;
use evdevil::Evdev;

use crate::event::is_report;
use crate::probe::DeviceRole;

/// Which pacing delay precedes a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Taps, lifts, eraser strokes and straight shape edges.
    Report,
    /// Plain `pen move` interpolation.
    Stroke,
    /// `fastpen` moves and traced arcs/curves.
    Fast,
}

/// Delay slept before each report, per pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub report: Duration,
    pub stroke: Duration,
    pub fast: Duration,
}

impl Pacing {
    pub const ZERO: Pacing = Pacing {
        report: Duration::ZERO,
        stroke: Duration::ZERO,
        fast: Duration::ZERO,
    };

    pub fn delay(&self, pace: Pace) -> Duration {
        match pace {
            Pace::Report => self.report,
            Pace::Stroke => self.stroke,
            Pace::Fast => self.fast,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            report: Duration::from_micros(1000),
            stroke: Duration::from_micros(10),
            fast: Duration::from_micros(2),
        }
    }
}

/// Destination for complete reports.
pub trait EventSink {
    /// Deliver one report (ending in SYN_REPORT) to the device bound to `role`.
    /// Missing devices and write failures are swallowed.
    fn submit(&mut self, role: DeviceRole, report: &[InputEvent], pace: Pace);

    /// Suspend the session (the `sleep` command).
    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Split `events` at report markers and submit each batch.
pub fn write_events<S: EventSink + ?Sized>(
    sink: &mut S,
    role: DeviceRole,
    events: &[InputEvent],
    pace: Pace,
) {
    let mut start = 0;
    for (i, ev) in events.iter().enumerate() {
        if is_report(ev) {
            sink.submit(role, &events[start..=i], pace);
            start = i + 1;
        }
    }
    if start < events.len() {
        log::trace!("dropping {} events without a report marker", events.len() - start);
    }
}

/// An opened evdev node and the role its capabilities were probed as.
pub struct DeviceBinding {
    pub path: String,
    pub role: DeviceRole,
    pub evdev: Evdev,
}

/// The real sink: one evdev handle per role plus the pacing delays.
pub struct Devices {
    pen: Option<DeviceBinding>,
    touch: Option<DeviceBinding>,
    pacing: Pacing,
}

impl Devices {
    pub fn new(bindings: Vec<DeviceBinding>, pacing: Pacing) -> Self {
        let mut devices = Self {
            pen: None,
            touch: None,
            pacing,
        };
        for binding in bindings {
            match binding.role {
                DeviceRole::Pen => devices.pen = Some(binding),
                DeviceRole::Touch => devices.touch = Some(binding),
                DeviceRole::Unrecognized => {}
            }
        }
        devices
    }

    pub fn is_bound(&self, role: DeviceRole) -> bool {
        match role {
            DeviceRole::Pen => self.pen.is_some(),
            DeviceRole::Touch => self.touch.is_some(),
            DeviceRole::Unrecognized => false,
        }
    }
}

impl EventSink for Devices {
    fn submit(&mut self, role: DeviceRole, report: &[InputEvent], pace: Pace) {
        let binding = match role {
            DeviceRole::Pen => self.pen.as_mut(),
            DeviceRole::Touch => self.touch.as_mut(),
            DeviceRole::Unrecognized => None,
        };
        let Some(binding) = binding else { return };

        let delay = self.pacing.delay(pace);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        if let Err(e) = binding.evdev.write_events(report) {
            log::trace!("write to {} failed: {}", binding.path, e);
        }
    }
}
