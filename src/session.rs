//! The drawing session: owns the device sink and all pen/finger state, and
//! turns each protocol line into device reports.

use std::io::{self, BufRead};
use std::time::{SystemTime, UNIX_EPOCH};

use evdevil::event::InputEvent;

use crate::command::{self, Command, EraserAction, FingerAction, PenAction};
use crate::geometry::Point;
use crate::pen;
use crate::probe::DeviceRole;
use crate::sink::{write_events, EventSink, Pace};
use crate::touch::{self, FINGER_POINTS};
use crate::transform::Transform;

pub const DEFAULT_MOVE_POINTS: usize = 500;
pub const DEFAULT_PEN_PRESSURE: i32 = 4000;
pub const DEFAULT_ERASER_PRESSURE: i32 = 1700;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Point density for plain `pen move`.
    pub move_points: usize,
    pub pen_pressure: i32,
    pub eraser_pressure: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            move_points: DEFAULT_MOVE_POINTS,
            pen_pressure: DEFAULT_PEN_PRESSURE,
            eraser_pressure: DEFAULT_ERASER_PRESSURE,
        }
    }
}

/// Which end of the stylus is touching, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stylus {
    Up,
    Pen,
    Eraser,
}

pub struct Session<S: EventSink> {
    sink: S,
    transform: Transform,
    settings: Settings,
    pointer: Point,
    finger: Point,
    density: usize,
    touch_id_offset: i32,
    tracking_id: Option<i32>,
    stylus: Stylus,
    commands: u64,
}

impl<S: EventSink> Session<S> {
    pub fn new(sink: S, transform: Transform, settings: Settings) -> Self {
        Self {
            sink,
            transform,
            density: settings.move_points.max(1),
            settings,
            pointer: Point::default(),
            finger: Point::default(),
            touch_id_offset: 0,
            tracking_id: None,
            stylus: Stylus::Up,
            commands: 0,
        }
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Put both devices in a known "nothing touching" state.
    pub fn start(&mut self) {
        self.emit(DeviceRole::Touch, &touch::finger_up(), Pace::Report);
        self.emit(DeviceRole::Pen, &pen::pen_clear(), Pace::Report);
    }

    /// Read lines until end of input, executing each one to completion.
    pub fn run<R: BufRead>(&mut self, input: R) {
        for line in input.lines() {
            match line {
                Ok(line) => self.handle_line(&line),
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    log::debug!("Skipping unreadable line: {}", e);
                }
                Err(e) => {
                    log::warn!("Input closed: {}", e);
                    break;
                }
            }
        }
    }

    /// Lift pen and finger regardless of state and hand back the sink. A
    /// stylus left erasing is lifted as the eraser.
    pub fn finish(mut self) -> S {
        if let Some(id) = self.tracking_id {
            log::debug!("Releasing finger {} left down", id);
        }
        self.emit(DeviceRole::Touch, &touch::finger_up(), Pace::Report);

        let lift = match self.stylus {
            Stylus::Eraser => {
                log::debug!("Lifting eraser left down");
                pen::eraser_up()
            }
            Stylus::Pen => {
                log::debug!("Lifting pen left down");
                pen::pen_up()
            }
            Stylus::Up => pen::pen_up(),
        };
        self.emit(DeviceRole::Pen, &lift, Pace::Report);
        log::info!("Session finished after {} commands", self.commands);
        self.sink
    }

    pub fn handle_line(&mut self, line: &str) {
        match command::parse(line) {
            Some(cmd) => {
                self.commands += 1;
                self.execute(cmd);
            }
            None => log::trace!("ignored: {:?}", line),
        }
    }

    pub fn execute(&mut self, cmd: Command) {
        match cmd {
            Command::Pen(action, pace) => self.pen(action, pace),
            Command::Shape(shape) => self.draw(shape),
            Command::Eraser(action) => self.eraser(action),
            Command::Finger(action) => self.finger_action(action),
            Command::Sleep(duration) => self.sink.pause(duration),
        }
    }

    fn pen(&mut self, action: PenAction, pace: Pace) {
        match action {
            PenAction::Down(at) => self.pen_touch(at.unwrap_or(self.pointer)),
            PenAction::Move(to) => self.stroke_to(to.unwrap_or(self.pointer), pace),
            PenAction::Up => self.pen_lift(),
        }
    }

    fn eraser(&mut self, action: EraserAction) {
        match action {
            EraserAction::Down(at) => {
                let at = at.unwrap_or(self.pointer);
                let ev = pen::eraser_down(&self.transform, at, self.settings.eraser_pressure);
                self.emit(DeviceRole::Pen, &ev, Pace::Report);
                self.pointer = at;
                self.stylus = Stylus::Eraser;
            }
            EraserAction::Move(to) => {
                let to = to.unwrap_or(self.pointer);
                let reports = pen::eraser_move(
                    &self.transform,
                    self.pointer,
                    to,
                    self.settings.eraser_pressure,
                );
                self.emit_all(DeviceRole::Pen, reports, Pace::Report);
                self.pointer = to;
            }
            EraserAction::Up => {
                self.emit(DeviceRole::Pen, &pen::eraser_up(), Pace::Report);
                self.stylus = Stylus::Up;
            }
            EraserAction::On => {}
        }
    }

    fn finger_action(&mut self, action: FingerAction) {
        match action {
            FingerAction::Down(at) => {
                let at = at.unwrap_or(self.finger);
                let id = self.mint_tracking_id();
                let ev = touch::finger_down(&self.transform, at, id);
                self.emit(DeviceRole::Touch, &ev, Pace::Report);
                self.finger = at;
                self.tracking_id = Some(id);
            }
            FingerAction::Move(to) => {
                let to = to.unwrap_or(self.finger);
                let id = match self.tracking_id {
                    Some(id) => id,
                    None => self.mint_tracking_id(),
                };
                let ev = touch::finger_move(&self.transform, self.finger, to, id, FINGER_POINTS);
                self.emit(DeviceRole::Touch, &ev, Pace::Report);
                self.finger = to;
                self.tracking_id = Some(id);
            }
            FingerAction::Up => {
                self.emit(DeviceRole::Touch, &touch::finger_up(), Pace::Report);
                self.tracking_id = None;
            }
        }
    }

    /// Wall-clock seconds plus a running offset, kept non-negative.
    fn mint_tracking_id(&mut self) -> i32 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let id = (now as i32).wrapping_add(self.touch_id_offset) & i32::MAX;
        self.touch_id_offset = self.touch_id_offset.wrapping_add(1);
        id
    }

    pub(crate) fn emit(&mut self, role: DeviceRole, events: &[InputEvent], pace: Pace) {
        write_events(&mut self.sink, role, events, pace);
    }

    /// Submit reports one at a time as an iterator produces them.
    fn emit_all<R: AsRef<[InputEvent]>>(
        &mut self,
        role: DeviceRole,
        reports: impl IntoIterator<Item = R>,
        pace: Pace,
    ) {
        for report in reports {
            self.emit(role, report.as_ref(), pace);
        }
    }

    /// Swap the point density, returning the previous one.
    pub(crate) fn set_density(&mut self, points: usize) -> usize {
        std::mem::replace(&mut self.density, points.max(1))
    }

    pub(crate) fn pen_touch(&mut self, at: Point) {
        let ev = pen::pen_down(&self.transform, at, self.settings.pen_pressure);
        self.emit(DeviceRole::Pen, &ev, Pace::Report);
        self.pointer = at;
        self.stylus = Stylus::Pen;
    }

    pub(crate) fn pen_lift(&mut self) {
        self.emit(DeviceRole::Pen, &pen::pen_up(), Pace::Report);
        self.stylus = Stylus::Up;
    }

    /// Interpolated move from the current pointer position.
    pub(crate) fn stroke_to(&mut self, to: Point, pace: Pace) {
        let reports = pen::pen_move(&self.transform, self.pointer, to, self.density);
        self.emit_all(DeviceRole::Pen, reports, pace);
        self.pointer = to;
    }
}

#[cfg(test)]
impl<S: EventSink> Session<S> {
    pub fn finger(&self) -> Point {
        self.finger
    }

    pub fn density(&self) -> usize {
        self.density
    }

    pub fn stylus(&self) -> Stylus {
        self.stylus
    }

    pub fn tracking_id(&self) -> Option<i32> {
        self.tracking_id
    }
}
