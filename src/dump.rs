//! Dry run: compile protocol lines from stdin and print the reports instead
//! of writing them to devices.
//! Run: `echo "pen line 10 10 200 200" | rm-lamp dump`

use std::io::{self, Write};
use std::time::Duration;

use evdevil::event::InputEvent;

use crate::event::{code_name, ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_X, ABS_Y, EV_ABS};
use crate::probe::DeviceRole;
use crate::session::{Session, Settings};
use crate::sink::{EventSink, Pace};
use crate::transform::Transform;

/// Prints each report as `<role> <n>: CODE=value ... @ x,y`, the trailing
/// display position mapped back from the device axes when the report moves.
pub struct Printer<W: Write> {
    out: W,
    transform: Transform,
    count: u64,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, transform: Transform) -> Self {
        Self {
            out,
            transform,
            count: 0,
        }
    }

    fn format(&self, role: DeviceRole, report: &[InputEvent]) -> String {
        let mut line = report
            .iter()
            .map(|ev| {
                let name = code_name(ev.event_type().raw(), ev.raw_code());
                format!("{}={}", name, ev.raw_value())
            })
            .collect::<Vec<_>>()
            .join(" ");

        let abs = |code| {
            report
                .iter()
                .rfind(|ev| ev.event_type().raw() == EV_ABS && ev.raw_code() == code)
                .map(|ev| ev.raw_value())
        };
        let position = match role {
            DeviceRole::Pen => abs(ABS_X)
                .zip(abs(ABS_Y))
                .filter(|&(x, y)| x >= 0 && y >= 0)
                .map(|(x, y)| self.transform.from_pen(x, y)),
            DeviceRole::Touch => abs(ABS_MT_POSITION_X)
                .zip(abs(ABS_MT_POSITION_Y))
                .map(|(x, y)| self.transform.from_touch(x, y)),
            DeviceRole::Unrecognized => None,
        };
        if let Some(p) = position {
            line.push_str(&format!(" @ {},{}", p.x, p.y));
        }
        line
    }
}

impl<W: Write> EventSink for Printer<W> {
    fn submit(&mut self, role: DeviceRole, report: &[InputEvent], _pace: Pace) {
        self.count += 1;
        let line = self.format(role, report);
        if let Err(e) = writeln!(self.out, "{:5} {:6}: {}", role, self.count, line) {
            log::trace!("dump output failed: {}", e);
        }
    }

    fn pause(&mut self, duration: Duration) {
        if let Err(e) = writeln!(self.out, "# sleep {}ms", duration.as_millis()) {
            log::trace!("dump output failed: {}", e);
        }
    }
}

pub fn run_dump(
    transform: Transform,
    settings: Settings,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let stdout = io::stdout();
    let printer = Printer::new(stdout.lock(), transform);
    let mut session = Session::new(printer, transform, settings);
    session.run(io::stdin().lock());
    let mut printer = session.finish();
    printer.out.flush()?;
    eprintln!("{} reports", printer.count);
    Ok(())
}
