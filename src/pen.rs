//! Event sequences for the stylus: pen tip and eraser end.
//!
//! The digitizer reports display X on ABS_Y and display Y on ABS_X, so every
//! position is written Y-first after going through [`Transform::to_pen`].

use evdevil::event::InputEvent;

use crate::event::{
    abs_event, key_event, syn_report, ABS_DISTANCE, ABS_PRESSURE, ABS_TILT_X, ABS_TILT_Y, ABS_X,
    ABS_Y, BTN_TOOL_PEN, BTN_TOOL_RUBBER, BTN_TOUCH,
};
use crate::geometry::{interpolate, Point};
use crate::transform::Transform;

const ERASER_TILT_X: i32 = 50;
const ERASER_TILT_Y: i32 = -150;
const ERASER_MIN_POINTS: i64 = 5;
const ERASER_PIXELS_PER_POINT: i64 = 3;

fn push_position(ev: &mut Vec<InputEvent>, t: &Transform, p: Point) {
    ev.extend(position(t, p));
}

fn position(t: &Transform, p: Point) -> [InputEvent; 2] {
    let (abs_x, abs_y) = t.to_pen(p);
    [abs_event(ABS_Y, abs_y), abs_event(ABS_X, abs_x)]
}

pub fn pen_down(t: &Transform, p: Point, pressure: i32) -> Vec<InputEvent> {
    let mut ev = Vec::with_capacity(7);
    ev.push(key_event(BTN_TOOL_PEN, 1));
    ev.push(key_event(BTN_TOUCH, 1));
    push_position(&mut ev, t, p);
    ev.push(abs_event(ABS_DISTANCE, 0));
    ev.push(abs_event(ABS_PRESSURE, pressure));
    ev.push(syn_report());
    ev
}

/// One report per interpolated point, `points + 1` reports in total, built
/// as they are consumed.
pub fn pen_move(
    t: &Transform,
    from: Point,
    to: Point,
    points: usize,
) -> impl Iterator<Item = [InputEvent; 3]> {
    let t = *t;
    interpolate(from, to, points).map(move |p| {
        let [y, x] = position(&t, p);
        [y, x, syn_report()]
    })
}

pub fn pen_up() -> Vec<InputEvent> {
    vec![
        key_event(BTN_TOOL_PEN, 0),
        key_event(BTN_TOUCH, 0),
        syn_report(),
    ]
}

/// Park every axis at -1 so the reader starts from a known state.
pub fn pen_clear() -> Vec<InputEvent> {
    vec![
        abs_event(ABS_X, -1),
        abs_event(ABS_DISTANCE, -1),
        abs_event(ABS_PRESSURE, -1),
        abs_event(ABS_Y, -1),
        syn_report(),
    ]
}

pub fn eraser_down(t: &Transform, p: Point, pressure: i32) -> Vec<InputEvent> {
    let mut ev = Vec::with_capacity(9);
    ev.push(key_event(BTN_TOOL_RUBBER, 1));
    ev.push(key_event(BTN_TOUCH, 1));
    push_position(&mut ev, t, p);
    ev.push(abs_event(ABS_DISTANCE, 0));
    ev.push(abs_event(ABS_PRESSURE, pressure));
    ev.push(abs_event(ABS_TILT_X, ERASER_TILT_X));
    ev.push(abs_event(ABS_TILT_Y, ERASER_TILT_Y));
    ev.push(syn_report());
    ev
}

/// Eraser density follows the distance travelled, not the session setting.
pub fn eraser_points(from: Point, to: Point) -> usize {
    let dx = (to.x as i64 - from.x as i64).abs();
    let dy = (to.y as i64 - from.y as i64).abs();
    (dx.max(dy) / ERASER_PIXELS_PER_POINT).max(ERASER_MIN_POINTS) as usize
}

pub fn eraser_move(
    t: &Transform,
    from: Point,
    to: Point,
    pressure: i32,
) -> impl Iterator<Item = [InputEvent; 4]> {
    let t = *t;
    interpolate(from, to, eraser_points(from, to)).map(move |p| {
        let [y, x] = position(&t, p);
        [y, x, abs_event(ABS_PRESSURE, pressure), syn_report()]
    })
}

pub fn eraser_up() -> Vec<InputEvent> {
    vec![
        key_event(BTN_TOOL_RUBBER, 0),
        key_event(BTN_TOUCH, 0),
        abs_event(ABS_PRESSURE, 0),
        syn_report(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::RM2;
    use crate::event::is_report;

    fn reports(events: &[InputEvent]) -> usize {
        events.iter().filter(|e| is_report(e)).count()
    }

    #[test]
    fn test_pen_down_is_one_report() {
        let t = Transform::new(&RM2);
        let ev = pen_down(&t, Point::new(10, 20), 4000);
        assert_eq!(reports(&ev), 1);
        assert!(is_report(ev.last().unwrap()));
        assert_eq!(ev[2].raw_code(), ABS_Y);
        assert_eq!(ev[2].raw_value(), 112);
        assert_eq!(ev[3].raw_code(), ABS_X);
        assert_eq!(ev[3].raw_value(), 20742);
    }

    #[test]
    fn test_pen_move_reports_every_point() {
        let t = Transform::new(&RM2);
        let ev: Vec<InputEvent> = pen_move(&t, Point::new(0, 0), Point::new(100, 0), 10)
            .flatten()
            .collect();
        assert_eq!(reports(&ev), 11);
        let (end_x, end_y) = t.to_pen(Point::new(100, 0));
        assert_eq!(ev[ev.len() - 3].raw_value(), end_y);
        assert_eq!(ev[ev.len() - 2].raw_value(), end_x);
    }

    #[test]
    fn test_eraser_density_follows_distance() {
        assert_eq!(eraser_points(Point::new(0, 0), Point::new(3, 3)), 5);
        assert_eq!(eraser_points(Point::new(0, 0), Point::new(30, -300)), 100);

        let t = Transform::new(&RM2);
        let ev: Vec<InputEvent> = eraser_move(&t, Point::new(0, 0), Point::new(60, 0), 1700)
            .flatten()
            .collect();
        assert_eq!(reports(&ev), 21);
    }

    #[test]
    fn test_eraser_across_the_whole_i32_range() {
        let from = Point::new(-2_000_000_000, 0);
        let to = Point::new(2_000_000_000, 0);
        assert_eq!(eraser_points(from, to), 1_333_333_333);

        let t = Transform::new(&RM2);
        let mut reports = eraser_move(&t, from, to, 1700);
        let first = reports.next().unwrap();
        let (abs_x, abs_y) = t.to_pen(from);
        assert_eq!(first[0].raw_value(), abs_y);
        assert_eq!(first[1].raw_value(), abs_x);
        assert!(is_report(&first[3]));
        assert_eq!(reports.size_hint().0, 1_333_333_333);
    }

    #[test]
    fn test_eraser_up_releases_pressure() {
        let ev = eraser_up();
        assert_eq!(ev[2].raw_code(), ABS_PRESSURE);
        assert_eq!(ev[2].raw_value(), 0);
        assert_eq!(reports(&ev), 1);
    }
}
