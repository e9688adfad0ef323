//! Event sequences for a single finger on the multitouch surface.
//! TRACKING_ID >= 0 opens a contact, TRACKING_ID == -1 releases it.

use evdevil::event::InputEvent;

use crate::event::{abs_event, syn_report, ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_MT_TRACKING_ID};
use crate::geometry::{interpolate, Point};
use crate::transform::Transform;

pub const RELEASED: i32 = -1;

/// Interpolation points for a finger move.
pub const FINGER_POINTS: usize = 10;

fn push_position(ev: &mut Vec<InputEvent>, t: &Transform, p: Point) {
    let (mt_x, mt_y) = t.to_touch(p);
    ev.push(abs_event(ABS_MT_POSITION_X, mt_x));
    ev.push(abs_event(ABS_MT_POSITION_Y, mt_y));
}

pub fn finger_down(t: &Transform, p: Point, tracking_id: i32) -> Vec<InputEvent> {
    let mut ev = Vec::with_capacity(4);
    ev.push(abs_event(ABS_MT_TRACKING_ID, tracking_id));
    push_position(&mut ev, t, p);
    ev.push(syn_report());
    ev
}

/// Restates the contact's tracking id, then one report per interpolated point.
pub fn finger_move(
    t: &Transform,
    from: Point,
    to: Point,
    tracking_id: i32,
    points: usize,
) -> Vec<InputEvent> {
    let mut ev = finger_down(t, from, tracking_id);
    for p in interpolate(from, to, points) {
        push_position(&mut ev, t, p);
        ev.push(syn_report());
    }
    ev
}

pub fn finger_up() -> Vec<InputEvent> {
    vec![abs_event(ABS_MT_TRACKING_ID, RELEASED), syn_report()]
}
