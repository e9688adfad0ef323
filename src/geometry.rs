//! Expand shapes into pen strokes.
//!
//! Every shape is drawn as pen down, a series of interpolated moves, pen up.
//! Angles are in degrees, with y growing downwards as on the display, so 0°
//! points right and 90° points down. While a shape is drawn the session's
//! point density drops to [`SHAPE_POINTS`] and is restored afterwards.

use crate::session::Session;
use crate::sink::{EventSink, Pace};

/// Point density used between consecutive traced points of a shape.
pub const SHAPE_POINTS: usize = 10;

/// Degrees traced past the end angle so closed outlines really close.
const ARC_OVERSHOOT: i64 = 10;
const CIRCLE_STEP: usize = 1;
const ARC_STEP: usize = 2;
const CURVE_SAMPLES: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `to: None` ends the line at the current pen position.
    Line { from: Point, to: Option<Point> },
    /// A circle is an ellipse with `r1 == r2`.
    Ellipse { center: Point, r1: i32, r2: i32 },
    Arc {
        center: Point,
        r1: i32,
        r2: i32,
        start: i32,
        end: i32,
    },
    Rectangle { from: Point, to: Option<Point> },
    RoundedRect {
        from: Point,
        to: Option<Point>,
        radius: i32,
    },
    Bezier(Curve),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Quadratic([Point; 3]),
    Cubic([Point; 4]),
}

impl Curve {
    /// Six numbers make a quadratic curve, eight a cubic one.
    pub fn from_coords(coords: &[i32]) -> Option<Self> {
        let p = |i: usize| Point::new(coords[2 * i], coords[2 * i + 1]);
        match coords.len() {
            6 => Some(Curve::Quadratic([p(0), p(1), p(2)])),
            8 => Some(Curve::Cubic([p(0), p(1), p(2), p(3)])),
            _ => None,
        }
    }

    pub fn start(&self) -> Point {
        match self {
            Curve::Quadratic(p) => p[0],
            Curve::Cubic(p) => p[0],
        }
    }

    /// Bernstein form evaluated at `t` in `[0, 1]`.
    pub fn at(&self, t: f64) -> Point {
        let it = 1.0 - t;
        let (x, y) = match self {
            Curve::Quadratic(p) => {
                let w = [it * it, 2.0 * it * t, t * t];
                weigh(p, &w)
            }
            Curve::Cubic(p) => {
                let w = [it * it * it, 3.0 * it * it * t, 3.0 * it * t * t, t * t * t];
                weigh(p, &w)
            }
        };
        Point::new(x as i32, y as i32)
    }

    /// Samples after the start point, ending exactly on the last control point.
    pub fn samples(&self) -> impl Iterator<Item = Point> + '_ {
        (1..=CURVE_SAMPLES).map(move |i| self.at(i as f64 / CURVE_SAMPLES as f64))
    }
}

fn weigh(points: &[Point], weights: &[f64]) -> (f64, f64) {
    points
        .iter()
        .zip(weights)
        .fold((0.0, 0.0), |(x, y), (p, w)| (x + w * p.x as f64, y + w * p.y as f64))
}

/// `points + 1` evenly spaced points from `from` to `to`, both included.
/// Offsets are taken in i64 so any two i32 endpoints work.
pub fn interpolate(from: Point, to: Point, points: usize) -> impl Iterator<Item = Point> {
    let points = points.max(1);
    let dx = (to.x as i64 - from.x as i64) as f64;
    let dy = (to.y as i64 - from.y as i64) as f64;
    let step = |start: i32, delta: f64, f: f64| (start as i64 + (delta * f) as i64) as i32;
    (0..=points).map(move |i| {
        let f = i as f64 / points as f64;
        Point::new(step(from.x, dx, f), step(from.y, dy, f))
    })
}

pub fn ellipse_point(center: Point, r1: i32, r2: i32, degrees: i64) -> Point {
    let rad = (degrees as f64).to_radians();
    Point::new(
        (center.x as f64 + rad.cos() * r1 as f64) as i32,
        (center.y as f64 + rad.sin() * r2 as f64) as i32,
    )
}

/// Raise `end` by whole turns until the sweep from `start` is non-negative.
pub fn normalize_sweep(start: i32, end: i32) -> (i64, i64) {
    let (start, mut end) = (start as i64, end as i64);
    if end < start {
        end += (start - end + 359) / 360 * 360;
    }
    (start, end)
}

/// Traced points from `start` up to (not including) `end + ARC_OVERSHOOT`.
pub fn arc_points(
    center: Point,
    r1: i32,
    r2: i32,
    start: i64,
    end: i64,
    step: usize,
) -> impl Iterator<Item = Point> {
    (start..end + ARC_OVERSHOOT)
        .step_by(step)
        .map(move |a| ellipse_point(center, r1, r2, a))
}

/// Order two opposite corners as (top-left, bottom-right).
pub fn normalize_rect(a: Point, b: Point) -> (Point, Point) {
    (
        Point::new(a.x.min(b.x), a.y.min(b.y)),
        Point::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// Corner radius no larger than half the shorter side.
pub fn clamp_radius(radius: i32, top_left: Point, bottom_right: Point) -> i32 {
    let half_w = (bottom_right.x as i64 - top_left.x as i64) / 2;
    let half_h = (bottom_right.y as i64 - top_left.y as i64) / 2;
    (radius as i64).min(half_w).min(half_h).max(0) as i32
}

impl<S: EventSink> Session<S> {
    pub fn draw(&mut self, shape: Shape) {
        log::trace!("drawing {:?}", shape);
        let saved = self.set_density(SHAPE_POINTS);
        match shape {
            Shape::Line { from, to } => self.draw_line(from, to),
            Shape::Ellipse { center, r1, r2 } => self.draw_ellipse(center, r1, r2),
            Shape::Arc {
                center,
                r1,
                r2,
                start,
                end,
            } => self.draw_arc(center, r1, r2, start, end),
            Shape::Rectangle { from, to } => self.draw_rectangle(from, to),
            Shape::RoundedRect { from, to, radius } => self.draw_rounded_rect(from, to, radius),
            Shape::Bezier(curve) => self.draw_curve(&curve),
        }
        self.set_density(saved);
    }

    fn trace(&mut self, points: impl IntoIterator<Item = Point>) {
        for p in points {
            self.stroke_to(p, Pace::Fast);
        }
    }

    fn draw_line(&mut self, from: Point, to: Option<Point>) {
        let to = to.unwrap_or(self.pointer());
        self.pen_touch(from);
        self.stroke_to(to, Pace::Report);
        self.pen_lift();
    }

    fn draw_ellipse(&mut self, center: Point, r1: i32, r2: i32) {
        self.pen_touch(ellipse_point(center, r1, r2, 0));
        self.trace(arc_points(center, r1, r2, 0, 360, CIRCLE_STEP));
        self.pen_lift();
    }

    fn draw_arc(&mut self, center: Point, r1: i32, r2: i32, start: i32, end: i32) {
        let (start, end) = normalize_sweep(start, end);
        self.pen_touch(ellipse_point(center, r1, r2, start));
        self.trace(arc_points(center, r1, r2, start, end, ARC_STEP));
        self.pen_lift();
    }

    fn draw_rectangle(&mut self, from: Point, to: Option<Point>) {
        let to = to.unwrap_or(self.pointer());
        self.pen_touch(from);
        for corner in [
            Point::new(from.x, to.y),
            to,
            Point::new(to.x, from.y),
            from,
        ] {
            self.stroke_to(corner, Pace::Report);
        }
        self.pen_lift();
    }

    fn draw_rounded_rect(&mut self, from: Point, to: Option<Point>, radius: i32) {
        let (tl, br) = normalize_rect(from, to.unwrap_or(self.pointer()));
        // r is at most half of each side, so insetting by it stays in range.
        let r = clamp_radius(radius, tl, br);

        self.pen_touch(Point::new(tl.x + r, tl.y));
        // Clockwise: each edge, then the corner it runs into.
        let legs = [
            (Point::new(br.x - r, tl.y), Point::new(br.x - r, tl.y + r), 270),
            (Point::new(br.x, br.y - r), Point::new(br.x - r, br.y - r), 0),
            (Point::new(tl.x + r, br.y), Point::new(tl.x + r, br.y - r), 90),
            (Point::new(tl.x, tl.y + r), Point::new(tl.x + r, tl.y + r), 180),
        ];
        for (edge_end, corner_center, start) in legs {
            self.stroke_to(edge_end, Pace::Report);
            self.trace(arc_points(corner_center, r, r, start, start + 90, ARC_STEP));
        }
        self.pen_lift();
    }

    fn draw_curve(&mut self, curve: &Curve) {
        self.pen_touch(curve.start());
        self.trace(curve.samples());
        self.pen_lift();
    }
}
