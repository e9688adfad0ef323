//! Parse protocol lines (`pen line 10 10 200 200`, `finger up`, `sleep 50`, ...).
//!
//! Anything that doesn't parse is dropped: unknown tools or actions, too few
//! numbers, out-of-range sleeps, blank lines and `#` comments all yield `None`.

use std::time::Duration;

use crate::geometry::{Curve, Point, Shape};
use crate::sink::Pace;

const MAX_SLEEP_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `pen` or `fastpen`; the pace only affects moves.
    Pen(PenAction, Pace),
    Shape(Shape),
    Eraser(EraserAction),
    Finger(FingerAction),
    Sleep(Duration),
}

/// `None` targets resolve to the tool's current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenAction {
    Down(Option<Point>),
    Move(Option<Point>),
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraserAction {
    Down(Option<Point>),
    Move(Option<Point>),
    Up,
    On,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerAction {
    Down(Option<Point>),
    Move(Option<Point>),
    Up,
}

/// Leading integer arguments; parsing stops at the first token that isn't one.
struct Args(Vec<i32>);

impl Args {
    fn parse<'a>(tokens: impl Iterator<Item = &'a str>) -> Self {
        Args(tokens.map_while(|t| t.parse().ok()).collect())
    }

    fn get(&self, i: usize) -> Option<i32> {
        self.0.get(i).copied()
    }

    fn point(&self, i: usize) -> Option<Point> {
        Some(Point::new(self.get(i)?, self.get(i + 1)?))
    }
}

pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut tokens = line.split_whitespace();
    let tool = tokens.next()?;
    let action = tokens.next().unwrap_or("");

    match tool {
        "pen" => parse_pen(action, Args::parse(tokens), Pace::Stroke),
        "fastpen" => parse_pen(action, Args::parse(tokens), Pace::Fast),
        "eraser" | "erase" => parse_eraser(action, Args::parse(tokens)),
        "finger" => parse_finger(action, Args::parse(tokens)),
        "sleep" => parse_sleep(action),
        _ => None,
    }
}

fn parse_pen(action: &str, args: Args, pace: Pace) -> Option<Command> {
    let cmd = match action {
        "down" => Command::Pen(PenAction::Down(args.point(0)), pace),
        "move" => Command::Pen(PenAction::Move(args.point(0)), pace),
        "up" => Command::Pen(PenAction::Up, pace),
        _ => Command::Shape(parse_shape(action, &args)?),
    };
    Some(cmd)
}

fn parse_shape(action: &str, args: &Args) -> Option<Shape> {
    let shape = match action {
        "line" => Shape::Line {
            from: args.point(0)?,
            to: args.point(2),
        },
        "rectangle" => Shape::Rectangle {
            from: args.point(0)?,
            to: args.point(2),
        },
        "circle" => {
            let r1 = args.get(2)?;
            Shape::Ellipse {
                center: args.point(0)?,
                r1,
                r2: args.get(3).unwrap_or(r1),
            }
        }
        "arc" => {
            let r1 = args.get(2)?;
            Shape::Arc {
                center: args.point(0)?,
                r1,
                r2: args.get(3).unwrap_or(r1),
                start: args.get(4).unwrap_or(0),
                end: args.get(5).unwrap_or(360),
            }
        }
        "rounded_rectangle" | "roundrect" => Shape::RoundedRect {
            from: args.point(0)?,
            to: args.point(2),
            radius: args.get(4)?,
        },
        "bezier" => Shape::Bezier(Curve::from_coords(&args.0)?),
        _ => return None,
    };
    Some(shape)
}

fn parse_eraser(action: &str, args: Args) -> Option<Command> {
    let action = match action {
        "down" => EraserAction::Down(args.point(0)),
        "move" => EraserAction::Move(args.point(0)),
        "up" | "off" => EraserAction::Up,
        "on" => EraserAction::On,
        _ => return None,
    };
    Some(Command::Eraser(action))
}

fn parse_finger(action: &str, args: Args) -> Option<Command> {
    let action = match action {
        "down" => FingerAction::Down(args.point(0)),
        "move" => FingerAction::Move(args.point(0)),
        "up" => FingerAction::Up,
        _ => return None,
    };
    Some(Command::Finger(action))
}

fn parse_sleep(arg: &str) -> Option<Command> {
    let ms: u64 = arg.parse().ok()?;
    if ms == 0 || ms > MAX_SLEEP_MS {
        return None;
    }
    Some(Command::Sleep(Duration::from_millis(ms)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_lines() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("# pen down 1 2"), None);
        assert_eq!(parse("brush down 1 2"), None);
        assert_eq!(parse("pen wiggle 1 2"), None);
        assert_eq!(parse("finger tap 1 2"), None);
    }

    #[test]
    fn test_pen_commands() {
        assert_eq!(
            parse("pen down 10 20"),
            Some(Command::Pen(PenAction::Down(Some(Point::new(10, 20))), Pace::Stroke))
        );
        assert_eq!(
            parse("fastpen move 3 4"),
            Some(Command::Pen(PenAction::Move(Some(Point::new(3, 4))), Pace::Fast))
        );
        assert_eq!(parse("pen down"), Some(Command::Pen(PenAction::Down(None), Pace::Stroke)));
        assert_eq!(parse("pen up"), Some(Command::Pen(PenAction::Up, Pace::Stroke)));
    }

    #[test]
    fn test_missing_end_point_is_unspecified() {
        assert_eq!(
            parse("pen line 1 2"),
            Some(Command::Shape(Shape::Line {
                from: Point::new(1, 2),
                to: None,
            }))
        );
        assert_eq!(
            parse("pen rectangle 1 2 x 9"),
            Some(Command::Shape(Shape::Rectangle {
                from: Point::new(1, 2),
                to: None,
            }))
        );
        assert_eq!(parse("pen line 1"), None);
    }

    #[test]
    fn test_circle_defaults_to_equal_radii() {
        assert_eq!(
            parse("pen circle 100 100 50"),
            Some(Command::Shape(Shape::Ellipse {
                center: Point::new(100, 100),
                r1: 50,
                r2: 50,
            }))
        );
        assert_eq!(
            parse("pen arc 0 0 20 10 90"),
            Some(Command::Shape(Shape::Arc {
                center: Point::new(0, 0),
                r1: 20,
                r2: 10,
                start: 90,
                end: 360,
            }))
        );
    }

    #[test]
    fn test_rounded_rectangle_needs_radius() {
        assert!(parse("pen roundrect 0 0 10 10 3").is_some());
        assert!(parse("pen rounded_rectangle 0 0 10 10 3").is_some());
        assert_eq!(parse("pen roundrect 0 0 10 10"), None);
    }

    #[test]
    fn test_bezier_argument_counts() {
        assert!(parse("pen bezier 0 0 5 5 10 0").is_some());
        assert!(parse("pen bezier 0 0 5 5 10 0 15 5").is_some());
        assert_eq!(parse("pen bezier 0 0 5 5 10"), None);
        assert_eq!(parse("pen bezier 0 0 5 5 10 0 15"), None);
    }

    #[test]
    fn test_eraser_aliases() {
        assert_eq!(parse("erase off"), Some(Command::Eraser(EraserAction::Up)));
        assert_eq!(parse("eraser on"), Some(Command::Eraser(EraserAction::On)));
        assert_eq!(
            parse("erase move 4 5"),
            Some(Command::Eraser(EraserAction::Move(Some(Point::new(4, 5)))))
        );
    }

    #[test]
    fn test_sleep_range() {
        assert_eq!(parse("sleep 50"), Some(Command::Sleep(Duration::from_millis(50))));
        assert_eq!(parse("sleep 10000"), Some(Command::Sleep(Duration::from_millis(10_000))));
        assert_eq!(parse("sleep 0"), None);
        assert_eq!(parse("sleep -5"), None);
        assert_eq!(parse("sleep 50000"), None);
        assert_eq!(parse("sleep"), None);
    }
}
