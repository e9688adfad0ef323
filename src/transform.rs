//! Map display pixels onto the native axes of the pen digitizer and the touch surface.
//!
//! The digitizer is natively landscape: its ABS_X runs along the display's long
//! side with the origin at the bottom, and its ABS_Y runs along the short side.
//! The touch surface is portrait like the display but with Y=0 at the bottom.

use crate::device::DeviceProfile;
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    display_width: f64,
    display_height: f64,
    pen_x_max: f64,
    pen_y_max: f64,
    touch_width: f64,
    touch_height: f64,
}

impl Transform {
    pub fn new(profile: &DeviceProfile) -> Self {
        Self {
            display_width: profile.display_width as f64,
            display_height: profile.display_height as f64,
            pen_x_max: profile.pen_x_max as f64,
            pen_y_max: profile.pen_y_max as f64,
            touch_width: (profile.touch_x_max + 1) as f64,
            touch_height: (profile.touch_y_max + 1) as f64,
        }
    }

    /// Digitizer `(ABS_X, ABS_Y)` for a display pixel.
    pub fn to_pen(&self, p: Point) -> (i32, i32) {
        let abs_x = self.pen_x_max - p.y as f64 * self.pen_x_max / self.display_height;
        let abs_y = p.x as f64 * self.pen_y_max / self.display_width;
        (abs_x as i32, abs_y as i32)
    }

    pub fn from_pen(&self, abs_x: i32, abs_y: i32) -> Point {
        let x = abs_y as f64 * self.display_width / self.pen_y_max;
        let y = (self.pen_x_max - abs_x as f64) * self.display_height / self.pen_x_max;
        Point::new(x.round() as i32, y.round() as i32)
    }

    /// Touch `(ABS_MT_POSITION_X, ABS_MT_POSITION_Y)` for a display pixel.
    pub fn to_touch(&self, p: Point) -> (i32, i32) {
        let mt_x = p.x as f64 * self.touch_width / self.display_width;
        let mt_y = self.touch_height - p.y as f64 * self.touch_height / self.display_height;
        (mt_x as i32, mt_y as i32)
    }

    pub fn from_touch(&self, mt_x: i32, mt_y: i32) -> Point {
        let x = mt_x as f64 * self.display_width / self.touch_width;
        let y = (self.touch_height - mt_y as f64) * self.display_height / self.touch_height;
        Point::new(x.round() as i32, y.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::RM2;

    #[test]
    fn test_pen_axes_are_swapped_and_flipped() {
        let t = Transform::new(&RM2);
        assert_eq!(t.to_pen(Point::new(0, 0)), (20967, 0));
        assert_eq!(t.to_pen(Point::new(10, 20)), (20742, 112));
        assert_eq!(t.to_pen(Point::new(1404, 1872)), (0, 15725));
    }

    #[test]
    fn test_touch_flips_y_only() {
        let t = Transform::new(&RM2);
        assert_eq!(t.to_touch(Point::new(5, 5)), (5, 1867));
        assert_eq!(t.to_touch(Point::new(1404, 0)), (1404, 1872));
    }

    #[test]
    fn test_pen_round_trip_within_one_pixel() {
        let t = Transform::new(&RM2);
        for y in (0..=RM2.display_height).step_by(7) {
            for x in (0..=RM2.display_width).step_by(13) {
                let (ax, ay) = t.to_pen(Point::new(x, y));
                let back = t.from_pen(ax, ay);
                assert!((back.x - x).abs() <= 1, "x {} came back as {}", x, back.x);
                assert!((back.y - y).abs() <= 1, "y {} came back as {}", y, back.y);
            }
        }
    }

    #[test]
    fn test_touch_round_trip() {
        let t = Transform::new(&RM2);
        for (x, y) in [(0, 0), (700, 900), (1404, 1872), (3, 1871)] {
            let (mx, my) = t.to_touch(Point::new(x, y));
            assert_eq!(t.from_touch(mx, my), Point::new(x, y));
        }
    }
}
