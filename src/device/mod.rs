mod rm2;

pub use rm2::RM2;

/// Hardware parameters for the two input devices and the display they sit on.
#[derive(Debug, Clone, Copy)]
pub struct DeviceProfile {
    pub name: &'static str,

    // Display size in pixels (portrait)
    pub display_width: i32,
    pub display_height: i32,

    // Pen digitizer ranges. ABS_X runs along the display's long side.
    pub pen_x_max: i32,
    pub pen_y_max: i32,
    pub pen_pressure_max: i32,

    // Multitouch surface ranges
    pub touch_x_max: i32,
    pub touch_y_max: i32,

    // Device files probed at startup
    pub candidates: &'static [&'static str],
}

impl DeviceProfile {
    /// Get profile for the current device (defaults to RM2).
    pub fn current() -> &'static Self {
        &RM2
    }
}
