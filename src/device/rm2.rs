use super::DeviceProfile;

pub const RM2: DeviceProfile = DeviceProfile {
    name: "reMarkable 2",

    // 1872x1404 display, held in portrait
    display_width: 1404,
    display_height: 1872,

    // Pen digitizer ranges (from device dumps)
    pen_x_max: 20967,
    pen_y_max: 15725,
    pen_pressure_max: 4095,

    // Touch reports one unit per display pixel
    touch_x_max: 1403,
    touch_y_max: 1871,

    candidates: &["/dev/input/event0", "/dev/input/event1", "/dev/input/event2"],
};
