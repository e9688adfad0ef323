//! Classify candidate evdev nodes by their absolute-axis capabilities and bind
//! them to the pen and touch roles.

use std::fmt;
use std::io;

use evdevil::event::Abs;
use evdevil::Evdev;

use crate::sink::DeviceBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRole {
    /// Stylus digitizer (absolute X/Y, pressure, tilt).
    Pen,
    /// Multitouch surface.
    Touch,
    Unrecognized,
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceRole::Pen => "pen",
            DeviceRole::Touch => "touch",
            DeviceRole::Unrecognized => "unrecognized",
        };
        f.pad(name)
    }
}

/// Multitouch wins over plain absolute X: touch panels usually declare both.
pub fn classify(has_mt_position: bool, has_abs_x: bool) -> DeviceRole {
    if has_mt_position {
        DeviceRole::Touch
    } else if has_abs_x {
        DeviceRole::Pen
    } else {
        DeviceRole::Unrecognized
    }
}

/// Classify an open device by its declared absolute axes.
pub fn classify_device(evdev: &Evdev) -> io::Result<DeviceRole> {
    let axes = evdev.supported_abs_axes()?;
    Ok(classify(axes.contains(Abs::MT_POSITION_X), axes.contains(Abs::X)))
}

/// Open every candidate, classify that same handle, and keep the first match
/// for each role.
pub fn bind_devices(candidates: &[String]) -> Vec<DeviceBinding> {
    let mut pen: Option<DeviceBinding> = None;
    let mut touch: Option<DeviceBinding> = None;

    for path in candidates {
        let evdev = match Evdev::open(path) {
            Ok(evdev) => evdev,
            Err(e) => {
                log::debug!("{}: {}", path, e);
                continue;
            }
        };
        let role = classify_device(&evdev).unwrap_or_else(|e| {
            log::debug!("{}: capability query failed: {}", path, e);
            DeviceRole::Unrecognized
        });
        log::debug!("{}: probed as {}", path, role);

        let slot = match role {
            DeviceRole::Pen => &mut pen,
            DeviceRole::Touch => &mut touch,
            DeviceRole::Unrecognized => continue,
        };
        if let Some(existing) = slot.as_ref() {
            log::debug!("{}: {} already bound to {}", path, role, existing.path);
            continue;
        }
        log::info!("Bound {} device: {}", role, path);
        *slot = Some(DeviceBinding {
            path: path.clone(),
            role,
            evdev,
        });
    }

    pen.into_iter().chain(touch).collect()
}
