mod cli;
mod file;

pub use cli::{Cli, Command};

use std::time::Duration;

use crate::device::DeviceProfile;
use crate::session::Settings;
use crate::sink::Pacing;

use file::FileConfig;

/// Merged configuration from CLI args, TOML file and the device profile.
#[derive(Debug, Clone)]
pub struct Config {
    pub devices: Vec<String>,
    pub pacing: Pacing,
    pub settings: Settings,
}

impl Config {
    /// Load configuration by merging TOML file with CLI overrides.
    pub fn load(cli: &Cli, device: &DeviceProfile) -> Self {
        let file_config = cli
            .config
            .as_ref()
            .and_then(|p| file::load_from_path(p))
            .or_else(file::load_from_default_paths)
            .unwrap_or_default();

        Self::merge(cli, file_config, device)
    }

    fn merge(cli: &Cli, file: FileConfig, device: &DeviceProfile) -> Self {
        let defaults = Pacing::default();
        let delay = |cli: Option<u64>, file: Option<u64>, default: Duration| {
            cli.or(file).map(Duration::from_micros).unwrap_or(default)
        };
        let pacing = Pacing {
            report: delay(cli.report_delay_us, file.report_delay_us, defaults.report),
            stroke: delay(cli.stroke_delay_us, file.stroke_delay_us, defaults.stroke),
            fast: delay(cli.fast_delay_us, file.fast_delay_us, defaults.fast),
        };

        let devices = if !cli.devices.is_empty() {
            cli.devices.clone()
        } else if !file.devices.is_empty() {
            file.devices
        } else {
            device.candidates.iter().map(|s| s.to_string()).collect()
        };

        let base = Settings::default();
        let pressure =
            |p: Option<i32>, default: i32| p.unwrap_or(default).clamp(0, device.pen_pressure_max);
        let settings = Settings {
            move_points: cli
                .move_points
                .or(file.move_points)
                .unwrap_or(base.move_points)
                .max(1),
            pen_pressure: pressure(file.pen_pressure, base.pen_pressure),
            eraser_pressure: pressure(file.eraser_pressure, base.eraser_pressure),
        };

        Self {
            devices,
            pacing,
            settings,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.devices.is_empty() {
            return Err("No candidate device files configured");
        }
        Ok(())
    }
}
