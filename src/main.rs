mod command;
mod config;
mod device;
mod dump;
mod event;
mod geometry;
mod pen;
mod probe;
mod session;
mod sink;
mod touch;
mod transform;

use std::io;

use clap::Parser;

use config::{Cli, Command, Config};
use device::DeviceProfile;
use probe::DeviceRole;
use session::Session;
use sink::Devices;
use transform::Transform;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let profile = DeviceProfile::current();
    let config = Config::load(&cli, profile);
    let transform = Transform::new(profile);

    if cli.command == Some(Command::Dump) {
        return dump::run_dump(transform, config.settings);
    }

    if let Err(e) = config.validate() {
        log::error!("{}", e);
        std::process::exit(1);
    }

    log::info!(
        "rm-lamp starting ({}, candidates={}, move_points={})",
        profile.name,
        config.devices.join(","),
        config.settings.move_points
    );

    let devices = Devices::new(probe::bind_devices(&config.devices), config.pacing);
    for role in [DeviceRole::Pen, DeviceRole::Touch] {
        if !devices.is_bound(role) {
            log::error!("Could not find a {} device among {}", role, config.devices.join(", "));
            std::process::exit(1);
        }
    }

    let mut session = Session::new(devices, transform, config.settings);
    session.start();
    log::info!("Reading commands from stdin");
    session.run(io::stdin().lock());
    drop(session.finish());

    Ok(())
}
