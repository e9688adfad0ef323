use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rm-lamp")]
#[command(about = "Draw on the reMarkable by injecting pen and touch events")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Candidate input device file; repeat to probe several (replaces the built-in list)
    #[arg(long = "device", value_name = "PATH")]
    pub devices: Vec<String>,

    /// Delay before each report for taps, lifts, eraser and straight edges (microseconds)
    #[arg(long)]
    pub report_delay_us: Option<u64>,

    /// Delay before each report of a `pen move` (microseconds)
    #[arg(long)]
    pub stroke_delay_us: Option<u64>,

    /// Delay before each report of `fastpen` moves and traced curves (microseconds)
    #[arg(long)]
    pub fast_delay_us: Option<u64>,

    /// Interpolation points for a plain `pen move`
    #[arg(long)]
    pub move_points: Option<usize>,

    /// Path to config file
    #[arg(long, env = "RMLAMP_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the reports each protocol line on stdin would produce, without touching devices
    Dump,
}
