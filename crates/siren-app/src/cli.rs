use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Siren: personal safety companion.
#[derive(Parser, Debug)]
#[command(name = "siren", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. `siren=debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Share a simulated location, printing the session after every tick.
    Share(ShareArgs),
    /// Print the effective configuration as JSON.
    Config,
}

#[derive(clap::Args, Debug)]
pub struct ShareArgs {
    /// Seconds to share before stopping, one tick per second.
    #[arg(long, default_value_t = 5)]
    pub seconds: u64,

    /// Answer the permission prompt with "deny".
    #[arg(long)]
    pub deny: bool,

    /// Refresh the position periodically while sharing.
    #[arg(long)]
    pub auto_track: bool,

    /// Make every position capture fail.
    #[arg(long)]
    pub fail_capture: bool,

    /// Latitude the simulated position is scattered around.
    #[arg(long, default_value_t = 37.7749, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude the simulated position is scattered around.
    #[arg(long, default_value_t = -122.4194, allow_negative_numbers = true)]
    pub longitude: f64,
}

pub fn parse() -> Args {
    Args::parse()
}
