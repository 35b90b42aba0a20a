use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Seasonal EOF rotation postprocessor.
#[derive(Parser)]
#[command(
    name = "eofrot",
    version,
    about = "Sign alignment and seasonal rotation of day-of-year EOFs"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Rotate a full year of EOFs and write the result.
    Rotate(RotateArgs),
    /// Report day-to-day continuity of an EOF sequence.
    Diagnose(DiagnoseArgs),
}

/// Arguments for the `rotate` subcommand.
#[derive(clap::Args)]
pub struct RotateArgs {
    /// Input EOFs: a JSON document or a directory of eofNNN.txt files.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output path for the rotated EOFs.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Expect a 365-day year instead of 366 days.
    #[arg(long, conflicts_with = "leap")]
    pub no_leap: bool,

    /// Expect a 366-day year, overriding `no_leap` from the config or input.
    #[arg(long)]
    pub leap: bool,

    /// EOFs whose DOY 1 fixes the sign convention.
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Blend weight of the projected EOFs: "per-day" or a number in [0, 1].
    #[arg(long)]
    pub projection_weight: Option<String>,

    /// Write a JSON continuity report of input and output here.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl RotateArgs {
    /// Calendar requested on the command line, if any.
    pub fn no_leap_flag(&self) -> Option<bool> {
        match (self.no_leap, self.leap) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

/// Arguments for the `diagnose` subcommand.
#[derive(clap::Args)]
pub struct DiagnoseArgs {
    /// Input EOFs: a JSON document or a directory of eofNNN.txt files.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the JSON report (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also report the mean EOFs over DOYs [START, END), wrapping if END <= START.
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub window: Option<Vec<u16>>,
}
