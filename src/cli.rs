//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PathPlanner - inspect, sample and mirror robot path files
#[derive(Parser, Debug)]
#[command(name = "pathplanner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (.toml or .json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show title, description, point count and duration of a path
    Info {
        /// Path file
        file: PathBuf,
    },

    /// Print points along the path at a fixed time increment, as JSON lines
    Sample {
        /// Path file
        file: PathBuf,

        /// Time between points in seconds (defaults to the configured interval)
        #[arg(short, long)]
        interval: Option<f64>,
    },

    /// Print the path point at each of the given times, as JSON lines
    Follow {
        /// Path file
        file: PathBuf,

        /// Time in seconds; repeat for more, in increasing order
        #[arg(short, long = "time", required = true, allow_negative_numbers = true)]
        times: Vec<f64>,
    },

    /// Mirror a path across a vertical field line
    Mirror {
        /// Path file to read
        input: PathBuf,

        /// Path file to write
        output: PathBuf,

        /// Field X of the mirror line (defaults to the configured axis)
        #[arg(short, long, allow_negative_numbers = true)]
        axis: Option<f64>,
    },

    /// Report the control points and handles under a field location
    Pick {
        /// Path file
        file: PathBuf,

        /// Field X in meters
        #[arg(allow_negative_numbers = true)]
        x: f64,

        /// Field Y in meters
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
}
