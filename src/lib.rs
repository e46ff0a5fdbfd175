//! # PathPlanner
//!
//! A path planner for swerve-drive robots. Paths are Kochanek-Bartels
//! (cardinal) splines through control points that carry a field position,
//! a robot heading and a time, so the same path drives the editor's
//! drawing and the robot's control loop.
//!
//! ## Architecture
//!
//! PathPlanner is organized as a workspace with multiple crates:
//!
//! 1. **pathplanner-core** - Error types and field geometry
//! 2. **pathplanner-spline** - Control points, the spline, path iteration,
//!    path following, path files and mirroring
//! 3. **pathplanner-settings** - Planner configuration
//! 4. **pathplanner** - Command-line front end that integrates all crates
//!
//! ## Features
//!
//! - **Interactive editing model**: add, insert, move and delete control
//!   points with tangents recomputed locally
//! - **Hand-edited tangents**: frozen until explicitly reset
//! - **Robot-frame speeds**: forward, strafe and rotation at every point
//! - **Path files**: JSON documents that restore edited tangents exactly
//! - **Mirroring**: reuse a path on the other side of the field

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{run, Context};

pub use pathplanner_core::{Error, FieldPoint, PersistenceError, Result, SplineError};
pub use pathplanner_settings::{OutputSettings, PathSettings, PlannerConfig, SettingsError};
pub use pathplanner_spline::{
    ControlPoint, ControlPointId, ControlPointRecord, PathFile, PathFollower, PathIterator,
    PathPoint, Spline,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr with pretty formatting, leaving stdout to commands
/// - RUST_LOG environment variable support
/// - `info` by default, `debug` when `verbose`
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
