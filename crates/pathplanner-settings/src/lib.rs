//! PathPlanner Settings Crate
//!
//! Handles planner configuration: defaults, validation and persistence.

pub mod config;
pub mod error;

pub use config::{
    OutputSettings, PathSettings, PlannerConfig, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
