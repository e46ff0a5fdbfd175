//! # PathPlanner Core
//!
//! Core types and utilities for PathPlanner.
//! Provides the error hierarchy shared by every crate in the workspace and
//! the field geometry primitives the spline engine is built on.

pub mod error;
pub mod geometry;

pub use error::{Error, PersistenceError, Result, SplineError};
pub use geometry::{
    heading_between, length, nearest_equivalent_angle, wrap_angle, FieldPoint, TWO_PI,
};
