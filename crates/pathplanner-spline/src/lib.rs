//! # PathPlanner Spline
//!
//! The curve engine behind the path editor. A robot path is a sequence of
//! control points (field position, heading and time) joined by cubic
//! Hermite segments whose derivatives follow the Kochanek-Bartels /
//! Cardinal formulation.
//!
//! ## Core Components
//!
//! - **Spline**: the editable list of control points
//! - **ControlPoint**: position, heading, time and derivatives of one point
//! - **PathIterator**: fixed-increment sampling of the whole path, for drawing
//! - **PathFollower**: lookup at caller-supplied times, for control loops
//! - **PathFile**: the JSON document a path is stored as
//!
//! ## Architecture
//!
//! ```text
//! Spline (arena of control points, linked in path order)
//!   ├── PathIterator (borrows the spline, fixed time step)
//!   ├── PathFollower (borrows the spline, monotonic times)
//!   └── PathFile (load / save / mirror)
//! ```
//!
//! Iterators and followers borrow the spline, so the path cannot be edited
//! while one is alive.
//!
//! ## Usage
//!
//! ```rust
//! use pathplanner_spline::Spline;
//!
//! let mut spline = Spline::new();
//! spline.add_control_point(0.0, 0.0, 0.0);
//! spline.add_control_point(10.0, 0.0, 0.0);
//!
//! let points: Vec<_> = spline.curve_segments(0.05).unwrap().collect();
//! assert_eq!(points.len(), 21);
//!
//! let mut follower = spline.path_follower();
//! let halfway = follower.point_at(0.5).unwrap();
//! assert!((halfway.field_x - 5.0).abs() < 1e-9);
//! ```

pub mod basis;
pub mod control_point;
mod generator;
pub mod mirror;
pub mod path_follower;
pub mod path_iterator;
pub mod path_point;
pub mod serialization;
pub mod spline;

pub use basis::{basis_weights, SegmentMatrix, HERMITE_BASIS};
pub use control_point::{
    ControlPoint, ControlPointId, DEFAULT_TENSION, DERIVATIVE_UI_SCALE, HEADING_HANDLE_LENGTH,
};
pub use mirror::mirror_x;
pub use path_follower::PathFollower;
pub use path_iterator::PathIterator;
pub use path_point::PathPoint;
pub use serialization::{ControlPointRecord, PathFile};
pub use spline::{ControlPoints, Spline, DEFAULT_SEGMENT_TIME, DEFAULT_TITLE};
