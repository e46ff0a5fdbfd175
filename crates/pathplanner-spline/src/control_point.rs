//! Control points of the path spline.
//!
//! A control point is a user-placed waypoint: field position, robot heading,
//! the time the robot should be there, and the tangent (derivatives) of the
//! curve through it. Control points live in the [`Spline`](crate::Spline)
//! arena and are linked to their neighbors by slot index, because editing a
//! control point changes the derivatives of the points on either side.

use pathplanner_core::FieldPoint;
use uuid::Uuid;

/// Length of the heading handle drawn from a control point, in meters.
pub const HEADING_HANDLE_LENGTH: f64 = 1.0;

/// Tension applied to the central-difference derivative estimate.
///
/// Chosen so the default curve best matches what the planner intends.
pub const DEFAULT_TENSION: f64 = 0.7;

/// Scale applied to a derivative when placing its editing handle.
pub const DERIVATIVE_UI_SCALE: f64 = 0.5;

/// Handle to a control point in a specific [`Spline`](crate::Spline).
///
/// Handles stay valid until the point is deleted or the path is cleared.
/// A stale handle, or one issued by a different spline, is rejected with
/// `SplineError::InvalidReference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlPointId {
    pub(crate) spline: Uuid,
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

/// A waypoint of the path together with its derivative state.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    pub(crate) id: ControlPointId,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
    pub(crate) field_x: f64,
    pub(crate) field_y: f64,
    pub(crate) field_heading: f64,
    pub(crate) time: f64,
    pub(crate) location_derivatives_edited: bool,
    pub(crate) d_x: f64,
    pub(crate) d_y: f64,
    pub(crate) d_heading: f64,
}

impl ControlPoint {
    pub(crate) fn new(id: ControlPointId, time: f64) -> Self {
        Self {
            id,
            prev: None,
            next: None,
            field_x: 0.0,
            field_y: 0.0,
            field_heading: 0.0,
            time,
            location_derivatives_edited: false,
            d_x: 0.0,
            d_y: 0.0,
            d_heading: 0.0,
        }
    }

    /// Handle identifying this point in its spline.
    pub fn id(&self) -> ControlPointId {
        self.id
    }

    /// Field X position in meters.
    pub fn field_x(&self) -> f64 {
        self.field_x
    }

    /// Field Y position in meters.
    pub fn field_y(&self) -> f64 {
        self.field_y
    }

    /// Field position as a point.
    pub fn field_point(&self) -> FieldPoint {
        FieldPoint::new(self.field_x, self.field_y)
    }

    /// Heading in radians, unwrapped relative to the neighboring points.
    pub fn field_heading(&self) -> f64 {
        self.field_heading
    }

    /// Time in seconds at which the robot should reach this point.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// True once the tangent has been set by hand; the location derivatives
    /// are then frozen until [`reset_derivative`](crate::Spline::reset_derivative).
    pub fn location_derivatives_edited(&self) -> bool {
        self.location_derivatives_edited
    }

    /// Derivative of field X with respect to time.
    pub fn d_x(&self) -> f64 {
        self.d_x
    }

    /// Derivative of field Y with respect to time.
    pub fn d_y(&self) -> f64 {
        self.d_y
    }

    /// Derivative of heading with respect to time.
    pub fn d_heading(&self) -> f64 {
        self.d_heading
    }

    /// True unless this is the first point of the path.
    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }

    /// True unless this is the last point of the path.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Field position of the tangent editing handle.
    pub fn tangent_handle(&self) -> FieldPoint {
        FieldPoint::new(
            self.field_x + DERIVATIVE_UI_SCALE * self.d_x,
            self.field_y + DERIVATIVE_UI_SCALE * self.d_y,
        )
    }

    /// Field position of the heading editing handle.
    pub fn heading_handle(&self) -> FieldPoint {
        self.field_point()
            .offset_along(self.field_heading, HEADING_HANDLE_LENGTH)
    }

    /// Returns `true` if the test point is over the control point.
    pub fn test_over_control_point(&self, field_x: f64, field_y: f64, tolerance: f64) -> bool {
        self.field_point()
            .is_within(&FieldPoint::new(field_x, field_y), tolerance)
    }

    /// Returns `true` if the test point is over the tangent handle.
    pub fn test_over_tangent_point(&self, field_x: f64, field_y: f64, tolerance: f64) -> bool {
        self.tangent_handle()
            .is_within(&FieldPoint::new(field_x, field_y), tolerance)
    }

    /// Returns `true` if the test point is over the heading handle.
    pub fn test_over_heading_point(&self, field_x: f64, field_y: f64, tolerance: f64) -> bool {
        self.heading_handle()
            .is_within(&FieldPoint::new(field_x, field_y), tolerance)
    }
}

/// Cardinal-spline derivative of one channel.
///
/// A missing neighbor is replaced by the point's own value, which flattens
/// the curve at the open ends.
pub(crate) fn cardinal_derivative(prev: Option<f64>, this: f64, next: Option<f64>) -> f64 {
    DEFAULT_TENSION * (next.unwrap_or(this) - prev.unwrap_or(this))
}
