//! Generated samples of the path.

use crate::control_point::ControlPointId;
use pathplanner_core::FieldPoint;

/// A generated point along the path.
///
/// Carries where the robot should be, which way it should face, and the
/// chassis speeds needed to follow the path at that instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    /// Expected field X position of the robot in meters.
    pub field_x: f64,
    /// Expected field Y position of the robot in meters.
    pub field_y: f64,
    /// Expected heading of the robot in radians.
    pub field_heading: f64,
    /// Forward chassis speed in meters/sec.
    pub speed_forward: f64,
    /// Strafe chassis speed in meters/sec.
    pub speed_strafe: f64,
    /// Rotation speed in radians/sec.
    pub speed_rotation: f64,
    /// Control point at the start of the segment this point came from.
    pub previous_control_point: ControlPointId,
    /// Control point at the end of the segment this point came from.
    pub next_control_point: ControlPointId,
}

impl PathPoint {
    /// Build a path point from field-space position and derivatives.
    ///
    /// The field velocity is rotated into the robot frame using the heading
    /// at this instant. Heading rate is the same in both frames.
    pub(crate) fn from_field(
        field: [f64; 3],
        d_field: [f64; 3],
        previous_control_point: ControlPointId,
        next_control_point: ControlPointId,
    ) -> Self {
        let (sin_heading, cos_heading) = field[2].sin_cos();
        Self {
            field_x: field[0],
            field_y: field[1],
            field_heading: field[2],
            speed_forward: d_field[0] * sin_heading + d_field[1] * cos_heading,
            speed_strafe: d_field[0] * cos_heading - d_field[1] * sin_heading,
            speed_rotation: d_field[2],
            previous_control_point,
            next_control_point,
        }
    }

    /// Field position as a point.
    pub fn field_point(&self) -> FieldPoint {
        FieldPoint::new(self.field_x, self.field_y)
    }
}
