//! Cubic Hermite segment evaluation.
//!
//! A segment between two control points is described, per channel
//! (x, y, heading), by the start value, end value, start derivative and end
//! derivative. Weighting those four values with the Hermite basis gives the
//! position on the curve and its rate of change:
//!
//! ```text
//! [s^3 s^2 s 1] * B * [p0 p1 d0 d1]^T
//!
//!     |  2 -2  1  1 |
//! B = | -3  3 -2 -1 |
//!     |  0  0  1  0 |
//!     |  1  0  0  0 |
//! ```

use crate::control_point::ControlPoint;
use crate::path_point::PathPoint;

/// Hermite basis matrix.
pub const HERMITE_BASIS: [[f64; 4]; 4] = [
    [2.0, -2.0, 1.0, 1.0],
    [-3.0, 3.0, -2.0, -1.0],
    [0.0, 0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];

/// Weights for position and for its derivative at local parameter `s`.
pub fn basis_weights(s: f64) -> ([f64; 4], [f64; 4]) {
    let powers = [s * s * s, s * s, s, 1.0];
    let d_powers = [3.0 * s * s, 2.0 * s, 1.0, 0.0];
    let mut weights = [0.0; 4];
    let mut d_weights = [0.0; 4];
    for i in 0..4 {
        for j in 0..4 {
            weights[i] += powers[j] * HERMITE_BASIS[j][i];
            d_weights[i] += d_powers[j] * HERMITE_BASIS[j][i];
        }
    }
    (weights, d_weights)
}

/// Boundary conditions of one segment: rows are start value, end value,
/// start derivative, end derivative; columns are x, y, heading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SegmentMatrix {
    rows: [[f64; 3]; 4],
}

impl SegmentMatrix {
    pub fn new(start: &ControlPoint, end: &ControlPoint) -> Self {
        Self {
            rows: [
                [start.field_x, start.field_y, start.field_heading],
                [end.field_x, end.field_y, end.field_heading],
                [start.d_x, start.d_y, start.d_heading],
                [end.d_x, end.d_y, end.d_heading],
            ],
        }
    }

    /// Field value and field derivative of every channel at `s`.
    pub fn sample(&self, s: f64) -> ([f64; 3], [f64; 3]) {
        let (weights, d_weights) = basis_weights(s);
        let mut field = [0.0; 3];
        let mut d_field = [0.0; 3];
        for channel in 0..3 {
            for (j, row) in self.rows.iter().enumerate() {
                field[channel] += weights[j] * row[channel];
                d_field[channel] += d_weights[j] * row[channel];
            }
        }
        (field, d_field)
    }

    /// Evaluate the segment bounded by `start` and `end` at local time `s`.
    pub fn evaluate(&self, s: f64, start: &ControlPoint, end: &ControlPoint) -> PathPoint {
        let (field, d_field) = self.sample(s);
        PathPoint::from_field(field, d_field, start.id, end.id)
    }
}
