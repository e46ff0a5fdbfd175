//! Field geometry primitives
//!
//! Field coordinates are in meters. Headings are in radians measured
//! clockwise from the field +Y axis, so a heading of 0.0 faces +Y and a
//! heading of PI/2 faces +X. This is why direction vectors are built as
//! `(sin(heading), cos(heading))` throughout the planner.

use std::f64::consts::PI;

/// Two pi, one full turn in radians
pub const TWO_PI: f64 = PI * 2.0;

/// A point on the field, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldPoint {
    pub x: f64,
    pub y: f64,
}

impl FieldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &FieldPoint) -> f64 {
        length(&[self.x - other.x, self.y - other.y])
    }

    /// The point `distance` away from this one along `heading`.
    pub fn offset_along(&self, heading: f64, distance: f64) -> FieldPoint {
        FieldPoint::new(
            self.x + distance * heading.sin(),
            self.y + distance * heading.cos(),
        )
    }

    /// True if `other` is strictly closer than `tolerance`.
    pub fn is_within(&self, other: &FieldPoint, tolerance: f64) -> bool {
        self.distance_to(other) < tolerance
    }
}

/// Euclidean length of an n-dimensional set of components.
///
/// Returns 0.0 for an empty slice.
pub fn length(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Wrap an angle into `[-PI, PI)`.
pub fn wrap_angle(angle: f64) -> f64 {
    if (-PI..PI).contains(&angle) {
        angle
    } else {
        (angle + PI).rem_euclid(TWO_PI) - PI
    }
}

/// The angle equivalent to `angle` (modulo a full turn) that is closest to
/// `reference`, i.e. within `[-PI, PI)` of it.
///
/// Headings are stored unwrapped relative to their neighbors; taking the
/// shortest step from the previous value keeps a crossing of the +/-PI
/// boundary from reading as a nearly full turn.
pub fn nearest_equivalent_angle(angle: f64, reference: f64) -> f64 {
    let delta = angle - reference;
    if (-PI..PI).contains(&delta) {
        angle
    } else {
        reference + wrap_angle(delta)
    }
}

/// Heading (field convention) of the direction from `from` to `to`.
pub fn heading_between(from: &FieldPoint, to: &FieldPoint) -> f64 {
    (to.x - from.x).atan2(to.y - from.y)
}
