//! Mirroring a path across a vertical field line.
//!
//! Paths planned for one side of a symmetric field element are reused for
//! the other side by reflecting them across `x = axis`. X positions reflect,
//! X derivatives and headings (and heading rates) change sign; Y, time and
//! the edited state are unchanged.

use crate::serialization::PathFile;
use crate::spline::Spline;
use tracing::debug;

/// Reflect an X coordinate across the line `x = axis`.
pub fn mirror_x(axis: f64, x: f64) -> f64 {
    axis + (axis - x)
}

impl Spline {
    /// Reflect the whole path across the field line `x = axis`.
    pub fn mirror_about_x(&mut self, axis: f64) {
        for idx in self.indices() {
            let cp = self.node_mut(idx);
            cp.field_x = mirror_x(axis, cp.field_x);
            cp.d_x = -cp.d_x;
            cp.field_heading = -cp.field_heading;
            cp.d_heading = -cp.d_heading;
        }
        debug!("Mirrored {} control points about x={}", self.len(), axis);
    }
}

impl PathFile {
    /// Reflect every stored control point across the field line `x = axis`.
    ///
    /// Fields missing from a record stay missing.
    pub fn mirror_about_x(&mut self, axis: f64) {
        for record in &mut self.control_points {
            record.field_x = record.field_x.map(|x| mirror_x(axis, x));
            record.field_heading = record.field_heading.map(|h| -h);
            record.field_dx = record.field_dx.map(|d| -d);
            record.field_dheading = record.field_dheading.map(|d| -d);
        }
    }
}
