//! Time-indexed lookup along the path, for control loops and playback.

use crate::generator::PathGenerator;
use crate::path_point::PathPoint;
use crate::spline::Spline;

/// Generates path points at times supplied by the caller.
///
/// Times must not decrease from one call to the next; the follower keeps
/// its place in the path and does not search backwards. Use one follower
/// per consumer and create a new one to replay the path.
#[derive(Debug, Clone)]
pub struct PathFollower<'a> {
    generator: PathGenerator<'a>,
}

impl<'a> PathFollower<'a> {
    pub(crate) fn new(spline: &'a Spline) -> Self {
        Self {
            generator: PathGenerator::new(spline),
        }
    }

    /// The path point at `time` seconds, or `None` once `time` is past the
    /// last control point (or the path has fewer than two points).
    pub fn point_at(&mut self, time: f64) -> Option<PathPoint> {
        if !self.generator.advance_for_time(time) {
            return None;
        }
        self.generator.point_at(time)
    }

    /// True once the end of the path has been reached.
    pub fn is_finished(&self) -> bool {
        self.generator.is_exhausted()
    }
}
