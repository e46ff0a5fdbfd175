//! Fixed-increment traversal of the path, for drawing.

use crate::generator::PathGenerator;
use crate::path_point::PathPoint;
use crate::spline::Spline;

/// Slack allowed when the sample time lands on the last control point.
const END_TIME_TOLERANCE: f64 = 1.0e-9;

/// An iterator over points along a path at a fixed time increment.
///
/// Starts at the first control point and ends once the sample time passes
/// the last control point. Single pass; ask the spline for a new iterator
/// to start over.
#[derive(Debug, Clone)]
pub struct PathIterator<'a> {
    generator: PathGenerator<'a>,
    interval: f64,
    start_time: f64,
    end_time: f64,
    step: u64,
    finished: bool,
}

impl<'a> PathIterator<'a> {
    pub(crate) fn new(spline: &'a Spline, interval: f64) -> Self {
        let start_time = spline.first().map(|cp| cp.time()).unwrap_or(0.0);
        let end_time = spline.last().map(|cp| cp.time()).unwrap_or(0.0);
        let generator = PathGenerator::new(spline);
        let finished = generator.is_exhausted();
        Self {
            generator,
            interval,
            start_time,
            end_time,
            step: 0,
            finished,
        }
    }

    /// Time increment between generated points, in seconds.
    pub fn interval(&self) -> f64 {
        self.interval
    }
}

impl Iterator for PathIterator<'_> {
    type Item = PathPoint;

    fn next(&mut self) -> Option<PathPoint> {
        if self.finished {
            return None;
        }
        // computed from the step count so rounding does not accumulate
        let time = self.start_time + self.step as f64 * self.interval;
        if time > self.end_time + END_TIME_TOLERANCE {
            self.finished = true;
            return None;
        }
        let time = time.min(self.end_time);
        if !self.generator.advance_for_time(time) {
            self.finished = true;
            return None;
        }
        self.step += 1;
        self.generator.point_at(time)
    }
}

impl std::iter::FusedIterator for PathIterator<'_> {}
