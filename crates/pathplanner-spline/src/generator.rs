//! Segment cursor shared by [`PathIterator`](crate::PathIterator) and
//! [`PathFollower`](crate::PathFollower).

use crate::basis::SegmentMatrix;
use crate::path_point::PathPoint;
use crate::spline::Spline;

/// Tracks the pair of control points bounding the current segment.
///
/// Time only moves forward: the cursor advances to later segments as the
/// query time passes the end of the current one, and never rewinds. Once
/// the time passes the last control point the generator is exhausted.
#[derive(Debug, Clone)]
pub(crate) struct PathGenerator<'a> {
    spline: &'a Spline,
    segment_start: Option<usize>,
    segment_end: Option<usize>,
    segment: SegmentMatrix,
}

impl<'a> PathGenerator<'a> {
    pub(crate) fn new(spline: &'a Spline) -> Self {
        let segment_start = spline.first_index();
        let segment_end = segment_start.and_then(|idx| spline.node(idx).next);
        let mut generator = Self {
            spline,
            segment_start,
            segment_end,
            segment: SegmentMatrix::default(),
        };
        generator.reset_segment();
        generator
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.segment_end.is_none()
    }

    /// Move forward until the current segment ends at or after `time`.
    ///
    /// Returns `false` once `time` is past the last control point (or the
    /// path has fewer than two points).
    pub(crate) fn advance_for_time(&mut self, time: f64) -> bool {
        let (Some(mut start), Some(mut end)) = (self.segment_start, self.segment_end) else {
            return false;
        };
        let mut moved = false;
        while time > self.spline.node(end).time {
            start = end;
            moved = true;
            match self.spline.node(start).next {
                Some(next) => end = next,
                None => {
                    self.segment_start = Some(start);
                    self.segment_end = None;
                    return false;
                }
            }
        }
        if moved {
            self.segment_start = Some(start);
            self.segment_end = Some(end);
            self.reset_segment();
        }
        true
    }

    /// Evaluate the current segment at absolute `time`.
    pub(crate) fn point_at(&self, time: f64) -> Option<PathPoint> {
        let start = self.spline.node(self.segment_start?);
        let end = self.spline.node(self.segment_end?);
        Some(self.segment.evaluate(time - start.time, start, end))
    }

    fn reset_segment(&mut self) {
        if let (Some(start), Some(end)) = (self.segment_start, self.segment_end) {
            self.segment = SegmentMatrix::new(self.spline.node(start), self.spline.node(end));
        }
    }
}
