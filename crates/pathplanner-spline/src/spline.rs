//! The path spline: an ordered, doubly-linked sequence of control points.
//!
//! This is an implementation of a Kochanek-Bartels spline designed for
//! interactive editing of the tangent to implicitly control bias and
//! tension. There is no continuity control.
//!
//! When control points are created, the derivatives at that point and at
//! its neighbors are computed with the Cardinal-spline formulation using
//! [`DEFAULT_TENSION`](crate::DEFAULT_TENSION). The tangent handle then lets
//! the planner reshape the curve at the control point.
//!
//! Control points are kept in an arena of slots linked by index. The spline
//! is a container-editor for that list and a factory for
//! [`PathIterator`] (fixed-increment sampling for drawing) and
//! [`PathFollower`] (lookup at externally supplied times).

use pathplanner_core::{
    heading_between, nearest_equivalent_angle, FieldPoint, Result, SplineError,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::control_point::{
    cardinal_derivative, ControlPoint, ControlPointId, DERIVATIVE_UI_SCALE,
};
use crate::path_follower::PathFollower;
use crate::path_iterator::PathIterator;

/// Title given to a new or cleared path.
pub const DEFAULT_TITLE: &str = "untitled";

/// Time spacing between sequentially added control points, in seconds.
pub const DEFAULT_SEGMENT_TIME: f64 = 1.0;

#[derive(Debug, Clone)]
struct Slot {
    live: bool,
    point: ControlPoint,
}

/// A robot path described by control points.
#[derive(Debug, Clone)]
pub struct Spline {
    id: Uuid,
    slots: Vec<Slot>,
    free: Vec<usize>,
    first: Option<usize>,
    last: Option<usize>,
    len: usize,
    title: String,
    description: String,
}

impl Default for Spline {
    fn default() -> Self {
        Self::new()
    }
}

impl Spline {
    /// Create an empty path.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            slots: Vec::new(),
            free: Vec::new(),
            first: None,
            last: None,
            len: 0,
            title: DEFAULT_TITLE.to_string(),
            description: String::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Metadata

    /// Path title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the path title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Free-form path description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the path description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    // ---------------------------------------------------------------------
    // Queries

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the path has no control points.
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// The first control point, if any.
    pub fn first(&self) -> Option<&ControlPoint> {
        self.first.map(|idx| self.node(idx))
    }

    /// The last control point, if any.
    pub fn last(&self) -> Option<&ControlPoint> {
        self.last.map(|idx| self.node(idx))
    }

    /// Time from the first to the last control point, 0.0 for an empty path.
    pub fn duration(&self) -> f64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }

    /// Look up a control point by handle.
    pub fn control_point(&self, id: ControlPointId) -> Result<&ControlPoint> {
        let idx = self.resolve(id)?;
        Ok(self.node(idx))
    }

    /// The control point before `id`, `None` at the start of the path.
    pub fn previous(&self, id: ControlPointId) -> Result<Option<&ControlPoint>> {
        let idx = self.resolve(id)?;
        Ok(self.node(idx).prev.map(|p| self.node(p)))
    }

    /// The control point after `id`, `None` at the end of the path.
    pub fn next(&self, id: ControlPointId) -> Result<Option<&ControlPoint>> {
        let idx = self.resolve(id)?;
        Ok(self.node(idx).next.map(|n| self.node(n)))
    }

    /// The control points in path (time) order.
    pub fn control_points(&self) -> ControlPoints<'_> {
        ControlPoints {
            spline: self,
            current: self.first,
        }
    }

    /// Points along the path every `interval` seconds, for drawing.
    pub fn curve_segments(&self, interval: f64) -> Result<PathIterator<'_>> {
        if !(interval.is_finite() && interval > 0.0) {
            return Err(SplineError::InvalidInterval { interval }.into());
        }
        Ok(PathIterator::new(self, interval))
    }

    /// A follower that generates path points at caller supplied times.
    pub fn path_follower(&self) -> PathFollower<'_> {
        PathFollower::new(self)
    }

    // ---------------------------------------------------------------------
    // Structural mutation

    /// Append a control point to the end of the path.
    ///
    /// The first point is at time 0.0, each later one a fixed
    /// [`DEFAULT_SEGMENT_TIME`] after its predecessor.
    pub fn add_control_point(
        &mut self,
        field_x: f64,
        field_y: f64,
        field_heading: f64,
    ) -> ControlPointId {
        let (time, reference_heading) = match self.last {
            Some(last) => {
                let last = self.node(last);
                (last.time + DEFAULT_SEGMENT_TIME, last.field_heading)
            }
            None => (0.0, 0.0),
        };
        let idx = self.allocate(time);
        self.node_mut(idx).field_heading = reference_heading;
        self.push_back(idx);

        self.apply_field_location(idx, field_x, field_y);
        self.apply_field_heading(idx, field_heading);
        debug!(
            "Added control point {} at ({:.3}, {:.3}) t={:.3}",
            idx, field_x, field_y, time
        );
        self.node(idx).id
    }

    /// Splice a new control point in immediately before `target`.
    ///
    /// The new point takes the slot in time that `target` had, and every
    /// point from there to the end moves one step later; the last point is
    /// pushed out by [`DEFAULT_SEGMENT_TIME`].
    pub fn insert_control_point_before(
        &mut self,
        target: ControlPointId,
        field_x: f64,
        field_y: f64,
        field_heading: f64,
    ) -> Result<ControlPointId> {
        let target_idx = self.resolve(target)?;
        let (target_time, target_prev) = {
            let t = self.node(target_idx);
            (t.time, t.prev)
        };
        let reference_heading = self
            .node(target_prev.unwrap_or(target_idx))
            .field_heading;

        let idx = self.allocate(target_time);
        {
            let new_point = self.node_mut(idx);
            new_point.field_heading = reference_heading;
            new_point.prev = target_prev;
            new_point.next = Some(target_idx);
        }
        self.node_mut(target_idx).prev = Some(idx);
        match target_prev {
            Some(prev) => self.node_mut(prev).next = Some(idx),
            None => self.first = Some(idx),
        }
        self.len += 1;

        // make room in time: each point takes its successor's time
        let mut current = Some(idx);
        while let Some(c) = current {
            let next = self.node(c).next;
            let time = match next {
                Some(n) => self.node(n).time,
                None => self.node(c).time + DEFAULT_SEGMENT_TIME,
            };
            self.node_mut(c).time = time;
            current = next;
        }

        self.apply_field_location(idx, field_x, field_y);
        self.apply_field_heading(idx, field_heading);
        debug!(
            "Inserted control point {} before {} at ({:.3}, {:.3}) t={:.3}",
            idx,
            target_idx,
            field_x,
            field_y,
            self.node(idx).time
        );
        Ok(self.node(idx).id)
    }

    /// Remove a control point, closing up the time gap it leaves.
    pub fn delete_control_point(&mut self, target: ControlPointId) -> Result<()> {
        let target_idx = self.resolve(target)?;
        let (prev, next) = {
            let t = self.node(target_idx);
            (t.prev, t.next)
        };

        // collapse time: walking back from the end, each point takes the
        // time of the point that preceded it
        let mut current = self.last;
        while let Some(c) = current {
            if c == target_idx {
                break;
            }
            let Some(p) = self.node(c).prev else { break };
            self.node_mut(c).time = self.node(p).time;
            current = Some(p);
        }

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.first = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.last = prev,
        }
        self.release(target_idx);
        self.len -= 1;

        for neighbor in [prev, next].into_iter().flatten() {
            self.update_location_derivatives(neighbor);
            self.update_heading_derivative(neighbor);
        }
        debug!("Deleted control point {}, {} remaining", target_idx, self.len);
        Ok(())
    }

    /// Remove every control point and restore the default metadata.
    ///
    /// All handles issued before the clear become invalid.
    pub fn clear_path(&mut self) {
        self.id = Uuid::new_v4();
        self.slots.clear();
        self.free.clear();
        self.first = None;
        self.last = None;
        self.len = 0;
        self.title = DEFAULT_TITLE.to_string();
        self.description.clear();
        debug!("Cleared path");
    }

    // ---------------------------------------------------------------------
    // Control point editing

    /// Move a control point. Its derivatives and those of both neighbors
    /// are recomputed unless they have been edited by hand.
    pub fn set_field_location(
        &mut self,
        id: ControlPointId,
        field_x: f64,
        field_y: f64,
    ) -> Result<()> {
        let idx = self.resolve(id)?;
        self.apply_field_location(idx, field_x, field_y);
        Ok(())
    }

    /// Set the tangent from the field position of its editing handle.
    ///
    /// This freezes the location derivatives of the point until
    /// [`reset_derivative`](Self::reset_derivative) is called.
    pub fn set_tangent_location(
        &mut self,
        id: ControlPointId,
        field_x: f64,
        field_y: f64,
    ) -> Result<()> {
        let idx = self.resolve(id)?;
        let point = self.node_mut(idx);
        point.d_x = (field_x - point.field_x) / DERIVATIVE_UI_SCALE;
        point.d_y = (field_y - point.field_y) / DERIVATIVE_UI_SCALE;
        point.location_derivatives_edited = true;
        Ok(())
    }

    /// Discard a hand-edited tangent and go back to the default derivatives.
    pub fn reset_derivative(&mut self, id: ControlPointId) -> Result<()> {
        let idx = self.resolve(id)?;
        if self.node(idx).location_derivatives_edited {
            self.node_mut(idx).location_derivatives_edited = false;
            self.update_location_derivatives(idx);
            self.update_heading_derivative(idx);
        }
        Ok(())
    }

    /// Set the heading of a control point.
    ///
    /// The stored heading is the equivalent angle closest to the current
    /// one, so the robot always takes the short way round.
    pub fn set_field_heading(&mut self, id: ControlPointId, heading: f64) -> Result<()> {
        let idx = self.resolve(id)?;
        self.apply_field_heading(idx, heading);
        Ok(())
    }

    /// Set the heading from the field position of the heading handle.
    pub fn set_heading_location(
        &mut self,
        id: ControlPointId,
        field_x: f64,
        field_y: f64,
    ) -> Result<()> {
        let idx = self.resolve(id)?;
        let heading = heading_between(
            &self.node(idx).field_point(),
            &FieldPoint::new(field_x, field_y),
        );
        self.apply_field_heading(idx, heading);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Crate internals

    pub(crate) fn first_index(&self) -> Option<usize> {
        self.first
    }

    pub(crate) fn node(&self, idx: usize) -> &ControlPoint {
        &self.slots[idx].point
    }

    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut ControlPoint {
        &mut self.slots[idx].point
    }

    /// Indices of the live control points in path order.
    pub(crate) fn indices(&self) -> Vec<usize> {
        self.control_points().map(|cp| cp.id.index).collect()
    }

    /// Append a point restored from a stored document. Derivatives are
    /// whatever `restore` sets; nothing is recomputed.
    pub(crate) fn append_restored(
        &mut self,
        time: f64,
        restore: impl FnOnce(&mut ControlPoint),
    ) -> usize {
        let idx = self.allocate(time);
        self.push_back(idx);
        restore(self.node_mut(idx));
        idx
    }

    pub(crate) fn update_location_derivatives(&mut self, idx: usize) {
        let point = self.node(idx);
        // an edited derivative is the intended one, moving the point keeps it
        if point.location_derivatives_edited {
            return;
        }
        let prev = point.prev.map(|p| self.node(p).field_point());
        let next = point.next.map(|n| self.node(n).field_point());
        let d_x = cardinal_derivative(prev.map(|p| p.x), point.field_x, next.map(|n| n.x));
        let d_y = cardinal_derivative(prev.map(|p| p.y), point.field_y, next.map(|n| n.y));
        let point = self.node_mut(idx);
        point.d_x = d_x;
        point.d_y = d_y;
    }

    pub(crate) fn update_heading_derivative(&mut self, idx: usize) {
        let point = self.node(idx);
        let prev = point.prev.map(|p| self.node(p).field_heading);
        let next = point.next.map(|n| self.node(n).field_heading);
        let d_heading = cardinal_derivative(prev, point.field_heading, next);
        self.node_mut(idx).d_heading = d_heading;
    }

    fn apply_field_location(&mut self, idx: usize, field_x: f64, field_y: f64) {
        let (prev, next) = {
            let point = self.node_mut(idx);
            point.field_x = field_x;
            point.field_y = field_y;
            (point.prev, point.next)
        };
        self.update_location_derivatives(idx);
        for neighbor in [prev, next].into_iter().flatten() {
            self.update_location_derivatives(neighbor);
        }
    }

    fn apply_field_heading(&mut self, idx: usize, heading: f64) {
        let (prev, next) = {
            let point = self.node_mut(idx);
            point.field_heading = nearest_equivalent_angle(heading, point.field_heading);
            (point.prev, point.next)
        };
        self.update_heading_derivative(idx);
        for neighbor in [prev, next].into_iter().flatten() {
            self.update_heading_derivative(neighbor);
        }
    }

    fn push_back(&mut self, idx: usize) {
        match self.last {
            Some(last) => {
                self.node_mut(last).next = Some(idx);
                self.node_mut(idx).prev = Some(last);
            }
            None => self.first = Some(idx),
        }
        self.last = Some(idx);
        self.len += 1;
    }

    fn resolve(&self, id: ControlPointId) -> Result<usize> {
        match self.slots.get(id.index) {
            Some(slot) if id.spline == self.id && slot.live && slot.point.id == id => {
                Ok(id.index)
            }
            _ => {
                warn!(
                    "Rejected control point reference (slot {}, generation {})",
                    id.index, id.generation
                );
                Err(SplineError::InvalidReference {
                    index: id.index,
                    generation: id.generation,
                }
                .into())
            }
        }
    }

    fn allocate(&mut self, time: f64) -> usize {
        match self.free.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx];
                let id = ControlPointId {
                    generation: slot.point.id.generation.wrapping_add(1),
                    ..slot.point.id
                };
                slot.live = true;
                slot.point = ControlPoint::new(id, time);
                idx
            }
            None => {
                let idx = self.slots.len();
                let id = ControlPointId {
                    spline: self.id,
                    index: idx,
                    generation: 0,
                };
                self.slots.push(Slot {
                    live: true,
                    point: ControlPoint::new(id, time),
                });
                idx
            }
        }
    }

    fn release(&mut self, idx: usize) {
        let slot = &mut self.slots[idx];
        slot.live = false;
        slot.point.prev = None;
        slot.point.next = None;
        self.free.push(idx);
    }
}

/// Forward iterator over the control points of a [`Spline`], in time order.
#[derive(Debug, Clone)]
pub struct ControlPoints<'a> {
    spline: &'a Spline,
    current: Option<usize>,
}

impl<'a> Iterator for ControlPoints<'a> {
    type Item = &'a ControlPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.spline.node(self.current?);
        self.current = point.next;
        Some(point)
    }
}

impl std::iter::FusedIterator for ControlPoints<'_> {}
