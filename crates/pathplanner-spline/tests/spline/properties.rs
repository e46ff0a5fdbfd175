use pathplanner_spline::{ControlPoint, Spline, DEFAULT_TENSION};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Add(f64, f64, f64),
    Insert(usize, f64, f64, f64),
    Delete(usize),
    Move(usize, f64, f64),
    Turn(usize, f64),
}

fn coordinate() -> impl Strategy<Value = f64> {
    -10.0..10.0f64
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (coordinate(), coordinate(), -4.0..4.0f64).prop_map(|(x, y, h)| Edit::Add(x, y, h)),
        2 => (any::<usize>(), coordinate(), coordinate(), -4.0..4.0f64)
            .prop_map(|(i, x, y, h)| Edit::Insert(i, x, y, h)),
        1 => any::<usize>().prop_map(Edit::Delete),
        2 => (any::<usize>(), coordinate(), coordinate()).prop_map(|(i, x, y)| Edit::Move(i, x, y)),
        1 => (any::<usize>(), -4.0..4.0f64).prop_map(|(i, h)| Edit::Turn(i, h)),
    ]
}

fn apply(spline: &mut Spline, edit: &Edit) {
    let ids: Vec<_> = spline.control_points().map(|cp| cp.id()).collect();
    let pick = |i: usize| ids.get(i % ids.len().max(1)).copied();
    match *edit {
        Edit::Add(x, y, h) => {
            spline.add_control_point(x, y, h);
        }
        Edit::Insert(i, x, y, h) => {
            if let Some(id) = pick(i) {
                spline.insert_control_point_before(id, x, y, h).unwrap();
            }
        }
        Edit::Delete(i) => {
            if let Some(id) = pick(i) {
                spline.delete_control_point(id).unwrap();
            }
        }
        Edit::Move(i, x, y) => {
            if let Some(id) = pick(i) {
                spline.set_field_location(id, x, y).unwrap();
            }
        }
        Edit::Turn(i, h) => {
            if let Some(id) = pick(i) {
                spline.set_field_heading(id, h).unwrap();
            }
        }
    }
}

fn expected(prev: Option<f64>, this: f64, next: Option<f64>) -> f64 {
    DEFAULT_TENSION * (next.unwrap_or(this) - prev.unwrap_or(this))
}

proptest! {
    #[test]
    fn prop_times_strictly_increase(edits in prop::collection::vec(edit(), 1..40)) {
        let mut spline = Spline::new();
        for edit in &edits {
            apply(&mut spline, edit);
        }
        let times: Vec<f64> = spline.control_points().map(|cp| cp.time()).collect();
        prop_assert_eq!(times.len(), spline.len());
        for pair in times.windows(2) {
            prop_assert!(pair[0] < pair[1], "times {:?}", times);
        }
    }

    #[test]
    fn prop_default_derivatives_follow_neighbors(edits in prop::collection::vec(edit(), 1..40)) {
        let mut spline = Spline::new();
        for edit in &edits {
            apply(&mut spline, edit);
        }
        let points: Vec<&ControlPoint> = spline.control_points().collect();
        for (i, cp) in points.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| points[p]);
            let next = points.get(i + 1);
            prop_assert_eq!(
                cp.d_x(),
                expected(prev.map(|p| p.field_x()), cp.field_x(), next.map(|n| n.field_x()))
            );
            prop_assert_eq!(
                cp.d_y(),
                expected(prev.map(|p| p.field_y()), cp.field_y(), next.map(|n| n.field_y()))
            );
            prop_assert_eq!(
                cp.d_heading(),
                expected(
                    prev.map(|p| p.field_heading()),
                    cp.field_heading(),
                    next.map(|n| n.field_heading())
                )
            );
        }
    }

    #[test]
    fn prop_iterator_ends_on_last_point(
        edits in prop::collection::vec(edit(), 1..20),
        interval in 0.01..0.7f64,
    ) {
        let mut spline = Spline::new();
        for edit in &edits {
            apply(&mut spline, edit);
        }
        let samples: Vec<_> = spline.curve_segments(interval).unwrap().collect();
        if spline.len() < 2 {
            prop_assert!(samples.is_empty());
        } else {
            let first = spline.first().unwrap();
            prop_assert!((samples[0].field_x - first.field_x()).abs() < 1e-9);
            let steps = (0u64..)
                .take_while(|n| *n as f64 * interval <= spline.duration() + 1e-9)
                .count();
            prop_assert_eq!(samples.len(), steps);
        }
    }
}
