use pathplanner_core::FieldPoint;
use pathplanner_spline::{SegmentMatrix, Spline};
use std::f64::consts::FRAC_PI_2;

const EPS: f64 = 1e-9;

#[test]
fn test_straight_line_midpoint() {
    let mut spline = Spline::new();
    spline.add_control_point(0.0, 0.0, 0.0);
    spline.add_control_point(10.0, 0.0, 0.0);

    let mut follower = spline.path_follower();
    let mid = follower.point_at(0.5).unwrap();
    assert_eq!(mid.field_x, 5.0);
    assert_eq!(mid.field_y, 0.0);
    assert_eq!(mid.field_heading, 0.0);
    // facing +Y while travelling along +X is all strafe
    assert_eq!(mid.speed_forward, 0.0);
    assert!((mid.speed_strafe - 11.5).abs() < EPS);
    assert_eq!(mid.speed_rotation, 0.0);
}

#[test]
fn test_straight_line_facing_travel_has_no_strafe() {
    let mut spline = Spline::new();
    spline.add_control_point(0.0, 0.0, 0.0);
    spline.add_control_point(0.0, 10.0, 0.0);

    let mid = spline.path_follower().point_at(0.5).unwrap();
    assert_eq!(mid.field_y, 5.0);
    assert_eq!(mid.speed_strafe, 0.0);
    assert!((mid.speed_forward - 11.5).abs() < EPS);

    let mut spline = Spline::new();
    spline.add_control_point(0.0, 0.0, FRAC_PI_2);
    spline.add_control_point(10.0, 0.0, FRAC_PI_2);
    let mid = spline.path_follower().point_at(0.5).unwrap();
    assert!(mid.speed_strafe.abs() < EPS);
    assert!((mid.speed_forward - 11.5).abs() < EPS);
}

#[test]
fn test_segments_share_boundary_values() {
    let mut spline = Spline::new();
    let a = spline.add_control_point(0.0, 0.0, 0.0);
    let b = spline.add_control_point(2.0, 1.0, 0.5);
    let c = spline.add_control_point(3.0, 4.0, -0.25);
    spline.set_tangent_location(b, 3.0, 3.0).unwrap();

    let a = spline.control_point(a).unwrap();
    let b = spline.control_point(b).unwrap();
    let c = spline.control_point(c).unwrap();
    let left = SegmentMatrix::new(a, b);
    let right = SegmentMatrix::new(b, c);

    let (left_field, left_d) = left.sample(b.time() - a.time());
    let (right_field, right_d) = right.sample(0.0);
    for axis in 0..3 {
        assert!((left_field[axis] - right_field[axis]).abs() < EPS);
        assert!((left_d[axis] - right_d[axis]).abs() < EPS);
    }
    assert!((left_field[0] - b.field_x()).abs() < EPS);
    assert!((left_d[0] - b.d_x()).abs() < EPS);
    assert!((left_d[1] - b.d_y()).abs() < EPS);
}

#[test]
fn test_iterator_and_follower_agree() {
    let mut spline = Spline::new();
    spline.add_control_point(0.0, 0.0, 0.0);
    spline.add_control_point(1.0, 2.0, 0.3);
    spline.add_control_point(3.0, 2.5, 1.0);
    spline.add_control_point(4.0, 0.0, 1.2);

    let interval = 0.1;
    let sampled: Vec<_> = spline.curve_segments(interval).unwrap().collect();
    assert_eq!(sampled.len(), 31);

    let mut follower = spline.path_follower();
    for (step, point) in sampled.iter().enumerate() {
        let time = (step as f64 * interval).min(3.0);
        let followed = follower.point_at(time).unwrap();
        assert!((followed.field_x - point.field_x).abs() < EPS);
        assert!((followed.field_y - point.field_y).abs() < EPS);
        assert!((followed.field_heading - point.field_heading).abs() < EPS);
    }
    assert!(follower.point_at(3.5).is_none());
}

#[test]
fn test_samples_carry_bounding_control_points() {
    let mut spline = Spline::new();
    let a = spline.add_control_point(0.0, 0.0, 0.0);
    let b = spline.add_control_point(1.0, 0.0, 0.0);
    let c = spline.add_control_point(2.0, 0.0, 0.0);

    let samples: Vec<_> = spline.curve_segments(0.5).unwrap().collect();
    assert_eq!(samples.len(), 5);
    assert_eq!(samples[1].previous_control_point, a);
    assert_eq!(samples[1].next_control_point, b);
    assert_eq!(samples[3].previous_control_point, b);
    assert_eq!(samples[3].next_control_point, c);
    assert_eq!(samples[4].next_control_point, c);
    assert_eq!(samples[0].field_point(), FieldPoint::new(0.0, 0.0));
    assert_eq!(samples[4].field_point(), FieldPoint::new(2.0, 0.0));
}

#[test]
fn test_follower_jumping_ahead_matches_stepping() {
    let mut spline = Spline::new();
    let ids: Vec<_> = [(0.0, 0.0), (1.0, 0.5), (2.0, -0.5), (3.0, 1.0), (4.0, 0.0)]
        .iter()
        .map(|&(x, y)| spline.add_control_point(x, y, 0.0))
        .collect();

    let mut jumping = spline.path_follower();
    let jumped = jumping.point_at(3.5).unwrap();

    let mut stepping = spline.path_follower();
    let mut stepped = None;
    for step in 0..=35 {
        stepped = stepping.point_at(step as f64 * 0.1);
    }
    let stepped = stepped.unwrap();

    assert_eq!(jumped.previous_control_point, ids[3]);
    assert_eq!(jumped.next_control_point, ids[4]);
    assert_eq!(stepped.previous_control_point, ids[3]);
    assert_eq!(stepped.next_control_point, ids[4]);
    assert!((jumped.field_x - stepped.field_x).abs() < EPS);
    assert!((jumped.field_y - stepped.field_y).abs() < EPS);
    assert!((jumped.field_x - 3.5875).abs() < EPS);
}

#[test]
fn test_invalid_interval_is_rejected() {
    let mut spline = Spline::new();
    spline.add_control_point(0.0, 0.0, 0.0);
    spline.add_control_point(1.0, 0.0, 0.0);
    for interval in [0.0, -0.1, f64::NAN, f64::INFINITY] {
        assert!(spline.curve_segments(interval).is_err());
    }
}
