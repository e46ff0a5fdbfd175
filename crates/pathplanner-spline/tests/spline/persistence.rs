use pathplanner_spline::{ControlPoint, PathFile, Spline, DEFAULT_TENSION};
use tempfile::tempdir;

fn bits(cp: &ControlPoint) -> [u64; 7] {
    [
        cp.field_x().to_bits(),
        cp.field_y().to_bits(),
        cp.field_heading().to_bits(),
        cp.time().to_bits(),
        cp.d_x().to_bits(),
        cp.d_y().to_bits(),
        cp.d_heading().to_bits(),
    ]
}

fn sample_path() -> Spline {
    let mut spline = Spline::new();
    spline.set_title("Amp Auto");
    spline.set_description("leave the zone, score in the amp");
    spline.add_control_point(1.84, 7.2, 0.0);
    let b = spline.add_control_point(2.9, 6.1, 0.7);
    spline.add_control_point(4.2, 6.8, 1.9);
    spline.set_tangent_location(b, 3.33, 5.71).unwrap();
    spline
}

#[test]
fn test_round_trip_is_exact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("amp_auto.json");
    let original = sample_path();
    original.save_to_file(&path, true).unwrap();

    let restored = Spline::load_from_file(&path).unwrap();
    assert_eq!(restored.title(), "Amp Auto");
    assert_eq!(restored.description(), "leave the zone, score in the amp");
    assert_eq!(restored.len(), original.len());
    for (a, b) in original.control_points().zip(restored.control_points()) {
        assert_eq!(bits(a), bits(b));
        assert_eq!(
            a.location_derivatives_edited(),
            b.location_derivatives_edited()
        );
    }
    assert_eq!(
        PathFile::from_spline(&original),
        PathFile::from_spline(&restored)
    );
}

#[test]
fn test_compact_and_pretty_output_load_the_same() {
    let dir = tempdir().unwrap();
    let pretty = dir.path().join("pretty.json");
    let compact = dir.path().join("compact.json");
    let spline = sample_path();
    spline.save_to_file(&pretty, true).unwrap();
    spline.save_to_file(&compact, false).unwrap();

    let pretty_text = std::fs::read_to_string(&pretty).unwrap();
    let compact_text = std::fs::read_to_string(&compact).unwrap();
    assert!(pretty_text.contains('\n'));
    assert!(!compact_text.contains('\n'));
    assert_eq!(
        PathFile::load_from_file(&pretty).unwrap(),
        PathFile::load_from_file(&compact).unwrap()
    );
}

#[test]
fn test_document_keys() {
    let json = PathFile::from_spline(&sample_path())
        .to_json_string(false)
        .unwrap();
    for key in [
        "\"title\"",
        "\"description\"",
        "\"controlPoints\"",
        "\"fieldX\"",
        "\"fieldY\"",
        "\"fieldHeading\"",
        "\"time\"",
        "\"derivativesEdited\"",
        "\"field_dX\"",
        "\"field_dY\"",
        "\"field_dHeading\"",
    ] {
        assert!(json.contains(key), "missing {key}");
    }
}

#[test]
fn test_missing_derivatives_are_computed_on_load() {
    let json = r#"{
        "title": "hand written",
        "controlPoints": [
            {"fieldX": 0.0, "fieldY": 0.0, "time": 0.0},
            {"fieldX": 1.0, "fieldY": 2.0, "fieldHeading": 0.5, "time": 1.0},
            {"fieldX": 3.0, "fieldY": 2.0, "time": 2.0}
        ]
    }"#;
    let spline = PathFile::from_json_str(json).unwrap().to_spline().unwrap();
    let middle = spline.control_points().nth(1).unwrap();
    assert_eq!(middle.d_x(), DEFAULT_TENSION * (3.0 - 0.0));
    assert_eq!(middle.d_y(), DEFAULT_TENSION * (2.0 - 0.0));
    assert_eq!(middle.d_heading(), DEFAULT_TENSION * (0.0 - 0.0));
    assert!(!middle.location_derivatives_edited());
    assert_eq!(spline.description(), "");
}

#[test]
fn test_malformed_record_reports_index() {
    let json = r#"{
        "controlPoints": [
            {"fieldX": 0.0, "fieldY": 0.0, "time": 0.0},
            {"fieldX": 1.0, "time": 1.0}
        ]
    }"#;
    let err = PathFile::from_json_str(json)
        .unwrap()
        .to_spline()
        .unwrap_err();
    assert!(err.is_malformed_record());
    let message = err.to_string();
    assert!(message.contains("record 1"), "{message}");
    assert!(message.contains("fieldY"), "{message}");
}

#[test]
fn test_wrong_type_in_record_reports_index() {
    let json = r#"{"controlPoints": [{"fieldX": "left", "fieldY": 0.0, "time": 0.0}]}"#;
    let err = PathFile::from_json_str(json).unwrap_err();
    assert!(err.is_malformed_record());
    assert!(err.to_string().contains("record 0"));
}

#[test]
fn test_times_must_increase() {
    let json = r#"{
        "controlPoints": [
            {"fieldX": 0.0, "fieldY": 0.0, "time": 1.0},
            {"fieldX": 1.0, "fieldY": 0.0, "time": 1.0}
        ]
    }"#;
    let err = PathFile::from_json_str(json)
        .unwrap()
        .to_spline()
        .unwrap_err();
    assert!(err.is_malformed_record());
}

#[test]
fn test_not_a_path_document() {
    assert!(PathFile::from_json_str("[1, 2, 3]")
        .unwrap_err()
        .is_malformed_record());
    assert!(PathFile::from_json_str("{\"title\": \"no points\"}")
        .unwrap_err()
        .is_malformed_record());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Spline::load_from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, pathplanner_core::Error::Io(_)));
}

#[test]
fn test_mirrored_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mirrored.json");
    let mut spline = sample_path();
    spline.mirror_about_x(-1.4478);
    spline.save_to_file(&path, true).unwrap();

    let mut file = PathFile::load_from_file(&path).unwrap();
    file.mirror_about_x(-1.4478);
    let restored = file.to_spline().unwrap();
    for (a, b) in sample_path().control_points().zip(restored.control_points()) {
        assert!((a.field_x() - b.field_x()).abs() < 1e-12);
        assert_eq!(a.field_y(), b.field_y());
        assert_eq!(a.field_heading(), b.field_heading());
        assert_eq!(a.d_x(), b.d_x());
        assert_eq!(a.location_derivatives_edited(), b.location_derivatives_edited());
    }
}

#[test]
fn test_non_finite_position_is_not_saved() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nan.json");
    let mut spline = sample_path();
    let first = spline.first().unwrap().id();
    spline.set_field_location(first, f64::NAN, 0.0).unwrap();

    let err = spline.save_to_file(&path, true).unwrap_err();
    assert!(err.is_malformed_record());
    assert!(err.to_string().starts_with("Malformed record 0:"));
    assert!(!path.exists());
}
