mod common;

use motion_meter::geometry::point;
use motion_meter::{PipelineConfig, Session};

#[test]
fn session_csv_has_one_record_per_point() {
    let mut session = common::calibrated_session();
    common::track_ball(&mut session, 4);

    let mut out = Vec::new();
    session.write_csv(&mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();

    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("#,Frame,Time (s),"));

    // endpoints have no derivatives: the last five cells are empty
    assert!(lines[1].ends_with(",,,,,"));
    assert!(lines[4].ends_with(",,,,,"));

    // interior rows have velocity but not acceleration
    let cells: Vec<_> = lines[2].split(',').collect();
    assert_eq!(cells.len(), 12);
    assert_eq!(cells[0], "2");
    assert_eq!(cells[1], "3");
    assert!(!cells[7].is_empty());
    assert!(cells[10].is_empty() && cells[11].is_empty());
}

#[test]
fn uncalibrated_csv_keeps_pixels() {
    let mut session = Session::new(PipelineConfig::default());
    session.add_point(12, 0.4, point(320.0, 240.5)).unwrap();

    let mut out = Vec::new();
    session.write_csv(&mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();

    assert_eq!(csv.lines().nth(1), Some("1,12,0.4,320,240.5,,,,,,,"));
}
