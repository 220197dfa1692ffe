mod common;

use approx::assert_abs_diff_eq;
use motion_meter::geometry::point;
use motion_meter::{
    Column, Error, PipelineConfig, PointId, ProjectState, ScaleUnit, Session, TrackedPoint,
};

#[test]
fn undo_then_redo_restores_the_point() {
    let mut session = Session::new(PipelineConfig::default());

    let a = session.add_point(0, 0.0, point(10.0, 20.0)).unwrap();
    let b = session.add_point(1, 1.0 / 30.0, point(13.25, 18.5)).unwrap();
    assert_eq!(session.points().len(), 2);

    assert!(session.undo());
    assert_eq!(session.points().len(), 1);
    assert!(session.points().get(a).is_some());
    assert!(session.points().get(b).is_none());

    assert!(session.redo());
    assert_eq!(session.points().len(), 2);

    let restored = session.points().get(b).unwrap();
    assert_eq!(restored.pixel_x, 13.25);
    assert_eq!(restored.pixel_y, 18.5);
}

#[test]
fn calibration_changes_are_not_undone() {
    let mut session = common::calibrated_session();
    session.add_point(0, 0.0, point(0.0, 0.0)).unwrap();

    session.coordinate_system_mut().set_rotation(30.0);
    assert!(session.undo());

    assert_eq!(session.coordinate_system().rotation(), 30.0);
    assert!(session.coordinate_system().is_calibrated());
}

#[test]
fn projectile_kinematics() {
    let mut session = common::calibrated_session();
    common::track_ball(&mut session, 8);

    let rows = session.rows();
    assert_eq!(rows.len(), 8);

    for row in &rows[2..6] {
        // central differences are exact on a parabola with uniform steps
        assert_abs_diff_eq!(row.vx.unwrap(), 1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(row.ax.unwrap(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(row.ay.unwrap(), -9.8, epsilon = 1e-6);
    }

    let fit = session.regression(Column::Time, Column::Vy).unwrap();
    assert_abs_diff_eq!(fit.slope, -9.8, epsilon = 1e-6);
    assert_abs_diff_eq!(fit.intercept, 3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(fit.r_squared, 1.0, epsilon = 1e-9);
}

#[test]
fn recalibration_only_touches_derived_fields() {
    let mut session = common::calibrated_session();
    common::track_ball(&mut session, 6);

    let points_before = session.points().as_slice().to_vec();
    let rows_before = session.rows();

    let system = session.coordinate_system_mut();
    system.set_scale_distance(Some(2.0));
    system.set_rotation(10.0);
    system.set_y_axis_up(false);
    system.set_scale_unit(ScaleUnit::Ft);

    assert_eq!(session.points().as_slice(), &points_before[..]);

    let rows_after = session.rows();
    assert_eq!(rows_before.len(), rows_after.len());

    for (before, after) in rows_before.iter().zip(&rows_after) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.row_number, after.row_number);
        assert_eq!(before.frame_number, after.frame_number);
        assert_eq!(before.pixel_x, after.pixel_x);
        assert_eq!(before.pixel_y, after.pixel_y);
    }

    // the first sample sits on the origin, every later one moves
    assert_ne!(rows_before[1].world_x, rows_after[1].world_x);
    assert_ne!(rows_before[1].vx, rows_after[1].vx);

    // half the scale, so positions double in the new units
    let d_before = rows_before[3].world_x.unwrap().hypot(rows_before[3].world_y.unwrap());
    let d_after = rows_after[3].world_x.unwrap().hypot(rows_after[3].world_y.unwrap());
    assert_abs_diff_eq!(d_after, 2.0 * d_before, epsilon = 1e-9);
}

#[test]
fn clearing_calibration_nulls_every_derived_field() {
    let mut session = common::calibrated_session();
    common::track_ball(&mut session, 5);

    session.coordinate_system_mut().set_scale_point1(None);

    for row in session.rows() {
        assert!(row.world_x.is_none() && row.world_y.is_none());
        assert!(row.vx.is_none() && row.vy.is_none() && row.speed.is_none());
        assert!(row.ax.is_none() && row.ay.is_none());
    }
    assert!(session.regression(Column::Time, Column::WorldX).is_none());
    assert!(session.regression(Column::Time, Column::PixelX).is_some());
}

#[test]
fn persistence_round_trip() {
    let mut session = common::calibrated_session();
    common::track_ball(&mut session, 5);
    session.coordinate_system_mut().set_scale_unit(ScaleUnit::Cm);

    let json = session.to_json().unwrap();
    assert!(!json.contains("pixels_per_unit"));
    assert!(!json.contains("world_x"));

    let loaded = Session::from_json(&json, PipelineConfig::default()).unwrap();

    assert_eq!(loaded.state(), session.state());
    assert_eq!(loaded.rows(), session.rows());
    assert!(!loaded.points().can_undo());
    assert_eq!(loaded.coordinate_system().pixels_per_unit(), Some(200.0));
}

#[test]
fn malformed_project_is_an_error() {
    assert!(Session::from_json("{\"points\": 3}", PipelineConfig::default()).is_err());
}

#[test]
fn project_holding_the_largest_id_refuses_new_points() {
    let state = ProjectState {
        points: vec![TrackedPoint {
            id: PointId(u64::MAX),
            frame_number: 4,
            time: 4.0 / common::FPS,
            pixel_x: 120.0,
            pixel_y: 80.0,
        }],
        ..ProjectState::default()
    };

    let mut session = Session::from_state(state, PipelineConfig::default());
    assert_eq!(session.points().len(), 1);

    let err = session.add_point(5, 5.0 / common::FPS, point(121.0, 81.0));
    assert!(matches!(err, Err(Error::IdSpaceExhausted)));
    assert_eq!(session.points().len(), 1);
    assert_eq!(session.rows().len(), 1);
}
