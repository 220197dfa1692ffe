use motion_meter::geometry::point;
use motion_meter::{PipelineConfig, Session};

pub const FPS: f64 = 30.0;

/// 200 px per metre, origin at (50, 400), y up.
pub fn calibrated_session() -> Session {
    let mut session = Session::new(PipelineConfig::default());

    let system = session.coordinate_system_mut();
    system
        .calibrate(point(50.0, 400.0), point(250.0, 400.0), 1.0)
        .unwrap();
    system.set_origin(point(50.0, 400.0));

    session
}

/// A ball thrown to the right: x = 1.5 t, y = 3 t - 4.9 t^2 (metres), tracked
/// on every third frame.
pub fn track_ball(session: &mut Session, samples: usize) {
    for i in 0..samples {
        let frame = 3 * i as u32;
        let t = frame as f64 / FPS;
        let (x, y) = (1.5 * t, 3.0 * t - 4.9 * t * t);

        session
            .add_point(frame, t, point(50.0 + 200.0 * x, 400.0 - 200.0 * y))
            .unwrap();
    }
}
