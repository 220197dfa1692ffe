//! Motion measurement from manually tracked video frames.
//!
//! Pixel marks go through a user calibrated [`CoordinateSystem`] into world
//! coordinates, central differences give velocity and acceleration, and any
//! two table columns can be fitted with a straight line.

mod circular_queue;
pub mod config;
pub mod coordinate_system;
pub mod error;
pub mod export;
pub mod geometry;
pub mod kinematics;
pub mod math;
pub mod session;
pub mod table;
pub mod tracked_points;

pub use config::{DuplicateFramePolicy, JoinStrategy, PipelineConfig};
pub use coordinate_system::{Calibration, CoordinateSystem, ScaleUnit};
pub use error::Error;
pub use geometry::Point2D;
pub use math::RegressionResult;
pub use session::{ProjectState, Session};
pub use table::{Column, DerivedRow};
pub use tracked_points::{NewPoint, PointId, TrackedPoint, TrackedPointSet};
