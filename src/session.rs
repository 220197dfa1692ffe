use crate::config::PipelineConfig;
use crate::coordinate_system::CoordinateSystem;
use crate::error::Error;
use crate::export;
use crate::geometry::Point2D;
use crate::math::RegressionResult;
use crate::table::{self, Column, DerivedRow};
use crate::tracked_points::{NewPoint, PointId, TrackedPoint, TrackedPointSet};

use serde_derive::{Deserialize, Serialize};
use std::io;

/// What the persistence layer stores for a project: the calibration inputs
/// and the raw pixel points, nothing derived.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ProjectState {
    pub coordinate_system: CoordinateSystem,
    pub points: Vec<TrackedPoint>,
}

/// One editing session. Owns its coordinate system and tracked points; several
/// sessions can live side by side.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: PipelineConfig,
    coordinate_system: CoordinateSystem,
    points: TrackedPointSet,
}

impl Session {
    pub fn new(config: PipelineConfig) -> Self {
        let points = TrackedPointSet::new(&config);

        Self {
            config,
            coordinate_system: CoordinateSystem::default(),
            points,
        }
    }

    pub fn from_state(state: ProjectState, config: PipelineConfig) -> Self {
        let mut session = Self::new(config);
        session.hydrate(state);
        session
    }

    pub fn from_json(src: &str, config: PipelineConfig) -> Result<Self, Error> {
        let state: ProjectState = serde_json::from_str(src)?;

        Ok(Self::from_state(state, config))
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[inline]
    pub fn coordinate_system(&self) -> &CoordinateSystem {
        &self.coordinate_system
    }

    /// Calibration edits are not part of the undo history.
    #[inline]
    pub fn coordinate_system_mut(&mut self) -> &mut CoordinateSystem {
        &mut self.coordinate_system
    }

    #[inline]
    pub fn points(&self) -> &TrackedPointSet {
        &self.points
    }

    #[inline]
    pub fn points_mut(&mut self) -> &mut TrackedPointSet {
        &mut self.points
    }

    /// Marks the object at `pixel` on the given frame.
    pub fn add_point(
        &mut self,
        frame_number: u32,
        time: f64,
        pixel: Point2D,
    ) -> Result<PointId, Error> {
        self.points.add(NewPoint::new(frame_number, time, pixel))
    }

    pub fn move_point(&mut self, id: PointId, pixel: Point2D) -> bool {
        self.points.update(id, pixel)
    }

    pub fn delete_point(&mut self, id: PointId) -> Option<TrackedPoint> {
        self.points.delete(id)
    }

    pub fn undo(&mut self) -> bool {
        self.points.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.points.redo()
    }

    /// Loads stored data as a new baseline.
    pub fn hydrate(&mut self, state: ProjectState) {
        self.coordinate_system = state.coordinate_system;
        self.points.hydrate(state.points);
    }

    pub fn rows(&self) -> Vec<DerivedRow> {
        table::assemble(self.points.as_slice(), &self.coordinate_system, &self.config)
    }

    pub fn regression(&self, x: Column, y: Column) -> Option<RegressionResult> {
        table::regress(&self.rows(), x, y)
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), Error> {
        export::write_csv(writer, &self.rows(), self.coordinate_system.scale_unit())
    }

    pub fn state(&self) -> ProjectState {
        ProjectState {
            coordinate_system: self.coordinate_system.clone(),
            points: self.points.as_slice().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(&self.state())?)
    }
}
