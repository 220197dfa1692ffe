//! Joins tracked pixels, the coordinate system and the kinematics engine into
//! one row per tracked point.
//!
//! Nothing here is cached: the table is rebuilt from the pixel data on every
//! call, so a new calibration never requires re-tracking.

use crate::config::{JoinStrategy, PipelineConfig};
use crate::coordinate_system::{CoordinateSystem, ScaleUnit};
use crate::error::Error;
use crate::kinematics::{self, Sample};
use crate::math::{self, RegressionResult};
use crate::tracked_points::{self, PointId, TrackedPoint};

use log::trace;
use serde_derive::Serialize;
use std::fmt;
use std::str::FromStr;

/// `None` means "not computable here", never zero.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub id: PointId,
    /// 1-based position in frame order.
    pub row_number: usize,
    pub frame_number: u32,
    pub time: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub world_x: Option<f64>,
    pub world_y: Option<f64>,
    pub vx: Option<f64>,
    pub vy: Option<f64>,
    pub speed: Option<f64>,
    pub ax: Option<f64>,
    pub ay: Option<f64>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    RowNumber,
    Frame,
    Time,
    PixelX,
    PixelY,
    WorldX,
    WorldY,
    Vx,
    Vy,
    Speed,
    Ax,
    Ay,
}

impl Column {
    /// Table order.
    pub const ALL: [Column; 12] = [
        Column::RowNumber,
        Column::Frame,
        Column::Time,
        Column::PixelX,
        Column::PixelY,
        Column::WorldX,
        Column::WorldY,
        Column::Vx,
        Column::Vy,
        Column::Speed,
        Column::Ax,
        Column::Ay,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Column::RowNumber => "row",
            Column::Frame => "frame",
            Column::Time => "time",
            Column::PixelX => "pixel_x",
            Column::PixelY => "pixel_y",
            Column::WorldX => "x",
            Column::WorldY => "y",
            Column::Vx => "vx",
            Column::Vy => "vy",
            Column::Speed => "speed",
            Column::Ax => "ax",
            Column::Ay => "ay",
        }
    }

    /// Display header with the scale unit spelled out where it applies.
    pub fn header(&self, unit: ScaleUnit) -> String {
        match self {
            Column::RowNumber => "#".to_string(),
            Column::Frame => "Frame".to_string(),
            Column::Time => "Time (s)".to_string(),
            Column::PixelX => "Pixel X".to_string(),
            Column::PixelY => "Pixel Y".to_string(),
            Column::WorldX => format!("X ({})", unit),
            Column::WorldY => format!("Y ({})", unit),
            Column::Vx => format!("Vx ({}/s)", unit),
            Column::Vy => format!("Vy ({}/s)", unit),
            Column::Speed => format!("Speed ({}/s)", unit),
            Column::Ax => format!("Ax ({}/s²)", unit),
            Column::Ay => format!("Ay ({}/s²)", unit),
        }
    }

    pub fn value(&self, row: &DerivedRow) -> Option<f64> {
        match self {
            Column::RowNumber => Some(row.row_number as f64),
            Column::Frame => Some(row.frame_number as f64),
            Column::Time => Some(row.time),
            Column::PixelX => Some(row.pixel_x),
            Column::PixelY => Some(row.pixel_y),
            Column::WorldX => row.world_x,
            Column::WorldY => row.world_y,
            Column::Vx => row.vx,
            Column::Vy => row.vy,
            Column::Speed => row.speed,
            Column::Ax => row.ax,
            Column::Ay => row.ay,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownColumn(s.to_string()))
    }
}

/// Builds the measurement table for `points` under `system`.
///
/// Rows are ordered by frame number (ties keep storage order). Rows without a
/// world position stay in the table with every derived field `None` and are
/// left out of the kinematics input.
pub fn assemble(
    points: &[TrackedPoint],
    system: &CoordinateSystem,
    config: &PipelineConfig,
) -> Vec<DerivedRow> {
    let sorted = tracked_points::sort_by_frame(points);

    let world: Vec<_> = sorted
        .iter()
        .map(|p| system.pixel_to_world(&p.pixel()))
        .collect();

    let mut samples = Vec::with_capacity(sorted.len());
    let mut sample_index = Vec::with_capacity(sorted.len());

    for (p, w) in sorted.iter().zip(&world) {
        sample_index.push(w.map(|w| {
            samples.push(Sample::new(p.time, w));
            samples.len() - 1
        }));
    }

    let derivatives = kinematics::derivatives(&samples);

    trace!(
        "assembled {} rows, {} with world coordinates",
        sorted.len(),
        samples.len()
    );

    sorted
        .iter()
        .zip(world)
        .enumerate()
        .map(|(i, (p, w))| {
            let k = match config.join {
                JoinStrategy::ByIndex => sample_index[i],
                JoinStrategy::ByTime => find_by_time(&samples, p.time, config.time_tolerance),
            };

            let (v, a) = k.map(|k| derivatives[k]).unwrap_or((None, None));

            DerivedRow {
                id: p.id,
                row_number: i + 1,
                frame_number: p.frame_number,
                time: p.time,
                pixel_x: p.pixel_x,
                pixel_y: p.pixel_y,
                world_x: w.map(|w| w.x),
                world_y: w.map(|w| w.y),
                vx: v.map(|v| v.vx),
                vy: v.map(|v| v.vy),
                speed: v.map(|v| v.speed),
                ax: a.map(|a| a.ax),
                ay: a.map(|a| a.ay),
            }
        })
        .collect()
}

fn find_by_time(samples: &[Sample], time: f64, tolerance: f64) -> Option<usize> {
    samples
        .iter()
        .position(|s| (s.time - time).abs() < tolerance)
}

/// Least-squares fit of column `y` against column `x`, skipping rows where
/// either value is missing.
pub fn regress(rows: &[DerivedRow], x: Column, y: Column) -> Option<RegressionResult> {
    math::linear_regression(
        rows.iter()
            .filter_map(|row| Some((x.value(row)?, y.value(row)?))),
    )
}
