use crate::error::Error;
use serde_derive::{Deserialize, Serialize};

/// How a table row finds its entry in the kinematics sequence.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// Position in the filtered sequence of calibrated rows.
    #[default]
    ByIndex,
    /// First sample whose time lies within `time_tolerance` of the row time.
    /// Rows sharing a timestamp all take that first sample's derivatives, so
    /// tied rows can report identical velocities where `ByIndex` would not.
    ByTime,
}

/// What `TrackedPointSet::add` does with a second point on an already tracked frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateFramePolicy {
    #[default]
    Reject,
    Allow,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of undo steps kept, older ones are dropped silently.
    pub history_capacity: usize,
    /// In seconds, only used by `JoinStrategy::ByTime`.
    pub time_tolerance: f64,
    pub join: JoinStrategy,
    pub duplicate_frames: DuplicateFramePolicy,
}

impl PipelineConfig {
    pub const DEFAULT_HISTORY_CAPACITY: usize = 50;
    pub const DEFAULT_TIME_TOLERANCE: f64 = 1e-4;

    pub fn new() -> Self {
        Self {
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
            time_tolerance: Self::DEFAULT_TIME_TOLERANCE,
            join: JoinStrategy::ByIndex,
            duplicate_frames: DuplicateFramePolicy::Reject,
        }
    }

    pub fn from_json(src: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(src)?)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
