use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Frame {0} already has a tracked point")]
    DuplicateFrame(u32),

    #[error("No point ids left to assign")]
    IdSpaceExhausted,

    #[error("Scale distance must be a positive finite number, got {0}")]
    InvalidScaleDistance(f64),

    #[error("Scale points coincide, calibration would be degenerate")]
    CoincidentScalePoints,

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}
