use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected before any generation starts.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(
        "shape mismatch in segment {segment}: {left} is {}x{} but {right} is {}x{}",
        .left_shape.0, .left_shape.1, .right_shape.0, .right_shape.1
    )]
    ShapeMismatch {
        segment: usize,
        left: &'static str,
        right: &'static str,
        left_shape: (usize, usize),
        right_shape: (usize, usize),
    },

    #[error("segment count mismatch: {grids} grids, {depth} depth maps, {currents} current maps")]
    SegmentCount {
        grids: usize,
        depth: usize,
        currents: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
