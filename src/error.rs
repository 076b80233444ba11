use thiserror::Error;

/// Errors returned by grid construction, access and editing.
/// A failed call never touches the caller's grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    #[error("Invalid grid dimensions {width}x{height}: zero side or too many cells.")]
    InvalidDimension { width: usize, height: usize },

    #[error("Cell ({row}, {col}) is outside the {width}x{height} grid.")]
    OutOfBounds {
        row: isize,
        col: isize,
        width: usize,
        height: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
