//! Error types for inflow store reading.

use thiserror::Error;

/// Result type for inflow reader operations.
pub type Result<T> = std::result::Result<T, InflowError>;

/// Errors that can occur while reading or reshaping inflow data.
#[derive(Error, Debug)]
pub enum InflowError {
    /// Error raised by the HDF5 library
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// Missing group or dataset in the store
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Companion arrays do not share a shape.
    #[error("shape mismatch: {what} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        what: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// A row index or exclude count falls outside the array.
    #[error("row range error: {0}")]
    RowRange(String),

    /// The requested time index is past the end of the time axis.
    #[error("time index {index} out of range for {n_times} stored times")]
    TimeIndexOutOfRange { index: usize, n_times: usize },

    /// Array shape error from ndarray
    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl InflowError {
    /// Create a MissingData error.
    pub fn missing_data(msg: impl Into<String>) -> Self {
        Self::MissingData(msg.into())
    }

    /// Create a RowRange error.
    pub fn row_range(msg: impl Into<String>) -> Self {
        Self::RowRange(msg.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_yaml::Error> for InflowError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}
