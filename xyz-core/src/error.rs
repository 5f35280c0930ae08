//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum XyzError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// Lower and upper bounds of a space have different lengths.
    #[error("Bounds of a space have different dimensions: low = {low}, high = {high}")]
    SpaceShape {
        /// Dimension of the lower bound.
        low: usize,
        /// Dimension of the upper bound.
        high: usize,
    },

    /// A lower bound exceeds the corresponding upper bound.
    #[error("Lower bound exceeds upper bound at index {0}")]
    InvalidBounds(usize),

    /// A vector has an unexpected number of elements.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected number of elements.
        expected: usize,
        /// Actual number of elements.
        got: usize,
    },

    /// A configured position lies outside of its space.
    #[error("{name} = {value:?} is out of bounds [{low:?}, {high:?}]")]
    OutOfBounds {
        /// Name of the checked value.
        name: String,
        /// The offending value.
        value: Vec<f32>,
        /// Lower bound of the space.
        low: Vec<f32>,
        /// Upper bound of the space.
        high: Vec<f32>,
    },
}
