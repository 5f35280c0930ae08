//! Errors of the button press task.
use std::path::PathBuf;
use thiserror::Error;

/// Errors of the button press task.
#[derive(Error, Debug, PartialEq)]
pub enum ButtonPressError {
    /// The scene has no site with the given name.
    #[error("Site not found in the scene: {0}")]
    MissingSite(String),

    /// The scene has no body with the given name.
    #[error("Body not found in the scene: {0}")]
    MissingBody(String),

    /// The scene has no mocap body with the given name.
    #[error("Mocap body not found in the scene: {0}")]
    MissingMocap(String),

    /// The simulator does not know the scene description.
    #[error("Unknown scene description: {0}")]
    UnknownAsset(PathBuf),

    /// `step()` was called before the first `reset()`.
    #[error("The task must be reset before stepping")]
    NotReset,

    /// A flat observation is too short to contain the tracked site.
    #[error("Observation has {got} elements, expected at least {expected}")]
    ObservationShape {
        /// Minimum number of elements.
        expected: usize,
        /// Actual number of elements.
        got: usize,
    },

    /// A joint state vector does not match the scene.
    #[error("Joint state has {got} elements, the scene has {expected}")]
    StateShape {
        /// Number of elements in the scene.
        expected: usize,
        /// Actual number of elements.
        got: usize,
    },
}
