//! Shared error types used across submodules.

use thiserror::Error;

use crate::math::Scalar;

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoleFieldError {
    /// Raised when a magnet shape, discretization or charge set is unusable.
    /// Fatal for the whole run.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Raised when a field point coincides with a corner or a charge.
    /// Local to one grid cell.
    #[error("field point ({x}, {z}) coincides with a pole")]
    Singularity {
        /// Field point `x` coordinate.
        x: Scalar,
        /// Field point `z` coordinate.
        z: Scalar,
    },
    /// Raised when the sampling grid is empty or has unusable bounds.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    /// Raised when the run configuration is internally inconsistent.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
    /// Raised when a run observes its cancellation token.
    #[error("evaluation cancelled")]
    Cancelled,
}

/// Convenience alias for results carrying [`PoleFieldError`].
pub type Result<T> = std::result::Result<T, PoleFieldError>;
