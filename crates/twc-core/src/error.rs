//! Error types for the twc coupling framework.
//!
//! Organized by subsystem: grid construction, component execution,
//! and the model driver's lifecycle.

use std::error::Error;
use std::fmt;

use crate::grid::GridShape;

/// Errors from grid shape arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// `nz * ny * nx` overflows `usize`.
    CellCountOverflow {
        /// The offending shape.
        shape: GridShape,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellCountOverflow { shape } => {
                write!(f, "cell count of grid {shape} overflows usize")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from an individual component's `initialise` or `run`.
///
/// Wrapped in [`StepError::ComponentFailed`] by the model driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentError {
    /// A field the component declared is not available in its context.
    MissingField {
        /// Name of the missing field.
        name: String,
    },
    /// A field buffer does not hold one value per grid cell.
    ShapeMismatch {
        /// Name of the offending field.
        name: String,
        /// Expected length (`nz * ny * nx`).
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
    /// A parameter or constant has no value in the component's context.
    MissingParameter {
        /// Name of the missing value.
        name: String,
    },
    /// The component's run function failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { name } => write!(f, "field '{name}' is not available"),
            Self::ShapeMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "field '{name}' has {actual} values, expected {expected}"
            ),
            Self::MissingParameter { name } => write!(f, "parameter '{name}' has no value"),
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for ComponentError {}

/// Errors from the model driver's lifecycle calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A component returned an error.
    ComponentFailed {
        /// Name of the failing component.
        name: String,
        /// The underlying component error.
        reason: ComponentError,
    },
    /// `step()` or `finalise()` was called before `initialise()`.
    NotInitialised,
    /// The model has already been finalised.
    Finalised,
    /// Every configured timestep has already been run.
    OutOfTimesteps {
        /// Number of timesteps in the configuration.
        timesteps: usize,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ComponentFailed { name, reason } => {
                write!(f, "component '{name}' failed: {reason}")
            }
            Self::NotInitialised => write!(f, "model has not been initialised"),
            Self::Finalised => write!(f, "model has already been finalised"),
            Self::OutOfTimesteps { timesteps } => {
                write!(f, "all {timesteps} timesteps have already been run")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ComponentFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
