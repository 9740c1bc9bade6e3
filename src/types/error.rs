//! Errors raised by the deviation analyzer and scene builder

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coordinate axis of a [`Position3D`](super::Position3D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the trajectory core.
///
/// All are local and recoverable by the caller. Nothing is retried and no
/// default value is ever substituted for a deviation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrajectoryError {
    #[error("length mismatch: {left} has {left_len} samples, {right} has {right_len}")]
    ShapeMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    #[error("{series} sequence is empty")]
    EmptyInput { series: &'static str },

    /// `field` is the axis name for positions, the field name for scalars
    /// and thresholds, or the derived quantity that overflowed
    #[error("invalid {field} value in {series} at index {index}")]
    InvalidValue {
        series: &'static str,
        index: usize,
        field: &'static str,
    },
}

pub type TrajectoryResult<T> = Result<T, TrajectoryError>;
