//! Error types for curve operations.

use crate::point::PointId;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CurveError>;

/// Broad classification of a [`CurveError`].
///
/// Host UIs usually only care whether an edit was degenerate
/// (`InvalidInput`) or fell outside the editor axes (`OutOfRange`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Degenerate, unsorted or otherwise unusable control points or configuration.
    InvalidInput,
    /// A coordinate outside the declared axis bounds.
    OutOfRange,
}

/// Error type for curve operations.
///
/// Every fallible operation leaves the previous valid state untouched, so a
/// caller can simply ignore the error to get "snap back" behaviour.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Fewer than two control points.
    #[error("curve needs at least 2 control points, got {count}")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
    },

    /// Control points are not in strictly increasing x order.
    #[error("control point {index} is not strictly to the right of its predecessor")]
    UnsortedPoints {
        /// Index of the first offending point.
        index: usize,
    },

    /// Two control points share (or nearly share) the same x.
    #[error("a control point already exists at x = {x}")]
    DuplicateAbscissa {
        /// The conflicting abscissa.
        x: f32,
    },

    /// NaN or infinite coordinate.
    #[error("{coordinate} coordinate {value} is not finite")]
    NonFinite {
        /// Which coordinate ("x" or "y").
        coordinate: &'static str,
        /// The offending value.
        value: f32,
    },

    /// No point with this id in the set.
    #[error("no control point with id {0}")]
    PointNotFound(PointId),

    /// Coordinate outside the editor axes.
    #[error("{coordinate} coordinate {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Which coordinate ("x" or "y").
        coordinate: &'static str,
        /// The offending value.
        value: f32,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },

    /// Invalid curve or LUT configuration.
    #[error("invalid curve configuration: {0}")]
    InvalidConfiguration(String),
}

impl CurveError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::TooFewPoints { .. }
            | Self::UnsortedPoints { .. }
            | Self::DuplicateAbscissa { .. }
            | Self::NonFinite { .. }
            | Self::PointNotFound(_)
            | Self::InvalidConfiguration(_) => ErrorKind::InvalidInput,
        }
    }
}
