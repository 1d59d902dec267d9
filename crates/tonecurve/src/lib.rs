//! Tone curve editor core.
//!
//! This crate implements the numerical part of an interactive tone curve
//! editor: a sorted set of user-placed control points, a natural cubic
//! spline through them, and the 256-entry lookup table used to remap 8-bit
//! pixel levels.
//!
//! # Overview
//!
//! - [`ControlPointSet`]: points kept sorted by x, duplicate x rejected,
//!   coordinates clamped into the editor axes
//! - [`CubicSpline`] / [`fit_curve`]: natural cubic spline, sampled densely
//!   and clipped to a vertical interval
//! - [`ToneLut`]: 256 output levels built from the sampled curve (or the raw
//!   points), flipped, rescaled, rounded and clamped
//! - [`CurveEditor`]: owning controller that recomputes curve and LUT on
//!   every edit and rejects edits that would produce an invalid curve
//!
//! # Coordinates
//!
//! Curve space follows screen conventions: `x` grows to the right over
//! `[0, axis_size]`, stored `y` grows *downwards* over `[-axis_size, 0]`.
//! The point `(0, 0)` is black-to-black and `(axis_size, -axis_size)` is
//! white-to-white.
//!
//! # Example
//!
//! ```
//! use tonecurve::{ControlPoint, CurveConfig, ToneLut};
//!
//! let points = [
//!     ControlPoint::new(0.0, 0.0),
//!     ControlPoint::new(128.0, -150.0),
//!     ControlPoint::new(255.0, -255.0),
//! ];
//! let lut = ToneLut::build(&points, &CurveConfig::default())?;
//! assert_eq!(lut.table().len(), 256);
//! assert!(lut.lookup(128) > 128);
//! # Ok::<(), tonecurve::CurveError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod editor;
pub mod error;
pub mod lut;
pub mod point;
pub mod prelude;
pub mod spline;

pub use config::{AxisBounds, ClipInterval, CurveConfig, LutStrategy};
pub use editor::{ClickOutcome, CurveEditor};
pub use error::{CurveError, ErrorKind};
pub use lut::ToneLut;
pub use point::{ControlPoint, ControlPointSet, MIN_POINTS, MIN_X_GAP, PointId, validate_points};
pub use spline::{CubicSpline, fit_curve};
