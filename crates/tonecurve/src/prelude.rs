//! Commonly used types.

pub use crate::config::{CurveConfig, LutStrategy};
pub use crate::editor::{ClickOutcome, CurveEditor};
pub use crate::error::{CurveError, ErrorKind, Result};
pub use crate::lut::ToneLut;
pub use crate::point::{ControlPoint, PointId};
pub use crate::spline::{CubicSpline, fit_curve};
