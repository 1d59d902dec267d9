//! Curve editor configuration.
//!
//! All knobs that influence fitting and LUT construction live in
//! [`CurveConfig`] and are passed explicitly into every build call.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, Result};
use crate::point::ControlPoint;

/// How the 256 LUT entries are derived from the control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LutStrategy {
    /// Fit a natural cubic spline, sample it densely, then interpolate the samples.
    #[default]
    Spline,
    /// Interpolate linearly between the control points themselves.
    Linear,
}

/// Configuration for fitting a curve and building its LUT.
///
/// # Example
///
/// ```
/// use tonecurve::{CurveConfig, LutStrategy};
///
/// let config = CurveConfig::default()
///     .with_axis_size(500.0)
///     .with_strategy(LutStrategy::Linear);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.bounds()?.size(), 500.0);
/// # Ok::<(), tonecurve::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurveConfig {
    /// Size of both editor axes, in curve-space units.
    pub axis_size: f32,
    /// Number of spline samples spanning the control-point range.
    pub sample_count: usize,
    /// LUT construction strategy.
    pub strategy: LutStrategy,
    /// Hit-test radius used when a click lands near an existing point.
    pub pick_radius: f32,
}

impl CurveConfig {
    /// Default axis size; with this size curve units equal 8-bit levels.
    pub const DEFAULT_AXIS_SIZE: f32 = 255.0;
    /// Default number of spline samples.
    pub const DEFAULT_SAMPLE_COUNT: usize = 400;
    /// Default pick radius (point handles are 8 units wide).
    pub const DEFAULT_PICK_RADIUS: f32 = 4.0;
    /// Smallest accepted axis size. The default diagonal needs room for
    /// three points at least [`MIN_X_GAP`](crate::MIN_X_GAP) apart.
    pub const MIN_AXIS_SIZE: f32 = 1.0;
    /// Largest accepted sample count.
    pub const MAX_SAMPLE_COUNT: usize = 65_536;

    /// Set the axis size.
    #[must_use]
    pub fn with_axis_size(mut self, axis_size: f32) -> Self {
        self.axis_size = axis_size;
        self
    }

    /// Set the spline sample count.
    #[must_use]
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Set the LUT strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: LutStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the pick radius.
    #[must_use]
    pub fn with_pick_radius(mut self, pick_radius: f32) -> Self {
        self.pick_radius = pick_radius;
        self
    }

    /// Axis bounds described by this configuration.
    ///
    /// # Errors
    ///
    /// See [`AxisBounds::new`].
    pub fn bounds(&self) -> Result<AxisBounds> {
        AxisBounds::new(self.axis_size)
    }

    /// Vertical interval the sampled curve is clipped to.
    ///
    /// # Errors
    ///
    /// See [`ClipInterval::new`].
    pub fn clip(&self) -> Result<ClipInterval> {
        ClipInterval::new(-self.axis_size, 0.0)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if the axis size is not
    /// finite or below [`MIN_AXIS_SIZE`](Self::MIN_AXIS_SIZE), the sample
    /// count lies outside `2..=MAX_SAMPLE_COUNT`, or the pick radius is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.axis_size.is_finite() || self.axis_size < Self::MIN_AXIS_SIZE {
            return Err(CurveError::InvalidConfiguration(format!(
                "axis size must be finite and >= {}, got {}",
                Self::MIN_AXIS_SIZE,
                self.axis_size
            )));
        }
        if !(2..=Self::MAX_SAMPLE_COUNT).contains(&self.sample_count) {
            return Err(CurveError::InvalidConfiguration(format!(
                "sample count must be between 2 and {}, got {}",
                Self::MAX_SAMPLE_COUNT,
                self.sample_count
            )));
        }
        if !self.pick_radius.is_finite() || self.pick_radius < 0.0 {
            return Err(CurveError::InvalidConfiguration(format!(
                "pick radius must be >= 0 and finite, got {}",
                self.pick_radius
            )));
        }
        Ok(())
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            axis_size: Self::DEFAULT_AXIS_SIZE,
            sample_count: Self::DEFAULT_SAMPLE_COUNT,
            strategy: LutStrategy::default(),
            pick_radius: Self::DEFAULT_PICK_RADIUS,
        }
    }
}

/// Declared coordinate domain of the editor.
///
/// `x` runs over `[0, size]`; `y` runs over `[-size, 0]` because stored `y`
/// decreases as the point moves up on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    size: f32,
}

impl AxisBounds {
    /// Bounds for a square editor of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] unless `size` is positive
    /// and finite.
    pub fn new(size: f32) -> Result<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(CurveError::InvalidConfiguration(format!(
                "axis size must be positive and finite, got {size}"
            )));
        }
        Ok(Self { size })
    }

    /// Axis size.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Clamp a point into the bounds.
    #[inline]
    pub fn clamp(&self, point: ControlPoint) -> ControlPoint {
        ControlPoint::new(
            point.x.clamp(0.0, self.size),
            point.y.clamp(-self.size, 0.0),
        )
    }

    /// Strict check for callers that prefer an error over clamping.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::OutOfRange`] naming the first coordinate that
    /// falls outside the bounds.
    pub fn check(&self, point: ControlPoint) -> Result<()> {
        if !(0.0..=self.size).contains(&point.x) {
            return Err(CurveError::OutOfRange {
                coordinate: "x",
                value: point.x,
                min: 0.0,
                max: self.size,
            });
        }
        if !(-self.size..=0.0).contains(&point.y) {
            return Err(CurveError::OutOfRange {
                coordinate: "y",
                value: point.y,
                min: -self.size,
                max: 0.0,
            });
        }
        Ok(())
    }
}

/// Closed vertical interval `[lo, hi]` with finite bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipInterval {
    lo: f32,
    hi: f32,
}

impl ClipInterval {
    /// Create an interval; the bounds are swapped if given in reverse.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if either bound is NaN or
    /// infinite.
    pub fn new(lo: f32, hi: f32) -> Result<Self> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(CurveError::InvalidConfiguration(format!(
                "clip bounds must be finite, got [{lo}, {hi}]"
            )));
        }
        Ok(if lo <= hi {
            Self { lo, hi }
        } else {
            Self { lo: hi, hi: lo }
        })
    }

    /// Lower bound (top of the editor in flipped space).
    #[inline]
    pub fn lo(&self) -> f32 {
        self.lo
    }

    /// Upper bound.
    #[inline]
    pub fn hi(&self) -> f32 {
        self.hi
    }

    /// Clamp a value into the interval.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.lo, self.hi)
    }

    /// Interval width.
    #[inline]
    pub fn span(&self) -> f32 {
        self.hi - self.lo
    }
}
