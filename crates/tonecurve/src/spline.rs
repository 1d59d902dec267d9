//! Natural cubic spline through the control points.
//!
//! The spline interpolates every knot exactly and has continuous first and
//! second derivatives at interior knots. Both end conditions are "natural"
//! (zero second derivative), so the curve leaves the outer knots straight.
//! Natural splines do not preserve monotonicity: a steep step between two
//! flat stretches overshoots on both sides.

use tracing::trace;

use crate::config::{ClipInterval, CurveConfig};
use crate::error::Result;
use crate::point::{ControlPoint, validate_points};

/// Fitted natural cubic spline.
///
/// # Example
///
/// ```
/// use tonecurve::{ClipInterval, ControlPoint, CubicSpline};
///
/// let spline = CubicSpline::fit(&[
///     ControlPoint::new(0.0, 0.0),
///     ControlPoint::new(128.0, -160.0),
///     ControlPoint::new(255.0, -255.0),
/// ])?;
///
/// assert!((spline.evaluate(128.0) + 160.0).abs() < 1e-3);
///
/// let samples = spline.sample(256, ClipInterval::new(-255.0, 0.0)?);
/// assert_eq!(samples.len(), 256);
/// # Ok::<(), tonecurve::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    // Solved and evaluated in f64: wide knot gaps next to narrow ones make
    // the per-segment terms cancel badly in f32.
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot.
    moments: Vec<f64>,
}

impl CubicSpline {
    /// Fit a natural cubic spline through `points`.
    ///
    /// # Errors
    ///
    /// Fails with an `InvalidInput`-kind error for fewer than two points,
    /// non-finite coordinates, or x values that are not strictly increasing.
    pub fn fit(points: &[ControlPoint]) -> Result<Self> {
        validate_points(points)?;

        let xs: Vec<f64> = points.iter().map(|p| f64::from(p.x)).collect();
        let ys: Vec<f64> = points.iter().map(|p| f64::from(p.y)).collect();
        let moments = natural_moments(&xs, &ys);

        Ok(Self { xs, ys, moments })
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always `false`: a fitted spline has at least two knots.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Domain `[x₀, x_{N-1}]` covered by the knots.
    pub fn domain(&self) -> (f32, f32) {
        let first = self.xs.first().copied().unwrap_or_default();
        let last = self.xs.last().copied().unwrap_or_default();
        (first as f32, last as f32)
    }

    /// Evaluate the spline; `x` outside the domain is clamped to it.
    pub fn evaluate(&self, x: f32) -> f32 {
        let (lo, hi) = self.domain();
        let x = f64::from(x.clamp(lo, hi));
        let segment = self.segment_for(x);

        let (Some(&x0), Some(&x1), Some(&y0), Some(&y1), Some(&m0), Some(&m1)) = (
            self.xs.get(segment),
            self.xs.get(segment + 1),
            self.ys.get(segment),
            self.ys.get(segment + 1),
            self.moments.get(segment),
            self.moments.get(segment + 1),
        ) else {
            return self.ys.first().copied().unwrap_or_default() as f32;
        };

        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;

        let y = m0 * a * a * a / (6.0 * h)
            + m1 * b * b * b / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b;
        y as f32
    }

    /// Sample the spline at `count` evenly spaced abscissas spanning the
    /// domain (both ends included), clamping every ordinate into `clip`.
    ///
    /// A `count` below 2 is raised to 2 so both ends are always present.
    pub fn sample(&self, count: usize, clip: ClipInterval) -> Vec<ControlPoint> {
        let count = count.max(2);
        let (lo, hi) = self.domain();
        let step = (hi - lo) / (count - 1) as f32;

        let samples: Vec<ControlPoint> = (0..count)
            .map(|i| {
                // Pin the last sample to the exact end of the domain.
                let x = if i + 1 == count {
                    hi
                } else {
                    lo + step * i as f32
                };
                ControlPoint::new(x, clip.clamp(self.evaluate(x)))
            })
            .collect();

        trace!(count, lo, hi, "spline sampled");
        samples
    }

    /// Index of the segment `[x_i, x_{i+1}]` containing `x`.
    fn segment_for(&self, x: f64) -> usize {
        let last_segment = self.xs.len().saturating_sub(2);
        // First knot strictly greater than x, minus one.
        self.xs
            .partition_point(|&knot| knot <= x)
            .saturating_sub(1)
            .min(last_segment)
    }
}

/// Fit a spline through `points` and sample it as configured.
///
/// This is the full curve-fitting step: a dense clipped polyline suitable
/// for drawing the curve and for building a LUT.
///
/// # Errors
///
/// Fails if the configuration is invalid or the points cannot be fitted.
pub fn fit_curve(points: &[ControlPoint], config: &CurveConfig) -> Result<Vec<ControlPoint>> {
    config.validate()?;
    let spline = CubicSpline::fit(points)?;
    Ok(spline.sample(config.sample_count, config.clip()?))
}

/// Solve for the knot second derivatives with natural end conditions.
///
/// Interior equations form a symmetric tridiagonal system that is solved
/// with the Thomas algorithm. Inputs are already validated, so every
/// interval width is positive and the system is diagonally dominant.
fn natural_moments(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut moments = vec![0.0f64; n];
    if n < 3 {
        return moments;
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let slopes: Vec<f64> = ys
        .windows(2)
        .zip(&h)
        .map(|(w, width)| (w[1] - w[0]) / width)
        .collect();

    let interior = n - 2;
    let mut diag = Vec::with_capacity(interior);
    let mut upper = Vec::with_capacity(interior);
    let mut rhs = Vec::with_capacity(interior);
    for i in 0..interior {
        diag.push(2.0 * (h[i] + h[i + 1]));
        upper.push(h[i + 1]);
        rhs.push(6.0 * (slopes[i + 1] - slopes[i]));
    }

    // Forward sweep; the sub-diagonal entry of row i is h[i].
    for i in 1..interior {
        let w = h[i] / diag[i - 1];
        diag[i] -= w * upper[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }

    // Back substitution into moments[1..=interior].
    moments[interior] = rhs[interior - 1] / diag[interior - 1];
    for i in (0..interior - 1).rev() {
        moments[i + 1] = (rhs[i] - upper[i] * moments[i + 2]) / diag[i];
    }

    moments
}
