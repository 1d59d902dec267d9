//! 256-entry 8-bit lookup table built from a tone curve.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ClipInterval, CurveConfig, LutStrategy};
use crate::error::Result;
use crate::point::{ControlPoint, validate_points};
use crate::spline::fit_curve;

/// Lookup table mapping every 8-bit input level to an 8-bit output level.
///
/// The table is always rebuilt as a whole from a curve; it is never patched
/// entry by entry.
///
/// # Example
///
/// ```
/// use tonecurve::{ControlPoint, CurveConfig, ToneLut};
///
/// let points = [
///     ControlPoint::new(0.0, 0.0),
///     ControlPoint::new(128.0, -128.0),
///     ControlPoint::new(255.0, -255.0),
/// ];
/// let lut = ToneLut::build(&points, &CurveConfig::default())?;
/// assert_eq!(lut.lookup(0), 0);
/// assert_eq!(lut.lookup(200), 200);
/// assert_eq!(lut.lookup(255), 255);
/// # Ok::<(), tonecurve::CurveError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToneLut {
    table: [u8; 256],
}

impl ToneLut {
    /// Number of entries.
    pub const SIZE: usize = 256;

    /// Highest output level.
    const MAX_LEVEL: f32 = 255.0;

    /// Identity table: every level maps to itself.
    pub fn identity() -> Self {
        let mut table = [0u8; Self::SIZE];
        for (level, entry) in (0..=u8::MAX).zip(table.iter_mut()) {
            *entry = level;
        }
        Self { table }
    }

    /// Build a LUT from control points according to `config.strategy`.
    ///
    /// # Errors
    ///
    /// Fails with an `InvalidInput`-kind error if the configuration is
    /// invalid or the points are degenerate (fewer than two, non-finite or
    /// not strictly increasing in x). Callers should keep their previous
    /// table in that case.
    pub fn build(points: &[ControlPoint], config: &CurveConfig) -> Result<Self> {
        config.validate()?;
        validate_points(points)?;

        let lut = match config.strategy {
            LutStrategy::Spline => {
                let curve = fit_curve(points, config)?;
                Self::from_curve(&curve, config)?
            }
            LutStrategy::Linear => {
                let clip = config.clip()?;
                let clipped: Vec<ControlPoint> = points
                    .iter()
                    .map(|p| ControlPoint::new(p.x, clip.clamp(p.y)))
                    .collect();
                Self::from_curve(&clipped, config)?
            }
        };
        debug!(
            points = points.len(),
            strategy = ?config.strategy,
            "tone LUT rebuilt"
        );
        Ok(lut)
    }

    /// Build a LUT from an ordered polyline in curve space.
    ///
    /// Each vertex is mapped to level space (x scaled by `255 / axis_size`,
    /// y flipped and rescaled so the clip interval spans `[0, 255]`). Flat
    /// sentinels at levels -1 and 256 extend the ends, every integer level is
    /// linearly interpolated, rounded half to even and clamped.
    ///
    /// `curve` must be sorted by x; an empty curve yields the identity table.
    /// Ordinates outside the clip interval clamp to 0 or 255.
    ///
    /// # Errors
    ///
    /// Fails if `config` has no usable axis size.
    pub fn from_curve(curve: &[ControlPoint], config: &CurveConfig) -> Result<Self> {
        let clip = config.clip()?;
        let x_scale = Self::MAX_LEVEL / config.bounds()?.size();

        let mut levels: Vec<(f32, f32)> = Vec::with_capacity(curve.len() + 2);
        levels.extend(
            curve
                .iter()
                .map(|p| (p.x * x_scale, Self::output_level(p.y, clip))),
        );

        let (Some(&(_, first)), Some(&(_, last))) = (levels.first(), levels.last()) else {
            return Ok(Self::identity());
        };
        levels.insert(0, (-1.0, first));
        levels.push((Self::SIZE as f32, last));

        let mut table = [0u8; Self::SIZE];
        let mut segment = 0usize;
        for (level, entry) in table.iter_mut().enumerate() {
            let x = level as f32;
            while levels
                .get(segment + 1)
                .is_some_and(|&(next_x, _)| next_x < x)
            {
                segment += 1;
            }
            let value = match (levels.get(segment), levels.get(segment + 1)) {
                (Some(&(x0, y0)), Some(&(x1, y1))) if x1 > x0 => {
                    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
                }
                (Some(&(_, y0)), _) => y0,
                (None, _) => last,
            };
            *entry = Self::quantize(value);
        }

        Ok(Self { table })
    }

    /// Output level of input `level`.
    #[inline]
    pub fn lookup(&self, level: u8) -> u8 {
        self.table[usize::from(level)]
    }

    /// Raw table.
    pub fn table(&self) -> &[u8; 256] {
        &self.table
    }

    /// Whether the table never decreases.
    pub fn is_monotonic(&self) -> bool {
        self.table.windows(2).all(|w| w[0] <= w[1])
    }

    /// Smallest output level.
    pub fn min_value(&self) -> u8 {
        self.table.iter().copied().min().unwrap_or(0)
    }

    /// Largest output level.
    pub fn max_value(&self) -> u8 {
        self.table.iter().copied().max().unwrap_or(u8::MAX)
    }

    /// Flip and rescale a curve ordinate so the top of `clip` maps to 0 and
    /// the bottom to 255.
    #[inline]
    fn output_level(y: f32, clip: ClipInterval) -> f32 {
        (clip.hi() - y) / clip.span() * Self::MAX_LEVEL
    }

    #[inline]
    fn quantize(value: f32) -> u8 {
        let rounded = value.round_ties_even();
        if rounded.is_nan() {
            return 0;
        }
        // Clamped to [0, 255] just above, so the cast is exact.
        rounded.clamp(0.0, Self::MAX_LEVEL) as u8
    }
}

impl Default for ToneLut {
    fn default() -> Self {
        Self::identity()
    }
}

impl Serialize for ToneLut {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.table.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ToneLut {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vec: Vec<u8> = Vec::deserialize(deserializer)?;
        let table: [u8; 256] = vec.try_into().map_err(|v: Vec<u8>| {
            serde::de::Error::custom(format!(
                "Expected 256 entries in ToneLut, got {}",
                v.len()
            ))
        })?;
        Ok(ToneLut { table })
    }
}
