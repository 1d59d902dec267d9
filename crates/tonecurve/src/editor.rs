//! Curve editor controller.
//!
//! [`CurveEditor`] owns the control points together with the sampled curve
//! and LUT derived from them. Every edit is applied to a candidate copy of
//! the point set, the curve and LUT are recomputed from scratch, and the
//! candidate is committed only if that succeeds. A rejected edit leaves the
//! editor exactly as it was.

use tracing::debug;

use crate::config::{CurveConfig, LutStrategy};
use crate::error::{CurveError, Result};
use crate::lut::ToneLut;
use crate::point::{ControlPoint, ControlPointSet, MIN_POINTS, PointId};
use crate::spline::fit_curve;

/// What a click did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// A new point was placed.
    Added(PointId),
    /// The clicked point was removed.
    Removed(PointId),
    /// Nothing changed.
    Ignored(CurveError),
}

/// Owning controller for one tone curve.
///
/// # Example
///
/// ```
/// use tonecurve::{ClickOutcome, CurveConfig, CurveEditor};
///
/// let mut editor = CurveEditor::new(CurveConfig::default())?;
/// assert_eq!(editor.lut().lookup(100), 100);
///
/// // Pull the midtones up.
/// let id = editor.add_point(64.0, -110.0)?;
/// assert!(editor.lut().lookup(64) > 100);
///
/// // Dragging onto another point's x is rejected; nothing changes.
/// let before = editor.lut().clone();
/// assert!(editor.move_point(id, 127.5, -60.0).is_err());
/// assert_eq!(editor.lut(), &before);
///
/// // Clicking the point again removes it.
/// assert_eq!(editor.click(64.0, -110.0), ClickOutcome::Removed(id));
/// # Ok::<(), tonecurve::CurveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CurveEditor {
    config: CurveConfig,
    points: ControlPointSet,
    curve: Vec<ControlPoint>,
    lut: ToneLut,
    revision: u64,
}

impl CurveEditor {
    /// Editor with the default diagonal: bottom-left corner, centre and
    /// top-right corner. The initial LUT is the identity.
    ///
    /// # Errors
    ///
    /// Fails if `config` is invalid. Axis sizes below
    /// [`CurveConfig::MIN_AXIS_SIZE`] are rejected there, before the default
    /// points could collide.
    pub fn new(config: CurveConfig) -> Result<Self> {
        config.validate()?;
        let size = config.axis_size;
        let defaults = [
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(size / 2.0, -size / 2.0),
            ControlPoint::new(size, -size),
        ];
        Self::with_points(config, defaults)
    }

    /// Editor starting from caller-supplied points (clamped into the axes).
    ///
    /// # Errors
    ///
    /// Fails if `config` is invalid or the points cannot form a curve.
    pub fn with_points<I>(config: CurveConfig, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = ControlPoint>,
    {
        config.validate()?;
        let points = ControlPointSet::from_points(config.bounds()?, points)?;
        let (curve, lut) = Self::derive(&points, &config)?;
        debug!(points = points.len(), "curve editor created");
        Ok(Self {
            config,
            points,
            curve,
            lut,
            revision: 0,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Control points, sorted by x.
    pub fn points(&self) -> &ControlPointSet {
        &self.points
    }

    /// Clipped spline samples of the current curve, for drawing.
    pub fn curve(&self) -> &[ControlPoint] {
        &self.curve
    }

    /// Current LUT; always the last successfully built one.
    pub fn lut(&self) -> &ToneLut {
        &self.lut
    }

    /// Number of committed changes; bumps whenever the LUT may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Add a point and recompute.
    ///
    /// # Errors
    ///
    /// Rejects non-finite coordinates and an x already taken by another
    /// point; the editor is unchanged on error.
    pub fn add_point(&mut self, x: f32, y: f32) -> Result<PointId> {
        self.transact("add", |points| points.add_point(x, y))
    }

    /// Remove a point and recompute.
    ///
    /// Returns `false` without changing anything if the id is unknown or
    /// only two points are left.
    pub fn remove_point(&mut self, id: PointId) -> bool {
        self.transact("remove", |points| {
            if points.remove_point(id) {
                Ok(())
            } else {
                Err(CurveError::PointNotFound(id))
            }
        })
        .is_ok()
    }

    /// Move a point (re-sorting by x) and recompute.
    ///
    /// # Errors
    ///
    /// Rejects unknown ids, non-finite coordinates and moves onto another
    /// point's x; the editor is unchanged on error.
    pub fn move_point(&mut self, id: PointId, x: f32, y: f32) -> Result<()> {
        self.transact("move", |points| points.move_point(id, x, y))
    }

    /// Handle a click that did not move.
    ///
    /// A click on a point's handle removes that point, provided more than
    /// two points remain; a click anywhere else adds a point there.
    pub fn click(&mut self, x: f32, y: f32) -> ClickOutcome {
        match self.points.point_at(x, y, self.config.pick_radius) {
            Some(id) if self.points.len() > MIN_POINTS => {
                if self.remove_point(id) {
                    ClickOutcome::Removed(id)
                } else {
                    ClickOutcome::Ignored(CurveError::PointNotFound(id))
                }
            }
            Some(_) => ClickOutcome::Ignored(CurveError::TooFewPoints {
                count: self.points.len().saturating_sub(1),
            }),
            None => match self.add_point(x, y) {
                Ok(id) => ClickOutcome::Added(id),
                Err(err) => ClickOutcome::Ignored(err),
            },
        }
    }

    /// Switch LUT strategy and recompute.
    ///
    /// # Errors
    ///
    /// See [`set_config`](Self::set_config).
    pub fn set_strategy(&mut self, strategy: LutStrategy) -> Result<()> {
        let config = self.config.clone().with_strategy(strategy);
        self.set_config(config)
    }

    /// Replace the configuration and recompute.
    ///
    /// Points are re-clamped into the new axis bounds.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or clamping would collapse
    /// two points onto the same x; the editor is unchanged on error.
    pub fn set_config(&mut self, config: CurveConfig) -> Result<()> {
        config.validate()?;
        let points = self.points.rebound(config.bounds()?)?;
        let (curve, lut) = Self::derive(&points, &config)?;
        self.config = config;
        self.commit(points, curve, lut);
        debug!(revision = self.revision, "curve configuration changed");
        Ok(())
    }

    /// Run `edit` on a copy of the points and commit it with a freshly
    /// derived curve and LUT, or reject it wholesale.
    fn transact<T, F>(&mut self, action: &'static str, edit: F) -> Result<T>
    where
        F: FnOnce(&mut ControlPointSet) -> Result<T>,
    {
        let mut candidate = self.points.clone();
        let outcome = edit(&mut candidate)
            .and_then(|value| Self::derive(&candidate, &self.config).map(|derived| (value, derived)));

        match outcome {
            Ok((value, (curve, lut))) => {
                self.commit(candidate, curve, lut);
                debug!(action, revision = self.revision, "curve edit committed");
                Ok(value)
            }
            Err(err) => {
                debug!(action, error = %err, "curve edit rejected");
                Err(err)
            }
        }
    }

    fn commit(&mut self, points: ControlPointSet, curve: Vec<ControlPoint>, lut: ToneLut) {
        self.points = points;
        self.curve = curve;
        self.lut = lut;
        self.revision = self.revision.wrapping_add(1);
    }

    fn derive(points: &ControlPointSet, config: &CurveConfig) -> Result<(Vec<ControlPoint>, ToneLut)> {
        let knots = points.points();
        let curve = fit_curve(&knots, config)?;
        let lut = match config.strategy {
            LutStrategy::Spline => ToneLut::from_curve(&curve, config)?,
            LutStrategy::Linear => ToneLut::build(&knots, config)?,
        };
        Ok((curve, lut))
    }
}
