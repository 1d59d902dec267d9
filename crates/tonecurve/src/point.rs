//! Control points and the ordered control-point set.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::AxisBounds;
use crate::error::{CurveError, Result};

/// Minimum number of points a curve needs.
pub const MIN_POINTS: usize = 2;

/// Two abscissas closer than this are treated as the same x.
pub const MIN_X_GAP: f32 = 1e-3;

/// User-placed anchor of the tone curve, in curve-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Horizontal coordinate (input level axis).
    pub x: f32,
    /// Vertical coordinate; decreases as the point moves up.
    pub y: f32,
}

impl ControlPoint {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `(x, y)`.
    #[inline]
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        (self.x - x).hypot(self.y - y)
    }

    fn ensure_finite(&self) -> Result<()> {
        if !self.x.is_finite() {
            return Err(CurveError::NonFinite {
                coordinate: "x",
                value: self.x,
            });
        }
        if !self.y.is_finite() {
            return Err(CurveError::NonFinite {
                coordinate: "y",
                value: self.y,
            });
        }
        Ok(())
    }
}

impl From<(f32, f32)> for ControlPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Stable handle to a point inside a [`ControlPointSet`].
///
/// Ids survive re-sorting and are never reused within one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(u32);

impl PointId {
    /// Wrap a raw id.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw id value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Check that `points` can be interpolated: at least two points, finite
/// coordinates and strictly increasing x.
///
/// # Errors
///
/// Returns the matching `InvalidInput`-kind [`CurveError`] for the first
/// problem found.
pub fn validate_points(points: &[ControlPoint]) -> Result<()> {
    if points.len() < MIN_POINTS {
        return Err(CurveError::TooFewPoints {
            count: points.len(),
        });
    }
    for point in points {
        point.ensure_finite()?;
    }
    for (index, pair) in points.windows(2).enumerate() {
        if let [prev, next] = pair {
            if next.x == prev.x {
                return Err(CurveError::DuplicateAbscissa { x: next.x });
            }
            if next.x < prev.x {
                return Err(CurveError::UnsortedPoints { index: index + 1 });
            }
        }
    }
    Ok(())
}

/// Ordered collection of control points, always sorted by ascending x.
///
/// Mutations clamp coordinates into the axis bounds and reject edits that
/// would put two points on the same x; a rejected edit leaves the set
/// exactly as it was.
///
/// # Example
///
/// ```
/// use tonecurve::{AxisBounds, ControlPointSet};
///
/// let mut set = ControlPointSet::new(AxisBounds::new(255.0)?);
/// let a = set.add_point(200.0, -180.0)?;
/// set.add_point(10.0, -5.0)?;
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.points()[1].x, 200.0);
///
/// // Same x is rejected and the set is unchanged.
/// assert!(set.add_point(200.0, -20.0).is_err());
/// assert_eq!(set.len(), 2);
///
/// set.move_point(a, 0.0, 0.0)?;
/// assert_eq!(set.points()[0].x, 0.0);
/// # Ok::<(), tonecurve::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointSet {
    bounds: AxisBounds,
    entries: Vec<(PointId, ControlPoint)>,
    next_id: u32,
}

impl ControlPointSet {
    /// Empty set within the given bounds.
    pub fn new(bounds: AxisBounds) -> Self {
        Self {
            bounds,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Build a set from arbitrary points (sorted and clamped on the way in).
    ///
    /// # Errors
    ///
    /// Fails on non-finite coordinates or two points sharing an x.
    pub fn from_points<I>(bounds: AxisBounds, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = ControlPoint>,
    {
        let mut set = Self::new(bounds);
        for point in points {
            set.add_point(point.x, point.y)?;
        }
        Ok(set)
    }

    /// Copy of this set clamped into new bounds, keeping every point's id.
    ///
    /// # Errors
    ///
    /// [`CurveError::DuplicateAbscissa`] if clamping pushes two points onto
    /// the same x.
    pub fn rebound(&self, bounds: AxisBounds) -> Result<Self> {
        let mut rebound = Self {
            bounds,
            entries: self
                .entries
                .iter()
                .map(|(id, p)| (*id, bounds.clamp(*p)))
                .collect(),
            next_id: self.next_id,
        };
        rebound.sort();
        for pair in rebound.entries.windows(2) {
            if let [(_, prev), (_, next)] = pair {
                if next.x - prev.x < MIN_X_GAP {
                    return Err(CurveError::DuplicateAbscissa { x: next.x });
                }
            }
        }
        Ok(rebound)
    }

    /// Bounds applied to every mutation.
    pub fn bounds(&self) -> AxisBounds {
        self.bounds
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Points in ascending x order.
    pub fn points(&self) -> Vec<ControlPoint> {
        self.entries.iter().map(|(_, p)| *p).collect()
    }

    /// `(id, point)` pairs in ascending x order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, ControlPoint)> + '_ {
        self.entries.iter().copied()
    }

    /// Look up a point by id.
    pub fn get(&self, id: PointId) -> Option<ControlPoint> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, p)| *p)
    }

    /// Whether the set contains `id`.
    pub fn contains(&self, id: PointId) -> bool {
        self.get(id).is_some()
    }

    /// Insert a point and keep the set sorted.
    ///
    /// # Errors
    ///
    /// [`CurveError::NonFinite`] for NaN/infinite input and
    /// [`CurveError::DuplicateAbscissa`] if a point already sits at (or
    /// within [`MIN_X_GAP`] of) the clamped x.
    pub fn add_point(&mut self, x: f32, y: f32) -> Result<PointId> {
        let point = self.admit(ControlPoint::new(x, y))?;
        self.ensure_free(point.x, None)?;

        let id = PointId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, point));
        self.sort();
        trace!(%id, x = point.x, y = point.y, "control point added");
        Ok(id)
    }

    /// Remove a point.
    ///
    /// Returns `false` (and does nothing) if the id is unknown or the set
    /// would drop below [`MIN_POINTS`].
    pub fn remove_point(&mut self, id: PointId) -> bool {
        if self.entries.len() <= MIN_POINTS {
            return false;
        }
        match self.index_of(id) {
            Some(index) => {
                self.entries.remove(index);
                trace!(%id, "control point removed");
                true
            }
            None => false,
        }
    }

    /// Move a point and re-sort; the point may pass its neighbours.
    ///
    /// # Errors
    ///
    /// [`CurveError::PointNotFound`] for an unknown id, otherwise the same
    /// errors as [`add_point`](Self::add_point) (checked against the other
    /// points only).
    pub fn move_point(&mut self, id: PointId, x: f32, y: f32) -> Result<()> {
        let index = self.index_of(id).ok_or(CurveError::PointNotFound(id))?;
        let point = self.admit(ControlPoint::new(x, y))?;
        self.ensure_free(point.x, Some(id))?;

        if let Some(entry) = self.entries.get_mut(index) {
            entry.1 = point;
        }
        self.sort();
        trace!(%id, x = point.x, y = point.y, "control point moved");
        Ok(())
    }

    /// Nearest point within `radius` of `(x, y)`, if any.
    pub fn point_at(&self, x: f32, y: f32, radius: f32) -> Option<PointId> {
        self.entries
            .iter()
            .map(|(id, p)| (*id, p.distance_to(x, y)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Check that the set can be interpolated.
    ///
    /// # Errors
    ///
    /// See [`validate_points`].
    pub fn validate(&self) -> Result<()> {
        validate_points(&self.points())
    }

    fn index_of(&self, id: PointId) -> Option<usize> {
        self.entries.iter().position(|(entry_id, _)| *entry_id == id)
    }

    fn admit(&self, point: ControlPoint) -> Result<ControlPoint> {
        point.ensure_finite()?;
        let clamped = self.bounds.clamp(point);
        if clamped != point {
            trace!(x = point.x, y = point.y, "control point clamped into axis bounds");
        }
        Ok(clamped)
    }

    fn ensure_free(&self, x: f32, ignore: Option<PointId>) -> Result<()> {
        let taken = self
            .entries
            .iter()
            .filter(|(id, _)| Some(*id) != ignore)
            .any(|(_, p)| (p.x - x).abs() < MIN_X_GAP);
        if taken {
            return Err(CurveError::DuplicateAbscissa { x });
        }
        Ok(())
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must<T, E: std::fmt::Debug>(result: std::result::Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    fn bounds(size: f32) -> AxisBounds {
        must(AxisBounds::new(size))
    }

    fn set() -> ControlPointSet {
        ControlPointSet::new(bounds(255.0))
    }

    fn xs(set: &ControlPointSet) -> Vec<f32> {
        set.points().iter().map(|p| p.x).collect()
    }

    #[test]
    fn test_add_keeps_sorted() -> Result<()> {
        let mut set = set();
        set.add_point(128.0, -128.0)?;
        set.add_point(0.0, 0.0)?;
        set.add_point(255.0, -255.0)?;
        set.add_point(64.0, -10.0)?;
        assert_eq!(xs(&set), vec![0.0, 64.0, 128.0, 255.0]);
        Ok(())
    }

    #[test]
    fn test_add_duplicate_x_rejected() -> Result<()> {
        let mut set = set();
        set.add_point(10.0, -10.0)?;
        set.add_point(20.0, -20.0)?;
        let before = set.clone();

        let result = set.add_point(10.0, -100.0);
        assert!(matches!(result, Err(CurveError::DuplicateAbscissa { .. })));
        assert_eq!(set, before);

        let result = set.add_point(20.0 + MIN_X_GAP / 2.0, -100.0);
        assert!(result.is_err());
        assert_eq!(set.len(), 2);
        Ok(())
    }

    #[test]
    fn test_add_clamps_out_of_range() -> Result<()> {
        let mut set = set();
        let id = set.add_point(400.0, 30.0)?;
        assert_eq!(set.get(id), Some(ControlPoint::new(255.0, 0.0)));
        Ok(())
    }

    #[test]
    fn test_clamped_duplicate_rejected() -> Result<()> {
        let mut set = set();
        set.add_point(255.0, -255.0)?;
        assert!(set.add_point(300.0, -10.0).is_err());
        Ok(())
    }

    #[test]
    fn test_add_non_finite_rejected() {
        let mut set = set();
        assert!(matches!(
            set.add_point(f32::NAN, 0.0),
            Err(CurveError::NonFinite { coordinate: "x", .. })
        ));
        assert!(matches!(
            set.add_point(1.0, f32::NEG_INFINITY),
            Err(CurveError::NonFinite { coordinate: "y", .. })
        ));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_point() -> Result<()> {
        let mut set = set();
        set.add_point(0.0, 0.0)?;
        let mid = set.add_point(100.0, -50.0)?;
        set.add_point(255.0, -255.0)?;

        assert!(set.remove_point(mid));
        assert!(!set.contains(mid));
        assert_eq!(xs(&set), vec![0.0, 255.0]);
        assert!(!set.remove_point(mid));
        Ok(())
    }

    #[test]
    fn test_remove_refuses_to_degenerate() -> Result<()> {
        let mut set = set();
        let a = set.add_point(0.0, 0.0)?;
        let b = set.add_point(255.0, -255.0)?;
        assert!(!set.remove_point(a));
        assert!(!set.remove_point(b));
        assert_eq!(set.len(), 2);
        Ok(())
    }

    #[test]
    fn test_move_reorders_past_neighbour() -> Result<()> {
        let mut set = set();
        let a = set.add_point(10.0, -10.0)?;
        set.add_point(50.0, -50.0)?;
        set.add_point(90.0, -90.0)?;

        set.move_point(a, 70.0, -30.0)?;
        assert_eq!(xs(&set), vec![50.0, 70.0, 90.0]);
        assert_eq!(set.iter().nth(1).map(|(id, _)| id), Some(a));
        Ok(())
    }

    #[test]
    fn test_move_onto_neighbour_rejected() -> Result<()> {
        let mut set = set();
        let a = set.add_point(10.0, -10.0)?;
        set.add_point(50.0, -50.0)?;
        let before = set.clone();

        assert!(set.move_point(a, 50.0, -5.0).is_err());
        assert_eq!(set, before);
        Ok(())
    }

    #[test]
    fn test_move_vertically_in_place() -> Result<()> {
        let mut set = set();
        let a = set.add_point(10.0, -10.0)?;
        set.move_point(a, 10.0, -200.0)?;
        assert_eq!(set.get(a), Some(ControlPoint::new(10.0, -200.0)));
        Ok(())
    }

    #[test]
    fn test_move_unknown_id() {
        let mut set = set();
        let id = PointId::from_raw(42);
        assert_eq!(
            set.move_point(id, 1.0, -1.0),
            Err(CurveError::PointNotFound(id))
        );
    }

    #[test]
    fn test_ids_not_reused() -> Result<()> {
        let mut set = set();
        set.add_point(0.0, 0.0)?;
        set.add_point(255.0, -255.0)?;
        let mid = set.add_point(100.0, -100.0)?;
        assert!(set.remove_point(mid));
        let again = set.add_point(100.0, -100.0)?;
        assert_ne!(mid, again);
        Ok(())
    }

    #[test]
    fn test_rebound_keeps_ids() -> Result<()> {
        let mut set = set();
        let a = set.add_point(10.0, -10.0)?;
        let b = set.add_point(200.0, -250.0)?;

        let smaller = set.rebound(bounds(100.0))?;
        assert_eq!(smaller.get(a), Some(ControlPoint::new(10.0, -10.0)));
        assert_eq!(smaller.get(b), Some(ControlPoint::new(100.0, -100.0)));
        assert_eq!(smaller.bounds().size(), 100.0);

        set.add_point(150.0, -20.0)?;
        assert!(matches!(
            set.rebound(bounds(100.0)),
            Err(CurveError::DuplicateAbscissa { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_point_at_picks_nearest() {
        let set = must(ControlPointSet::from_points(
            bounds(255.0),
            [
                ControlPoint::new(0.0, 0.0),
                ControlPoint::new(100.0, -100.0),
                ControlPoint::new(104.0, -100.0),
            ],
        ));
        let ids: Vec<PointId> = set.iter().map(|(id, _)| id).collect();

        assert_eq!(set.point_at(103.0, -100.0, 4.0), ids.get(2).copied());
        assert_eq!(set.point_at(100.5, -100.0, 4.0), ids.get(1).copied());
        assert_eq!(set.point_at(50.0, -50.0, 4.0), None);
    }

    #[test]
    fn test_validate_points() {
        let ok = [ControlPoint::new(0.0, 0.0), ControlPoint::new(1.0, -1.0)];
        assert!(validate_points(&ok).is_ok());

        assert_eq!(
            validate_points(&ok[..1]),
            Err(CurveError::TooFewPoints { count: 1 })
        );

        let unsorted = [
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(5.0, -1.0),
            ControlPoint::new(2.0, -1.0),
        ];
        assert_eq!(
            validate_points(&unsorted),
            Err(CurveError::UnsortedPoints { index: 2 })
        );

        let dup = [ControlPoint::new(3.0, 0.0), ControlPoint::new(3.0, -1.0)];
        assert_eq!(
            validate_points(&dup),
            Err(CurveError::DuplicateAbscissa { x: 3.0 })
        );

        let nan = [ControlPoint::new(0.0, f32::NAN), ControlPoint::new(1.0, -1.0)];
        assert!(matches!(
            validate_points(&nan),
            Err(CurveError::NonFinite { coordinate: "y", .. })
        ));
    }

    #[test]
    fn test_point_serialization() -> std::result::Result<(), serde_json::Error> {
        let p = ControlPoint::new(12.5, -40.0);
        let json = serde_json::to_string(&p)?;
        assert_eq!(json, r#"{"x":12.5,"y":-40.0}"#);
        let back: ControlPoint = serde_json::from_str(&json)?;
        assert_eq!(back, p);
        Ok(())
    }
}
