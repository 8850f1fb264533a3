use super::components::{Spline, SplineContainer};
use super::types::{BezierKnot, TangentMode};

/// Indexed, mutable access to the knots of a set of splines.
///
/// Knots are returned by value; writes replace the whole knot. Indices are
/// not stable across edits, so callers re-check them before every access.
pub trait KnotStorage {
    /// Number of splines.
    fn spline_count(&self) -> usize;

    /// Number of knots in spline `spline`, or 0 if it does not exist.
    fn knot_count(&self, spline: usize) -> usize;

    /// Copy of a knot.
    fn knot(&self, spline: usize, knot: usize) -> Option<BezierKnot>;

    /// Overwrite a knot. Returns false if the indices are out of range.
    fn set_knot(&mut self, spline: usize, knot: usize, value: BezierKnot) -> bool;

    /// Set a knot's tangent mode. Returns false if the indices are out of range.
    fn set_tangent_mode(&mut self, spline: usize, knot: usize, mode: TangentMode) -> bool;

    /// Set every knot of every spline to `mode`.
    fn set_all_tangent_modes(&mut self, mode: TangentMode) {
        for spline in 0..self.spline_count() {
            for knot in 0..self.knot_count(spline) {
                self.set_tangent_mode(spline, knot, mode);
            }
        }
    }
}

impl KnotStorage for [Spline] {
    fn spline_count(&self) -> usize {
        self.len()
    }

    fn knot_count(&self, spline: usize) -> usize {
        self.get(spline).map_or(0, Spline::len)
    }

    fn knot(&self, spline: usize, knot: usize) -> Option<BezierKnot> {
        self.get(spline)?.knot(knot)
    }

    fn set_knot(&mut self, spline: usize, knot: usize, value: BezierKnot) -> bool {
        self.get_mut(spline)
            .is_some_and(|s| s.set_knot(knot, value))
    }

    fn set_tangent_mode(&mut self, spline: usize, knot: usize, mode: TangentMode) -> bool {
        self.get_mut(spline)
            .is_some_and(|s| s.set_tangent_mode(knot, mode))
    }
}

impl KnotStorage for SplineContainer {
    fn spline_count(&self) -> usize {
        self.splines.spline_count()
    }

    fn knot_count(&self, spline: usize) -> usize {
        self.splines.knot_count(spline)
    }

    fn knot(&self, spline: usize, knot: usize) -> Option<BezierKnot> {
        self.splines.knot(spline, knot)
    }

    fn set_knot(&mut self, spline: usize, knot: usize, value: BezierKnot) -> bool {
        self.splines.set_knot(spline, knot, value)
    }

    fn set_tangent_mode(&mut self, spline: usize, knot: usize, mode: TangentMode) -> bool {
        self.splines.set_tangent_mode(spline, knot, mode)
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::*;

    #[test]
    fn test_container_indexing() {
        let mut container = SplineContainer::new(vec![
            Spline::from_points([Vec3::ZERO, Vec3::X]),
            Spline::from_points([Vec3::Y, Vec3::Z, Vec3::ONE]),
        ]);

        assert_eq!(container.spline_count(), 2);
        assert_eq!(container.knot_count(1), 3);
        assert_eq!(container.knot_count(5), 0);
        assert_eq!(container.knot(1, 2).map(|k| k.position), Some(Vec3::ONE));
        assert!(container.knot(2, 0).is_none());
        assert!(!container.set_knot(0, 2, BezierKnot::default()));
        assert!(!container.set_tangent_mode(3, 0, TangentMode::Broken));
    }

    #[test]
    fn test_set_all_tangent_modes() {
        let mut container = SplineContainer::new(vec![
            Spline::from_points([Vec3::ZERO, Vec3::X, Vec3::Y]),
            Spline::from_points([Vec3::Z]),
        ]);
        container.set_all_tangent_modes(TangentMode::Broken);

        for spline in &container.splines {
            for i in 0..spline.len() {
                assert_eq!(spline.tangent_mode(i), Some(TangentMode::Broken));
            }
        }
    }
}
