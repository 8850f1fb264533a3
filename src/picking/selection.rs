use bevy::prelude::*;

use crate::spline::{BezierKnot, KnotStorage};

use super::SelectionError;

/// Locates one knot by (spline, knot) index.
///
/// This is not a reference: the storage may change between frames, so every
/// access re-checks the indices and fails with [`SelectionError`] when stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct KnotSelection {
    /// Index of the spline within its container.
    pub spline_index: usize,
    /// Index of the knot within its spline.
    pub knot_index: usize,
}

impl KnotSelection {
    pub fn new(spline_index: usize, knot_index: usize) -> Self {
        Self {
            spline_index,
            knot_index,
        }
    }

    /// Check the indices against the storage's current shape.
    pub fn validate<S: KnotStorage + ?Sized>(&self, storage: &S) -> Result<(), SelectionError> {
        let count = storage.spline_count();
        if self.spline_index >= count {
            return Err(SelectionError::SplineOutOfRange {
                spline: self.spline_index,
                count,
            });
        }

        let count = storage.knot_count(self.spline_index);
        if self.knot_index >= count {
            return Err(SelectionError::KnotOutOfRange {
                spline: self.spline_index,
                knot: self.knot_index,
                count,
            });
        }

        Ok(())
    }

    pub fn is_valid<S: KnotStorage + ?Sized>(&self, storage: &S) -> bool {
        self.validate(storage).is_ok()
    }

    /// Copy of the selected knot.
    pub fn knot<S: KnotStorage + ?Sized>(&self, storage: &S) -> Result<BezierKnot, SelectionError> {
        self.validate(storage)?;
        storage
            .knot(self.spline_index, self.knot_index)
            .ok_or(SelectionError::KnotOutOfRange {
                spline: self.spline_index,
                knot: self.knot_index,
                count: storage.knot_count(self.spline_index),
            })
    }

    /// World-space position of the selected knot.
    pub fn world_position<S: KnotStorage + ?Sized>(
        &self,
        storage: &S,
        owner: &GlobalTransform,
    ) -> Result<Vec3, SelectionError> {
        let knot = self.knot(storage)?;
        Ok(owner.transform_point(knot.position))
    }

    /// Move the selected knot to a world-space position.
    ///
    /// The knot is copied out, its position replaced with `world` mapped into
    /// the owner's local space, and written back. Tangents are untouched.
    pub fn set_world_position<S: KnotStorage + ?Sized>(
        &self,
        storage: &mut S,
        owner: &GlobalTransform,
        world: Vec3,
    ) -> Result<(), SelectionError> {
        let mut knot = self.knot(storage)?;
        knot.position = owner.affine().inverse().transform_point3(world);

        if storage.set_knot(self.spline_index, self.knot_index, knot) {
            Ok(())
        } else {
            Err(SelectionError::KnotOutOfRange {
                spline: self.spline_index,
                knot: self.knot_index,
                count: storage.knot_count(self.spline_index),
            })
        }
    }
}

/// A [`KnotSelection`] together with the container entity it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct SplineKnotHandle {
    /// Entity holding the [`SplineContainer`](crate::spline::SplineContainer).
    pub container: Entity,
    /// Which knot inside that container.
    pub selection: KnotSelection,
}

impl SplineKnotHandle {
    pub fn new(container: Entity, selection: KnotSelection) -> Self {
        Self {
            container,
            selection,
        }
    }

    pub fn spline_index(&self) -> usize {
        self.selection.spline_index
    }

    pub fn knot_index(&self) -> usize {
        self.selection.knot_index
    }

    pub fn is_valid<S: KnotStorage + ?Sized>(&self, storage: &S) -> bool {
        self.selection.is_valid(storage)
    }

    pub fn knot<S: KnotStorage + ?Sized>(&self, storage: &S) -> Result<BezierKnot, SelectionError> {
        self.selection.knot(storage)
    }

    /// World-space position of the knot; `storage` must be this handle's container.
    pub fn world_position<S: KnotStorage + ?Sized>(
        &self,
        storage: &S,
        owner: &GlobalTransform,
    ) -> Result<Vec3, SelectionError> {
        self.selection.world_position(storage, owner)
    }

    /// Move the knot to a world-space position; `storage` must be this handle's container.
    pub fn set_world_position<S: KnotStorage + ?Sized>(
        &self,
        storage: &mut S,
        owner: &GlobalTransform,
        world: Vec3,
    ) -> Result<(), SelectionError> {
        self.selection.set_world_position(storage, owner, world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline::{Spline, SplineContainer, TangentMode};

    fn container() -> SplineContainer {
        SplineContainer::single(Spline::from_points([
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(5.0, 5.0, 5.0),
        ]))
    }

    #[test]
    fn test_stale_indices_fail() {
        let mut c = container();
        let owner = GlobalTransform::IDENTITY;

        let bad_spline = KnotSelection::new(1, 0);
        assert_eq!(
            bad_spline.world_position(&c, &owner),
            Err(SelectionError::SplineOutOfRange { spline: 1, count: 1 })
        );

        let bad_knot = KnotSelection::new(0, 3);
        assert_eq!(
            bad_knot.set_world_position(&mut c, &owner, Vec3::ONE),
            Err(SelectionError::KnotOutOfRange {
                spline: 0,
                knot: 3,
                count: 3
            })
        );
    }

    #[test]
    fn test_selection_becomes_stale_after_removal() {
        let mut c = container();
        let selection = KnotSelection::new(0, 2);
        assert!(selection.is_valid(&c));

        c.splines[0].remove_knot(2);
        assert!(!selection.is_valid(&c));
    }

    #[test]
    fn test_round_trip_through_owner_transform() {
        let mut c = container();
        let owner = GlobalTransform::from(
            Transform::from_xyz(2.0, -1.0, 4.0)
                .with_rotation(Quat::from_rotation_y(0.7) * Quat::from_rotation_x(0.3))
                .with_scale(Vec3::new(2.0, 0.5, 1.5)),
        );
        let selection = KnotSelection::new(0, 1);
        let target = Vec3::new(-3.0, 7.5, 0.25);

        selection.set_world_position(&mut c, &owner, target).unwrap();
        let read_back = selection.world_position(&c, &owner).unwrap();
        assert!((read_back - target).length() < 1e-4);
    }

    #[test]
    fn test_write_preserves_tangents_and_mode() {
        let mut c = container();
        c.splines[0].set_tangent_mode(1, TangentMode::Broken);
        let before = c.splines[0].knot(1).unwrap();

        let selection = KnotSelection::new(0, 1);
        selection
            .set_world_position(&mut c, &GlobalTransform::IDENTITY, Vec3::new(1.0, 2.0, 3.0))
            .unwrap();

        let after = c.splines[0].knot(1).unwrap();
        assert_eq!(after.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(after.tangent_in, before.tangent_in);
        assert_eq!(after.tangent_out, before.tangent_out);
        assert_eq!(c.splines[0].tangent_mode(1), Some(TangentMode::Broken));
    }

    #[test]
    fn test_translated_owner_world_position() {
        let c = container();
        let owner = GlobalTransform::from_xyz(10.0, 0.0, 0.0);
        let pos = KnotSelection::new(0, 1).world_position(&c, &owner).unwrap();
        assert!((pos - Vec3::new(11.0, 0.0, 0.0)).length() < 1e-5);
    }
}
