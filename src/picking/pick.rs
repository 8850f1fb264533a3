//! Nearest-knot picking by distance to a pointer ray.

use bevy::prelude::*;

use crate::geometry::distance_to_ray;
use crate::spline::{KnotStorage, TangentMode};

use super::KnotSelection;

/// The knot closest to a ray, with its distance and world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub selection: KnotSelection,
    /// Distance from the knot to the ray.
    pub distance: f32,
    /// World-space position of the knot.
    pub world_position: Vec3,
}

/// Find the knot closest to `ray`, ignoring any tolerance.
///
/// Knots are visited spline by spline, then knot by knot; on equal distances
/// the first one visited wins. Knots at a non-finite distance (e.g. a NaN
/// position) are never chosen. Returns `None` when there is no owner
/// transform or no knots at all.
pub fn nearest_knot<S: KnotStorage + ?Sized>(
    ray: Ray3d,
    storage: &S,
    owner: Option<&GlobalTransform>,
) -> Option<PickHit> {
    let owner = owner?;
    let mut best: Option<PickHit> = None;
    let mut best_distance = f32::INFINITY;

    for spline_index in 0..storage.spline_count() {
        for knot_index in 0..storage.knot_count(spline_index) {
            let Some(knot) = storage.knot(spline_index, knot_index) else {
                continue;
            };
            let world_position = owner.transform_point(knot.position);
            let distance = distance_to_ray(world_position, ray);

            if distance < best_distance {
                best_distance = distance;
                best = Some(PickHit {
                    selection: KnotSelection::new(spline_index, knot_index),
                    distance,
                    world_position,
                });
            }
        }
    }

    best
}

/// Find the knot closest to `ray` if it lies within `tolerance`.
///
/// Has no side effects; see [`pick_knot`] for the editing variant.
pub fn find_nearest_knot<S: KnotStorage + ?Sized>(
    ray: Ray3d,
    storage: &S,
    owner: Option<&GlobalTransform>,
    tolerance: f32,
) -> Option<PickHit> {
    nearest_knot(ray, storage, owner).filter(|hit| hit.distance <= tolerance)
}

/// Pick the knot closest to `ray` within `tolerance`.
///
/// On success every knot of every spline in `storage` is switched to
/// [`TangentMode::Broken`], so the picked knot's tangents can then be edited
/// independently.
pub fn pick_knot<S: KnotStorage + ?Sized>(
    ray: Ray3d,
    storage: &mut S,
    owner: Option<&GlobalTransform>,
    tolerance: f32,
) -> Option<KnotSelection> {
    let hit = find_nearest_knot(ray, storage, owner, tolerance)?;
    storage.set_all_tangent_modes(TangentMode::Broken);
    Some(hit.selection)
}
