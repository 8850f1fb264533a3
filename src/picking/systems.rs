use bevy::{prelude::*, window::PrimaryWindow};

use crate::geometry::ray_plane_intersect;
use crate::spline::SplineContainer;

use super::{
    nearest_knot, pick_knot, KnotSelectionEvent, PickHit, PickSettings, SelectionError,
    SelectionState, SplineKnotHandle,
};

/// A world-space pointer ray and the forward direction of the camera that cast it.
#[derive(Debug, Clone, Copy)]
pub struct PointerRay {
    pub ray: Ray3d,
    pub view_forward: Vec3,
}

impl PointerRay {
    /// Cast a ray from the 3D camera through the primary window's cursor.
    ///
    /// Returns `None` if the window, the cursor, or a single 3D camera is missing.
    pub fn from_cursor(
        windows: &Query<&Window, With<PrimaryWindow>>,
        cameras: &Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    ) -> Option<Self> {
        let window = windows.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        let (camera, camera_transform) = cameras.single().ok()?;
        let ray = camera.viewport_to_world(camera_transform, cursor_pos).ok()?;

        Some(Self {
            ray,
            view_forward: camera_transform.forward().as_vec3(),
        })
    }
}

/// Find the knot nearest to `ray` across several containers.
///
/// Containers are visited in iteration order and the first of equally near
/// knots wins.
pub fn nearest_container_knot<'a>(
    ray: Ray3d,
    containers: impl IntoIterator<Item = (Entity, &'a SplineContainer, &'a GlobalTransform)>,
) -> Option<(Entity, PickHit)> {
    let mut best: Option<(Entity, PickHit)> = None;
    let mut best_distance = f32::INFINITY;

    for (entity, container, owner) in containers {
        let Some(hit) = nearest_knot(ray, container, Some(owner)) else {
            continue;
        };
        if hit.distance < best_distance {
            best_distance = hit.distance;
            best = Some((entity, hit));
        }
    }

    best
}

/// System to drop the active selection once its container or indices are gone.
pub fn validate_selection(
    mut selection_state: ResMut<SelectionState>,
    containers: Query<&SplineContainer>,
    mut events: MessageWriter<KnotSelectionEvent>,
) {
    let Some(handle) = selection_state.active else {
        return;
    };

    let result = containers
        .get(handle.container)
        .map_err(|_| SelectionError::MissingContainer(handle.container))
        .and_then(|container| handle.selection.validate(container));

    if let Err(err) = result {
        warn!("Dropping stale knot selection: {err}");
        selection_state.clear();
        events.write(KnotSelectionEvent::Cleared);
    }
}

/// System to pick the knot under the cursor when the pick button is pressed.
///
/// A click that hits nothing (or cannot cast a ray at all) clears the selection.
pub fn pick_on_click(
    settings: Res<PickSettings>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut containers: Query<(Entity, &mut SplineContainer, &GlobalTransform)>,
    mut selection_state: ResMut<SelectionState>,
    mut events: MessageWriter<KnotSelectionEvent>,
) {
    if !settings.enabled || !mouse.just_pressed(settings.pick_button) {
        return;
    }

    let pointer = PointerRay::from_cursor(&windows, &cameras);
    let event = apply_pick(pointer, &settings, &mut containers, &mut selection_state);
    events.write(event);
}

/// Pick the knot nearest to `pointer` across all containers and update the selection.
///
/// Only the winning container goes through [`pick_knot`], so only its tangents
/// are broken. A missing pointer counts as a miss. Returns the message that
/// describes the outcome.
pub fn apply_pick(
    pointer: Option<PointerRay>,
    settings: &PickSettings,
    containers: &mut Query<(Entity, &mut SplineContainer, &GlobalTransform)>,
    selection_state: &mut SelectionState,
) -> KnotSelectionEvent {
    let picked = pointer.and_then(|pointer| {
        pick_winning_container(pointer.ray, settings.tolerance, containers)
            .map(|(handle, position)| (pointer, handle, position))
    });

    let Some((pointer, handle, position)) = picked else {
        if selection_state.active.is_some() {
            debug!("Pick missed, clearing knot selection");
        }
        selection_state.clear();
        return KnotSelectionEvent::Cleared;
    };

    info!(
        "Picked spline={}, knot={}, pos={}",
        handle.spline_index(),
        handle.knot_index(),
        position
    );
    selection_state.select(handle);

    if settings.drag_enabled {
        selection_state.dragging = true;
        selection_state.drag_plane_normal = pointer.view_forward;
        selection_state.drag_plane_point = position;
        selection_state.drag_offset =
            ray_plane_intersect(pointer.ray, position, pointer.view_forward)
                .map_or(Vec3::ZERO, |on_plane| position - on_plane);
    }

    KnotSelectionEvent::Picked { handle, position }
}

fn pick_winning_container(
    ray: Ray3d,
    tolerance: f32,
    containers: &mut Query<(Entity, &mut SplineContainer, &GlobalTransform)>,
) -> Option<(SplineKnotHandle, Vec3)> {
    let (entity, _) = nearest_container_knot(ray, containers.iter())?;
    let (_, mut container, owner) = containers.get_mut(entity).ok()?;
    let selection = pick_knot(ray, &mut *container, Some(owner), tolerance)?;
    let position = selection.world_position(&*container, owner).ok()?;
    Some((SplineKnotHandle::new(entity, selection), position))
}

/// System to raise the selected knot while the lift button is held.
pub fn lift_selected_knot(
    settings: Res<PickSettings>,
    mouse: Res<ButtonInput<MouseButton>>,
    selection_state: Res<SelectionState>,
    mut containers: Query<(&mut SplineContainer, &GlobalTransform)>,
    mut events: MessageWriter<KnotSelectionEvent>,
) {
    if !settings.enabled || !mouse.pressed(settings.lift_button) {
        return;
    }
    let Some(handle) = selection_state.active else {
        return;
    };

    let step = Vec3::Y * settings.lift_step;
    match move_knot(handle, &mut containers, |current| current + step) {
        Ok(position) => {
            events.write(KnotSelectionEvent::Moved { handle, position });
        }
        Err(err) => warn!("Cannot lift knot: {err}"),
    }
}

/// System to drag the selected knot while the pick button stays held.
///
/// The knot moves on the plane through its pick position facing the camera.
pub fn drag_selected_knot(
    settings: Res<PickSettings>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut selection_state: ResMut<SelectionState>,
    mut containers: Query<(&mut SplineContainer, &GlobalTransform)>,
    mut events: MessageWriter<KnotSelectionEvent>,
) {
    if !settings.enabled {
        return;
    }

    // End drag
    if !mouse.pressed(settings.pick_button) {
        if selection_state.dragging {
            selection_state.dragging = false;
        }
        return;
    }

    // The pick frame itself never moves the knot
    if !settings.drag_enabled
        || !selection_state.dragging
        || mouse.just_pressed(settings.pick_button)
    {
        return;
    }

    let Some(pointer) = PointerRay::from_cursor(&windows, &cameras) else {
        return;
    };

    match drag_to_pointer(pointer, &selection_state, &mut containers) {
        Ok(Some(event)) => {
            events.write(event);
        }
        Ok(None) => {}
        Err(err) => warn!("Cannot drag knot: {err}"),
    }
}

/// Move the selected knot to where `pointer` crosses the drag plane, keeping
/// the offset captured at pick time.
///
/// Returns `Ok(None)` when nothing is selected or the pointer misses the plane.
pub fn drag_to_pointer(
    pointer: PointerRay,
    selection_state: &SelectionState,
    containers: &mut Query<(&mut SplineContainer, &GlobalTransform)>,
) -> Result<Option<KnotSelectionEvent>, SelectionError> {
    let Some(handle) = selection_state.active else {
        return Ok(None);
    };
    let Some(on_plane) = ray_plane_intersect(
        pointer.ray,
        selection_state.drag_plane_point,
        selection_state.drag_plane_normal,
    ) else {
        return Ok(None);
    };

    let target = on_plane + selection_state.drag_offset;
    let position = move_knot(handle, containers, |_| target)?;
    Ok(Some(KnotSelectionEvent::Moved { handle, position }))
}

fn move_knot(
    handle: SplineKnotHandle,
    containers: &mut Query<(&mut SplineContainer, &GlobalTransform)>,
    to: impl FnOnce(Vec3) -> Vec3,
) -> Result<Vec3, SelectionError> {
    let (mut container, owner) = containers
        .get_mut(handle.container)
        .map_err(|_| SelectionError::MissingContainer(handle.container))?;

    let current = handle.world_position(&*container, owner)?;
    let target = to(current);
    handle.set_world_position(&mut *container, owner, target)?;
    Ok(target)
}
