//! Knot picking and dragging.
//!
//! On a click, the pointer is turned into a world-space ray and the knot
//! closest to it (within [`PickSettings::tolerance`]) becomes the active
//! selection. The selected knot can then be lifted with a held button or
//! dragged along a camera-facing plane.
//!
//! The pure functions ([`pick_knot`], [`find_nearest_knot`], and the
//! [`KnotSelection`] accessors) work on any [`KnotStorage`](crate::spline::KnotStorage)
//! and can be driven without the plugin.

mod error;
mod pick;
mod selection;
mod systems;

pub use error::SelectionError;
pub use pick::{find_nearest_knot, nearest_knot, pick_knot, PickHit};
pub use selection::{KnotSelection, SplineKnotHandle};
pub use systems::{
    apply_pick, drag_selected_knot, drag_to_pointer, lift_selected_knot, nearest_container_knot,
    pick_on_click, validate_selection, PointerRay,
};

use bevy::prelude::*;

/// Settings for knot picking.
#[derive(Resource, Debug, Clone)]
pub struct PickSettings {
    /// Whether picking responds to input.
    pub enabled: bool,
    /// Maximum distance from the pointer ray, in world units, for a knot to be picked.
    pub tolerance: f32,
    /// Button that picks on press and drags while held.
    pub pick_button: MouseButton,
    /// Button that lifts the selected knot while held.
    pub lift_button: MouseButton,
    /// World units the selected knot rises per frame while `lift_button` is held.
    pub lift_step: f32,
    /// Whether holding `pick_button` after a pick drags the knot.
    pub drag_enabled: bool,
}

impl Default for PickSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance: 1.0,
            pick_button: MouseButton::Left,
            lift_button: MouseButton::Back,
            lift_step: 0.25,
            drag_enabled: true,
        }
    }
}

impl PickSettings {
    /// Toggle picking on/off.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

/// Resource tracking the active knot selection.
#[derive(Resource, Default, Debug, Clone)]
pub struct SelectionState {
    /// The selected knot, if any.
    pub active: Option<SplineKnotHandle>,
    /// Whether we're currently dragging the selected knot.
    pub dragging: bool,
    /// The plane normal for drag operations (camera forward at pick time).
    pub drag_plane_normal: Vec3,
    /// A point on the drag plane (the knot's world position at pick time).
    pub drag_plane_point: Vec3,
    /// Offset from the pointer's plane hit to the knot, so dragging doesn't snap.
    pub drag_offset: Vec3,
}

impl SelectionState {
    /// Make `handle` the active selection.
    pub fn select(&mut self, handle: SplineKnotHandle) {
        self.active = Some(handle);
        self.dragging = false;
    }

    /// Drop the active selection and stop any drag.
    pub fn clear(&mut self) {
        self.active = None;
        self.dragging = false;
    }

    pub fn is_selected(&self, container: Entity, spline_index: usize, knot_index: usize) -> bool {
        self.active.is_some_and(|h| {
            h.container == container
                && h.spline_index() == spline_index
                && h.knot_index() == knot_index
        })
    }
}

/// Message emitted when the active selection changes or its knot moves.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum KnotSelectionEvent {
    /// A knot was picked; `position` is its world position.
    Picked {
        handle: SplineKnotHandle,
        position: Vec3,
    },
    /// The selected knot was moved to `position`.
    Moved {
        handle: SplineKnotHandle,
        position: Vec3,
    },
    /// The selection was dropped, either by a missed pick or because it went stale.
    Cleared,
}

/// System set containing the picking systems, in execution order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct KnotPickingSystems;

/// Plugin that adds knot picking and dragging.
///
/// This plugin requires `SplinePlugin` to be added first.
///
/// # Controls
/// - Left click: pick the nearest knot under the cursor, or clear on a miss
/// - Left drag: move the picked knot along a camera-facing plane
/// - Mouse back button (held): lift the picked knot
///
/// Buttons and tolerance are configured through [`PickSettings`].
pub struct KnotPickerPlugin;

impl Plugin for KnotPickerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PickSettings>()
            .init_resource::<SelectionState>()
            .add_message::<KnotSelectionEvent>()
            .add_systems(
                Update,
                (
                    systems::validate_selection,
                    systems::pick_on_click,
                    systems::lift_selected_knot,
                    systems::drag_selected_knot,
                )
                    .chain()
                    .in_set(KnotPickingSystems),
            );
    }
}
