//! Coordinate-axis gizmo used to mark a world position, typically the picked knot.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_knot_picker::prelude::*;
//!
//! fn setup(mut commands: Commands) {
//!     // Follows the picked knot and hides when the selection clears
//!     commands.spawn(AxisGizmo::default());
//! }
//!
//! fn park_gizmo(mut gizmos: Query<&mut AxisGizmo>) {
//!     for mut gizmo in &mut gizmos {
//!         gizmo.show(Vec3::new(0.0, 1.0, 0.0));
//!     }
//! }
//! ```

mod components;
mod layout;
mod systems;

pub use components::{AxisGizmo, GizmoParts};
pub use layout::{
    build_gizmo_hierarchy, AxisLayout, GizmoLayout, GizmoPart, MeshPrimitiveFactory, PartShape,
    PrimitiveFactory,
};
pub use systems::{build_axis_gizmos, draw_plane_outline, follow_selection, sync_gizmo_root};

use bevy::prelude::*;

use crate::picking::{KnotPickingSystems, KnotSelectionEvent};

/// Settings for the axis gizmo's look.
///
/// Read when a gizmo is built; changing them later does not rebuild existing gizmos.
#[derive(Resource, Debug, Clone)]
pub struct GizmoSettings {
    /// Length of each axis shaft.
    pub axis_length: f32,
    /// Radius of each axis shaft.
    pub axis_radius: f32,
    /// Size of the arrow head relative to the shaft radius.
    pub tip_scale: f32,
    /// Side of the ground plane relative to `axis_length`.
    pub plane_scale: f32,
    /// Opacity of the ground plane.
    pub plane_alpha: f32,
    /// Brightness multiplier for the plane's outline.
    pub outline_boost: f32,
    /// Whether to draw the plane's outline.
    pub show_outline: bool,
    pub x_color: Color,
    pub y_color: Color,
    pub z_color: Color,
    pub plane_color: Color,
}

impl Default for GizmoSettings {
    fn default() -> Self {
        Self {
            axis_length: 0.8,
            axis_radius: 0.03,
            tip_scale: 3.0,
            plane_scale: 0.5,
            plane_alpha: 0.35,
            outline_boost: 1.5,
            show_outline: true,
            x_color: Color::srgb(1.0, 0.0, 0.0),
            y_color: Color::srgb(0.0, 1.0, 0.0),
            z_color: Color::srgb(0.0, 0.0, 1.0),
            plane_color: Color::srgb(0.0, 1.0, 0.0),
        }
    }
}

impl GizmoSettings {
    /// Half the side length of the ground plane.
    pub fn plane_half_size(&self) -> f32 {
        self.axis_length * self.plane_scale * 0.5
    }

    /// Plane color brightened by `outline_boost`, fully opaque.
    pub fn outline_color(&self) -> Color {
        let base = self.plane_color.to_linear();
        Color::linear_rgb(
            base.red * self.outline_boost,
            base.green * self.outline_boost,
            base.blue * self.outline_boost,
        )
    }
}

/// Plugin that builds [`AxisGizmo`] entities and keeps them in sync.
///
/// Gizmos with `follow_selection` set track [`KnotSelectionEvent`]s, so adding
/// this after `KnotPickerPlugin` makes the gizmo jump to the picked knot.
pub struct AxisGizmoPlugin;

impl Plugin for AxisGizmoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GizmoSettings>()
            .register_type::<AxisGizmo>()
            .add_message::<KnotSelectionEvent>()
            .add_systems(
                Update,
                (
                    systems::follow_selection.after(KnotPickingSystems),
                    systems::build_axis_gizmos,
                    systems::sync_gizmo_root,
                    systems::draw_plane_outline,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_brighter_than_plane() {
        let settings = GizmoSettings::default();
        let outline = settings.outline_color().to_linear();
        let plane = settings.plane_color.to_linear();
        assert!(outline.green > plane.green);
        assert_eq!(outline.alpha, 1.0);
    }

    #[test]
    fn test_plane_half_size() {
        let settings = GizmoSettings {
            axis_length: 2.0,
            plane_scale: 0.5,
            ..default()
        };
        assert!((settings.plane_half_size() - 0.5).abs() < 1e-6);
    }
}
