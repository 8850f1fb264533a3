//! # bevy_knot_picker
//!
//! A Bevy plugin for picking and dragging spline knots, with a coordinate
//! axis gizmo to mark the selection.
//!
//! ## Features
//!
//! - Nearest-knot picking by distance to the pointer ray, with a tolerance
//! - Selection handles that read and write knot positions in world space
//! - Lift and drag of the selected knot
//! - Axis gizmo (three arrows and a ground plane) that follows the selection
//! - Optional immediate-mode drawing of splines, knots and tangents
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_knot_picker::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SplinePlugin)
//!         .add_plugins(KnotPickerPlugin)
//!         .add_plugins(AxisGizmoPlugin)   // Optional: marks the picked knot
//!         .add_plugins(SplineDrawPlugin)  // Optional: draws splines and knots
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn((
//!         Camera3d::default(),
//!         Transform::from_xyz(0.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
//!     ));
//!
//!     commands.spawn(SplineContainer::single(Spline::from_points([
//!         Vec3::new(-3.0, 0.0, 0.0),
//!         Vec3::new(-1.0, 2.0, 0.0),
//!         Vec3::new(1.0, -1.0, 0.0),
//!         Vec3::new(3.0, 1.0, 0.0),
//!     ])));
//!
//!     commands.spawn(AxisGizmo::default());
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`SplinePlugin`]: Spline type registration (required)
//! - [`KnotPickerPlugin`]: Picking, lifting and dragging knots
//! - [`AxisGizmoPlugin`]: Coordinate axis gizmo
//! - [`SplineDrawPlugin`]: Drawing splines with Bevy gizmos (`draw` feature)

pub mod geometry;
pub mod gizmo;
pub mod picking;
pub mod spline;

#[cfg(feature = "draw")]
pub mod draw;

pub use gizmo::AxisGizmoPlugin;
pub use picking::KnotPickerPlugin;
pub use spline::SplinePlugin;

#[cfg(feature = "draw")]
pub use draw::SplineDrawPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::gizmo::{AxisGizmo, AxisGizmoPlugin, GizmoParts, GizmoSettings};
    pub use crate::picking::{
        find_nearest_knot, pick_knot, KnotPickerPlugin, KnotPickingSystems, KnotSelection,
        KnotSelectionEvent, PickSettings, SelectionError, SelectionState, SplineKnotHandle,
    };
    pub use crate::spline::{
        BezierKnot, KnotStorage, Spline, SplineContainer, SplinePlugin, TangentMode,
    };

    #[cfg(feature = "draw")]
    pub use crate::draw::{DrawSettings, SplineDrawPlugin};
}
