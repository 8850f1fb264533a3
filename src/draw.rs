//! Immediate-mode drawing of spline containers, knots and tangents.

use bevy::{gizmos::config::GizmoConfigStore, prelude::*};

use crate::picking::SelectionState;
use crate::spline::SplineContainer;

/// Settings for spline drawing.
#[derive(Resource, Debug, Clone)]
pub struct DrawSettings {
    /// Whether to draw spline curves.
    pub show_splines: bool,
    /// Whether to draw knots.
    pub show_knots: bool,
    /// Whether to draw tangent handles.
    pub show_tangents: bool,
    /// Number of line segments per spline segment.
    pub curve_resolution: usize,
    /// Radius of knot spheres.
    pub knot_radius: f32,
    /// Scale applied to the selected knot's sphere.
    pub selected_knot_scale: f32,
    /// Line width for curves and handles.
    pub line_width: f32,
    pub spline_color: Color,
    pub knot_color: Color,
    pub selected_knot_color: Color,
    pub tangent_color: Color,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            show_splines: true,
            show_knots: true,
            show_tangents: true,
            curve_resolution: 32,
            knot_radius: 0.1,
            selected_knot_scale: 1.5,
            line_width: 3.0,
            spline_color: Color::srgb(0.5, 0.5, 0.5),
            knot_color: Color::srgb(0.3, 0.3, 0.8),
            selected_knot_color: Color::srgb(1.0, 0.4, 0.4),
            tangent_color: Color::srgba(0.6, 0.6, 0.6, 0.5),
        }
    }
}

impl DrawSettings {
    /// Toggle all spline drawing.
    pub fn toggle(&mut self) {
        let show = !(self.show_splines || self.show_knots || self.show_tangents);
        self.show_splines = show;
        self.show_knots = show;
        self.show_tangents = show;
    }
}

/// System to sync draw settings to the default gizmo config.
fn sync_gizmo_config(settings: Res<DrawSettings>, mut config_store: ResMut<GizmoConfigStore>) {
    if !settings.is_changed() {
        return;
    }
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = settings.line_width;
}

/// System to draw spline curves in world space.
pub fn draw_splines(
    settings: Res<DrawSettings>,
    containers: Query<(&SplineContainer, &GlobalTransform)>,
    mut gizmos: Gizmos,
) {
    if !settings.show_splines {
        return;
    }

    for (container, global_transform) in &containers {
        for spline in &container.splines {
            let points = spline.sample(settings.curve_resolution);
            if points.len() < 2 {
                continue;
            }
            gizmos.linestrip(
                points.iter().map(|&p| global_transform.transform_point(p)),
                settings.spline_color,
            );
        }
    }
}

/// System to draw knots and their tangent handles, highlighting the selected knot.
pub fn draw_knots(
    settings: Res<DrawSettings>,
    selection_state: Option<Res<SelectionState>>,
    containers: Query<(Entity, &SplineContainer, &GlobalTransform)>,
    mut gizmos: Gizmos,
) {
    if !settings.show_knots && !settings.show_tangents {
        return;
    }

    for (entity, container, global_transform) in &containers {
        for (spline_index, spline) in container.splines.iter().enumerate() {
            for (knot_index, knot) in spline.knots().iter().enumerate() {
                let position = global_transform.transform_point(knot.position);

                if settings.show_tangents {
                    let (handle_in, handle_out) = knot.handles();
                    gizmos.line(
                        position,
                        global_transform.transform_point(handle_in),
                        settings.tangent_color,
                    );
                    gizmos.line(
                        position,
                        global_transform.transform_point(handle_out),
                        settings.tangent_color,
                    );
                }

                if !settings.show_knots {
                    continue;
                }

                let is_selected = selection_state
                    .as_ref()
                    .is_some_and(|s| s.is_selected(entity, spline_index, knot_index));
                let (color, radius) = if is_selected {
                    (
                        settings.selected_knot_color,
                        settings.knot_radius * settings.selected_knot_scale,
                    )
                } else {
                    (settings.knot_color, settings.knot_radius)
                };

                gizmos.sphere(Isometry3d::from_translation(position), radius, color);
            }
        }
    }
}

/// Plugin that draws spline containers with Bevy gizmos.
///
/// Highlights the selected knot when `KnotPickerPlugin` is also added.
pub struct SplineDrawPlugin;

impl Plugin for SplineDrawPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawSettings>()
            .add_systems(Update, (sync_gizmo_config, draw_splines, draw_knots));
    }
}
