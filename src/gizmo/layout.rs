//! Shape and placement of the gizmo's parts, and the seam that spawns them.

use bevy::prelude::*;

use super::{GizmoParts, GizmoSettings};

/// Mesh shape of a gizmo part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartShape {
    /// Axis shaft, along local +Y.
    Shaft(Cylinder),
    /// Arrow head, tip pointing along local +Y.
    Tip(Cone),
    /// Flat quad.
    Plane(Plane3d),
}

/// One renderable part of the gizmo, relative to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct GizmoPart {
    pub name: String,
    pub shape: PartShape,
    pub transform: Transform,
    pub color: Color,
}

/// An axis arrow: a group rotated onto the axis, holding a shaft and a tip built along +Y.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub name: String,
    pub direction: Vec3,
    pub rotation: Quat,
    pub shaft: GizmoPart,
    pub tip: GizmoPart,
}

/// The full set of parts for an axis gizmo.
#[derive(Debug, Clone, PartialEq)]
pub struct GizmoLayout {
    /// X, Y and Z arrows, in that order.
    pub axes: [AxisLayout; 3],
    /// Translucent ground (XZ) plane.
    pub plane: GizmoPart,
    /// Color of the plane's outline.
    pub outline_color: Color,
}

impl GizmoLayout {
    pub fn from_settings(settings: &GizmoSettings) -> Self {
        let axes = [
            ("X", Vec3::X, settings.x_color),
            ("Y", Vec3::Y, settings.y_color),
            ("Z", Vec3::Z, settings.z_color),
        ]
        .map(|(name, direction, color)| axis_layout(settings, name, direction, color));

        let plane = GizmoPart {
            name: "XZ_Plane".to_owned(),
            shape: PartShape::Plane(Plane3d::new(
                Vec3::Y,
                Vec2::splat(settings.plane_half_size()),
            )),
            transform: Transform::IDENTITY,
            color: settings.plane_color.with_alpha(settings.plane_alpha),
        };

        Self {
            axes,
            plane,
            outline_color: settings.outline_color(),
        }
    }
}

fn axis_layout(settings: &GizmoSettings, name: &str, direction: Vec3, color: Color) -> AxisLayout {
    let length = settings.axis_length;
    let tip_radius = settings.axis_radius * settings.tip_scale * 0.5;
    let tip_height = settings.axis_radius * settings.tip_scale * 2.0;

    AxisLayout {
        name: format!("{name}_Axis"),
        direction,
        rotation: Quat::from_rotation_arc(Vec3::Y, direction),
        shaft: GizmoPart {
            name: format!("{name}_Shaft"),
            shape: PartShape::Shaft(Cylinder::new(settings.axis_radius, length)),
            transform: Transform::from_xyz(0.0, length * 0.5, 0.0),
            color,
        },
        // Cone meshes are centered on their half height; sit the base on the shaft end
        tip: GizmoPart {
            name: format!("{name}_Tip"),
            shape: PartShape::Tip(Cone {
                radius: tip_radius,
                height: tip_height,
            }),
            transform: Transform::from_xyz(0.0, length + tip_height * 0.5, 0.0),
            color,
        },
    }
}

/// Creates the scene nodes for gizmo parts.
///
/// The mesh-backed implementation is [`MeshPrimitiveFactory`]; tests can
/// substitute a recording fake.
pub trait PrimitiveFactory {
    /// Spawn an empty, named transform node under `parent`.
    fn spawn_group(&mut self, name: &str, transform: Transform, parent: Entity) -> Entity;

    /// Spawn a renderable part under `parent`.
    fn spawn_part(&mut self, part: &GizmoPart, parent: Entity) -> Entity;
}

/// [`PrimitiveFactory`] that spawns unlit meshes through `Commands`.
pub struct MeshPrimitiveFactory<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
}

impl PrimitiveFactory for MeshPrimitiveFactory<'_, '_, '_> {
    fn spawn_group(&mut self, name: &str, transform: Transform, parent: Entity) -> Entity {
        self.commands
            .spawn((
                Name::new(name.to_owned()),
                transform,
                Visibility::default(),
                ChildOf(parent),
            ))
            .id()
    }

    fn spawn_part(&mut self, part: &GizmoPart, parent: Entity) -> Entity {
        let mesh = match part.shape {
            PartShape::Shaft(cylinder) => self.meshes.add(cylinder),
            PartShape::Tip(cone) => self.meshes.add(cone),
            PartShape::Plane(plane) => self.meshes.add(plane),
        };

        let alpha_mode = if part.color.alpha() < 1.0 {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        };
        let material = self.materials.add(StandardMaterial {
            base_color: part.color,
            unlit: true,
            alpha_mode,
            double_sided: true,
            cull_mode: None,
            ..default()
        });

        self.commands
            .spawn((
                Name::new(part.name.clone()),
                Mesh3d(mesh),
                MeshMaterial3d(material),
                part.transform,
                ChildOf(parent),
            ))
            .id()
    }
}

/// Spawn the root node and every part of a gizmo under `owner`.
pub fn build_gizmo_hierarchy<F: PrimitiveFactory + ?Sized>(
    factory: &mut F,
    owner: Entity,
    layout: &GizmoLayout,
) -> GizmoParts {
    let root = factory.spawn_group("CoordinateArrows", Transform::IDENTITY, owner);

    let axes = layout.axes.each_ref().map(|axis| {
        let group = factory.spawn_group(&axis.name, Transform::from_rotation(axis.rotation), root);
        factory.spawn_part(&axis.shaft, group);
        factory.spawn_part(&axis.tip, group);
        group
    });

    let plane = factory.spawn_part(&layout.plane, root);

    GizmoParts { root, axes, plane }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records spawn requests instead of touching a render world.
    struct RecordingFactory {
        world: World,
        spawned: Vec<(String, Entity)>,
    }

    impl RecordingFactory {
        fn new() -> Self {
            Self {
                world: World::new(),
                spawned: Vec::new(),
            }
        }

        fn children_of(&self, parent: Entity) -> Vec<&str> {
            self.spawned
                .iter()
                .filter(|(_, p)| *p == parent)
                .map(|(name, _)| name.as_str())
                .collect()
        }
    }

    impl PrimitiveFactory for RecordingFactory {
        fn spawn_group(&mut self, name: &str, _transform: Transform, parent: Entity) -> Entity {
            self.spawned.push((name.to_owned(), parent));
            self.world.spawn_empty().id()
        }

        fn spawn_part(&mut self, part: &GizmoPart, parent: Entity) -> Entity {
            self.spawned.push((part.name.clone(), parent));
            self.world.spawn_empty().id()
        }
    }

    #[test]
    fn test_layout_axes_are_orthogonal_and_colored() {
        let settings = GizmoSettings::default();
        let layout = GizmoLayout::from_settings(&settings);

        for axis in &layout.axes {
            let pointed = axis.rotation * Vec3::Y;
            assert!((pointed - axis.direction).length() < 1e-5);
        }
        assert!(layout.axes[0].direction.dot(layout.axes[1].direction).abs() < 1e-6);
        assert!(layout.axes[1].direction.dot(layout.axes[2].direction).abs() < 1e-6);
        assert!(layout.axes[0].direction.dot(layout.axes[2].direction).abs() < 1e-6);

        assert_eq!(layout.axes[0].shaft.color, settings.x_color);
        assert_eq!(layout.axes[1].shaft.color, settings.y_color);
        assert_eq!(layout.axes[2].tip.color, settings.z_color);
        assert_ne!(layout.axes[0].shaft.color, layout.axes[1].shaft.color);
    }

    #[test]
    fn test_shaft_spans_axis_length() {
        let settings = GizmoSettings::default();
        let layout = GizmoLayout::from_settings(&settings);
        let axis = &layout.axes[0];

        let PartShape::Shaft(cylinder) = axis.shaft.shape else {
            panic!("shaft should be a cylinder");
        };
        let bottom = axis.shaft.transform.translation.y - cylinder.half_height;
        let top = axis.shaft.transform.translation.y + cylinder.half_height;
        assert!(bottom.abs() < 1e-6);
        assert!((top - settings.axis_length).abs() < 1e-6);

        let PartShape::Tip(cone) = axis.tip.shape else {
            panic!("tip should be a cone");
        };
        let tip_base = axis.tip.transform.translation.y - cone.height * 0.5;
        assert!((tip_base - settings.axis_length).abs() < 1e-6);
    }

    #[test]
    fn test_plane_is_translucent_ground_quad() {
        let settings = GizmoSettings::default();
        let layout = GizmoLayout::from_settings(&settings);

        let PartShape::Plane(plane) = layout.plane.shape else {
            panic!("plane should be a Plane3d");
        };
        assert!((plane.normal.as_vec3() - Vec3::Y).length() < 1e-6);
        assert!((plane.half_size.x - settings.plane_half_size()).abs() < 1e-6);
        assert!((layout.plane.color.alpha() - settings.plane_alpha).abs() < 1e-6);
    }

    #[test]
    fn test_hierarchy_built_under_root() {
        let mut factory = RecordingFactory::new();
        let owner = factory.world.spawn_empty().id();
        let layout = GizmoLayout::from_settings(&GizmoSettings::default());

        let parts = build_gizmo_hierarchy(&mut factory, owner, &layout);

        // Root + 3 axis groups + 2 parts per axis + plane
        assert_eq!(factory.spawned.len(), 1 + 3 + 6 + 1);
        assert_eq!(factory.children_of(owner), vec!["CoordinateArrows"]);
        assert_eq!(
            factory.children_of(parts.root),
            vec!["X_Axis", "Y_Axis", "Z_Axis", "XZ_Plane"]
        );
        assert_eq!(factory.children_of(parts.axes[1]), vec!["Y_Shaft", "Y_Tip"]);
    }
}
