use bevy::prelude::*;

use crate::picking::KnotSelectionEvent;

use super::{
    build_gizmo_hierarchy, AxisGizmo, GizmoLayout, GizmoParts, GizmoSettings,
    MeshPrimitiveFactory,
};

/// System to spawn the parts of newly added gizmos.
///
/// Runs once per gizmo: the inserted [`GizmoParts`] excludes it afterwards.
pub fn build_axis_gizmos(
    mut commands: Commands,
    settings: Res<GizmoSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    new_gizmos: Query<Entity, (With<AxisGizmo>, Without<GizmoParts>)>,
) {
    if new_gizmos.is_empty() {
        return;
    }

    let layout = GizmoLayout::from_settings(&settings);

    for entity in &new_gizmos {
        let mut factory = MeshPrimitiveFactory {
            commands: &mut commands,
            meshes: &mut meshes,
            materials: &mut materials,
        };
        let parts = build_gizmo_hierarchy(&mut factory, entity, &layout);
        commands.entity(entity).insert(parts);
        debug!("Built axis gizmo {entity} with root {}", parts.root);
    }
}

/// System to apply [`AxisGizmo`] state to its root node.
///
/// The requested world position is mapped into the gizmo entity's local
/// space, since the root is its child. Re-runs when the owner's global
/// transform changes so a gizmo that moves keeps its root on target.
pub fn sync_gizmo_root(
    gizmos: Query<
        (&AxisGizmo, &GizmoParts, &GlobalTransform),
        Or<(
            Changed<AxisGizmo>,
            Changed<GlobalTransform>,
            Added<GizmoParts>,
        )>,
    >,
    mut roots: Query<(&mut Transform, &mut Visibility)>,
) {
    for (gizmo, parts, owner) in &gizmos {
        let Ok((mut transform, mut visibility)) = roots.get_mut(parts.root) else {
            continue;
        };

        *visibility = if gizmo.is_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        if let Some(world) = gizmo.position() {
            transform.translation = owner.affine().inverse().transform_point3(world);
        }
    }
}

/// System to show gizmos at the selected knot and hide them when it clears.
pub fn follow_selection(
    mut events: MessageReader<KnotSelectionEvent>,
    mut gizmos: Query<&mut AxisGizmo>,
) {
    for event in events.read() {
        for mut gizmo in &mut gizmos {
            if !gizmo.follow_selection {
                continue;
            }
            match *event {
                KnotSelectionEvent::Picked { position, .. }
                | KnotSelectionEvent::Moved { position, .. } => gizmo.show(position),
                KnotSelectionEvent::Cleared => gizmo.hide(),
            }
        }
    }
}

/// System to outline the ground plane of visible gizmos.
pub fn draw_plane_outline(
    settings: Res<GizmoSettings>,
    axis_gizmos: Query<(&AxisGizmo, &GizmoParts)>,
    planes: Query<(&GlobalTransform, &InheritedVisibility)>,
    mut gizmos: Gizmos,
) {
    if !settings.show_outline {
        return;
    }

    let half = settings.plane_half_size();
    let color = settings.outline_color();
    let corners = [
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, 0.0, -half),
        Vec3::new(half, 0.0, half),
        Vec3::new(-half, 0.0, half),
        Vec3::new(-half, 0.0, -half),
    ];

    for (axis_gizmo, parts) in &axis_gizmos {
        if !axis_gizmo.is_visible() {
            continue;
        }
        let Ok((plane_transform, inherited)) = planes.get(parts.plane) else {
            continue;
        };
        if !inherited.get() {
            continue;
        }

        gizmos.linestrip(
            corners.iter().map(|&c| plane_transform.transform_point(c)),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_gizmo(app: &mut App, owner_translation: Vec3) -> (Entity, Entity) {
        let root = app
            .world_mut()
            .spawn((Transform::default(), Visibility::default()))
            .id();
        let placeholder = app.world_mut().spawn_empty().id();
        let owner = app
            .world_mut()
            .spawn((
                AxisGizmo::default(),
                Transform::from_translation(owner_translation),
                GlobalTransform::from_translation(owner_translation),
                GizmoParts {
                    root,
                    axes: [placeholder; 3],
                    plane: placeholder,
                },
            ))
            .id();
        (owner, root)
    }

    fn root_state(app: &App, root: Entity) -> (Vec3, Visibility) {
        let transform = app.world().get::<Transform>(root).unwrap();
        let visibility = app.world().get::<Visibility>(root).unwrap();
        (transform.translation, *visibility)
    }

    #[test]
    fn test_sync_moves_and_toggles_root() {
        let mut app = App::new();
        app.add_systems(Update, sync_gizmo_root);
        let (owner, root) = spawn_gizmo(&mut app, Vec3::new(1.0, 0.0, 0.0));

        app.update();
        assert_eq!(root_state(&app, root), (Vec3::ZERO, Visibility::Inherited));

        app.world_mut()
            .get_mut::<AxisGizmo>(owner)
            .unwrap()
            .show(Vec3::new(3.0, 2.0, 0.0));
        app.update();
        let (translation, visibility) = root_state(&app, root);
        // Root is the owner's child, so it sits at world - owner
        assert!((translation - Vec3::new(2.0, 2.0, 0.0)).length() < 1e-5);
        assert_eq!(visibility, Visibility::Inherited);

        app.world_mut().get_mut::<AxisGizmo>(owner).unwrap().hide();
        app.update();
        let (translation, visibility) = root_state(&app, root);
        assert!((translation - Vec3::new(2.0, 2.0, 0.0)).length() < 1e-5);
        assert_eq!(visibility, Visibility::Hidden);
    }

    #[test]
    fn test_root_stays_on_target_when_owner_moves() {
        let mut app = App::new();
        app.add_systems(Update, sync_gizmo_root);
        let (owner, root) = spawn_gizmo(&mut app, Vec3::new(1.0, 0.0, 0.0));

        let target = Vec3::new(3.0, 2.0, 0.0);
        app.world_mut().get_mut::<AxisGizmo>(owner).unwrap().show(target);
        app.update();

        // Owner moves after the show, as transform propagation would report it
        *app.world_mut().get_mut::<GlobalTransform>(owner).unwrap() =
            GlobalTransform::from_translation(Vec3::new(2.0, 0.0, 0.0));
        app.update();

        let (translation, _) = root_state(&app, root);
        assert!((translation - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_follow_selection_events() {
        let mut app = App::new();
        app.add_message::<KnotSelectionEvent>()
            .add_systems(Update, follow_selection);

        let follower = app.world_mut().spawn(AxisGizmo::default()).id();
        let manual = app.world_mut().spawn(AxisGizmo::manual()).id();
        let container = app.world_mut().spawn_empty().id();

        let handle = crate::picking::SplineKnotHandle::new(
            container,
            crate::picking::KnotSelection::new(0, 2),
        );
        app.world_mut().write_message(KnotSelectionEvent::Picked {
            handle,
            position: Vec3::new(0.0, 4.0, 0.0),
        });
        app.update();

        let gizmo = app.world().get::<AxisGizmo>(follower).unwrap();
        assert!(gizmo.is_visible());
        assert_eq!(gizmo.position(), Some(Vec3::new(0.0, 4.0, 0.0)));
        assert_eq!(app.world().get::<AxisGizmo>(manual).unwrap().position(), None);

        app.world_mut().write_message(KnotSelectionEvent::Cleared);
        app.update();

        let gizmo = app.world().get::<AxisGizmo>(follower).unwrap();
        assert!(!gizmo.is_visible());
        assert!(app.world().get::<AxisGizmo>(manual).unwrap().is_visible());
    }

    #[test]
    fn test_parts_built_once() {
        let mut app = App::new();
        app.init_resource::<GizmoSettings>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Update, build_axis_gizmos);

        let owner = app.world_mut().spawn(AxisGizmo::default()).id();
        app.update();

        let parts = *app.world().get::<GizmoParts>(owner).unwrap();
        let root_parent = app.world().get::<ChildOf>(parts.root).unwrap().parent();
        assert_eq!(root_parent, owner);

        let named_parts = |app: &mut App| app.world_mut().query::<&Name>().iter(app.world()).count();
        // Root + 3 axis groups + 2 parts per axis + plane
        assert_eq!(named_parts(&mut app), 11);

        app.update();
        assert_eq!(named_parts(&mut app), 11);
        assert_eq!(*app.world().get::<GizmoParts>(owner).unwrap(), parts);
    }
}
