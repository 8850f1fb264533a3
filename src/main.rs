//! Example knot picking application.
//!
//! Run with: `cargo run`

use bevy::prelude::*;
use bevy_knot_picker::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(SplinePlugin)
        .add_plugins(KnotPickerPlugin)
        .add_plugins(AxisGizmoPlugin)
        .add_plugins(SplineDrawPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (show_help, handle_hotkeys))
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(5.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 500.0,
        ..default()
    });

    // Two splines sharing one container transform
    commands.spawn((
        SplineContainer::new(vec![
            Spline::from_points([
                Vec3::new(-4.0, 0.0, 0.0),
                Vec3::new(-2.0, 2.0, 1.0),
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(2.0, 1.5, 0.5),
                Vec3::new(4.0, 0.0, 0.0),
            ]),
            Spline::from_points([
                Vec3::new(-3.0, 0.0, 3.0),
                Vec3::new(0.0, 1.0, 4.0),
                Vec3::new(3.0, 0.0, 3.0),
            ])
            .with_closed(true),
        ]),
        Transform::from_xyz(0.0, 0.5, 0.0).with_rotation(Quat::from_rotation_y(0.3)),
    ));

    commands.spawn(AxisGizmo::default());
}

fn handle_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut pick_settings: ResMut<PickSettings>,
    mut draw_settings: ResMut<DrawSettings>,
    mut gizmos: Query<&mut AxisGizmo>,
) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        pick_settings.toggle();
        info!("Picking {}", if pick_settings.enabled { "enabled" } else { "disabled" });
    }

    if keyboard.just_pressed(KeyCode::KeyD) {
        draw_settings.toggle();
    }

    if keyboard.just_pressed(KeyCode::KeyO) {
        for mut gizmo in &mut gizmos {
            gizmo.show_at_origin();
        }
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        for mut gizmo in &mut gizmos {
            gizmo.hide();
        }
    }
}

fn show_help(keyboard: Res<ButtonInput<KeyCode>>, mut shown: Local<bool>) {
    if !keyboard.just_pressed(KeyCode::KeyH) {
        return;
    }
    *shown = !*shown;

    if *shown {
        println!("\n=== Knot Picker Help ===");
        println!("  H          - Toggle this help");
        println!("  LMB        - Pick nearest knot (click empty space to clear)");
        println!("  LMB + drag - Move picked knot");
        println!("  Mouse back - Lift picked knot");
        println!("  P          - Toggle picking");
        println!("  D          - Toggle spline drawing");
        println!("  O          - Show gizmo at origin");
        println!("  Escape     - Hide gizmo");
        println!("========================\n");
    }
}
