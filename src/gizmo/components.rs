use bevy::prelude::*;

/// A coordinate-axis gizmo: three axis arrows and a ground plane.
///
/// The arrows are built once under a root child of this entity (see
/// [`GizmoParts`]). `show` and `hide` only update this component; the root's
/// `Transform` and `Visibility` follow on the next sync.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component, Default)]
#[require(Transform, Visibility)]
pub struct AxisGizmo {
    /// Requested world position of the root; `None` until the first `show`.
    world_position: Option<Vec3>,
    visible: bool,
    /// Whether the gizmo jumps to the selected knot and hides when the selection clears.
    pub follow_selection: bool,
}

impl Default for AxisGizmo {
    fn default() -> Self {
        Self {
            world_position: None,
            visible: true,
            follow_selection: true,
        }
    }
}

impl AxisGizmo {
    /// A gizmo that ignores knot selection and is only moved explicitly.
    pub fn manual() -> Self {
        Self {
            follow_selection: false,
            ..default()
        }
    }

    /// Show the gizmo at a world position.
    pub fn show(&mut self, world_position: Vec3) {
        self.world_position = Some(world_position);
        self.visible = true;
    }

    /// Show the gizmo at the world origin.
    pub fn show_at_origin(&mut self) {
        self.show(Vec3::ZERO);
    }

    /// Hide the gizmo, keeping its position.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The last position passed to `show`, if any.
    pub fn position(&self) -> Option<Vec3> {
        self.world_position
    }
}

/// Entities making up a built [`AxisGizmo`].
///
/// Inserted on the gizmo entity once its parts have been spawned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GizmoParts {
    /// Root node; its visibility and position are what `show`/`hide` control.
    pub root: Entity,
    /// X, Y and Z axis groups.
    pub axes: [Entity; 3],
    /// Ground plane quad.
    pub plane: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_visible_without_position() {
        let gizmo = AxisGizmo::default();
        assert!(gizmo.is_visible());
        assert_eq!(gizmo.position(), None);
    }

    #[test]
    fn test_show_after_hide() {
        let mut gizmo = AxisGizmo::default();
        gizmo.hide();
        gizmo.show(Vec3::new(1.0, 2.0, 3.0));
        assert!(gizmo.is_visible());
        assert_eq!(gizmo.position(), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_hide_after_show_keeps_position() {
        let mut gizmo = AxisGizmo::default();
        gizmo.show(Vec3::new(4.0, 0.0, -1.0));
        gizmo.hide();
        assert!(!gizmo.is_visible());
        assert_eq!(gizmo.position(), Some(Vec3::new(4.0, 0.0, -1.0)));

        // Hiding twice is the same as hiding once
        gizmo.hide();
        assert!(!gizmo.is_visible());
    }

    #[test]
    fn test_show_without_position_uses_origin() {
        let mut gizmo = AxisGizmo::default();
        gizmo.show(Vec3::ONE);
        gizmo.show_at_origin();
        assert_eq!(gizmo.position(), Some(Vec3::ZERO));
        assert!(gizmo.is_visible());
    }
}
