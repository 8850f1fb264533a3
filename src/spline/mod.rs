mod components;
mod storage;
mod types;

pub use components::*;
pub use storage::KnotStorage;
pub use types::*;

use bevy::prelude::*;

/// Plugin that registers spline types for reflection/serialization.
/// This plugin does NOT include picking - use `KnotPickerPlugin` for that.
pub struct SplinePlugin;

impl Plugin for SplinePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TangentMode>()
            .register_type::<BezierKnot>()
            .register_type::<Spline>()
            .register_type::<SplineContainer>();
    }
}
