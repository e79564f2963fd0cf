//! Camera system.
//!
//! Runs once per tick after every realm has been processed: reads the look
//! and zoom keys, aims the [`CameraRig`] springs at the [`CameraFocus`] and
//! steps them by the tick's scaled delta.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::resources::camera::{CameraFocus, CameraRig, LOOK_OFFSET};
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Camera distance change per tick while a zoom key is held.
pub const ZOOM_STEP: f32 = 0.5;

/// Zoom, look offset and spring follow.
///
/// # Related
///
/// - [`CameraRig::follow`]
/// - [`CameraRig::extents`] for the rectangle the realm renders
pub fn camera_follow_system(
    input: Res<InputState>,
    time: Res<WorldTime>,
    focus: Res<CameraFocus>,
    positions: Query<&MapPosition>,
    mut camera: ResMut<CameraRig>,
) {
    let look = if input.down.active {
        -LOOK_OFFSET
    } else if input.up.active {
        LOOK_OFFSET
    } else {
        0.0
    };

    if input.zoom_out.active {
        camera.zoom(ZOOM_STEP);
    } else if input.zoom_in.active {
        camera.zoom(-ZOOM_STEP);
    } else if input.zoom_reset.active {
        camera.reset_zoom();
    }

    if let Some(position) = focus.entity.and_then(|e| positions.get(e).ok()) {
        camera.follow(position.pos, look);
    }
    camera.update(time.delta);
}
