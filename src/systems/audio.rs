//! Sound cue queue maintenance.
use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;

use crate::events::audio::SoundCue;

/// Swap the [`SoundCue`] buffers so cues are readable for one more tick and
/// then dropped.
pub fn update_sound_cues(mut cues: ResMut<Messages<SoundCue>>) {
    cues.update();
}
