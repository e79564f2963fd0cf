//! Sound cues emitted by gameplay.
//!
//! Gameplay never plays audio itself. It writes [`SoundCue`] messages into
//! the ECS `Messages<SoundCue>` mailbox; whatever owns an audio device (or a
//! test) drains them once per frame.

use std::sync::Arc;

use bevy_ecs::message::Message;

#[derive(Message, Debug, Clone, PartialEq)]
pub struct SoundCue {
    /// Clip name in the [`AssetRegistry`](crate::resources::assetregistry::AssetRegistry).
    pub clip: Arc<str>,
    pub volume: f32,
}

impl SoundCue {
    pub fn new(clip: Arc<str>) -> Self {
        Self { clip, volume: 1.0 }
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }
}
