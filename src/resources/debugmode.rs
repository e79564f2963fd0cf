//! Debug overlay toggle.
//!
//! The mere presence of this resource turns on the debug overlay (position,
//! FPS and realm object counts) and collider boxes. Remove it to hide them.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the game draws its debug overlay.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
