use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// A grabbable edge. The grasp point is where the player's hands lock.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Ledge {
    /// Grasp point relative to the ledge's position.
    pub grasp_offset: Vector2,
}

impl Ledge {
    pub fn new() -> Self {
        Self {
            grasp_offset: Vector2::zero(),
        }
    }

    pub fn grasp_point(&self, position: Vector2) -> Vector2 {
        position + self.grasp_offset
    }
}

impl Default for Ledge {
    fn default() -> Self {
        Self::new()
    }
}
