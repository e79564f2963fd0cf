use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// World-space position of an object's origin.
///
/// World units are metres with +y pointing up; renderers flip the axis when
/// mapping to screen space.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    pub fn from_vec(pos: Vector2) -> Self {
        Self { pos }
    }
}
