use bevy_ecs::prelude::Component;

/// Surface contact written by the physics backend during its step.
///
/// `landing_speed` is set on the tick a body lands, to the downward speed it
/// had just before the contact, and cleared on the next step.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Walker {
    pub on_surface: bool,
    pub landing_speed: Option<f32>,
}

impl Walker {
    pub fn is_on_surface(&self) -> bool {
        self.on_surface
    }
}
