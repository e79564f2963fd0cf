//! Per-frame keyboard input resource.
//!
//! Captures the keys the player controller cares about and exposes them via
//! the [`InputState`] resource. Movement uses A/D. W and S tilt the camera
//! up and down, and S also lets go of a ledge. Space jumps, or launches off a
//! ledge. E uses a portal and F11 toggles the debug overlay. `=`, `-` and
//! backspace zoom the camera in, out and back to its default distance.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// Boolean key state with an associated keyboard binding.
#[derive(Debug, Clone, Copy)]
pub struct BoolState {
    /// Whether the key is currently held.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,

    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    /// Feed the current key level; edges are derived from the previous one.
    pub fn set(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub up: BoolState,
    pub down: BoolState,
    pub launch: BoolState,
    pub interact: BoolState,
    pub mode_debug: BoolState,
    pub zoom_in: BoolState,
    pub zoom_out: BoolState,
    pub zoom_reset: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            left: BoolState::bound_to(KeyboardKey::KEY_A),
            right: BoolState::bound_to(KeyboardKey::KEY_D),
            up: BoolState::bound_to(KeyboardKey::KEY_W),
            down: BoolState::bound_to(KeyboardKey::KEY_S),
            launch: BoolState::bound_to(KeyboardKey::KEY_SPACE),
            interact: BoolState::bound_to(KeyboardKey::KEY_E),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
            zoom_in: BoolState::bound_to(KeyboardKey::KEY_EQUAL),
            zoom_out: BoolState::bound_to(KeyboardKey::KEY_MINUS),
            zoom_reset: BoolState::bound_to(KeyboardKey::KEY_BACKSPACE),
        }
    }
}

impl InputState {
    /// -1 for left, 1 for right, 0 for neither or both.
    pub fn horizontal_axis(&self) -> f32 {
        match (self.left.active, self.right.active) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn bindings_mut(&mut self) -> [&mut BoolState; 10] {
        [
            &mut self.left,
            &mut self.right,
            &mut self.up,
            &mut self.down,
            &mut self.launch,
            &mut self.interact,
            &mut self.mode_debug,
            &mut self.zoom_in,
            &mut self.zoom_out,
            &mut self.zoom_reset,
        ]
    }
}
