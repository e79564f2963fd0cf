//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - [`apply_key_levels`] does the same from any key source; headless runs
//!   and tests feed it scripted key levels.
//! - Pressing the debug key triggers
//!   [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(world: &mut World, rl: &RaylibHandle) {
    apply_key_levels(world, |key| rl.is_key_down(key));
}

/// Feed the current level of every bound key into `InputState`, deriving the
/// press/release edges from the previous frame.
pub fn apply_key_levels(world: &mut World, is_key_down: impl Fn(KeyboardKey) -> bool) {
    let toggle_debug = {
        let Some(mut input) = world.get_resource_mut::<InputState>() else {
            return;
        };
        for binding in input.bindings_mut() {
            let down = is_key_down(binding.key_binding);
            binding.set(down);
        }
        input.mode_debug.just_pressed
    };

    if toggle_debug {
        world.trigger(SwitchDebugEvent {});
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::switchdebug::switch_debug_observer;
    use crate::resources::debugmode::DebugMode;

    #[test]
    fn key_levels_produce_edges() {
        let mut world = World::new();
        world.insert_resource(InputState::default());

        apply_key_levels(&mut world, |key| key == KeyboardKey::KEY_D);
        let input = world.resource::<InputState>();
        assert!(input.right.active && input.right.just_pressed);
        assert_eq!(input.horizontal_axis(), 1.0);

        apply_key_levels(&mut world, |key| key == KeyboardKey::KEY_D);
        assert!(!world.resource::<InputState>().right.just_pressed);

        apply_key_levels(&mut world, |_| false);
        assert!(world.resource::<InputState>().right.just_released);
    }

    #[test]
    fn debug_key_toggles_overlay_once_per_press() {
        let mut world = World::new();
        world.insert_resource(InputState::default());
        world.add_observer(switch_debug_observer);
        world.flush();

        let f11 = |key: KeyboardKey| key == KeyboardKey::KEY_F11;
        apply_key_levels(&mut world, f11);
        world.flush();
        assert!(world.contains_resource::<DebugMode>());

        apply_key_levels(&mut world, f11);
        world.flush();
        assert!(world.contains_resource::<DebugMode>());
    }
}
