//! Run, jump and facing.

use crate::components::player::{Direction, Player};
use crate::components::rigidbody::RigidBody;
use crate::components::walker::Walker;
use crate::resources::input::InputState;

fn approach(current: f32, target: f32, step: f32) -> f32 {
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

/// Steer the body from input. Hanging bodies are pinned by the grip logic
/// and left alone; dead bodies only slow down.
pub fn update_motion(
    player: &mut Player,
    body: &mut RigidBody,
    walker: &Walker,
    input: &InputState,
    dt: f32,
) {
    if player.is_hanging() {
        return;
    }
    let tuning = player.tuning;
    let accel = if walker.on_surface {
        tuning.acceleration
    } else {
        tuning.air_acceleration
    };

    if !player.alive {
        body.velocity.x = approach(body.velocity.x, 0.0, accel * dt);
        return;
    }

    let axis = input.horizontal_axis();
    body.velocity.x = approach(body.velocity.x, axis * tuning.run_speed, accel * dt);

    if axis != 0.0 {
        let desired = if axis > 0.0 {
            Direction::Forward
        } else {
            Direction::Back
        };
        if desired != player.next_direction && player.movement_cooldown.ready() {
            player.next_direction = desired;
            player.movement_cooldown.trigger();
        }
    }

    if walker.on_surface && input.launch.just_pressed {
        body.velocity.y = tuning.jump_speed;
    }

    body.velocity.y = body.velocity.y.max(-tuning.terminal_fall_velocity);
}
