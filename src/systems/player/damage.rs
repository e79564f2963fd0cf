//! Health, fall damage and death.

use log::{debug, info};
use raylib::prelude::Vector2;

use crate::components::player::Player;
use crate::components::skeleton::Skeleton;
use crate::components::walker::Walker;
use crate::events::audio::SoundCue;
use crate::fsm::ArmsState;
use crate::systems::player::assets::PlayerAssets;

/// Subtract `amount` from health and start the hurt window. Reaching zero
/// kills the player. Dead players take no further damage.
pub fn take_damage(player: &mut Player, amount: f32) {
    if !player.alive || amount <= 0.0 {
        return;
    }
    player.health = (player.health - amount).max(0.0);
    player.hurt_cooldown.trigger();
    debug!("Player took {:.1} damage, {:.1} left", amount, player.health);
    if player.health <= 0.0 {
        player.alive = false;
        info!("Player died");
    }
}

/// Damage from the landing reported by the last physics step, if it was hard
/// enough.
pub fn process_impact_damage(
    player: &mut Player,
    walker: &Walker,
    assets: &PlayerAssets,
    cues: &mut Vec<SoundCue>,
) {
    let Some(speed) = walker.landing_speed else {
        return;
    };
    let tuning = player.tuning;
    if speed <= tuning.fall_damage_threshold || !player.alive {
        return;
    }
    let damage = (speed - tuning.fall_damage_threshold) * tuning.fall_damage_multiplier;
    take_damage(player, damage);
    cues.push(
        SoundCue::new(assets.damage_impact.name.clone()).with_volume((damage / 50.0).min(1.0)),
    );
}

pub fn check_kill_plane(player: &mut Player, position: Vector2, kill_plane: f32) {
    if player.fell_out || position.y >= kill_plane {
        return;
    }
    player.fell_out = true;
    let remaining = player.health;
    take_damage(player, remaining);
}

/// Dead and done: the dying animation finished or the body fell out of the
/// world.
pub fn is_dead(player: &Player, skeleton: &Skeleton) -> bool {
    if player.alive {
        return false;
    }
    player.fell_out || (player.arms_state == ArmsState::Dying && skeleton.arms.is_complete())
}
