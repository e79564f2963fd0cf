//! The player controller.
//!
//! One call to [`process_player`] per tick runs, in order:
//!
//! 1. cooldowns;
//! 2. [`motion`]: run, jump and facing from input;
//! 3. [`grip`]: grab, hang from, launch off or drop a ledge;
//! 4. [`damage`]: fall damage from the last landing and the kill plane;
//! 5. [`animation`]: the three state machines and skeleton playback;
//! 6. [`sound`]: footstep cues sampled from the legs' run playhead.
//!
//! Physics runs after every object has been processed, so all of this reads
//! the contact state the previous step left in [`Walker`].
//!
//! Ledges are looked up by scanning the realm's live list each tick; the
//! player's [`LedgeLink`](crate::components::player::LedgeLink) is only kept
//! while the linked ledge is still found there.

pub mod animation;
pub mod assets;
pub mod damage;
pub mod grip;
pub mod motion;
pub mod sound;

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{PLAYER_HALF_HEIGHT, PLAYER_HALF_WIDTH, Player, PlayerTuning};
use crate::components::rigidbody::RigidBody;
use crate::components::skeleton::Skeleton;
use crate::components::walker::Walker;
use crate::events::audio::SoundCue;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::systems::objects::RealmContext;

use self::assets::PlayerAssets;

pub const DEFAULT_GRAVITY: f32 = 20.0;

pub fn initialize_player(world: &mut World, entity: Entity) {
    let (tuning, gravity) = world
        .get_resource::<GameConfig>()
        .map(|config| (config.player, config.gravity))
        .unwrap_or((PlayerTuning::default(), DEFAULT_GRAVITY));

    let mut body = RigidBody::dynamic(1.0);
    body.add_force("gravity", Vector2::new(0.0, -gravity));

    world.entity_mut(entity).insert((
        Player::new(tuning),
        body,
        BoxCollider::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT),
        Walker::default(),
        Skeleton::default(),
    ));
}

pub fn process_player(
    world: &mut World,
    assets: &PlayerAssets,
    ctx: &RealmContext,
    entity: Entity,
    dt: f32,
) {
    let ledges = grip::gather_ledges(world, ctx);
    let input = world
        .get_resource::<InputState>()
        .cloned()
        .unwrap_or_default();
    let mut cues = Vec::new();

    {
        let mut query = world.query::<(
            &mut Player,
            &mut RigidBody,
            &mut MapPosition,
            &mut Skeleton,
            &Walker,
        )>();
        let Ok((mut player, mut body, mut position, mut skeleton, walker)) =
            query.get_mut(world, entity)
        else {
            return;
        };
        let walker = *walker;

        player.grip_cooldown.update(dt);
        player.movement_cooldown.update(dt);
        player.hurt_cooldown.update(dt);

        motion::update_motion(&mut player, &mut body, &walker, &input, dt);
        grip::update_grip(
            &mut player,
            &mut body,
            &mut position.pos,
            &walker,
            &input,
            &ledges,
        );
        damage::process_impact_damage(&mut player, &walker, assets, &mut cues);
        damage::check_kill_plane(&mut player, position.pos, ctx.kill_plane);

        let velocity = body.velocity;
        animation::update_animation(
            &mut player,
            &mut skeleton,
            velocity,
            &walker,
            assets,
            dt * 60.0,
        );
        sound::update_sound_effects(&mut player, &skeleton, &walker, assets, &mut cues);
    }

    if !cues.is_empty()
        && let Some(mut messages) = world.get_resource_mut::<Messages<SoundCue>>()
    {
        for cue in cues {
            messages.write(cue);
        }
    }
}

/// Dead and finished dying. See [`damage::is_dead`].
pub fn is_player_dead(world: &World, entity: Entity) -> bool {
    match (world.get::<Player>(entity), world.get::<Skeleton>(entity)) {
        (Some(player), Some(skeleton)) => damage::is_dead(player, skeleton),
        _ => false,
    }
}
