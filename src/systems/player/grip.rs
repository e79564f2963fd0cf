//! Ledge grabbing.
//!
//! While airborne and falling the player grabs the nearest ledge whose grasp
//! point is within reach of its hands. A hanging player is pinned to the
//! ledge until it lets go, launches off, dies, or the ledge stops being a
//! valid target (destroyed, flagged for deletion or moved to another realm).
//!
//! Pressing launch while hanging arms the launch so the arms can start
//! their launch action; the player leaves the ledge on the following tick
//! whatever the input is then.

use bevy_ecs::prelude::*;
use log::{debug, trace};
use raylib::prelude::Vector2;

use crate::components::gameobject::GameObject;
use crate::components::ledge::Ledge;
use crate::components::mapposition::MapPosition;
use crate::components::player::{LedgeLink, Player};
use crate::components::rigidbody::RigidBody;
use crate::components::walker::Walker;
use crate::resources::input::InputState;
use crate::systems::objects::RealmContext;

/// Ledges closer than this multiple of the grasp distance make the arms
/// reach out before the grab happens.
pub const GRASP_READY_FACTOR: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgeCandidate {
    pub entity: Entity,
    pub grasp_point: Vector2,
}

/// Live ledges of the processing realm, in live-list order.
pub fn gather_ledges(world: &World, ctx: &RealmContext) -> Vec<LedgeCandidate> {
    ctx.objects
        .iter()
        .filter_map(|&entity| {
            let object = world.get::<GameObject>(entity)?;
            if object.deletion_flag() || object.realm() != Some(ctx.id) {
                return None;
            }
            let ledge = world.get::<Ledge>(entity)?;
            let position = world.get::<MapPosition>(entity)?;
            Some(LedgeCandidate {
                entity,
                grasp_point: ledge.grasp_point(position.pos),
            })
        })
        .collect()
}

fn distance(a: Vector2, b: Vector2) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Nearest ledge within `max_distance` of `hands`. On equal distance the
/// ledge scanned first wins.
pub fn find_grip(
    hands: Vector2,
    ledges: &[LedgeCandidate],
    max_distance: f32,
) -> Option<LedgeCandidate> {
    let mut best: Option<(f32, LedgeCandidate)> = None;
    for ledge in ledges {
        let d = distance(hands, ledge.grasp_point);
        if d > max_distance {
            continue;
        }
        if best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, *ledge));
        }
    }
    best.map(|(_, ledge)| ledge)
}

fn snap_to_ledge(player: &Player, position: &mut Vector2, grasp_point: Vector2) {
    *position = grasp_point - player.grip_location_local();
}

/// Grab the nearest ledge in reach. Records why on failure.
pub fn attempt_grip(
    player: &mut Player,
    body: &mut RigidBody,
    position: &mut Vector2,
    ledges: &[LedgeCandidate],
) -> bool {
    if !player.grip_cooldown.ready() {
        player.last_miss_reason = "grip cooldown".to_string();
        return false;
    }
    if !player.grasp_ready {
        player.last_miss_reason = "not ready to grasp".to_string();
        return false;
    }
    let reach = player.tuning.ledge_grasp_distance;
    let hands = player.grip_location_world(*position);
    let Some(ledge) = find_grip(hands, ledges, reach) else {
        player.last_miss_reason = format!("no ledge within {}", reach);
        trace!("Grip missed: {}", player.last_miss_reason);
        return false;
    };

    player.grip = Some(LedgeLink {
        ledge: ledge.entity,
    });
    player.last_miss_reason.clear();
    body.freeze();
    snap_to_ledge(player, position, ledge.grasp_point);
    debug!("Player grabbed ledge {:?}", ledge.entity);
    true
}

pub fn release_grip(player: &mut Player, body: &mut RigidBody) {
    if player.grip.take().is_some() {
        body.unfreeze();
        player.grip_cooldown.trigger();
    }
}

pub fn update_grip(
    player: &mut Player,
    body: &mut RigidBody,
    position: &mut Vector2,
    walker: &Walker,
    input: &InputState,
    ledges: &[LedgeCandidate],
) {
    if let Some(link) = player.grip {
        let Some(ledge) = ledges.iter().find(|l| l.entity == link.ledge) else {
            debug!("Ledge {:?} is gone; letting go", link.ledge);
            release_grip(player, body);
            return;
        };
        if !player.alive || input.down.just_pressed {
            release_grip(player, body);
            return;
        }
        if player.launching {
            release_grip(player, body);
            body.velocity = Vector2::new(0.0, player.tuning.launch_speed);
            return;
        }
        if input.launch.just_pressed {
            player.launching = true;
        }
        player.grasp_ready = false;
        snap_to_ledge(player, position, ledge.grasp_point);
        body.velocity = Vector2::zero();
        return;
    }

    let reach = player.tuning.ledge_grasp_distance * GRASP_READY_FACTOR;
    let hands = player.grip_location_world(*position);
    player.grasp_ready = player.alive
        && !walker.on_surface
        && player.grip_cooldown.ready()
        && find_grip(hands, ledges, reach).is_some();

    if player.grasp_ready && body.velocity.y <= 0.0 {
        attempt_grip(player, body, position, ledges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledge(world: &mut World, x: f32, y: f32) -> LedgeCandidate {
        LedgeCandidate {
            entity: world.spawn_empty().id(),
            grasp_point: Vector2::new(x, y),
        }
    }

    #[test]
    fn find_grip_picks_nearest_in_range() {
        let mut world = World::new();
        let far = ledge(&mut world, 0.0, 0.7);
        let near = ledge(&mut world, 0.0, 0.3);
        let out = ledge(&mut world, 5.0, 0.0);
        let found = find_grip(Vector2::zero(), &[far, near, out], 0.8);
        assert_eq!(found.map(|l| l.entity), Some(near.entity));
    }

    #[test]
    fn find_grip_tie_keeps_first_scanned() {
        let mut world = World::new();
        let left = ledge(&mut world, -0.5, 0.0);
        let right = ledge(&mut world, 0.5, 0.0);
        let found = find_grip(Vector2::zero(), &[left, right], 0.8);
        assert_eq!(found.map(|l| l.entity), Some(left.entity));
        let found = find_grip(Vector2::zero(), &[right, left], 0.8);
        assert_eq!(found.map(|l| l.entity), Some(right.entity));
    }

    #[test]
    fn find_grip_none_out_of_range() {
        let mut world = World::new();
        let a = ledge(&mut world, 2.0, 2.0);
        assert!(find_grip(Vector2::zero(), &[a], 0.8).is_none());
        assert!(find_grip(Vector2::zero(), &[], 0.8).is_none());
    }

    #[test]
    fn attempt_grip_is_gated_by_cooldown() {
        let mut world = World::new();
        let mut player = Player::default();
        let mut body = RigidBody::dynamic(1.0);
        let target = ledge(&mut world, 0.0, 1.2);
        let mut position = Vector2::zero();
        player.grasp_ready = true;
        player.grip_cooldown.trigger();

        assert!(!attempt_grip(&mut player, &mut body, &mut position, &[target]));
        assert_eq!(player.last_miss_reason, "grip cooldown");

        player.grip_cooldown.finish();
        assert!(attempt_grip(&mut player, &mut body, &mut position, &[target]));
        assert_eq!(player.grip, Some(LedgeLink { ledge: target.entity }));
        assert!(body.frozen);
        assert_eq!(player.grip_location_world(position), target.grasp_point);
    }

    #[test]
    fn falling_near_a_ledge_grabs_it() {
        let mut world = World::new();
        let mut player = Player::default();
        let mut body = RigidBody::dynamic(1.0);
        body.velocity.y = -3.0;
        let target = ledge(&mut world, 0.2, 1.5);
        let mut position = Vector2::zero();

        update_grip(
            &mut player,
            &mut body,
            &mut position,
            &Walker::default(),
            &InputState::default(),
            &[target],
        );
        assert!(player.is_hanging());
    }

    #[test]
    fn missing_ledge_releases_grip() {
        let mut world = World::new();
        let mut player = Player::default();
        let mut body = RigidBody::dynamic(1.0);
        let gone = world.spawn_empty().id();
        player.grip = Some(LedgeLink { ledge: gone });
        body.freeze();
        let mut position = Vector2::zero();

        update_grip(
            &mut player,
            &mut body,
            &mut position,
            &Walker::default(),
            &InputState::default(),
            &[],
        );
        assert!(!player.is_hanging());
        assert!(!body.frozen);
        assert!(!player.grip_cooldown.ready());
    }

    #[test]
    fn launch_arms_then_releases_on_the_next_tick() {
        let mut world = World::new();
        let mut player = Player::default();
        let mut body = RigidBody::dynamic(1.0);
        let target = ledge(&mut world, 0.0, 1.0);
        player.grip = Some(LedgeLink { ledge: target.entity });
        let mut position = Vector2::zero();
        let mut input = InputState::default();
        input.launch.set(true);

        update_grip(&mut player, &mut body, &mut position, &Walker::default(), &input, &[target]);
        assert!(player.launching);
        assert!(player.is_hanging());

        input.launch.set(false);
        update_grip(&mut player, &mut body, &mut position, &Walker::default(), &input, &[target]);
        assert!(!player.is_hanging());
        assert_eq!(body.velocity.y, player.tuning.launch_speed);
    }
}
