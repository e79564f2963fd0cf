//! Drive the skeleton from the three state machines.
//!
//! Each tick the legs, arms and rotation machines pick a transition from the
//! player's current state, and [`apply_transition`] turns it into channel
//! operations: a new action starts immediately (dropping whatever was queued
//! behind the old one), while staying in the same action only tops up the
//! queue.
//!
//! The legs' run loop is the exception to plain playback: its playhead is
//! slaved to [`Player::run_cycle`] so cadence follows horizontal speed, and
//! footstep cues sampling it stay on the visible foot contacts.

use log::trace;
use raylib::prelude::Vector2;

use crate::components::player::Player;
use crate::components::skeleton::{ActionSettings, AnimationChannel, Skeleton};
use crate::components::walker::Walker;
use crate::fsm::{
    AnimState, ArmsState, FsmInputs, LegsState, MOVING_THRESHOLD, RotationInputs, Transition,
    arms_next_state, legs_next_state, rotation_next_state,
};
use crate::resources::assetregistry::ActionBinding;
use crate::systems::player::assets::PlayerAssets;

pub fn apply_transition<'a, S: AnimState>(
    channel: &mut AnimationChannel,
    transition: &Transition<S>,
    resolve: impl Fn(S) -> Option<&'a ActionBinding>,
) {
    let Some(next) = resolve(transition.next) else {
        return;
    };
    if channel.current_action() != Some(next.id) {
        channel.add_segment(
            next,
            ActionSettings {
                fade_in: transition.next_fade,
                speed: transition.speed,
                clip_start: transition.next_clip,
            },
        );
        channel.clear_queue();
    } else if !channel.has_queued_segments()
        && transition.has_queued()
        && let Some(queued) = resolve(transition.queued)
    {
        channel.queue_segment(
            queued,
            ActionSettings {
                fade_in: transition.queued_fade,
                speed: 1.0,
                clip_start: transition.queued_clip,
            },
        );
    }
}

/// Whether the action of the state a track is in has finished. A channel
/// that already moved on to a queued follow-up counts as finished.
pub fn state_action_complete(channel: &AnimationChannel, action: Option<&ActionBinding>) -> bool {
    match action {
        Some(action) if channel.current_action() == Some(action.id) => channel.is_complete(),
        Some(_) => true,
        None => channel.is_complete(),
    }
}

pub fn fsm_inputs(player: &Player, velocity: Vector2, walker: &Walker) -> FsmInputs {
    FsmInputs {
        on_surface: walker.on_surface,
        is_hurt: player.is_hurt(),
        is_hanging: player.is_hanging(),
        is_grasp_ready: player.grasp_ready,
        is_launching: player.launching,
        is_action_complete: false,
        horizontal_velocity: velocity.x,
        vertical_velocity: velocity.y,
        fast_fall_speed: player.tuning.fast_fall_velocity,
        is_alive: player.alive,
    }
}

/// Step all three machines, apply their transitions and advance playback by
/// `frames`.
pub fn update_animation(
    player: &mut Player,
    skeleton: &mut Skeleton,
    velocity: Vector2,
    walker: &Walker,
    assets: &PlayerAssets,
    frames: f32,
) {
    let base = fsm_inputs(player, velocity, walker);

    let legs_inputs = FsmInputs {
        is_action_complete: state_action_complete(
            &skeleton.legs,
            assets.legs_action(player.legs_state),
        ),
        ..base
    };
    let legs = legs_next_state(player.legs_state, &legs_inputs);
    apply_transition(&mut skeleton.legs, &legs, |s| assets.legs_action(s));
    let entered_run = legs.next == LegsState::Running && player.legs_state != LegsState::Running;
    if legs.next != player.legs_state {
        trace!("Legs {:?} -> {:?}", player.legs_state, legs.next);
    }
    player.legs_state = legs.next;

    let arms_inputs = FsmInputs {
        is_action_complete: state_action_complete(
            &skeleton.arms,
            assets.arms_action(player.arms_state),
        ),
        ..base
    };
    let arms = arms_next_state(player.arms_state, &arms_inputs);
    apply_transition(&mut skeleton.arms, &arms, |s| assets.arms_action(s));
    if arms.next != player.arms_state {
        trace!("Arms {:?} -> {:?}", player.arms_state, arms.next);
    }
    player.arms_state = arms.next;

    let rotation_inputs = RotationInputs {
        facing: player.direction,
        desired: player.next_direction,
        is_action_complete: state_action_complete(
            &skeleton.rotation,
            assets.rotation_action(player.rotation_state),
        ),
    };
    let rotation = rotation_next_state(player.rotation_state, &rotation_inputs);
    apply_transition(&mut skeleton.rotation, &rotation, |s| {
        assets.rotation_action(s)
    });
    player.rotation_state = rotation.next;
    if let Some(direction) = rotation.next.settled_direction() {
        player.direction = direction;
    }

    if player.launching && player.arms_state != ArmsState::Launching && !player.is_hanging() {
        player.launching = false;
    }

    skeleton.update(frames);
    drive_run_cycle(player, &mut skeleton.legs, velocity.x, assets, frames, entered_run);
}

/// Advance the run loop clock and move the legs' run playhead to its phase.
/// The period is the run action's length at full run speed and stretches as
/// the player slows down.
fn drive_run_cycle(
    player: &mut Player,
    legs: &mut AnimationChannel,
    horizontal_speed: f32,
    assets: &PlayerAssets,
    frames: f32,
    entered: bool,
) {
    let run = &assets.legs_run;
    if player.legs_state != LegsState::Running
        || legs.current_action() != Some(run.id)
        || run.length <= 0.0
    {
        return;
    }
    if entered {
        player.run_cycle.reset();
    }
    let speed = horizontal_speed.abs().max(MOVING_THRESHOLD);
    player
        .run_cycle
        .adjust_period(run.length * player.tuning.run_speed / speed);
    player.run_cycle.update(frames);
    legs.set_playhead(player.run_cycle.get() * run.length);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::player::Direction;
    use crate::fsm::{LegsState, RotationState};
    use crate::resources::assetregistry::AssetRegistry;

    fn assets() -> PlayerAssets {
        PlayerAssets::configure(&AssetRegistry::with_defaults()).expect("defaults")
    }

    fn grounded() -> Walker {
        Walker {
            on_surface: true,
            landing_speed: None,
        }
    }

    #[test]
    fn first_tick_settles_into_idle_facing_forward() {
        let assets = assets();
        let mut player = Player::default();
        let mut skeleton = Skeleton::default();
        update_animation(&mut player, &mut skeleton, Vector2::zero(), &grounded(), &assets, 1.0);

        assert_eq!(player.legs_state, LegsState::Idle);
        assert_eq!(player.arms_state, ArmsState::Idle);
        assert_eq!(player.rotation_state, RotationState::Forward);
        assert_eq!(skeleton.legs.current_action(), Some(assets.legs_idle.id));
        assert_eq!(skeleton.arms.current_action(), Some(assets.arms_idle.id));
    }

    #[test]
    fn running_switches_action_and_drops_stale_queue() {
        let assets = assets();
        let mut player = Player::default();
        let mut skeleton = Skeleton::default();
        update_animation(&mut player, &mut skeleton, Vector2::zero(), &grounded(), &assets, 1.0);
        update_animation(&mut player, &mut skeleton, Vector2::zero(), &grounded(), &assets, 1.0);
        assert!(skeleton.legs.has_queued_segments());

        let running = Vector2::new(5.0, 0.0);
        update_animation(&mut player, &mut skeleton, running, &grounded(), &assets, 1.0);
        assert_eq!(player.legs_state, LegsState::Running);
        assert_eq!(skeleton.legs.current_action(), Some(assets.legs_run.id));
        assert!(!skeleton.legs.has_queued_segments());
    }

    #[test]
    fn same_action_only_tops_up_the_queue() {
        let assets = assets();
        let mut channel = AnimationChannel::new();
        let hold = Transition::stay(LegsState::Idle).then(LegsState::Idle, 0.0, 0.0);
        let resolve = |s| assets.legs_action(s);

        channel.add_segment(&assets.legs_idle, ActionSettings::default());
        apply_transition(&mut channel, &hold, resolve);
        assert_eq!(channel.queue_len(), 1);
        apply_transition(&mut channel, &hold, resolve);
        assert_eq!(channel.queue_len(), 1);
    }

    #[test]
    fn turning_completes_and_flips_facing() {
        let assets = assets();
        let mut player = Player::default();
        let mut skeleton = Skeleton::default();
        update_animation(&mut player, &mut skeleton, Vector2::zero(), &grounded(), &assets, 1.0);

        player.next_direction = Direction::Back;
        update_animation(&mut player, &mut skeleton, Vector2::zero(), &grounded(), &assets, 1.0);
        assert_eq!(player.rotation_state, RotationState::TurningBack);
        assert_eq!(player.direction, Direction::Forward);

        for _ in 0..30 {
            update_animation(&mut player, &mut skeleton, Vector2::zero(), &grounded(), &assets, 1.0);
        }
        assert_eq!(player.rotation_state, RotationState::Back);
        assert_eq!(player.direction, Direction::Back);
    }

    #[test]
    fn half_speed_run_plays_the_legs_at_half_rate() {
        let assets = assets();
        let mut player = Player::default();
        let mut skeleton = Skeleton::default();
        update_animation(&mut player, &mut skeleton, Vector2::zero(), &grounded(), &assets, 1.0);

        let half = Vector2::new(player.tuning.run_speed * 0.5, 0.0);
        for _ in 0..20 {
            update_animation(&mut player, &mut skeleton, half, &grounded(), &assets, 1.0);
        }
        assert_eq!(player.legs_state, LegsState::Running);
        assert_eq!(skeleton.legs.current_action(), Some(assets.legs_run.id));
        // 20 frames into an 80 frame loop over a 40 frame action.
        let expected = 20.0 / 80.0 * assets.legs_run.length;
        assert!((skeleton.legs.playhead() - expected).abs() < 1e-3);
        assert!((player.run_cycle.period() - 80.0).abs() < 1e-3);
    }

    #[test]
    fn death_on_the_ground_plays_dying() {
        let assets = assets();
        let mut player = Player::default();
        let mut skeleton = Skeleton::default();
        update_animation(&mut player, &mut skeleton, Vector2::zero(), &grounded(), &assets, 1.0);

        player.alive = false;
        update_animation(&mut player, &mut skeleton, Vector2::zero(), &grounded(), &assets, 1.0);
        assert_eq!(player.arms_state, ArmsState::Dying);
        assert_eq!(skeleton.arms.current_action(), Some(assets.arms_dying.id));
    }
}
