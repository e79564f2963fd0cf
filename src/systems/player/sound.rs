//! Footstep cues.
//!
//! Footsteps are read off the legs' run animation: each tick the run
//! playhead is normalised by the action length and a cue fires whenever it
//! crosses one of [`FOOTSTEP_PHASES`], so each foot sounds once per loop and
//! in step with what is drawn. [`Player::last_run_playhead`] holds the
//! previous sample.

use crate::components::player::Player;
use crate::components::skeleton::Skeleton;
use crate::components::walker::Walker;
use crate::events::audio::SoundCue;
use crate::fsm::LegsState;
use crate::systems::player::assets::PlayerAssets;

/// Phases of the run loop where a foot hits the ground.
pub const FOOTSTEP_PHASES: [f32; 2] = [0.25, 0.75];

const FOOTSTEP_VOLUME: f32 = 0.6;

/// True if moving the phase from `last` to `now` passed `threshold`. The
/// phase may have wrapped once.
fn crossed(last: f32, now: f32, threshold: f32) -> bool {
    if now >= last {
        last < threshold && threshold <= now
    } else {
        threshold > last || threshold <= now
    }
}

/// Normalised legs run playhead, or `None` unless the legs are playing the
/// run action on the ground.
fn run_phase(
    player: &Player,
    skeleton: &Skeleton,
    walker: &Walker,
    assets: &PlayerAssets,
) -> Option<f32> {
    let run = &assets.legs_run;
    let running = player.legs_state == LegsState::Running
        && walker.on_surface
        && skeleton.legs.current_action() == Some(run.id)
        && run.length > 0.0;
    running.then(|| skeleton.legs.playhead() / run.length)
}

pub fn update_sound_effects(
    player: &mut Player,
    skeleton: &Skeleton,
    walker: &Walker,
    assets: &PlayerAssets,
    cues: &mut Vec<SoundCue>,
) {
    let Some(phase) = run_phase(player, skeleton, walker, assets) else {
        player.last_run_playhead = 0.0;
        return;
    };

    for threshold in FOOTSTEP_PHASES {
        if crossed(player.last_run_playhead, phase, threshold)
            && let Some(clip) = assets.random_footstep()
        {
            cues.push(SoundCue::new(clip).with_volume(FOOTSTEP_VOLUME));
        }
    }
    player.last_run_playhead = phase;
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    use crate::resources::assetregistry::AssetRegistry;
    use crate::systems::player::animation::update_animation;

    fn assets() -> PlayerAssets {
        PlayerAssets::configure(&AssetRegistry::with_defaults()).expect("defaults")
    }

    fn grounded() -> Walker {
        Walker {
            on_surface: true,
            landing_speed: None,
        }
    }

    /// Run `frames` ticks at `speed`, animating and sampling cues like the
    /// controller does. Returns the legs phase at every cue.
    fn run_for(
        player: &mut Player,
        skeleton: &mut Skeleton,
        speed: f32,
        walker: &Walker,
        assets: &PlayerAssets,
        frames: usize,
    ) -> Vec<f32> {
        let mut phases = Vec::new();
        for _ in 0..frames {
            let mut cues = Vec::new();
            update_animation(player, skeleton, Vector2::new(speed, 0.0), walker, assets, 1.0);
            update_sound_effects(player, skeleton, walker, assets, &mut cues);
            assert!(cues.iter().all(|c| c.clip.starts_with("Footstep")));
            let phase = skeleton.legs.playhead() / assets.legs_run.length;
            phases.extend(cues.iter().map(|_| phase));
        }
        phases
    }

    #[test]
    fn crossing_handles_wrap() {
        assert!(crossed(0.2, 0.3, 0.25));
        assert!(!crossed(0.3, 0.4, 0.25));
        assert!(!crossed(0.9, 0.1, 0.75));
        assert!(crossed(0.7, 0.1, 0.75));
        assert!(crossed(0.9, 0.3, 0.25));
    }

    #[test]
    fn two_steps_per_loop_at_full_speed() {
        let assets = assets();
        let mut player = Player::default();
        let mut skeleton = Skeleton::default();
        let speed = player.tuning.run_speed;
        run_for(&mut player, &mut skeleton, 0.0, &grounded(), &assets, 1);

        // Three 40 frame loops.
        let phases = run_for(&mut player, &mut skeleton, speed, &grounded(), &assets, 120);
        assert_eq!(phases.len(), 6);
    }

    #[test]
    fn half_speed_steps_stay_on_the_legs_playhead() {
        let assets = assets();
        let mut player = Player::default();
        let mut skeleton = Skeleton::default();
        let speed = player.tuning.run_speed * 0.5;
        run_for(&mut player, &mut skeleton, 0.0, &grounded(), &assets, 1);

        // Three 80 frame loops.
        let phases = run_for(&mut player, &mut skeleton, speed, &grounded(), &assets, 240);
        assert_eq!(phases.len(), 6);
        // Each cue fires on the tick the playhead reaches a contact phase.
        let step = 1.0 / 80.0;
        for phase in phases {
            assert!(
                FOOTSTEP_PHASES
                    .iter()
                    .any(|&t| phase >= t - 1e-4 && phase < t + step),
                "cue at phase {phase}"
            );
        }
    }

    #[test]
    fn no_steps_while_idle_or_airborne() {
        let assets = assets();
        let mut player = Player::default();
        let mut skeleton = Skeleton::default();
        let idle = run_for(&mut player, &mut skeleton, 0.0, &grounded(), &assets, 60);
        assert!(idle.is_empty());

        let airborne = run_for(&mut player, &mut skeleton, 6.0, &Walker::default(), &assets, 60);
        assert!(airborne.is_empty());
    }

    #[test]
    fn same_threshold_never_fires_twice_in_a_loop() {
        let assets = assets();
        let mut player = Player::default();
        let mut skeleton = Skeleton::default();
        run_for(&mut player, &mut skeleton, 0.0, &grounded(), &assets, 1);
        let first = run_for(&mut player, &mut skeleton, 6.0, &grounded(), &assets, 11);
        assert_eq!(first.len(), 1);

        // Sampling again without the playhead moving adds nothing.
        let mut cues = Vec::new();
        update_sound_effects(&mut player, &skeleton, &grounded(), &assets, &mut cues);
        assert!(cues.is_empty());
    }
}
