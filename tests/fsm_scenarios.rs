//! Animation state machine scenarios across the three tracks.

use cereal_adventure::components::player::Direction;
use cereal_adventure::fsm::{
    ArmsState, FsmInputs, LegsState, RotationInputs, RotationState, arms_next_state,
    legs_next_state, rotation_next_state,
};

fn airborne() -> FsmInputs {
    FsmInputs {
        on_surface: false,
        ..FsmInputs::default()
    }
}

#[test]
fn idle_arms_start_running_when_moving() {
    let inputs = FsmInputs {
        on_surface: true,
        is_alive: true,
        is_hurt: false,
        horizontal_velocity: 4.0,
        ..FsmInputs::default()
    };
    let t = arms_next_state(ArmsState::Idle, &inputs);
    assert_eq!(t.next, ArmsState::Running);
    assert_eq!(t.next_fade, 20.0);
}

#[test]
fn hanging_arms_launch() {
    let inputs = FsmInputs {
        is_hanging: true,
        is_launching: true,
        ..airborne()
    };
    let t = arms_next_state(ArmsState::Hanging, &inputs);
    assert_eq!(t.next, ArmsState::Launching);
    assert_eq!(t.next_fade, 1.0);
    assert_eq!(t.speed, 1.5);
}

#[test]
fn death_outranks_hanging_only_on_a_surface() {
    let grounded_dead = FsmInputs {
        is_alive: false,
        is_hanging: true,
        ..FsmInputs::default()
    };
    assert_eq!(
        arms_next_state(ArmsState::Idle, &grounded_dead).next,
        ArmsState::Dying
    );
    assert_eq!(
        arms_next_state(ArmsState::Running, &grounded_dead).next,
        ArmsState::Dying
    );

    let airborne_dead = FsmInputs {
        is_alive: false,
        is_hanging: true,
        ..airborne()
    };
    assert_eq!(
        arms_next_state(ArmsState::Idle, &airborne_dead).next,
        ArmsState::Hanging
    );
}

#[test]
fn dying_is_absorbing() {
    let revived = FsmInputs {
        is_alive: true,
        horizontal_velocity: 5.0,
        is_action_complete: true,
        ..FsmInputs::default()
    };
    assert_eq!(arms_next_state(ArmsState::Dying, &revived).next, ArmsState::Dying);
    assert_eq!(
        arms_next_state(ArmsState::Dying, &airborne()).next,
        ArmsState::Dying
    );
}

#[test]
fn launch_plays_out_before_returning_to_idle() {
    let playing = airborne();
    assert_eq!(
        arms_next_state(ArmsState::Launching, &playing).next,
        ArmsState::Launching
    );
    let done = FsmInputs {
        is_action_complete: true,
        ..airborne()
    };
    let t = arms_next_state(ArmsState::Launching, &done);
    assert_eq!((t.next, t.next_fade), (ArmsState::Idle, 20.0));
}

#[test]
fn arms_and_legs_diverge_during_a_ledge_drop() {
    let dropping = FsmInputs {
        horizontal_velocity: 5.0,
        ..airborne()
    };
    let legs = legs_next_state(LegsState::Running, &dropping);
    let arms = arms_next_state(ArmsState::Running, &dropping);
    assert_eq!(legs.next, LegsState::Falling);
    assert_eq!(arms.next, ArmsState::Idle);
}

#[test]
fn full_jump_to_ledge_sequence() {
    let mut legs = LegsState::Undefined;
    let mut arms = ArmsState::Undefined;
    let mut step = |inputs: FsmInputs| {
        legs = legs_next_state(legs, &inputs).next;
        arms = arms_next_state(arms, &inputs).next;
        (legs, arms)
    };

    assert_eq!(step(FsmInputs::default()), (LegsState::Idle, ArmsState::Idle));
    assert_eq!(step(FsmInputs::default()), (LegsState::Idle, ArmsState::Idle));

    let rising = FsmInputs {
        vertical_velocity: 10.0,
        ..airborne()
    };
    assert_eq!(step(rising), (LegsState::Falling, ArmsState::Idle));

    let reaching = FsmInputs {
        is_grasp_ready: true,
        vertical_velocity: -2.0,
        ..airborne()
    };
    assert_eq!(step(reaching), (LegsState::Hanging, ArmsState::Hanging));

    let hanging = FsmInputs {
        is_hanging: true,
        ..airborne()
    };
    assert_eq!(step(hanging), (LegsState::Hanging, ArmsState::Hanging));

    let launching = FsmInputs {
        is_launching: true,
        ..hanging
    };
    assert_eq!(step(launching), (LegsState::Falling, ArmsState::Launching));
}

#[test]
fn hard_landing_hurts_both_tracks() {
    let landed_hurt = FsmInputs {
        is_hurt: true,
        ..FsmInputs::default()
    };
    assert_eq!(
        legs_next_state(LegsState::FastFalling, &landed_hurt).next,
        LegsState::ImpactDamage
    );
    assert_eq!(
        arms_next_state(ArmsState::Idle, &landed_hurt).next,
        ArmsState::ImpactDamage
    );

    let recovered = FsmInputs::default();
    assert_eq!(
        legs_next_state(LegsState::ImpactDamage, &recovered).next,
        LegsState::Idle
    );
    assert_eq!(
        arms_next_state(ArmsState::ImpactDamage, &recovered).next,
        ArmsState::Idle
    );
}

#[test]
fn rotation_turn_waits_for_completion() {
    let turning = RotationInputs {
        facing: Direction::Forward,
        desired: Direction::Back,
        is_action_complete: false,
    };
    let t = rotation_next_state(RotationState::Forward, &turning);
    assert_eq!(t.next, RotationState::TurningBack);
    assert_eq!(t.queued, RotationState::Back);

    let changed_mind = RotationInputs {
        desired: Direction::Forward,
        ..turning
    };
    assert_eq!(
        rotation_next_state(RotationState::TurningBack, &changed_mind).next,
        RotationState::TurningBack
    );

    let done = RotationInputs {
        is_action_complete: true,
        ..changed_mind
    };
    let settled = rotation_next_state(RotationState::TurningBack, &done).next;
    assert_eq!(settled, RotationState::Back);
    assert_eq!(settled.settled_direction(), Some(Direction::Back));
    assert_eq!(
        rotation_next_state(settled, &done).next,
        RotationState::TurningForward
    );
}

#[test]
fn all_tracks_are_deterministic() {
    let inputs = FsmInputs {
        is_grasp_ready: true,
        vertical_velocity: -13.0,
        horizontal_velocity: -2.0,
        ..airborne()
    };
    for state in [LegsState::Idle, LegsState::Falling, LegsState::Hanging] {
        assert_eq!(legs_next_state(state, &inputs), legs_next_state(state, &inputs));
    }
    for state in [ArmsState::Idle, ArmsState::Running, ArmsState::Hanging] {
        assert_eq!(arms_next_state(state, &inputs), arms_next_state(state, &inputs));
    }
}
