//! Legs track.
//!
//! The legs follow the same priority order as the arms but dangle rather than
//! mirror them: leaving a surface leads to `Falling` (then `FastFalling` past
//! the fast-fall speed) while the arms may still be finishing a run cycle.
//! The legs have no death pose; a dead player's legs hold `ImpactDamage`.

use super::{AnimState, FsmInputs, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegsState {
    Running,
    Idle,
    Falling,
    FastFalling,
    Hanging,
    ImpactDamage,
    Undefined,
}

impl AnimState for LegsState {
    const UNDEFINED: Self = LegsState::Undefined;
}

fn catch_hang() -> Transition<LegsState> {
    Transition::to(LegsState::Hanging, 2.0)
        .with_clip(30.0)
        .then(LegsState::Hanging, 20.0, 30.0)
}

fn reach_for_ledge() -> Transition<LegsState> {
    Transition::to(LegsState::Hanging, 10.0)
        .with_clip(10.0)
        .then(LegsState::Hanging, 20.0, 30.0)
}

/// Grounded branch shared by every state once the player stands on something.
fn grounded(current: LegsState, inputs: &FsmInputs, fade: f32) -> Transition<LegsState> {
    use LegsState::*;

    if !inputs.is_alive || inputs.is_hurt {
        if current == ImpactDamage {
            Transition::stay(ImpactDamage)
        } else {
            Transition::to(ImpactDamage, fade)
        }
    } else if inputs.is_moving() {
        if current == Running {
            Transition::stay(Running).then(Running, 0.0, 0.0)
        } else {
            Transition::to(Running, fade)
        }
    } else if current == Idle {
        Transition::stay(Idle).then(Idle, 0.0, 0.0)
    } else {
        Transition::to(Idle, fade)
    }
}

pub fn legs_next_state(current: LegsState, inputs: &FsmInputs) -> Transition<LegsState> {
    use LegsState::*;

    match current {
        Idle | Running => {
            if inputs.on_surface {
                grounded(current, inputs, 20.0)
            } else if inputs.is_hanging {
                catch_hang()
            } else if inputs.is_grasp_ready {
                reach_for_ledge()
            } else {
                Transition::to(Falling, 20.0).then(Falling, 0.0, 0.0)
            }
        }
        Falling => {
            if inputs.on_surface {
                grounded(current, inputs, 10.0)
            } else if inputs.is_hanging {
                catch_hang()
            } else if inputs.is_grasp_ready {
                reach_for_ledge()
            } else if inputs.is_fast_falling() {
                Transition::to(FastFalling, 20.0).then(FastFalling, 0.0, 0.0)
            } else {
                Transition::stay(Falling).then(Falling, 0.0, 0.0)
            }
        }
        FastFalling => {
            if inputs.on_surface {
                grounded(current, inputs, 2.0)
            } else if inputs.is_hanging {
                catch_hang()
            } else if inputs.is_grasp_ready {
                reach_for_ledge()
            } else {
                Transition::stay(FastFalling).then(FastFalling, 0.0, 0.0)
            }
        }
        Hanging => {
            if inputs.is_hanging {
                if inputs.is_launching {
                    Transition::to(Falling, 5.0).with_speed(1.5)
                } else {
                    catch_hang()
                }
            } else if inputs.is_grasp_ready {
                reach_for_ledge()
            } else if inputs.on_surface {
                grounded(current, inputs, 20.0)
            } else {
                Transition::to(Falling, 20.0).then(Falling, 0.0, 0.0)
            }
        }
        ImpactDamage => {
            if inputs.is_hanging {
                catch_hang()
            } else if inputs.is_grasp_ready {
                reach_for_ledge()
            } else if inputs.on_surface {
                grounded(current, inputs, 20.0)
            } else {
                Transition::to(Falling, 40.0).then(Falling, 0.0, 0.0)
            }
        }
        Undefined => Transition::to(Idle, 0.0),
    }
}
