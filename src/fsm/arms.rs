//! Arms track.
//!
//! Within each state the checks run in a fixed order: death, hurt, then
//! position (hanging / grasp), then surface contact and movement. Death is
//! only examined while the player stands on a surface; an airborne player
//! that dies keeps following the positional branches until it lands.
//!
//! `Dying` is absorbing. The game replaces a dead player with a fresh one, so
//! the arms never leave `Dying` on their own.

use super::{AnimState, FsmInputs, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmsState {
    Idle,
    Running,
    Hanging,
    ImpactDamage,
    Launching,
    Dying,
    Undefined,
}

impl AnimState for ArmsState {
    const UNDEFINED: Self = ArmsState::Undefined;
}

/// Quick catch onto a ledge while already hanging, then settle into the hold.
fn catch_hang() -> Transition<ArmsState> {
    Transition::to(ArmsState::Hanging, 2.0)
        .with_clip(30.0)
        .then(ArmsState::Hanging, 20.0, 30.0)
}

/// Reach for a ledge that just came into range.
fn reach_for_ledge(fade: f32) -> Transition<ArmsState> {
    Transition::to(ArmsState::Hanging, fade)
        .with_clip(10.0)
        .then(ArmsState::Hanging, 20.0, 30.0)
}

pub fn arms_next_state(current: ArmsState, inputs: &FsmInputs) -> Transition<ArmsState> {
    use ArmsState::*;

    let is_moving = inputs.is_moving();

    match current {
        Idle => {
            if inputs.on_surface {
                if !inputs.is_alive {
                    Transition::to(Dying, 20.0)
                } else if inputs.is_hurt {
                    Transition::to(ImpactDamage, 20.0)
                } else if is_moving {
                    Transition::to(Running, 20.0)
                } else {
                    Transition::stay(Idle).then(Idle, 0.0, 0.0)
                }
            } else if inputs.is_hanging {
                catch_hang()
            } else if inputs.is_grasp_ready {
                reach_for_ledge(5.0)
            } else {
                Transition::to(Idle, 20.0).then(Idle, 0.0, 0.0)
            }
        }
        Running => {
            if inputs.on_surface {
                if !inputs.is_alive {
                    Transition::to(Dying, 20.0)
                } else if inputs.is_hurt {
                    Transition::to(ImpactDamage, 20.0)
                } else if !is_moving {
                    Transition::to(Idle, 20.0)
                } else {
                    Transition::stay(Running).then(Running, 0.0, 0.0)
                }
            } else if inputs.is_hanging {
                catch_hang()
            } else if inputs.is_grasp_ready {
                reach_for_ledge(10.0)
            } else {
                Transition::to(Idle, 20.0).then(Idle, 0.0, 0.0)
            }
        }
        Hanging => {
            if inputs.is_hanging {
                if !inputs.is_launching {
                    catch_hang()
                } else {
                    Transition::to(Launching, 1.0).with_speed(1.5)
                }
            } else if inputs.is_grasp_ready {
                reach_for_ledge(10.0)
            } else if inputs.on_surface {
                if inputs.is_hurt {
                    Transition::to(ImpactDamage, 20.0)
                } else if !is_moving {
                    Transition::to(Idle, 20.0)
                } else {
                    Transition::to(Running, 20.0)
                }
            } else {
                Transition::to(Idle, 40.0)
            }
        }
        ImpactDamage => {
            if inputs.is_hanging {
                catch_hang()
            } else if inputs.is_grasp_ready {
                reach_for_ledge(10.0)
            } else if inputs.on_surface {
                if !inputs.is_hurt {
                    Transition::to(Idle, 20.0)
                } else {
                    Transition::stay(ImpactDamage)
                }
            } else {
                Transition::to(Idle, 40.0)
            }
        }
        Launching => {
            if inputs.is_action_complete {
                Transition::to(Idle, 20.0)
            } else {
                Transition::stay(Launching)
            }
        }
        Dying => Transition::stay(Dying),
        Undefined => Transition::to(Idle, 0.0),
    }
}
