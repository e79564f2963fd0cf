//! Rotation track: which way the character's body faces.
//!
//! A turn plays once (`TurningBack` / `TurningForward`) and then settles into
//! the matching facing hold. A turn in progress is never interrupted; if the
//! desired facing flips back mid-turn, the opposite turn starts once the
//! current one completes.

use super::{AnimState, Transition};
use crate::components::player::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationState {
    Forward,
    Back,
    TurningBack,
    TurningForward,
    Undefined,
}

impl AnimState for RotationState {
    const UNDEFINED: Self = RotationState::Undefined;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationInputs {
    /// Settled facing before this tick.
    pub facing: Direction,
    /// Facing requested by the motion controller.
    pub desired: Direction,
    pub is_action_complete: bool,
}

const TURN_FADE: f32 = 5.0;

fn hold(state: RotationState) -> Transition<RotationState> {
    Transition::stay(state).then(state, 0.0, 0.0)
}

pub fn rotation_next_state(
    current: RotationState,
    inputs: &RotationInputs,
) -> Transition<RotationState> {
    use RotationState::*;

    match current {
        Forward => match inputs.desired {
            Direction::Back => Transition::to(TurningBack, TURN_FADE).then(Back, 0.0, 0.0),
            Direction::Forward => hold(Forward),
        },
        Back => match inputs.desired {
            Direction::Forward => {
                Transition::to(TurningForward, TURN_FADE).then(Forward, 0.0, 0.0)
            }
            Direction::Back => hold(Back),
        },
        TurningBack => {
            if inputs.is_action_complete {
                Transition::to(Back, 0.0).then(Back, 0.0, 0.0)
            } else {
                Transition::stay(TurningBack).then(Back, 0.0, 0.0)
            }
        }
        TurningForward => {
            if inputs.is_action_complete {
                Transition::to(Forward, 0.0).then(Forward, 0.0, 0.0)
            } else {
                Transition::stay(TurningForward).then(Forward, 0.0, 0.0)
            }
        }
        Undefined => match inputs.facing {
            Direction::Forward => Transition::to(Forward, 0.0),
            Direction::Back => Transition::to(Back, 0.0),
        },
    }
}

impl RotationState {
    /// Facing once any turn in progress has finished.
    pub fn settled_direction(self) -> Option<Direction> {
        match self {
            RotationState::Forward => Some(Direction::Forward),
            RotationState::Back => Some(Direction::Back),
            _ => None,
        }
    }
}
