//! Animation state machines for the player rig.
//!
//! Each track (legs, arms, rotation) is a pure function from the current state
//! and a snapshot of player conditions to a [`Transition`]. The controller in
//! [`crate::systems::player::animation`] samples the inputs once per tick and
//! applies the result to the matching animation channel.
//!
//! A transition carries two phases:
//!
//! - the immediate `next` state with its fade-in, clip offset and speed, pushed
//!   when it differs from what is currently playing;
//! - an optional `queued` follow-up with its own fade and clip offset, appended
//!   only when the channel has nothing queued. This lets a short one-shot such
//!   as a ledge catch play once and then settle into a looping hold.
//!
//! The queued values always describe the second phase, even when `next` and
//! `queued` name the same state.

pub mod arms;
pub mod legs;
pub mod rotation;

pub use arms::{ArmsState, arms_next_state};
pub use legs::{LegsState, legs_next_state};
pub use rotation::{RotationInputs, RotationState, rotation_next_state};

/// Horizontal speed above which the player counts as moving.
pub const MOVING_THRESHOLD: f32 = 1.0;

/// Conditions sampled from the player once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FsmInputs {
    pub on_surface: bool,
    pub is_hurt: bool,
    pub is_hanging: bool,
    pub is_grasp_ready: bool,
    pub is_launching: bool,
    /// The track's current segment reached its end.
    pub is_action_complete: bool,
    pub horizontal_velocity: f32,
    pub vertical_velocity: f32,
    /// Downward speed at which falling becomes fast falling.
    pub fast_fall_speed: f32,
    pub is_alive: bool,
}

impl FsmInputs {
    pub fn is_moving(&self) -> bool {
        self.horizontal_velocity.abs() > MOVING_THRESHOLD
    }

    pub fn is_fast_falling(&self) -> bool {
        self.vertical_velocity < -self.fast_fall_speed
    }
}

impl Default for FsmInputs {
    fn default() -> Self {
        Self {
            on_surface: true,
            is_hurt: false,
            is_hanging: false,
            is_grasp_ready: false,
            is_launching: false,
            is_action_complete: false,
            horizontal_velocity: 0.0,
            vertical_velocity: 0.0,
            fast_fall_speed: 12.0,
            is_alive: true,
        }
    }
}

/// Implemented by every track's state enum.
pub trait AnimState: Copy + Eq + std::fmt::Debug {
    /// Sentinel meaning "no queued transition". Never a resting state.
    const UNDEFINED: Self;
}

/// Output of one FSM evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<S: AnimState> {
    pub next: S,
    pub next_fade: f32,
    pub next_clip: f32,
    pub queued: S,
    pub queued_fade: f32,
    pub queued_clip: f32,
    pub speed: f32,
}

impl<S: AnimState> Transition<S> {
    /// Stay in `current` with nothing queued.
    pub fn stay(current: S) -> Self {
        Self {
            next: current,
            next_fade: 0.0,
            next_clip: 0.0,
            queued: S::UNDEFINED,
            queued_fade: 0.0,
            queued_clip: 0.0,
            speed: 1.0,
        }
    }

    pub fn to(next: S, fade: f32) -> Self {
        Self {
            next,
            next_fade: fade,
            ..Self::stay(next)
        }
    }

    pub fn with_clip(mut self, clip: f32) -> Self {
        self.next_clip = clip;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn then(mut self, queued: S, fade: f32, clip: f32) -> Self {
        self.queued = queued;
        self.queued_fade = fade;
        self.queued_clip = clip;
        self
    }

    pub fn has_queued(&self) -> bool {
        self.queued != S::UNDEFINED
    }
}
