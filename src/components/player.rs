//! Player character state.
//!
//! Motion lives in the sibling [`RigidBody`](super::rigidbody::RigidBody) and
//! [`MapPosition`](super::mapposition::MapPosition) components; this component
//! holds everything the controller in [`crate::systems::player`] needs between
//! ticks: health, facing, the three animation track states, the ledge link,
//! cooldowns and footstep bookkeeping.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::cooldowntimer::CooldownTimer;
use crate::components::wrappingtimer::WrappingTimer;
use crate::fsm::{ArmsState, LegsState, RotationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Back,
}

impl Direction {
    /// Sign of horizontal motion that faces this way.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Back => -1.0,
        }
    }
}

/// Non-owning link to the ledge the player hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgeLink {
    pub ledge: Entity,
}

/// Movement and damage tuning. Loaded from the `[player]` config section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    pub health: f32,
    pub run_speed: f32,
    pub acceleration: f32,
    pub air_acceleration: f32,
    pub jump_speed: f32,
    pub launch_speed: f32,
    pub ledge_grasp_distance: f32,
    pub fall_damage_threshold: f32,
    pub fall_damage_multiplier: f32,
    pub terminal_fall_velocity: f32,
    pub fast_fall_velocity: f32,
    pub grip_cooldown: f32,
    pub movement_cooldown: f32,
    pub hurt_duration: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            health: 100.0,
            run_speed: 6.0,
            acceleration: 40.0,
            air_acceleration: 15.0,
            jump_speed: 10.0,
            launch_speed: 12.0,
            ledge_grasp_distance: 0.8,
            fall_damage_threshold: 15.0,
            fall_damage_multiplier: 5.0,
            terminal_fall_velocity: 30.0,
            fast_fall_velocity: 12.0,
            grip_cooldown: 0.3,
            movement_cooldown: 0.15,
            hurt_duration: 0.6,
        }
    }
}

/// Player collider half extents.
pub const PLAYER_HALF_WIDTH: f32 = 0.75;
pub const PLAYER_HALF_HEIGHT: f32 = 1.0;

/// Run-cycle length in animation frames at full run speed, before the legs'
/// run action is known.
pub const RUN_CYCLE_FRAMES: f32 = 40.0;

#[derive(Component, Debug, Clone)]
pub struct Player {
    pub tuning: PlayerTuning,
    pub health: f32,
    pub alive: bool,
    pub grasp_ready: bool,
    pub launching: bool,
    pub direction: Direction,
    pub next_direction: Direction,
    pub legs_state: LegsState,
    pub arms_state: ArmsState,
    pub rotation_state: RotationState,
    pub grip: Option<LedgeLink>,
    pub grip_cooldown: CooldownTimer,
    pub movement_cooldown: CooldownTimer,
    pub hurt_cooldown: CooldownTimer,
    /// Clock of the legs' run loop, in frames. Its period follows speed.
    pub run_cycle: WrappingTimer,
    /// Normalised legs run playhead sampled on the previous tick.
    pub last_run_playhead: f32,
    /// Set when the body dropped below the realm's kill plane.
    pub fell_out: bool,
    pub last_miss_reason: String,
}

impl Player {
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            tuning,
            health: tuning.health,
            alive: true,
            grasp_ready: false,
            launching: false,
            direction: Direction::Forward,
            next_direction: Direction::Forward,
            legs_state: LegsState::Undefined,
            arms_state: ArmsState::Undefined,
            rotation_state: RotationState::Undefined,
            grip: None,
            grip_cooldown: CooldownTimer::new(tuning.grip_cooldown),
            movement_cooldown: CooldownTimer::new(tuning.movement_cooldown),
            hurt_cooldown: CooldownTimer::new(tuning.hurt_duration),
            run_cycle: WrappingTimer::new(RUN_CYCLE_FRAMES),
            last_run_playhead: 0.0,
            fell_out: false,
            last_miss_reason: String::new(),
        }
    }

    /// Hurt while the hurt cooldown is still running.
    pub fn is_hurt(&self) -> bool {
        !self.hurt_cooldown.ready()
    }

    pub fn is_hanging(&self) -> bool {
        self.grip.is_some()
    }

    /// Where the hands are, relative to the body's position.
    pub fn grip_location_local(&self) -> Vector2 {
        Vector2::new(0.0, PLAYER_HALF_HEIGHT)
    }

    pub fn grip_location_world(&self, position: Vector2) -> Vector2 {
        position + self.grip_location_local()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_is_healthy_and_unhurt() {
        let player = Player::default();
        assert!(player.alive);
        assert_eq!(player.health, 100.0);
        assert!(!player.is_hurt());
        assert!(!player.is_hanging());
        assert_eq!(player.arms_state, ArmsState::Undefined);
    }

    #[test]
    fn grip_location_is_above_the_body() {
        let player = Player::default();
        let at = player.grip_location_world(Vector2::new(2.0, 3.0));
        assert_eq!(at, Vector2::new(2.0, 4.0));
    }
}
