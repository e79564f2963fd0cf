//! Rigid body state consumed by the physics backend.
//!
//! The [`RigidBody`] component stores velocity, inverse mass and named
//! acceleration forces. Game logic reads and writes velocity directly; the
//! [`PhysicsBackend`](crate::physics::PhysicsBackend) integrates it once per
//! tick after every object has been processed.
//!
//! Bodies with zero inverse mass are immovable. A `solid` body blocks
//! dynamic bodies; non-solid bodies (ledges, portals, decorations) are only
//! tracked for queries.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// Acceleration in world units per second squared.
    pub value: Vector2,
    pub enabled: bool,
}

impl AccelerationForce {
    pub fn new(value: Vector2) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// How the physics backend treats a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyHint {
    /// Integrated every tick and collided against solids.
    Dynamic,
    /// Never moved by the backend.
    Static,
}

#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    pub velocity: Vector2,
    pub forces: FxHashMap<String, AccelerationForce>,
    /// Zero means infinite mass.
    pub inverse_mass: f32,
    pub hint: BodyHint,
    /// Blocks dynamic bodies when true.
    pub solid: bool,
    /// When true the backend skips integration; position may still be set by game logic.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// A static, non-solid body.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            forces: FxHashMap::default(),
            inverse_mass: 0.0,
            hint: BodyHint::Static,
            solid: false,
            frozen: false,
        }
    }

    /// A movable body with the given inverse mass.
    pub fn dynamic(inverse_mass: f32) -> Self {
        Self {
            inverse_mass,
            hint: BodyHint::Dynamic,
            ..Self::new()
        }
    }

    /// An immovable body that blocks dynamic bodies.
    pub fn solid() -> Self {
        Self {
            solid: true,
            ..Self::new()
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.hint == BodyHint::Dynamic && self.inverse_mass > 0.0
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vector2) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Enable or disable a force by name. Returns false if it doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).map(|f| f.enabled).unwrap_or(false)
    }

    /// Sum of all enabled forces.
    pub fn total_acceleration(&self) -> Vector2 {
        let mut total = Vector2 { x: 0.0, y: 0.0 };
        for force in self.forces.values() {
            if force.enabled {
                total += force.value;
            }
        }
        total
    }

    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
        self.velocity = Vector2::zero();
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
