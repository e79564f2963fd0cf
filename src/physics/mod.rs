//! Physics capability consumed by realms.
//!
//! A realm tells its backend which bodies to track as objects register and
//! unregister, and steps it once per tick after every object has been
//! processed. Bodies themselves are ECS components
//! ([`RigidBody`](crate::components::rigidbody::RigidBody),
//! [`BoxCollider`](crate::components::boxcollider::BoxCollider),
//! [`MapPosition`](crate::components::mapposition::MapPosition)); game code reads
//! and writes velocity on the component directly.

pub mod kinematic;

use bevy_ecs::prelude::*;

pub use kinematic::KinematicPhysics;

pub trait PhysicsBackend {
    /// Start tracking `entity`. Tracking an entity twice is a no-op.
    fn register_body(&mut self, entity: Entity);
    /// Stop tracking `entity`. Unknown entities are ignored.
    fn remove_body(&mut self, entity: Entity);
    fn is_tracking(&self, entity: Entity) -> bool;
    fn body_count(&self) -> usize;
    /// Integrate and resolve contacts for every tracked body.
    fn step(&mut self, world: &mut World, dt: f32);
}
