//! ECS components for game objects.
//!
//! Every simulated object is an entity with a [`gameobject::GameObject`]
//! component plus whatever data its kind needs.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned box collider and the `Aabb` helper
//! - [`cooldowntimer`] – polled countdown gate
//! - [`gameobject`] – realm bookkeeping, reference count and deletion flag
//! - [`ledge`] – grabbable edge with a grasp point
//! - [`mapposition`] – world-space position (y up, metres)
//! - [`player`] – player character state
//! - [`portal`] – doorway between realms
//! - [`prop`] – data-driven decorative prop
//! - [`rigidbody`] – velocity, named forces and body hints
//! - [`skeleton`] – animation channels for the player rig
//! - [`walker`] – surface contact reported by physics
//! - [`wrappingtimer`] – timer that wraps modulo a period

pub mod boxcollider;
pub mod cooldowntimer;
pub mod gameobject;
pub mod ledge;
pub mod mapposition;
pub mod player;
pub mod portal;
pub mod prop;
pub mod rigidbody;
pub mod skeleton;
pub mod walker;
pub mod wrappingtimer;
