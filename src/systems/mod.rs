//! Gameplay systems.
//!
//! Realms own the per-object loop; most functions here are what that loop
//! and the game driver call into. [`camera`] and [`audio`] are bevy systems
//! run from the game's post-realm schedule.
//!
//! Submodules overview
//! - [`audio`] – sound cue buffer maintenance
//! - [`camera`] – camera follow, look and zoom
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`level`] – spawn realm objects from a level description
//! - [`objects`] – per-kind initialise, process and render dispatch
//! - [`player`] – the player controller (motion, grip, damage, animation, sound)
//! - [`portal`] – portal use and transit hooks
//! - [`time`] – update simulation time and delta

pub mod audio;
pub mod camera;
pub mod input;
pub mod level;
pub mod objects;
pub mod player;
pub mod portal;
pub mod time;
