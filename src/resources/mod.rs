//! ECS resources and start-up data.
//!
//! Submodules overview:
//! - [`assetregistry`] – named animation actions, audio clips and model keys
//! - [`camera`] – spring-smoothed follow camera and its visible rectangle
//! - [`debugmode`] – marker resource enabling the debug overlay
//! - [`gameconfig`] – INI-backed configuration
//! - [`input`] – per-frame keyboard state
//! - [`level`] – JSON level layout
//! - [`worldtime`] – simulation clock

pub mod assetregistry;
pub mod camera;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod level;
pub mod worldtime;
