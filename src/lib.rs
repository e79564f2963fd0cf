//! Cereal Adventure library.
//!
//! Gameplay for a side-on platformer: a player that runs, jumps, hangs from
//! ledges and walks through portals between realms. The ECS components,
//! animation state machines, realm bookkeeping and render capability are
//! exposed here for the binary and for integration tests.

pub mod components;
pub mod events;
pub mod fsm;
pub mod game;
pub mod physics;
pub mod realm;
pub mod render;
pub mod resources;
pub mod systems;
