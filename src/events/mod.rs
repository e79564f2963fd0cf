//! Event and message types exchanged between gameplay and its observers.
//!
//! Submodules:
//! - [`audio`] – sound cue messages written by the player controller
//! - [`portal`] – portal transit events and a logging observer
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod audio;
pub mod portal;
pub mod switchdebug;
