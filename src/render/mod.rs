//! Rendering capability consumed by realms and objects.
//!
//! Gameplay code never talks to raylib directly. A realm configures lighting
//! and then asks each visible object to draw itself through a
//! [`RenderBackend`]: set the object transform, then draw a model, a skeleton
//! or a debug box relative to it. Two backends exist:
//!
//! - [`raylibrenderer::RaylibRenderer`] draws into a raylib frame.
//! - [`recording::RecordingRenderer`] records every call; used headless and in tests.

pub mod raylibrenderer;
pub mod recording;

use raylib::prelude::{Color, Vector2, Vector3};

use crate::components::boxcollider::Aabb;
use crate::components::skeleton::Skeleton;

/// Draw order bucket. Lower layers are drawn first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderLayer {
    Background,
    Props,
    Player,
    Overlay,
}

#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vector3,
    pub color: Color,
    pub intensity: f32,
    /// When false the light reaches everything at full intensity.
    pub falloff: bool,
}

pub trait RenderBackend {
    fn set_clear_color(&mut self, color: Color);
    fn set_ambient_light(&mut self, color: Color);
    /// Drop every light added so far this frame.
    fn reset_lights(&mut self);
    fn add_light(&mut self, light: Light);
    /// World rectangle currently visible through the camera.
    fn set_view(&mut self, view: Aabb);
    /// Position subsequent draw calls are relative to.
    fn set_object_transform(&mut self, position: Vector2);
    fn draw_model(&mut self, model: &str, half_extents: Vector2, layer: RenderLayer);
    fn draw_skeleton(&mut self, skeleton: &Skeleton, half_extents: Vector2, layer: RenderLayer);
    fn draw_box(&mut self, half_extents: Vector2, color: Color, layer: RenderLayer);
    fn draw_console_text(&mut self, text: &str);
}
