//! Flat 2D raylib backend.
//!
//! World space is y-up metres; the current view rectangle is stretched over
//! the whole window. Models are drawn as filled boxes tinted by layer and
//! ambient light, skeletons as a body box with an arm marker, and console
//! text in the top-left corner.

use raylib::prelude::*;

use super::{Light, RenderBackend, RenderLayer};
use crate::components::boxcollider::Aabb;
use crate::components::skeleton::Skeleton;

const CONSOLE_FONT_SIZE: i32 = 10;

pub struct RaylibRenderer<'a, 'b> {
    d: &'a mut RaylibDrawHandle<'b>,
    screen: Vector2,
    view: Aabb,
    transform: Vector2,
    ambient: Color,
    lights: Vec<Light>,
    console_line: i32,
}

impl<'a, 'b> RaylibRenderer<'a, 'b> {
    pub fn new(d: &'a mut RaylibDrawHandle<'b>) -> Self {
        let screen = Vector2::new(d.get_screen_width() as f32, d.get_screen_height() as f32);
        Self {
            d,
            screen,
            view: Aabb::new(Vector2::new(-8.0, -4.5), Vector2::new(8.0, 4.5)),
            transform: Vector2::zero(),
            ambient: Color::WHITE,
            lights: Vec::new(),
            console_line: 0,
        }
    }

    fn to_screen(&self, p: Vector2) -> Vector2 {
        let width = self.view.width().max(f32::EPSILON);
        let height = self.view.height().max(f32::EPSILON);
        Vector2::new(
            (p.x - self.view.min.x) / width * self.screen.x,
            (self.view.max.y - p.y) / height * self.screen.y,
        )
    }

    /// Screen rectangle (top-left, size) of a box centred on the transform.
    fn screen_rect(&self, half_extents: Vector2) -> (Vector2, Vector2) {
        let top_left = self.to_screen(Vector2::new(
            self.transform.x - half_extents.x,
            self.transform.y + half_extents.y,
        ));
        let bottom_right = self.to_screen(Vector2::new(
            self.transform.x + half_extents.x,
            self.transform.y - half_extents.y,
        ));
        (top_left, bottom_right - top_left)
    }

    /// Ambient tint plus every light without falloff.
    fn shade(&self, base: Color) -> Color {
        let mut r = self.ambient.r as f32 / 255.0;
        let mut g = self.ambient.g as f32 / 255.0;
        let mut b = self.ambient.b as f32 / 255.0;
        for light in self.lights.iter().filter(|l| !l.falloff) {
            r += light.color.r as f32 / 255.0 * light.intensity;
            g += light.color.g as f32 / 255.0 * light.intensity;
            b += light.color.b as f32 / 255.0 * light.intensity;
        }
        let scale = |c: u8, k: f32| (c as f32 * k.min(1.0)) as u8;
        Color::new(scale(base.r, r), scale(base.g, g), scale(base.b, b), base.a)
    }
}

fn layer_color(layer: RenderLayer) -> Color {
    match layer {
        RenderLayer::Background => Color::new(0x91, 0x1A, 0x1D, 255),
        RenderLayer::Props => Color::new(0xC4, 0x21, 0x26, 255),
        RenderLayer::Player => Color::new(0xF1, 0xC4, 0x0F, 255),
        RenderLayer::Overlay => Color::new(0xEF, 0x38, 0x37, 128),
    }
}

impl RenderBackend for RaylibRenderer<'_, '_> {
    fn set_clear_color(&mut self, color: Color) {
        self.d.clear_background(color);
        self.console_line = 0;
    }

    fn set_ambient_light(&mut self, color: Color) {
        self.ambient = color;
    }

    fn reset_lights(&mut self) {
        self.lights.clear();
    }

    fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    fn set_view(&mut self, view: Aabb) {
        self.view = view;
    }

    fn set_object_transform(&mut self, position: Vector2) {
        self.transform = position;
    }

    fn draw_model(&mut self, _model: &str, half_extents: Vector2, layer: RenderLayer) {
        let (pos, size) = self.screen_rect(half_extents);
        let color = self.shade(layer_color(layer));
        self.d.draw_rectangle_v(pos, size, color);
    }

    fn draw_skeleton(&mut self, skeleton: &Skeleton, half_extents: Vector2, layer: RenderLayer) {
        let (pos, size) = self.screen_rect(half_extents);
        let color = self.shade(layer_color(layer));
        self.d.draw_rectangle_v(pos, size, color);

        // Arms marker swings with the arms playhead.
        let phase = skeleton
            .arms
            .current_segment()
            .map(|s| s.playhead / s.action.length.max(1.0))
            .unwrap_or(0.0);
        let shoulder = self.to_screen(self.transform + Vector2::new(0.0, half_extents.y * 0.5));
        let reach = half_extents.x * (1.0 + 0.3 * (phase * std::f32::consts::TAU).sin());
        let hand = self.to_screen(self.transform + Vector2::new(reach, half_extents.y * 0.5));
        self.d.draw_line_v(shoulder, hand, Color::BLACK);
    }

    fn draw_box(&mut self, half_extents: Vector2, color: Color, _layer: RenderLayer) {
        let (pos, size) = self.screen_rect(half_extents);
        self.d
            .draw_rectangle_lines_ex(Rectangle::new(pos.x, pos.y, size.x, size.y), 1.0, color);
    }

    fn draw_console_text(&mut self, text: &str) {
        for line in text.lines() {
            self.d.draw_text(
                line,
                10,
                10 + self.console_line * (CONSOLE_FONT_SIZE + 2),
                CONSOLE_FONT_SIZE,
                Color::BLACK,
            );
            self.console_line += 1;
        }
    }
}
