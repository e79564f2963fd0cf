use raylib::prelude::{Color, Vector2};

use super::{Light, RenderBackend, RenderLayer};
use crate::components::boxcollider::Aabb;
use crate::components::skeleton::{AnimationChannel, Skeleton};

#[derive(Debug, Clone)]
pub enum DrawCommand {
    ClearColor(Color),
    Ambient(Color),
    ResetLights,
    Light(Light),
    View(Aabb),
    Transform(Vector2),
    Model {
        name: String,
        half_extents: Vector2,
        layer: RenderLayer,
    },
    Skeleton {
        legs: Option<String>,
        arms: Option<String>,
        layer: RenderLayer,
    },
    Box {
        half_extents: Vector2,
        layer: RenderLayer,
    },
    Text(String),
}

/// Backend that records draw calls instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Models and skeletons drawn since the last clear.
    pub fn drawn_object_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Model { .. } | DrawCommand::Skeleton { .. }))
            .count()
    }

    pub fn drew_model(&self, model: &str) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Model { name, .. } if name == model))
    }

    pub fn light_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Light(_)))
            .count()
    }

    pub fn text(&self) -> String {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

impl RenderBackend for RecordingRenderer {
    fn set_clear_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::ClearColor(color));
    }

    fn set_ambient_light(&mut self, color: Color) {
        self.commands.push(DrawCommand::Ambient(color));
    }

    fn reset_lights(&mut self) {
        self.commands.push(DrawCommand::ResetLights);
    }

    fn add_light(&mut self, light: Light) {
        self.commands.push(DrawCommand::Light(light));
    }

    fn set_view(&mut self, view: Aabb) {
        self.commands.push(DrawCommand::View(view));
    }

    fn set_object_transform(&mut self, position: Vector2) {
        self.commands.push(DrawCommand::Transform(position));
    }

    fn draw_model(&mut self, model: &str, half_extents: Vector2, layer: RenderLayer) {
        self.commands.push(DrawCommand::Model {
            name: model.to_string(),
            half_extents,
            layer,
        });
    }

    fn draw_skeleton(&mut self, skeleton: &Skeleton, _half_extents: Vector2, layer: RenderLayer) {
        let name_of = |channel: &AnimationChannel| {
            channel
                .current_segment()
                .map(|segment| segment.action.name.to_string())
        };
        self.commands.push(DrawCommand::Skeleton {
            legs: name_of(&skeleton.legs),
            arms: name_of(&skeleton.arms),
            layer,
        });
    }

    fn draw_box(&mut self, half_extents: Vector2, _color: Color, layer: RenderLayer) {
        self.commands.push(DrawCommand::Box {
            half_extents,
            layer,
        });
    }

    fn draw_console_text(&mut self, text: &str) {
        self.commands.push(DrawCommand::Text(text.to_string()));
    }
}
