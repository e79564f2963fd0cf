//! Data-driven decorative props.
//!
//! Counters, shelves, sinks, fridges and the rest differ only in the model
//! they draw and whether the player can stand on them, so a single [`Prop`]
//! component carries the asset key and a [`PropTag`]. Static level art uses
//! the same component: [`PropTag::Geometry`] for floors and walls,
//! [`PropTag::Decoration`] for backdrop models.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropTag {
    /// Solid furniture the player can land on.
    Furniture,
    /// Drawn only; never collides.
    Decoration,
    /// Emits light when rendered.
    LightSource,
    /// Level geometry (floors, walls); solid.
    Geometry,
}

impl PropTag {
    pub fn is_solid(self) -> bool {
        matches!(self, PropTag::Furniture | PropTag::Geometry)
    }

    /// Tag for the prop names found in level files.
    pub fn for_node_name(name: &str) -> Option<PropTag> {
        match name {
            "Counter_1" | "Shelves" | "Fridge" | "Stool_1" | "Oven" | "SingleShelf" | "Cabinet"
            | "Sink" | "Table" => Some(PropTag::Furniture),
            "Toaster" | "Microwave" | "Vase" | "StoveHood" | "FruitBowl" | "Fan" => {
                Some(PropTag::Decoration)
            }
            "LightSource::Ceiling" => Some(PropTag::LightSource),
            _ => None,
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Prop {
    /// Model key in the [`AssetRegistry`](crate::resources::assetregistry::AssetRegistry).
    pub asset: String,
    pub tag: PropTag,
    pub half_width: f32,
    pub half_height: f32,
}

impl Prop {
    pub fn new(asset: impl Into<String>, tag: PropTag) -> Self {
        Self {
            asset: asset.into(),
            tag,
            half_width: 0.5,
            half_height: 0.5,
        }
    }

    pub fn with_half_extents(mut self, half_width: f32, half_height: f32) -> Self {
        self.half_width = half_width;
        self.half_height = half_height;
        self
    }
}
