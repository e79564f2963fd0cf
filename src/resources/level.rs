//! Level layout description.
//!
//! A level is a flat list of named nodes, the way a scene export lists its
//! instances. The node name selects what gets spawned:
//!
//! - `PlayerStart` sets the respawn point;
//! - `Ledge` spawns a grabbable ledge;
//! - `Portal` spawns a doorway to the realm named by `target`;
//! - `Floor` and `Solid` spawn blocking level geometry of the given `size`;
//! - a known prop name spawns that prop;
//! - anything else becomes static art drawn from the model of the same name.
//!
//! ```json
//! {
//!   "name": "Level 1",
//!   "nodes": [
//!     { "name": "PlayerStart", "position": [0.0, 2.0] },
//!     { "name": "Floor", "position": [0.0, -0.5], "size": [40.0, 1.0] },
//!     { "name": "Ledge", "position": [6.0, 4.0] },
//!     { "name": "Cabinet", "position": [3.0, 0.75] }
//!   ]
//! }
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelNode {
    pub name: String,
    /// World position, y up.
    pub position: [f32; 2],
    /// Full width and height; props and art fall back to a unit box.
    #[serde(default)]
    pub size: Option<[f32; 2]>,
    /// Target realm name for portals.
    #[serde(default)]
    pub target: Option<String>,
    /// Realm the node belongs to; defaults to the main realm.
    #[serde(default)]
    pub realm: Option<String>,
}

impl LevelNode {
    pub fn new(name: &str, x: f32, y: f32) -> Self {
        Self {
            name: name.to_string(),
            position: [x, y],
            size: None,
            target: None,
            realm: None,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some([width, height]);
        self
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn in_realm(mut self, realm: &str) -> Self {
        self.realm = Some(realm.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    pub name: String,
    pub nodes: Vec<LevelNode>,
}

impl LevelDescription {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse level: {}", e))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read level {:?}: {}", path, e))?;
        let level = Self::from_json(&json)?;
        info!("Loaded level '{}' with {} nodes", level.name, level.nodes.len());
        Ok(level)
    }

    /// Small kitchen used when no level file is configured.
    pub fn demo() -> Self {
        Self {
            name: "Kitchen".to_string(),
            nodes: vec![
                LevelNode::new("PlayerStart", 0.0, 2.0),
                LevelNode::new("Floor", 0.0, -0.5).with_size(60.0, 1.0),
                LevelNode::new("Solid", -14.0, 4.0).with_size(1.0, 10.0),
                LevelNode::new("Counter_1", 4.0, 0.75).with_size(3.0, 1.5),
                LevelNode::new("Toaster", 4.5, 1.85).with_size(0.8, 0.7),
                LevelNode::new("Cabinet", 9.0, 3.0).with_size(2.0, 1.2),
                LevelNode::new("Ledge", 8.0, 3.6),
                LevelNode::new("Ledge", 10.0, 3.6),
                LevelNode::new("Fridge", -6.0, 1.5).with_size(2.0, 3.0),
                LevelNode::new("LightSource::Ceiling", 0.0, 7.0),
                LevelNode::new("Level1Wall", 0.0, 4.0).with_size(60.0, 10.0),
                LevelNode::new("Portal", 12.0, 1.0).with_target("Pantry"),
                LevelNode::new("Floor", 0.0, -0.5)
                    .with_size(20.0, 1.0)
                    .in_realm("Pantry"),
                LevelNode::new("Portal", -2.0, 1.0)
                    .with_target("Kitchen")
                    .in_realm("Pantry"),
                LevelNode::new("Shelves", 3.0, 1.5)
                    .with_size(2.0, 3.0)
                    .in_realm("Pantry"),
            ],
        }
    }
}
