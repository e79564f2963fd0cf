//! Named asset registry.
//!
//! Gameplay code never holds global asset handles. Instead the registry is
//! built once at start-up (from a JSON manifest or the built-in defaults) and
//! passed to whatever needs to resolve names, such as
//! [`PlayerAssets::configure`](crate::systems::player::assets::PlayerAssets::configure).
//! Resolution failures are reported at configure time, not in the frame loop.
//!
//! # Manifest format
//!
//! ```json
//! {
//!   "actions": [ { "name": "LegsRun", "length": 40.0 } ],
//!   "audio": [ { "name": "Footstep01", "path": "audio/footstep_01.wav" } ],
//!   "models": [ "Cabinet", "Level1Wall" ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use log::info;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Stable handle of an animation action inside one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u32);

/// A resolved animation action: handle, name and length in frames.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionBinding {
    pub id: ActionId,
    pub name: Arc<str>,
    pub length: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub name: Arc<str>,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActionEntry {
    name: String,
    length: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AudioEntry {
    name: String,
    #[serde(default)]
    path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Manifest {
    #[serde(default)]
    actions: Vec<ActionEntry>,
    #[serde(default)]
    audio: Vec<AudioEntry>,
    #[serde(default)]
    models: Vec<String>,
}

/// Action names and lengths of the cereal box character rig.
const DEFAULT_ACTIONS: &[(&str, f32)] = &[
    ("LegsRun", 40.0),
    ("ArmsRun", 40.0),
    ("LegsIdle", 100.0),
    ("ArmsIdle", 100.0),
    ("LegsTurnBack", 20.0),
    ("LegsTurnForward", 20.0),
    ("LegsFacingForward", 10.0),
    ("LegsFacingBack", 10.0),
    ("LegsFalling", 40.0),
    ("LegsFastFalling", 30.0),
    ("LegsHanging", 60.0),
    ("ArmsHanging", 60.0),
    ("ArmsLaunch", 30.0),
    ("ArmsDying", 90.0),
    ("ArmsDamageLanding", 40.0),
    ("LegsDamageLanding", 40.0),
];

const DEFAULT_AUDIO: &[&str] = &[
    "Footstep01",
    "Footstep02",
    "Footstep03",
    "Footstep04",
    "DamageImpact",
];

const DEFAULT_MODELS: &[&str] = &[
    "CerealArmature",
    "Ledge",
    "Portal",
    "Level1Wall",
    "Floor",
    "Counter_1",
    "Toaster",
    "Shelves",
    "Fridge",
    "Stool_1",
    "Microwave",
    "Oven",
    "SingleShelf",
    "Vase",
    "Cabinet",
    "Sink",
    "StoveHood",
    "FruitBowl",
    "Fan",
    "Table",
    "LightSource::Ceiling",
];

#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    actions: FxHashMap<String, ActionBinding>,
    audio: FxHashMap<String, AudioClip>,
    models: FxHashSet<String>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in character actions, clips and prop models.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, length) in DEFAULT_ACTIONS {
            registry.register_action(name, *length);
        }
        for name in DEFAULT_AUDIO {
            registry.register_audio(name, format!("audio/{}.wav", name.to_lowercase()));
        }
        for name in DEFAULT_MODELS {
            registry.register_model(name);
        }
        registry
    }

    /// Parse a JSON manifest.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let manifest: Manifest = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse asset manifest: {}", e))?;

        let mut registry = Self::new();
        for entry in manifest.actions {
            if entry.length <= 0.0 {
                return Err(format!(
                    "Action '{}' has non-positive length {}",
                    entry.name, entry.length
                ));
            }
            registry.register_action(&entry.name, entry.length);
        }
        for entry in manifest.audio {
            registry.register_audio(&entry.name, entry.path);
        }
        for model in manifest.models {
            registry.register_model(&model);
        }
        Ok(registry)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read asset manifest {:?}: {}", path, e))?;
        let registry = Self::from_json(&json)?;
        info!(
            "Loaded asset manifest {:?}: {} actions, {} clips, {} models",
            path,
            registry.actions.len(),
            registry.audio.len(),
            registry.models.len()
        );
        Ok(registry)
    }

    /// Register (or re-register) an action. Re-registering keeps the handle.
    pub fn register_action(&mut self, name: &str, length: f32) -> ActionBinding {
        let next_id = ActionId(self.actions.len() as u32);
        let binding = self
            .actions
            .entry(name.to_string())
            .and_modify(|b| b.length = length)
            .or_insert_with(|| ActionBinding {
                id: next_id,
                name: Arc::from(name),
                length,
            });
        binding.clone()
    }

    pub fn register_audio(&mut self, name: &str, path: impl Into<String>) {
        self.audio.insert(
            name.to_string(),
            AudioClip {
                name: Arc::from(name),
                path: path.into(),
            },
        );
    }

    pub fn register_model(&mut self, name: &str) {
        self.models.insert(name.to_string());
    }

    pub fn action(&self, name: &str) -> Result<ActionBinding, String> {
        self.actions
            .get(name)
            .cloned()
            .ok_or_else(|| format!("Missing animation action '{}'", name))
    }

    pub fn audio_clip(&self, name: &str) -> Result<AudioClip, String> {
        self.audio
            .get(name)
            .cloned()
            .ok_or_else(|| format!("Missing audio clip '{}'", name))
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains(name)
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}
