//! Game configuration resource.
//!
//! Settings are loaded from an INI file. Every key is optional; anything
//! missing keeps its default, so an empty or absent file still yields a
//! playable configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [render]
//! culling = false
//! show_debug = true
//!
//! [simulation]
//! max_frame_time = 0.0333
//! gravity = 20.0
//! kill_plane = -30.0
//!
//! [camera]
//! distance = 10.0
//! fov = 1.0472
//! aspect = 1.7778
//!
//! [player]
//! health = 100.0
//! run_speed = 6.0
//! ledge_grasp_distance = 0.8
//! fall_damage_threshold = 15.0
//!
//! [assets]
//! manifest = assets/manifest.json
//! level = assets/level1.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::player::PlayerTuning;

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
/// Longest tick the simulation accepts; slower frames run in slow motion.
const DEFAULT_MAX_FRAME_TIME: f32 = 1.0 / 30.0;
const DEFAULT_GRAVITY: f32 = 20.0;
const DEFAULT_KILL_PLANE: f32 = -30.0;
const DEFAULT_CAMERA_DISTANCE: f32 = 10.0;
const DEFAULT_CAMERA_FOV: f32 = std::f32::consts::FRAC_PI_3;
const DEFAULT_CAMERA_ASPECT: f32 = 16.0 / 9.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Switches for the render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSettings {
    /// Skip objects whose visual bounds miss the camera rectangle.
    pub culling: bool,
    pub show_debug: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub render: RenderSettings,
    pub max_frame_time: f32,
    /// Downward acceleration applied to dynamic bodies.
    pub gravity: f32,
    /// Height below which a falling player dies.
    pub kill_plane: f32,
    pub camera_distance: f32,
    /// Vertical field of view in radians.
    pub camera_fov: f32,
    pub camera_aspect: f32,
    pub player: PlayerTuning,
    pub asset_manifest: Option<PathBuf>,
    pub level_path: Option<PathBuf>,
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    if let Some(value) = config.getfloat(section, key).ok().flatten() {
        *target = value as f32;
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            render: RenderSettings {
                culling: false,
                show_debug: true,
            },
            max_frame_time: DEFAULT_MAX_FRAME_TIME,
            gravity: DEFAULT_GRAVITY,
            kill_plane: DEFAULT_KILL_PLANE,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            camera_fov: DEFAULT_CAMERA_FOV,
            camera_aspect: DEFAULT_CAMERA_ASPECT,
            player: PlayerTuning::default(),
            asset_manifest: None,
            level_path: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from `config_path`.
    ///
    /// Missing values retain their current values. Returns an error if the
    /// file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file {:?}: {}", self.config_path, e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, culling={}, max_frame_time={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.render.culling,
            self.max_frame_time
        );
        Ok(())
    }

    /// Apply INI text on top of the current values.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window]
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [render]
        if let Some(culling) = config.getbool("render", "culling").ok().flatten() {
            self.render.culling = culling;
        }
        if let Some(show) = config.getbool("render", "show_debug").ok().flatten() {
            self.render.show_debug = show;
        }

        // [simulation]
        read_f32(config, "simulation", "max_frame_time", &mut self.max_frame_time);
        read_f32(config, "simulation", "gravity", &mut self.gravity);
        read_f32(config, "simulation", "kill_plane", &mut self.kill_plane);

        // [camera]
        read_f32(config, "camera", "distance", &mut self.camera_distance);
        read_f32(config, "camera", "fov", &mut self.camera_fov);
        read_f32(config, "camera", "aspect", &mut self.camera_aspect);

        // [player]
        let p = &mut self.player;
        read_f32(config, "player", "health", &mut p.health);
        read_f32(config, "player", "run_speed", &mut p.run_speed);
        read_f32(config, "player", "acceleration", &mut p.acceleration);
        read_f32(config, "player", "air_acceleration", &mut p.air_acceleration);
        read_f32(config, "player", "jump_speed", &mut p.jump_speed);
        read_f32(config, "player", "launch_speed", &mut p.launch_speed);
        read_f32(config, "player", "ledge_grasp_distance", &mut p.ledge_grasp_distance);
        read_f32(config, "player", "fall_damage_threshold", &mut p.fall_damage_threshold);
        read_f32(config, "player", "fall_damage_multiplier", &mut p.fall_damage_multiplier);
        read_f32(config, "player", "terminal_fall_velocity", &mut p.terminal_fall_velocity);
        read_f32(config, "player", "fast_fall_velocity", &mut p.fast_fall_velocity);
        read_f32(config, "player", "grip_cooldown", &mut p.grip_cooldown);
        read_f32(config, "player", "movement_cooldown", &mut p.movement_cooldown);
        read_f32(config, "player", "hurt_duration", &mut p.hurt_duration);

        // [assets]
        if let Some(manifest) = config.get("assets", "manifest") {
            self.asset_manifest = Some(PathBuf::from(manifest));
        }
        if let Some(level) = config.get("assets", "level") {
            self.level_path = Some(PathBuf::from(level));
        }
    }

    /// Save configuration to `config_path`, creating the file if needed.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("window", "width", self.window_width.to_string());
        set("window", "height", self.window_height.to_string());
        set("window", "target_fps", self.target_fps.to_string());

        set("render", "culling", self.render.culling.to_string());
        set("render", "show_debug", self.render.show_debug.to_string());

        set("simulation", "max_frame_time", self.max_frame_time.to_string());
        set("simulation", "gravity", self.gravity.to_string());
        set("simulation", "kill_plane", self.kill_plane.to_string());

        set("camera", "distance", self.camera_distance.to_string());
        set("camera", "fov", self.camera_fov.to_string());
        set("camera", "aspect", self.camera_aspect.to_string());

        let p = self.player;
        set("player", "health", p.health.to_string());
        set("player", "run_speed", p.run_speed.to_string());
        set("player", "acceleration", p.acceleration.to_string());
        set("player", "air_acceleration", p.air_acceleration.to_string());
        set("player", "jump_speed", p.jump_speed.to_string());
        set("player", "launch_speed", p.launch_speed.to_string());
        set("player", "ledge_grasp_distance", p.ledge_grasp_distance.to_string());
        set("player", "fall_damage_threshold", p.fall_damage_threshold.to_string());
        set("player", "fall_damage_multiplier", p.fall_damage_multiplier.to_string());
        set("player", "terminal_fall_velocity", p.terminal_fall_velocity.to_string());
        set("player", "fast_fall_velocity", p.fast_fall_velocity.to_string());
        set("player", "grip_cooldown", p.grip_cooldown.to_string());
        set("player", "movement_cooldown", p.movement_cooldown.to_string());
        set("player", "hurt_duration", p.hurt_duration.to_string());

        if let Some(manifest) = &self.asset_manifest {
            set("assets", "manifest", manifest.display().to_string());
        }
        if let Some(level) = &self.level_path {
            set("assets", "level", level.display().to_string());
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn defaults_are_playable() {
        let config = GameConfig::new();
        assert!(!config.render.culling);
        assert!(approx_eq(config.max_frame_time, 1.0 / 30.0));
        assert!(approx_eq(config.camera_distance, 10.0));
        assert_eq!(config.player, PlayerTuning::default());
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[player]\nrun_speed = 8.5\n\n[render]\nculling = true\n")
            .expect("valid ini");
        assert!(approx_eq(config.player.run_speed, 8.5));
        assert!(config.render.culling);
        assert!(approx_eq(config.player.health, 100.0));
        assert_eq!(config.window_width, 1280);
    }

    #[test]
    fn asset_paths_are_read() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[assets]\nmanifest = a/m.json\nlevel = a/l.json\n")
            .expect("valid ini");
        assert_eq!(config.asset_manifest, Some(PathBuf::from("a/m.json")));
        assert_eq!(config.level_path, Some(PathBuf::from("a/l.json")));
    }

    #[test]
    fn save_then_load_preserves_tuning() {
        let path = std::env::temp_dir().join(format!(
            "cereal_adventure_config_{}.ini",
            std::process::id()
        ));
        let mut config = GameConfig::with_path(&path);
        config.player.ledge_grasp_distance = 1.25;
        config.kill_plane = -12.0;
        config.save_to_file().expect("save");

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().expect("load");
        let _ = std::fs::remove_file(&path);

        assert!(approx_eq(loaded.player.ledge_grasp_distance, 1.25));
        assert!(approx_eq(loaded.kill_plane, -12.0));
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/cereal/config.ini");
        assert!(config.load_from_file().is_err());
    }
}
