//! Cereal Adventure main entry point.
//!
//! A side-on platformer written in Rust using:
//! - **raylib** for windowing and drawing
//! - **bevy_ecs** for entity-component-system storage, observers and messages
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, the asset manifest and the level description
//! 2. Build the [`Game`] and spawn the level into its realms
//! 3. Every frame: read input, process every realm, then draw the realm the
//!    player is in
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run -- --headless --frames 600
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use cereal_adventure::game::Game;
use cereal_adventure::render::raylibrenderer::RaylibRenderer;
use cereal_adventure::render::recording::RecordingRenderer;
use cereal_adventure::resources::assetregistry::AssetRegistry;
use cereal_adventure::resources::gameconfig::GameConfig;
use cereal_adventure::resources::level::LevelDescription;
use cereal_adventure::systems::input::update_input_state;
use clap::Parser;
use std::path::PathBuf;

/// Cereal Adventure
#[derive(Parser)]
#[command(version, about = "A side-on platformer about a box of cereal.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Asset manifest; overrides the one named in the configuration.
    #[arg(long, value_name = "PATH")]
    assets: Option<PathBuf>,

    /// Level description; overrides the one named in the configuration.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Run without a window, drawing into a recording backend.
    #[arg(long)]
    headless: bool,

    /// Number of frames to simulate when headless.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Force view culling on.
    #[arg(long)]
    culling: bool,
}

fn load(cli: &Cli) -> Result<(GameConfig, AssetRegistry, LevelDescription), String> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("Using default configuration: {}", e);
    }
    if cli.culling {
        config.render.culling = true;
    }

    let registry = match cli.assets.as_ref().or(config.asset_manifest.as_ref()) {
        Some(path) => AssetRegistry::load_from_file(path)?,
        None => AssetRegistry::with_defaults(),
    };
    let level = match cli.level.as_ref().or(config.level_path.as_ref()) {
        Some(path) => LevelDescription::load_from_file(path)?,
        None => LevelDescription::demo(),
    };
    Ok((config, registry, level))
}

fn run_headless(game: &mut Game, frames: u32) {
    let mut renderer = RecordingRenderer::new();
    for _ in 0..frames {
        renderer.clear();
        game.frame_tick(1.0 / 60.0, &mut renderer);
    }
    let position = game.focus_position().unwrap_or_default();
    log::info!(
        "Simulated {} frames; player at ({:.2}, {:.2}), {} respawns",
        frames,
        position.x,
        position.y,
        game.respawn_count()
    );
}

fn run_window(game: &mut Game, config: &GameConfig) {
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Cereal Adventure")
        .build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        update_input_state(game.world_mut(), &rl);
        game.set_fps(rl.get_fps());

        let mut d = rl.begin_drawing(&thread);
        let mut renderer = RaylibRenderer::new(&mut d);
        game.frame_tick(dt, &mut renderer);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let (config, registry, level) = match load(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut game = match Game::new(config.clone(), &registry) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to configure assets: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = game.initial_spawn(&level) {
        log::error!("Failed to spawn level '{}': {}", level.name, e);
        std::process::exit(1);
    }
    log::info!("Level '{}' ready", level.name);

    if cli.headless {
        run_headless(&mut game, cli.frames);
    } else {
        run_window(&mut game, &config);
    }
}
