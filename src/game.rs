//! The world orchestrator.
//!
//! [`Game`] owns the ECS [`World`], every realm of the loaded level and the
//! focus object the camera follows. Each frame:
//!
//! 1. [`Game::process`]: clamp the frame delta, advance [`WorldTime`],
//!    process every realm, apply realm transfers, respawn the player if it
//!    died, then run the post-realm [`Schedule`] (camera follow and sound
//!    cue buffers);
//! 2. [`Game::render`]: draw the realm the focus is in and, in debug mode,
//!    the overlay text.
//!
//! The focus holds a reference on its player so the realm cannot destroy it
//! while the game still looks at it.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::Vector2;

use crate::components::gameobject::{GameObject, ObjectKind};
use crate::components::mapposition::MapPosition;
use crate::events::audio::SoundCue;
use crate::events::portal::{PortalTransitLog, log_portal_transit};
use crate::events::switchdebug::switch_debug_observer;
use crate::realm::{RealmId, RealmSet, update_realms};
use crate::render::RenderBackend;
use crate::resources::assetregistry::AssetRegistry;
use crate::resources::camera::{CameraFocus, CameraRig};
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::level::LevelDescription;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::update_sound_cues;
use crate::systems::camera::camera_follow_system;
use crate::systems::level::generate_level;
use crate::systems::objects::ObjectAssets;
use crate::systems::player::assets::PlayerAssets;
use crate::systems::player::is_player_dead;
use crate::systems::time::update_world_time;

/// Owns the world, its realms and the tick order.
pub struct Game {
    world: World,
    /// Global passes that run after every realm has been processed.
    post_realms: Schedule,
    realms: RealmSet,
    assets: ObjectAssets,
    main_realm: Option<RealmId>,
    respawn_position: Vector2,
    respawn_count: u32,
    fps: u32,
}

impl Game {
    /// Build the world and resolve every asset the objects need. Fails on the
    /// first missing action or clip.
    pub fn new(config: GameConfig, registry: &AssetRegistry) -> Result<Self, String> {
        let assets = ObjectAssets {
            player: PlayerAssets::configure(registry)?,
        };

        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(InputState::default());
        world.insert_resource(CameraRig::new(
            config.camera_distance,
            config.camera_fov,
            config.camera_aspect,
        ));
        world.insert_resource(CameraFocus::default());
        world.insert_resource(PortalTransitLog::default());
        world.init_resource::<Messages<SoundCue>>();
        if config.render.show_debug {
            world.insert_resource(DebugMode {});
        }
        world.insert_resource(config);

        world.add_observer(switch_debug_observer);
        world.add_observer(log_portal_transit);
        world.flush();

        let mut post_realms = Schedule::default();
        post_realms.add_systems((camera_follow_system, update_sound_cues).chain());

        Ok(Self {
            world,
            post_realms,
            realms: RealmSet::new(),
            assets,
            main_realm: None,
            respawn_position: Vector2::zero(),
            respawn_count: 0,
            fps: 0,
        })
    }

    /// Create the main realm, spawn the level into it and spawn the player at
    /// the level's start point.
    pub fn initial_spawn(&mut self, level: &LevelDescription) -> Result<(), String> {
        if self.main_realm.is_some() {
            return Err("Level already spawned".to_string());
        }
        let main = self.realms.add(&level.name);
        let layout = generate_level(&mut self.world, &mut self.realms, main, level)?;

        let kill_plane = self.world.resource::<GameConfig>().kill_plane;
        for realm in self.realms.iter_mut() {
            realm.kill_plane = kill_plane;
        }

        self.main_realm = Some(main);
        self.respawn_position = layout.respawn_position;
        self.spawn_focus(main);
        self.world
            .resource_mut::<CameraRig>()
            .snap_to(self.respawn_position);
        Ok(())
    }

    fn spawn_focus(&mut self, realm: RealmId) -> Option<Entity> {
        let realm = self.realms.get_mut(realm)?;
        let player = realm.spawn(
            &mut self.world,
            ObjectKind::Player,
            MapPosition::from_vec(self.respawn_position),
        );
        if let Some(mut object) = self.world.get_mut::<GameObject>(player) {
            object.increment_reference_count();
        }
        self.world.resource_mut::<CameraFocus>().entity = Some(player);
        Some(player)
    }

    /// One whole frame: [`Game::process`] then [`Game::render`].
    pub fn frame_tick(&mut self, frame_time: f32, renderer: &mut dyn RenderBackend) {
        self.process(frame_time);
        self.render(renderer);
    }

    /// Advance the simulation by `frame_time` seconds, clamped to the
    /// configured maximum.
    pub fn process(&mut self, frame_time: f32) {
        let max_frame_time = self.world.resource::<GameConfig>().max_frame_time;
        let dt = update_world_time(&mut self.world, frame_time.clamp(0.0, max_frame_time));

        for realm in self.realms.iter_mut() {
            realm.process(&mut self.world, &self.assets, dt);
        }
        update_realms(&mut self.realms, &mut self.world);
        self.check_respawn();

        self.post_realms.run(&mut self.world);
    }

    /// Replace a player that finished dying: flag the old one for deletion,
    /// release it, and spawn and take a new one at the respawn point.
    fn check_respawn(&mut self) {
        let (Some(old), Some(main)) = (self.focus(), self.main_realm) else {
            return;
        };
        if !is_player_dead(&self.world, old) {
            return;
        }
        if let Some(mut object) = self.world.get_mut::<GameObject>(old) {
            object.mark_for_deletion();
            object.decrement_reference_count();
        }
        self.respawn_count += 1;
        info!(
            "Player died; respawning at ({:.1}, {:.1})",
            self.respawn_position.x, self.respawn_position.y
        );
        self.spawn_focus(main);
    }

    /// Draw the realm the focus is in, plus the overlay in debug mode.
    pub fn render(&mut self, renderer: &mut dyn RenderBackend) {
        let view = self.world.resource::<CameraRig>().extents();
        let mut settings = self.world.resource::<GameConfig>().render;
        settings.show_debug = self.world.contains_resource::<DebugMode>();
        let position = self.focus_position().unwrap_or_default();
        let fps = self.fps;

        let Some(realm_id) = self.focus_realm().or(self.main_realm) else {
            return;
        };
        let Some(realm) = self.realms.get_mut(realm_id) else {
            return;
        };
        realm.render(&self.world, renderer, view, settings);

        if settings.show_debug {
            renderer.draw_console_text(&format!("Realm {}", realm.name()));
            renderer.draw_console_text(&format!("Pos {:.2}/{:.2}", position.x, position.y));
            renderer.draw_console_text(&format!("FPS {}", fps));
            renderer.draw_console_text(&format!(
                "AO/DO/VI: {}/{}/{}",
                realm.alive_object_count(),
                realm.dead_object_count(),
                realm.visible_object_count()
            ));
        }
    }

    /// Frames per second shown in the debug overlay.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps;
    }

    /// The player the camera follows.
    pub fn focus(&self) -> Option<Entity> {
        self.world.resource::<CameraFocus>().entity
    }

    pub fn focus_position(&self) -> Option<Vector2> {
        self.focus()
            .and_then(|e| self.world.get::<MapPosition>(e))
            .map(|p| p.pos)
    }

    /// Realm whose live list holds the focus.
    pub fn focus_realm(&self) -> Option<RealmId> {
        self.focus().and_then(|e| self.realms.realm_of(&self.world, e))
    }

    /// Realm created by [`Game::initial_spawn`]; players respawn here.
    pub fn main_realm(&self) -> Option<RealmId> {
        self.main_realm
    }

    pub fn respawn_position(&self) -> Vector2 {
        self.respawn_position
    }

    /// Players replaced since the level was spawned.
    pub fn respawn_count(&self) -> u32 {
        self.respawn_count
    }

    pub fn realms(&self) -> &RealmSet {
        &self.realms
    }

    pub fn realms_mut(&mut self) -> &mut RealmSet {
        &mut self.realms
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
