//! Player controller driven through a realm with real physics.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use cereal_adventure::components::gameobject::{GameObject, ObjectKind};
use cereal_adventure::components::ledge::Ledge;
use cereal_adventure::components::mapposition::MapPosition;
use cereal_adventure::components::player::Player;
use cereal_adventure::components::prop::{Prop, PropTag};
use cereal_adventure::components::rigidbody::RigidBody;
use cereal_adventure::events::audio::SoundCue;
use cereal_adventure::fsm::{ArmsState, LegsState};
use cereal_adventure::realm::{Realm, RealmId};
use cereal_adventure::resources::assetregistry::AssetRegistry;
use cereal_adventure::resources::input::InputState;
use cereal_adventure::systems::objects::ObjectAssets;
use cereal_adventure::systems::player::assets::PlayerAssets;
use cereal_adventure::systems::player::is_player_dead;

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

struct Fixture {
    world: World,
    realm: Realm,
    assets: ObjectAssets,
}

impl Fixture {
    fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(InputState::default());
        world.init_resource::<Messages<SoundCue>>();
        let mut realm = Realm::new(RealmId(0), "Kitchen");
        realm.kill_plane = -30.0;
        let assets = ObjectAssets {
            player: PlayerAssets::configure(&AssetRegistry::with_defaults())
                .expect("default assets"),
        };
        Self {
            world,
            realm,
            assets,
        }
    }

    fn floor(&mut self) -> Entity {
        self.realm.spawn(
            &mut self.world,
            ObjectKind::StaticArt,
            (
                MapPosition::new(0.0, -0.5),
                Prop::new("Floor", PropTag::Geometry).with_half_extents(50.0, 0.5),
            ),
        )
    }

    fn ledge(&mut self, x: f32, y: f32) -> Entity {
        self.realm.spawn(
            &mut self.world,
            ObjectKind::Ledge,
            (MapPosition::new(x, y), Ledge::new()),
        )
    }

    fn player(&mut self, x: f32, y: f32) -> Entity {
        self.realm
            .spawn(&mut self.world, ObjectKind::Player, MapPosition::new(x, y))
    }

    fn tick(&mut self, frames: usize) {
        for _ in 0..frames {
            self.realm.process(&mut self.world, &self.assets, DT);
        }
    }

    fn input(&mut self) -> Mut<'_, InputState> {
        self.world.resource_mut::<InputState>()
    }

    fn state(&self, player: Entity) -> &Player {
        self.world.get::<Player>(player).expect("player component")
    }

    fn position(&self, entity: Entity) -> Vector2 {
        self.world.get::<MapPosition>(entity).expect("position").pos
    }

    fn drain_cues(&mut self) -> Vec<SoundCue> {
        self.world
            .resource_mut::<Messages<SoundCue>>()
            .drain()
            .collect()
    }
}

/// Player dropped above a ledge and left to fall onto it.
fn hanging_fixture() -> (Fixture, Entity, Entity) {
    let mut fx = Fixture::new();
    fx.floor();
    let ledge = fx.ledge(0.0, 6.0);
    let player = fx.player(0.0, 8.0);
    fx.tick(90);
    (fx, player, ledge)
}

#[test]
fn falling_player_catches_the_ledge() {
    let (fx, player, ledge) = hanging_fixture();
    let state = fx.state(player);
    assert!(state.is_hanging());
    assert_eq!(state.grip.map(|g| g.ledge), Some(ledge));
    assert_eq!(state.legs_state, LegsState::Hanging);
    assert_eq!(state.arms_state, ArmsState::Hanging);

    let pos = fx.position(player);
    assert!(approx_eq(pos.x, 0.0));
    assert!(approx_eq(pos.y, 5.0));
    assert!(fx.world.get::<RigidBody>(player).unwrap().frozen);
}

#[test]
fn pressing_down_lets_go() {
    let (mut fx, player, _) = hanging_fixture();
    fx.input().down.set(true);
    fx.tick(1);

    let state = fx.state(player);
    assert!(!state.is_hanging());
    assert!(!state.grip_cooldown.ready());
    assert!(!fx.world.get::<RigidBody>(player).unwrap().frozen);
}

#[test]
fn destroyed_ledge_releases_the_grip() {
    let (mut fx, player, ledge) = hanging_fixture();
    fx.world
        .get_mut::<GameObject>(ledge)
        .unwrap()
        .mark_for_deletion();
    fx.tick(1);

    assert!(fx.world.get_entity(ledge).is_err());
    assert!(!fx.state(player).is_hanging());
    assert!(!fx.world.get::<RigidBody>(player).unwrap().frozen);
}

#[test]
fn launch_is_armed_then_fired_on_the_next_tick() {
    let (mut fx, player, _) = hanging_fixture();
    fx.input().launch.set(true);
    fx.tick(1);
    let state = fx.state(player);
    assert!(state.is_hanging());
    assert!(state.launching);
    assert_eq!(state.arms_state, ArmsState::Launching);

    fx.input().launch.set(false);
    fx.tick(1);
    assert!(!fx.state(player).is_hanging());
    assert!(fx.world.get::<RigidBody>(player).unwrap().velocity.y > 0.0);
}

#[test]
fn equidistant_ledges_go_to_the_first_registered() {
    let mut fx = Fixture::new();
    fx.floor();
    let left = fx.ledge(-0.5, 6.0);
    fx.ledge(0.5, 6.0);
    let player = fx.player(0.0, 8.0);
    fx.tick(90);

    assert_eq!(fx.state(player).grip.map(|g| g.ledge), Some(left));
    assert!(approx_eq(fx.position(player).x, -0.5));
}

#[test]
fn standing_still_is_silent() {
    let mut fx = Fixture::new();
    fx.floor();
    let player = fx.player(0.0, 1.0);
    fx.tick(60);

    assert!(fx.drain_cues().is_empty());
    let state = fx.state(player);
    assert_eq!(state.health, state.tuning.health);
    assert_eq!(state.legs_state, LegsState::Idle);
}

#[test]
fn running_plays_footsteps() {
    let mut fx = Fixture::new();
    fx.floor();
    let player = fx.player(0.0, 1.0);
    fx.tick(30);
    fx.drain_cues();

    for _ in 0..120 {
        fx.input().right.set(true);
        fx.tick(1);
    }
    let cues = fx.drain_cues();
    assert!(cues.len() >= 3, "only {} footsteps", cues.len());
    assert!(cues.iter().all(|c| c.clip.starts_with("Footstep")));
    assert_eq!(fx.state(player).legs_state, LegsState::Running);
    assert!(fx.position(player).x > 5.0);
}

#[test]
fn hard_landing_hurts() {
    let mut fx = Fixture::new();
    fx.floor();
    let player = fx.player(0.0, 20.0);
    fx.tick(150);

    let state = fx.state(player);
    assert!(state.alive);
    assert!(state.health < state.tuning.health);
    assert!(state.health > 0.0);
    let damage_clip = fx.assets.player.damage_impact.name.clone();
    assert!(fx.drain_cues().iter().any(|c| c.clip == damage_clip));
}

#[test]
fn lethal_landing_plays_dying_then_reports_dead() {
    let mut fx = Fixture::new();
    fx.floor();
    let player = fx.player(0.0, 20.0);
    fx.tick(1);
    fx.world.get_mut::<Player>(player).unwrap().health = 1.0;
    fx.tick(100);

    let state = fx.state(player);
    assert!(!state.alive);
    assert_eq!(state.arms_state, ArmsState::Dying);

    fx.tick(150);
    assert!(is_player_dead(&fx.world, player));
}

#[test]
fn falling_out_of_the_world_is_fatal() {
    let mut fx = Fixture::new();
    fx.realm.kill_plane = -5.0;
    let player = fx.player(0.0, 0.0);
    assert!(!is_player_dead(&fx.world, player));
    fx.tick(120);

    let state = fx.state(player);
    assert!(state.fell_out);
    assert_eq!(state.health, 0.0);
    assert!(is_player_dead(&fx.world, player));
}
