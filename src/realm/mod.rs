//! Realms: the object lifecycle manager.
//!
//! A [`Realm`] owns the live list of objects in one level region, a dead list
//! of deleted objects still referenced elsewhere, and three queues:
//!
//! - **spawn**: created by [`Realm::spawn`], initialised and registered on the
//!   next [`Realm::process`];
//! - **respawn**: previously registered objects re-entering the live list
//!   without being initialised again;
//! - **unload**: objects to deregister without destroying them.
//!
//! # Record index invariant
//!
//! Every live object's [`GameObject::record_index`] equals its position in
//! the live list. Removal swaps the last object into the vacated slot and
//! fixes its index, so both registration and deregistration are O(1).
//! Unregistering an object whose index does not point at itself is a
//! programming error and panics.
//!
//! # Tick order
//!
//! `process` cleans the list, resolves the spawn and respawn queues, updates
//! every live object and finally steps physics, so an object's first update
//! always sees a fully registered realm and physics runs on settled logic.

pub mod transfer;

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::{Color, Vector3};

use crate::components::boxcollider::Aabb;
use crate::components::gameobject::{GameObject, ObjectKind};
use crate::physics::{KinematicPhysics, PhysicsBackend};
use crate::render::{Light, RenderBackend};
use crate::resources::gameconfig::RenderSettings;
use crate::systems::objects::{
    ObjectAssets, RealmContext, initialize_object, process_object, render_object, visual_bounds,
};

pub use transfer::{RealmSet, RealmTransfer, update_realms};

/// Index of a realm inside its [`RealmSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RealmId(pub u32);

/// Capacity of a realm's point light list.
pub const MAX_REALM_LIGHTS: usize = 4;

/// Scene-wide lighting applied before a realm draws its objects.
#[derive(Debug, Clone)]
pub struct RealmLighting {
    pub clear_color: Color,
    pub ambient: Color,
    pub lights: ArrayVec<Light, MAX_REALM_LIGHTS>,
}

impl RealmLighting {
    /// Dim ambient with a blue back light; outdoor realms add a weak sun.
    pub fn standard(indoor: bool) -> Self {
        let mut lights = ArrayVec::new();
        if !indoor {
            lights.push(Light {
                position: Vector3::new(10.0, 10.0, 10.0),
                color: Color::WHITE,
                intensity: 0.3,
                falloff: false,
            });
        }
        lights.push(Light {
            position: Vector3::new(7.0, 1.0, 2.0),
            color: Color::new(43, 209, 252, 255),
            intensity: 4.0,
            falloff: true,
        });
        Self {
            clear_color: Color::new(0, 0, 0, 255),
            ambient: Color::new(153, 128, 128, 255),
            lights,
        }
    }
}

/// One region of the level and the lifecycle of the objects in it.
///
/// Objects enter through the spawn and respawn queues and leave through the
/// unload queue or the deletion flag. The live list is kept dense with
/// swap-remove, so every live object's
/// [`record_index`](GameObject::record_index) equals its position. Objects
/// flagged for deletion wait in the dead list until nobody holds a reference
/// on them.
///
/// # Related
///
/// - [`update_realms`] for moving objects between realms
/// - [`RealmSet`] for the collection the game owns
pub struct Realm {
    id: RealmId,
    name: String,
    indoor: bool,
    objects: Vec<Entity>,
    dead_objects: Vec<Entity>,
    spawn_queue: VecDeque<Entity>,
    respawn_queue: VecDeque<Entity>,
    unload_queue: VecDeque<Entity>,
    physics: Box<dyn PhysicsBackend>,
    visible_object_count: usize,
    pub lighting: RealmLighting,
    /// Height below which the player dies.
    pub kill_plane: f32,
}

impl Realm {
    /// Empty outdoor realm with the built-in kinematic physics.
    pub fn new(id: RealmId, name: &str) -> Self {
        Self::with_physics(id, name, Box::new(KinematicPhysics::new()))
    }

    /// Empty outdoor realm stepping `physics` after its objects.
    pub fn with_physics(id: RealmId, name: &str, physics: Box<dyn PhysicsBackend>) -> Self {
        info!("Created realm '{}' ({:?})", name, id);
        Self {
            id,
            name: name.to_string(),
            indoor: false,
            objects: Vec::new(),
            dead_objects: Vec::new(),
            spawn_queue: VecDeque::new(),
            respawn_queue: VecDeque::new(),
            unload_queue: VecDeque::new(),
            physics,
            visible_object_count: 0,
            lighting: RealmLighting::standard(false),
            kill_plane: f32::NEG_INFINITY,
        }
    }

    pub fn id(&self) -> RealmId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_indoor(&self) -> bool {
        self.indoor
    }

    /// Switch between indoor and outdoor lighting.
    pub fn set_indoor(&mut self, indoor: bool) {
        self.indoor = indoor;
        self.lighting = RealmLighting::standard(indoor);
    }

    /// Live objects in record-index order.
    pub fn objects(&self) -> &[Entity] {
        &self.objects
    }

    /// Objects flagged for deletion that are still referenced.
    pub fn dead_objects(&self) -> &[Entity] {
        &self.dead_objects
    }

    /// Whether `entity` is in the live list.
    pub fn contains(&self, entity: Entity) -> bool {
        self.objects.contains(&entity)
    }

    pub fn physics(&self) -> &dyn PhysicsBackend {
        self.physics.as_ref()
    }

    pub fn alive_object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn dead_object_count(&self) -> usize {
        self.dead_objects.len()
    }

    /// Objects drawn by the last [`render`](Self::render).
    pub fn visible_object_count(&self) -> usize {
        self.visible_object_count
    }

    /// Objects spawned but not yet initialised.
    pub fn pending_spawn_count(&self) -> usize {
        self.spawn_queue.len()
    }

    /// Append `entity` to the live list and start tracking its body.
    ///
    /// # Panics
    ///
    /// Panics if the entity has no [`GameObject`] or is already registered.
    pub fn register_game_object(&mut self, world: &mut World, entity: Entity) {
        let index = self.objects.len();
        let Some(mut object) = world.get_mut::<GameObject>(entity) else {
            panic!("cannot register {:?}: no GameObject component", entity);
        };
        assert!(
            object.record_index.is_none(),
            "{:?} is already registered in realm {:?}",
            entity,
            object.realm
        );
        object.realm = Some(self.id);
        object.record_index = Some(index);
        self.objects.push(entity);
        self.physics.register_body(entity);
    }

    /// Remove `entity` from the live list by swapping the last object into
    /// its slot, and stop tracking its body.
    ///
    /// # Panics
    ///
    /// Panics if the entity's record index does not point at itself in this
    /// realm's live list.
    pub fn unregister_game_object(&mut self, world: &mut World, entity: Entity) {
        let index = match world.get::<GameObject>(entity) {
            Some(object) => object.record_index,
            None => panic!("cannot unregister {:?}: no GameObject component", entity),
        };
        let Some(index) = index else {
            panic!("cannot unregister {:?}: not registered", entity);
        };
        assert!(
            self.objects.get(index) == Some(&entity),
            "stale realm record index {} for {:?} in realm '{}'",
            index,
            entity,
            self.name
        );

        self.objects.swap_remove(index);
        if let Some(&moved) = self.objects.get(index)
            && let Some(mut object) = world.get_mut::<GameObject>(moved)
        {
            object.record_index = Some(index);
        }
        if let Some(mut object) = world.get_mut::<GameObject>(entity) {
            object.record_index = None;
        }
        self.physics.remove_body(entity);
    }

    /// Create an object of `kind` from `bundle` and queue it. It is
    /// initialised and registered on the next [`process`](Self::process).
    pub fn spawn(&mut self, world: &mut World, kind: ObjectKind, bundle: impl Bundle) -> Entity {
        let entity = world.spawn((GameObject::new(kind), bundle)).id();
        self.spawn_queue.push_back(entity);
        debug!("Queued {:?} spawn {:?} in realm '{}'", kind, entity, self.name);
        entity
    }

    /// Queue a previously initialised object to re-enter the live list.
    pub fn respawn(&mut self, entity: Entity) {
        self.respawn_queue.push_back(entity);
    }

    /// Queue an object to leave the live list without being destroyed.
    pub fn unload(&mut self, entity: Entity) {
        self.unload_queue.push_back(entity);
    }

    /// Run one tick of the realm.
    ///
    /// # Arguments
    ///
    /// * `world` - the ECS world holding every object's components
    /// * `assets` - bindings the per-kind updates play and emit
    /// * `dt` - scaled tick delta in seconds
    ///
    /// Order: [`clean_object_list`](Self::clean_object_list), initialise and
    /// register queued spawns, re-register respawns, update every live object
    /// and refresh its visual bounds, then step physics.
    pub fn process(&mut self, world: &mut World, assets: &ObjectAssets, dt: f32) {
        self.clean_object_list(world);

        while let Some(entity) = self.spawn_queue.pop_front() {
            if world.get_entity(entity).is_err() {
                continue;
            }
            initialize_object(world, assets, entity);
            self.register_game_object(world, entity);
            if let Some(mut object) = world.get_mut::<GameObject>(entity) {
                object.initialized = true;
            }
        }

        while let Some(entity) = self.respawn_queue.pop_front() {
            let registered = world
                .get::<GameObject>(entity)
                .map(GameObject::is_registered);
            if registered == Some(false) {
                self.register_game_object(world, entity);
            }
        }

        let ctx = RealmContext {
            id: self.id,
            objects: &self.objects,
            kill_plane: self.kill_plane,
        };
        for &entity in &self.objects {
            let bounds = visual_bounds(world, entity);
            let deleted = match world.get_mut::<GameObject>(entity) {
                Some(mut object) => {
                    object.visual_bounds = bounds;
                    object.deletion_flag()
                }
                None => true,
            };
            if !deleted {
                process_object(world, assets, &ctx, entity, dt);
            }
        }

        self.physics.step(world, dt);
    }

    /// Configure lighting and draw every live, non-deleted object.
    ///
    /// With `settings.culling` off every object is drawn; with it on, objects
    /// whose visual bounds miss `view` are skipped.
    pub fn render(
        &mut self,
        world: &World,
        renderer: &mut dyn RenderBackend,
        view: Aabb,
        settings: RenderSettings,
    ) {
        renderer.set_clear_color(self.lighting.clear_color);
        renderer.set_ambient_light(self.lighting.ambient);
        renderer.reset_lights();
        for light in &self.lighting.lights {
            renderer.add_light(*light);
        }
        renderer.set_view(view);

        let mut visible = 0;
        for &entity in &self.objects {
            let Some(object) = world.get::<GameObject>(entity) else {
                continue;
            };
            if object.deletion_flag() {
                continue;
            }
            let in_view = object
                .visual_bounds
                .is_none_or(|bounds| bounds.intersects_2d(&view));
            if settings.culling && !in_view {
                continue;
            }
            render_object(world, renderer, entity, settings.show_debug);
            visible += 1;
        }
        self.visible_object_count = visible;
    }

    /// Three-phase sweep: deleted objects move to the dead list, dead objects
    /// nobody references are despawned, and the unload queue is drained.
    pub fn clean_object_list(&mut self, world: &mut World) {
        let flagged: Vec<Entity> = self
            .objects
            .iter()
            .copied()
            .filter(|&e| world.get::<GameObject>(e).is_some_and(GameObject::deletion_flag))
            .collect();
        for entity in flagged {
            self.unregister_game_object(world, entity);
            self.dead_objects.push(entity);
        }

        let mut i = 0;
        while i < self.dead_objects.len() {
            let entity = self.dead_objects[i];
            let references = world
                .get::<GameObject>(entity)
                .map(GameObject::reference_count)
                .unwrap_or(0);
            if references == 0 {
                world.despawn(entity);
                self.dead_objects.swap_remove(i);
                debug!("Destroyed {:?} in realm '{}'", entity, self.name);
            } else {
                i += 1;
            }
        }

        while let Some(entity) = self.unload_queue.pop_front() {
            let registered_here = world
                .get::<GameObject>(entity)
                .is_some_and(|o| o.is_registered() && o.realm() == Some(self.id));
            if registered_here {
                self.unregister_game_object(world, entity);
            }
        }
    }
}
