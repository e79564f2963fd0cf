//! Per-kind object behaviour.
//!
//! Realms treat every object alike; these functions dispatch on
//! [`ObjectKind`] to the code that initialises, updates and draws it.

use bevy_ecs::prelude::*;
use raylib::prelude::{Color, Vector2, Vector3};

use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::gameobject::{GameObject, ObjectKind};
use crate::components::ledge::Ledge;
use crate::components::mapposition::MapPosition;
use crate::components::player::{PLAYER_HALF_HEIGHT, PLAYER_HALF_WIDTH};
use crate::components::portal::Portal;
use crate::components::prop::{Prop, PropTag};
use crate::components::rigidbody::RigidBody;
use crate::components::skeleton::Skeleton;
use crate::realm::RealmId;
use crate::render::{Light, RenderBackend, RenderLayer};
use crate::systems::player::{self, assets::PlayerAssets};
use crate::systems::portal::{portal_bounds, process_portal};

/// Half size of a ledge's marker and query box.
pub const LEDGE_HALF_EXTENT: f32 = 0.2;

/// Asset bindings resolved once at start-up and shared by every realm.
#[derive(Debug, Clone)]
pub struct ObjectAssets {
    pub player: PlayerAssets,
}

/// What an object may know about the realm processing it.
pub struct RealmContext<'a> {
    pub id: RealmId,
    /// The realm's live list, in record-index order.
    pub objects: &'a [Entity],
    pub kill_plane: f32,
}

/// Attach the behaviour components an object of this kind needs.
pub fn initialize_object(world: &mut World, assets: &ObjectAssets, entity: Entity) {
    let Some(kind) = world.get::<GameObject>(entity).map(GameObject::kind) else {
        return;
    };
    if world.get::<MapPosition>(entity).is_none() {
        world.entity_mut(entity).insert(MapPosition::new(0.0, 0.0));
    }
    match kind {
        ObjectKind::Player => player::initialize_player(world, entity),
        ObjectKind::Ledge => {
            world.entity_mut(entity).insert((
                RigidBody::new(),
                BoxCollider::new(LEDGE_HALF_EXTENT, LEDGE_HALF_EXTENT),
            ));
            if world.get::<Ledge>(entity).is_none() {
                world.entity_mut(entity).insert(Ledge::new());
            }
        }
        ObjectKind::Portal => {
            let extents = world
                .get::<Portal>(entity)
                .map(|p| (p.half_width, p.half_height));
            if let Some((half_width, half_height)) = extents {
                world
                    .entity_mut(entity)
                    .insert((RigidBody::new(), BoxCollider::new(half_width, half_height)));
            }
        }
        ObjectKind::Prop | ObjectKind::StaticArt => {
            let shape = world
                .get::<Prop>(entity)
                .map(|p| (p.tag, p.half_width, p.half_height));
            if let Some((tag, half_width, half_height)) = shape {
                let body = if tag.is_solid() {
                    RigidBody::solid()
                } else {
                    RigidBody::new()
                };
                world
                    .entity_mut(entity)
                    .insert((body, BoxCollider::new(half_width, half_height)));
            }
        }
    }
}

pub fn process_object(
    world: &mut World,
    assets: &ObjectAssets,
    ctx: &RealmContext,
    entity: Entity,
    dt: f32,
) {
    let Some(kind) = world.get::<GameObject>(entity).map(GameObject::kind) else {
        return;
    };
    match kind {
        ObjectKind::Player => player::process_player(world, &assets.player, ctx, entity, dt),
        ObjectKind::Portal => process_portal(world, ctx, entity),
        ObjectKind::Ledge | ObjectKind::Prop | ObjectKind::StaticArt => {}
    }
}

/// World-space box the object draws into, used for culling.
pub fn visual_bounds(world: &World, entity: Entity) -> Option<Aabb> {
    let position = world.get::<MapPosition>(entity)?.pos;
    if let Some(prop) = world.get::<Prop>(entity) {
        return Some(Aabb::from_center(position, prop.half_width, prop.half_height));
    }
    if let Some(portal) = world.get::<Portal>(entity) {
        return Some(portal_bounds(portal, position));
    }
    world.get::<BoxCollider>(entity).map(|c| c.aabb(position))
}

pub fn render_object(
    world: &World,
    renderer: &mut dyn RenderBackend,
    entity: Entity,
    show_colliders: bool,
) {
    let (Some(object), Some(position)) = (
        world.get::<GameObject>(entity),
        world.get::<MapPosition>(entity),
    ) else {
        return;
    };
    renderer.set_object_transform(position.pos);

    match object.kind() {
        ObjectKind::Player => {
            if let Some(skeleton) = world.get::<Skeleton>(entity) {
                renderer.draw_skeleton(
                    skeleton,
                    Vector2::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT),
                    RenderLayer::Player,
                );
            }
        }
        ObjectKind::Ledge => {
            renderer.draw_model(
                "Ledge",
                Vector2::new(LEDGE_HALF_EXTENT, LEDGE_HALF_EXTENT),
                RenderLayer::Props,
            );
        }
        ObjectKind::Portal => {
            if let Some(portal) = world.get::<Portal>(entity) {
                renderer.draw_model(
                    "Portal",
                    Vector2::new(portal.half_width, portal.half_height),
                    RenderLayer::Props,
                );
            }
        }
        ObjectKind::Prop | ObjectKind::StaticArt => {
            if let Some(prop) = world.get::<Prop>(entity) {
                let layer = match (object.kind(), prop.tag) {
                    (ObjectKind::StaticArt, PropTag::Decoration) => RenderLayer::Background,
                    _ => RenderLayer::Props,
                };
                if prop.tag == PropTag::LightSource {
                    renderer.add_light(Light {
                        position: Vector3::new(position.pos.x, position.pos.y, 2.0),
                        color: Color::new(255, 240, 200, 255),
                        intensity: 1.5,
                        falloff: true,
                    });
                }
                renderer.draw_model(
                    &prop.asset,
                    Vector2::new(prop.half_width, prop.half_height),
                    layer,
                );
            }
        }
    }

    if show_colliders && let Some(collider) = world.get::<BoxCollider>(entity) {
        renderer.set_object_transform(position.pos + collider.offset);
        renderer.draw_box(
            Vector2::new(collider.half_width, collider.half_height),
            Color::RED,
            RenderLayer::Overlay,
        );
    }
}
