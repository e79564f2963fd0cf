//! Portal behaviour.
//!
//! - [`process_portal`] runs as the portal's per-tick update: a player
//!   standing in the doorway who presses interact requests a realm change.
//! - [`portal_on_enter`] / [`portal_on_exit`] are the hooks the transfer pass
//!   fires once the change has been applied.
//! - [`arrival_point`] picks where a transferred object lands.

use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::Vector2;

use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::gameobject::{GameObject, ObjectKind};
use crate::components::mapposition::MapPosition;
use crate::components::portal::Portal;
use crate::events::portal::{PortalTransitEvent, TransitKind};
use crate::realm::RealmId;
use crate::resources::input::InputState;
use crate::systems::objects::RealmContext;

pub fn portal_bounds(portal: &Portal, position: Vector2) -> Aabb {
    Aabb::from_center(position, portal.half_width, portal.half_height)
}

pub fn process_portal(world: &mut World, ctx: &RealmContext, entity: Entity) {
    let interact = world
        .get_resource::<InputState>()
        .is_some_and(|input| input.interact.just_pressed);
    if !interact {
        return;
    }
    let (Some(portal), Some(position)) = (world.get::<Portal>(entity), world.get::<MapPosition>(entity))
    else {
        return;
    };
    let doorway = portal_bounds(portal, position.pos);
    let target = portal.target_realm();

    let mut travellers = Vec::new();
    for &other in ctx.objects {
        let Some(object) = world.get::<GameObject>(other) else {
            continue;
        };
        if object.kind() != ObjectKind::Player || object.deletion_flag() || object.is_changing_realm() {
            continue;
        }
        let (Some(collider), Some(at)) = (world.get::<BoxCollider>(other), world.get::<MapPosition>(other))
        else {
            continue;
        };
        if collider.aabb(at.pos).intersects_2d(&doorway) {
            travellers.push((other, object.last_portal()));
        }
    }

    for (traveller, previous) in travellers {
        // Walking back through the pair of the portal we came in by counts as
        // leaving that portal rather than entering this one.
        let returning = previous.filter(|&p| {
            world
                .get::<GameObject>(p)
                .and_then(GameObject::realm)
                .is_some_and(|realm| realm == target)
        });
        let via = returning.unwrap_or(entity);
        if let Some(mut object) = world.get_mut::<GameObject>(traveller) {
            object.request_realm_change(Some(target), Some(via));
            debug!("{:?} requested realm {:?} via portal {:?}", traveller, target, via);
        }
    }
}

pub fn portal_on_enter(world: &mut World, portal: Entity, object: Entity) {
    if let Some(mut p) = world.get_mut::<Portal>(portal) {
        p.occupants += 1;
    }
    world.trigger(PortalTransitEvent {
        portal,
        object,
        kind: TransitKind::Enter,
    });
}

pub fn portal_on_exit(world: &mut World, portal: Entity, object: Entity) {
    if let Some(mut p) = world.get_mut::<Portal>(portal) {
        p.occupants = p.occupants.saturating_sub(1);
    }
    world.trigger(PortalTransitEvent {
        portal,
        object,
        kind: TransitKind::Exit,
    });
}

/// Position of the first portal in `objects` leading back to `from`.
pub fn arrival_point(world: &World, objects: &[Entity], from: RealmId) -> Option<Vector2> {
    objects.iter().find_map(|&e| {
        let portal = world.get::<Portal>(e)?;
        if portal.target_realm() != from {
            return None;
        }
        world.get::<MapPosition>(e).map(|p| p.pos)
    })
}
