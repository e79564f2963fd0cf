//! Populate realms from a [`LevelDescription`].
//!
//! Node names select what gets spawned:
//!
//! | name | object |
//! |------|--------|
//! | `PlayerStart` | no object; sets the respawn point |
//! | `Ledge` | [`ObjectKind::Ledge`] |
//! | `Portal` | [`ObjectKind::Portal`] to the realm named by `target` |
//! | `Floor`, `Solid` | solid [`ObjectKind::StaticArt`] geometry |
//! | known prop names | [`ObjectKind::Prop`], tagged by [`PropTag::for_node_name`] |
//! | anything else | backdrop [`ObjectKind::StaticArt`] drawn from that model |
//!
//! Nodes without a `realm` go to the main realm. Realms named by `realm` or
//! by a portal's `target` are created on first mention.

use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::Vector2;

use crate::components::gameobject::ObjectKind;
use crate::components::ledge::Ledge;
use crate::components::mapposition::MapPosition;
use crate::components::portal::Portal;
use crate::components::prop::{Prop, PropTag};
use crate::realm::{RealmId, RealmSet};
use crate::resources::level::{LevelDescription, LevelNode};

/// What the game needs to know after a level has been spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelLayout {
    pub respawn_position: Vector2,
}

fn realm_for(realms: &mut RealmSet, name: &str) -> RealmId {
    if let Some(id) = realms.find(name) {
        return id;
    }
    let id = realms.add(name);
    if let Some(realm) = realms.get_mut(id) {
        realm.set_indoor(true);
    }
    id
}

fn half_extents(node: &LevelNode) -> Option<(f32, f32)> {
    node.size.map(|[w, h]| (w * 0.5, h * 0.5))
}

pub fn generate_level(
    world: &mut World,
    realms: &mut RealmSet,
    main_realm: RealmId,
    level: &LevelDescription,
) -> Result<LevelLayout, String> {
    let mut layout = LevelLayout {
        respawn_position: Vector2::zero(),
    };
    let mut spawned = 0usize;

    for node in &level.nodes {
        let position = MapPosition::new(node.position[0], node.position[1]);
        let realm_id = match node.realm.as_deref() {
            Some(name) => realm_for(realms, name),
            None => main_realm,
        };

        if node.name == "PlayerStart" {
            layout.respawn_position = position.pos;
            continue;
        }

        let portal_target = match (node.name.as_str(), node.target.as_deref()) {
            ("Portal", Some(target)) => Some(realm_for(realms, target)),
            ("Portal", None) => {
                return Err(format!(
                    "Portal at {:?} in level '{}' has no target realm",
                    node.position, level.name
                ));
            }
            _ => None,
        };

        let realm = realms
            .get_mut(realm_id)
            .ok_or_else(|| format!("Unknown realm {:?}", realm_id))?;

        match node.name.as_str() {
            "Ledge" => {
                realm.spawn(world, ObjectKind::Ledge, (position, Ledge::new()));
            }
            "Portal" => {
                let Some(target) = portal_target else {
                    continue;
                };
                let mut portal = Portal::new(target);
                if let Some((half_width, half_height)) = half_extents(node) {
                    portal.half_width = half_width;
                    portal.half_height = half_height;
                }
                realm.spawn(world, ObjectKind::Portal, (position, portal));
            }
            "Floor" | "Solid" => {
                let (half_width, half_height) = half_extents(node).unwrap_or((0.5, 0.5));
                let prop = Prop::new(node.name.clone(), PropTag::Geometry)
                    .with_half_extents(half_width, half_height);
                realm.spawn(world, ObjectKind::StaticArt, (position, prop));
            }
            name => {
                let (kind, tag) = match PropTag::for_node_name(name) {
                    Some(tag) => (ObjectKind::Prop, tag),
                    None => (ObjectKind::StaticArt, PropTag::Decoration),
                };
                let mut prop = Prop::new(name, tag);
                if let Some((half_width, half_height)) = half_extents(node) {
                    prop = prop.with_half_extents(half_width, half_height);
                }
                realm.spawn(world, kind, (position, prop));
            }
        }
        spawned += 1;
        debug!("Level node '{}' -> realm {:?}", node.name, realm_id);
    }

    info!(
        "Generated level '{}': {} objects across {} realms",
        level.name,
        spawned,
        realms.len()
    );
    Ok(layout)
}
