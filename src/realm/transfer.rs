//! Moving objects between realms.
//!
//! Objects never move themselves. They call
//! [`GameObject::request_realm_change`] during their update, and
//! [`update_realms`] applies every pending request once all realms have been
//! processed. The pass runs in two phases so that a transfer can never be
//! seen half-done by a realm still iterating its live list:
//!
//! 1. scan every realm's live list and collect the requests;
//! 2. apply them: deregister from the source, register in the target (if
//!    any) and fire the hooks of the portal the object went through.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::gameobject::GameObject;
use crate::components::mapposition::MapPosition;
use crate::components::portal::Portal;
use crate::realm::{Realm, RealmId};
use crate::systems::portal::{arrival_point, portal_on_enter, portal_on_exit};

/// Every realm of the loaded level. A realm's id is its index here.
#[derive(Default)]
pub struct RealmSet {
    realms: Vec<Realm>,
}

/// One applied realm change, as reported by [`update_realms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealmTransfer {
    pub object: Entity,
    pub from: RealmId,
    pub to: Option<RealmId>,
}

impl RealmSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty realm and return its id.
    pub fn add(&mut self, name: &str) -> RealmId {
        let id = RealmId(self.realms.len() as u32);
        self.realms.push(Realm::new(id, name));
        id
    }

    /// Id of the realm called `name`, creating it when missing.
    pub fn get_or_add(&mut self, name: &str) -> RealmId {
        match self.find(name) {
            Some(id) => id,
            None => self.add(name),
        }
    }

    /// Id of the realm called `name`.
    pub fn find(&self, name: &str) -> Option<RealmId> {
        self.realms.iter().find(|r| r.name() == name).map(Realm::id)
    }

    /// Realm `id`, or `None` for an id from another set.
    pub fn get(&self, id: RealmId) -> Option<&Realm> {
        self.realms.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: RealmId) -> Option<&mut Realm> {
        self.realms.get_mut(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Realm> {
        self.realms.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Realm> {
        self.realms.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.realms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.realms.is_empty()
    }

    /// Realm currently holding `entity` in its live list.
    pub fn realm_of(&self, world: &World, entity: Entity) -> Option<RealmId> {
        let object = world.get::<GameObject>(entity)?;
        object.is_registered().then_some(object.realm()).flatten()
    }
}

/// Apply every pending realm change. Returns the transfers in the order they
/// were applied.
pub fn update_realms(realms: &mut RealmSet, world: &mut World) -> Vec<RealmTransfer> {
    let mut requests = Vec::new();
    for realm in realms.iter() {
        for &entity in realm.objects() {
            if world
                .get::<GameObject>(entity)
                .is_some_and(GameObject::is_changing_realm)
            {
                requests.push((realm.id(), entity));
            }
        }
    }

    let mut applied = Vec::with_capacity(requests.len());
    for (from, entity) in requests {
        let Some(change) = world
            .get_mut::<GameObject>(entity)
            .and_then(|mut o| o.take_realm_change())
        else {
            continue;
        };
        let via_portal = world.get::<GameObject>(entity).and_then(GameObject::last_portal);

        if let Some(source) = realms.get_mut(from) {
            source.unregister_game_object(world, entity);
        }

        let mut target = change.target;
        if let Some(to) = target {
            match realms.get_mut(to) {
                Some(destination) => {
                    destination.register_game_object(world, entity);
                    if let Some(point) = arrival_point(world, destination.objects(), from)
                        && let Some(mut position) = world.get_mut::<MapPosition>(entity)
                    {
                        position.pos = point;
                    }
                }
                None => {
                    warn!("{:?} requested unknown realm {:?}; left unloaded", entity, to);
                    target = None;
                }
            }
        }
        debug!("{:?} moved from realm {:?} to {:?}", entity, from, target);

        if let (Some(portal), Some(to)) = (via_portal, target) {
            fire_portal_hooks(world, portal, entity, to);
        }

        applied.push(RealmTransfer {
            object: entity,
            from,
            to: target,
        });
    }
    applied
}

fn fire_portal_hooks(world: &mut World, portal: Entity, object: Entity, to: RealmId) {
    let Some(portal_target) = world.get::<Portal>(portal).map(Portal::target_realm) else {
        return;
    };
    let portal_realm = world.get::<GameObject>(portal).and_then(GameObject::realm);
    if to == portal_target {
        portal_on_enter(world, portal, object);
    } else if Some(to) == portal_realm {
        portal_on_exit(world, portal, object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::gameobject::ObjectKind;

    #[test]
    fn realm_ids_are_indices() {
        let mut realms = RealmSet::new();
        let a = realms.add("Kitchen");
        let b = realms.add("Pantry");
        assert_eq!(a, RealmId(0));
        assert_eq!(b, RealmId(1));
        assert_eq!(realms.find("Pantry"), Some(b));
        assert_eq!(realms.get_or_add("Kitchen"), a);
        assert_eq!(realms.get_or_add("Attic"), RealmId(2));
        assert_eq!(realms.len(), 3);
    }

    #[test]
    fn transfer_moves_object_between_live_lists() {
        let mut world = World::new();
        let mut realms = RealmSet::new();
        let a = realms.add("A");
        let b = realms.add("B");

        let entity = world
            .spawn(GameObject::new(ObjectKind::Prop))
            .id();
        realms
            .get_mut(a)
            .expect("realm A")
            .register_game_object(&mut world, entity);
        world
            .get_mut::<GameObject>(entity)
            .expect("object")
            .request_realm_change(Some(b), None);

        let applied = update_realms(&mut realms, &mut world);
        assert_eq!(
            applied,
            vec![RealmTransfer {
                object: entity,
                from: a,
                to: Some(b)
            }]
        );
        assert!(!realms.get(a).expect("A").contains(entity));
        assert!(realms.get(b).expect("B").contains(entity));
        assert_eq!(realms.realm_of(&world, entity), Some(b));
        assert!(!world.get::<GameObject>(entity).expect("object").is_changing_realm());
    }

    #[test]
    fn transfer_to_nothing_unloads_without_destroying() {
        let mut world = World::new();
        let mut realms = RealmSet::new();
        let a = realms.add("A");
        let entity = world
            .spawn(GameObject::new(ObjectKind::Prop))
            .id();
        realms
            .get_mut(a)
            .expect("realm A")
            .register_game_object(&mut world, entity);
        world
            .get_mut::<GameObject>(entity)
            .expect("object")
            .request_realm_change(None, None);

        update_realms(&mut realms, &mut world);
        assert_eq!(realms.get(a).expect("A").alive_object_count(), 0);
        assert!(world.get_entity(entity).is_ok());
        assert_eq!(realms.realm_of(&world, entity), None);
    }

    fn assert_indices_consistent(world: &World, realm: &Realm) {
        for (i, &entity) in realm.objects().iter().enumerate() {
            let object = world.get::<GameObject>(entity).expect("live object");
            assert_eq!(object.record_index(), Some(i));
            assert_eq!(object.realm(), Some(realm.id()));
        }
    }

    #[test]
    fn every_flagged_object_moves_exactly_once() {
        let mut world = World::new();
        let mut realms = RealmSet::new();
        let a = realms.add("A");
        let b = realms.add("B");

        let objects: Vec<Entity> = (0..5)
            .map(|_| world.spawn(GameObject::new(ObjectKind::Prop)).id())
            .collect();
        for &entity in &objects {
            realms
                .get_mut(a)
                .expect("realm A")
                .register_game_object(&mut world, entity);
        }
        // The last one is swapped into slot 1 when the first move vacates it.
        let movers = [objects[1], objects[2], objects[4]];
        for &entity in &movers {
            world
                .get_mut::<GameObject>(entity)
                .expect("object")
                .request_realm_change(Some(b), None);
        }

        let applied = update_realms(&mut realms, &mut world);
        assert_eq!(applied.len(), movers.len());
        for &entity in &movers {
            assert_eq!(applied.iter().filter(|t| t.object == entity).count(), 1);
            assert!(applied.iter().all(|t| t.from == a && t.to == Some(b)));
            assert_eq!(realms.realm_of(&world, entity), Some(b));
        }

        let source = realms.get(a).expect("A");
        let destination = realms.get(b).expect("B");
        assert_eq!(source.alive_object_count(), 2);
        assert!(source.contains(objects[0]) && source.contains(objects[3]));
        assert_eq!(destination.alive_object_count(), 3);
        assert_indices_consistent(&world, source);
        assert_indices_consistent(&world, destination);

        assert!(update_realms(&mut realms, &mut world).is_empty());
    }
}
