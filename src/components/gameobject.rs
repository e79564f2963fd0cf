//! Base bookkeeping shared by every simulated object.
//!
//! Each object in a realm is an ECS entity carrying a [`GameObject`]
//! component. The component records which realm the object belongs to and
//! where it sits in that realm's live list, how many external holders keep it
//! alive, whether it is flagged for deletion, and any pending realm change.
//!
//! # Realm record invariant
//!
//! `record_index` is `Some(i)` if and only if the object is registered in
//! exactly one realm and that realm's live list holds it at position `i`.
//! Only [`Realm`](crate::realm::Realm) writes these fields.
//!
//! # Reference counting
//!
//! Holders that keep an [`Entity`] across frames (the game's focus, a
//! camera target) call [`GameObject::increment_reference_count`] on acquire
//! and [`GameObject::decrement_reference_count`] on release. A realm never
//! despawns an object while its count is positive, even after it has been
//! flagged for deletion and removed from the live list.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::Aabb;
use crate::realm::RealmId;

/// What kind of behaviour drives an object. Selects the initialise, process
/// and render paths in [`crate::systems::objects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Player,
    Ledge,
    Portal,
    /// Decorative prop described by a [`Prop`](super::prop::Prop) component.
    Prop,
    /// Level geometry drawn from a model asset.
    StaticArt,
}

/// A queued move to another realm. `target == None` removes the object from
/// simulation without destroying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealmChange {
    pub target: Option<RealmId>,
}

/// Realm membership and lifecycle state shared by every object.
///
/// Position, body and collider live in sibling components. The realm fields
/// are written only by [`Realm`](crate::realm::Realm) registration.
///
/// # Related
///
/// - [`Realm::register_game_object`](crate::realm::Realm::register_game_object)
/// - [`update_realms`](crate::realm::update_realms)
#[derive(Component, Debug, Clone)]
pub struct GameObject {
    kind: ObjectKind,
    pub(crate) realm: Option<RealmId>,
    pub(crate) record_index: Option<usize>,
    reference_count: u32,
    deletion_flag: bool,
    pub(crate) initialized: bool,
    realm_change: Option<RealmChange>,
    last_portal: Option<Entity>,
    pub visual_bounds: Option<Aabb>,
}

impl GameObject {
    /// Unregistered, unreferenced and not yet initialised.
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            realm: None,
            record_index: None,
            reference_count: 0,
            deletion_flag: false,
            initialized: false,
            realm_change: None,
            last_portal: None,
            visual_bounds: None,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Realm the object was last registered in.
    pub fn realm(&self) -> Option<RealmId> {
        self.realm
    }

    /// Position in the owning realm's live list, if registered.
    pub fn record_index(&self) -> Option<usize> {
        self.record_index
    }

    pub fn is_registered(&self) -> bool {
        self.record_index.is_some()
    }

    /// Set once the realm has run the kind's initialisation.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Holders that keep the object alive after it is flagged for deletion.
    pub fn reference_count(&self) -> u32 {
        self.reference_count
    }

    pub fn increment_reference_count(&mut self) {
        self.reference_count += 1;
    }

    /// # Panics
    ///
    /// Panics when the count is already zero; releasing a reference that was
    /// never taken is a programming error.
    pub fn decrement_reference_count(&mut self) {
        assert!(
            self.reference_count > 0,
            "reference count underflow on {:?} object",
            self.kind
        );
        self.reference_count -= 1;
    }

    pub fn deletion_flag(&self) -> bool {
        self.deletion_flag
    }

    /// Flag the object for removal on the next realm cleanup pass.
    pub fn mark_for_deletion(&mut self) {
        self.deletion_flag = true;
    }

    pub fn is_changing_realm(&self) -> bool {
        self.realm_change.is_some()
    }

    /// Request a move to `target` on the next transfer pass. `via_portal`
    /// becomes the last portal whose hooks fire once the move is applied.
    pub fn request_realm_change(&mut self, target: Option<RealmId>, via_portal: Option<Entity>) {
        self.realm_change = Some(RealmChange { target });
        self.last_portal = via_portal;
    }

    /// Consume the pending change request.
    pub fn take_realm_change(&mut self) -> Option<RealmChange> {
        self.realm_change.take()
    }

    /// Portal of the most recent realm change request. Kept after the move
    /// so walking back through its pair fires this portal's exit hook.
    pub fn last_portal(&self) -> Option<Entity> {
        self.last_portal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_object_is_unregistered_and_unreferenced() {
        let object = GameObject::new(ObjectKind::Prop);
        assert_eq!(object.kind(), ObjectKind::Prop);
        assert!(!object.is_registered());
        assert!(!object.is_initialized());
        assert_eq!(object.reference_count(), 0);
        assert!(!object.deletion_flag());
        assert!(!object.is_changing_realm());
    }

    #[test]
    fn reference_count_round_trip() {
        let mut object = GameObject::new(ObjectKind::Player);
        object.increment_reference_count();
        object.increment_reference_count();
        object.decrement_reference_count();
        assert_eq!(object.reference_count(), 1);
    }

    #[test]
    #[should_panic(expected = "reference count underflow")]
    fn decrement_below_zero_panics() {
        let mut object = GameObject::new(ObjectKind::Ledge);
        object.decrement_reference_count();
    }

    #[test]
    fn realm_change_is_consumed_once() {
        let mut object = GameObject::new(ObjectKind::Player);
        let mut world = World::new();
        let portal = world.spawn_empty().id();
        object.request_realm_change(Some(RealmId(2)), Some(portal));
        assert!(object.is_changing_realm());

        let change = object.take_realm_change();
        assert_eq!(change, Some(RealmChange { target: Some(RealmId(2)) }));
        assert!(!object.is_changing_realm());
        // The portal stays recorded so a later return trip can exit it.
        assert_eq!(object.last_portal(), Some(portal));
    }
}
