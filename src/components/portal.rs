//! Doorways between realms.
//!
//! A [`Portal`] lives in its source realm and names a target realm. Objects
//! that walk through it request a realm change with the portal recorded as
//! their last portal; once the transfer pass applies the move, the portal's
//! enter or exit hook fires depending on which side the object arrived at.

use bevy_ecs::prelude::Component;

use crate::realm::RealmId;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Portal {
    pub target: RealmId,
    /// Objects currently on the far side of this portal.
    pub occupants: u32,
    pub half_width: f32,
    pub half_height: f32,
}

impl Portal {
    pub fn new(target: RealmId) -> Self {
        Self {
            target,
            occupants: 0,
            half_width: 0.5,
            half_height: 1.0,
        }
    }

    pub fn target_realm(&self) -> RealmId {
        self.target
    }
}
