//! Portal transit notifications.
//!
//! When the realm transfer pass moves an object through a portal, the
//! portal's enter or exit hook runs and a [`PortalTransitEvent`] is
//! triggered. [`log_portal_transit`] is the default observer; it logs the
//! crossing and records it in the [`PortalTransitLog`] resource when present.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitKind {
    /// The object arrived in the portal's target realm.
    Enter,
    /// The object came back to the portal's own realm.
    Exit,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalTransitEvent {
    pub portal: Entity,
    pub object: Entity,
    pub kind: TransitKind,
}

/// Every transit seen by [`log_portal_transit`], oldest first.
#[derive(Resource, Debug, Default)]
pub struct PortalTransitLog {
    pub entries: Vec<PortalTransitEvent>,
}

pub fn log_portal_transit(trigger: On<PortalTransitEvent>, log: Option<ResMut<PortalTransitLog>>) {
    let event = *trigger.event();
    debug!(
        "{:?} {:?} through portal {:?}",
        event.object, event.kind, event.portal
    );
    if let Some(mut log) = log {
        log.entries.push(event);
    }
}
