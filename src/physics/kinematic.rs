//! Simple kinematic physics: explicit Euler integration of named forces and
//! box-versus-box contact resolution along the axis of least penetration.
//!
//! Only dynamic, unfrozen bodies move. A body resolved upward out of a solid
//! is standing on it; its [`Walker`] reports the surface contact and, on the
//! first tick of contact, the downward speed it landed with.

use bevy_ecs::prelude::*;
use log::trace;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

use super::PhysicsBackend;
use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::walker::Walker;

#[derive(Debug, Default)]
pub struct KinematicPhysics {
    bodies: Vec<Entity>,
    index: FxHashMap<Entity, usize>,
}

/// Result of pushing a body out of one solid.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Contact {
    Floor,
    Ceiling,
    Wall,
}

impl KinematicPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    fn solids(&self, world: &World) -> Vec<(Entity, Aabb)> {
        self.bodies
            .iter()
            .filter_map(|&entity| {
                let body = world.get::<RigidBody>(entity)?;
                if !body.solid {
                    return None;
                }
                let position = world.get::<MapPosition>(entity)?;
                let collider = world.get::<BoxCollider>(entity)?;
                Some((entity, collider.aabb(position.pos)))
            })
            .collect()
    }

    fn step_body(world: &mut World, entity: Entity, solids: &[(Entity, Aabb)], dt: f32) {
        let was_on_surface = match world.get_mut::<Walker>(entity) {
            Some(mut walker) => {
                let was = walker.on_surface;
                walker.on_surface = false;
                walker.landing_speed = None;
                was
            }
            None => false,
        };

        let Some(body) = world.get::<RigidBody>(entity) else {
            return;
        };
        if !body.is_dynamic() || body.frozen {
            return;
        }
        let mut velocity = body.velocity + body.total_acceleration().scale_by(dt);

        let Some(position) = world.get::<MapPosition>(entity) else {
            return;
        };
        let mut pos = position.pos + velocity.scale_by(dt);

        let mut on_surface = false;
        let mut landing_speed = None;
        if let Some(collider) = world.get::<BoxCollider>(entity).copied() {
            for (solid, bounds) in solids {
                if *solid == entity {
                    continue;
                }
                let aabb = collider.aabb(pos);
                let Some((push, contact)) = resolve(&aabb, bounds) else {
                    continue;
                };
                pos += push;
                match contact {
                    Contact::Floor => {
                        if velocity.y < 0.0 {
                            if !was_on_surface {
                                landing_speed = Some(-velocity.y);
                            }
                            velocity.y = 0.0;
                        }
                        on_surface = true;
                    }
                    Contact::Ceiling => velocity.y = velocity.y.min(0.0),
                    Contact::Wall => velocity.x = 0.0,
                }
                trace!("{:?} resolved against {:?}: {:?}", entity, solid, contact);
            }
        }

        if let Some(mut position) = world.get_mut::<MapPosition>(entity) {
            position.pos = pos;
        }
        if let Some(mut body) = world.get_mut::<RigidBody>(entity) {
            body.velocity = velocity;
        }
        if let Some(mut walker) = world.get_mut::<Walker>(entity) {
            walker.on_surface = on_surface;
            walker.landing_speed = landing_speed;
        }
    }
}

/// Minimum translation that separates `body` from `solid`, if they overlap.
fn resolve(body: &Aabb, solid: &Aabb) -> Option<(Vector2, Contact)> {
    let overlap_x = (body.max.x - solid.min.x).min(solid.max.x - body.min.x);
    let overlap_y = (body.max.y - solid.min.y).min(solid.max.y - body.min.y);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    let body_center = body.center();
    let solid_center = solid.center();
    if overlap_y <= overlap_x {
        if body_center.y >= solid_center.y {
            Some((Vector2::new(0.0, solid.max.y - body.min.y), Contact::Floor))
        } else {
            Some((Vector2::new(0.0, solid.min.y - body.max.y), Contact::Ceiling))
        }
    } else if body_center.x >= solid_center.x {
        Some((Vector2::new(solid.max.x - body.min.x, 0.0), Contact::Wall))
    } else {
        Some((Vector2::new(solid.min.x - body.max.x, 0.0), Contact::Wall))
    }
}

impl PhysicsBackend for KinematicPhysics {
    fn register_body(&mut self, entity: Entity) {
        if self.index.contains_key(&entity) {
            return;
        }
        self.index.insert(entity, self.bodies.len());
        self.bodies.push(entity);
    }

    fn remove_body(&mut self, entity: Entity) {
        let Some(i) = self.index.remove(&entity) else {
            return;
        };
        self.bodies.swap_remove(i);
        if let Some(&moved) = self.bodies.get(i) {
            self.index.insert(moved, i);
        }
    }

    fn is_tracking(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn step(&mut self, world: &mut World, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let solids = self.solids(world);
        let bodies = self.bodies.clone();
        for entity in bodies {
            Self::step_body(world, entity, &solids, dt);
        }
    }
}
