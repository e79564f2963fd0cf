//! Smoothed follow camera.
//!
//! The rig moves two points toward the focus object with damped springs: the
//! camera position (which fixes the visible rectangle) and the look target
//! (which can lead the position when the player looks up or down). Each
//! spring has its own stiffness and damping ratio per axis.

use bevy_ecs::prelude::{Entity, Resource};
use raylib::prelude::Vector2;

use crate::components::boxcollider::Aabb;

/// Second-order spring pulling `position` toward `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringFollower {
    pub position: Vector2,
    pub velocity: Vector2,
    pub target: Vector2,
    pub stiffness: Vector2,
    /// Damping ratio per axis; 1.0 is critical.
    pub damping: Vector2,
}

impl SpringFollower {
    pub fn new(stiffness: Vector2, damping: Vector2) -> Self {
        Self {
            position: Vector2::zero(),
            velocity: Vector2::zero(),
            target: Vector2::zero(),
            stiffness,
            damping,
        }
    }

    /// Jump straight to `position` with no residual motion.
    pub fn snap_to(&mut self, position: Vector2) {
        self.position = position;
        self.target = position;
        self.velocity = Vector2::zero();
    }

    fn axis(k: f32, zeta: f32, x: f32, v: f32, target: f32, dt: f32) -> (f32, f32) {
        let c = 2.0 * zeta * k.max(0.0).sqrt();
        let a = k * (target - x) - c * v;
        let v = v + a * dt;
        (x + v * dt, v)
    }

    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let (x, vx) = Self::axis(
            self.stiffness.x,
            self.damping.x,
            self.position.x,
            self.velocity.x,
            self.target.x,
            dt,
        );
        let (y, vy) = Self::axis(
            self.stiffness.y,
            self.damping.y,
            self.position.y,
            self.velocity.y,
            self.target.y,
            dt,
        );
        self.position = Vector2::new(x, y);
        self.velocity = Vector2::new(vx, vy);
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraRig {
    pub camera: SpringFollower,
    pub look_target: SpringFollower,
    /// Altitude above the play plane.
    pub distance: f32,
    pub default_distance: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
}

/// The object the camera follows, usually the player the game looks at.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraFocus {
    pub entity: Option<Entity>,
}

/// Vertical look offset applied while the look keys are held.
pub const LOOK_OFFSET: f32 = 5.0;
pub const MIN_CAMERA_DISTANCE: f32 = 1.0;

impl CameraRig {
    pub fn new(distance: f32, fov: f32, aspect: f32) -> Self {
        Self {
            camera: SpringFollower::new(Vector2::new(200.0, 50.0), Vector2::new(0.3, 0.5)),
            look_target: SpringFollower::new(Vector2::new(250.0, 100.0), Vector2::new(0.3, 0.5)),
            distance,
            default_distance: distance,
            fov,
            aspect,
        }
    }

    /// Aim both springs at the focus; `look` shifts the look target vertically.
    pub fn follow(&mut self, focus: Vector2, look: f32) {
        self.camera.target = focus;
        self.look_target.target = focus + Vector2::new(0.0, look);
    }

    pub fn snap_to(&mut self, focus: Vector2) {
        self.camera.snap_to(focus);
        self.look_target.snap_to(focus);
    }

    pub fn update(&mut self, dt: f32) {
        self.camera.update(dt);
        self.look_target.update(dt);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).max(MIN_CAMERA_DISTANCE);
    }

    pub fn reset_zoom(&mut self) {
        self.distance = self.default_distance;
    }

    pub fn position(&self) -> Vector2 {
        self.camera.position
    }

    /// World rectangle visible from the current altitude.
    pub fn extents(&self) -> Aabb {
        let v = (self.fov / 2.0).tan() * self.distance;
        let h = v * self.aspect;
        let c = self.camera.position;
        Aabb::new(Vector2::new(c.x - h, c.y - v), Vector2::new(c.x + h, c.y + v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn extents_follow_fov_and_aspect() {
        let rig = CameraRig::new(10.0, std::f32::consts::FRAC_PI_2, 2.0);
        let view = rig.extents();
        // tan(45deg) * 10 = 10 vertical half extent
        assert!(approx_eq(view.height(), 20.0));
        assert!(approx_eq(view.width(), 40.0));
        assert!(approx_eq(view.center().x, 0.0));
    }

    #[test]
    fn springs_converge_on_focus() {
        let mut rig = CameraRig::new(10.0, 1.0, 1.0);
        rig.follow(Vector2::new(4.0, -2.0), 0.0);
        for _ in 0..600 {
            rig.update(1.0 / 60.0);
        }
        assert!(approx_eq(rig.position().x, 4.0));
        assert!(approx_eq(rig.position().y, -2.0));
    }

    #[test]
    fn look_offset_moves_only_the_look_target() {
        let mut rig = CameraRig::new(10.0, 1.0, 1.0);
        rig.follow(Vector2::zero(), LOOK_OFFSET);
        for _ in 0..600 {
            rig.update(1.0 / 60.0);
        }
        assert!(approx_eq(rig.look_target.position.y, LOOK_OFFSET));
        assert!(approx_eq(rig.position().y, 0.0));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut rig = CameraRig::new(10.0, 1.0, 1.0);
        rig.zoom(-50.0);
        assert_eq!(rig.distance, MIN_CAMERA_DISTANCE);
        rig.reset_zoom();
        assert_eq!(rig.distance, 10.0);
    }
}
