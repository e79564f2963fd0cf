use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector2,
    pub max: Vector2,
}

impl Aabb {
    /// Build from two corners in any order.
    pub fn new(a: Vector2, b: Vector2) -> Self {
        Self {
            min: Vector2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vector2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Degenerate box at a single point.
    pub fn point(p: Vector2) -> Self {
        Self { min: p, max: p }
    }

    pub fn from_center(center: Vector2, half_width: f32, half_height: f32) -> Self {
        Self::new(
            Vector2::new(center.x - half_width, center.y - half_height),
            Vector2::new(center.x + half_width, center.y + half_height),
        )
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Overlap test on the x/y plane. Touching edges count as intersecting.
    pub fn intersects_2d(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn contains_point(&self, point: Vector2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Box collision geometry centred on the owner's [`MapPosition`](super::mapposition::MapPosition).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub half_width: f32,
    pub half_height: f32,
    pub offset: Vector2,
}

impl BoxCollider {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            half_width,
            half_height,
            offset: Vector2::zero(),
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// World-space bounds for an owner at `position`.
    pub fn aabb(&self, position: Vector2) -> Aabb {
        Aabb::from_center(position + self.offset, self.half_width, self.half_height)
    }

    pub fn overlaps(&self, position: Vector2, other: &Self, other_position: Vector2) -> bool {
        let a = self.aabb(position);
        let b = other.aabb(other_position);
        a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
    }
}
