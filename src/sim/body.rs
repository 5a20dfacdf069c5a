//! Moving bodies and arena boundary policies
//!
//! Every entity embeds a [`MovingBody`]; the [`Body`] trait gives the level a
//! single way to advance and collide ships, asteroids, and pellets without
//! dynamic dispatch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collider::CircleCollider;
use crate::error::{Result, invalid};

/// The rectangular play area, spanning [0, width) x [0, height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(invalid(format!(
                "arena dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// How a body reacts when it reaches the arena edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Reflect the offending velocity component
    #[default]
    Bounce,
    /// Push back inside and stop on the offending axis
    Clamp,
}

/// A circle that moves with constant velocity between updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingBody {
    pub collider: CircleCollider,
    pub velocity: Vec2,
    /// Inactive bodies do not integrate
    pub active: bool,
    /// Invisible bodies are not drawn but still collide
    pub visible: bool,
}

impl MovingBody {
    /// A new body starts inactive and hidden, like a freshly built game object
    pub fn new(collider: CircleCollider, velocity: Vec2) -> Self {
        Self {
            collider,
            velocity,
            active: false,
            visible: false,
        }
    }

    /// Make the body active and visible
    pub fn activate(&mut self) {
        self.active = true;
        self.visible = true;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.collider.center()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.collider.radius()
    }

    /// Advance position by `velocity * dt` (no-op while inactive)
    pub fn integrate(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.collider.translate(self.velocity * dt);
    }

    /// True if the whole bounding square lies inside the arena
    pub fn in_bounds(&self, arena: &Arena) -> bool {
        let min = self.collider.min_corner();
        let max = self.collider.max_corner();
        let inside = |v: f32, limit: f32| (0.0..limit).contains(&v);
        inside(min.x, arena.width)
            && inside(min.y, arena.height)
            && inside(max.x, arena.width)
            && inside(max.y, arena.height)
    }

    /// Pull the center back to [r, dim - r] and zero velocity on clamped axes
    pub fn clamp(&mut self, arena: &Arena) {
        let r = self.radius();
        let center = self.center();
        // max before min so an arena narrower than the body still yields a value
        let x = center.x.max(r).min(arena.width - r);
        let y = center.y.max(r).min(arena.height - r);
        if x != center.x {
            self.velocity.x = 0.0;
        }
        if y != center.y {
            self.velocity.y = 0.0;
        }
        self.collider.move_to(Vec2::new(x, y));
    }

    /// Reflect velocity on each axis whose bounding edge is past the arena.
    /// Position is left alone, so the body may overlap the edge for a frame.
    pub fn bounce(&mut self, arena: &Arena) {
        let min = self.collider.min_corner();
        let max = self.collider.max_corner();
        if min.x < 0.0 || max.x > arena.width {
            self.velocity.x = -self.velocity.x;
        }
        if min.y < 0.0 || max.y > arena.height {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Apply a boundary policy
    pub fn confine(&mut self, arena: &Arena, policy: BoundaryPolicy) {
        match policy {
            BoundaryPolicy::Bounce => self.bounce(arena),
            BoundaryPolicy::Clamp => self.clamp(arena),
        }
    }
}

/// Capability shared by everything the level simulates
pub trait Body {
    fn body(&self) -> &MovingBody;
    fn body_mut(&mut self) -> &mut MovingBody;

    /// Advance one step. Plain bodies just integrate.
    fn update(&mut self, dt: f32) {
        self.body_mut().integrate(dt);
    }

    fn bounding_circle(&self) -> &CircleCollider {
        &self.body().collider
    }

    fn collides_with<B: Body>(&self, other: &B) -> bool
    where
        Self: Sized,
    {
        self.bounding_circle().intersects(other.bounding_circle())
    }
}
