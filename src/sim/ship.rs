//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, MovingBody};
use super::collider::CircleCollider;
use super::pellet::{Pellet, PelletSpec};
use super::vector::angle_to_vector;
use crate::consts::*;
use crate::error::{Result, invalid};
use crate::wrap_angle;

/// Ship handling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipSpec {
    pub radius: f32,
    /// Thrust acceleration (pixels/s²)
    pub acceleration: f32,
    /// Speed cap (pixels/s)
    pub max_velocity: f32,
    /// Turn rate (radians/s)
    pub angular_speed: f32,
    /// Seconds between shots
    pub cooldown: f32,
}

impl Default for ShipSpec {
    fn default() -> Self {
        Self {
            radius: SHIP_RADIUS,
            acceleration: SHIP_ACCELERATION,
            max_velocity: SHIP_MAX_VELOCITY,
            angular_speed: SHIP_ANGULAR_SPEED,
            cooldown: COOLDOWN_TIMER,
        }
    }
}

impl ShipSpec {
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.radius) {
            return Err(invalid("ship radius must be > 0"));
        }
        if !positive(self.acceleration) || !positive(self.max_velocity) {
            return Err(invalid("ship acceleration and max_velocity must be > 0"));
        }
        if !positive(self.angular_speed) {
            return Err(invalid("ship angular_speed must be > 0"));
        }
        if !(self.cooldown.is_finite() && self.cooldown >= 0.0) {
            return Err(invalid("ship cooldown must be >= 0"));
        }
        Ok(())
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: MovingBody,
    /// Heading in radians, kept in [0, 2π)
    facing: f32,
    score: u64,
    fire_cooldown: f32,
    invulnerable_for: f32,
    spec: ShipSpec,
    pellet: PelletSpec,
}

impl Ship {
    /// An active, visible ship at rest at `center`, facing angle zero
    pub fn new(center: Vec2, spec: ShipSpec, pellet: PelletSpec) -> Result<Self> {
        spec.validate()?;
        pellet.validate()?;
        let mut body = MovingBody::new(CircleCollider::new(center, spec.radius)?, Vec2::ZERO);
        body.activate();
        Ok(Self {
            body,
            facing: 0.0,
            score: 0,
            fire_cooldown: 0.0,
            invulnerable_for: 0.0,
            spec,
            pellet,
        })
    }

    #[inline]
    pub fn facing(&self) -> f32 {
        self.facing
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn fire_cooldown(&self) -> f32 {
        self.fire_cooldown
    }

    #[inline]
    pub fn invulnerable_for(&self) -> f32 {
        self.invulnerable_for
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_for > 0.0
    }

    pub fn spec(&self) -> &ShipSpec {
        &self.spec
    }

    /// Accelerate along the facing (`sign` 1.0) or against it (-1.0)
    pub fn thrust(&mut self, dt: f32, sign: f32) {
        let push = angle_to_vector(self.facing) * (self.spec.acceleration * dt * sign);
        self.body.velocity = (self.body.velocity + push).clamp_length_max(self.spec.max_velocity);
    }

    /// Stop dead
    pub fn halt(&mut self) {
        self.body.velocity = Vec2::ZERO;
    }

    /// Turn by `sign * angular_speed * dt`; positive is clockwise on screen
    pub fn rotate(&mut self, dt: f32, sign: f32) {
        self.facing = wrap_angle(self.facing + sign * self.spec.angular_speed * dt);
    }

    pub fn reset_facing(&mut self) {
        self.facing = 0.0;
    }

    /// Fire a pellet from the nose if the gun has cooled down
    pub fn fire(&mut self) -> Option<Pellet> {
        if self.fire_cooldown > 0.0 {
            return None;
        }
        let nose = self.body.center() + angle_to_vector(self.facing) * self.spec.radius;
        self.fire_cooldown = self.spec.cooldown;
        Some(Pellet::launch(nose, self.facing, &self.pellet))
    }

    /// Count down timers, then move if active
    pub fn tick(&mut self, dt: f32) {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.invulnerable_for = (self.invulnerable_for - dt).max(0.0);
        self.body.integrate(dt);
    }

    /// Add to the score and return the new total
    pub fn add_score(&mut self, points: u64) -> u64 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Put the ship back at `center`, stopped, protected for `grace` seconds
    pub fn respawn(&mut self, center: Vec2, grace: f32) {
        self.body.collider.move_to(center);
        self.halt();
        self.invulnerable_for = grace.max(0.0);
    }

    /// Set the remaining invulnerability directly
    #[cfg(test)]
    pub(crate) fn set_invulnerable_for(&mut self, secs: f32) {
        self.invulnerable_for = secs.max(0.0);
    }
}

impl Body for Ship {
    fn body(&self) -> &MovingBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MovingBody {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        self.tick(dt);
    }
}
