//! Pellets fired by the ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, MovingBody};
use super::collider::CircleCollider;
use super::vector::{VectorExt, angle_to_vector};
use crate::consts::{PELLET_RADIUS, PELLET_SPEED};
use crate::error::{Result, invalid};

/// Pellet speed and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PelletSpec {
    pub speed: f32,
    pub radius: f32,
}

impl Default for PelletSpec {
    fn default() -> Self {
        Self {
            speed: PELLET_SPEED,
            radius: PELLET_RADIUS,
        }
    }
}

impl PelletSpec {
    pub fn validate(&self) -> Result<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(invalid("pellet speed must be > 0"));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid("pellet radius must be > 0"));
        }
        Ok(())
    }
}

/// A pellet travelling in a straight line until it hits something or
/// leaves the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pellet {
    pub body: MovingBody,
}

impl Pellet {
    /// Pellet at `anchor` heading along `direction` (normalized here)
    pub fn new(anchor: Vec2, direction: Vec2, spec: &PelletSpec) -> Result<Self> {
        let direction = direction.unit()?;
        let collider = CircleCollider::new(anchor, spec.radius)?;
        Ok(Self::from_parts(collider, direction * spec.speed))
    }

    /// Pellet at `anchor` heading along the angle `heading` (radians)
    pub fn launch(anchor: Vec2, heading: f32, spec: &PelletSpec) -> Self {
        let collider = CircleCollider::from_validated(anchor, spec.radius);
        Self::from_parts(collider, angle_to_vector(heading) * spec.speed)
    }

    fn from_parts(collider: CircleCollider, velocity: Vec2) -> Self {
        let mut body = MovingBody::new(collider, velocity);
        body.activate();
        Self { body }
    }
}

impl Body for Pellet {
    fn body(&self) -> &MovingBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MovingBody {
        &mut self.body
    }
}
