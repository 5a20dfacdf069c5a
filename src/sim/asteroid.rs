//! Asteroids and their size-class table

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, MovingBody};
use super::collider::CircleCollider;
use super::vector::angle_to_vector;
use crate::error::{Result, invalid};

/// Asteroid size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// The class a destroyed asteroid breaks into under cascading split
    pub fn smaller(self) -> Option<SizeClass> {
        match self {
            SizeClass::Large => Some(SizeClass::Medium),
            SizeClass::Medium => Some(SizeClass::Small),
            SizeClass::Small => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }
}

/// Fixed properties of one size class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeSpec {
    pub min_radius: f32,
    pub max_radius: f32,
    /// Speed magnitude (pixels/s); heading is random
    pub speed: f32,
    /// Score awarded when destroyed
    pub points: u64,
}

impl SizeSpec {
    fn validate(&self, class: SizeClass) -> Result<()> {
        let name = class.as_str();
        if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
            return Err(invalid(format!("{name} asteroid min_radius must be > 0")));
        }
        if !(self.max_radius.is_finite() && self.max_radius >= self.min_radius) {
            return Err(invalid(format!(
                "{name} asteroid max_radius must be >= min_radius"
            )));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(invalid(format!("{name} asteroid speed must be >= 0")));
        }
        Ok(())
    }
}

/// Size-class table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidTable {
    pub small: SizeSpec,
    pub medium: SizeSpec,
    pub large: SizeSpec,
}

impl Default for AsteroidTable {
    fn default() -> Self {
        Self {
            small: SizeSpec {
                min_radius: 10.0,
                max_radius: 10.0,
                speed: 70.0,
                points: 100,
            },
            medium: SizeSpec {
                min_radius: 20.0,
                max_radius: 40.0,
                speed: 50.0,
                points: 50,
            },
            large: SizeSpec {
                min_radius: 30.0,
                max_radius: 60.0,
                speed: 25.0,
                points: 20,
            },
        }
    }
}

impl AsteroidTable {
    pub fn get(&self, size: SizeClass) -> &SizeSpec {
        match size {
            SizeClass::Small => &self.small,
            SizeClass::Medium => &self.medium,
            SizeClass::Large => &self.large,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for class in SizeClass::ALL {
            self.get(class).validate(class)?;
        }
        Ok(())
    }

    /// Largest radius any asteroid can have
    pub fn max_radius(&self) -> f32 {
        SizeClass::ALL
            .iter()
            .map(|c| self.get(*c).max_radius)
            .fold(0.0, f32::max)
    }
}

/// What a destroyed asteroid leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitPolicy {
    /// Destroyed asteroids vanish
    #[default]
    None,
    /// Optional enhancement: large -> two medium -> two small -> nothing
    Cascade,
}

/// Children spawned per destroyed asteroid under `SplitPolicy::Cascade`
pub const CASCADE_CHILDREN: usize = 2;

/// An asteroid drifting through the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: MovingBody,
    size: SizeClass,
    point_value: u64,
    /// Seed for the presentation layer's silhouette variation
    pub silhouette_seed: u32,
}

impl Asteroid {
    /// Spawn an asteroid with a random heading and a radius drawn from its
    /// class's range. `table` must already be validated.
    pub fn new<R: Rng>(
        size: SizeClass,
        center: Vec2,
        table: &AsteroidTable,
        rng: &mut R,
    ) -> Self {
        let spec = table.get(size);
        let degrees = rng.random_range(0..360u32) as f32;
        let velocity = angle_to_vector(degrees.to_radians()) * spec.speed;
        let radius = if spec.max_radius > spec.min_radius {
            rng.random_range(spec.min_radius..=spec.max_radius)
        } else {
            spec.min_radius
        };

        let mut body = MovingBody::new(CircleCollider::from_validated(center, radius), velocity);
        body.activate();
        Self {
            body,
            size,
            point_value: spec.points,
            silhouette_seed: rng.random(),
        }
    }

    /// Place an asteroid with an explicit radius and velocity. The radius
    /// must be positive.
    pub fn with_velocity(
        size: SizeClass,
        center: Vec2,
        radius: f32,
        velocity: Vec2,
        table: &AsteroidTable,
    ) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(invalid(format!("asteroid radius must be > 0, got {radius}")));
        }
        let mut body = MovingBody::new(CircleCollider::new(center, radius)?, velocity);
        body.activate();
        Ok(Self {
            body,
            size,
            point_value: table.get(size).points,
            silhouette_seed: 0,
        })
    }

    #[inline]
    pub fn size(&self) -> SizeClass {
        self.size
    }

    /// Score awarded for destroying this asteroid
    #[inline]
    pub fn point_value(&self) -> u64 {
        self.point_value
    }

    /// Asteroids to add to the arena when this one is destroyed
    pub fn split<R: Rng>(
        &self,
        policy: SplitPolicy,
        table: &AsteroidTable,
        rng: &mut R,
    ) -> Vec<Asteroid> {
        match (policy, self.size.smaller()) {
            (SplitPolicy::Cascade, Some(child)) => (0..CASCADE_CHILDREN)
                .map(|_| Asteroid::new(child, self.body.center(), table, rng))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Body for Asteroid {
    fn body(&self) -> &MovingBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MovingBody {
        &mut self.body
    }
}
