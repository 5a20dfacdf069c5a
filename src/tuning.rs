//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Levels and sessions receive a
//! validated copy at construction, so nothing in the simulation reads global
//! state. Tuning can be loaded from a JSON file where missing fields fall
//! back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, invalid};
use crate::sim::asteroid::{AsteroidTable, SplitPolicy};
use crate::sim::body::{Arena, BoundaryPolicy};
use crate::sim::pellet::PelletSpec;
use crate::sim::ship::ShipSpec;

/// All tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Lives ===
    pub lives: u32,
    /// Grace period after losing a life (seconds)
    pub invulnerability_secs: f32,
    /// Frames between visibility flips while invulnerable
    pub blink_frames: u32,

    // === Entities ===
    pub ship: ShipSpec,
    pub pellet: PelletSpec,
    pub asteroids: AsteroidTable,
    pub split_policy: SplitPolicy,
    pub ship_boundary: BoundaryPolicy,

    // === Progression ===
    pub starting_difficulty: u32,
    /// Minimum distance between a spawned asteroid and the arena center
    pub spawn_clearance: f32,

    // === Loop ===
    /// Interval the frame governor waits for before stepping (seconds)
    pub frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            lives: STARTING_LIVES,
            invulnerability_secs: INVULNERABILITY_SECS,
            blink_frames: BLINK_FRAMES,

            ship: ShipSpec::default(),
            pellet: PelletSpec::default(),
            asteroids: AsteroidTable::default(),
            split_policy: SplitPolicy::None,
            ship_boundary: BoundaryPolicy::Bounce,

            starting_difficulty: STARTING_DIFFICULTY,
            spawn_clearance: SPAWN_CLEARANCE,

            frame_dt: FRAME_DT,
        }
    }
}

impl Tuning {
    /// The arena described by this tuning
    pub fn arena(&self) -> Result<Arena> {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Check every parameter; the simulation assumes this has passed
    pub fn validate(&self) -> Result<()> {
        let arena = self.arena()?;
        self.ship.validate()?;
        self.pellet.validate()?;
        self.asteroids.validate()?;

        if self.lives == 0 {
            return Err(invalid("lives must be at least 1"));
        }
        if !(self.invulnerability_secs.is_finite() && self.invulnerability_secs >= 0.0) {
            return Err(invalid("invulnerability_secs must be >= 0"));
        }
        if self.blink_frames == 0 {
            return Err(invalid("blink_frames must be at least 1"));
        }
        if !(self.frame_dt.is_finite() && self.frame_dt > 0.0) {
            return Err(invalid("frame_dt must be > 0"));
        }
        if !(self.spawn_clearance.is_finite() && self.spawn_clearance >= 0.0) {
            return Err(invalid("spawn_clearance must be >= 0"));
        }

        let shortest_side = arena.width.min(arena.height);
        if 2.0 * self.ship.radius >= shortest_side {
            return Err(invalid("arena is too small for the ship"));
        }
        if 2.0 * self.asteroids.max_radius() >= shortest_side {
            return Err(invalid("arena is too small for the largest asteroid"));
        }
        if self.starting_difficulty < 2 {
            return Err(invalid("starting_difficulty must be at least 2"));
        }
        if self.spawn_clearance >= shortest_side / 2.0 {
            return Err(invalid("spawn_clearance must be less than half the arena"));
        }
        Ok(())
    }

    /// Parse JSON and validate
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON tuning file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
