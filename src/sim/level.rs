//! Level state
//!
//! A level owns the ship, the live asteroids and pellets, and the remaining
//! lives. It is advanced one frame at a time by [`super::tick::tick`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, SizeClass};
use super::body::Arena;
use super::pellet::Pellet;
use super::ship::Ship;
use super::snapshot::Snapshot;
use super::tick::{TickInput, tick};
use crate::error::Result;
use crate::tuning::Tuning;

/// Random placement attempts per asteroid before falling back to a corner
const SPAWN_ATTEMPTS: usize = 64;

/// Whether the level is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Waiting to start, or paused by the player. Nothing moves.
    Paused,
    /// Active gameplay
    Running,
}

/// Things that happened during a frame, for audio and presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PelletFired,
    AsteroidDestroyed { size: SizeClass, points: u64 },
    ShipLostLife { lives_left: u32 },
    LevelCleared,
    GameOver,
    /// Emitted by the session when a new level is built
    LevelStarted { number: u32 },
}

/// How many asteroids of each class a level starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AsteroidCounts {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl AsteroidCounts {
    /// Counts for a difficulty rating: d/2 small, d/5 medium, d/7 large
    pub fn for_difficulty(difficulty: u32) -> Self {
        Self {
            small: difficulty / 2,
            medium: difficulty / 5,
            large: difficulty / 7,
        }
    }

    pub fn total(&self) -> u32 {
        self.small + self.medium + self.large
    }

    fn iter(&self) -> impl Iterator<Item = SizeClass> {
        std::iter::repeat_n(SizeClass::Large, self.large as usize)
            .chain(std::iter::repeat_n(SizeClass::Medium, self.medium as usize))
            .chain(std::iter::repeat_n(SizeClass::Small, self.small as usize))
    }
}

/// One level of play
#[derive(Debug, Clone)]
pub struct Level {
    pub(super) tuning: Tuning,
    pub(super) arena: Arena,
    /// The player's ship
    pub ship: Ship,
    /// Live asteroids, in spawn order
    pub asteroids: Vec<Asteroid>,
    /// Live pellets, in firing order
    pub pellets: Vec<Pellet>,
    pub(super) lives: u32,
    pub(super) phase: LevelPhase,
    /// Frames simulated while running
    pub(super) frame: u64,
    pub(super) events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
    pub(super) cleared_reported: bool,
    pub(super) over_reported: bool,
}

impl Level {
    /// An empty, paused level. The ship is moved to the arena center, halted,
    /// and turned to face angle zero.
    pub fn new(tuning: &Tuning, ship: Ship, lives: u32, seed: u64) -> Result<Self> {
        tuning.validate()?;
        Ok(Self::from_validated(tuning, ship, lives, seed))
    }

    /// A paused level populated with randomly placed asteroids
    pub fn generate(
        tuning: &Tuning,
        ship: Ship,
        lives: u32,
        counts: AsteroidCounts,
        seed: u64,
    ) -> Result<Self> {
        let mut level = Self::new(tuning, ship, lives, seed)?;
        level.spawn_field(counts);
        Ok(level)
    }

    /// Build from a tuning that has already passed `Tuning::validate`
    pub(super) fn from_validated(tuning: &Tuning, mut ship: Ship, lives: u32, seed: u64) -> Self {
        let arena = Arena {
            width: tuning.arena_width,
            height: tuning.arena_height,
        };

        ship.respawn(arena.center(), 0.0);
        ship.reset_facing();
        ship.body.activate();

        Self {
            tuning: tuning.clone(),
            arena,
            ship,
            asteroids: Vec::new(),
            pellets: Vec::new(),
            lives,
            phase: LevelPhase::Paused,
            frame: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            cleared_reported: false,
            over_reported: false,
        }
    }

    /// Add randomly placed asteroids, fully inside the arena and clear of
    /// the ship's spawn point
    pub fn spawn_field(&mut self, counts: AsteroidCounts) {
        for size in counts.iter() {
            let mut asteroid =
                Asteroid::new(size, self.arena.center(), &self.tuning.asteroids, &mut self.rng);
            let point = self.spawn_point(asteroid.body.radius());
            asteroid.body.collider.move_to(point);
            self.asteroids.push(asteroid);
        }
        log::debug!(
            "Spawned {} asteroids ({} small, {} medium, {} large)",
            counts.total(),
            counts.small,
            counts.medium,
            counts.large
        );
    }

    fn spawn_point(&mut self, radius: f32) -> Vec2 {
        let center = self.arena.center();
        let min_distance = self.tuning.spawn_clearance + radius;
        for _ in 0..SPAWN_ATTEMPTS {
            let point = Vec2::new(
                self.rng.random_range(radius..self.arena.width - radius),
                self.rng.random_range(radius..self.arena.height - radius),
            );
            if point.distance(center) >= min_distance {
                return point;
            }
        }
        log::warn!("No clear spawn point for radius {radius}, using the corner");
        Vec2::splat(radius)
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        tick(self, input, dt);
    }

    /// Flip between paused and running
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            LevelPhase::Paused => LevelPhase::Running,
            LevelPhase::Running => LevelPhase::Paused,
        };
        log::debug!("Level {:?}", self.phase);
    }

    #[inline]
    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == LevelPhase::Paused
    }

    /// Every asteroid destroyed
    #[inline]
    pub fn win(&self) -> bool {
        self.asteroids.is_empty()
    }

    /// No lives left
    #[inline]
    pub fn lose(&self) -> bool {
        self.lives == 0
    }

    #[inline]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.ship.score()
    }

    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Frames simulated while running
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Events from the most recent call to `tick`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Draw state for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
