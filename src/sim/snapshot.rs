//! Read-only draw state
//!
//! A [`Snapshot`] carries everything a presentation layer needs to draw a
//! frame, without exposing the simulation's mutable state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroid::SizeClass;
use super::level::Level;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipSnapshot {
    pub position: Vec2,
    pub facing: f32,
    pub radius: f32,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSnapshot {
    pub position: Vec2,
    pub radius: f32,
    pub size: SizeClass,
    pub silhouette_seed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PelletSnapshot {
    pub position: Vec2,
    pub radius: f32,
}

/// Everything visible in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub paused: bool,
    pub score: u64,
    pub lives: u32,
    pub won: bool,
    pub lost: bool,
    pub ship: ShipSnapshot,
    pub asteroids: Vec<AsteroidSnapshot>,
    pub pellets: Vec<PelletSnapshot>,
}

impl Snapshot {
    pub fn capture(level: &Level) -> Self {
        let ship = &level.ship;
        Self {
            frame: level.frame(),
            paused: level.is_paused(),
            score: level.score(),
            lives: level.lives(),
            won: level.win(),
            lost: level.lose(),
            ship: ShipSnapshot {
                position: ship.body.center(),
                facing: ship.facing(),
                radius: ship.body.radius(),
                visible: ship.body.visible,
            },
            asteroids: level
                .asteroids
                .iter()
                .filter(|a| a.body.visible)
                .map(|a| AsteroidSnapshot {
                    position: a.body.center(),
                    radius: a.body.radius(),
                    size: a.size(),
                    silhouette_seed: a.silhouette_seed,
                })
                .collect(),
            pellets: level
                .pellets
                .iter()
                .filter(|p| p.body.visible)
                .map(|p| PelletSnapshot {
                    position: p.body.center(),
                    radius: p.body.radius(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::AsteroidCounts;
    use crate::sim::ship::Ship;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_mirrors_level() {
        let tuning = Tuning::default();
        let ship = Ship::new(Vec2::ZERO, tuning.ship, tuning.pellet).unwrap();
        let counts = AsteroidCounts::for_difficulty(10);
        let level = Level::generate(&tuning, ship, 3, counts, 11).unwrap();

        let snap = level.snapshot();
        assert!(snap.paused);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.score, 0);
        assert!(!snap.won && !snap.lost);
        assert_eq!(snap.ship.position, level.arena().center());
        assert_eq!(snap.asteroids.len(), level.asteroids.len());
        assert!(snap.pellets.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let tuning = Tuning::default();
        let ship = Ship::new(Vec2::ZERO, tuning.ship, tuning.pellet).unwrap();
        let level = Level::new(&tuning, ship, 3, 1).unwrap();
        let json = serde_json::to_string(&level.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, level.snapshot());
    }
}
