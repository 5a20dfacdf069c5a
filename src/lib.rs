//! Masteroids - simulation and collision engine for an asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, levels, sessions)
//! - `tuning`: Data-driven game balance
//! - `leaderboard`: End-of-run top ten table
//! - `error`: Error type shared by construction and file I/O

pub mod error;
pub mod leaderboard;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use leaderboard::Leaderboard;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frame interval of the original game loop (24 Hz)
    pub const FRAME_DT: f32 = 1.0 / 24.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 500.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Lives at the start of a run
    pub const STARTING_LIVES: u32 = 3;
    /// Grace period after losing a life (seconds)
    pub const INVULNERABILITY_SECS: f32 = 2.0;
    /// Ship visibility flips every this many frames while invulnerable
    pub const BLINK_FRAMES: u32 = 3;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 10.0;
    pub const SHIP_ACCELERATION: f32 = 33.0;
    pub const SHIP_MAX_VELOCITY: f32 = 90.0;
    /// Radians per second (180 degrees)
    pub const SHIP_ANGULAR_SPEED: f32 = std::f32::consts::PI;
    /// Seconds between shots
    pub const COOLDOWN_TIMER: f32 = 0.4;

    /// Pellet defaults
    pub const PELLET_SPEED: f32 = 100.0;
    pub const PELLET_RADIUS: f32 = 3.0;

    /// Difficulty of the first level; asteroid counts derive from it
    pub const STARTING_DIFFICULTY: u32 = 10;
    /// No asteroid spawns closer than this to the arena center
    pub const SPAWN_CLEARANCE: f32 = 80.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}
