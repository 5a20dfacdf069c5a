//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep per tick, chosen by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order for asteroids, firing order for pellets)
//! - No rendering, audio, or platform dependencies

pub mod asteroid;
pub mod body;
pub mod collider;
pub mod level;
pub mod pellet;
pub mod session;
pub mod ship;
pub mod snapshot;
pub mod tick;
pub mod vector;

pub use asteroid::{Asteroid, AsteroidTable, SizeClass, SizeSpec, SplitPolicy};
pub use body::{Arena, Body, BoundaryPolicy, MovingBody};
pub use collider::CircleCollider;
pub use level::{AsteroidCounts, GameEvent, Level, LevelPhase};
pub use pellet::{Pellet, PelletSpec};
pub use session::Session;
pub use ship::{Ship, ShipSpec};
pub use snapshot::{AsteroidSnapshot, PelletSnapshot, ShipSnapshot, Snapshot};
pub use tick::{Throttle, TickInput, tick};
pub use vector::{Vector2, VectorExt, angle_to_vector};
