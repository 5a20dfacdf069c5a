//! 2D vector helpers on top of `glam::Vec2`
//!
//! `Vec2` already gives us `+`, `-`, `*` and `dot`. The extension trait adds
//! the handful of operations the bodies rely on, with `unit` made fallible so
//! a zero vector can never be silently normalized into NaNs.

use glam::Vec2;

use crate::error::{Error, Result};

/// The simulation's vector type
pub type Vector2 = Vec2;

pub trait VectorExt: Sized {
    /// Multiply both components by `factor`
    fn scale(self, factor: f32) -> Self;
    /// Euclidean length
    fn magnitude(self) -> f32;
    /// Same direction, length one. Fails on the zero vector.
    fn unit(self) -> Result<Self>;
    /// Opposite direction, same length
    fn inverse(self) -> Self;
}

impl VectorExt for Vec2 {
    #[inline]
    fn scale(self, factor: f32) -> Self {
        self * factor
    }

    #[inline]
    fn magnitude(self) -> f32 {
        self.length()
    }

    fn unit(self) -> Result<Self> {
        let magnitude = self.length();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Err(Error::DegenerateVector);
        }
        Ok(self / magnitude)
    }

    #[inline]
    fn inverse(self) -> Self {
        -self
    }
}

/// Unit vector pointing along `angle` (radians): (cos θ, sin θ)
#[inline]
pub fn angle_to_vector(angle: f32) -> Vec2 {
    Vec2::from_angle(angle)
}
