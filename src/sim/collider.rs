//! Circle colliders
//!
//! Every body in the arena collides as a circle. Two circles intersect when
//! the distance between their centers is strictly less than the sum of their
//! radii, so circles that merely touch do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, invalid};

/// A circle in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    center: Vec2,
    radius: f32,
}

impl CircleCollider {
    /// Create a collider, rejecting negative or non-finite radii
    pub fn new(center: Vec2, radius: f32) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(invalid(format!("collider radius must be >= 0, got {radius}")));
        }
        if !center.is_finite() {
            return Err(invalid(format!("collider center must be finite, got {center}")));
        }
        Ok(Self { center, radius })
    }

    /// Build from values already checked by `Tuning::validate`
    pub(crate) fn from_validated(center: Vec2, radius: f32) -> Self {
        debug_assert!(radius >= 0.0);
        Self { center, radius }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// True if the two circles overlap (touching does not count)
    pub fn intersects(&self, other: &CircleCollider) -> bool {
        self.center.distance(other.center) < self.radius + other.radius
    }

    /// Move the center by `by`
    pub fn translate(&mut self, by: Vec2) {
        self.center += by;
    }

    /// Move the center to `point`
    pub fn move_to(&mut self, point: Vec2) {
        self.center = point;
    }

    /// Top-left corner of the bounding square
    #[inline]
    pub fn min_corner(&self) -> Vec2 {
        self.center - Vec2::splat(self.radius)
    }

    /// Bottom-right corner of the bounding square
    #[inline]
    pub fn max_corner(&self) -> Vec2 {
        self.center + Vec2::splat(self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(x: f32, y: f32, r: f32) -> CircleCollider {
        CircleCollider::new(Vec2::new(x, y), r).unwrap()
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(CircleCollider::new(Vec2::ZERO, -1.0).is_err());
        assert!(CircleCollider::new(Vec2::ZERO, f32::NAN).is_err());
        assert!(CircleCollider::new(Vec2::ZERO, 0.0).is_ok());
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = circle(0.0, 0.0, 5.0);
        assert!(a.intersects(&circle(9.0, 0.0, 5.0)));
        // Exactly touching: distance 10 == 5 + 5
        assert!(!a.intersects(&circle(10.0, 0.0, 5.0)));
        assert!(!a.intersects(&circle(20.0, 20.0, 5.0)));
    }

    #[test]
    fn test_self_intersection_with_positive_radius() {
        let a = circle(3.0, 4.0, 1.0);
        assert!(a.intersects(&a));
    }

    #[test]
    fn test_translate_and_move_to() {
        let mut a = circle(1.0, 1.0, 2.0);
        a.translate(Vec2::new(2.0, -1.0));
        assert_eq!(a.center(), Vec2::new(3.0, 0.0));
        a.move_to(Vec2::new(10.0, 10.0));
        assert_eq!(a.center(), Vec2::new(10.0, 10.0));
        assert_eq!(a.min_corner(), Vec2::new(8.0, 8.0));
        assert_eq!(a.max_corner(), Vec2::new(12.0, 12.0));
    }

    proptest! {
        #[test]
        fn intersects_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, ar in 0.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, br in 0.0f32..100.0,
        ) {
            let a = circle(ax, ay, ar);
            let b = circle(bx, by, br);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
