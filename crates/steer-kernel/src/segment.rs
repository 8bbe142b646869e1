//! Directed segment representation.

use steer_math::{is_finite, Point3, Vec3};

use crate::SteerError;

/// A directed segment: a ray from `origin` along `direction`, cut off
/// after `length` world units of travel.
///
/// `direction` does not need to be normalized. `length` is always a
/// Euclidean distance, independent of the direction's magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point of the segment.
    pub origin: Point3,
    /// Direction of travel (not necessarily unit length).
    pub direction: Vec3,
    /// Maximum travel distance from `origin`.
    pub length: f64,
}

impl Segment {
    /// Create a new segment without validation.
    pub fn new(origin: Point3, direction: Vec3, length: f64) -> Self {
        Self {
            origin,
            direction,
            length,
        }
    }

    /// Evaluate the underlying ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// True if every direction component is exactly zero.
    pub fn is_degenerate(&self) -> bool {
        self.direction.iter().all(|&c| c == 0.0)
    }

    /// Reject NaN/infinite inputs and negative lengths.
    pub fn validate(&self) -> Result<(), SteerError> {
        if !is_finite(&self.origin.coords) {
            return Err(SteerError::NonFiniteInput {
                field: "segment.origin",
            });
        }
        if !is_finite(&self.direction) {
            return Err(SteerError::NonFiniteInput {
                field: "segment.direction",
            });
        }
        if !self.length.is_finite() {
            return Err(SteerError::NonFiniteInput {
                field: "segment.length",
            });
        }
        if self.length < 0.0 {
            return Err(SteerError::NegativeLength(self.length));
        }
        Ok(())
    }
}
