//! Axis-aligned bounding box used as the obstacle in a query.

use steer_math::{is_finite, Axis, Point3};

use crate::SteerError;

/// Axis-aligned bounding box in 3D.
///
/// Zero extent on any axis is allowed: the box may collapse to a plane,
/// a line or a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners without validation.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an AABB and check it with [`Aabb3::validate`].
    pub fn try_new(min: Point3, max: Point3) -> Result<Self, SteerError> {
        let aabb = Self::new(min, max);
        aabb.validate()?;
        Ok(aabb)
    }

    /// Reject non-finite bounds and inverted axes.
    pub fn validate(&self) -> Result<(), SteerError> {
        if !is_finite(&self.min.coords) {
            return Err(SteerError::NonFiniteInput { field: "box.min" });
        }
        if !is_finite(&self.max.coords) {
            return Err(SteerError::NonFiniteInput { field: "box.max" });
        }
        for axis in Axis::ALL {
            let (min, max) = self.bounds(axis);
            if min > max {
                return Err(SteerError::InvalidBox { axis, min, max });
            }
        }
        Ok(())
    }

    /// The `(min, max)` pair of this box along `axis`.
    #[inline]
    pub fn bounds(&self, axis: Axis) -> (f64, f64) {
        let i = axis.index();
        (self.min[i], self.max[i])
    }

    /// Test if a point lies inside the box (touching counts as inside).
    pub fn contains(&self, p: &Point3) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let (min, max) = self.bounds(axis);
            let c = p[axis.index()];
            c >= min && c <= max
        })
    }

    /// True if the box has zero extent along at least one axis.
    pub fn is_degenerate(&self) -> bool {
        Axis::ALL.iter().any(|&axis| {
            let (min, max) = self.bounds(axis);
            min == max
        })
    }
}
