//! One complete segment/box query: intersection followed by deflection.

use serde::{Deserialize, Serialize};
use steer_math::{Point3, Tolerance, Vec3};

use crate::{
    deflect, intersect_with, Aabb3, FaceStrategy, Intersection, MissReason, Segment, SteerError,
};

/// Options shared by every query issued through the same caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// How the struck face is identified.
    pub strategy: FaceStrategy,
    /// Tolerance for tie detection and boundary comparison.
    pub tolerance: Tolerance,
}

/// Result of a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The segment does not reach the box.
    Miss(MissReason),
    /// The segment strikes the box.
    Hit {
        /// Intersection point.
        point: Point3,
        /// Distance from the origin to `point`.
        distance: f64,
        /// Steering vector away from the struck face.
        deflection: Vec3,
    },
}

impl Outcome {
    /// True for [`Outcome::Hit`].
    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit { .. })
    }
}

/// Intersect `segment` with `aabb` and, on a hit, deflect off the struck face.
pub fn query(
    segment: &Segment,
    aabb: &Aabb3,
    options: &QueryOptions,
) -> Result<Outcome, SteerError> {
    let hit = match intersect_with(segment, aabb, &options.tolerance)? {
        Intersection::Miss(reason) => return Ok(Outcome::Miss(reason)),
        Intersection::Hit(hit) => hit,
    };
    let deflection = deflect(segment, aabb, &hit, options.strategy, &options.tolerance)?;
    Ok(Outcome::Hit {
        point: hit.point,
        distance: hit.distance,
        deflection: deflection.steering,
    })
}
