//! Steering deflection away from a struck box face.

use log::debug;
use serde::{Deserialize, Serialize};
use steer_math::{mirror_component, Axis, Point3, Tolerance, Vec3};

use crate::{Aabb3, Hit, Segment, SteerError};

/// How the deflector decides which face of the box was struck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaceStrategy {
    /// Use the slab that bound the hit parameter during intersection.
    #[default]
    SlabAxis,
    /// Compare the hit point against each axis's bounds in x, y, z order
    /// and take the first coordinate lying on a bound.
    BoundaryEquality,
}

/// A steering vector and the axis that was mirrored to produce it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deflection {
    /// Remaining travel, reflected off the struck face.
    pub steering: Vec3,
    /// Axis whose component was negated.
    pub axis: Axis,
}

/// Compute the deflection vector for a confirmed hit.
///
/// The agent would have continued `segment.length - hit.distance` past
/// the hit point along `segment.direction`. The resulting position vector
/// has its component along the struck face's axis negated; the other two
/// components are left untouched.
pub fn deflect(
    segment: &Segment,
    aabb: &Aabb3,
    hit: &Hit,
    strategy: FaceStrategy,
    tolerance: &Tolerance,
) -> Result<Deflection, SteerError> {
    let axis = match strategy {
        FaceStrategy::SlabAxis => hit.face.map(|face| face.axis),
        FaceStrategy::BoundaryEquality => face_on_boundary(aabb, &hit.point, tolerance),
    }
    .ok_or_else(|| {
        debug!("no unique face at {:?} ({strategy:?})", hit.point);
        SteerError::AmbiguousFace {
            x: hit.point.x,
            y: hit.point.y,
            z: hit.point.z,
        }
    })?;

    let remaining = segment.length - hit.distance;
    let raw = hit.point.coords + segment.direction * remaining;

    Ok(Deflection {
        steering: mirror_component(&raw, axis),
        axis,
    })
}

/// First axis, in x, y, z order, on which `point` lies on a bound of `aabb`.
pub fn face_on_boundary(aabb: &Aabb3, point: &Point3, tolerance: &Tolerance) -> Option<Axis> {
    Axis::ALL.into_iter().find(|&axis| {
        let (min, max) = aabb.bounds(axis);
        let c = point[axis.index()];
        tolerance.coincident(c, min) || tolerance.coincident(c, max)
    })
}
