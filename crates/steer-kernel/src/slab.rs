//! Segment/AABB intersection using the slab method.
//!
//! Each axis contributes the parametric interval during which the ray sits
//! between that axis's two bounding planes. The intersection of the three
//! intervals is where the ray is inside the box; the segment then keeps
//! only the first boundary crossing on or after its origin, provided it is
//! within the segment length.
//!
//! While folding the intervals the intersector remembers which slab plane
//! produced the binding entry and exit parameters, so the struck face never
//! has to be recovered afterwards from floating-point coordinates.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use steer_math::{is_finite, Axis, Point3, Tolerance};

use crate::{Aabb3, Segment, SteerError};

/// Which of a slab's two planes a face lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The plane at the box minimum.
    Min,
    /// The plane at the box maximum.
    Max,
}

/// One face of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    /// Axis the face is perpendicular to.
    pub axis: Axis,
    /// Which side of the box along `axis`.
    pub side: Side,
}

impl Face {
    /// Create a face descriptor.
    pub fn new(axis: Axis, side: Side) -> Self {
        Self { axis, side }
    }
}

/// Why a query produced no hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissReason {
    /// Direction is the zero vector; there is no ray to test.
    DegenerateDirection,
    /// A slab rejected the ray (disjoint intervals or parallel outside).
    Separated,
    /// The box lies entirely behind the origin.
    Behind,
    /// The box is ahead but farther away than the segment length.
    BeyondLength,
}

/// A confirmed segment/box intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Ray parameter of the intersection point.
    pub t: f64,
    /// Intersection point in world space.
    pub point: Point3,
    /// Euclidean distance from the segment origin to `point`.
    pub distance: f64,
    /// Face whose slab bound the chosen parameter.
    ///
    /// `None` when two or more slabs bind at the same parameter, which
    /// happens on edge and corner hits.
    pub face: Option<Face>,
}

/// Result of [`intersect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The segment reaches the box.
    Hit(Hit),
    /// The segment does not reach the box.
    Miss(MissReason),
}

impl Intersection {
    /// True for [`Intersection::Hit`].
    pub fn is_hit(&self) -> bool {
        matches!(self, Intersection::Hit(_))
    }

    /// The hit, if any.
    pub fn hit(&self) -> Option<&Hit> {
        match self {
            Intersection::Hit(hit) => Some(hit),
            Intersection::Miss(_) => None,
        }
    }
}

/// A running entry or exit bound of the slab fold.
#[derive(Debug, Clone, Copy)]
struct Bound {
    t: f64,
    face: Option<Face>,
    tied: bool,
}

impl Bound {
    fn unbounded(t: f64) -> Self {
        Self {
            t,
            face: None,
            tied: false,
        }
    }

    /// Fold in a candidate, keeping it when `tighter(candidate, current)`.
    fn absorb(&mut self, t: f64, face: Face, slack: f64, tighter: fn(f64, f64) -> bool) {
        if self.face.is_some() && (t - self.t).abs() <= slack {
            self.tied = true;
            if tighter(t, self.t) {
                self.t = t;
            }
        } else if tighter(t, self.t) {
            self.t = t;
            self.face = Some(face);
            self.tied = false;
        }
    }

    fn binding_face(&self) -> Option<Face> {
        if self.tied {
            None
        } else {
            self.face
        }
    }
}

/// Intersect a segment with a box using exact tie detection.
///
/// Equivalent to [`intersect_with`] using [`Tolerance::EXACT`].
pub fn intersect(segment: &Segment, aabb: &Aabb3) -> Result<Intersection, SteerError> {
    intersect_with(segment, aabb, &Tolerance::EXACT)
}

/// Intersect a segment with a box.
///
/// Inputs are validated first; contract violations are returned as errors.
/// `tolerance.linear` is the distance within which two slab planes are
/// considered to bind simultaneously (edge or corner hit).
///
/// When the origin is inside the box the reported point is where the
/// segment leaves it.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn intersect_with(
    segment: &Segment,
    aabb: &Aabb3,
    tolerance: &Tolerance,
) -> Result<Intersection, SteerError> {
    segment.validate()?;
    aabb.validate()?;

    if segment.is_degenerate() {
        debug!("zero direction, no ray to test");
        return Ok(Intersection::Miss(MissReason::DegenerateDirection));
    }

    let speed = segment.direction.norm();
    let slack = tolerance.linear / speed;

    let mut entry = Bound::unbounded(f64::NEG_INFINITY);
    let mut exit = Bound::unbounded(f64::INFINITY);

    for axis in Axis::ALL {
        let i = axis.index();
        let (min, max) = aabb.bounds(axis);
        let o = segment.origin[i];
        let d = segment.direction[i];

        if d == 0.0 {
            // Parallel to this slab: no constraint on t, unless we are
            // outside the slab, in which case we never get in.
            if o < min || o > max {
                trace!("parallel to {axis} slab and outside it");
                return Ok(Intersection::Miss(MissReason::Separated));
            }
            continue;
        }

        let t0 = (min - o) / d;
        let t1 = (max - o) / d;
        let (near, far) = if t0 <= t1 {
            ((t0, Side::Min), (t1, Side::Max))
        } else {
            ((t1, Side::Max), (t0, Side::Min))
        };

        entry.absorb(near.0, Face::new(axis, near.1), slack, |a, b| a > b);
        exit.absorb(far.0, Face::new(axis, far.1), slack, |a, b| a < b);

        if entry.t > exit.t {
            trace!("slab {axis} empties the interval");
            return Ok(Intersection::Miss(MissReason::Separated));
        }
    }

    if exit.t < 0.0 {
        trace!("box behind origin (tmax = {})", exit.t);
        return Ok(Intersection::Miss(MissReason::Behind));
    }

    let chosen = if entry.t >= 0.0 { entry } else { exit };
    let point = segment.at(chosen.t);
    let distance = (point - segment.origin).norm();

    // A tiny direction component can push t past f64 range even for
    // finite inputs; the point is then meaningless.
    if !chosen.t.is_finite() || !is_finite(&point.coords) || !distance.is_finite() {
        debug!("hit parameter {} not representable", chosen.t);
        return Err(SteerError::Unrepresentable { t: chosen.t });
    }

    if !(distance <= segment.length) {
        trace!(
            "box at distance {distance} beyond segment length {}",
            segment.length
        );
        return Ok(Intersection::Miss(MissReason::BeyondLength));
    }

    Ok(Intersection::Hit(Hit {
        t: chosen.t,
        point,
        distance,
        face: chosen.binding_face(),
    }))
}
