#![warn(missing_docs)]

//! Math types for steer segment/box queries.
//!
//! Thin wrappers around nalgebra providing the point and vector types
//! used by the intersector, plus axis addressing and tolerance constants.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// One of the three coordinate axes.
///
/// The declaration order is also the priority order used when several
/// axes are candidates for the same face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// All axes in priority order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (0, 1 or 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Returns `v` with the component along `axis` negated.
pub fn mirror_component(v: &Vec3, axis: Axis) -> Vec3 {
    let mut out = *v;
    out[axis.index()] = -out[axis.index()];
    out
}

/// Returns true if every component of `v` is finite.
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tolerance {
    /// Linear distance tolerance in world units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 world units).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Exact comparisons, no slack at all.
    pub const EXACT: Self = Self { linear: 0.0 };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() <= self.linear
    }

    /// Check if two coordinates coincide within tolerance.
    pub fn coincident(&self, a: f64, b: f64) -> bool {
        self.is_zero(a - b)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
