#![warn(missing_docs)]

//! Segment/AABB intersection and face deflection for agent steering.
//!
//! An agent about to travel a finite distance along a direction asks
//! whether it will run into an axis-aligned box, and if so where, how far
//! away, and which way to steer to bounce off the face it would strike.
//!
//! # Architecture
//!
//! - [`Segment`] / [`Aabb3`] - query inputs, validated on use
//! - [`intersect`] - slab-method intersection, clipped to the segment
//! - [`deflect`] - mirrored remaining-travel vector off the struck face
//! - [`query`] - both of the above in one call
//! - [`IntersectionStep`] - host-facing adapter writing into a [`StateSink`]
//!
//! # Example
//!
//! ```
//! use steer_kernel::{query, Aabb3, Outcome, QueryOptions, Segment};
//! use steer_math::{Point3, Vec3};
//!
//! let segment = Segment::new(Point3::new(-5.0, 0.0, 0.0), Vec3::x(), 10.0);
//! let aabb = Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
//!
//! let outcome = query(&segment, &aabb, &QueryOptions::default()).unwrap();
//! assert!(matches!(outcome, Outcome::Hit { distance, .. } if distance == 4.0));
//! ```

mod aabb;
mod deflect;
mod error;
mod query;
mod segment;
mod slab;
pub mod step;

pub use aabb::Aabb3;
pub use deflect::{deflect, face_on_boundary, Deflection, FaceStrategy};
pub use error::SteerError;
pub use query::{query, Outcome, QueryOptions};
pub use segment::Segment;
pub use slab::{intersect, intersect_with, Face, Hit, Intersection, MissReason, Side};
pub use step::{Exit, IntersectionStep, StateKey, StateSink};
