//! Adapter between a query and a host simulation step.
//!
//! A host runs the step once per token. The step branches two ways and, on
//! a hit, hands four values back to the host for storage in its own
//! per-entity state. The step itself keeps no state between executions.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{query, Aabb3, Outcome, QueryOptions, Segment, SteerError};

/// Which way the host token leaves the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exit {
    /// The segment strikes the box.
    FirstExit,
    /// The segment misses the box.
    AlternateExit,
}

/// Output state written by the step on a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StateKey {
    /// X component of the steering vector.
    SteeringForceX,
    /// Y component of the steering vector.
    SteeringForceY,
    /// Z component of the steering vector.
    SteeringForceZ,
    /// Distance from the segment origin to the hit point.
    DistanceFromIntersection,
}

impl StateKey {
    /// All keys, in the order they are written.
    pub const ALL: [StateKey; 4] = [
        StateKey::SteeringForceX,
        StateKey::SteeringForceY,
        StateKey::SteeringForceZ,
        StateKey::DistanceFromIntersection,
    ];

    /// Host-facing property name.
    pub fn name(self) -> &'static str {
        match self {
            StateKey::SteeringForceX => "SteeringForceX",
            StateKey::SteeringForceY => "SteeringForceY",
            StateKey::SteeringForceZ => "SteeringForceZ",
            StateKey::DistanceFromIntersection => "DistanceFromIntersection",
        }
    }
}

/// Destination for values the step hands back to the host.
///
/// Hosts that did not bind a particular state simply ignore that key.
pub trait StateSink {
    /// Store `value` under `key`.
    fn set(&mut self, key: StateKey, value: f64);
}

impl StateSink for BTreeMap<StateKey, f64> {
    fn set(&mut self, key: StateKey, value: f64) {
        self.insert(key, value);
    }
}

impl StateSink for HashMap<StateKey, f64> {
    fn set(&mut self, key: StateKey, value: f64) {
        self.insert(key, value);
    }
}

/// A configured intersection step.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionStep {
    options: QueryOptions,
}

impl IntersectionStep {
    /// Create a step with the given query options.
    pub fn new(options: QueryOptions) -> Self {
        Self { options }
    }

    /// Options this step runs queries with.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Run one query and write the outputs to `sink`.
    ///
    /// Nothing is written on [`Exit::AlternateExit`]. Contract violations
    /// and unidentifiable faces are returned as errors and write nothing.
    pub fn execute<S: StateSink + ?Sized>(
        &self,
        segment: &Segment,
        aabb: &Aabb3,
        sink: &mut S,
    ) -> Result<Exit, SteerError> {
        match query(segment, aabb, &self.options)? {
            Outcome::Miss(reason) => {
                debug!("step miss: {reason:?}");
                Ok(Exit::AlternateExit)
            }
            Outcome::Hit {
                distance,
                deflection,
                ..
            } => {
                sink.set(StateKey::SteeringForceX, deflection.x);
                sink.set(StateKey::SteeringForceY, deflection.y);
                sink.set(StateKey::SteeringForceZ, deflection.z);
                sink.set(StateKey::DistanceFromIntersection, distance);
                Ok(Exit::FirstExit)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use steer_math::{Point3, Vec3};

    fn unit_box() -> Aabb3 {
        Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_execute_hit_writes_all_keys() {
        let step = IntersectionStep::default();
        let seg = Segment::new(Point3::new(0.5, 0.25, -4.0), Vec3::z(), 5.0);
        let mut state = BTreeMap::new();
        let exit = step.execute(&seg, &unit_box(), &mut state).unwrap();
        assert_eq!(exit, Exit::FirstExit);
        assert_eq!(state.len(), 4);
        // Hit (0.5, 0.25, -1) at distance 3, two units left: raw z = 1, mirrored.
        assert_relative_eq!(state[&StateKey::SteeringForceX], 0.5);
        assert_relative_eq!(state[&StateKey::SteeringForceY], 0.25);
        assert_relative_eq!(state[&StateKey::SteeringForceZ], -1.0);
        assert_relative_eq!(state[&StateKey::DistanceFromIntersection], 3.0);
    }

    #[test]
    fn test_execute_miss_writes_nothing() {
        let step = IntersectionStep::default();
        let seg = Segment::new(Point3::new(0.0, 0.0, -4.0), Vec3::z(), 2.0);
        let mut state = HashMap::new();
        let exit = step.execute(&seg, &unit_box(), &mut state).unwrap();
        assert_eq!(exit, Exit::AlternateExit);
        assert!(state.is_empty());
    }

    #[test]
    fn test_execute_error_writes_nothing() {
        let step = IntersectionStep::default();
        let seg = Segment::new(Point3::origin(), Vec3::z(), -1.0);
        let mut state = BTreeMap::new();
        assert!(step.execute(&seg, &unit_box(), &mut state).is_err());
        assert!(state.is_empty());
    }

    #[test]
    fn test_execute_overflow_writes_nothing() {
        let step = IntersectionStep::default();
        let seg = Segment::new(Point3::origin(), Vec3::new(1e-320, 0.0, 0.0), 1.0);
        let mut state = BTreeMap::new();
        let err = step.execute(&seg, &unit_box(), &mut state).unwrap_err();
        assert!(matches!(err, SteerError::Unrepresentable { .. }));
        assert!(state.is_empty());
    }

    #[test]
    fn test_state_key_names() {
        let names: Vec<_> = StateKey::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            [
                "SteeringForceX",
                "SteeringForceY",
                "SteeringForceZ",
                "DistanceFromIntersection"
            ]
        );
    }
}
