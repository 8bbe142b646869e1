#![warn(missing_docs)]

//! Wire types and configuration for steer host integrations.
//!
//! A host hands the step thirteen scalars per execution and stores up to
//! four scalars back. This crate fixes the names and JSON layout of both
//! sides, and the configuration file that selects query options.

mod config;

pub use config::{Config, ConfigError, FaceConfig};

use serde::{Deserialize, Serialize};
use steer_kernel::{Aabb3, Exit, IntersectionStep, Segment, StateKey, StateSink, SteerError};
use steer_math::{Point3, Vec3};

/// Inputs of one step execution, named as the host properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepInputs {
    /// Segment origin X.
    #[serde(rename = "Ox")]
    pub ox: f64,
    /// Segment origin Y.
    #[serde(rename = "Oy")]
    pub oy: f64,
    /// Segment origin Z.
    #[serde(rename = "Oz")]
    pub oz: f64,
    /// Direction X.
    #[serde(rename = "Rx")]
    pub rx: f64,
    /// Direction Y.
    #[serde(rename = "Ry")]
    pub ry: f64,
    /// Direction Z.
    #[serde(rename = "Rz")]
    pub rz: f64,
    /// Segment length.
    #[serde(rename = "Rlength")]
    pub rlength: f64,
    /// Box minimum X.
    #[serde(rename = "B0x")]
    pub b0x: f64,
    /// Box minimum Y.
    #[serde(rename = "B0y")]
    pub b0y: f64,
    /// Box minimum Z.
    #[serde(rename = "B0z")]
    pub b0z: f64,
    /// Box maximum X.
    #[serde(rename = "B1x")]
    pub b1x: f64,
    /// Box maximum Y.
    #[serde(rename = "B1y")]
    pub b1y: f64,
    /// Box maximum Z.
    #[serde(rename = "B1z")]
    pub b1z: f64,
}

impl Default for StepInputs {
    fn default() -> Self {
        Self {
            ox: 0.0,
            oy: 0.0,
            oz: 0.0,
            rx: 1.0,
            ry: 1.0,
            rz: 1.0,
            rlength: 1.0,
            b0x: 0.0,
            b0y: 0.0,
            b0z: 0.0,
            b1x: 0.0,
            b1y: 0.0,
            b1z: 0.0,
        }
    }
}

impl StepInputs {
    /// The segment described by these inputs.
    pub fn segment(&self) -> Segment {
        Segment::new(
            Point3::new(self.ox, self.oy, self.oz),
            Vec3::new(self.rx, self.ry, self.rz),
            self.rlength,
        )
    }

    /// The box described by these inputs.
    pub fn aabb(&self) -> Aabb3 {
        Aabb3::new(
            Point3::new(self.b0x, self.b0y, self.b0z),
            Point3::new(self.b1x, self.b1y, self.b1z),
        )
    }

    /// Deserialize a single input record from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Deserialize a JSON array of input records.
    pub fn batch_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// State values written by a step on a hit.
///
/// Fields stay `None` until the step writes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepOutputs {
    /// X component of the steering vector.
    #[serde(rename = "SteeringForceX", skip_serializing_if = "Option::is_none")]
    pub steering_force_x: Option<f64>,
    /// Y component of the steering vector.
    #[serde(rename = "SteeringForceY", skip_serializing_if = "Option::is_none")]
    pub steering_force_y: Option<f64>,
    /// Z component of the steering vector.
    #[serde(rename = "SteeringForceZ", skip_serializing_if = "Option::is_none")]
    pub steering_force_z: Option<f64>,
    /// Distance from the origin to the hit point.
    #[serde(
        rename = "DistanceFromIntersection",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_from_intersection: Option<f64>,
}

impl StateSink for StepOutputs {
    fn set(&mut self, key: StateKey, value: f64) {
        let slot = match key {
            StateKey::SteeringForceX => &mut self.steering_force_x,
            StateKey::SteeringForceY => &mut self.steering_force_y,
            StateKey::SteeringForceZ => &mut self.steering_force_z,
            StateKey::DistanceFromIntersection => &mut self.distance_from_intersection,
        };
        *slot = Some(value);
    }
}

/// Outcome of one step execution as reported to a host or on the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Exit taken; absent when the inputs were rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit: Option<Exit>,
    /// State values written on a hit.
    #[serde(flatten)]
    pub outputs: StepOutputs,
    /// Error message when the inputs were rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepReport {
    /// Execute `step` on `inputs` and capture the result.
    pub fn run(step: &IntersectionStep, inputs: &StepInputs) -> Self {
        let mut outputs = StepOutputs::default();
        match step.execute(&inputs.segment(), &inputs.aabb(), &mut outputs) {
            Ok(exit) => Self {
                exit: Some(exit),
                outputs,
                error: None,
            },
            Err(err) => Self::rejected(&err),
        }
    }

    fn rejected(err: &SteerError) -> Self {
        log::warn!("step rejected: {err}");
        Self {
            exit: None,
            outputs: StepOutputs::default(),
            error: Some(err.to_string()),
        }
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario() -> StepInputs {
        StepInputs {
            ox: -5.0,
            oy: 0.0,
            oz: 0.0,
            rx: 1.0,
            ry: 0.0,
            rz: 0.0,
            rlength: 10.0,
            b0x: -1.0,
            b0y: -1.0,
            b0z: -1.0,
            b1x: 1.0,
            b1y: 1.0,
            b1z: 1.0,
        }
    }

    #[test]
    fn parse_host_property_names() {
        let json = r#"{"Ox": -5, "Rx": 1, "Ry": 0, "Rz": 0, "Rlength": 10,
                       "B0x": -1, "B0y": -1, "B0z": -1, "B1x": 1, "B1y": 1, "B1z": 1}"#;
        let inputs = StepInputs::from_json(json).unwrap();
        assert_eq!(inputs, scenario());
    }

    #[test]
    fn missing_fields_take_host_defaults() {
        let inputs = StepInputs::from_json("{}").unwrap();
        assert_eq!(inputs, StepInputs::default());
        assert_relative_eq!(inputs.segment().direction, Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(inputs.segment().length, 1.0);
    }

    #[test]
    fn report_on_hit_has_all_outputs() {
        let report = StepReport::run(&IntersectionStep::default(), &scenario());
        assert_eq!(report.exit, Some(Exit::FirstExit));
        assert_eq!(report.outputs.steering_force_x, Some(-5.0));
        assert_eq!(report.outputs.steering_force_y, Some(0.0));
        assert_eq!(report.outputs.steering_force_z, Some(0.0));
        assert_eq!(report.outputs.distance_from_intersection, Some(4.0));

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["exit"], "FirstExit");
        assert_eq!(value["DistanceFromIntersection"], 4.0);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn report_on_miss_has_no_outputs() {
        let inputs = StepInputs {
            rlength: 3.0,
            ..scenario()
        };
        let report = StepReport::run(&IntersectionStep::default(), &inputs);
        assert_eq!(report.exit, Some(Exit::AlternateExit));
        assert_eq!(report.outputs, StepOutputs::default());
    }

    #[test]
    fn report_on_invalid_box_carries_error() {
        let inputs = StepInputs {
            b0x: 2.0,
            ..scenario()
        };
        let report = StepReport::run(&IntersectionStep::default(), &inputs);
        assert_eq!(report.exit, None);
        assert!(report.error.unwrap().contains("invalid box"));
    }

    #[test]
    fn batch_parse() {
        let batch = StepInputs::batch_from_json(r#"[{"Ox": 1}, {"Oy": 2, "Rlength": 0}]"#).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].ox, 1.0);
        assert_eq!(batch[1].rlength, 0.0);
    }
}
