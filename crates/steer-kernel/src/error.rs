//! Error types for segment/box queries.

use steer_math::Axis;
use thiserror::Error;

/// Contract violations and unresolvable results of a query.
///
/// Recoverable outcomes such as a missed box are not errors; they are
/// reported through [`crate::MissReason`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SteerError {
    /// Box minimum exceeds its maximum on some axis.
    #[error("invalid box: min.{axis} = {min} is greater than max.{axis} = {max}")]
    InvalidBox {
        /// Offending axis.
        axis: Axis,
        /// Minimum bound on that axis.
        min: f64,
        /// Maximum bound on that axis.
        max: f64,
    },

    /// NaN or infinity in one of the inputs.
    #[error("non-finite input: {field}")]
    NonFiniteInput {
        /// Name of the offending input.
        field: &'static str,
    },

    /// Segment length below zero.
    #[error("segment length must not be negative, got {0}")]
    NegativeLength(f64),

    /// The hit parameter overflows `f64` (direction far too small for the
    /// distance to the box).
    #[error("hit not representable: ray parameter {t} overflows")]
    Unrepresentable {
        /// The overflowed parameter.
        t: f64,
    },

    /// The struck face could not be identified (edge or corner hit).
    #[error("cannot identify a unique struck face at ({x}, {y}, {z})")]
    AmbiguousFace {
        /// X coordinate of the hit point.
        x: f64,
        /// Y coordinate of the hit point.
        y: f64,
        /// Z coordinate of the hit point.
        z: f64,
    },
}
