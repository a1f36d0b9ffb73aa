//! Validation errors

use crate::float_types::Real;
use nalgebra::Point3;
use std::fmt::Display;

/// Every way a parameter set can fail to describe a buildable part.
///
/// All of these are raised before a single vertex reaches a file; a part is
/// either built completely or not at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (NonPositiveDimension) A cross-section extent dropped to zero or below
    NonPositiveDimension { what: &'static str, value: Real },
    /// (SegmentCount) Round curves lofted against a rectangle need a positive multiple of 4
    SegmentCount(usize),
    /// (PointCountMismatch) Two rings handed to a loft have different lengths
    PointCountMismatch { left: usize, right: usize },
    /// (OutletOutsideFootprint) Part of the outlet lies outside the intake footprint
    OutletOutsideFootprint { center: Point3<Real>, radius: Real },
    /// (SlopeAngle) Slope must satisfy 0 <= angle < 90 degrees
    SlopeAngle(Real),
    /// (FloorOutOfRange) A sloped outlet or floor reaches the top of its part
    FloorOutOfRange { elevation: Real, limit: Real },
    /// (IndexOutOfRange) A face referenced a vertex that was never pushed
    IndexOutOfRange { index: usize, len: usize },
    /// (JointTooLarge) Joinery dimensions break the wall they are cut into
    JointTooLarge(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NonPositiveDimension { what, value } => write!(f, "(NonPositiveDimension) {} must be positive, got {}", what, value),
            ValidationError::SegmentCount(count) => write!(f, "(SegmentCount) segment count {} is not a positive multiple of 4", count),
            ValidationError::PointCountMismatch { left, right } => write!(f, "(PointCountMismatch) cannot loft a ring of {} points onto a ring of {}", left, right),
            ValidationError::OutletOutsideFootprint { center, radius } => write!(f, "(OutletOutsideFootprint) outlet of radius {} centered at {} leaves the footprint", radius, center),
            ValidationError::SlopeAngle(angle) => write!(f, "(SlopeAngle) slope angle {} is outside [0, 90)", angle),
            ValidationError::FloorOutOfRange { elevation, limit } => write!(f, "(FloorOutOfRange) sloped surface reaches {} but must stay below {}", elevation, limit),
            ValidationError::IndexOutOfRange { index, len } => write!(f, "(IndexOutOfRange) face index {} with only {} vertices", index, len),
            ValidationError::JointTooLarge(msg) => write!(f, "(JointTooLarge) {}", msg),
        }
    }
}

/// Checks that `value` is strictly positive.
pub(crate) fn positive(what: &'static str, value: Real) -> Result<Real, ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonPositiveDimension { what, value })
    }
}
