//! Depth-proportional floor elevation.

use crate::errors::{ValidationError, positive};
use crate::float_types::Real;
use nalgebra::{Point2, Point3};

/// Height gained at `normalized` depth (0 at the front edge, 1 at the back).
///
/// Every sloped curve in the crate goes through this one formula. The input
/// is clamped so points that stick out past the footprint do not overshoot.
#[inline]
pub fn slope_elevation(normalized: Real, total_drop: Real) -> Real {
    normalized.clamp(0.0, 1.0) * total_drop
}

/// Total rise of a floor tilted by `angle` degrees over `depth`.
pub fn total_drop(depth: Real, angle: Real) -> Result<Real, ValidationError> {
    if !(0.0..90.0).contains(&angle) {
        return Err(ValidationError::SlopeAngle(angle));
    }
    Ok(depth * angle.to_radians().tan())
}

/// A floor plane that rises linearly from the front edge toward the back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeProfile {
    /// y of the low (front) edge
    pub front_y: Real,
    pub depth: Real,
    /// elevation at the front edge
    pub base: Real,
    pub total_drop: Real,
}

impl SlopeProfile {
    pub fn new(front_y: Real, depth: Real, angle: Real, base: Real) -> Result<Self, ValidationError> {
        let depth = positive("slope depth", depth)?;
        Ok(Self {
            front_y,
            depth,
            base,
            total_drop: total_drop(depth, angle)?,
        })
    }

    /// A level profile at `base`.
    pub const fn flat(base: Real) -> Self {
        Self {
            front_y: 0.0,
            depth: 1.0,
            base,
            total_drop: 0.0,
        }
    }

    /// Same tilt, shifted to a different front elevation.
    pub const fn raised(self, base: Real) -> Self {
        Self { base, ..self }
    }

    pub fn normalized(&self, y: Real) -> Real {
        (y - self.front_y) / self.depth
    }

    pub fn elevation(&self, y: Real) -> Real {
        self.base + slope_elevation(self.normalized(y), self.total_drop)
    }

    /// Lift planar points onto the profile, each at its own depth.
    pub fn lift(&self, points: &[Point2<Real>]) -> Vec<Point3<Real>> {
        points
            .iter()
            .map(|p| Point3::new(p.x, p.y, self.elevation(p.y)))
            .collect()
    }
}
