//! Lap-joint boss/recess pairs for two-piece parts.
//!
//! The boss is the tongue left on one part's terminal cross-section, the recess
//! is the rebate cut into the other. Both come from the same outer curve and
//! straddle the middle of the wall, half a clearance to each side.

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::sketch::Inset;

/// Joinery dimensions shared by the two-piece designs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSpec {
    /// Total sliding gap between boss and recess.
    pub clearance: Real,
    /// Overlap along the height axis (parts stacked in z).
    pub height: Real,
    /// Overlap along the depth axis (parts split across y).
    pub depth: Real,
}

impl Default for JointSpec {
    fn default() -> Self {
        Self {
            clearance: 0.3,
            height: 5.0,
            depth: 10.0,
        }
    }
}

impl JointSpec {
    /// Check `overlap` (height or depth) against the extent it is cut into.
    pub fn check_overlap(&self, what: &str, overlap: Real, extent: Real) -> Result<(), ValidationError> {
        if !(overlap > 0.0 && overlap < extent) {
            return Err(ValidationError::JointTooLarge(format!(
                "joint {} {} must lie in (0, {})",
                what, overlap, extent
            )));
        }
        Ok(())
    }
}

/// Matched boss and recess curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPair<S> {
    pub boss: S,
    pub recess: S,
}

impl<S: Inset> JointPair<S> {
    /// Offset `outer` into a boss curve and a recess curve `clearance` apart.
    ///
    /// With zero clearance both curves are the mid-wall curve.
    pub fn new(outer: &S, thickness: Real, clearance: Real) -> Result<Self, ValidationError> {
        if !(0.0..thickness).contains(&clearance) {
            return Err(ValidationError::JointTooLarge(format!(
                "clearance {} must lie in [0, {})",
                clearance, thickness
            )));
        }
        Ok(Self {
            boss: outer.inset(boss_inset(thickness, clearance))?,
            recess: outer.inset(recess_inset(thickness, clearance))?,
        })
    }
}

/// Distance from the outer curve to the boss curve.
pub fn boss_inset(thickness: Real, clearance: Real) -> Real {
    thickness / 2.0 + clearance / 2.0
}

/// Distance from the outer curve to the recess curve.
pub fn recess_inset(thickness: Real, clearance: Real) -> Real {
    thickness / 2.0 - clearance / 2.0
}
