//! Chute designs: physical parameters, design families and presets.
//!
//! A [`Chute`] pairs one [`Design`] with a [`ChuteParams`] set and builds the
//! printable [`Part`]s for it. Every check runs before the first vertex is
//! produced, so a design either yields complete parts or a [`ValidationError`].
//!
//! Coordinates are millimeters: `x` across the width, `y` along the depth with
//! the front edge at `-outer_depth / 2`, `z` up. Parts are placed where they
//! sit in the assembled chute, so an upper part starts at `z = part_height`.

pub mod front_back;
pub mod funnel;
pub mod open_slot;
pub mod snap_fit;

use crate::errors::{ValidationError, positive};
use crate::float_types::Real;
use crate::mesh::Part;
use crate::sketch::joint::JointSpec;
use crate::sketch::slope::SlopeProfile;
use crate::sketch::{Inset, Section, edge_arcs};
use log::debug;
use nalgebra::{Point2, Point3};

/// Physical parameters shared by every design family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChuteParams {
    pub outer_width: Real,
    pub outer_depth: Real,
    pub wall_thickness: Real,
    /// Height of one part; two-piece designs stack two of them.
    pub part_height: Real,
    pub outlet_diameter: Real,
    /// Distance from the front edge to the outlet center; `None` centers it.
    pub outlet_offset: Option<Real>,
    pub segment_count: usize,
    /// Floor tilt in degrees, rising from the front edge toward the back.
    pub slope_angle: Real,
    pub joint: JointSpec,
}

impl Default for ChuteParams {
    fn default() -> Self {
        Self {
            outer_width: 240.0,
            outer_depth: 315.0,
            wall_thickness: 2.0,
            part_height: 60.0,
            outlet_diameter: 100.0,
            outlet_offset: None,
            segment_count: 32,
            slope_angle: 0.0,
            joint: JointSpec::default(),
        }
    }
}

impl ChuteParams {
    /// y of the front (low) edge of the footprint.
    pub fn front_y(&self) -> Real {
        -self.outer_depth / 2.0
    }

    /// y of the back edge of the footprint.
    pub fn back_y(&self) -> Real {
        self.outer_depth / 2.0
    }

    /// The rectangular intake.
    pub fn footprint(&self) -> Section {
        Section::rectangle(self.outer_width, self.outer_depth)
    }

    pub fn outlet_center(&self) -> Point2<Real> {
        match self.outlet_offset {
            Some(offset) => Point2::new(0.0, self.front_y() + offset),
            None => Point2::origin(),
        }
    }

    /// The circular outlet, checked against the footprint.
    pub fn outlet(&self) -> Result<Section, ValidationError> {
        let outlet = Section::circle(self.outlet_diameter, self.outlet_center());
        self.check_outlet(&outlet)?;
        Ok(outlet)
    }

    /// Reject an opening that pokes out of the footprint or is thinner than
    /// two walls.
    pub fn check_outlet(&self, opening: &Section) -> Result<(), ValidationError> {
        opening.validate()?;
        if !opening.fits_within(&self.footprint()) {
            let center = opening.center();
            return Err(ValidationError::OutletOutsideFootprint {
                center: Point3::new(center.x, center.y, 0.0),
                radius: opening.width().max(opening.depth()) / 2.0,
            });
        }
        opening.inset(self.wall_thickness)?;
        Ok(())
    }

    /// Floor profile over the full outer depth, `base` high at the front edge.
    pub fn slope(&self, base: Real) -> Result<SlopeProfile, ValidationError> {
        SlopeProfile::new(self.front_y(), self.outer_depth, self.slope_angle, base)
    }

    /// Checks shared by all designs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("outer width", self.outer_width)?;
        positive("outer depth", self.outer_depth)?;
        positive("wall thickness", self.wall_thickness)?;
        positive("part height", self.part_height)?;
        positive("outlet diameter", self.outlet_diameter)?;
        edge_arcs(self.segment_count)?;
        self.slope(0.0)?;
        self.footprint().inset(self.wall_thickness)?;
        Ok(())
    }
}

/// How the front part of a front/back split ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrontLip {
    /// A closed end wall `height` above the bottom of the part.
    Wall { height: Real },
    /// No end wall. The side walls stop `start` behind the front edge and
    /// only the floor slab runs on to the edge.
    Open { start: Real },
}

/// The design families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Design {
    /// One piece, rectangular intake to circular outlet.
    Funnel,
    /// Rectangle to elliptical waist, waist to circular outlet.
    TwoPiece { waist_width: Real, waist_depth: Real },
    /// Straight upper tube with a boss, sloped lower funnel with a recess.
    SnapFit,
    /// Straight upper tube, lower funnel ending in a sloped rectangular slot.
    OpenSlot { slot_width: Real, slot_length: Real },
    /// U channel with a sloped floor, split across the depth axis.
    FrontBack { front_depth: Real, lip: FrontLip },
}

impl Design {
    pub const fn name(&self) -> &'static str {
        match self {
            Design::Funnel => "funnel",
            Design::TwoPiece { .. } => "two_piece",
            Design::SnapFit => "snap_fit",
            Design::OpenSlot { .. } => "open_slot",
            Design::FrontBack { .. } => "front_back",
        }
    }
}

/// A named design with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Chute {
    pub name: String,
    pub design: Design,
    pub params: ChuteParams,
}

impl Chute {
    pub fn new(name: impl Into<String>, design: Design, params: ChuteParams) -> Self {
        Self {
            name: name.into(),
            design,
            params,
        }
    }

    /// File stem of one part: `<chute>_<role>`.
    pub fn part_name(&self, role: &str) -> String {
        format!("{}_{}", self.name, role)
    }

    /// Build every part of this chute.
    pub fn build(&self) -> Result<Vec<Part>, ValidationError> {
        self.params.validate()?;
        let parts = match self.design {
            Design::Funnel => vec![funnel::body(self)?],
            Design::TwoPiece {
                waist_width,
                waist_depth,
            } => funnel::two_piece(self, waist_width, waist_depth)?,
            Design::SnapFit => snap_fit::build(self)?,
            Design::OpenSlot {
                slot_width,
                slot_length,
            } => open_slot::build(self, slot_width, slot_length)?,
            Design::FrontBack { front_depth, lip } => front_back::build(self, front_depth, lip)?,
        };
        debug!("{} ({}): built {} parts", self.name, self.design.name(), parts.len());
        Ok(parts)
    }

    /// The chutes written by the batch entry point.
    pub fn presets() -> Vec<Chute> {
        let base = ChuteParams::default();
        let sloped = ChuteParams {
            slope_angle: 20.0,
            ..base
        };
        vec![
            Chute::new("funnel_centered", Design::Funnel, base),
            Chute::new(
                "funnel_offset",
                Design::Funnel,
                ChuteParams {
                    outlet_offset: Some(80.0),
                    ..base
                },
            ),
            Chute::new(
                "two_piece",
                Design::TwoPiece {
                    waist_width: 180.0,
                    waist_depth: 220.0,
                },
                base,
            ),
            Chute::new(
                "snap_fit",
                Design::SnapFit,
                ChuteParams {
                    outlet_offset: Some(80.0),
                    ..sloped
                },
            ),
            Chute::new(
                "open_slot",
                Design::OpenSlot {
                    slot_width: 100.0,
                    slot_length: 30.0,
                },
                ChuteParams {
                    outlet_offset: Some(40.0),
                    ..sloped
                },
            ),
            Chute::new(
                "front_back",
                Design::FrontBack {
                    front_depth: 100.0,
                    lip: FrontLip::Wall { height: 10.0 },
                },
                ChuteParams {
                    part_height: 120.0,
                    ..sloped
                },
            ),
        ]
    }
}
