//! Planar boundary curves for chute cross-sections.
//!
//! A [`Section`] is a closed curve in the width/depth plane (rectangular intake,
//! elliptical waist, circular outlet, rectangular slot). A [`Channel`] is the
//! open-topped U outline used by parts that are split across the depth axis.
//!
//! Every closed section samples to the same traversal: counter-clockwise seen
//! from above, starting in the front-left corner direction, with a quarter of
//! the samples on each side. Two sections sampled with the same count can
//! therefore be lofted index-to-index without twisting.

pub mod joint;
pub mod slope;

use crate::errors::{ValidationError, positive};
use crate::float_types::{FRAC_PI_4, Real, TAU};
use nalgebra::{Point2, Vector2};
use std::ops::Range;

/// Something that can be shrunk inward by a uniform margin.
pub trait Inset: Sized {
    /// Move every boundary inward by `distance`.
    ///
    /// Fails with [`ValidationError::NonPositiveDimension`] when the shrunken
    /// shape would vanish or turn inside out.
    fn inset(&self, distance: Real) -> Result<Self, ValidationError>;
}

/// A closed cross-section curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Section {
    /// Axis-aligned rectangle, `width` along x and `depth` along y.
    Rectangle {
        width: Real,
        depth: Real,
        center: Point2<Real>,
    },
    /// Axis-aligned ellipse; a circle when `width == depth`.
    Ellipse {
        width: Real,
        depth: Real,
        center: Point2<Real>,
    },
}

impl Section {
    /// Rectangle centered on the origin.
    pub fn rectangle(width: Real, depth: Real) -> Self {
        Section::Rectangle {
            width,
            depth,
            center: Point2::origin(),
        }
    }

    /// Rectangle centered on `center`, e.g. an outlet slot.
    pub const fn slot(width: Real, depth: Real, center: Point2<Real>) -> Self {
        Section::Rectangle {
            width,
            depth,
            center,
        }
    }

    pub const fn ellipse(width: Real, depth: Real, center: Point2<Real>) -> Self {
        Section::Ellipse {
            width,
            depth,
            center,
        }
    }

    pub const fn circle(diameter: Real, center: Point2<Real>) -> Self {
        Section::Ellipse {
            width: diameter,
            depth: diameter,
            center,
        }
    }

    pub const fn width(&self) -> Real {
        match *self {
            Section::Rectangle { width, .. } | Section::Ellipse { width, .. } => width,
        }
    }

    pub const fn depth(&self) -> Real {
        match *self {
            Section::Rectangle { depth, .. } | Section::Ellipse { depth, .. } => depth,
        }
    }

    pub const fn center(&self) -> Point2<Real> {
        match *self {
            Section::Rectangle { center, .. } | Section::Ellipse { center, .. } => center,
        }
    }

    /// Axis-aligned bounds `(min, max)`.
    pub fn bounds(&self) -> (Point2<Real>, Point2<Real>) {
        let half = Vector2::new(self.width() / 2.0, self.depth() / 2.0);
        (self.center() - half, self.center() + half)
    }

    /// True when the whole section lies inside `other`'s bounds.
    pub fn fits_within(&self, other: &Section) -> bool {
        let (min, max) = self.bounds();
        let (outer_min, outer_max) = other.bounds();
        min.x >= outer_min.x && min.y >= outer_min.y && max.x <= outer_max.x && max.y <= outer_max.y
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("section width", self.width())?;
        positive("section depth", self.depth())?;
        Ok(())
    }

    /// Sample `count` points around the section.
    ///
    /// Sample `i` of a rectangle and sample `i` of an ellipse sampled with the
    /// same count belong to the same side, see [`edge_arcs`].
    pub fn sample(&self, count: usize) -> Result<Vec<Point2<Real>>, ValidationError> {
        self.validate()?;
        let arcs = edge_arcs(count)?;
        let per_edge = count / 4;
        let center = self.center();
        let (hw, hd) = (self.width() / 2.0, self.depth() / 2.0);

        let points = match self {
            Section::Rectangle { .. } => {
                let corners = [
                    center + Vector2::new(-hw, -hd), // front left
                    center + Vector2::new(hw, -hd),  // front right
                    center + Vector2::new(hw, hd),   // back right
                    center + Vector2::new(-hw, hd),  // back left
                ];
                arcs.iter()
                    .enumerate()
                    .flat_map(|(edge, arc)| {
                        let start = corners[edge];
                        let end = corners[(edge + 1) % 4];
                        arc.clone().map(move |i| {
                            let t = (i - edge * per_edge) as Real / per_edge as Real;
                            start + (end - start) * t
                        })
                    })
                    .collect()
            },
            Section::Ellipse { .. } => (0..count)
                .map(|i| {
                    let theta = -3.0 * FRAC_PI_4 + TAU * i as Real / count as Real;
                    center + Vector2::new(hw * theta.cos(), hd * theta.sin())
                })
                .collect(),
        };
        Ok(points)
    }
}

impl Inset for Section {
    fn inset(&self, distance: Real) -> Result<Self, ValidationError> {
        let width = positive("inset section width", self.width() - 2.0 * distance)?;
        let depth = positive("inset section depth", self.depth() - 2.0 * distance)?;
        Ok(match *self {
            Section::Rectangle { center, .. } => Section::Rectangle { width, depth, center },
            Section::Ellipse { center, .. } => Section::Ellipse { width, depth, center },
        })
    }
}

/// Index ranges of the four sides of a sampled section: front, right, back, left.
///
/// Each side receives exactly `count / 4` consecutive samples; together the
/// ranges cover `0..count` once. `count` must be a positive multiple of 4.
pub fn edge_arcs(count: usize) -> Result<[Range<usize>; 4], ValidationError> {
    if count == 0 || count % 4 != 0 {
        return Err(ValidationError::SegmentCount(count));
    }
    let k = count / 4;
    Ok([0..k, k..2 * k, 2 * k..3 * k, 3 * k..4 * k])
}

/// Open-topped U outline in the local `(u, v)` plane of a channel sweep.
///
/// Two side walls at `u = ±half_width` stand on a bottom at `v = bottom`;
/// the top edge is left open. The outer outline of a channel wall and the
/// inner outline (the coin path) are both channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub half_width: Real,
    pub bottom: Real,
}

impl Channel {
    pub const fn new(half_width: Real, bottom: Real) -> Self {
        Self { half_width, bottom }
    }

    /// Same side walls, different bottom.
    pub const fn with_bottom(self, bottom: Real) -> Self {
        Self { bottom, ..self }
    }
}

impl Inset for Channel {
    fn inset(&self, distance: Real) -> Result<Self, ValidationError> {
        Ok(Self {
            half_width: positive("inset channel half width", self.half_width - distance)?,
            bottom: self.bottom + distance,
        })
    }
}

/// Number of points in a channel wall loop, see [`wall_loop`].
pub const WALL_LOOP_LEN: usize = 10;

/// Cross-section of a channel wall between `outer` and `inner`, up to `top`.
///
/// Returns ten points, counter-clockwise seen from +w:
///
/// ```text
///  9 8       7 4       3 2
///  +-+-------+ +-------+-+   top
///  | |       | |       | |
///  | |       6-5       | |
///  0---------------------1
/// ```
///
/// Points 3 and 8 sit on the top rim at `u = ±seam`, where the two halves of a
/// split part meet. When the seam coincides with a rim corner the points are
/// equal and collapse into one vertex once pushed into a mesh, which is how
/// the boss and recess steps stay free of T-junctions.
pub fn wall_loop(
    outer: &Channel,
    inner: &Channel,
    top: Real,
    seam: Real,
) -> Result<[Point2<Real>; WALL_LOOP_LEN], ValidationError> {
    positive("wall thickness", outer.half_width - inner.half_width)?;
    positive("channel height", top - outer.bottom)?;
    if inner.bottom < outer.bottom || inner.bottom > top {
        return Err(ValidationError::FloorOutOfRange {
            elevation: inner.bottom,
            limit: top,
        });
    }
    if seam < inner.half_width || seam > outer.half_width {
        return Err(ValidationError::JointTooLarge(format!(
            "seam at {} lies outside the wall between {} and {}",
            seam, inner.half_width, outer.half_width
        )));
    }
    let (o, i) = (outer.half_width, inner.half_width);
    Ok([
        Point2::new(-o, outer.bottom),
        Point2::new(o, outer.bottom),
        Point2::new(o, top),
        Point2::new(seam, top),
        Point2::new(i, top),
        Point2::new(i, inner.bottom),
        Point2::new(-i, inner.bottom),
        Point2::new(-i, top),
        Point2::new(-seam, top),
        Point2::new(-o, top),
    ])
}
