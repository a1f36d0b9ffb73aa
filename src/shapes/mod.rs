//! Shell builders: the lofting routine behind every chute part.
//!
//! [`Shell`] stacks closed cross-sections along the height axis and lofts them
//! as a cycle, so the last ring connects back to the first and the hollow part
//! closes on itself. [`Sweep`] strings channel wall loops along a horizontal
//! axis and closes both ends with caps.

use crate::errors::{ValidationError, positive};
use crate::float_types::Real;
use crate::mesh::{Facing, Part, Surface};
use crate::sketch::slope::SlopeProfile;
use crate::sketch::{Channel, Section, WALL_LOOP_LEN, edge_arcs, wall_loop};
use log::debug;
use nalgebra::{Point2, Point3, Rotation3};

/// Height of a ring: level, or following a floor slope point by point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Elevation {
    Flat(Real),
    Sloped(SlopeProfile),
}

impl Elevation {
    pub fn lift(&self, points: &[Point2<Real>]) -> Vec<Point3<Real>> {
        match self {
            Elevation::Flat(z) => points.iter().map(|p| Point3::new(p.x, p.y, *z)).collect(),
            Elevation::Sloped(profile) => profile.lift(points),
        }
    }

    /// Highest elevation reached over `points`.
    pub fn max_over(&self, points: &[Point2<Real>]) -> Real {
        self.lift(points)
            .iter()
            .map(|p| p.z)
            .fold(Real::NEG_INFINITY, Real::max)
    }
}

/// Builder for a hollow part whose cross-sections are stacked along z.
///
/// Rings are listed in profile order: down the outside, in along the bottom,
/// up the inside and out along the top. Every ring is sampled with the same
/// segment count, so a rectangle, an ellipse and a circle line up index by
/// index and any pair of them can be lofted. The surface passed with a ring
/// tags the band from that ring to the next one. At least three rings are
/// needed for the cycle to enclose a volume.
///
/// ```rust
/// # use coin_chute::shapes::{Elevation, Shell};
/// # use coin_chute::sketch::{Inset, Section};
/// # use coin_chute::mesh::Surface;
/// # use nalgebra::Point2;
/// # fn main() -> Result<(), coin_chute::errors::ValidationError> {
/// let top = Section::rectangle(240.0, 315.0);
/// let outlet = Section::circle(100.0, Point2::origin());
/// let part = Shell::new("funnel", 32)?
///     .ring(Surface::Outer, &top, Elevation::Flat(60.0))?
///     .ring(Surface::BottomCap, &outlet, Elevation::Flat(0.0))?
///     .ring(Surface::Inner, &outlet.inset(2.0)?, Elevation::Flat(0.0))?
///     .ring(Surface::TopCap, &top.inset(2.0)?, Elevation::Flat(60.0))?
///     .close()?;
/// assert_eq!(part.faces.len(), 4 * 64);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Shell {
    part: Part,
    segments: usize,
    rings: Vec<(Surface, Vec<usize>)>,
}

impl Shell {
    pub fn new(name: impl Into<String>, segments: usize) -> Result<Self, ValidationError> {
        edge_arcs(segments)?;
        Ok(Self {
            part: Part::new(name),
            segments,
            rings: Vec::new(),
        })
    }

    /// Sample `section`, lift it to `elevation` and append it as the next ring.
    pub fn ring(mut self, surface: Surface, section: &Section, elevation: Elevation) -> Result<Self, ValidationError> {
        let points = elevation.lift(&section.sample(self.segments)?);
        let previous = self.rings.last().map(|(_, ring)| ring.as_slice());
        let ring = self.part.push_ring(&points, previous);
        self.rings.push((surface, ring));
        Ok(self)
    }

    /// Loft every ring to the next, wrapping the last one back to the first.
    pub fn close(mut self) -> Result<Part, ValidationError> {
        let n = self.rings.len();
        for k in 0..n {
            let (surface, from) = &self.rings[k];
            let (_, to) = &self.rings[(k + 1) % n];
            self.part.loft(from, to, Facing::Outward, *surface)?;
        }
        debug!(
            "{}: {} rings, {} vertices, {} faces",
            self.part.name,
            n,
            self.part.vertices.len(),
            self.part.faces.len()
        );
        Ok(self.part)
    }
}

/// One cross-section of a channel sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    /// Position along the sweep axis
    pub w: Real,
    pub outer: Channel,
    pub inner: Channel,
    /// Rim height of this loop
    pub top: Real,
    /// Tag for the whole band to the next station; `None` tags per wall side.
    pub band: Option<Surface>,
}

/// Builder for a channel part swept along a horizontal axis.
///
/// Stations are given in descending `w`. Two consecutive stations at the same
/// `w` form a step (an end wall face or a joint shoulder): the loops share
/// every unchanged point and only the changed span produces faces. Both end
/// stations are closed with a cap.
#[derive(Debug, Clone)]
pub struct Sweep {
    name: String,
    top: Real,
    seam: Real,
    stations: Vec<Station>,
}

impl Sweep {
    /// `top` is the rim height shared by every loop, `seam` the half width at
    /// which the two halves of a split part meet on the rim.
    pub fn new(name: impl Into<String>, top: Real, seam: Real) -> Self {
        Self {
            name: name.into(),
            top,
            seam,
            stations: Vec::new(),
        }
    }

    pub fn station(self, w: Real, outer: Channel, inner: Channel, band: Option<Surface>) -> Self {
        let top = self.top;
        self.station_at(w, top, outer, inner, band)
    }

    /// A station whose rim sits at `top` instead of the sweep's rim height.
    ///
    /// With `top` equal to the inner floor the side walls vanish and only the
    /// floor slab is left; a step from such a station to a full one is the
    /// end face of the side walls.
    pub fn station_at(mut self, w: Real, top: Real, outer: Channel, inner: Channel, band: Option<Surface>) -> Self {
        self.stations.push(Station {
            w,
            outer,
            inner,
            top,
            band,
        });
        self
    }

    /// Build the part in the local `(u, v, w)` frame, then rotate it into place.
    pub fn build(self, first_cap: Surface, last_cap: Surface, placement: &Rotation3<Real>) -> Result<Part, ValidationError> {
        positive("station count", self.stations.len() as Real - 1.0)?;
        let mut part = Part::new(self.name);
        let mut rings: Vec<Vec<usize>> = Vec::with_capacity(self.stations.len());
        let mut last_w = Real::INFINITY;

        for station in &self.stations {
            if station.w > last_w {
                return Err(ValidationError::NonPositiveDimension {
                    what: "station spacing",
                    value: last_w - station.w,
                });
            }
            last_w = station.w;
            let points: Vec<Point3<Real>> = wall_loop(&station.outer, &station.inner, station.top, self.seam)?
                .iter()
                .map(|p| Point3::new(p.x, p.y, station.w))
                .collect();
            let ring = part.push_ring(&points, rings.last().map(Vec::as_slice));
            rings.push(ring);
        }

        for (station, pair) in self.stations.iter().zip(rings.windows(2)) {
            let band = station.band;
            part.loft_with(&pair[0], &pair[1], Facing::Outward, |slot| {
                band.unwrap_or_else(|| wall_surface(slot))
            })?;
        }

        if let (Some(first), Some(last)) = (rings.first(), rings.last()) {
            cap(&mut part, first, Facing::Outward, first_cap)?;
            cap(&mut part, last, Facing::Inward, last_cap)?;
        }

        part.rotate(placement);
        debug!(
            "{}: {} stations, {} vertices, {} faces",
            part.name,
            rings.len(),
            part.vertices.len(),
            part.faces.len()
        );
        Ok(part)
    }
}

/// Surface of the quad that starts at `slot` of a wall loop.
const fn wall_surface(slot: usize) -> Surface {
    match slot {
        0 => Surface::BottomCap,
        1 | 9 => Surface::Outer,
        2 | 3 | 7 | 8 => Surface::TopCap,
        _ => Surface::Inner,
    }
}

/// Close a wall loop: a fan over each side wall and a quad over the floor.
fn cap(part: &mut Part, ring: &[usize], facing: Facing, surface: Surface) -> Result<(), ValidationError> {
    let &[olb, orb, ort, rtm, irt, irf, ilf, ilt, ltm, olt] = ring else {
        return Err(ValidationError::PointCountMismatch {
            left: ring.len(),
            right: WALL_LOOP_LEN,
        });
    };
    part.fan(orb, &[ort, rtm, irt, irf], facing, surface)?;
    part.fan(olb, &[ilf, ilt, ltm, olt], facing, surface)?;
    part.fan(olb, &[orb, irf, ilf], facing, surface)?;
    Ok(())
}
