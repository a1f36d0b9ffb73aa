//! `Part` struct: an indexed triangle mesh for one printable fragment.
//!
//! A part is an append-only vertex pool plus triangles that reference it by
//! index. Faces are tagged with the [`Surface`] they belong to so builders and
//! tests can reason about outer walls, inner walls and caps separately.

pub mod manifold;

use crate::errors::ValidationError;
use crate::float_types::{Real, tolerance};
use crate::triangulated::{Triangulated3D, facet_normal};
use log::debug;
use nalgebra::{Point3, Rotation3, Vector3};

/// Which surface of the solid a triangle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Exterior side walls.
    Outer,
    /// Walls facing the coin path.
    Inner,
    /// Upward-facing rim closing a shell's top.
    TopCap,
    /// Downward-facing rim closing a shell's bottom.
    BottomCap,
    /// Boss and recess faces of a two-piece joint.
    Joint,
    /// Closed end walls and lips of channel parts.
    EndWall,
}

/// One triangle; counter-clockwise when seen from outside the solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 3],
    pub surface: Surface,
}

impl Face {
    /// Directed edges in winding order.
    pub const fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.indices;
        [(a, b), (b, c), (c, a)]
    }
}

/// Whether a band keeps the winding implied by its ring order or reverses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Outward,
    Inward,
}

#[derive(Clone, Debug)]
pub struct Part {
    /// File stem, `<design>_<role>`
    pub name: String,
    pub vertices: Vec<Point3<Real>>,
    pub faces: Vec<Face>,
    /// Edges intentionally left without a neighbouring face, stored `(min, max)`.
    pub open_edges: Vec<(usize, usize)>,
}

#[inline]
fn coincident(a: &Point3<Real>, b: &Point3<Real>, tol: Real) -> bool {
    (a - b).norm_squared() <= tol * tol
}

impl Part {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            faces: Vec::new(),
            open_edges: Vec::new(),
        }
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, point: Point3<Real>) -> usize {
        self.vertices.push(point);
        self.vertices.len() - 1
    }

    /// Append a closed loop of points and return one index per slot.
    ///
    /// A point that coincides with a point of `previous` (the same slot is
    /// tried first) or with a point already pushed for this loop re-uses that
    /// vertex instead of pushing a new one. Faces that end up repeating an
    /// index are dropped by [`Part::add_face`], so collapsed slots turn quads
    /// into triangles without leaving gaps.
    pub fn push_ring(&mut self, points: &[Point3<Real>], previous: Option<&[usize]>) -> Vec<usize> {
        let tol = tolerance();
        let mut ring: Vec<usize> = Vec::with_capacity(points.len());
        for (slot, point) in points.iter().enumerate() {
            let shared = previous
                .and_then(|prev| prev.get(slot))
                .into_iter()
                .chain(previous.into_iter().flatten())
                .chain(ring.iter())
                .copied()
                .find(|&index| {
                    self.vertices
                        .get(index)
                        .is_some_and(|v| coincident(v, point, tol))
                });
            let index = match shared {
                Some(index) => index,
                None => self.push_vertex(*point),
            };
            ring.push(index);
        }
        ring
    }

    /// Add a triangle.
    ///
    /// Returns `Ok(false)` without adding anything when two indices are equal
    /// (a triangle collapsed by shared vertices).
    pub fn add_face(&mut self, indices: [usize; 3], surface: Surface) -> Result<bool, ValidationError> {
        let len = self.vertices.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(ValidationError::IndexOutOfRange { index, len });
        }
        let [a, b, c] = indices;
        if a == b || b == c || c == a {
            return Ok(false);
        }
        self.faces.push(Face { indices, surface });
        Ok(true)
    }

    fn add_oriented(&mut self, [a, b, c]: [usize; 3], facing: Facing, surface: Surface) -> Result<bool, ValidationError> {
        match facing {
            Facing::Outward => self.add_face([a, b, c], surface),
            Facing::Inward => self.add_face([a, c, b], surface),
        }
    }

    /// Connect ring `a` to ring `b` slot by slot with two triangles per quad.
    ///
    /// Each quad is split along its shorter diagonal.
    ///
    /// With both rings counter-clockwise about the sweep axis and `b` further
    /// along the profile (down the outside, in along the bottom, up the inside,
    /// out along the top) the band faces out of the solid. Returns the number
    /// of triangles emitted.
    pub fn loft(&mut self, a: &[usize], b: &[usize], facing: Facing, surface: Surface) -> Result<usize, ValidationError> {
        self.loft_with(a, b, facing, |_| surface)
    }

    /// Like [`Part::loft`], tagging the quad that starts at each slot separately.
    pub fn loft_with<F>(&mut self, a: &[usize], b: &[usize], facing: Facing, surface_of: F) -> Result<usize, ValidationError>
    where
        F: Fn(usize) -> Surface,
    {
        if a.len() != b.len() {
            return Err(ValidationError::PointCountMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        let n = a.len();
        let mut emitted = 0;
        for i in 0..n {
            let j = (i + 1) % n;
            let surface = surface_of(i);
            let quad = if self.shorter_first(a[i], b[j], a[j], b[i]) {
                [[a[i], b[i], b[j]], [a[i], b[j], a[j]]]
            } else {
                [[a[i], b[i], a[j]], [a[j], b[i], b[j]]]
            };
            for triangle in quad {
                emitted += self.add_oriented(triangle, facing, surface)? as usize;
            }
        }
        debug!("{}: lofted {} triangles over {} slots", self.name, emitted, n);
        Ok(emitted)
    }

    /// True unless `p`–`q` is strictly longer than `r`–`s`. Unknown indices
    /// compare as equal and are reported by [`Part::add_face`].
    fn shorter_first(&self, p: usize, q: usize, r: usize, s: usize) -> bool {
        let length = |x: usize, y: usize| Some((self.vertices.get(x)? - self.vertices.get(y)?).norm_squared());
        match (length(p, q), length(r, s)) {
            (Some(first), Some(second)) => first <= second,
            _ => true,
        }
    }

    /// Fan from `apex` across the open polyline `rim`: `[apex, rim[k], rim[k+1]]`.
    pub fn fan(&mut self, apex: usize, rim: &[usize], facing: Facing, surface: Surface) -> Result<usize, ValidationError> {
        let mut emitted = 0;
        for pair in rim.windows(2) {
            emitted += self.add_oriented([apex, pair[0], pair[1]], facing, surface)? as usize;
        }
        Ok(emitted)
    }

    /// Record `a`–`b` as an intentionally open edge.
    pub fn declare_open(&mut self, a: usize, b: usize) {
        if a != b {
            self.open_edges.push((a.min(b), a.max(b)));
        }
    }

    /// Rotate every vertex about the origin.
    ///
    /// Only proper rotations are accepted by construction, so winding, and with
    /// it every outward normal, survives the move.
    pub fn rotate(&mut self, rotation: &Rotation3<Real>) {
        for v in &mut self.vertices {
            *v = rotation * *v;
        }
    }

    /// Number of faces tagged `surface`.
    pub fn count(&self, surface: Surface) -> usize {
        self.faces.iter().filter(|f| f.surface == surface).count()
    }

    /// The three corner positions of `face`.
    pub fn triangle(&self, face: &Face) -> [Point3<Real>; 3] {
        face.indices.map(|i| self.vertices[i])
    }

    /// Enclosed volume by the divergence theorem; positive when the faces wind
    /// outward and the shell is closed.
    pub fn signed_volume(&self) -> Real {
        self.faces
            .iter()
            .map(|f| {
                let [a, b, c] = self.triangle(f);
                a.coords.dot(&b.coords.cross(&c.coords))
            })
            .sum::<Real>()
            / 6.0
    }

    /// Axis-aligned bounds `(min, max)`; `None` for an empty part.
    pub fn bounding_box(&self) -> Option<(Point3<Real>, Point3<Real>)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (lo.inf(v), hi.sup(v))
        }))
    }
}

impl Triangulated3D for Part {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Point3<Real>; 3], Vector3<Real>),
    {
        for face in &self.faces {
            let tri = self.triangle(face);
            f(tri, facet_normal(&tri));
        }
    }
}
