/// A trait for any shape which can be represented by triangles
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A triangulated 3D surface.
///
/// Anything that can present itself as a bunch of triangles in 3D
/// can automatically use all the triangle-based IO backends.
pub trait Triangulated3D {
    /// Call `f` for each triangle.
    ///
    /// The triangle is `[v0, v1, v2]` in winding order, followed by its unit
    /// facet normal (zero for a degenerate triangle).
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut([Point3<Real>; 3], Vector3<Real>);
}

/// Unit normal implied by the winding of `tri` (right-hand rule).
pub fn facet_normal(tri: &[Point3<Real>; 3]) -> Vector3<Real> {
    (tri[1] - tri[0])
        .cross(&(tri[2] - tri[0]))
        .try_normalize(Real::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}
