//! Test support library
//! Provides various helper functions & utilities for tests.

#![allow(dead_code)]

use coin_chute::chute::{Chute, ChuteParams};
use coin_chute::float_types::{Real, TAU};
use coin_chute::mesh::Part;
use coin_chute::mesh::manifold::ManifoldAnalysis;
use nalgebra::Point3;

/// The flat rectangle-to-circle funnel: 240 x 315, wall 2, height 60,
/// outlet 100, 32 segments.
pub fn funnel_params() -> ChuteParams {
    ChuteParams::default()
}

/// Look up a preset by name.
pub fn preset(name: &str) -> Chute {
    Chute::presets()
        .into_iter()
        .find(|chute| chute.name == name)
        .unwrap_or_else(|| panic!("no preset named {name}"))
}

/// Print the analysis of `part` and return it.
pub fn analyze(part: &Part) -> ManifoldAnalysis {
    let analysis = part.analyze_manifold();
    println!(
        "{}: vertices={}, faces={}, boundary_edges={}, non_manifold_edges={}, volume={:.3}",
        part.name,
        part.vertices.len(),
        part.faces.len(),
        analysis.boundary_edges,
        analysis.non_manifold_edges,
        analysis.signed_volume
    );
    analysis
}

/// Assert that `part` is closed everywhere it does not declare an opening,
/// consistently wound, in one piece and encloses a positive volume.
pub fn assert_closed(part: &Part) -> ManifoldAnalysis {
    let analysis = analyze(part);
    assert_eq!(analysis.invalid_indices, 0, "{} references missing vertices", part.name);
    assert_eq!(
        analysis.undeclared_boundary_edges, 0,
        "{} has open edges it did not declare",
        part.name
    );
    assert_eq!(analysis.non_manifold_edges, 0, "{} has non-manifold edges", part.name);
    assert!(analysis.consistent_orientation, "{} has inconsistent winding", part.name);
    assert_eq!(analysis.connected_components, 1, "{} is not in one piece", part.name);
    assert!(analysis.is_manifold, "{} should be a valid manifold", part.name);
    assert!(
        analysis.signed_volume > 0.0,
        "{} encloses a volume of {}",
        part.name,
        analysis.signed_volume
    );
    analysis
}

/// Generalized winding number of `point` with respect to the faces of
/// `part`: 1 inside a closed outward-wound solid, 0 outside.
pub fn winding_number(part: &Part, point: &Point3<Real>) -> Real {
    let total: Real = part
        .faces
        .iter()
        .map(|face| {
            let [a, b, c] = part.triangle(face).map(|v| v - point);
            let (la, lb, lc) = (a.norm(), b.norm(), c.norm());
            let numerator = a.dot(&b.cross(&c));
            let denominator = la * lb * lc + a.dot(&b) * lc + b.dot(&c) * la + c.dot(&a) * lb;
            2.0 * numerator.atan2(denominator)
        })
        .sum();
    total / (2.0 * TAU)
}

/// Assert that the solid lies on the inner side of every face and nothing
/// else does: just behind each face the winding number is 1, just in front
/// of it 0. A wall that pokes through another wall, or a fold, breaks this.
pub fn assert_solid(part: &Part) {
    const STEP: Real = 1e-3;
    for (k, face) in part.faces.iter().enumerate() {
        let [a, b, c] = part.triangle(face);
        let normal = (b - a).cross(&(c - a));
        // zero-area stitching triangles carry no direction
        if normal.norm() < 2e-6 {
            continue;
        }
        let normal = normal.normalize();
        let centroid = Point3::from((a.coords + b.coords + c.coords) / 3.0);
        let inside = winding_number(part, &(centroid - normal * STEP));
        let outside = winding_number(part, &(centroid + normal * STEP));
        assert!(
            (inside - 1.0).abs() < 1e-3 && outside.abs() < 1e-3,
            "{} face {k} ({:?}): winding {inside:.4} behind, {outside:.4} in front",
            part.name,
            face.surface
        );
    }
}
