//! Closure and orientation analysis for parts

use crate::float_types::Real;
use crate::mesh::Part;

#[cfg(feature = "hashmap")]
use hashbrown::HashMap;
#[cfg(not(feature = "hashmap"))]
use std::collections::HashMap;

/// Topology report for one [`Part`].
///
/// Edges are compared by vertex index, which is why builders share vertices
/// between adjacent bands instead of duplicating positions.
#[derive(Debug, Clone)]
pub struct ManifoldAnalysis {
    /// Closed wherever not declared open, consistently wound, no edge shared
    /// by more than two faces
    pub is_manifold: bool,
    /// Edges used by exactly one face
    pub boundary_edges: usize,
    /// Boundary edges that were not declared open by the builder
    pub undeclared_boundary_edges: usize,
    /// Edges shared by more than two faces
    pub non_manifold_edges: usize,
    /// Vertices no face references
    pub isolated_vertices: usize,
    /// Face indices outside the vertex pool
    pub invalid_indices: usize,
    /// Number of edge-connected face groups
    pub connected_components: usize,
    /// Every interior edge is walked once in each direction
    pub consistent_orientation: bool,
    /// Euler characteristic (V - E + F)
    pub euler_characteristic: i64,
    /// Divergence-theorem volume, meaningful for closed parts
    pub signed_volume: Real,
}

/// Per undirected edge: how often it is walked low→high and high→low.
#[derive(Debug, Default, Clone, Copy)]
struct EdgeUse {
    forward: usize,
    backward: usize,
}

impl EdgeUse {
    const fn total(&self) -> usize {
        self.forward + self.backward
    }
}

impl Part {
    /// Analyze closure, winding and connectivity of this part.
    pub fn analyze_manifold(&self) -> ManifoldAnalysis {
        let len = self.vertices.len();
        let mut edges: HashMap<(usize, usize), EdgeUse> = HashMap::new();
        let mut referenced = vec![false; len];
        let mut invalid_indices = 0;

        for face in &self.faces {
            for &i in &face.indices {
                match referenced.get_mut(i) {
                    Some(seen) => *seen = true,
                    None => invalid_indices += 1,
                }
            }
            for (a, b) in face.edges() {
                let entry = edges.entry((a.min(b), a.max(b))).or_default();
                if a < b {
                    entry.forward += 1;
                } else {
                    entry.backward += 1;
                }
            }
        }

        let mut boundary_edges = 0;
        let mut undeclared_boundary_edges = 0;
        let mut non_manifold_edges = 0;
        let mut consistent_orientation = true;
        for (key, usage) in &edges {
            match usage.total() {
                1 => {
                    boundary_edges += 1;
                    if !self.open_edges.contains(key) {
                        undeclared_boundary_edges += 1;
                    }
                },
                2 => {
                    if usage.forward != 1 {
                        consistent_orientation = false;
                    }
                },
                _ => non_manifold_edges += 1,
            }
        }

        let isolated_vertices = referenced.iter().filter(|r| !**r).count();
        let connected_components = if invalid_indices == 0 {
            self.count_connected_components()
        } else {
            0
        };
        let euler_characteristic = len as i64 - edges.len() as i64 + self.faces.len() as i64;

        ManifoldAnalysis {
            is_manifold: undeclared_boundary_edges == 0
                && non_manifold_edges == 0
                && invalid_indices == 0
                && consistent_orientation,
            boundary_edges,
            undeclared_boundary_edges,
            non_manifold_edges,
            isolated_vertices,
            invalid_indices,
            connected_components,
            consistent_orientation,
            euler_characteristic,
            signed_volume: if invalid_indices == 0 { self.signed_volume() } else { 0.0 },
        }
    }

    /// True when every face index is inside the vertex pool.
    pub fn indices_valid(&self) -> bool {
        let len = self.vertices.len();
        self.faces.iter().all(|f| f.indices.iter().all(|&i| i < len))
    }

    /// Union-find over vertices joined by face edges, counted per face.
    fn count_connected_components(&self) -> usize {
        let mut parent: Vec<usize> = (0..self.vertices.len()).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for face in &self.faces {
            let [a, b, c] = face.indices;
            for (x, y) in [(a, b), (b, c)] {
                let (rx, ry) = (find(&mut parent, x), find(&mut parent, y));
                if rx != ry {
                    parent[rx] = ry;
                }
            }
        }

        let mut roots: Vec<usize> = self
            .faces
            .iter()
            .map(|f| find(&mut parent, f.indices[0]))
            .collect();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    }
}
