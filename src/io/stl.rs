use crate::io::{IoError, write_atomic};
use crate::mesh::Part;
use crate::triangulated::Triangulated3D;
use std::io::Cursor;
use log::info;
use std::path::{Path, PathBuf};

/// Export to ASCII STL
/// Convert this shape to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use coin_chute::chute::{Chute, ChuteParams, Design};
/// # use coin_chute::io::stl::to_stl_ascii;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let chute = Chute::new("funnel", Design::Funnel, ChuteParams::default());
/// let part = &chute.build()?[0];
/// let text = to_stl_ascii(part, &part.name);
/// assert!(text.starts_with("solid funnel_body\n"));
/// # Ok(())
/// # }
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    shape.visit_triangles(|tri, n| {
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for p in &tri {
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// Facet normals are taken from the winding of each triangle. Binary STL has
/// no room for a solid name, so `_name` is accepted for symmetry with
/// [`to_stl_ascii`] only.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T, _name: &str) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    shape.visit_triangles(|tri, n| {
        #[allow(clippy::unnecessary_cast)]
        {
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
            });
        }
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Encode `part` and write it to `<dir>/<part.name>.stl`.
///
/// The whole file is encoded in memory before anything touches the disk and
/// lands at its final path by rename, so a failed run never leaves a
/// truncated mesh behind.
pub fn write_part(part: &Part, dir: &Path) -> Result<PathBuf, IoError> {
    if let Some(index) = part.faces.iter().flat_map(|f| f.indices).find(|&i| i >= part.vertices.len()) {
        return Err(crate::errors::ValidationError::IndexOutOfRange {
            index,
            len: part.vertices.len(),
        }
        .into());
    }
    let bytes = to_stl_binary(part, &part.name)?;
    let path = dir.join(format!("{}.stl", part.name));
    write_atomic(&path, &bytes)?;
    info!(
        "wrote {} ({} triangles, {} bytes)",
        path.display(),
        part.faces.len(),
        bytes.len()
    );
    Ok(path)
}

impl Part {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
    pub fn to_stl_binary(&self, name: &str) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self, name)
    }
}
