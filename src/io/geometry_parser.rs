use crate::core::geometry::{Vertex, VertexKey};
use crate::error::{GeometryError, ViewerError};
use crate::scene::mesh::Mesh;
use log::{debug, info};
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a mesh from a geometry file on disk.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh, ViewerError> {
    let path = path.as_ref();
    info!("Loading geometry: {}", path.display());

    let file = File::open(path).map_err(|source| ViewerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse(BufReader::new(file))?;

    info!(
        "Geometry loaded: {} unique vertices, {} triangles",
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Parses `v`, `vn` and `f` records into an indexed mesh.
///
/// Faces with more than three corners are fan-triangulated around their
/// first corner, which is only correct for convex planar polygons. Corners
/// whose position and normal are bit-for-bit equal share one vertex slot.
/// Every other record type is ignored, whatever its encoding; only `v`, `vn`
/// and `f` lines must be valid UTF-8.
pub fn parse<R: BufRead>(mut reader: R) -> Result<Mesh, GeometryError> {
    let mut builder = MeshBuilder::default();
    let mut raw = Vec::new();
    let mut number = 0;

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        number += 1;

        let keyword = raw
            .split(|b| b.is_ascii_whitespace())
            .find(|token| !token.is_empty());
        if !matches!(keyword, Some(b"v" | b"vn" | b"f")) {
            continue;
        }
        let line = std::str::from_utf8(&raw)
            .map_err(|_| GeometryError::InvalidEncoding { line: number })?;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let [x, y, z] = parse_triple(number, "v", tokens)?;
                builder.positions.push(Point3::new(x, y, z));
            }
            Some("vn") => {
                let [x, y, z] = parse_triple(number, "vn", tokens)?;
                builder.normals.push(Vector3::new(x, y, z));
            }
            Some("f") => {
                let corners = tokens
                    .map(|token| parse_corner(number, token))
                    .collect::<Result<Vec<_>, _>>()?;
                builder.add_face(number, &corners)?;
            }
            _ => {}
        }
    }

    builder.finish()
}

/// 1-based (position, normal) references of one face corner.
type Corner = (i64, i64);

#[derive(Default)]
struct MeshBuilder {
    positions: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    lookup: HashMap<VertexKey, u32>,
}

impl MeshBuilder {
    fn add_face(&mut self, line: usize, corners: &[Corner]) -> Result<(), GeometryError> {
        if corners.len() < 3 {
            return Err(GeometryError::DegenerateFace {
                line,
                corners: corners.len(),
            });
        }

        // Resolve every corner first so a bad reference leaves no partial face.
        let resolved = corners
            .iter()
            .map(|&corner| self.resolve(line, corner))
            .collect::<Result<Vec<_>, _>>()?;

        for i in 1..resolved.len() - 1 {
            for vertex in [resolved[0], resolved[i], resolved[i + 1]] {
                let index = self.intern(vertex);
                self.indices.push(index);
            }
        }
        Ok(())
    }

    fn resolve(&self, line: usize, (p, n): Corner) -> Result<Vertex, GeometryError> {
        let position = lookup(&self.positions, p).ok_or(GeometryError::IndexOutOfRange {
            line,
            kind: "position",
            index: p,
            available: self.positions.len(),
        })?;
        let normal = lookup(&self.normals, n).ok_or(GeometryError::IndexOutOfRange {
            line,
            kind: "normal",
            index: n,
            available: self.normals.len(),
        })?;
        Ok(Vertex::new(position, normal))
    }

    /// Index of `vertex` in the unique list, appending it on first sight.
    fn intern(&mut self, vertex: Vertex) -> u32 {
        let next = self.vertices.len() as u32;
        let index = *self.lookup.entry(vertex.dedup_key()).or_insert(next);
        if index == next {
            self.vertices.push(vertex);
        }
        index
    }

    fn finish(self) -> Result<Mesh, GeometryError> {
        if self.indices.is_empty() {
            return Err(GeometryError::NoFaces);
        }
        debug!(
            "Parsed {} positions and {} normals into {} unique vertices",
            self.positions.len(),
            self.normals.len(),
            self.vertices.len()
        );
        Ok(Mesh::new(self.vertices, self.indices))
    }
}

fn lookup<T: Copy>(records: &[T], one_based: i64) -> Option<T> {
    usize::try_from(one_based)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| records.get(i).copied())
}

fn parse_triple<'a>(
    line: usize,
    record: &'static str,
    tokens: impl Iterator<Item = &'a str>,
) -> Result<[f32; 3], GeometryError> {
    let mut values = [0.0f32; 3];
    let mut found = 0;

    for token in tokens.take(3) {
        values[found] = token
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| GeometryError::InvalidNumber {
                line,
                token: token.to_string(),
            })?;
        found += 1;
    }

    if found < 3 {
        return Err(GeometryError::MissingComponent {
            line,
            record,
            found,
        });
    }
    Ok(values)
}

/// Accepts `p/t/n` and `p//n`.
fn parse_corner(line: usize, token: &str) -> Result<Corner, GeometryError> {
    let malformed = || GeometryError::MalformedCorner {
        line,
        corner: token.to_string(),
    };

    let mut parts = token.split('/');
    let (Some(p), Some(_texcoord), Some(n), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let p = p.parse::<i64>().map_err(|_| malformed())?;
    let n = n.parse::<i64>().map_err(|_| malformed())?;
    Ok((p, n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(source: &str) -> Result<Mesh, GeometryError> {
        parse(Cursor::new(source))
    }

    #[test]
    fn repeated_corner_collapses_to_one_vertex() {
        let mesh = parse_str(
            "v 0 0 0\nv 1 0 0\nvn 0 0 1\nvn 0 1 0\nf 1//1 1//1 1//1\n",
        )
        .unwrap();
        assert_eq!(mesh.vertices.len(), 1);
        assert_eq!(mesh.indices, vec![0, 0, 0]);
    }

    #[test]
    fn quad_is_fan_triangulated() {
        let mesh = parse_str(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
             vn 0 0 1\n\
             f 1//1 2//1 3//1 4//1\n",
        )
        .unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn pentagon_yields_three_triangles_around_first_corner() {
        let mesh = parse_str(
            "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nvn 0 0 1\n\
             f 1//1 2//1 3//1 4//1 5//1\n",
        )
        .unwrap();
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn equal_values_from_different_records_share_a_slot() {
        // Positions 1 and 2 are identical, so are normals 1 and 2.
        let mesh = parse_str(
            "v 0 0 0\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvn 0 0 1\n\
             f 1//1 3//1 4//1\nf 2//2 4//2 3//2\n",
        )
        .unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 1]);
    }

    #[test]
    fn same_position_with_different_normals_stays_distinct() {
        let mesh = parse_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvn 0 0 -1\n\
             f 1//1 2//1 3//1\nf 1//2 3//2 2//2\n",
        )
        .unwrap();
        assert_eq!(mesh.vertices.len(), 6);
    }

    #[test]
    fn texture_coordinates_and_other_records_are_ignored() {
        let mesh = parse_str(
            "# exported\nmtllib a.mtl\no teapot\nv 0 0 0 1.0\nv 1 0 0\nv 0 1 0\n\
             vt 0.5 0.5\nvn 0 0 1\ns off\nusemtl red\nf 1/1/1 2/1/1 3/1/1\n",
        )
        .unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn non_utf8_bytes_in_ignored_lines_are_skipped() {
        let source: &[u8] =
            b"# cr\xe9\xe9 par exporter\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\n\
              o \xff\xfe\nf 1//1 2//1 3//1\n";
        let mesh = parse(Cursor::new(source)).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn non_utf8_record_reports_its_line() {
        let source: &[u8] = b"v 0 0 0\nvn 0 0 1\nv 1 \xe9 0\n";
        let err = parse(Cursor::new(source)).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidEncoding { line: 3 }));
        assert!(err.to_string().starts_with("line 3:"));
    }

    #[test]
    fn invalid_number_reports_its_line() {
        let err = parse_str("v 0 0 0\nvn 0 x 1\n").unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidNumber { line: 2, ref token } if token == "x"
        ));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let err = parse_str("v nan 0 0\n").unwrap_err();
        assert!(matches!(err, GeometryError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn short_record_is_rejected() {
        let err = parse_str("v 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            GeometryError::MissingComponent { line: 1, record: "v", found: 2 }
        ));
    }

    #[test]
    fn corner_without_normal_is_rejected() {
        let err = parse_str("v 0 0 0\nvn 0 0 1\nf 1 1 1\n").unwrap_err();
        assert!(matches!(err, GeometryError::MalformedCorner { line: 3, .. }));

        let err = parse_str("v 0 0 0\nvn 0 0 1\nf 1/1 1/1 1/1\n").unwrap_err();
        assert!(matches!(err, GeometryError::MalformedCorner { line: 3, .. }));
    }

    #[test]
    fn out_of_range_references_are_rejected() {
        let err = parse_str("v 0 0 0\nvn 0 0 1\nf 1//1 2//1 1//1\n").unwrap_err();
        assert!(matches!(
            err,
            GeometryError::IndexOutOfRange { line: 3, kind: "position", index: 2, available: 1 }
        ));

        let err = parse_str("v 0 0 0\nvn 0 0 1\nf 1//0 1//1 1//1\n").unwrap_err();
        assert!(matches!(
            err,
            GeometryError::IndexOutOfRange { kind: "normal", index: 0, .. }
        ));
    }

    #[test]
    fn references_resolve_against_records_read_so_far() {
        let err = parse_str("v 0 0 0\nf 1//1 1//1 1//1\nvn 0 0 1\n").unwrap_err();
        assert!(matches!(err, GeometryError::IndexOutOfRange { kind: "normal", .. }));
    }

    #[test]
    fn face_needs_three_corners() {
        let err = parse_str("v 0 0 0\nvn 0 0 1\nf 1//1 1//1\n").unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateFace { line: 3, corners: 2 }));
    }

    #[test]
    fn source_without_faces_is_rejected() {
        assert!(matches!(
            parse_str("v 0 0 0\nvn 0 0 1\n").unwrap_err(),
            GeometryError::NoFaces
        ));
        assert!(matches!(parse_str("").unwrap_err(), GeometryError::NoFaces));
    }
}
