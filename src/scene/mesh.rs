use crate::core::geometry::Vertex;

/// Number of `f32`s per vertex in the interleaved attribute layout.
pub const FLOATS_PER_VERTEX: usize = 6;

/// An indexed triangle mesh: unique vertices in first-seen order plus a
/// triangle list referencing them.
///
/// Built once by the geometry parser and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Unique (position, normal) pairs.
    pub vertices: Vec<Vertex>,
    /// Three indices per triangle, each `< vertices.len()`.
    pub indices: Vec<u32>,
    /// Reserved for edge rendering; never populated by the loader.
    pub edge_indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            edge_indices: Vec::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Positions followed by normals, one group of six floats per vertex.
    pub fn interleaved_attributes(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * FLOATS_PER_VERTEX);
        for v in &self.vertices {
            data.extend_from_slice(&[
                v.position.x,
                v.position.y,
                v.position.z,
                v.normal.x,
                v.normal.y,
                v.normal.z,
            ]);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn quad() -> Mesh {
        let corner = |x: f32, y: f32| Vertex::new(Point3::new(x, y, 0.0), Vector3::z());
        Mesh::new(
            vec![corner(0.0, 0.0), corner(1.0, 0.0), corner(1.0, 1.0), corner(0.0, 1.0)],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn interleaves_position_then_normal() {
        let data = quad().interleaved_attributes();
        assert_eq!(data.len(), 4 * FLOATS_PER_VERTEX);
        assert_eq!(&data[12..18], &[1.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn triangles_follow_index_order() {
        let mesh = quad();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [0, 2, 3]]);
        assert!(mesh.edge_indices.is_empty());
    }
}
