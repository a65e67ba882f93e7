use crate::core::geometry::Vertex;
use crate::scene::mesh::{FLOATS_PER_VERTEX, Mesh};
use nalgebra::{Point3, Vector3};

/// Mesh data in draw-ready form: one interleaved attribute buffer and one
/// index buffer.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    attributes: Vec<f32>,
    indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn upload(mesh: &Mesh) -> Self {
        Self {
            attributes: mesh.interleaved_attributes(),
            indices: mesh.indices.clone(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.attributes.len() / FLOATS_PER_VERTEX
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Reads vertex `index` back out of the attribute buffer.
    #[inline]
    pub fn fetch(&self, index: u32) -> Vertex {
        let base = index as usize * FLOATS_PER_VERTEX;
        let a = &self.attributes[base..base + FLOATS_PER_VERTEX];
        Vertex::new(Point3::new(a[0], a[1], a[2]), Vector3::new(a[3], a[4], a[5]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_returns_the_uploaded_vertex() {
        let vertices = vec![
            Vertex::new(Point3::new(1.0, 2.0, 3.0), Vector3::x()),
            Vertex::new(Point3::new(4.0, 5.0, 6.0), Vector3::y()),
        ];
        let mesh = Mesh::new(vertices.clone(), vec![0, 1, 1]);
        let buffers = MeshBuffers::upload(&mesh);

        assert_eq!(buffers.vertex_count(), 2);
        assert_eq!(buffers.fetch(1), vertices[1]);
        assert_eq!(buffers.indices(), &[0, 1, 1]);
    }
}
