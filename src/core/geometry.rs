use nalgebra::{Point3, Vector3};

/// A single mesh vertex: a position paired with its shading normal.
///
/// Equality is exact component-wise float equality, no epsilon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }

    /// Hashable key whose equality matches `==` on finite components.
    ///
    /// `-0.0` is folded onto `0.0` because the two compare equal as floats
    /// but differ in their bit patterns.
    pub fn dedup_key(&self) -> VertexKey {
        let bits = |v: f32| if v == 0.0 { 0u32 } else { v.to_bits() };
        VertexKey([
            bits(self.position.x),
            bits(self.position.y),
            bits(self.position.z),
            bits(self.normal.x),
            bits(self.normal.y),
            bits(self.normal.z),
        ])
    }
}

/// Exact bit pattern of a vertex's position followed by its normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey([u32; 6]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_zero_shares_a_key() {
        let a = Vertex::new(Point3::new(0.0, 1.0, 2.0), Vector3::new(-0.0, 1.0, 0.0));
        let b = Vertex::new(Point3::new(-0.0, 1.0, 2.0), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(a, b);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn nearby_values_are_distinct() {
        let a = Vertex::new(Point3::new(0.1, 0.0, 0.0), Vector3::y());
        let b = Vertex::new(Point3::new(0.1 + f32::EPSILON, 0.0, 0.0), Vector3::y());
        assert_ne!(a, b);
        assert_ne!(a.dedup_key(), b.dedup_key());
    }
}
