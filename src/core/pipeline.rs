use crate::core::geometry::Vertex;
use nalgebra::{Vector3, Vector4};
use std::ops::{Add, Mul};

/// Per-vertex data that can be blended across a triangle.
///
/// `Add` + `Mul<f32>` cover the weighted sums used by clipping and
/// barycentric interpolation; `Send + Sync` lets rows shade in parallel.
pub trait Interpolatable:
    Copy + Add<Output = Self> + Mul<f32, Output = Self> + Send + Sync
{
}

impl Interpolatable for Vector3<f32> {}

/// The programmable stages of the pipeline: one shading program.
pub trait Shader: Send + Sync {
    /// Outputs of the vertex stage, interpolated for every fragment.
    type Varying: Interpolatable;

    /// Transforms an object-space vertex into homogeneous clip space and
    /// produces its varyings.
    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying);

    /// Linear RGB color of a fragment. Values are not clamped here.
    fn fragment(&self, varying: Self::Varying) -> Vector3<f32>;
}
