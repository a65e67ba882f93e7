use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use crate::pipeline::shaders::lighting::{Specular, illuminate, transform_surface};
use crate::pipeline::uniforms::ShaderUniforms;
use nalgebra::{Vector3, Vector4};

/// Per-vertex lighting: Blinn-Phong evaluated in the vertex stage, the
/// resulting color interpolated across the face.
pub struct GouraudShader {
    pub uniforms: ShaderUniforms,
}

impl GouraudShader {
    pub fn new(uniforms: ShaderUniforms) -> Self {
        Self { uniforms }
    }
}

impl Shader for GouraudShader {
    type Varying = Vector3<f32>;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let (clip, surface) = transform_surface(&self.uniforms, vertex);
        let color = illuminate(
            &self.uniforms,
            surface.normal,
            surface.world_pos,
            Specular::Halfway,
        );
        (clip, color)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        varying
    }
}
