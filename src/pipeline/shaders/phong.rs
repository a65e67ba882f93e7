use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use crate::pipeline::shaders::lighting::{Specular, SurfaceVarying, illuminate, transform_surface};
use crate::pipeline::uniforms::ShaderUniforms;
use nalgebra::{Vector3, Vector4};

/// Per-fragment Phong lighting (reflected-ray specular).
pub struct PhongShader {
    pub uniforms: ShaderUniforms,
}

impl PhongShader {
    pub fn new(uniforms: ShaderUniforms) -> Self {
        Self { uniforms }
    }
}

impl Shader for PhongShader {
    type Varying = SurfaceVarying;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        transform_surface(&self.uniforms, vertex)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        illuminate(
            &self.uniforms,
            varying.normal,
            varying.world_pos,
            Specular::Reflected,
        )
    }
}
