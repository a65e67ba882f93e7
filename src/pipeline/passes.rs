use crate::pipeline::buffers::MeshBuffers;
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::blinn_phong::BlinnPhongShader;
use crate::pipeline::shaders::gouraud::GouraudShader;
use crate::pipeline::shaders::phong::PhongShader;
use crate::pipeline::uniforms::{FrameTransforms, ShaderUniforms};
use crate::scene::camera::Camera;
use crate::scene::light::SceneLighting;
use crate::scene::state::{InteractionState, ShadingModel};

/// Draws the mesh once with the program named by `model`.
pub fn draw_with_model(
    renderer: &mut Renderer,
    buffers: &MeshBuffers,
    model: ShadingModel,
    uniforms: ShaderUniforms,
) {
    match model {
        ShadingModel::Phong => renderer.draw_indexed(buffers, &PhongShader::new(uniforms)),
        ShadingModel::BlinnPhong => renderer.draw_indexed(buffers, &BlinnPhongShader::new(uniforms)),
        ShadingModel::Gouraud => renderer.draw_indexed(buffers, &GouraudShader::new(uniforms)),
    }
}

/// Renders one frame: clear, derive transforms from `state`, bind the
/// active program's uniforms and draw every triangle.
pub fn render_frame(
    renderer: &mut Renderer,
    camera: &mut Camera,
    buffers: &MeshBuffers,
    state: &InteractionState,
    lighting: &SceneLighting,
) -> FrameTransforms {
    renderer.clear(lighting.background);

    let transforms = FrameTransforms::derive(state, camera);
    let uniforms = ShaderUniforms::bind(&transforms, state, lighting);
    draw_with_model(renderer, buffers, state.shading, uniforms);

    transforms
}
