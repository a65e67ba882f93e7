use crate::core::math::transform::{TransformFactory, normal_matrix};
use crate::scene::camera::Camera;
use crate::scene::light::SceneLighting;
use crate::scene::state::InteractionState;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Matrices derived from the interaction state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    /// `projection * view * model`.
    pub mvp: Matrix4<f32>,
    /// World-space eye position.
    pub eye: Point3<f32>,
}

impl FrameTransforms {
    /// Places `camera` at the state's distance and composes the frame's
    /// matrices. The Z rotation is the outer transform.
    pub fn derive(state: &InteractionState, camera: &mut Camera) -> Self {
        camera.set_distance(state.camera_distance);

        let model =
            TransformFactory::rotation_y(state.angle_y) * TransformFactory::rotation_z(state.angle_z);
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();

        Self {
            model,
            view,
            projection,
            mvp: projection * view * model,
            eye: camera.position,
        }
    }
}

/// Uniform block bound to the active shading program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderUniforms {
    pub mvp: Matrix4<f32>,
    pub model: Matrix4<f32>,
    pub normal_matrix: Matrix3<f32>,
    pub object_color: Vector3<f32>,
    /// Direction the light travels.
    pub light_dir: Vector3<f32>,
    pub light_color: Vector3<f32>,
    pub ambient_strength: f32,
    /// Viewer position for specular terms.
    pub view_pos: Point3<f32>,
    pub shininess: f32,
}

impl ShaderUniforms {
    pub fn bind(
        transforms: &FrameTransforms,
        state: &InteractionState,
        lighting: &SceneLighting,
    ) -> Self {
        Self {
            mvp: transforms.mvp,
            model: transforms.model,
            normal_matrix: normal_matrix(&transforms.model),
            object_color: state.color,
            light_dir: lighting.light.direction,
            light_color: lighting.light.color,
            ambient_strength: lighting.ambient_strength,
            view_pos: transforms.eye,
            shininess: state.shininess,
        }
    }
}
