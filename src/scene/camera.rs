use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// Perspective camera orbiting the origin along a fixed direction.
///
/// Only the distance along `direction` changes at runtime; the object itself
/// is rotated by the model matrix.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Unit direction from the target towards the eye.
    pub direction: Vector3<f32>,

    pub fov_y_rad: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new_orbit(
        distance: f32,
        fov_y_rad: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let direction = Vector3::new(1.0, 1.0, 1.0).normalize();
        let mut cam = Self {
            position: Point3::from(direction * distance),
            target: Point3::origin(),
            up: Vector3::y(),
            direction,
            fov_y_rad,
            aspect_ratio,
            near,
            far,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Moves the eye to `distance` from the target and refreshes the view.
    pub fn set_distance(&mut self, distance: f32) {
        self.position = self.target + self.direction * distance;
        self.update_matrices();
    }

    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::look_at(&self.position, &self.target, &self.up);
        self.projection_matrix =
            TransformFactory::perspective(self.fov_y_rad, self.aspect_ratio, self.near, self.far);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}
