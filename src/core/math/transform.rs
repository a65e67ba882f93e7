use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3, Vector4};

/// Builds the right-handed matrices used by the viewer.
///
/// Conventions follow OpenGL: column vectors, camera looking down -Z,
/// clip-space depth in [-w, w].
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Counter-clockwise rotation about +Y.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
             c,  0.0, s,   0.0,
             0.0, 1.0, 0.0, 0.0,
            -s,  0.0, c,   0.0,
             0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Counter-clockwise rotation about +Z.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn translation(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, offset.x,
            0.0, 1.0, 0.0, offset.y,
            0.0, 0.0, 1.0, offset.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Look-at view matrix: world space -> camera space.
    pub fn look_at(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let back = (eye - target).normalize();
        let right = up.cross(&back).normalize();
        let true_up = back.cross(&right);

        let basis = Matrix4::new(
            right.x,   right.y,   right.z,   0.0,
            true_up.x, true_up.y, true_up.z, 0.0,
            back.x,    back.y,    back.z,    0.0,
            0.0,       0.0,       0.0,       1.0,
        );

        basis * Self::translation(&-eye.coords)
    }

    /// Perspective projection mapping the view frustum onto the [-1, 1] cube.
    pub fn perspective(fov_y_rad: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad * 0.5).tan();
        let depth = near - far;

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,                  0.0,
            0.0,              f,   0.0,                  0.0,
            0.0,              0.0, (far + near) / depth, 2.0 * far * near / depth,
            0.0,              0.0, -1.0,                 0.0,
        )
    }
}

/// Inverse-transpose of the model's linear part, used to carry normals into
/// world space. Falls back to the plain 3x3 block for singular models.
pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
    let linear: Matrix3<f32> = model.fixed_view::<3, 3>(0, 0).into_owned();
    linear
        .try_inverse()
        .map(|inverse| inverse.transpose())
        .unwrap_or(linear)
}

/// Clip space -> normalized device coordinates.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    if clip.w.abs() > 1e-6 {
        Point3::from(clip.xyz() / clip.w)
    } else {
        Point3::origin()
    }
}

/// Viewport transform. Screen +Y points down while NDC +Y points up.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new((ndc_x + 1.0) * 0.5 * width, (1.0 - ndc_y) * 0.5 * height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotation_y_turns_x_towards_minus_z() {
        let rotated = TransformFactory::rotation_y(FRAC_PI_2) * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(rotated, Vector4::new(0.0, 0.0, -1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn rotation_z_turns_x_towards_y() {
        let rotated = TransformFactory::rotation_z(FRAC_PI_2) * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(rotated, Vector4::new(0.0, 1.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn look_at_moves_eye_to_origin_and_target_down_minus_z() {
        let eye = Point3::new(3.0, 3.0, 3.0);
        let view = TransformFactory::look_at(&eye, &Point3::origin(), &Vector3::y());

        let eye_view = view * eye.to_homogeneous();
        assert_relative_eq!(eye_view, Vector4::new(0.0, 0.0, 0.0, 1.0), epsilon = 1e-5);

        let target_view = view * Point3::<f32>::origin().to_homogeneous();
        assert_relative_eq!(target_view.z, -(27.0f32).sqrt(), epsilon = 1e-5);
        assert_relative_eq!(target_view.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_maps_near_and_far_planes_to_unit_depth() {
        let proj = TransformFactory::perspective(45f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);

        let near = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, -0.1, 1.0)));
        let far = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, -100.0, 1.0)));

        assert_relative_eq!(near.z, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn normal_matrix_of_rotation_is_the_rotation() {
        let model = TransformFactory::rotation_y(0.7) * TransformFactory::rotation_z(-0.3);
        let expected: Matrix3<f32> = model.fixed_view::<3, 3>(0, 0).into_owned();
        assert_relative_eq!(normal_matrix(&model), expected, epsilon = 1e-5);
    }

    #[test]
    fn viewport_flips_y() {
        let top_left = ndc_to_screen(-1.0, 1.0, 800.0, 600.0);
        assert_relative_eq!(top_left, Point2::new(0.0, 0.0));
        let bottom_right = ndc_to_screen(1.0, -1.0, 800.0, 600.0);
        assert_relative_eq!(bottom_right, Point2::new(800.0, 600.0));
    }
}
