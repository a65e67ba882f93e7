use crate::core::geometry::Vertex;
use crate::core::pipeline::Interpolatable;
use crate::pipeline::uniforms::ShaderUniforms;
use nalgebra::{Point3, Vector3, Vector4};
use std::ops::{Add, Mul};

/// World-space surface attributes carried to per-fragment lighting.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceVarying {
    pub normal: Vector3<f32>,
    pub world_pos: Point3<f32>,
}

impl Add for SurfaceVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            normal: self.normal + other.normal,
            world_pos: Point3::from(self.world_pos.coords + other.world_pos.coords),
        }
    }
}

impl Mul<f32> for SurfaceVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            normal: self.normal * scalar,
            world_pos: Point3::from(self.world_pos.coords * scalar),
        }
    }
}

impl Interpolatable for SurfaceVarying {}

/// Shared vertex stage: clip position plus world-space position and normal.
pub fn transform_surface(u: &ShaderUniforms, vertex: &Vertex) -> (Vector4<f32>, SurfaceVarying) {
    let local = vertex.position.to_homogeneous();
    let world = u.model * local;

    let varying = SurfaceVarying {
        normal: u.normal_matrix * vertex.normal,
        world_pos: Point3::from(world.xyz()),
    };
    (u.mvp * local, varying)
}

/// How the specular highlight is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specular {
    /// Angle between the view ray and the reflected light ray.
    Reflected,
    /// Angle between the normal and the light/view half vector.
    Halfway,
}

/// Ambient + diffuse + specular, modulated by the object color.
///
/// `normal` need not be unit length. The result is not clamped.
pub fn illuminate(
    u: &ShaderUniforms,
    normal: Vector3<f32>,
    world_pos: Point3<f32>,
    specular: Specular,
) -> Vector3<f32> {
    let n = normal.normalize();
    let l = (-u.light_dir).normalize();
    let v = (u.view_pos - world_pos).normalize();

    let ambient = u.light_color * u.ambient_strength;
    let diffuse = u.light_color * n.dot(&l).max(0.0);

    let alignment = match specular {
        Specular::Reflected => {
            // reflect(-l, n)
            let r = n * (2.0 * n.dot(&l)) - l;
            v.dot(&r)
        }
        Specular::Halfway => n.dot(&(l + v).normalize()),
    };
    let spec = u.light_color * alignment.max(0.0).powf(u.shininess);

    (ambient + diffuse + spec).component_mul(&u.object_color)
}


#[cfg(test)]
mod tests {
    use super::test_support::overhead_uniforms;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn facing_surface_gets_full_light() {
        let u = overhead_uniforms();
        for mode in [Specular::Reflected, Specular::Halfway] {
            let color = illuminate(&u, Vector3::y() * 3.0, Point3::origin(), mode);
            // 0.1 ambient + 1.0 diffuse + 1.0 specular
            assert_relative_eq!(color, Vector3::new(2.1, 1.05, 0.525), epsilon = 1e-5);
        }
    }

    #[test]
    fn back_facing_surface_gets_ambient_only() {
        let u = overhead_uniforms();
        let color = illuminate(&u, -Vector3::y(), Point3::origin(), Specular::Halfway);
        assert_relative_eq!(color, Vector3::new(0.1, 0.05, 0.025), epsilon = 1e-6);
    }

    #[test]
    fn halfway_highlight_is_wider_than_reflected() {
        let mut u = overhead_uniforms();
        u.view_pos = Point3::new(1.0, 1.0, 0.0);
        let normal = Vector3::y();
        let reflected = illuminate(&u, normal, Point3::origin(), Specular::Reflected);
        let halfway = illuminate(&u, normal, Point3::origin(), Specular::Halfway);
        assert!(halfway.x > reflected.x);
    }

    #[test]
    fn surface_varying_blends_linearly() {
        let a = SurfaceVarying {
            normal: Vector3::x(),
            world_pos: Point3::new(0.0, 0.0, 0.0),
        };
        let b = SurfaceVarying {
            normal: Vector3::y(),
            world_pos: Point3::new(2.0, 4.0, 6.0),
        };
        let mid = a * 0.5 + b * 0.5;
        assert_relative_eq!(mid.normal, Vector3::new(0.5, 0.5, 0.0));
        assert_relative_eq!(mid.world_pos, Point3::new(1.0, 2.0, 3.0));
    }
}
