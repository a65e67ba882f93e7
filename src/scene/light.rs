use nalgebra::Vector3;

/// An infinitely distant light: a travel direction and a color, no position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels (not normalized).
    pub direction: Vector3<f32>,
    pub color: Vector3<f32>,
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, color: Vector3<f32>) -> Self {
        Self { direction, color }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vector3::new(-0.2, -1.0, -0.3), Vector3::new(1.0, 1.0, 1.0))
    }
}

/// Fixed lighting environment of the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLighting {
    pub light: DirectionalLight,
    /// Fraction of the light color applied regardless of orientation.
    pub ambient_strength: f32,
    /// Clear color behind the object.
    pub background: Vector3<f32>,
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self {
            light: DirectionalLight::default(),
            ambient_strength: 0.1,
            background: Vector3::new(0.2, 0.2, 0.2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_uses_white_light_from_above() {
        let lighting = SceneLighting::default();
        assert_eq!(lighting.light.direction, Vector3::new(-0.2, -1.0, -0.3));
        assert_eq!(lighting.light.color, Vector3::repeat(1.0));
        assert_eq!(lighting.ambient_strength, 0.1);
    }
}
