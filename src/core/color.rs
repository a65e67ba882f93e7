use nalgebra::Vector3;

/// Quantizes a linear color to a `0RGB` word for presentation.
///
/// Channels outside [0, 1] saturate here and nowhere earlier in the pipeline.
pub fn pack_rgb(color: Vector3<f32>) -> u32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(color.x) << 16) | (channel(color.y) << 8) | channel(color.z)
}
