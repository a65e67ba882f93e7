use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::{
    barycentric_coordinates, is_degenerate_triangle, is_inside_triangle,
    perspective_correct_barycentric,
};
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::core::pipeline::{Interpolatable, Shader};
use nalgebra::{Point2, Vector4};
use rayon::prelude::*;

/// A clip-space vertex with its varyings.
type ClipVertex<V> = (Vector4<f32>, V);

/// Frustum planes as (axis, sign): a point is inside when `sign * p[axis] <= p.w`.
const CLIP_PLANES: [(usize, f32); 6] = [
    (0, 1.0),
    (0, -1.0),
    (1, 1.0),
    (1, -1.0),
    (2, 1.0),
    (2, -1.0),
];

/// Scan-converts triangles into a `FrameBuffer`.
///
/// Triangles are clipped in homogeneous space (Sutherland-Hodgman), then
/// filled with perspective-correct interpolation and a less-than depth test.
/// No face culling is performed.
#[derive(Debug, Default)]
pub struct Rasterizer;

impl Rasterizer {
    pub fn new() -> Self {
        Self
    }

    pub fn draw_triangle<S: Shader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        triangle: [ClipVertex<S::Varying>; 3],
    ) {
        let polygon = clip_to_frustum(triangle);
        if polygon.len() < 3 {
            return;
        }

        // The clipped polygon is convex, so a fan covers it.
        let anchor = polygon[0];
        for pair in polygon[1..].windows(2) {
            self.fill(framebuffer, shader, [anchor, pair[0], pair[1]]);
        }
    }

    /// Fills a triangle already known to lie inside the frustum.
    fn fill<S: Shader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        triangle: [ClipVertex<S::Varying>; 3],
    ) {
        let width = framebuffer.buffer_width as f32;
        let height = framebuffer.buffer_height as f32;

        if triangle.iter().any(|(clip, _)| clip.w.abs() < 1e-6) {
            return;
        }

        let screen = triangle.map(|(clip, _)| {
            let ndc = apply_perspective_division(&clip);
            ndc_to_screen(ndc.x, ndc.y, width, height)
        });
        let w = triangle.map(|(clip, _)| clip.w);

        let min_x = screen.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor() as i64;
        let min_y = screen.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor() as i64;
        let max_x = screen.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;
        let max_y = screen.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;

        let last_x = framebuffer.buffer_width as i64 - 1;
        let last_y = framebuffer.buffer_height as i64 - 1;
        if max_x < 0 || max_y < 0 || min_x > last_x || min_y > last_y {
            return;
        }

        let (x0, x1) = (min_x.max(0) as usize, max_x.min(last_x) as usize);
        let (y0, y1) = (min_y.max(0) as usize, max_y.min(last_y) as usize);

        let ndc_z = triangle.map(|(clip, _)| clip.z / clip.w);
        if is_degenerate_triangle(screen[0], screen[1], screen[2]) {
            return;
        }

        (y0..=y1).into_par_iter().for_each(|y| {
            for x in x0..=x1 {
                let center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let Some(bary) = barycentric_coordinates(center, screen[0], screen[1], screen[2])
                else {
                    continue;
                };
                if !is_inside_triangle(bary) {
                    continue;
                }

                // Varyings need perspective weights; a sample without them is
                // dropped before it can occlude anything.
                let Some(weights) = perspective_correct_barycentric(bary, w) else {
                    continue;
                };

                // NDC depth is affine in screen space.
                let depth = (bary.x * ndc_z[0] + bary.y * ndc_z[1] + bary.z * ndc_z[2]) * 0.5 + 0.5;
                if !framebuffer.depth_test_and_update(x, y, depth) {
                    continue;
                }

                let varying = triangle[0].1 * weights.x
                    + triangle[1].1 * weights.y
                    + triangle[2].1 * weights.z;
                framebuffer.write_color(x, y, shader.fragment(varying));
            }
        });
    }
}

/// Clips a triangle against all six frustum planes. The result may hold
/// zero vertices or a convex polygon of up to nine.
fn clip_to_frustum<V: Interpolatable>(
    triangle: [ClipVertex<V>; 3],
) -> Vec<ClipVertex<V>> {
    let mut polygon = Vec::with_capacity(16);
    polygon.extend_from_slice(&triangle);
    let mut scratch = Vec::with_capacity(16);

    for (axis, sign) in CLIP_PLANES {
        if polygon.is_empty() {
            break;
        }
        clip_against_plane(&polygon, &mut scratch, axis, sign);
        std::mem::swap(&mut polygon, &mut scratch);
    }
    polygon
}

fn clip_against_plane<V: Interpolatable>(
    input: &[ClipVertex<V>],
    output: &mut Vec<ClipVertex<V>>,
    axis: usize,
    sign: f32,
) {
    output.clear();
    let Some(&last) = input.last() else {
        return;
    };

    // Signed distance to the plane, positive inside.
    let distance = |p: &Vector4<f32>| p.w - sign * p[axis];

    let mut prev = last;
    let mut prev_d = distance(&prev.0);
    for &curr in input {
        let curr_d = distance(&curr.0);
        if (prev_d >= 0.0) != (curr_d >= 0.0) {
            let t = prev_d / (prev_d - curr_d);
            if t.is_finite() {
                output.push((
                    prev.0 + (curr.0 - prev.0) * t,
                    prev.1 * (1.0 - t) + curr.1 * t,
                ));
            }
        }
        if curr_d >= 0.0 {
            output.push(curr);
        }
        prev = curr;
        prev_d = curr_d;
    }
}
