use nalgebra::{Point2, Vector3};

const EPSILON: f32 = 1e-5;

/// Twice the signed area of triangle (a, b, c). Positive when counter-clockwise
/// in a y-up frame.
#[inline]
fn edge_function(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// True when (v0, v1, v2) covers no measurable screen area.
#[inline]
pub fn is_degenerate_triangle(v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>) -> bool {
    edge_function(v0, v1, v2).abs() < EPSILON
}

/// Screen-space barycentric weights of `p` with respect to (v0, v1, v2).
///
/// Returns `None` for degenerate (zero-area) triangles.
pub fn barycentric_coordinates(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<Vector3<f32>> {
    if is_degenerate_triangle(v0, v1, v2) {
        return None;
    }
    let area = edge_function(v0, v1, v2);

    let w1 = edge_function(v0, p, v2) / area;
    let w2 = edge_function(v0, v1, p) / area;
    Some(Vector3::new(1.0 - w1 - w2, w1, w2))
}

/// True when every weight is non-negative, with a small tolerance so that
/// shared edges do not leave cracks.
#[inline(always)]
pub fn is_inside_triangle(bary: Vector3<f32>) -> bool {
    bary.iter().all(|&w| w >= -EPSILON)
}

/// Corrects screen-space weights for perspective using the clip-space `w`
/// of each vertex. Returns `None` when the weighted sum collapses.
pub fn perspective_correct_barycentric(bary: Vector3<f32>, w: [f32; 3]) -> Option<Vector3<f32>> {
    let inv = |w: f32| if w.abs() > EPSILON { 1.0 / w } else { 1.0 };
    let weighted = Vector3::new(bary.x * inv(w[0]), bary.y * inv(w[1]), bary.z * inv(w[2]));

    let sum = weighted.sum();
    if sum.abs() < EPSILON {
        return None;
    }
    Some(weighted / sum)
}
