//! Scalar helpers mirroring their shader-language counterparts.

use glam::Vec2;

/// Hermite interpolation between two edges, identical to GLSL `smoothstep`.
///
/// `edge0` may be greater than `edge1`, which yields a falloff:
/// `smoothstep(r, 0.0, d)` is `1` at `d = 0` and `0` for `d >= r`.
/// Degenerate edges (`edge0 == edge1`) act as a step at the edge.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span == 0.0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Squared Euclidean distance between two 2D points.
#[inline]
pub fn squared_distance_2d(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}
