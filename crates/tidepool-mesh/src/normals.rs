//! Vertex normal computation from polygon mesh data.
//!
//! Computes area-weighted vertex normals by accumulating the face normal of
//! every fan triangle at each of its three vertices.

use tidepool_math::Vec3;

use crate::buffers::fan_corners;

/// Computes area-weighted vertex normals for `positions`.
pub fn compute_vertex_normals(positions: &[Vec3], faces: &[Vec<u32>]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    compute_vertex_normals_into(positions, faces, &mut normals);
    normals
}

/// Same as [`compute_vertex_normals`], writing into an existing buffer.
///
/// `out` must have one entry per position. Vertices touched by no
/// non-degenerate triangle are left at zero.
pub fn compute_vertex_normals_into(positions: &[Vec3], faces: &[Vec<u32>], out: &mut [Vec3]) {
    out.fill(Vec3::ZERO);

    for face in faces {
        for [c0, c1, c2] in fan_corners(face.len()) {
            let (a, b, c) = (face[c0] as usize, face[c1] as usize, face[c2] as usize);
            let v0 = positions[a];
            // Cross product magnitude = 2 × triangle area
            let n = (positions[b] - v0).cross(positions[c] - v0);
            out[a] += n;
            out[b] += n;
            out[c] += n;
        }
    }

    for n in out.iter_mut() {
        *n = n.normalize_or_zero();
    }
}
