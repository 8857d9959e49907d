//! Procedural mesh generators for benchmarks and testing.
//!
//! These generators produce deterministic, resolution-configurable meshes
//! with outward (counter-clockwise) winding.

use std::f32::consts::PI;

use tidepool_math::{Vec2, Vec3};

use crate::mesh::{FaceAttribute, PolyMesh};

/// Generates a flat quad grid in the XZ plane facing +Y.
///
/// The grid spans `[-width/2, width/2]` in X and `[-depth/2, depth/2]` in Z,
/// centered at the origin at Y=0. Every face is a 4-vertex quad.
///
/// # Example
/// ```
/// use tidepool_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.face_count(), 4);
/// assert_eq!(mesh.triangle_count(), 8);
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, depth: f32) -> PolyMesh {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let verts_x = cols + 1;
    let verts_z = rows + 1;

    let mut positions = Vec::with_capacity(verts_x * verts_z);
    let mut uvs = Vec::with_capacity(verts_x * verts_z);
    for j in 0..verts_z {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            positions.push(Vec3::new(-width / 2.0 + u * width, 0.0, -depth / 2.0 + v * depth));
            uvs.push(Vec2::new(u, v));
        }
    }

    let mut faces = Vec::with_capacity(cols * rows);
    for j in 0..rows {
        for i in 0..cols {
            let v00 = (j * verts_x + i) as u32;
            let v10 = v00 + 1;
            let v01 = v00 + verts_x as u32;
            let v11 = v01 + 1;
            faces.push(vec![v00, v01, v11, v10]);
        }
    }

    PolyMesh {
        positions,
        texcoords: Some(FaceAttribute {
            values: uvs,
            faces: faces.clone(),
        }),
        faces,
        normals: None,
    }
}

/// Generates a closed UV sphere centered at the origin.
///
/// Unlike a texture-mapped sphere the seam is welded and each pole is a
/// single vertex, so every edge is shared by exactly two faces. Caps are
/// triangles, the bands between rings are quads.
///
/// `stacks` is clamped to at least 2 and `slices` to at least 3.
pub fn uv_sphere(radius: f32, stacks: usize, slices: usize) -> PolyMesh {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let rings = stacks - 1;

    let mut positions = Vec::with_capacity(2 + rings * slices);
    positions.push(Vec3::new(0.0, radius, 0.0));
    for i in 1..stacks {
        let phi = PI * i as f32 / stacks as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for j in 0..slices {
            let theta = 2.0 * PI * j as f32 / slices as f32;
            let (sin_t, cos_t) = theta.sin_cos();
            positions.push(Vec3::new(radius * sin_phi * cos_t, radius * cos_phi, radius * sin_phi * sin_t));
        }
    }
    positions.push(Vec3::new(0.0, -radius, 0.0));

    let top = 0u32;
    let bottom = (positions.len() - 1) as u32;
    let ring = |i: usize, j: usize| (1 + i * slices + j % slices) as u32;

    let mut faces = Vec::with_capacity(slices * stacks);
    for j in 0..slices {
        faces.push(vec![top, ring(0, j + 1), ring(0, j)]);
    }
    for i in 0..rings - 1 {
        for j in 0..slices {
            faces.push(vec![ring(i, j), ring(i, j + 1), ring(i + 1, j + 1), ring(i + 1, j)]);
        }
    }
    for j in 0..slices {
        faces.push(vec![bottom, ring(rings - 1, j), ring(rings - 1, j + 1)]);
    }

    PolyMesh {
        positions,
        faces,
        texcoords: None,
        normals: None,
    }
}
