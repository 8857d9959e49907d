//! Renderer-facing flat buffers.
//!
//! Every face is fan-triangulated as `(f0, fk, fk+1)`; faces with fewer
//! than three corners produce no triangles.

use std::collections::HashMap;

use tidepool_math::{Vec2, Vec3};

use crate::mesh::PolyMesh;

/// Corner triples of the fan triangulation of a face with `len` corners.
pub fn fan_corners(len: usize) -> impl Iterator<Item = [usize; 3]> {
    (1..len.saturating_sub(1)).map(|k| [0, k, k + 1])
}

/// Total number of fan triangles over all faces.
pub fn fan_triangle_count(faces: &[Vec<u32>]) -> usize {
    faces.iter().map(|f| f.len().saturating_sub(2)).sum()
}

/// Writes `values` fan-triangulated by `faces` into `target` as packed
/// `xyz` triples, returning the number of floats written.
///
/// Writing stops early if `target` is too short.
pub fn flatten_fan(target: &mut [f32], values: &[Vec3], faces: &[Vec<u32>]) -> usize {
    let corners = faces.iter().flat_map(|face| {
        fan_corners(face.len()).flat_map(move |tri| tri.map(|c| face[c] as usize))
    });

    let mut written = 0;
    for (slot, idx) in target.chunks_exact_mut(3).zip(corners) {
        let v = values[idx];
        slot.copy_from_slice(&[v.x, v.y, v.z]);
        written += 3;
    }
    written
}

/// Non-indexed triangle arrays: three corners per triangle, attributes
/// expanded per corner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleBuffers {
    /// Packed `xyz` positions.
    pub positions: Vec<f32>,
    /// Packed `uv`, empty if the mesh has no texcoords.
    pub texcoords: Vec<f32>,
    /// Packed `xyz` normals, empty if the mesh has no normals.
    pub normals: Vec<f32>,
}

impl TriangleBuffers {
    /// Fan-triangulates a mesh into flat arrays.
    pub fn from_mesh(mesh: &PolyMesh) -> Self {
        let tri_count = mesh.triangle_count();
        let mut out = Self {
            positions: Vec::with_capacity(tri_count * 9),
            texcoords: Vec::new(),
            normals: Vec::new(),
        };

        for (f, face) in mesh.faces.iter().enumerate() {
            for tri in fan_corners(face.len()) {
                for c in tri {
                    let p = mesh.positions[face[c] as usize];
                    out.positions.extend_from_slice(&[p.x, p.y, p.z]);

                    if let Some(tex) = &mesh.texcoords {
                        let t = tex.values[tex.faces[f][c] as usize];
                        out.texcoords.extend_from_slice(&[t.x, t.y]);
                    }
                    if let Some(norm) = &mesh.normals {
                        let n = norm.values[norm.faces[f][c] as usize];
                        out.normals.extend_from_slice(&[n.x, n.y, n.z]);
                    }
                }
            }
        }
        out
    }

    /// Number of triangle corners.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Indexed triangle arrays with vertices deduplicated by their
/// `(position, texcoord, normal)` index triple.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedBuffers {
    pub positions: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub normals: Vec<f32>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

type CornerKey = (u32, Option<u32>, Option<u32>);

impl IndexedBuffers {
    /// Builds deduplicated vertex arrays and a fan-triangulated index list.
    pub fn from_mesh(mesh: &PolyMesh) -> Self {
        let mut out = Self::default();
        let mut cache: HashMap<CornerKey, u32> = HashMap::new();

        for (f, face) in mesh.faces.iter().enumerate() {
            // Resolve every corner of the face first so each distinct triple
            // is emitted once, in face order.
            let resolved: Vec<u32> = (0..face.len())
                .map(|c| {
                    let key: CornerKey = (
                        face[c],
                        mesh.texcoords.as_ref().map(|t| t.faces[f][c]),
                        mesh.normals.as_ref().map(|n| n.faces[f][c]),
                    );
                    *cache.entry(key).or_insert_with(|| out.push_vertex(mesh, key))
                })
                .collect();

            for tri in fan_corners(face.len()) {
                out.indices.extend(tri.map(|c| resolved[c]));
            }
        }
        out
    }

    fn push_vertex(&mut self, mesh: &PolyMesh, (p, t, n): CornerKey) -> u32 {
        let index = (self.positions.len() / 3) as u32;
        let pos = mesh.positions[p as usize];
        self.positions.extend_from_slice(&[pos.x, pos.y, pos.z]);

        if let (Some(t), Some(tex)) = (t, &mesh.texcoords) {
            let uv: Vec2 = tex.values[t as usize];
            self.texcoords.extend_from_slice(&[uv.x, uv.y]);
        }
        if let (Some(n), Some(norm)) = (n, &mesh.normals) {
            let nv = norm.values[n as usize];
            self.normals.extend_from_slice(&[nv.x, nv.y, nv.z]);
        }
        index
    }

    /// Number of unique vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
