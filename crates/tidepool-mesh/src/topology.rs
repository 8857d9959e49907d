//! Mesh topology queries.
//!
//! Builds the unique undirected edge set from the face lists. Each edge is
//! keyed by its unordered vertex pair and reported once, in the order it is
//! first met, with the orientation of the face that introduced it. This is
//! the source of the mass-spring network.

use std::collections::HashMap;

use crate::mesh::PolyMesh;

/// Precomputed edge topology for a polygon mesh.
#[derive(Debug, Clone)]
pub struct Topology {
    /// Unique edges `[a, b]` in first-seen order.
    pub edges: Vec<[u32; 2]>,

    /// For each edge, how many face sides reference it.
    pub edge_face_counts: Vec<u32>,

    /// For each vertex, the faces that contain it.
    pub vertex_faces: Vec<Vec<u32>>,
}

impl Topology {
    /// Build topology from a mesh.
    pub fn build(mesh: &PolyMesh) -> Self {
        Self::from_faces(&mesh.faces, mesh.vertex_count())
    }

    /// Build topology from raw face lists.
    ///
    /// Self-loops (a face side whose two corners are the same vertex)
    /// are ignored.
    pub fn from_faces(faces: &[Vec<u32>], vertex_count: usize) -> Self {
        let mut vertex_faces: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        let mut edge_index: HashMap<(u32, u32), usize> = HashMap::new();
        let mut edges: Vec<[u32; 2]> = Vec::new();
        let mut edge_face_counts: Vec<u32> = Vec::new();

        for (f, face) in faces.iter().enumerate() {
            for &v in face {
                let list = &mut vertex_faces[v as usize];
                if list.last() != Some(&(f as u32)) {
                    list.push(f as u32);
                }
            }

            for (v0, v1) in face_sides(face) {
                if v0 == v1 {
                    continue;
                }
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                let idx = *edge_index.entry(key).or_insert_with(|| {
                    edges.push([v0, v1]);
                    edge_face_counts.push(0);
                    edges.len() - 1
                });
                edge_face_counts[idx] += 1;
            }
        }

        Self {
            edges,
            edge_face_counts,
            vertex_faces,
        }
    }

    /// Returns the number of unique edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of boundary edges (edges used by only one face side).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_face_counts.iter().filter(|&&c| c == 1).count()
    }

    /// Returns true if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }

    /// Vertices sharing an edge with `v`, in edge order.
    pub fn one_ring(&self, v: u32) -> Vec<u32> {
        self.edges
            .iter()
            .filter_map(|&[a, b]| {
                if a == v {
                    Some(b)
                } else if b == v {
                    Some(a)
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Consecutive corner pairs of a face, wrapping last-to-first.
pub fn face_sides(face: &[u32]) -> impl Iterator<Item = (u32, u32)> + '_ {
    let n = face.len();
    (0..n).map(move |i| (face[i], face[(i + 1) % n]))
}
