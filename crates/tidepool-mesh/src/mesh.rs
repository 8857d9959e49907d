//! Core polygon mesh type.
//!
//! Faces are variable-length vertex index lists, as read from a text mesh
//! description. Texture coordinates and normals are optional and carry their
//! own value arrays plus per-face index lists that parallel `faces`.

use serde::{Deserialize, Serialize};
use tidepool_math::{Vec2, Vec3};
use tidepool_types::{TidepoolError, TidepoolResult};

use crate::bounds::BoundingBox;
use crate::normals::compute_vertex_normals;

/// An optional per-corner attribute: a value array and, for every face,
/// the index of each corner's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceAttribute<T> {
    /// Attribute values, indexed by `faces`.
    pub values: Vec<T>,
    /// One index list per mesh face, same length as that face.
    pub faces: Vec<Vec<u32>>,
}

/// A polygon mesh.
///
/// Invariant (checked by [`PolyMesh::validate`], which every constructor
/// runs): every face index is in bounds of its attribute array, and each
/// attribute's face lists parallel `faces` one-to-one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Faces as ordered vertex index lists.
    pub faces: Vec<Vec<u32>>,
    /// Optional texture coordinates.
    pub texcoords: Option<FaceAttribute<Vec2>>,
    /// Optional normals.
    pub normals: Option<FaceAttribute<Vec3>>,
}

impl PolyMesh {
    /// Creates a mesh from positions and faces, validating indices.
    pub fn new(positions: Vec<Vec3>, faces: Vec<Vec<u32>>) -> TidepoolResult<Self> {
        let mesh = Self {
            positions,
            faces,
            texcoords: None,
            normals: None,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Attaches texture coordinates.
    pub fn with_texcoords(mut self, values: Vec<Vec2>, faces: Vec<Vec<u32>>) -> TidepoolResult<Self> {
        self.texcoords = Some(FaceAttribute { values, faces });
        self.validate()?;
        Ok(self)
    }

    /// Attaches normals.
    pub fn with_normals(mut self, values: Vec<Vec3>, faces: Vec<Vec<u32>>) -> TidepoolResult<Self> {
        self.normals = Some(FaceAttribute { values, faces });
        self.validate()?;
        Ok(self)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of triangles produced by fan-triangulating every face.
    pub fn triangle_count(&self) -> usize {
        crate::buffers::fan_triangle_count(&self.faces)
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Validates mesh integrity.
    pub fn validate(&self) -> TidepoolResult<()> {
        check_faces("Face", &self.faces, self.positions.len())?;

        if let Some(tex) = &self.texcoords {
            check_parallel("Texcoord", &tex.faces, &self.faces)?;
            check_faces("Texcoord face", &tex.faces, tex.values.len())?;
        }
        if let Some(norm) = &self.normals {
            check_parallel("Normal", &norm.faces, &self.faces)?;
            check_faces("Normal face", &norm.faces, norm.values.len())?;
        }
        Ok(())
    }

    /// Axis-aligned bounds of the positions, `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.positions.iter().copied())
    }

    /// Shifts then uniformly scales every position: `p = (p + shift) * scale`.
    pub fn shift_and_scale(&mut self, shift: Vec3, scale: f32) {
        for p in &mut self.positions {
            *p = (*p + shift) * scale;
        }
    }

    /// Translates every position by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Recomputes smooth vertex normals and stores them as the normal
    /// attribute, indexed by the position faces.
    pub fn compute_normals(&mut self) {
        let values = compute_vertex_normals(&self.positions, &self.faces);
        self.normals = Some(FaceAttribute {
            values,
            faces: self.faces.clone(),
        });
    }
}

fn check_faces(what: &str, faces: &[Vec<u32>], len: usize) -> TidepoolResult<()> {
    for (f, face) in faces.iter().enumerate() {
        if let Some(&idx) = face.iter().find(|&&idx| idx as usize >= len) {
            return Err(TidepoolError::InvalidMesh(format!(
                "{} {} references index {} (attribute count: {})",
                what, f, idx, len
            )));
        }
    }
    Ok(())
}

fn check_parallel(what: &str, attr: &[Vec<u32>], faces: &[Vec<u32>]) -> TidepoolResult<()> {
    if attr.len() != faces.len() {
        return Err(TidepoolError::InvalidMesh(format!(
            "{} face count ({}) != face count ({})",
            what,
            attr.len(),
            faces.len()
        )));
    }
    for (f, (a, p)) in attr.iter().zip(faces).enumerate() {
        if a.len() != p.len() {
            return Err(TidepoolError::InvalidMesh(format!(
                "{} face {} has {} corners, position face has {}",
                what,
                f,
                a.len(),
                p.len()
            )));
        }
    }
    Ok(())
}
