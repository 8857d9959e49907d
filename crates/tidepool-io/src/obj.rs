//! Wavefront OBJ reader.
//!
//! Supports `v`, `vt`, `vn` and `f` statements. Face corners may be written
//! as `a`, `a/b`, `a//c` or `a/b/c`; indices are 1-based, and negative
//! indices count back from the most recent element. Every other statement
//! (`o`, `g`, `s`, `usemtl`, comments) is ignored.

use std::path::Path;

use tidepool_math::{Vec2, Vec3};
use tidepool_mesh::{FaceAttribute, PolyMesh};
use tidepool_types::{TidepoolError, TidepoolResult};

/// Parses OBJ text into a validated mesh.
pub fn parse_obj(text: &str) -> TidepoolResult<PolyMesh> {
    let mut reader = ObjReader::default();
    for (i, raw) in text.lines().enumerate() {
        reader.line(i + 1, raw)?;
    }
    reader.finish()
}

/// Reads and parses an OBJ file.
pub fn load_obj(path: impl AsRef<Path>) -> TidepoolResult<PolyMesh> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mesh = parse_obj(&text)?;
    tracing::debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "loaded OBJ"
    );
    Ok(mesh)
}

#[derive(Default)]
struct ObjReader {
    positions: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    normals: Vec<Vec3>,
    faces: Vec<Vec<u32>>,
    tex_faces: Vec<Vec<u32>>,
    norm_faces: Vec<Vec<u32>>,
    face_lines: Vec<usize>,
}

fn parse_error(line: usize, message: impl Into<String>) -> TidepoolError {
    TidepoolError::Parse {
        line,
        message: message.into(),
    }
}

fn floats<const N: usize>(line: usize, keyword: &str, args: &[&str]) -> TidepoolResult<[f32; N]> {
    if args.len() < N {
        return Err(parse_error(
            line,
            format!("'{keyword}' needs {N} numbers, found {}", args.len()),
        ));
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        let value: f32 = arg
            .parse()
            .map_err(|_| parse_error(line, format!("invalid number '{arg}' in '{keyword}'")))?;
        if !value.is_finite() {
            return Err(parse_error(line, format!("non-finite number '{arg}' in '{keyword}'")));
        }
        *slot = value;
    }
    Ok(out)
}

/// Resolves a 1-based or negative OBJ index against `len` elements so far.
fn resolve_index(line: usize, token: &str, len: usize) -> TidepoolResult<u32> {
    let raw: i64 = token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid index '{token}'")))?;
    let resolved = match raw {
        0 => return Err(parse_error(line, "index 0 is not valid in OBJ")),
        r if r > 0 => r - 1,
        r => len as i64 + r,
    };
    if resolved < 0 || resolved > u32::MAX as i64 {
        return Err(parse_error(line, format!("index {raw} is out of range")));
    }
    Ok(resolved as u32)
}

impl ObjReader {
    fn line(&mut self, line: usize, raw: &str) -> TidepoolResult<()> {
        let mut tokens = raw.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(());
        };
        let args: Vec<&str> = tokens.collect();

        match keyword {
            "v" => {
                let [x, y, z] = floats::<3>(line, keyword, &args)?;
                self.positions.push(Vec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = floats::<2>(line, keyword, &args)?;
                self.texcoords.push(Vec2::new(u, v));
            }
            "vn" => {
                let [x, y, z] = floats::<3>(line, keyword, &args)?;
                self.normals.push(Vec3::new(x, y, z));
            }
            "f" => self.face(line, &args)?,
            _ => {}
        }
        Ok(())
    }

    fn face(&mut self, line: usize, corners: &[&str]) -> TidepoolResult<()> {
        let mut f = Vec::with_capacity(corners.len());
        let mut tf = Vec::new();
        let mut nf = Vec::new();

        for corner in corners {
            let mut parts = corner.split('/');
            let v = parts.next().unwrap_or_default();
            f.push(resolve_index(line, v, self.positions.len())?);
            if let Some(t) = parts.next().filter(|t| !t.is_empty()) {
                tf.push(resolve_index(line, t, self.texcoords.len())?);
            }
            if let Some(n) = parts.next().filter(|n| !n.is_empty()) {
                nf.push(resolve_index(line, n, self.normals.len())?);
            }
        }

        for (what, list) in [("texture", &tf), ("normal", &nf)] {
            if !list.is_empty() && list.len() != f.len() {
                return Err(parse_error(
                    line,
                    format!("face gives {what} indices for only some corners"),
                ));
            }
        }

        self.faces.push(f);
        self.tex_faces.push(tf);
        self.norm_faces.push(nf);
        self.face_lines.push(line);
        Ok(())
    }

    fn check_range(&self, faces: &[Vec<u32>], len: usize, what: &str) -> TidepoolResult<()> {
        for (face, &line) in faces.iter().zip(&self.face_lines) {
            if let Some(&idx) = face.iter().find(|&&i| i as usize >= len) {
                return Err(parse_error(
                    line,
                    format!("{what} index {} out of range ({len} defined)", idx + 1),
                ));
            }
        }
        Ok(())
    }

    fn finish(self) -> TidepoolResult<PolyMesh> {
        self.check_range(&self.faces, self.positions.len(), "vertex")?;
        self.check_range(&self.tex_faces, self.texcoords.len(), "texture")?;
        self.check_range(&self.norm_faces, self.normals.len(), "normal")?;

        let texcoords = attribute(self.texcoords, self.tex_faces, "texture coordinates");
        let normals = attribute(self.normals, self.norm_faces, "normals");
        let mesh = PolyMesh {
            positions: self.positions,
            faces: self.faces,
            texcoords,
            normals,
        };
        mesh.validate()?;
        Ok(mesh)
    }
}

/// Keeps an attribute only if every face supplies it.
fn attribute<T>(values: Vec<T>, faces: Vec<Vec<u32>>, what: &str) -> Option<FaceAttribute<T>> {
    let with = faces.iter().filter(|f| !f.is_empty()).count();
    if with == 0 {
        return None;
    }
    if with < faces.len() {
        tracing::warn!(
            faces_with = with,
            faces_total = faces.len(),
            "dropping {what}: not every face has them"
        );
        return None;
    }
    Some(FaceAttribute { values, faces })
}
