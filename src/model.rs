//! Triangle geometry and a Wavefront OBJ reader.
//!
//! Only the statements that describe triangle meshes are understood: `v`, `vt`, `vn` and `f`. Everything else
//! (groups, materials, smoothing) is skipped without comment. Malformed statements are reported as [`ObjIssue`]s,
//! logged, and skipped, so a partly damaged file still yields every face that could be read.

use crate::math::Vec3;
use thiserror::Error;

/// A source of triangles for a draw call.
///
/// Every face has exactly three vertex slots, 0 to 2. Lookups panic when `face >= face_count()` or `slot > 2`.
pub trait Geometry {
    fn face_count(&self) -> usize;

    fn position(&self, face: usize, slot: usize) -> Vec3;

    /// The texture coordinate `(u, v, 0)` of a vertex, or zero when the face has none.
    fn uv(&self, face: usize, slot: usize) -> Vec3;

    /// The normal of a vertex, or zero when the face has none.
    fn normal(&self, face: usize, slot: usize) -> Vec3;
}

impl<G: Geometry + ?Sized> Geometry for &G {
    #[inline(always)]
    fn face_count(&self) -> usize {
        (**self).face_count()
    }
    #[inline(always)]
    fn position(&self, face: usize, slot: usize) -> Vec3 {
        (**self).position(face, slot)
    }
    #[inline(always)]
    fn uv(&self, face: usize, slot: usize) -> Vec3 {
        (**self).uv(face, slot)
    }
    #[inline(always)]
    fn normal(&self, face: usize, slot: usize) -> Vec3 {
        (**self).normal(face, slot)
    }
}

/// A problem found while reading OBJ text or validating faces. Line numbers start at 1.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ObjIssue {
    #[error("line {line}: '{token}' is not a number")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: '{statement}' needs {expected} components, found {found}")]
    MissingComponents {
        line: usize,
        statement: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: '{token}' is not a valid vertex reference")]
    InvalidIndex { line: usize, token: String },
    #[error("line {line}: face has {vertices} vertices, only triangles are supported")]
    NotATriangle { line: usize, vertices: usize },
    #[error("line {line}: {kind} index {index} is out of range (only {available} defined)")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: usize,
        available: usize,
    },
}

/// The 0-based attribute indices of one triangle.
///
/// Texture coordinates and normals are indexed independently of positions, and are either present for all three
/// vertices or absent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub positions: [usize; 3],
    pub uvs: Option<[usize; 3]>,
    pub normals: Option<[usize; 3]>,
}

impl Face {
    pub fn new(positions: [usize; 3]) -> Self {
        Self {
            positions,
            uvs: None,
            normals: None,
        }
    }

    pub fn with_uvs(mut self, uvs: [usize; 3]) -> Self {
        self.uvs = Some(uvs);
        self
    }

    pub fn with_normals(mut self, normals: [usize; 3]) -> Self {
        self.normals = Some(normals);
        self
    }

    fn check(&self, line: usize, model: &Model) -> Result<(), ObjIssue> {
        let groups = [
            ("position", Some(self.positions), model.positions.len()),
            ("texture coordinate", self.uvs, model.uvs.len()),
            ("normal", self.normals, model.normals.len()),
        ];
        for (kind, indices, available) in groups {
            if let Some(&index) = indices.iter().flatten().find(|&&i| i >= available) {
                return Err(ObjIssue::IndexOutOfRange {
                    line,
                    kind,
                    index: index + 1,
                    available,
                });
            }
        }
        Ok(())
    }
}

/// An indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    positions: Vec<Vec3>,
    uvs: Vec<Vec3>,
    normals: Vec<Vec3>,
    faces: Vec<Face>,
}

/// The outcome of reading OBJ text: the faces that could be read, and what was wrong with the rest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedModel {
    pub model: Model,
    pub issues: Vec<ObjIssue>,
}

impl Model {
    /// Build a mesh from attribute arrays and faces indexing into them.
    ///
    /// Fails on the first face referencing an attribute that does not exist; its `line` is the face's position in
    /// `faces`, counting from 1.
    pub fn new(
        positions: Vec<Vec3>,
        uvs: Vec<Vec3>,
        normals: Vec<Vec3>,
        faces: Vec<Face>,
    ) -> Result<Self, ObjIssue> {
        let mut model = Self {
            positions,
            uvs,
            normals,
            faces: Vec::new(),
        };
        for (i, face) in faces.iter().enumerate() {
            face.check(i + 1, &model)?;
        }
        model.faces = faces;
        Ok(model)
    }

    /// Read a mesh from OBJ text. See the [module documentation](self).
    pub fn parse(text: &str) -> ParsedModel {
        let mut model = Model::default();
        let mut issues = Vec::new();
        let mut faces = Vec::new();

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let mut parts = line.split_whitespace();
            let result = match parts.next() {
                Some("v") => parse_components(line_no, "v", parts).map(|[x, y, z]| {
                    model.positions.push(Vec3::new(x, y, z));
                }),
                Some("vt") => parse_components(line_no, "vt", parts).map(|[u, v]| {
                    model.uvs.push(Vec3::new(u, v, 0.0));
                }),
                Some("vn") => parse_components(line_no, "vn", parts).map(|[x, y, z]| {
                    model.normals.push(Vec3::new(x, y, z));
                }),
                Some("f") => parse_face(line_no, parts).map(|face| faces.push((line_no, face))),
                _ => Ok(()),
            };
            if let Err(issue) = result {
                log::warn!("Skipping OBJ statement: {}", issue);
                issues.push(issue);
            }
        }

        // Faces may refer to vertices defined after them
        for (line_no, face) in faces {
            match face.check(line_no, &model) {
                Ok(()) => model.faces.push(face),
                Err(issue) => {
                    log::warn!("Skipping OBJ face: {}", issue);
                    issues.push(issue);
                }
            }
        }

        log::debug!(
            "Parsed OBJ model: {} positions, {} texture coordinates, {} normals, {} faces, {} issues",
            model.positions.len(),
            model.uvs.len(),
            model.normals.len(),
            model.faces.len(),
            issues.len(),
        );

        ParsedModel { model, issues }
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn uvs(&self) -> &[Vec3] {
        &self.uvs
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }
}

impl Geometry for Model {
    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    fn position(&self, face: usize, slot: usize) -> Vec3 {
        self.positions[self.faces[face].positions[slot]]
    }

    #[inline]
    fn uv(&self, face: usize, slot: usize) -> Vec3 {
        self.faces[face]
            .uvs
            .map_or(Vec3::ZERO, |uvs| self.uvs[uvs[slot]])
    }

    #[inline]
    fn normal(&self, face: usize, slot: usize) -> Vec3 {
        self.faces[face]
            .normals
            .map_or(Vec3::ZERO, |normals| self.normals[normals[slot]])
    }
}

/// Parse the first `N` numbers of a statement. Extra components (such as the `w` of a position) are ignored.
fn parse_components<'a, const N: usize>(
    line: usize,
    statement: &'static str,
    parts: impl Iterator<Item = &'a str>,
) -> Result<[f32; N], ObjIssue> {
    let mut out = [0.0; N];
    let mut found = 0;
    for (slot, token) in out.iter_mut().zip(parts) {
        *slot = token.parse().map_err(|_| ObjIssue::InvalidNumber {
            line,
            token: token.to_string(),
        })?;
        found += 1;
    }
    if found < N {
        return Err(ObjIssue::MissingComponents {
            line,
            statement,
            expected: N,
            found,
        });
    }
    Ok(out)
}

/// Parse a 1-based OBJ index into a 0-based one.
fn parse_index(line: usize, token: &str, whole: &str) -> Result<usize, ObjIssue> {
    match token.parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index - 1),
        _ => Err(ObjIssue::InvalidIndex {
            line,
            token: whole.to_string(),
        }),
    }
}

fn parse_face<'a>(line: usize, parts: impl Iterator<Item = &'a str>) -> Result<Face, ObjIssue> {
    let vertices = parts.collect::<Vec<_>>();
    if vertices.len() != 3 {
        return Err(ObjIssue::NotATriangle {
            line,
            vertices: vertices.len(),
        });
    }

    let mut positions = [0; 3];
    let mut uvs = [None; 3];
    let mut normals = [None; 3];

    for (slot, vertex) in vertices.iter().enumerate() {
        // `p`, `p/t`, `p//n` or `p/t/n`
        let mut refs = vertex.split('/');
        positions[slot] = parse_index(line, refs.next().unwrap_or(""), vertex)?;
        uvs[slot] = match refs.next() {
            Some("") | None => None,
            Some(t) => Some(parse_index(line, t, vertex)?),
        };
        normals[slot] = match refs.next() {
            Some("") | None => None,
            Some(n) => Some(parse_index(line, n, vertex)?),
        };
    }

    let all = |indices: [Option<usize>; 3]| match indices {
        [Some(a), Some(b), Some(c)] => Some([a, b, c]),
        _ => None,
    };

    Ok(Face {
        positions,
        uvs: all(uvs),
        normals: all(normals),
    })
}
