use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::ParserError;
use crate::common::types::{Position, Vector2, Vector3};

/// Splits a face corner (`v`, `v/vt`, `v//vn` or `v/vt/vn`) into 0-based position, uv and normal
/// indices. A field that is missing, empty, non-numeric or zero is reported as absent instead of
/// failing; whether the referenced component actually exists is up to the caller.
pub fn decompose_reference(token: &str) -> (Option<usize>, Option<usize>, Option<usize>) {
    let mut fields = token.split('/');
    let mut next_index = || fields.next().and_then(parse_index);
    let position = next_index();
    let uv = next_index();
    let normal = next_index();
    (position, uv, normal)
}

fn parse_index(field: &str) -> Option<usize> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // indices are 1-based in the file
    field.parse::<usize>().ok()?.checked_sub(1)
}

/// Inverse of [`decompose_reference`]: keeps the empty uv slot (`v//vn`) when only the normal is
/// present and drops both slots when only the position is.
pub fn format_reference(position: usize, uv: Option<usize>, normal: Option<usize>) -> String {
    match (uv, normal) {
        (None, None) => format!("{}", position + 1),
        (Some(uv), None) => format!("{}/{}", position + 1, uv + 1),
        (None, Some(normal)) => format!("{}//{}", position + 1, normal + 1),
        (Some(uv), Some(normal)) => format!("{}/{}/{}", position + 1, uv + 1, normal + 1),
    }
}

/// One corner of a face, 0-based.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexRef {
    pub position: usize,
    pub uv: Option<usize>,
    pub normal: Option<usize>,
}

impl VertexRef {
    pub fn parse(token: &str) -> Result<VertexRef, ParserError> {
        match decompose_reference(token) {
            (Some(position), uv, normal) => Ok(VertexRef { position, uv, normal }),
            (None, _, _) => Err(ParserError::format(format!(
                "Face vertex `{token}` has no usable position index"
            ))),
        }
    }
}

impl Display for VertexRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_reference(self.position, self.uv, self.normal))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub vertices: Vec<VertexRef>,
}

impl Display for Face {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "f {}", self.vertices.iter().join(" "))
    }
}

/// The faces between one `usemtl` declaration and the next (or the end of the file).
#[derive(Debug, Clone)]
pub struct MaterialSection {
    pub material: String,
    pub faces: Vec<Face>,
}

/// The subset of a mesh file this tool cares about.
#[derive(Debug, Clone, Default)]
pub struct ObjAsset {
    pub material_libraries: Vec<String>,
    pub positions: Vec<Position>,
    pub normals: Vec<Vector3>,
    pub uvs: Vec<Vector2>,
    pub sections: Vec<MaterialSection>,
}

impl ObjAsset {
    /// The single material library this mesh is paired with.
    pub fn material_library(&self) -> Result<&str, ParserError> {
        match self.material_libraries.as_slice() {
            [library] => Ok(library.as_str()),
            libraries => Err(ParserError::MissingToken {
                prefix: "mtllib",
                found: libraries.len(),
            }),
        }
    }

    /// Local material names in order of first use.
    pub fn used_materials(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .map(|section| section.material.as_str())
            .unique()
    }
}

/// Compact geometry for a single material: the output of a merge and the input of the writer.
#[derive(Debug, Clone, Default)]
pub struct ObjMesh {
    pub positions: Vec<Position>,
    pub normals: Vec<Vector3>,
    pub uvs: Vec<Vector2>,
    pub faces: Vec<Face>,
}
