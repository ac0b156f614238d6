use std::path::Path;

use log::warn;

use crate::ParserError;
use crate::common::reader::{parse_position, parse_vector2, parse_vector3, read_file_lines, split_keyword};
use crate::obj::types::{Face, MaterialSection, ObjAsset, VertexRef};

pub struct ObjReader {}

impl ObjReader {
    pub fn parse_file(path: &Path) -> Result<ObjAsset, ParserError> {
        Self::parse_lines(&read_file_lines(path)?)
    }

    /// Parses comment-free lines. Unknown keywords (`o`, `g`, `s`, ...) are ignored.
    pub fn parse_lines(lines: &[String]) -> Result<ObjAsset, ParserError> {
        let mut asset = ObjAsset::default();
        let mut orphaned_faces = 0usize;

        for line in lines {
            let (keyword, rest) = split_keyword(line);
            match keyword {
                "mtllib" if !rest.is_empty() => asset.material_libraries.push(rest.to_string()),
                "v" => asset.positions.push(parse_position(line)?),
                "vn" => asset.normals.push(parse_vector3(line)?),
                "vt" => asset.uvs.push(parse_vector2(line)?),
                "usemtl" => {
                    if rest.is_empty() {
                        return Err(ParserError::format("`usemtl` without a material name"));
                    }
                    asset.sections.push(MaterialSection {
                        material: rest.to_string(),
                        faces: Vec::new(),
                    });
                }
                "f" => {
                    let face = Self::parse_face(rest)?;
                    match asset.sections.last_mut() {
                        Some(section) => section.faces.push(face),
                        None => orphaned_faces += 1,
                    }
                }
                _ => (),
            }
        }

        if orphaned_faces > 0 {
            warn!("Ignoring {} faces declared before any usemtl", orphaned_faces);
        }

        Ok(asset)
    }

    fn parse_face(rest: &str) -> Result<Face, ParserError> {
        let vertices = rest
            .split_whitespace()
            .map(VertexRef::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if vertices.is_empty() {
            return Err(ParserError::format("Face without vertices"));
        }

        Ok(Face { vertices })
    }
}
