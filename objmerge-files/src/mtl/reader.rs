use std::path::Path;

use crate::ParserError;
use crate::common::reader::{read_file_lines, split_keyword};
use crate::mtl::types::{MaterialDefinition, MtlAsset};

pub struct MtlReader {}

impl MtlReader {
    pub fn parse_file(path: &Path) -> Result<MtlAsset, ParserError> {
        Self::parse_lines(&read_file_lines(path)?)
    }

    /// Splits comment-free lines into per-material blocks. A declaration directly followed by
    /// another one yields a legitimately empty material.
    pub fn parse_lines(lines: &[String]) -> Result<MtlAsset, ParserError> {
        let mut asset = MtlAsset::default();

        for line in lines {
            let (keyword, name) = split_keyword(line);
            if keyword == "newmtl" {
                if name.is_empty() {
                    return Err(ParserError::format("`newmtl` without a material name"));
                }

                asset.materials.push(MaterialDefinition {
                    name: name.to_string(),
                    properties: Vec::new(),
                });
                continue;
            }

            match asset.materials.last_mut() {
                Some(material) => material.properties.push(line.clone()),
                None => asset.preamble.push(line.clone()),
            }
        }

        Ok(asset)
    }
}
