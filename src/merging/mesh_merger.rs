use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use log::{debug, info};
use objmerge_files::ParserError;
use objmerge_files::obj::reader::ObjReader;
use objmerge_files::obj::types::{Face, ObjAsset, ObjMesh, VertexRef};

use crate::error::MergeError;
use crate::merging::material_resolver::{LocalNameMap, MaterialIdentity};

/// Source index -> output index, per component kind. A fresh one is used for every source file,
/// so only repeated references within one file's contribution collapse onto a shared entry.
#[derive(Debug, Default)]
struct ComponentLookup {
    positions: HashMap<usize, usize>,
    uvs: HashMap<usize, usize>,
    normals: HashMap<usize, usize>,
}

/// Returns the output index of `source[index]`, copying it into `target` the first time it is seen.
fn copy_component<T: Clone>(
    index: usize,
    source: &[T],
    target: &mut Vec<T>,
    lookup: &mut HashMap<usize, usize>,
    kind: &'static str,
) -> Result<usize, ParserError> {
    if let Some(&copied) = lookup.get(&index) {
        return Ok(copied);
    }

    let value = source.get(index).ok_or(ParserError::IndexOutOfRange {
        kind,
        index: index + 1,
        len: source.len(),
    })?;

    let copied = target.len();
    target.push(value.clone());
    lookup.insert(index, copied);
    Ok(copied)
}

pub enum MeshMerger {}

impl MeshMerger {
    /// Rebuilds one compact mesh from every face that `candidates` draw with `identity`.
    pub fn merge(
        identity: &MaterialIdentity,
        candidates: &[PathBuf],
        local_names: &HashMap<PathBuf, LocalNameMap>,
    ) -> Result<ObjMesh, MergeError> {
        info!("Merging material {} from {} meshes", identity, candidates.len());
        let mut merged = ObjMesh::default();

        for path in candidates {
            let names = local_names
                .get(path)
                .and_then(|map| map.local_names(identity))
                .ok_or_else(|| MergeError::UndeclaredMaterial {
                    file: path.clone(),
                    name: identity.to_string(),
                })?;

            let asset = ObjReader::parse_file(path)?;
            let faces_before = merged.faces.len();
            Self::merge_asset(&asset, names, &mut merged)?;
            debug!(
                "{} contributed {} faces as {:?}",
                path.display(),
                merged.faces.len() - faces_before,
                names
            );
        }

        Ok(merged)
    }

    /// Appends the faces of every section of `asset` declared under one of `local_names`,
    /// renumbering their references into `merged`.
    pub fn merge_asset(asset: &ObjAsset, local_names: &BTreeSet<String>, merged: &mut ObjMesh) -> Result<(), ParserError> {
        let mut lookup = ComponentLookup::default();

        let faces = asset
            .sections
            .iter()
            .filter(|section| local_names.contains(&section.material))
            .flat_map(|section| &section.faces);

        for face in faces {
            let mut vertices = Vec::with_capacity(face.vertices.len());
            for vertex in &face.vertices {
                let position = copy_component(
                    vertex.position,
                    &asset.positions,
                    &mut merged.positions,
                    &mut lookup.positions,
                    "position",
                )?;
                let uv = vertex
                    .uv
                    .map(|uv| copy_component(uv, &asset.uvs, &mut merged.uvs, &mut lookup.uvs, "uv"))
                    .transpose()?;
                let normal = vertex
                    .normal
                    .map(|normal| copy_component(normal, &asset.normals, &mut merged.normals, &mut lookup.normals, "normal"))
                    .transpose()?;

                vertices.push(VertexRef { position, uv, normal });
            }

            merged.faces.push(Face { vertices });
        }

        Ok(())
    }
}
