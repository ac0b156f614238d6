use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use objmerge_files::common::reader::{mandatory_token, read_file_lines};
use objmerge_files::obj::reader::ObjReader;

use crate::error::MergeError;
use crate::io::paths::resolve_sibling;
use crate::merging::material_resolver::{LocalNameMap, MaterialIdentity, MaterialResolver, MaterialTable};

/// Which mesh files contribute to which material identity.
#[derive(Debug, Default)]
pub struct MaterialGroups {
    /// Candidate files per identity, in input order and without duplicates.
    pub candidates: BTreeMap<MaterialIdentity, Vec<PathBuf>>,
    pub local_names: HashMap<PathBuf, LocalNameMap>,
    pub skipped: Vec<PathBuf>,
}

/// Resolves the material library of every mesh and groups the meshes by the identities they use.
/// Meshes whose library is missing are skipped; a mesh using a name its own library does not
/// declare aborts the run.
pub fn group_meshes_by_material(meshes: &[PathBuf], table: &mut MaterialTable) -> Result<MaterialGroups, MergeError> {
    let mut groups = MaterialGroups::default();

    for mesh in meshes {
        match register_mesh(mesh, table, &mut groups) {
            Err(MergeError::MissingFile { path }) => {
                warn!("Skipping {}: {} does not exist", mesh.display(), path.display());
                groups.skipped.push(mesh.clone());
            }
            result => result?,
        }
    }

    Ok(groups)
}

fn register_mesh(mesh: &Path, table: &mut MaterialTable, groups: &mut MaterialGroups) -> Result<(), MergeError> {
    if !mesh.is_file() {
        return Err(MergeError::missing(mesh));
    }

    let lines = read_file_lines(mesh)?;
    let library = resolve_sibling(mesh, mandatory_token(&lines, "mtllib")?);
    if !library.is_file() {
        return Err(MergeError::missing(library));
    }

    let asset = ObjReader::parse_lines(&lines)?;
    let resolved = MaterialResolver::resolve_file(&library, table)?;
    debug!(
        "{} declares {} materials, uses {}",
        mesh.display(),
        resolved.len(),
        asset.used_materials().count()
    );

    for name in asset.used_materials() {
        let identity = resolved.get(name).ok_or_else(|| MergeError::UndeclaredMaterial {
            file: mesh.to_path_buf(),
            name: name.to_string(),
        })?;

        let files = groups.candidates.entry(identity.clone()).or_default();
        if files.last().map(PathBuf::as_path) != Some(mesh) {
            files.push(mesh.to_path_buf());
        }
    }

    groups
        .local_names
        .insert(mesh.to_path_buf(), LocalNameMap::from_resolved(&resolved));
    Ok(())
}
