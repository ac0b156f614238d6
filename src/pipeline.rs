use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use objmerge_files::ParserError;
use objmerge_files::mtl::writer::MtlWriter;
use objmerge_files::obj::types::ObjMesh;
use objmerge_files::obj::writer::ObjWriter;

use crate::error::MergeError;
use crate::io::discovery::{files_with_extension, recreate_dir};
use crate::merging::grouping::group_meshes_by_material;
use crate::merging::material_resolver::{MaterialIdentity, MaterialTable};
use crate::merging::mesh_merger::MeshMerger;
use crate::scene::scene_loader::SceneLoader;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub intermediate_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Wipe the intermediate directory before baking.
    pub clean_intermediate: bool,
}

impl PipelineConfig {
    /// `<work_dir>/baked` and `<work_dir>/merged`. Keeping both at the same depth keeps the
    /// relocated texture paths valid for the merged output.
    pub fn in_work_dir(work_dir: &Path) -> PipelineConfig {
        PipelineConfig {
            intermediate_dir: work_dir.join("baked"),
            output_dir: work_dir.join("merged"),
            clean_intermediate: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub instances_baked: usize,
    pub instances_skipped: usize,
    pub meshes_skipped: usize,
    pub materials: usize,
    pub groups_written: Vec<MaterialIdentity>,
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "baked {} instances ({} skipped), {} distinct materials, wrote {} merged meshes ({} meshes skipped)",
            self.instances_baked,
            self.instances_skipped,
            self.materials,
            self.groups_written.len(),
            self.meshes_skipped
        )
    }
}

/// Bakes every instance of every outer placement file, then merges the baked meshes. Baking is
/// finished entirely before the first material is resolved.
pub fn run_scene(config: &PipelineConfig, placements: &[PathBuf]) -> Result<RunReport, anyhow::Error> {
    if config.clean_intermediate {
        recreate_dir(&config.intermediate_dir)?;
    }

    let loader = SceneLoader::new(&config.intermediate_dir);
    let mut baked = Vec::new();
    let mut instances_skipped = 0;

    for placement in placements {
        let scene = loader.load_outer(placement)?;
        instances_skipped += scene.skipped.len();
        for instance in scene.baked {
            debug!("{} -> {}", instance.source.display(), instance.mesh.display());
            baked.push(instance.mesh);
        }
    }

    info!("Baked {} instances into {}", baked.len(), config.intermediate_dir.display());

    let mut report = merge_meshes(&config.output_dir, &baked)?;
    report.instances_baked = baked.len();
    report.instances_skipped = instances_skipped;
    Ok(report)
}

/// Merges every `.obj` directly inside `input_dir`, without any baking.
pub fn run_merge(config: &PipelineConfig, input_dir: &Path) -> Result<RunReport, anyhow::Error> {
    let meshes = files_with_extension(input_dir, "obj")?;
    info!("Found {} meshes in {}", meshes.len(), input_dir.display());
    Ok(merge_meshes(&config.output_dir, &meshes)?)
}

/// Groups `meshes` by material identity and writes one merged mesh + material pair per group.
/// Groups are processed one at a time and independently of each other.
pub fn merge_meshes(output_dir: &Path, meshes: &[PathBuf]) -> Result<RunReport, MergeError> {
    let mut table = MaterialTable::default();
    let groups = group_meshes_by_material(meshes, &mut table)?;
    fs::create_dir_all(output_dir)?;

    let mut report = RunReport {
        meshes_skipped: groups.skipped.len(),
        materials: table.len(),
        ..RunReport::default()
    };

    for (identity, candidates) in &groups.candidates {
        let merged = MeshMerger::merge(identity, candidates, &groups.local_names)?;
        let body = table.get(identity).unwrap_or_default();
        write_group(output_dir, identity, body, &merged)?;
        report.groups_written.push(identity.clone());
    }

    Ok(report)
}

/// `<identity>.obj` referencing `<identity>.mtl`, both named after the identity.
pub fn write_group(output_dir: &Path, identity: &MaterialIdentity, body: &str, mesh: &ObjMesh) -> Result<(), ParserError> {
    let mesh_path = output_dir.join(format!("{identity}.obj"));
    let library_name = format!("{identity}.mtl");

    ObjWriter::write_mesh_file(&mesh_path, &library_name, identity.as_str(), mesh)?;
    MtlWriter::write_material_file(&output_dir.join(&library_name), identity.as_str(), body)?;

    debug!(
        "Wrote {} ({} positions, {} uvs, {} normals, {} faces)",
        mesh_path.display(),
        mesh.positions.len(),
        mesh.uvs.len(),
        mesh.normals.len(),
        mesh.faces.len()
    );
    Ok(())
}
