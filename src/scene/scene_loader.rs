use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, trace, warn};
use objmerge_files::ParserError;
use objmerge_files::common::reader::{mandatory_token, parse_position, read_file_lines, split_keyword};
use objmerge_files::mtl::reader::MtlReader;
use objmerge_files::mtl::types::rewrite_texture_path;
use objmerge_files::mtl::writer::MtlWriter;
use objmerge_files::placement::reader::PlacementReader;

use crate::error::MergeError;
use crate::io::paths::{relative_path, resolve_sibling};
use crate::scene::transform::Transform;

/// A mesh instance that has been baked into world space.
#[derive(Debug, Clone)]
pub struct BakedInstance {
    pub source: PathBuf,
    pub mesh: PathBuf,
}

#[derive(Debug, Default)]
pub struct SceneReport {
    pub baked: Vec<BakedInstance>,
    /// Element or mesh references that could not be found.
    pub skipped: Vec<PathBuf>,
}

impl SceneReport {
    pub fn extend(&mut self, other: SceneReport) {
        self.baked.extend(other.baked);
        self.skipped.extend(other.skipped);
    }
}

/// Walks the two-level placement hierarchy (building -> elements -> meshes) and writes one baked
/// mesh + material library pair per leaf instance into the intermediate directory.
pub struct SceneLoader {
    intermediate_dir: PathBuf,
}

impl SceneLoader {
    pub fn new(intermediate_dir: impl Into<PathBuf>) -> SceneLoader {
        SceneLoader {
            intermediate_dir: intermediate_dir.into(),
        }
    }

    /// Element files are resolved relative to the outer file, mesh files relative to their
    /// element file.
    pub fn load_outer(&self, outer: &Path) -> Result<SceneReport, MergeError> {
        let mut report = SceneReport::default();
        let records = PlacementReader::parse_outer_file(outer)?;
        info!("{}: {} element placements", outer.display(), records.len());

        for record in &records {
            let element = resolve_sibling(outer, &record.reference);
            if !element.is_file() {
                warn!("Skipping element {} of {}: {} does not exist", record.id, outer.display(), element.display());
                report.skipped.push(element);
                continue;
            }

            let element_transform = Transform::from_record(record);
            report.extend(self.load_element(&element, &element_transform)?);
        }

        Ok(report)
    }

    pub fn load_element(&self, element: &Path, element_transform: &Transform) -> Result<SceneReport, MergeError> {
        let mut report = SceneReport::default();
        let records = PlacementReader::parse_inner_file(element)?;
        debug!("{}: {} object placements", element.display(), records.len());

        for record in &records {
            let mesh = resolve_sibling(element, &record.reference);
            let world = Transform::combine(&Transform::from_record(record), element_transform);

            match self.bake_instance(&mesh, &world) {
                Ok(baked) => report.baked.push(baked),
                Err(MergeError::MissingFile { path }) => {
                    warn!("Skipping instance {}: {} does not exist", record.id, path.display());
                    report.skipped.push(path);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(report)
    }

    /// Writes `mesh` with every position transformed by `world`, plus a copy of its material
    /// library with texture paths made relative to the intermediate directory. Both copies get a
    /// freshly generated name, so the same mesh can be instanced any number of times.
    pub fn bake_instance(&self, mesh: &Path, world: &Transform) -> Result<BakedInstance, MergeError> {
        if !mesh.is_file() {
            return Err(MergeError::missing(mesh));
        }

        let lines = read_file_lines(mesh)?;
        let library = resolve_sibling(mesh, mandatory_token(&lines, "mtllib")?);
        if !library.is_file() {
            return Err(MergeError::missing(library));
        }

        fs::create_dir_all(&self.intermediate_dir)?;
        let stem = self.unique_stem(mesh);
        let baked_mesh = self.intermediate_dir.join(format!("{stem}.obj"));
        let baked_library = self.intermediate_dir.join(format!("{stem}.mtl"));

        let baked_lines = bake_lines(&lines, world, &format!("{stem}.mtl"))?;
        let mut w = BufWriter::new(fs::File::create(&baked_mesh)?);
        for line in &baked_lines {
            writeln!(w, "{}", line)?;
        }
        w.flush()?;

        self.relocate_library(&library, &baked_library)?;
        trace!("Baked {} into {}", mesh.display(), baked_mesh.display());

        Ok(BakedInstance {
            source: mesh.to_path_buf(),
            mesh: baked_mesh,
        })
    }

    fn relocate_library(&self, library: &Path, target: &Path) -> Result<(), MergeError> {
        let mut asset = MtlReader::parse_file(library)?;
        let library_dir = library.parent().unwrap_or(Path::new(""));

        for material in &mut asset.materials {
            for property in &mut material.properties {
                let mut failure = None;
                let relocated = rewrite_texture_path(property.as_str(), |texture| {
                    let source = library_dir.join(texture.replace('\\', "/"));
                    relative_path(&self.intermediate_dir, &source).unwrap_or_else(|err| {
                        failure = Some(err);
                        texture.to_string()
                    })
                });

                if let Some(err) = failure {
                    return Err(err.into());
                }
                *property = relocated;
            }
        }

        MtlWriter::write_asset_file(target, &asset)?;
        Ok(())
    }

    fn unique_stem(&self, mesh: &Path) -> String {
        let source_stem = mesh
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "mesh".to_string());

        loop {
            let stem = format!("{}_{:016x}", source_stem, rand::random::<u64>());
            if !self.intermediate_dir.join(format!("{stem}.obj")).exists() {
                return stem;
            }
        }
    }
}

/// Transforms every `v` record by `world` (keeping any trailing tokens such as vertex colours)
/// and points `mtllib` at `library_name`. Everything else passes through unchanged.
pub fn bake_lines(lines: &[String], world: &Transform, library_name: &str) -> Result<Vec<String>, ParserError> {
    lines
        .iter()
        .map(|line| {
            match split_keyword(line).0 {
                "v" => {
                    let mut position = parse_position(line)?;
                    position.point = world.transform_point(position.point);
                    Ok(format!("v {}", position))
                }
                "mtllib" => Ok(format!("mtllib {}", library_name)),
                _ => Ok(line.clone()),
            }
        })
        .collect()
}
