use std::fs;
use std::path::{Path, PathBuf};

use objmerge_files::common::reader::parse_lines;
use objmerge_files::obj::reader::ObjReader;
use objmerge_files::obj::types::ObjAsset;

pub const RED: &str = "Ka 0 0 0\nKd 1 0 0\nmap_Kd textures\\red.png";

pub fn write(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

pub fn read_obj(path: &Path) -> ObjAsset {
    ObjReader::parse_lines(&parse_lines(&fs::read_to_string(path).unwrap())).unwrap()
}

/// A unit triangle in the xy plane, drawn with `material`.
pub fn triangle(library: &str, material: &str) -> String {
    format!(
        "# triangle\nmtllib {library}\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\nusemtl {material}\nf 1/1/1 2/2/1 3/3/1\n"
    )
}
