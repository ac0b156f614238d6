use std::path::{Component, Path, PathBuf};

use itertools::Itertools;

/// Resolves `reference` (which may use `\` separators) against the directory containing `file`.
pub fn resolve_sibling(file: &Path, reference: &str) -> PathBuf {
    let reference = reference.replace('\\', "/");
    match file.parent() {
        Some(dir) => dir.join(reference),
        None => PathBuf::from(reference),
    }
}

/// Folds `.` and `..` without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => (),
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// A `/` separated path leading from the directory `from` to `to`. Falls back to `to` itself when
/// the two do not share a root (e.g. different drives).
pub fn relative_path(from: &Path, to: &Path) -> Result<String, std::io::Error> {
    let from = normalize_lexically(&std::path::absolute(from)?);
    let to = normalize_lexically(&std::path::absolute(to)?);

    let from_components = from.components().collect_vec();
    let to_components = to.components().collect_vec();

    let common = from_components
        .iter()
        .zip(&to_components)
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return Ok(to.to_string_lossy().replace('\\', "/"));
    }

    let ups = std::iter::repeat_n("..".to_string(), from_components.len() - common);
    let downs = to_components[common..]
        .iter()
        .map(|component| component.as_os_str().to_string_lossy().to_string());

    Ok(ups.chain(downs).join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_resolution() {
        assert_eq!(
            resolve_sibling(Path::new("scene/elements/hall.txt"), "..\\meshes\\chair.obj"),
            PathBuf::from("scene/elements/../meshes/chair.obj")
        );
    }

    #[test]
    fn lexical_normalization() {
        assert_eq!(
            normalize_lexically(Path::new("/a/b/./../c/d/..")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_lexically(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn relative_paths() -> Result<(), std::io::Error> {
        assert_eq!(
            relative_path(Path::new("/work/baked"), Path::new("/assets/meshes/tex/wood.png"))?,
            "../../assets/meshes/tex/wood.png"
        );
        assert_eq!(
            relative_path(Path::new("/work/baked"), Path::new("/work/baked/wood.png"))?,
            "wood.png"
        );
        assert_eq!(
            relative_path(Path::new("/work/baked"), Path::new("/work/baked/../tex/a.png"))?,
            "../tex/a.png"
        );
        Ok(())
    }
}
