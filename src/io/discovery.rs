use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;

/// Files directly inside `dir` whose extension matches `extension` (case-insensitively), sorted so
/// that runs are reproducible.
pub fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

        if matches && path.is_file() {
            entries.push(path);
        }
    }

    Ok(entries.into_iter().sorted().collect())
}

/// Removes everything inside `dir` and makes sure it exists afterwards.
pub fn recreate_dir(dir: &Path) -> Result<(), std::io::Error> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)
}
